// Copyright (c) 2013-2015 Sandstorm Development Group, Inc. and contributors
// Licensed under the MIT License:
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! Pointer decoding.
//!
//! Every step here re-derives its answer from the raw pointer word: a word's
//! kind bits decide how its remaining bits are sliced, so pointers are never
//! cached in decoded form.

use crate::private::primitive::Primitive;
use crate::private::units::*;
use crate::reference::Reference;
use crate::{Error, ErrorKind, Result};

pub use self::ElementSize::{
    Bit, Byte, EightBytes, FourBytes, InlineComposite, Pointer, TwoBytes, Void,
};

/// Element encoding of a list, bits 32..35 of a list pointer.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementSize {
    Void = 0,
    Bit = 1,
    Byte = 2,
    TwoBytes = 3,
    FourBytes = 4,
    EightBytes = 5,
    Pointer = 6,
    InlineComposite = 7,
}

impl ElementSize {
    /// Decodes the low three bits of `val`.
    fn from(val: u8) -> Self {
        match val & 7 {
            0 => Self::Void,
            1 => Self::Bit,
            2 => Self::Byte,
            3 => Self::TwoBytes,
            4 => Self::FourBytes,
            5 => Self::EightBytes,
            6 => Self::Pointer,
            _ => Self::InlineComposite,
        }
    }
}

pub fn data_bits_per_element(size: ElementSize) -> BitCount32 {
    match size {
        Void => 0,
        Bit => 1,
        Byte => 8,
        TwoBytes => 16,
        FourBytes => 32,
        EightBytes => 64,
        Pointer => 0,
        InlineComposite => 0,
    }
}

pub fn pointers_per_element(size: ElementSize) -> u32 {
    match size {
        Pointer => 1,
        _ => 0,
    }
}

/// Data and pointer section sizes of a struct, in words.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StructSize {
    pub data: WordCount16,
    pub pointers: WirePointerCount16,
}

impl StructSize {
    pub fn total(&self) -> WordCount32 {
        u32::from(self.data) + u32::from(self.pointers) * POINTER_SIZE_IN_WORDS as WordCount32
    }
}

/// The low two bits of every pointer word.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Struct = 0,
    List = 1,
    Far = 2,
    Other = 3,
}

impl PointerKind {
    fn from(val: u8) -> Self {
        match val & 3 {
            0 => Self::Struct,
            1 => Self::List,
            2 => Self::Far,
            _ => Self::Other,
        }
    }
}

/// What a pointer slot holds, after far pointers have been followed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerType {
    Null,
    Struct,
    List,
    Other,
}

/// One pointer word, as read from the wire.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct WirePointer(u64);

impl WirePointer {
    #[inline]
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Reads the pointer word at `reference`.
    #[inline]
    pub fn read(reference: Reference<'_>) -> Result<Self> {
        Ok(Self(reference.read_u64(0)?))
    }

    #[inline]
    pub fn raw(&self) -> u64 {
        self.0
    }

    #[inline]
    fn offset_and_kind(&self) -> u32 {
        self.0 as u32
    }

    #[inline]
    fn upper32bits(&self) -> u32 {
        (self.0 >> 32) as u32
    }

    #[inline]
    pub fn kind(&self) -> PointerKind {
        PointerKind::from(self.offset_and_kind() as u8)
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// Signed word offset from the end of the pointer to its target.
    #[inline]
    pub fn offset_words(&self) -> i32 {
        (self.offset_and_kind() as i32) >> 2
    }

    #[inline]
    pub fn struct_data_size(&self) -> WordCount16 {
        self.upper32bits() as WordCount16
    }

    #[inline]
    pub fn struct_ptr_count(&self) -> WirePointerCount16 {
        (self.upper32bits() >> 16) as WirePointerCount16
    }

    #[inline]
    pub fn struct_size(&self) -> StructSize {
        StructSize {
            data: self.struct_data_size(),
            pointers: self.struct_ptr_count(),
        }
    }

    /// In the tag word of an inline composite list, the offset field holds
    /// the element count.
    #[inline]
    pub fn inline_composite_list_element_count(&self) -> ElementCount32 {
        self.offset_and_kind() >> 2
    }

    #[inline]
    pub fn list_element_size(&self) -> ElementSize {
        ElementSize::from(self.upper32bits() as u8)
    }

    #[inline]
    pub fn list_element_count(&self) -> ElementCount32 {
        self.upper32bits() >> 3
    }

    #[inline]
    pub fn list_inline_composite_word_count(&self) -> WordCount32 {
        self.list_element_count()
    }

    #[inline]
    pub fn is_double_far(&self) -> bool {
        ((self.offset_and_kind() >> 2) & 1) != 0
    }

    #[inline]
    pub fn far_position_in_segment(&self) -> WordCount32 {
        self.offset_and_kind() >> 3
    }

    #[inline]
    pub fn far_segment_id(&self) -> u32 {
        self.upper32bits()
    }
}

impl core::fmt::Debug for WirePointer {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "WirePointer({:#018x}, {:?})", self.0, self.kind())
    }
}

fn wrong_kind(expected: PointerKind, found: PointerKind) -> Error {
    Error::from_kind(ErrorKind::WrongPointerKind { expected, found })
}

#[inline]
fn round_bits_up_to_bytes(bits: u64) -> u64 {
    bits.div_ceil(BITS_PER_BYTE as u64)
}

#[inline]
fn round_bytes_up_to_words(bytes: usize) -> usize {
    bytes.div_ceil(BYTES_PER_WORD)
}

/// Follows a far pointer, if `reference` holds one.
///
/// Returns the reference at which the real struct or list pointer word can be
/// read, plus, for a double far pointer, the reference at which the pointed-to
/// content starts. A pointer that is not far comes back unchanged.
pub fn follow_fars<'a>(
    reference: Reference<'a>,
) -> Result<(Reference<'a>, Option<Reference<'a>>)> {
    let pointer = WirePointer::read(reference)?;
    if pointer.kind() != PointerKind::Far {
        return Ok((reference, None));
    }

    let segment = reference.segment().sibling(pointer.far_segment_id())?;
    let pad_bytes = if pointer.is_double_far() {
        2 * BYTES_PER_POINTER
    } else {
        BYTES_PER_POINTER
    };
    let position = pointer.far_position_in_segment() as usize * BYTES_PER_WORD;
    if position + pad_bytes > segment.size() {
        return Err(Error::from_kind(ErrorKind::InvalidFarPointerOffset));
    }

    tracing::trace!(
        from = reference.segment().id(),
        to = segment.id(),
        position,
        double = pointer.is_double_far(),
        "following far pointer"
    );

    let pad = segment.at(position);
    if !pointer.is_double_far() {
        return Ok((pad, None));
    }

    //# Landing pad is another far pointer. It is followed by a tag
    //# describing the pointed-to object.
    let landing = WirePointer::read(pad)?;
    if landing.kind() != PointerKind::Far {
        return Err(Error::from_kind(
            ErrorKind::DoubleFarPointerLandingPadNotFar,
        ));
    }
    if landing.is_double_far() {
        return Err(Error::from_kind(ErrorKind::DoubleFarPointerToDoubleFar));
    }
    let (content, _) = follow_fars(pad)?;
    Ok((pad.offset(BYTES_PER_POINTER as isize), Some(content)))
}

/// Where the object of a positional pointer starts: right after the pointer
/// word plus its offset, unless a double far pointer placed it elsewhere.
#[inline]
fn target<'a>(
    reference: Reference<'a>,
    pointer: WirePointer,
    content: Option<Reference<'a>>,
) -> Reference<'a> {
    match content {
        Some(content) => content,
        None => reference
            .offset((1 + pointer.offset_words() as isize) * BYTES_PER_WORD as isize),
    }
}

/// Classifies the pointer at `reference` without decoding its target.
pub fn pointer_type(reference: Reference<'_>) -> Result<PointerType> {
    let (reference, _) = follow_fars(reference)?;
    let pointer = WirePointer::read(reference)?;
    if pointer.is_null() {
        return Ok(PointerType::Null);
    }
    match pointer.kind() {
        PointerKind::Struct => Ok(PointerType::Struct),
        PointerKind::List => Ok(PointerType::List),
        PointerKind::Far => Err(Error::from_kind(ErrorKind::FarPointerToFarPointer)),
        PointerKind::Other => Ok(PointerType::Other),
    }
}

/// A struct's data and pointer sections.
///
/// The two sections are located independently; they are adjacent only when
/// both come from the same pointer resolution.
#[derive(Clone, Copy, Debug)]
pub struct StructReader<'a> {
    data: Reference<'a>,
    pointers: Reference<'a>,
    data_size: ByteCount32,
    pointer_count: WirePointerCount16,
}

impl<'a> StructReader<'a> {
    /// A struct with no data and no pointers.
    pub fn new_default<'b>() -> StructReader<'b> {
        StructReader {
            data: Reference::empty(),
            pointers: Reference::empty(),
            data_size: 0,
            pointer_count: 0,
        }
    }

    /// Decodes the struct pointer word at `reference`, returning its signed
    /// word offset and section sizes.
    pub fn decode_pointer(reference: Reference<'_>) -> Result<(i32, StructSize)> {
        let pointer = WirePointer::read(reference)?;
        if pointer.kind() != PointerKind::Struct {
            return Err(wrong_kind(PointerKind::Struct, pointer.kind()));
        }
        Ok((pointer.offset_words(), pointer.struct_size()))
    }

    /// Resolves the struct pointer at `reference`. Returns `None` for a null
    /// pointer.
    pub fn from_pointer(reference: Reference<'a>) -> Result<Option<Self>> {
        let (reference, content) = follow_fars(reference)?;
        let (offset, size) = Self::decode_pointer(reference)?;

        if offset == -1 && size.data == 0 && size.pointers == 0 {
            return Ok(Some(Self::new_default()));
        }
        if offset == 0 && size.data == 0 && size.pointers == 0 {
            return Ok(None);
        }

        let data_size = usize::from(size.data) * BYTES_PER_WORD;
        let pointers_size = usize::from(size.pointers) * BYTES_PER_POINTER;
        let data = match content {
            Some(content) => content,
            None => reference.offset((1 + offset as isize) * BYTES_PER_WORD as isize),
        };
        let pointers = data.offset(data_size as isize);

        let end = match data.position().checked_add(data_size + pointers_size) {
            Some(end) if end <= data.segment().size() => end,
            _ => {
                return Err(Error::from_kind(
                    ErrorKind::BufferTooSmallForStructContent,
                ))
            }
        };

        if data.segment().same_segment(&reference.segment())
            && (data.position()..end).contains(&reference.position())
        {
            return Err(Error::from_kind(ErrorKind::StructContentOverlapsPointer));
        }

        data.segment().message().read_words(size.total() as usize)?;

        Ok(Some(Self {
            data,
            pointers,
            data_size: data_size as ByteCount32,
            pointer_count: size.pointers,
        }))
    }

    #[inline]
    pub fn data(&self) -> Reference<'a> {
        self.data
    }

    /// Size of the data section in bytes.
    #[inline]
    pub fn data_size(&self) -> ByteCount32 {
        self.data_size
    }

    #[inline]
    pub fn pointers(&self) -> Reference<'a> {
        self.pointers
    }

    /// Size of the pointer section in bytes.
    #[inline]
    pub fn pointers_size(&self) -> ByteCount32 {
        u32::from(self.pointer_count) * BYTES_PER_POINTER as u32
    }

    #[inline]
    pub fn pointer_count(&self) -> WirePointerCount16 {
        self.pointer_count
    }

    pub fn data_section(&self) -> Result<&'a [u8]> {
        self.data.read_bytes(0, self.data_size as usize)
    }

    /// Reads the field at `byte_offset` in the data section. Fields beyond
    /// the end of the section read as zero.
    #[inline]
    pub fn get_data_field<T: Primitive>(&self, byte_offset: ByteCount) -> Result<T> {
        // The struct may have been written by an older version of the schema
        // that did not contain the field.
        if byte_offset + T::BYTES <= self.data_size as usize {
            T::read(self.data, byte_offset)
        } else {
            Ok(T::ZERO)
        }
    }

    /// Reads the field at `byte_offset`, XORed with its schema default. A
    /// field beyond the end of the section reads as the default.
    #[inline]
    pub fn get_data_field_mask<T: Primitive>(
        &self,
        byte_offset: ByteCount,
        mask: <T as crate::private::Mask>::T,
    ) -> Result<T> {
        Ok(crate::private::Mask::mask(
            self.get_data_field::<T>(byte_offset)?,
            mask,
        ))
    }

    #[inline]
    pub fn get_bool_field(&self, bit_offset: usize) -> Result<bool> {
        if bit_offset < self.data_size as usize * BITS_PER_BYTE {
            let byte = self.data.read_u8(bit_offset / BITS_PER_BYTE)?;
            Ok((byte >> (bit_offset % BITS_PER_BYTE)) & 1 != 0)
        } else {
            Ok(false)
        }
    }

    #[inline]
    pub fn get_bool_field_mask(&self, bit_offset: usize, mask: bool) -> Result<bool> {
        Ok(self.get_bool_field(bit_offset)? ^ mask)
    }

    /// The pointer slot `ptr_index`. Slots beyond the pointer section read as
    /// a null pointer.
    #[inline]
    pub fn get_pointer_field(&self, ptr_index: usize) -> Reference<'a> {
        if ptr_index < self.pointer_count as usize {
            self.pointers
                .offset((ptr_index * BYTES_PER_POINTER) as isize)
        } else {
            Reference::null_pointer()
        }
    }
}

/// A list's element region and layout.
#[derive(Clone, Copy, Debug)]
pub struct ListReader<'a> {
    data: Reference<'a>,
    element_count: ElementCount32,
    step: BitCount32,
    struct_data_size: ByteCount32,
    struct_pointer_count: WirePointerCount16,
    element_size: ElementSize,
}

impl<'a> ListReader<'a> {
    pub fn new_default<'b>() -> ListReader<'b> {
        ListReader {
            data: Reference::empty(),
            element_count: 0,
            step: 0,
            struct_data_size: 0,
            struct_pointer_count: 0,
            element_size: ElementSize::Void,
        }
    }

    /// Resolves the list pointer at `reference`. Returns `None` for a null
    /// pointer.
    ///
    /// If `expected_element_size` is given, the list's encoding must be
    /// readable as that element type. Any primitive or pointer list may be
    /// read as a list of structs, and a struct list may be read as a list of
    /// its first field, but a bit list is only ever a bit list.
    pub fn from_pointer(
        reference: Reference<'a>,
        expected_element_size: Option<ElementSize>,
    ) -> Result<Option<Self>> {
        let (reference, content) = follow_fars(reference)?;
        let pointer = WirePointer::read(reference)?;
        if pointer.is_null() {
            return Ok(None);
        }
        if pointer.kind() != PointerKind::List {
            return Err(wrong_kind(PointerKind::List, pointer.kind()));
        }

        let element_size = pointer.list_element_size();
        let arena = reference.segment().message();
        let mut data = target(reference, pointer, content);

        match element_size {
            InlineComposite => {
                let word_count = pointer.list_inline_composite_word_count();
                let tag = data;
                check_list_bounds(tag, (word_count as usize + 1) * BYTES_PER_WORD)?;

                let (_, size) = StructReader::decode_pointer(tag)?;
                let element_count = WirePointer::read(tag)?.inline_composite_list_element_count();
                let words_per_element = size.total();

                if u64::from(element_count) * u64::from(words_per_element) > u64::from(word_count)
                {
                    return Err(Error::from_kind(ErrorKind::InlineCompositeListOverrun));
                }

                data = tag.offset(BYTES_PER_WORD as isize);
                arena.read_words(word_count as usize + 1)?;
                if words_per_element == 0 {
                    // Lists of zero-sized structs can claim to be arbitrarily
                    // large without having sent actual data.
                    arena.amplified_read(u64::from(element_count))?;
                }

                let data_size = usize::from(size.data) * BYTES_PER_WORD;
                match expected_element_size {
                    None | Some(Void) | Some(InlineComposite) => (),
                    Some(Bit) => {
                        return Err(Error::from_kind(ErrorKind::IncompatibleListElementSize {
                            expected: Bit,
                            found: InlineComposite,
                        }));
                    }
                    Some(expected @ (Byte | TwoBytes | FourBytes | EightBytes)) => {
                        if data_size * BITS_PER_BYTE < data_bits_per_element(expected) as usize {
                            return Err(Error::from_kind(
                                ErrorKind::IncompatibleListElementSize {
                                    expected,
                                    found: InlineComposite,
                                },
                            ));
                        }
                    }
                    Some(Pointer) => {
                        // Reading a struct list as a pointer list means reading
                        // the first pointer of each element.
                        if size.pointers == 0 {
                            return Err(Error::from_kind(
                                ErrorKind::IncompatibleListElementSize {
                                    expected: Pointer,
                                    found: InlineComposite,
                                },
                            ));
                        }
                        data = data.offset(data_size as isize);
                    }
                }

                Ok(Some(Self {
                    data,
                    element_count,
                    step: words_per_element * BITS_PER_WORD as u32,
                    struct_data_size: data_size as ByteCount32,
                    struct_pointer_count: size.pointers,
                    element_size,
                }))
            }
            _ => {
                let data_bits = data_bits_per_element(element_size);
                let pointer_count = pointers_per_element(element_size);
                let element_count = pointer.list_element_count();
                let step = data_bits + pointer_count * BITS_PER_WORD as u32;

                let byte_count =
                    round_bits_up_to_bytes(u64::from(element_count) * u64::from(step)) as usize;
                check_list_bounds(data, byte_count)?;
                arena.read_words(round_bytes_up_to_words(byte_count))?;
                if element_size == Void {
                    // Watch out for lists of void, which can claim to be
                    // arbitrarily large without having sent actual data.
                    arena.amplified_read(u64::from(element_count))?;
                }

                if let Some(expected) = expected_element_size {
                    if element_size == Bit && expected != Bit {
                        return Err(Error::from_kind(ErrorKind::IncompatibleListElementSize {
                            expected,
                            found: Bit,
                        }));
                    }
                    if data_bits_per_element(expected) > data_bits
                        || pointers_per_element(expected) > pointer_count
                    {
                        return Err(Error::from_kind(ErrorKind::IncompatibleListElementSize {
                            expected,
                            found: element_size,
                        }));
                    }
                }

                Ok(Some(Self {
                    data,
                    element_count,
                    step,
                    struct_data_size: data_bits / BITS_PER_BYTE as u32,
                    struct_pointer_count: pointer_count as WirePointerCount16,
                    element_size,
                }))
            }
        }
    }

    #[inline]
    pub fn len(&self) -> ElementCount32 {
        self.element_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.element_count == 0
    }

    /// Start of the first element.
    #[inline]
    pub fn data(&self) -> Reference<'a> {
        self.data
    }

    #[inline]
    pub fn element_size(&self) -> ElementSize {
        self.element_size
    }

    /// Bytes per element. Zero for void and bit lists.
    #[inline]
    pub fn element_byte_size(&self) -> ByteCount32 {
        self.step / BITS_PER_BYTE as u32
    }

    /// Data section size of each element read as a struct, in words.
    #[inline]
    pub fn struct_data_words(&self) -> WordCount32 {
        self.struct_data_size / BYTES_PER_WORD as u32
    }

    /// Pointer section size of each element read as a struct, in words.
    #[inline]
    pub fn struct_pointer_words(&self) -> WordCount32 {
        u32::from(self.struct_pointer_count)
    }

    #[inline]
    fn element_offset(&self, index: ElementCount32) -> isize {
        (u64::from(index) * u64::from(self.step) / BITS_PER_BYTE as u64) as isize
    }

    /// Element `index` viewed as a struct. Composite elements have no pointer
    /// word of their own, so the view is built straight from the list layout.
    pub fn get_struct_element(&self, index: ElementCount32) -> Result<StructReader<'a>> {
        if self.element_size == Bit {
            return Err(Error::from_kind(ErrorKind::UnsupportedElementType(Bit)));
        }
        let data = self.data.offset(self.element_offset(index));
        Ok(StructReader {
            data,
            pointers: data.offset(self.struct_data_size as isize),
            data_size: self.struct_data_size,
            pointer_count: self.struct_pointer_count,
        })
    }

    /// The pointer slot of element `index`.
    #[inline]
    pub fn get_pointer_element(&self, index: ElementCount32) -> Reference<'a> {
        self.data.offset(self.element_offset(index))
    }

    #[inline]
    pub fn get_primitive_element<T: Primitive>(&self, index: ElementCount32) -> Result<T> {
        T::read(self.data, self.element_offset(index) as usize)
    }

    #[inline]
    pub fn get_bool_element(&self, index: ElementCount32) -> Result<bool> {
        let bindex = u64::from(index) * u64::from(self.step);
        let byte = self.data.read_u8((bindex / BITS_PER_BYTE as u64) as usize)?;
        Ok((byte >> (bindex % BITS_PER_BYTE as u64)) & 1 != 0)
    }

    /// The raw element bytes of a list of bytes.
    pub fn as_bytes(&self) -> Result<&'a [u8]> {
        if self.element_size != Byte {
            return Err(Error::from_kind(ErrorKind::IncompatibleListElementSize {
                expected: Byte,
                found: self.element_size,
            }));
        }
        self.data.read_bytes(0, self.element_count as usize)
    }
}

fn check_list_bounds(start: Reference<'_>, byte_count: usize) -> Result<()> {
    match start.position().checked_add(byte_count) {
        Some(end) if end <= start.segment().size() => Ok(()),
        _ => Err(Error::from_kind(ErrorKind::ListContentOutOfBounds)),
    }
}

/// Reads the byte list at `reference` with its trailing NUL byte removed.
fn read_blob_pointer<'a>(reference: Reference<'a>) -> Result<Option<&'a [u8]>> {
    match ListReader::from_pointer(reference, None)? {
        None => Ok(None),
        Some(list) => {
            let bytes = list.as_bytes()?;
            Ok(Some(&bytes[..bytes.len().saturating_sub(1)]))
        }
    }
}

/// Reads the text at `reference`. Text is a byte list whose last byte is a
/// NUL terminator that is not part of the value.
pub fn read_text_pointer<'a>(reference: Reference<'a>) -> Result<Option<&'a str>> {
    match ListReader::from_pointer(reference, None)? {
        None => Ok(None),
        Some(list) => {
            let bytes = list.as_bytes()?;
            match bytes.split_last() {
                Some((0, text)) => Ok(Some(core::str::from_utf8(text)?)),
                _ => Err(Error::from_kind(ErrorKind::TextNotNulTerminated)),
            }
        }
    }
}

/// Reads the data blob at `reference`. Like text, the final byte of the list
/// is a terminator and is not part of the value.
pub fn read_data_pointer<'a>(reference: Reference<'a>) -> Result<Option<&'a [u8]>> {
    read_blob_pointer(reference)
}

/// Element types of primitive lists.
pub trait PrimitiveElement: Sized {
    fn get(list_reader: &ListReader<'_>, index: ElementCount32) -> Result<Self>;

    fn element_size() -> ElementSize;
}

macro_rules! primitive_element(
    ($typ:ty, $size:expr) => (
        impl PrimitiveElement for $typ {
            #[inline]
            fn get(list_reader: &ListReader<'_>, index: ElementCount32) -> Result<Self> {
                list_reader.get_primitive_element::<$typ>(index)
            }

            #[inline]
            fn element_size() -> ElementSize {
                $size
            }
        }
    )
);

primitive_element!(u8, Byte);
primitive_element!(i8, Byte);
primitive_element!(u16, TwoBytes);
primitive_element!(i16, TwoBytes);
primitive_element!(u32, FourBytes);
primitive_element!(i32, FourBytes);
primitive_element!(u64, EightBytes);
primitive_element!(i64, EightBytes);
primitive_element!(f32, FourBytes);
primitive_element!(f64, EightBytes);

impl PrimitiveElement for bool {
    #[inline]
    fn get(list: &ListReader<'_>, index: ElementCount32) -> Result<Self> {
        list.get_bool_element(index)
    }

    fn element_size() -> ElementSize {
        Bit
    }
}

impl PrimitiveElement for () {
    #[inline]
    fn get(_list: &ListReader<'_>, _index: ElementCount32) -> Result<()> {
        Ok(())
    }

    fn element_size() -> ElementSize {
        Void
    }
}
