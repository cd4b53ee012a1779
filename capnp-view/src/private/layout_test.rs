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

use crate::message::{self, ReaderOptions, SegmentArray};
use crate::private::layout::{
    follow_fars, pointer_type, read_data_pointer, read_text_pointer, ElementSize, ListReader,
    PointerKind, PointerType, StructReader, WirePointer,
};
use crate::ErrorKind;

fn struct_pointer(offset: i32, data: u16, pointers: u16) -> u64 {
    u64::from((offset as u32) << 2) | u64::from(data) << 32 | u64::from(pointers) << 48
}

fn list_pointer(offset: i32, size: ElementSize, count: u32) -> u64 {
    u64::from((offset as u32) << 2 | 1) | u64::from(count << 3 | size as u32) << 32
}

fn far_pointer(double: bool, position: u32, segment: u32) -> u64 {
    u64::from(position << 3 | u32::from(double) << 2 | 2) | u64::from(segment) << 32
}

fn words(words: &[u64]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_le_bytes()).collect()
}

/// `words` followed by `bytes`, zero-padded to a whole word.
fn words_then_bytes(head: &[u64], bytes: &[u8]) -> Vec<u8> {
    let mut result = words(head);
    result.extend_from_slice(bytes);
    result.resize(result.len().div_ceil(8) * 8, 0);
    result
}

macro_rules! message {
    ($message:ident = [$($segment:expr),+]) => {
        let owned = [$($segment),+];
        let borrowed: Vec<&[u8]> = owned.iter().map(|s| &s[..]).collect();
        let $message = message::Reader::new(SegmentArray::new(&borrowed), ReaderOptions::new());
    };
}

#[test]
fn simple_raw_data_struct() {
    message!(message = [words(&[struct_pointer(0, 1, 0), 0xefcdab8967452301])]);
    let reader = StructReader::from_pointer(message.root().unwrap())
        .unwrap()
        .unwrap();

    assert_eq!(0xefcdab8967452301u64, reader.get_data_field::<u64>(0).unwrap());
    assert_eq!(0, reader.get_data_field::<u64>(8).unwrap()); // past end of struct --> default value

    assert_eq!(0x67452301u32, reader.get_data_field::<u32>(0).unwrap());
    assert_eq!(0xefcdab89u32, reader.get_data_field::<u32>(4).unwrap());
    assert_eq!(0, reader.get_data_field::<u32>(8).unwrap());

    assert_eq!(0x2301u16, reader.get_data_field::<u16>(0).unwrap());
    assert_eq!(0x6745u16, reader.get_data_field::<u16>(2).unwrap());
    assert_eq!(0xab89u16, reader.get_data_field::<u16>(4).unwrap());
    assert_eq!(0xefcdu16, reader.get_data_field::<u16>(6).unwrap());
    assert_eq!(0u16, reader.get_data_field::<u16>(8).unwrap());

    assert_eq!(0xefu8 as i8, reader.get_data_field::<i8>(7).unwrap());

    // Bits.
    assert!(reader.get_bool_field(0).unwrap());
    assert!(!reader.get_bool_field(1).unwrap());
    assert!(!reader.get_bool_field(7).unwrap());
    assert!(reader.get_bool_field(8).unwrap()); // 0x23
    assert!(reader.get_bool_field(9).unwrap());
    assert!(!reader.get_bool_field(10).unwrap());
    assert!(reader.get_bool_field(63).unwrap()); // 0xef
    assert!(!reader.get_bool_field(64).unwrap()); // past end of struct --> default value
    assert!(reader.get_bool_field_mask(64, true).unwrap());

    assert_eq!(reader.data_size(), 8);
    assert_eq!(reader.pointers_size(), 0);
    assert_eq!(reader.data_section().unwrap().len(), 8);
}

#[test]
fn data_fields_are_masked_with_defaults() {
    message!(message = [words(&[struct_pointer(0, 2, 0), 42, 0])]);
    let reader = StructReader::from_pointer(message.root().unwrap())
        .unwrap()
        .unwrap();

    assert_eq!(reader.get_data_field_mask::<u32>(0, 7).unwrap(), 42 ^ 7);
    assert_eq!(reader.get_data_field_mask::<i16>(8, -3).unwrap(), -3);
    // Absent fields read as the default.
    assert_eq!(reader.get_data_field_mask::<u32>(16, 7).unwrap(), 7);
    assert_eq!(reader.get_data_field_mask::<u64>(16, 0).unwrap(), 0);

    let default = 2.5f64;
    assert_eq!(
        reader
            .get_data_field_mask::<f64>(8, default.to_bits())
            .unwrap(),
        default
    );
    assert_eq!(
        reader.get_data_field_mask::<f32>(64, 1.0f32.to_bits()).unwrap(),
        1.0
    );
}

#[test]
fn struct_pointer_section() {
    message!(
        message = [words(&[
            struct_pointer(0, 1, 2),
            5,
            struct_pointer(1, 1, 0),
            0,
            77,
        ])]
    );
    let root = StructReader::from_pointer(message.root().unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(root.pointer_count(), 2);
    assert_eq!(root.pointers_size(), 16);
    assert_eq!(root.pointers().position(), root.data().position() + 8);

    let child = StructReader::from_pointer(root.get_pointer_field(0))
        .unwrap()
        .unwrap();
    assert_eq!(child.get_data_field::<u64>(0).unwrap(), 77);

    assert!(StructReader::from_pointer(root.get_pointer_field(1))
        .unwrap()
        .is_none());

    // Beyond the pointer section.
    let missing = root.get_pointer_field(2);
    assert_eq!(missing.read_u64(0).unwrap(), 0);
    assert!(StructReader::from_pointer(missing).unwrap().is_none());
}

#[test]
fn empty_struct_is_not_null() {
    message!(message = [words(&[struct_pointer(-1, 0, 0)])]);
    let root = message.root().unwrap();
    assert_eq!(WirePointer::read(root).unwrap().raw(), 0xffff_fffc);
    assert_eq!(
        StructReader::decode_pointer(root).unwrap(),
        (-1, crate::private::layout::StructSize { data: 0, pointers: 0 })
    );

    let reader = StructReader::from_pointer(root).unwrap().unwrap();
    assert_eq!(reader.data_size(), 0);
    assert_eq!(reader.pointer_count(), 0);
    assert_eq!(reader.get_data_field_mask::<u16>(0, 9).unwrap(), 9);
}

#[test]
fn null_pointer_is_absent() {
    message!(message = [words(&[0])]);
    let root = message.root().unwrap();
    assert!(StructReader::from_pointer(root).unwrap().is_none());
    assert!(ListReader::from_pointer(root, None).unwrap().is_none());
    assert!(read_text_pointer(root).unwrap().is_none());
    assert_eq!(pointer_type(root).unwrap(), PointerType::Null);
}

#[test]
fn wrong_pointer_kind() {
    message!(
        message = [
            words(&[list_pointer(0, ElementSize::Byte, 0)]),
            words(&[struct_pointer(0, 1, 0), 0])
        ]
    );
    let list = message.root().unwrap();
    assert_eq!(
        StructReader::from_pointer(list).unwrap_err().kind,
        ErrorKind::WrongPointerKind {
            expected: PointerKind::Struct,
            found: PointerKind::List,
        }
    );

    let strukt = message.segment(1).unwrap().at(0);
    assert_eq!(
        ListReader::from_pointer(strukt, None).unwrap_err().kind,
        ErrorKind::WrongPointerKind {
            expected: PointerKind::List,
            found: PointerKind::Struct,
        }
    );

    message!(other = [words(&[3])]);
    assert_eq!(
        pointer_type(other.root().unwrap()).unwrap(),
        PointerType::Other
    );
    assert_eq!(
        StructReader::from_pointer(other.root().unwrap()).unwrap_err().kind,
        ErrorKind::WrongPointerKind {
            expected: PointerKind::Struct,
            found: PointerKind::Other,
        }
    );
}

#[test]
fn struct_content_out_of_bounds() {
    message!(message = [words(&[struct_pointer(0, 2, 0), 1])]);
    assert_eq!(
        StructReader::from_pointer(message.root().unwrap())
            .unwrap_err()
            .kind,
        ErrorKind::BufferTooSmallForStructContent
    );

    message!(backwards = [words(&[0, struct_pointer(-3, 1, 0)])]);
    let pointer = backwards.segment(0).unwrap().at(8);
    assert_eq!(
        StructReader::from_pointer(pointer).unwrap_err().kind,
        ErrorKind::BufferTooSmallForStructContent
    );
}

#[test]
fn struct_content_overlapping_its_pointer() {
    message!(message = [words(&[struct_pointer(-1, 1, 0)])]);
    assert_eq!(
        StructReader::from_pointer(message.root().unwrap())
            .unwrap_err()
            .kind,
        ErrorKind::StructContentOverlapsPointer
    );

    message!(pointers = [words(&[0, struct_pointer(-2, 1, 1)])]);
    assert_eq!(
        StructReader::from_pointer(pointers.segment(0).unwrap().at(8))
            .unwrap_err()
            .kind,
        ErrorKind::StructContentOverlapsPointer
    );
}

#[test]
fn single_far_pointer() {
    message!(
        message = [
            words(&[far_pointer(false, 1, 1)]),
            words(&[0, struct_pointer(0, 1, 0), 99])
        ]
    );
    let root = message.root().unwrap();
    let (pointer, content) = follow_fars(root).unwrap();
    assert_eq!(pointer.segment().id(), 1);
    assert_eq!(pointer.position(), 8);
    assert!(content.is_none());

    let reader = StructReader::from_pointer(root).unwrap().unwrap();
    assert_eq!(reader.data().segment().id(), 1);
    assert_eq!(reader.get_data_field::<u64>(0).unwrap(), 99);
}

#[test]
fn near_pointers_resolve_to_themselves() {
    message!(message = [words(&[0, struct_pointer(0, 1, 0), 7])]);
    let slot = message.root().unwrap().offset(8);
    let (pointer, content) = follow_fars(slot).unwrap();
    assert!(pointer.segment().same_segment(&slot.segment()));
    assert_eq!(pointer.position(), slot.position());
    assert!(content.is_none());

    let (again, content) = follow_fars(pointer).unwrap();
    assert_eq!(again.position(), 8);
    assert!(content.is_none());
}

#[test]
fn far_pointer_landing_on_a_far_pointer() {
    message!(
        message = [
            words(&[far_pointer(false, 0, 1)]),
            words(&[far_pointer(false, 0, 0)])
        ]
    );
    assert_eq!(
        pointer_type(message.root().unwrap()).unwrap_err().kind,
        ErrorKind::FarPointerToFarPointer
    );
}

#[test]
fn double_far_pointer() {
    message!(
        message = [
            words(&[far_pointer(true, 0, 1)]),
            words(&[far_pointer(false, 0, 2), struct_pointer(0, 1, 1)]),
            words(&[1234, 0])
        ]
    );
    let root = message.root().unwrap();
    let (pointer, content) = message.resolve_far_pointer(root).unwrap();
    assert_eq!((pointer.segment().id(), pointer.position()), (1, 8));
    let content = content.unwrap();
    assert_eq!((content.segment().id(), content.position()), (2, 0));

    let reader = StructReader::from_pointer(root).unwrap().unwrap();
    assert_eq!(reader.data().segment().id(), 2);
    assert_eq!(reader.pointers().position(), 8);
    assert_eq!(reader.get_data_field::<u64>(0).unwrap(), 1234);
    assert!(StructReader::from_pointer(reader.get_pointer_field(0))
        .unwrap()
        .is_none());
}

#[test]
fn far_pointer_to_a_list() {
    message!(
        message = [
            words(&[far_pointer(false, 0, 1)]),
            words_then_bytes(&[list_pointer(0, ElementSize::Byte, 3)], b"ab\0")
        ]
    );
    assert_eq!(
        read_text_pointer(message.root().unwrap()).unwrap(),
        Some("ab")
    );
}

#[test]
fn invalid_far_pointers() {
    message!(unknown = [words(&[far_pointer(false, 0, 7)])]);
    assert_eq!(
        follow_fars(unknown.root().unwrap()).unwrap_err().kind,
        ErrorKind::InvalidSegmentId(7)
    );

    message!(past_end = [words(&[far_pointer(false, 1, 1)]), words(&[0])]);
    assert_eq!(
        follow_fars(past_end.root().unwrap()).unwrap_err().kind,
        ErrorKind::InvalidFarPointerOffset
    );

    // A double far landing pad needs room for two words.
    message!(
        short_pad = [
            words(&[far_pointer(true, 0, 1)]),
            words(&[far_pointer(false, 0, 0)])
        ]
    );
    assert_eq!(
        follow_fars(short_pad.root().unwrap()).unwrap_err().kind,
        ErrorKind::InvalidFarPointerOffset
    );

    message!(
        not_far = [
            words(&[far_pointer(true, 0, 1)]),
            words(&[struct_pointer(0, 0, 0), struct_pointer(0, 1, 0)])
        ]
    );
    assert_eq!(
        follow_fars(not_far.root().unwrap()).unwrap_err().kind,
        ErrorKind::DoubleFarPointerLandingPadNotFar
    );

    message!(
        double_double = [
            words(&[far_pointer(true, 0, 1)]),
            words(&[far_pointer(true, 0, 0), struct_pointer(0, 1, 0)])
        ]
    );
    assert_eq!(
        follow_fars(double_double.root().unwrap()).unwrap_err().kind,
        ErrorKind::DoubleFarPointerToDoubleFar
    );
}

#[test]
fn primitive_lists() {
    message!(
        message = [words(&[
            list_pointer(0, ElementSize::FourBytes, 3),
            7 | 9 << 32,
            11,
        ])]
    );
    let root = message.root().unwrap();
    let list = ListReader::from_pointer(root, Some(ElementSize::FourBytes))
        .unwrap()
        .unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list.element_size(), ElementSize::FourBytes);
    assert_eq!(list.element_byte_size(), 4);
    assert_eq!(list.get_primitive_element::<u32>(0).unwrap(), 7);
    assert_eq!(list.get_primitive_element::<u32>(1).unwrap(), 9);
    assert_eq!(list.get_primitive_element::<i32>(2).unwrap(), 11);

    // Narrower reads are fine, wider ones are not.
    assert!(ListReader::from_pointer(root, Some(ElementSize::TwoBytes)).is_ok());
    assert_eq!(
        ListReader::from_pointer(root, Some(ElementSize::EightBytes))
            .unwrap_err()
            .kind,
        ErrorKind::IncompatibleListElementSize {
            expected: ElementSize::EightBytes,
            found: ElementSize::FourBytes,
        }
    );
    assert!(ListReader::from_pointer(root, Some(ElementSize::Pointer)).is_err());

    // Each element can be viewed as a struct holding it.
    let upgraded = ListReader::from_pointer(root, Some(ElementSize::InlineComposite))
        .unwrap()
        .unwrap();
    let element = upgraded.get_struct_element(1).unwrap();
    assert_eq!(element.data_size(), 4);
    assert_eq!(element.pointer_count(), 0);
    assert_eq!(element.get_data_field::<u32>(0).unwrap(), 9);
    assert_eq!(element.get_data_field::<u64>(0).unwrap(), 0);
}

#[test]
fn bit_lists() {
    message!(message = [words(&[list_pointer(0, ElementSize::Bit, 10), 0b10_0000_0101])]);
    let root = message.root().unwrap();
    let list = ListReader::from_pointer(root, Some(ElementSize::Bit))
        .unwrap()
        .unwrap();
    assert_eq!(list.len(), 10);
    assert!(list.get_bool_element(0).unwrap());
    assert!(!list.get_bool_element(1).unwrap());
    assert!(list.get_bool_element(2).unwrap());
    assert!(!list.get_bool_element(8).unwrap());
    assert!(list.get_bool_element(9).unwrap());
    assert_eq!(
        list.get_struct_element(0).unwrap_err().kind,
        ErrorKind::UnsupportedElementType(ElementSize::Bit)
    );

    for expected in [ElementSize::Byte, ElementSize::InlineComposite, ElementSize::Pointer] {
        assert_eq!(
            ListReader::from_pointer(root, Some(expected))
                .unwrap_err()
                .kind,
            ErrorKind::IncompatibleListElementSize {
                expected,
                found: ElementSize::Bit,
            }
        );
    }
}

#[test]
fn composite_lists() {
    message!(
        message = [words(&[
            list_pointer(0, ElementSize::InlineComposite, 6),
            struct_pointer(3, 1, 1),
            0,
            0,
            10,
            0,
            20,
            struct_pointer(-7, 1, 0),
        ])]
    );
    let root = message.root().unwrap();
    let list = ListReader::from_pointer(root, None).unwrap().unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list.element_size(), ElementSize::InlineComposite);
    assert_eq!(list.element_byte_size(), 16);
    assert_eq!(list.struct_data_words(), 1);
    assert_eq!(list.struct_pointer_words(), 1);
    assert_eq!(list.data().position(), 16);

    for (index, value) in [0u64, 10, 20].into_iter().enumerate() {
        let element = list.get_struct_element(index as u32).unwrap();
        assert_eq!(element.data().position(), 16 + index * 16);
        assert_eq!(element.get_data_field::<u64>(0).unwrap(), value);
    }

    // The first field of each element, read as a primitive list.
    let as_u64 = ListReader::from_pointer(root, Some(ElementSize::EightBytes))
        .unwrap()
        .unwrap();
    assert_eq!(as_u64.get_primitive_element::<u64>(2).unwrap(), 20);

    // The first pointer of each element, read as a pointer list.
    let as_pointers = ListReader::from_pointer(root, Some(ElementSize::Pointer))
        .unwrap()
        .unwrap();
    assert_eq!(as_pointers.get_pointer_element(0).position(), 24);
    let last = as_pointers.get_pointer_element(2);
    assert_eq!(
        StructReader::decode_pointer(last).unwrap().0,
        -7
    );
}

#[test]
fn composite_list_bounds() {
    message!(
        overrun = [words(&[
            list_pointer(0, ElementSize::InlineComposite, 2),
            struct_pointer(3, 1, 0),
            0,
            0,
        ])]
    );
    assert_eq!(
        ListReader::from_pointer(overrun.root().unwrap(), None)
            .unwrap_err()
            .kind,
        ErrorKind::InlineCompositeListOverrun
    );

    message!(
        truncated = [words(&[
            list_pointer(0, ElementSize::InlineComposite, 6),
            struct_pointer(3, 1, 1),
            0,
        ])]
    );
    assert_eq!(
        ListReader::from_pointer(truncated.root().unwrap(), None)
            .unwrap_err()
            .kind,
        ErrorKind::ListContentOutOfBounds
    );

    message!(
        no_data = [words(&[
            list_pointer(0, ElementSize::InlineComposite, 0),
            struct_pointer(1, 0, 0),
        ])]
    );
    assert_eq!(
        ListReader::from_pointer(no_data.root().unwrap(), Some(ElementSize::Byte))
            .unwrap_err()
            .kind,
        ErrorKind::IncompatibleListElementSize {
            expected: ElementSize::Byte,
            found: ElementSize::InlineComposite,
        }
    );
}

#[test]
fn list_content_out_of_bounds() {
    message!(message = [words(&[list_pointer(0, ElementSize::Byte, 100), 0])]);
    assert_eq!(
        ListReader::from_pointer(message.root().unwrap(), None)
            .unwrap_err()
            .kind,
        ErrorKind::ListContentOutOfBounds
    );
}

#[test]
fn text_and_data() {
    message!(
        message = [
            words_then_bytes(&[list_pointer(0, ElementSize::Byte, 6)], b"hello\0"),
            words_then_bytes(&[list_pointer(0, ElementSize::Byte, 5)], b"hello"),
            words_then_bytes(&[list_pointer(0, ElementSize::Byte, 3)], b"\xff\xfe\0"),
            words(&[list_pointer(0, ElementSize::Byte, 0)]),
            words(&[list_pointer(0, ElementSize::TwoBytes, 1), 0])
        ]
    );
    let at = |id| message.segment(id).unwrap().at(0);

    assert_eq!(read_text_pointer(at(0)).unwrap(), Some("hello"));
    assert_eq!(read_data_pointer(at(0)).unwrap(), Some(&b"hello"[..]));

    assert_eq!(
        read_text_pointer(at(1)).unwrap_err().kind,
        ErrorKind::TextNotNulTerminated
    );
    assert_eq!(read_data_pointer(at(1)).unwrap(), Some(&b"hell"[..]));

    assert!(matches!(
        read_text_pointer(at(2)).unwrap_err().kind,
        ErrorKind::TextContainsNonUtf8Data(_)
    ));
    assert_eq!(read_data_pointer(at(2)).unwrap(), Some(&b"\xff\xfe"[..]));

    assert_eq!(
        read_text_pointer(at(3)).unwrap_err().kind,
        ErrorKind::TextNotNulTerminated
    );
    assert_eq!(read_data_pointer(at(3)).unwrap(), Some(&b""[..]));

    assert_eq!(
        read_text_pointer(at(4)).unwrap_err().kind,
        ErrorKind::IncompatibleListElementSize {
            expected: ElementSize::Byte,
            found: ElementSize::TwoBytes,
        }
    );
}

#[test]
fn traversal_limit() {
    let segment = words(&[struct_pointer(0, 2, 0), 1, 2]);
    let segments = [&segment[..]];
    let mut options = ReaderOptions::new();
    options.traversal_limit_in_words(Some(5));
    let message = message::Reader::new(SegmentArray::new(&segments), options);
    let root = message.root().unwrap();

    StructReader::from_pointer(root).unwrap();
    StructReader::from_pointer(root).unwrap();
    assert_eq!(
        StructReader::from_pointer(root).unwrap_err().kind,
        ErrorKind::ReadLimitExceeded
    );
}

#[test]
fn void_lists_count_against_the_limit() {
    let segment = words(&[list_pointer(0, ElementSize::Void, 1000)]);
    let segments = [&segment[..]];
    let mut options = ReaderOptions::new();
    options.traversal_limit_in_words(Some(999));
    let message = message::Reader::new(SegmentArray::new(&segments), options);

    assert_eq!(
        ListReader::from_pointer(message.root().unwrap(), None)
            .unwrap_err()
            .kind,
        ErrorKind::ReadLimitExceeded
    );

    let mut options = ReaderOptions::new();
    options.traversal_limit_in_words(Some(1000));
    let message = message::Reader::new(SegmentArray::new(&segments), options);
    let list = ListReader::from_pointer(message.root().unwrap(), None)
        .unwrap()
        .unwrap();
    assert_eq!(list.len(), 1000);
    assert_eq!(list.element_byte_size(), 0);
}
