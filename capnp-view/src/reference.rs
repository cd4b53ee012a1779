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

//! Cursors into a message.
//!
//! All decoding is expressed in terms of a [`Reference`], a segment plus a
//! byte position in it, rather than raw offsets, so that jumping to another
//! segment through a far pointer looks the same to callers as a local read.

use crate::buffer::Buffer;
use crate::private::arena::{NullArena, ReaderArena};
use crate::{Error, ErrorKind, Result};

/// Segment id given to the sentinel references, which belong to no message.
const SENTINEL_SEGMENT_ID: u32 = u32::MAX;

const ZERO_WORD: &[u8] = &[0; 8];
const NO_BYTES: &[u8] = &[];

/// A bounded slice of a message, addressed by its id.
///
/// A `Segment` is a cheap handle: it borrows the segment's buffer and the
/// message it belongs to, which is what far pointers are resolved against.
#[derive(Clone, Copy)]
pub struct Segment<'a> {
    arena: &'a dyn ReaderArena,
    buffer: &'a dyn Buffer,
    id: u32,
}

impl<'a> Segment<'a> {
    /// Looks up segment `id` of the message behind `arena`.
    pub fn lookup(arena: &'a dyn ReaderArena, id: u32) -> Result<Self> {
        let buffer = arena.get_segment(id)?;
        Ok(Self { arena, buffer, id })
    }

    /// Another segment of the same message.
    #[inline]
    pub fn sibling(&self, id: u32) -> Result<Self> {
        Self::lookup(self.arena, id)
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Size in bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.buffer.size()
    }

    /// The message this segment belongs to.
    #[inline]
    pub fn message(&self) -> &'a dyn ReaderArena {
        self.arena
    }

    /// A reference to byte `position` of this segment.
    #[inline]
    pub fn at(&self, position: usize) -> Reference<'a> {
        Reference {
            segment: *self,
            position,
        }
    }

    /// Whether `self` and `other` are the same segment of the same message.
    pub fn same_segment(&self, other: &Segment<'_>) -> bool {
        let this = self.arena as *const dyn ReaderArena as *const ();
        let that = other.arena as *const dyn ReaderArena as *const ();
        this == that && self.id == other.id
    }

    #[inline]
    pub fn read_bytes(&self, offset: usize, length: usize) -> Result<&'a [u8]> {
        self.buffer.read_bytes(offset, length)
    }

    #[inline]
    pub fn read_string(&self, offset: usize, length: usize) -> Result<&'a str> {
        self.buffer.read_string(offset, length)
    }

    fn sentinel(buffer: &'static dyn Buffer) -> Segment<'static> {
        Segment {
            arena: &NullArena,
            buffer,
            id: SENTINEL_SEGMENT_ID,
        }
    }
}

macro_rules! forward_reads(
    ($($read:ident -> $typ:ty),*) => (
        $(
            #[inline]
            pub fn $read(&self, offset: usize) -> Result<$typ> {
                self.buffer.$read(offset)
            }
        )*
    )
);

impl<'a> Segment<'a> {
    forward_reads!(
        read_u8 -> u8, read_u16 -> u16, read_u32 -> u32, read_u64 -> u64,
        read_i8 -> i8, read_i16 -> i16, read_i32 -> i32, read_i64 -> i64,
        read_f32 -> f32, read_f64 -> f64
    );
}

impl<'a> core::fmt::Debug for Segment<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("Segment")
            .field("id", &self.id)
            .field("size", &self.size())
            .finish()
    }
}

/// A position within a segment.
///
/// Moving a reference with [`offset`](Reference::offset) never fails; bounds
/// are enforced when a read is attempted.
#[derive(Clone, Copy, Debug)]
pub struct Reference<'a> {
    segment: Segment<'a>,
    position: usize,
}

impl<'a> Reference<'a> {
    pub fn new(segment: Segment<'a>, position: usize) -> Self {
        Self { segment, position }
    }

    /// A zero-length region, used for absent struct sections.
    pub fn empty() -> Reference<'static> {
        Reference {
            segment: Segment::sentinel(&NO_BYTES),
            position: 0,
        }
    }

    /// A reference to an all-zero word: the decoding of a pointer slot that
    /// lies beyond a struct's pointer section.
    pub fn null_pointer() -> Reference<'static> {
        Reference {
            segment: Segment::sentinel(&ZERO_WORD),
            position: 0,
        }
    }

    #[inline]
    pub fn segment(&self) -> Segment<'a> {
        self.segment
    }

    /// Byte position within the segment.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Moves by `delta` bytes. A position that would go negative wraps around
    /// and fails on the next read.
    #[inline]
    pub fn offset(&self, delta: isize) -> Self {
        Self {
            segment: self.segment,
            position: self.position.wrapping_add_signed(delta),
        }
    }

    #[inline]
    fn absolute(&self, offset: usize) -> Result<usize> {
        self.position.checked_add(offset).ok_or_else(|| {
            Error::from_kind(ErrorKind::ReadOutOfBounds(usize::MAX, self.segment.size()))
        })
    }

    #[inline]
    pub fn read_bytes(&self, offset: usize, length: usize) -> Result<&'a [u8]> {
        self.segment.read_bytes(self.absolute(offset)?, length)
    }

    #[inline]
    pub fn read_string(&self, offset: usize, length: usize) -> Result<&'a str> {
        self.segment.read_string(self.absolute(offset)?, length)
    }
}

macro_rules! forward_reference_reads(
    ($($read:ident -> $typ:ty),*) => (
        $(
            #[inline]
            pub fn $read(&self, offset: usize) -> Result<$typ> {
                self.segment.$read(self.absolute(offset)?)
            }
        )*
    )
);

impl<'a> Reference<'a> {
    forward_reference_reads!(
        read_u8 -> u8, read_u16 -> u16, read_u32 -> u32, read_u64 -> u64,
        read_i8 -> i8, read_i16 -> i16, read_i32 -> i32, read_i64 -> i64,
        read_f32 -> f32, read_f64 -> f64
    );
}
