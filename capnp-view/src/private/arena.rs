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

use crate::buffer::Buffer;
use crate::message::{ReaderOptions, ReaderSegments};
use crate::private::ReadLimiter;
use crate::{Error, ErrorKind, Result};

pub type SegmentId = u32;

/// The read side of a message: its segments plus traversal accounting.
///
/// Far pointers are resolved by looking up segments here, which is why every
/// [`Segment`](crate::Segment) carries a reference back to its arena.
pub trait ReaderArena: Sync {
    /// Returns the buffer backing segment `id`.
    fn get_segment(&self, id: SegmentId) -> Result<&dyn Buffer>;

    fn segment_count(&self) -> usize;

    /// Charges `words` against the traversal limit.
    fn read_words(&self, words: usize) -> Result<()>;

    /// Charges reads that cost nothing on the wire, such as elements of a
    /// list of zero-sized structs.
    fn amplified_read(&self, virtual_amount: u64) -> Result<()> {
        self.read_words(usize::try_from(virtual_amount).unwrap_or(usize::MAX))
    }
}

pub struct ReaderArenaImpl<S> {
    segments: S,
    read_limiter: ReadLimiter,
}

impl<S> ReaderArenaImpl<S>
where
    S: ReaderSegments,
{
    pub fn new(segments: S, options: ReaderOptions) -> Self {
        let limiter = ReadLimiter::new(options.traversal_limit_in_words);
        Self {
            segments,
            read_limiter: limiter,
        }
    }

    pub fn segments(&self) -> &S {
        &self.segments
    }

    pub fn into_segments(self) -> S {
        self.segments
    }
}

impl<S> ReaderArena for ReaderArenaImpl<S>
where
    S: ReaderSegments,
{
    fn get_segment(&self, id: SegmentId) -> Result<&dyn Buffer> {
        match self.segments.get_segment(id) {
            Some(seg) => Ok(seg),
            None => Err(Error::from_kind(ErrorKind::InvalidSegmentId(id))),
        }
    }

    fn segment_count(&self) -> usize {
        self.segments.len()
    }

    fn read_words(&self, words: usize) -> Result<()> {
        self.read_limiter.can_read(words)
    }
}

/// The arena behind the sentinel references. It has no segments.
pub struct NullArena;

impl ReaderArena for NullArena {
    fn get_segment(&self, _id: SegmentId) -> Result<&dyn Buffer> {
        Err(Error::from_kind(ErrorKind::TriedToReadFromNullArena))
    }

    fn segment_count(&self) -> usize {
        0
    }

    fn read_words(&self, _words: usize) -> Result<()> {
        Ok(())
    }
}
