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

//! Messages and the options they are read with.

use crate::any_pointer;
use crate::buffer::Buffer;
use crate::private::arena::{ReaderArena, ReaderArenaImpl};
use crate::private::layout;
use crate::private::units::BYTES_PER_WORD;
use crate::reference::{Reference, Segment};
use crate::traits::FromPointerReader;
use crate::Result;

/// Options controlling how data is read.
#[derive(Clone, Copy, Debug)]
pub struct ReaderOptions {
    /// Limits how many total words of data are allowed to be traversed. Traversal is counted when
    /// a struct or list is resolved from a pointer, so resolving the same pointer twice counts
    /// twice. Once the limit is reached, an error is reported.
    ///
    /// An attacker can construct a message in which many pointers point at the same location,
    /// making a message that is small on the wire appear much larger when traversed. Set this to
    /// something much larger than the messages you expect. `None` disables the limit.
    pub traversal_limit_in_words: Option<usize>,
}

pub const DEFAULT_READER_OPTIONS: ReaderOptions = ReaderOptions {
    traversal_limit_in_words: Some(8 * 1024 * 1024),
};

impl Default for ReaderOptions {
    fn default() -> Self {
        DEFAULT_READER_OPTIONS
    }
}

impl ReaderOptions {
    pub fn new() -> Self {
        DEFAULT_READER_OPTIONS
    }

    pub fn traversal_limit_in_words(&mut self, value: Option<usize>) -> &mut Self {
        self.traversal_limit_in_words = value;
        self
    }
}

/// An object that owns the buffers underlying a message.
pub trait ReaderSegments: Sync {
    /// Gets the segment with index `idx`. Returns `None` if `idx` is out of range.
    fn get_segment(&self, idx: u32) -> Option<&dyn Buffer>;

    /// Gets the number of segments.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Segments that were split up ahead of time by the caller.
pub struct SegmentArray<'a> {
    segments: &'a [&'a [u8]],
}

impl<'a> SegmentArray<'a> {
    pub fn new(segments: &'a [&'a [u8]]) -> Self {
        Self { segments }
    }
}

impl<'b> ReaderSegments for SegmentArray<'b> {
    fn get_segment(&self, id: u32) -> Option<&dyn Buffer> {
        self.segments
            .get(id as usize)
            .map(|segment| segment as &dyn Buffer)
    }

    fn len(&self) -> usize {
        self.segments.len()
    }
}

/// A single buffer with no segment table: segment 0 is the whole buffer.
pub struct FlatSegments<B> {
    buffer: B,
}

impl<B: Buffer> FlatSegments<B> {
    pub fn new(buffer: B) -> Self {
        Self { buffer }
    }

    pub fn into_inner(self) -> B {
        self.buffer
    }
}

impl<B: Buffer> ReaderSegments for FlatSegments<B> {
    fn get_segment(&self, id: u32) -> Option<&dyn Buffer> {
        if id == 0 {
            Some(&self.buffer)
        } else {
            None
        }
    }

    fn len(&self) -> usize {
        1
    }
}

/// A container used to read a message.
///
/// The root pointer of a message is the first word of segment 0.
pub struct Reader<S>
where
    S: ReaderSegments,
{
    arena: ReaderArenaImpl<S>,
}

/// A message over one buffer with no segment table.
pub type FlatMessage<B> = Reader<FlatSegments<B>>;

/// A message parsed from the standard stream framing.
pub type StreamMessage<B> = Reader<crate::serialize::StreamSegments<B>>;

impl<S> Reader<S>
where
    S: ReaderSegments,
{
    pub fn new(segments: S, options: ReaderOptions) -> Self {
        Self {
            arena: ReaderArenaImpl::new(segments, options),
        }
    }

    /// Looks up segment `id`, failing with [`InvalidSegmentId`](crate::ErrorKind::InvalidSegmentId)
    /// if there is no such segment.
    pub fn segment(&self, id: u32) -> Result<Segment<'_>> {
        Segment::lookup(&self.arena, id)
    }

    pub fn segment_count(&self) -> usize {
        self.arena.segment_count()
    }

    /// A reference to the root pointer.
    pub fn root(&self) -> Result<Reference<'_>> {
        Ok(self.segment(0)?.at(0))
    }

    /// Follows the far pointer at `reference`, if it is one.
    ///
    /// Returns where the actual struct or list pointer word lives and, when a
    /// double far pointer placed the content elsewhere, where the content starts.
    pub fn resolve_far_pointer<'a>(
        &'a self,
        reference: Reference<'a>,
    ) -> Result<(Reference<'a>, Option<Reference<'a>>)> {
        layout::follow_fars(reference)
    }

    pub fn get_root_as_any(&self) -> Result<any_pointer::Reader<'_>> {
        Ok(any_pointer::Reader::new(self.root()?))
    }

    /// Gets the root of the message, interpreting it as the given type. A null
    /// root pointer gives `None`.
    pub fn get_root<'a, T: FromPointerReader<'a>>(&'a self) -> Result<Option<T>> {
        self.get_root_as_any()?.get_as()
    }

    /// Total size of all segments, in words.
    pub fn size_in_words(&self) -> usize {
        let segments = self.arena.segments();
        (0..segments.len() as u32)
            .filter_map(|id| segments.get_segment(id))
            .map(|segment| segment.size() / BYTES_PER_WORD)
            .sum()
    }

    pub fn into_segments(self) -> S {
        self.arena.into_segments()
    }
}

impl<B: Buffer> Reader<FlatSegments<B>> {
    /// Reads `buffer` as a single segment.
    pub fn flat(buffer: B, options: ReaderOptions) -> Self {
        Self::new(FlatSegments::new(buffer), options)
    }
}

#[cfg(test)]
mod tests {
    use super::{FlatMessage, Reader, ReaderOptions, ReaderSegments, SegmentArray};
    use crate::buffer::ByteBuffer;
    use crate::ErrorKind;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn readers_are_thread_safe() {
        assert_send_sync::<FlatMessage<ByteBuffer>>();
        assert_send_sync::<crate::Reference<'static>>();
        assert_send_sync::<crate::private::layout::StructReader<'static>>();
        assert_send_sync::<crate::private::layout::ListReader<'static>>();
    }

    #[test]
    fn options() {
        let mut options = ReaderOptions::new();
        assert_eq!(options.traversal_limit_in_words, Some(8 * 1024 * 1024));
        options.traversal_limit_in_words(None);
        assert_eq!(options.traversal_limit_in_words, None);
    }

    #[test]
    fn flat_message_has_one_segment() {
        let bytes = ByteBuffer::new(vec![0; 24]);
        let message = Reader::flat(bytes, ReaderOptions::new());
        assert_eq!(message.segment_count(), 1);
        assert_eq!(message.size_in_words(), 3);
        assert_eq!(message.segment(0).unwrap().size(), 24);
        assert_eq!(
            message.segment(1).unwrap_err().kind,
            ErrorKind::InvalidSegmentId(1)
        );

        let root = message.root().unwrap();
        assert_eq!(root.position(), 0);
        assert_eq!(root.segment().id(), 0);
    }

    #[test]
    fn empty_segment_array() {
        let segments: [&[u8]; 0] = [];
        let message = Reader::new(SegmentArray::new(&segments), ReaderOptions::new());
        assert_eq!(message.segment_count(), 0);
        assert_eq!(message.root().unwrap_err().kind, ErrorKind::InvalidSegmentId(0));
    }

    #[test]
    fn null_root() {
        let segment: &[u8] = &[0; 8];
        let segments = [segment];
        let message = Reader::new(SegmentArray::new(&segments), ReaderOptions::new());
        assert!(message.get_root_as_any().unwrap().is_null().unwrap());
        let root: Option<crate::text::Reader<'_>> = message.get_root().unwrap();
        assert!(root.is_none());
        assert_eq!(message.into_segments().len(), 1);
    }
}
