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

//! Reading of messages using the
//! [standard stream framing](https://capnproto.org/encoding.html#serialization-over-a-stream).

use crate::buffer::Buffer;
use crate::message;
use crate::private::units::BYTES_PER_WORD;
use crate::{Error, ErrorKind, Result};

/// Segment tables declaring this many segments or more are rejected.
pub const SEGMENTS_COUNT_LIMIT: usize = 512;

/// Segments sliced out of a single stream-framed buffer.
pub struct StreamSegments<B> {
    segments: Vec<B>,
}

impl<B: Buffer> StreamSegments<B> {
    pub fn segments(&self) -> &[B] {
        &self.segments
    }
}

impl<B: Buffer> message::ReaderSegments for StreamSegments<B> {
    fn get_segment(&self, id: u32) -> Option<&dyn Buffer> {
        self.segments
            .get(id as usize)
            .map(|segment| segment as &dyn Buffer)
    }

    fn len(&self) -> usize {
        self.segments.len()
    }
}

/// Reads a stream-framed message out of `buffer`.
///
/// Bytes after the last segment are ignored. Each segment is a
/// [`slice`](Buffer::slice) of `buffer`.
pub fn read_message<B>(
    buffer: B,
    options: message::ReaderOptions,
) -> Result<message::Reader<StreamSegments<B>>>
where
    B: Buffer,
{
    let table = read_segment_table(&buffer, options)?;
    let body_start = table.header_words * BYTES_PER_WORD;
    let body_words = (buffer.size() - body_start) / BYTES_PER_WORD;
    if table.total_words > body_words {
        return Err(Error::from_kind(ErrorKind::MessageEndsPrematurely(
            table.total_words,
            body_words,
        )));
    }

    let segments = table
        .segment_slices
        .iter()
        .map(|&(start, end)| {
            buffer.slice(
                body_start + start * BYTES_PER_WORD,
                (end - start) * BYTES_PER_WORD,
            )
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(message::Reader::new(StreamSegments { segments }, options))
}

struct SegmentTable {
    /// Size of the table itself, padding included.
    header_words: usize,
    total_words: usize,
    /// Word ranges of each segment, relative to the end of the table.
    segment_slices: Vec<(usize, usize)>,
}

/// Parses the segment table at the start of `buffer`.
///
/// The segment table format for streams is defined in the Cap'n Proto
/// [encoding documentation](https://capnproto.org/encoding.html)
fn read_segment_table(
    buffer: &dyn Buffer,
    options: message::ReaderOptions,
) -> Result<SegmentTable> {
    let available_words = buffer.size() / BYTES_PER_WORD;
    if available_words == 0 {
        return Err(Error::from_kind(ErrorKind::MessageEndsPrematurely(1, 0)));
    }

    // The first word holds the segment count and the first segment's length.
    let segment_count = buffer.read_u32(0)?.wrapping_add(1) as usize;
    if segment_count >= SEGMENTS_COUNT_LIMIT || segment_count == 0 {
        return Err(Error::from_kind(ErrorKind::InvalidNumberOfSegments(
            segment_count,
        )));
    }

    // One u32 for the count, one per segment, padded out to a whole word.
    let header_words = segment_count / 2 + 1;
    if available_words < header_words {
        return Err(Error::from_kind(ErrorKind::MessageEndsPrematurely(
            header_words,
            available_words,
        )));
    }

    let mut segment_slices = Vec::with_capacity(segment_count);
    let mut total_words: usize = 0;
    for idx in 0..segment_count {
        let segment_len = buffer.read_u32(4 * (idx + 1))? as usize;
        let end = total_words
            .checked_add(segment_len)
            .ok_or_else(|| Error::from_kind(ErrorKind::MessageSizeOverflow))?;
        segment_slices.push((total_words, end));
        total_words = end;
    }

    // Don't accept a message which the receiver couldn't possibly traverse without hitting the
    // traversal limit.
    if let Some(limit) = options.traversal_limit_in_words {
        if total_words > limit {
            return Err(Error::from_kind(ErrorKind::MessageTooLarge(total_words)));
        }
    }

    tracing::debug!(segment_count, total_words, "parsed segment table");

    Ok(SegmentTable {
        header_words,
        total_words,
        segment_slices,
    })
}
