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

//! # Cap'n Proto Wire Format Reader
//!
//! A zero-copy reader for the [Cap'n Proto](https://capnproto.org) wire
//! format. Messages are immutable byte buffers divided into segments. Structs
//! and lists are located by interpreting pointer words in place; nothing is
//! parsed into an intermediate tree and no content bytes are copied.
//!
//! The entry points are [`message::Reader`], built either over a single flat
//! buffer ([`message::FlatSegments`]) or over the standard stream framing
//! ([`serialize::read_message`]), and the typed views in [`struct_list`],
//! [`primitive_list`], [`text`], [`data`] and friends, which is what
//! generated accessor code is written against.
//!
//! Building new messages, packing, and capabilities are not supported.

pub mod any_pointer;
pub mod buffer;
pub mod data;
pub mod data_list;
pub mod enum_list;
pub mod list_list;
pub mod message;
pub mod primitive_list;
pub mod reference;
pub mod serialize;
pub mod struct_list;
pub mod text;
pub mod text_list;
pub mod traits;

#[doc(hidden)]
pub mod private;

pub use crate::buffer::Buffer;
pub use crate::reference::{Reference, Segment};

pub use crate::private::layout::{ElementSize, PointerKind};

/// Because messages are lazily validated, the return type of any method that reads a pointer field
/// must be wrapped in a Result.
pub type Result<T> = ::core::result::Result<T, Error>;

/// Describes an arbitrary error that prevented decoding from succeeding.
#[derive(Debug, Clone)]
pub struct Error {
    /// The general kind of the error. Code that decides how to respond to an error
    /// should read only this field in making its decision.
    pub kind: ErrorKind,

    /// Extra context about error
    pub extra: String,
}

/// The general nature of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Something went wrong
    Failed,

    /// Read ending at byte {0} is past the end of a buffer of {1} bytes.
    ReadOutOfBounds(usize, usize),

    /// Pointer has wrong type.
    WrongPointerKind {
        expected: PointerKind,
        found: PointerKind,
    },

    /// Unknown segment id {0}.
    InvalidSegmentId(u32),

    /// Far pointer target lies outside of its segment.
    InvalidFarPointerOffset,

    /// First word of double far pointer is not a far pointer.
    DoubleFarPointerLandingPadNotFar,

    /// Double far pointer pointing to another double far pointer.
    DoubleFarPointerToDoubleFar,

    /// Far pointer landing pad is itself a far pointer.
    FarPointerToFarPointer,

    /// Buffer too small for struct content.
    BufferTooSmallForStructContent,

    /// Struct content overlaps pointer.
    StructContentOverlapsPointer,

    /// List content extends past the end of its segment.
    ListContentOutOfBounds,

    /// Inline composite list's elements overrun its word count.
    InlineCompositeListOverrun,

    /// Element type {0:?} is not supported for this kind of access.
    UnsupportedElementType(ElementSize),

    /// List element size {found:?} is incompatible with expected {expected:?}.
    IncompatibleListElementSize {
        expected: ElementSize,
        found: ElementSize,
    },

    /// Text is not NUL-terminated.
    TextNotNulTerminated,

    /// Text contains non-utf8 data.
    TextContainsNonUtf8Data(core::str::Utf8Error),

    /// Invalid number of segments: {0}
    InvalidNumberOfSegments(usize),

    /// Message ends prematurely. Header claimed {0} words, but message only has {1} words.
    MessageEndsPrematurely(usize, usize),

    /// Message is too large: {0} words.
    MessageTooLarge(usize),

    /// Message size overflows usize.
    MessageSizeOverflow,

    /// Read limit exceeded.
    ReadLimitExceeded,

    /// Tried to read from null arena.
    TriedToReadFromNullArena,
}

impl Error {
    /// Writes to the `extra` field. Does not modify `kind`.
    pub fn extra(&mut self, message: String) {
        self.extra = message;
    }

    /// Constructs a new `Error` with the given kind and no extra context.
    pub fn from_kind(kind: ErrorKind) -> Self {
        Self {
            kind,
            extra: String::new(),
        }
    }

    /// Constructs a generic `Failed` error with the given description.
    pub fn failed(description: String) -> Self {
        Self {
            kind: ErrorKind::Failed,
            extra: description,
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::result::Result<(), core::fmt::Error> {
        match self {
            Self::Failed => write!(fmt, "Failed"),
            Self::ReadOutOfBounds(end, size) => write!(
                fmt,
                "Read ending at byte {end} is out of bounds for a buffer of {size} bytes"
            ),
            Self::WrongPointerKind { expected, found } => write!(
                fmt,
                "pointer has wrong type: expected {expected:?}, found {found:?}"
            ),
            Self::InvalidSegmentId(id) => write!(fmt, "unknown segment id {id}"),
            Self::InvalidFarPointerOffset => write!(fmt, "invalid offset"),
            Self::DoubleFarPointerLandingPadNotFar => write!(
                fmt,
                "first word of double far pointer is not a far pointer"
            ),
            Self::DoubleFarPointerToDoubleFar => write!(
                fmt,
                "double far pointer pointing to another double far pointer"
            ),
            Self::FarPointerToFarPointer => {
                write!(fmt, "far pointer landing pad is itself a far pointer")
            }
            Self::BufferTooSmallForStructContent => {
                write!(fmt, "buffer too small for struct content")
            }
            Self::StructContentOverlapsPointer => write!(fmt, "struct content overlaps pointer"),
            Self::ListContentOutOfBounds => {
                write!(fmt, "list content extends past the end of its segment")
            }
            Self::InlineCompositeListOverrun => write!(
                fmt,
                "InlineComposite list's elements overrun its word count."
            ),
            Self::UnsupportedElementType(size) => {
                write!(fmt, "Element type {size:?} is not supported for this access")
            }
            Self::IncompatibleListElementSize { expected, found } => write!(
                fmt,
                "Message contains list with incompatible element type: expected {expected:?}, found {found:?}"
            ),
            Self::TextNotNulTerminated => write!(fmt, "Message contains text that is not NUL-terminated"),
            Self::TextContainsNonUtf8Data(e) => write!(fmt, "Text contains non-utf8 data: {e:?}"),
            Self::InvalidNumberOfSegments(count) => {
                write!(fmt, "Invalid number of segments: {count}")
            }
            Self::MessageEndsPrematurely(header, body) => write!(
                fmt,
                "Message ends prematurely. Header claimed {header} words, but message only has {body} words"
            ),
            Self::MessageTooLarge(words) => write!(
                fmt,
                "Message has {words} words, which is too large. To increase the limit on the receiving end, see capnp_view::message::ReaderOptions."
            ),
            Self::MessageSizeOverflow => write!(fmt, "Message size overflows usize"),
            Self::ReadLimitExceeded => write!(fmt, "read limit exceeded"),
            Self::TriedToReadFromNullArena => write!(fmt, "Tried to read from null arena"),
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::result::Result<(), core::fmt::Error> {
        if self.extra.is_empty() {
            write!(fmt, "{}", self.kind)
        } else {
            write!(fmt, "{}: {}", self.kind, self.extra)
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::failed(format!("{err}"))
    }
}

impl From<core::str::Utf8Error> for Error {
    fn from(err: core::str::Utf8Error) -> Self {
        Self::from_kind(ErrorKind::TextContainsNonUtf8Data(err))
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::from_kind(kind)
    }
}

/// Error type returned when a schema enum discriminant is read that is not
/// listed in the schema the reader was generated from.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct NotInSchema(pub u16);

impl ::core::fmt::Display for NotInSchema {
    fn fmt(
        &self,
        fmt: &mut ::core::fmt::Formatter,
    ) -> ::core::result::Result<(), ::core::fmt::Error> {
        write!(
            fmt,
            "Enum value or union discriminant {} was not present in the schema.",
            self.0
        )
    }
}

impl std::error::Error for NotInSchema {}

impl From<NotInSchema> for Error {
    fn from(e: NotInSchema) -> Self {
        Self::failed(format!("Enum value or union discriminant {} was not present in schema.", e.0))
    }
}
