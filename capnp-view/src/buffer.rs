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

//! Raw byte access underneath every segment.
//!
//! A [`Buffer`] is an immutable, contiguous run of bytes with bounds-checked
//! little-endian reads. Every read of `n` bytes at `offset` fails with
//! [`ErrorKind::ReadOutOfBounds`] unless `offset + n <= size()`.

use std::sync::Arc;

use byteorder::{ByteOrder, LittleEndian};

use crate::{Error, ErrorKind, Result};

#[inline]
fn check_range(offset: usize, length: usize, size: usize) -> Result<core::ops::Range<usize>> {
    match offset.checked_add(length) {
        Some(end) if end <= size => Ok(offset..end),
        end => Err(Error::from_kind(ErrorKind::ReadOutOfBounds(
            end.unwrap_or(usize::MAX),
            size,
        ))),
    }
}

/// Read-only access to a contiguous region of bytes.
///
/// Implementors only provide [`as_bytes`](Buffer::as_bytes) and
/// [`slice`](Buffer::slice); all typed reads are derived from those.
pub trait Buffer: Send + Sync {
    /// The full contents of the buffer.
    fn as_bytes(&self) -> &[u8];

    /// Returns a buffer over `length` bytes starting at `offset`. Implementations
    /// share the underlying storage where they can and copy otherwise.
    fn slice(&self, offset: usize, length: usize) -> Result<Self>
    where
        Self: Sized;

    /// Size in bytes.
    #[inline]
    fn size(&self) -> usize {
        self.as_bytes().len()
    }

    #[inline]
    fn read_bytes(&self, offset: usize, length: usize) -> Result<&[u8]> {
        let bytes = self.as_bytes();
        let range = check_range(offset, length, bytes.len())?;
        Ok(&bytes[range])
    }

    /// Reads `length` bytes at `offset` as UTF-8 text.
    fn read_string(&self, offset: usize, length: usize) -> Result<&str> {
        Ok(core::str::from_utf8(self.read_bytes(offset, length)?)?)
    }

    #[inline]
    fn read_u8(&self, offset: usize) -> Result<u8> {
        Ok(self.read_bytes(offset, 1)?[0])
    }

    #[inline]
    fn read_u16(&self, offset: usize) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.read_bytes(offset, 2)?))
    }

    #[inline]
    fn read_u32(&self, offset: usize) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.read_bytes(offset, 4)?))
    }

    #[inline]
    fn read_u64(&self, offset: usize) -> Result<u64> {
        Ok(LittleEndian::read_u64(self.read_bytes(offset, 8)?))
    }

    #[inline]
    fn read_i8(&self, offset: usize) -> Result<i8> {
        Ok(self.read_u8(offset)? as i8)
    }

    #[inline]
    fn read_i16(&self, offset: usize) -> Result<i16> {
        Ok(LittleEndian::read_i16(self.read_bytes(offset, 2)?))
    }

    #[inline]
    fn read_i32(&self, offset: usize) -> Result<i32> {
        Ok(LittleEndian::read_i32(self.read_bytes(offset, 4)?))
    }

    #[inline]
    fn read_i64(&self, offset: usize) -> Result<i64> {
        Ok(LittleEndian::read_i64(self.read_bytes(offset, 8)?))
    }

    #[inline]
    fn read_f32(&self, offset: usize) -> Result<f32> {
        Ok(LittleEndian::read_f32(self.read_bytes(offset, 4)?))
    }

    #[inline]
    fn read_f64(&self, offset: usize) -> Result<f64> {
        Ok(LittleEndian::read_f64(self.read_bytes(offset, 8)?))
    }
}

impl<'b> Buffer for &'b [u8] {
    #[inline]
    fn as_bytes(&self) -> &[u8] {
        self
    }

    fn slice(&self, offset: usize, length: usize) -> Result<Self> {
        let range = check_range(offset, length, self.len())?;
        Ok(&self[range])
    }
}

/// Slicing a `Vec<u8>` copies.
impl Buffer for Vec<u8> {
    #[inline]
    fn as_bytes(&self) -> &[u8] {
        self
    }

    fn slice(&self, offset: usize, length: usize) -> Result<Self> {
        let range = check_range(offset, length, self.len())?;
        Ok(self[range].to_vec())
    }
}

/// An in-memory buffer. Clones and slices share one allocation.
#[derive(Clone)]
pub struct ByteBuffer {
    bytes: Arc<[u8]>,
    start: usize,
    len: usize,
}

impl ByteBuffer {
    pub fn new(bytes: Vec<u8>) -> Self {
        let len = bytes.len();
        Self {
            bytes: bytes.into(),
            start: 0,
            len,
        }
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for ByteBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes.to_vec())
    }
}

impl core::fmt::Debug for ByteBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("ByteBuffer")
            .field("start", &self.start)
            .field("len", &self.len)
            .finish()
    }
}

impl Buffer for ByteBuffer {
    #[inline]
    fn as_bytes(&self) -> &[u8] {
        &self.bytes[self.start..self.start + self.len]
    }

    fn slice(&self, offset: usize, length: usize) -> Result<Self> {
        let range = check_range(offset, length, self.len)?;
        Ok(Self {
            bytes: self.bytes.clone(),
            start: self.start + range.start,
            len: length,
        })
    }
}

#[cfg(feature = "mmap")]
pub use self::mmap::MmapBuffer;

#[cfg(feature = "mmap")]
mod mmap {
    use std::fs::File;
    use std::path::Path;
    use std::sync::Arc;

    use memmap2::Mmap;

    use super::{check_range, Buffer};
    use crate::Result;

    /// A read-only memory mapping of a file. Slices share the mapping.
    ///
    /// The file must not be modified while it is mapped.
    #[derive(Clone)]
    pub struct MmapBuffer {
        map: Arc<Mmap>,
        start: usize,
        len: usize,
    }

    impl MmapBuffer {
        /// Maps the whole file at `path`.
        pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
            let file = File::open(path.as_ref())?;
            Self::from_file(&file)
        }

        pub fn from_file(file: &File) -> Result<Self> {
            // SAFETY: the mapping is read-only and never handed out mutably. Callers
            // promise not to truncate or rewrite the file while it is mapped.
            let map = unsafe { Mmap::map(file)? };
            let len = map.len();
            tracing::debug!(len, "mapped message file");
            Ok(Self {
                map: Arc::new(map),
                start: 0,
                len,
            })
        }
    }

    impl core::fmt::Debug for MmapBuffer {
        fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
            f.debug_struct("MmapBuffer")
                .field("start", &self.start)
                .field("len", &self.len)
                .finish()
        }
    }

    impl Buffer for MmapBuffer {
        #[inline]
        fn as_bytes(&self) -> &[u8] {
            &self.map[self.start..self.start + self.len]
        }

        fn slice(&self, offset: usize, length: usize) -> Result<Self> {
            let range = check_range(offset, length, self.len)?;
            Ok(Self {
                map: self.map.clone(),
                start: self.start + range.start,
                len: length,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Buffer, ByteBuffer};
    use crate::ErrorKind;

    const BYTES: [u8; 8] = [0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef];

    #[test]
    fn little_endian_reads() {
        let buffer = &BYTES[..];
        assert_eq!(buffer.size(), 8);
        assert_eq!(buffer.read_u8(0).unwrap(), 0x01);
        assert_eq!(buffer.read_u16(0).unwrap(), 0x2301);
        assert_eq!(buffer.read_u32(4).unwrap(), 0xefcdab89);
        assert_eq!(buffer.read_u64(0).unwrap(), 0xefcdab8967452301);
        assert_eq!(buffer.read_i8(7).unwrap(), 0xefu8 as i8);
        assert_eq!(buffer.read_i16(6).unwrap(), 0xefcdu16 as i16);
        assert_eq!(buffer.read_i32(4).unwrap(), 0xefcdab89u32 as i32);
        assert_eq!(buffer.read_i64(0).unwrap(), 0xefcdab8967452301u64 as i64);
    }

    #[test]
    fn float_reads() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&1.5f32.to_le_bytes());
        bytes.extend_from_slice(&(-2.25f32).to_le_bytes());
        bytes.extend_from_slice(&core::f64::consts::PI.to_le_bytes());
        let buffer = ByteBuffer::new(bytes);
        assert_eq!(buffer.read_f32(0).unwrap(), 1.5);
        assert_eq!(buffer.read_f32(4).unwrap(), -2.25);
        assert_eq!(buffer.read_f64(8).unwrap(), core::f64::consts::PI);
    }

    #[test]
    fn reads_past_the_end_fail() {
        let buffer = &BYTES[..];
        assert_eq!(
            buffer.read_u64(1).unwrap_err().kind,
            ErrorKind::ReadOutOfBounds(9, 8)
        );
        assert!(buffer.read_u8(8).is_err());
        assert!(buffer.read_bytes(8, 0).is_ok());
        assert!(buffer.read_bytes(usize::MAX, 2).is_err());
    }

    #[test]
    fn read_string_checks_utf8() {
        let buffer: &[u8] = b"hi\xff";
        assert_eq!(buffer.read_string(0, 2).unwrap(), "hi");
        assert!(matches!(
            buffer.read_string(0, 3).unwrap_err().kind,
            ErrorKind::TextContainsNonUtf8Data(_)
        ));
    }

    #[test]
    fn slices_share_storage() {
        let buffer = ByteBuffer::from(&BYTES[..]);
        let tail = buffer.slice(4, 4).unwrap();
        assert_eq!(tail.size(), 4);
        assert_eq!(tail.read_u32(0).unwrap(), 0xefcdab89);
        assert!(tail.read_u8(4).is_err());

        let inner = tail.slice(2, 2).unwrap();
        assert_eq!(inner.as_bytes(), &[0xcd, 0xef]);
        assert!(tail.slice(2, 3).is_err());

        let vec_slice = BYTES.to_vec().slice(1, 2).unwrap();
        assert_eq!(vec_slice, vec![0x23, 0x45]);
    }

    #[cfg(feature = "mmap")]
    #[test]
    fn mmap_buffer_reads_file_contents() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&BYTES).unwrap();
        file.flush().unwrap();

        let buffer = super::MmapBuffer::open(file.path()).unwrap();
        assert_eq!(buffer.size(), 8);
        assert_eq!(buffer.read_u64(0).unwrap(), 0xefcdab8967452301);
        let tail = buffer.slice(6, 2).unwrap();
        assert_eq!(tail.read_u16(0).unwrap(), 0xefcd);
        assert!(tail.read_u32(0).is_err());
    }
}
