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

//! Dynamically typed value.

use crate::private::layout::{self, PointerType};
use crate::reference::Reference;
use crate::traits::FromPointerReader;
use crate::Result;

/// A pointer slot whose type is decided by the caller.
#[derive(Copy, Clone, Debug)]
pub struct Reader<'a> {
    reference: Reference<'a>,
}

impl<'a> Reader<'a> {
    pub fn new(reference: Reference<'_>) -> Reader<'_> {
        Reader { reference }
    }

    /// Where the pointer word lives.
    pub fn reference(&self) -> Reference<'a> {
        self.reference
    }

    /// Whether the pointer is null, once far pointers have been followed.
    #[inline]
    pub fn is_null(&self) -> Result<bool> {
        Ok(self.pointer_type()? == PointerType::Null)
    }

    pub fn pointer_type(&self) -> Result<PointerType> {
        layout::pointer_type(self.reference)
    }

    #[inline]
    pub fn get_as<T: FromPointerReader<'a>>(&self) -> Result<Option<T>> {
        FromPointerReader::get_from_pointer(self.reference)
    }
}

impl<'a> FromPointerReader<'a> for Reader<'a> {
    fn get_from_pointer(reference: Reference<'a>) -> Result<Option<Reader<'a>>> {
        Ok(Some(Reader { reference }))
    }
}
