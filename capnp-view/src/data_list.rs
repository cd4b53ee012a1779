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

//! List of sequences of bytes.

use crate::private::layout::{ListReader, Pointer};
use crate::reference::Reference;
use crate::traits::{FromPointerReader, IndexMove, ListIter};
use crate::Result;

#[derive(Clone, Copy)]
pub struct Reader<'a> {
    reader: ListReader<'a>,
}

impl<'a> Reader<'a> {
    pub fn new(reader: ListReader<'_>) -> Reader<'_> {
        Reader { reader }
    }

    pub fn len(&self) -> u32 {
        self.reader.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(self) -> ListIter<Reader<'a>, Result<Option<crate::data::Reader<'a>>>> {
        let l = self.len();
        ListIter::new(self, l)
    }
}

impl<'a> FromPointerReader<'a> for Reader<'a> {
    fn get_from_pointer(reference: Reference<'a>) -> Result<Option<Reader<'a>>> {
        Ok(ListReader::from_pointer(reference, Some(Pointer))?.map(Reader::new))
    }
}

impl<'a> IndexMove<u32, Result<Option<crate::data::Reader<'a>>>> for Reader<'a> {
    fn index_move(&self, index: u32) -> Result<Option<crate::data::Reader<'a>>> {
        self.get(index)
    }
}

impl<'a> Reader<'a> {
    /// Gets the `data::Reader` at position `index`. Panics if `index` is
    /// greater than or equal to `len()`. A null element gives `None`.
    pub fn get(self, index: u32) -> Result<Option<crate::data::Reader<'a>>> {
        assert!(index < self.len());
        FromPointerReader::get_from_pointer(self.reader.get_pointer_element(index))
    }

    /// Gets the `data::Reader` at position `index`. Returns `None` if `index`
    /// is greater than or equal to `len()`.
    pub fn try_get(self, index: u32) -> Option<Result<Option<crate::data::Reader<'a>>>> {
        if index < self.len() {
            Some(self.get(index))
        } else {
            None
        }
    }
}
