//! A reader written the way generated accessor code reads a struct:
//!
//! ```capnp
//! struct Person {
//!   id @0 :UInt64;
//!   age @1 :UInt16 = 30;
//!   color @2 :Color;
//!   score @3 :Float32 = 1.5;
//!   active @4 :Bool = true;
//!   name @5 :Text;
//!   nicknames @6 :List(Text);
//!   friends @7 :List(Person);
//!   lucky @8 :List(Int32);
//! }
//!
//! enum Color { red @0; green @1; blue @2; }
//! ```
//!
//! Data section: `id` at byte 0, `age` at byte 8, `color` at byte 10, `score`
//! at byte 12, `active` at bit 128. Two data words are enough for everything
//! but `active`, which needs a third.

use capnp_view::private::layout::StructReader;
use capnp_view::traits::{FromPointerReader, FromStructReader, FromU16};
use capnp_view::{primitive_list, struct_list, text, text_list, NotInSchema, Reference, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Red = 0,
    Green = 1,
    Blue = 2,
}

impl FromU16 for Color {
    fn from_u16(value: u16) -> ::core::result::Result<Self, NotInSchema> {
        match value {
            0 => Ok(Self::Red),
            1 => Ok(Self::Green),
            2 => Ok(Self::Blue),
            n => Err(NotInSchema(n)),
        }
    }
}

pub mod person {
    use super::*;

    #[derive(Clone, Copy)]
    pub struct Reader<'a> {
        reader: StructReader<'a>,
    }

    impl<'a> FromStructReader<'a> for Reader<'a> {
        fn new(reader: StructReader<'a>) -> Self {
            Self { reader }
        }
    }

    impl<'a> FromPointerReader<'a> for Reader<'a> {
        fn get_from_pointer(reference: Reference<'a>) -> Result<Option<Self>> {
            Ok(StructReader::from_pointer(reference)?.map(Self::new))
        }
    }

    impl<'a> Reader<'a> {
        #[inline]
        pub fn get_id(self) -> Result<u64> {
            self.reader.get_data_field::<u64>(0)
        }

        #[inline]
        pub fn get_age(self) -> Result<u16> {
            self.reader.get_data_field_mask::<u16>(8, 30)
        }

        #[inline]
        pub fn get_color(self) -> Result<::core::result::Result<Color, NotInSchema>> {
            Ok(FromU16::from_u16(self.reader.get_data_field::<u16>(10)?))
        }

        #[inline]
        pub fn get_score(self) -> Result<f32> {
            self.reader
                .get_data_field_mask::<f32>(12, 1.5f32.to_bits())
        }

        #[inline]
        pub fn get_active(self) -> Result<bool> {
            self.reader.get_bool_field_mask(128, true)
        }

        #[inline]
        pub fn get_name(self) -> Result<Option<text::Reader<'a>>> {
            FromPointerReader::get_from_pointer(self.reader.get_pointer_field(0))
        }

        #[inline]
        pub fn get_nicknames(self) -> Result<Option<text_list::Reader<'a>>> {
            FromPointerReader::get_from_pointer(self.reader.get_pointer_field(1))
        }

        #[inline]
        pub fn get_friends(self) -> Result<Option<struct_list::Reader<'a, Reader<'a>>>> {
            FromPointerReader::get_from_pointer(self.reader.get_pointer_field(2))
        }

        #[inline]
        pub fn get_lucky(self) -> Result<Option<primitive_list::Reader<'a, i32>>> {
            FromPointerReader::get_from_pointer(self.reader.get_pointer_field(3))
        }

        pub fn has_name(self) -> Result<bool> {
            Ok(self.get_name()?.is_some())
        }
    }
}
