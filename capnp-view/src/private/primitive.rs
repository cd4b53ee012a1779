use crate::private::mask::Mask;
use crate::reference::Reference;
use crate::Result;

/// A fixed-width value stored little-endian in a data section or list.
pub trait Primitive: Copy + Mask {
    /// Width on the wire.
    const BYTES: usize;

    /// The value of an all-zero encoding.
    const ZERO: Self;

    /// Reads the value at `offset` bytes past `reference`.
    fn read(reference: Reference<'_>, offset: usize) -> Result<Self>;
}

macro_rules! primitive_impl(
    ($typ:ty, $read:ident, $n:expr, $zero:expr) => (
        impl Primitive for $typ {
            const BYTES: usize = $n;
            const ZERO: Self = $zero;

            #[inline]
            fn read(reference: Reference<'_>, offset: usize) -> Result<Self> {
                reference.$read(offset)
            }
        }
    );
);

primitive_impl!(u8, read_u8, 1, 0);
primitive_impl!(i8, read_i8, 1, 0);
primitive_impl!(u16, read_u16, 2, 0);
primitive_impl!(i16, read_i16, 2, 0);
primitive_impl!(u32, read_u32, 4, 0);
primitive_impl!(i32, read_i32, 4, 0);
primitive_impl!(u64, read_u64, 8, 0);
primitive_impl!(i64, read_i64, 8, 0);
primitive_impl!(f32, read_f32, 4, 0.0);
primitive_impl!(f64, read_f64, 8, 0.0);
