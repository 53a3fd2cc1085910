//! Numeric traits for attribute components and face indices.

use std::fmt::{Debug, Display};
use std::str::FromStr;

/// A numeric type usable as an attribute component.
///
/// Implemented for `f32`, `f64`, `i32` and `i64`. Texture coordinates and
/// normals are normally read as floats; integer components are accepted
/// because positions on integer grids are common in voxel exports.
pub trait Scalar: Copy + PartialOrd + Debug + Display + FromStr + 'static {
    /// Additive identity.
    const ZERO: Self;
    /// Multiplicative identity.
    const ONE: Self;
}

/// An integer type usable as a zero-based face index.
///
/// Implemented for `u16`, `u32`, `u64`, `usize`, `i32` and `i64`.
pub trait IndexValue: Copy + Ord + Debug + Display + FromStr + 'static {
    /// Zero.
    const ZERO: Self;
    /// Largest representable value.
    const MAX: Self;

    /// `self + 1`, or `None` on overflow.
    fn checked_increment(self) -> Option<Self>;

    /// `self - 1`, or `None` on underflow.
    fn checked_decrement(self) -> Option<Self>;

    /// Convert to `usize`, or `None` if negative or too large.
    fn to_usize(self) -> Option<usize>;
}

macro_rules! impl_scalar {
    ($($ty:ty => $zero:expr, $one:expr;)*) => {
        $(
            impl Scalar for $ty {
                const ZERO: Self = $zero;
                const ONE: Self = $one;
            }
        )*
    };
}

impl_scalar! {
    f32 => 0.0, 1.0;
    f64 => 0.0, 1.0;
    i32 => 0, 1;
    i64 => 0, 1;
}

macro_rules! impl_index_value {
    ($($ty:ty),*) => {
        $(
            impl IndexValue for $ty {
                const ZERO: Self = 0;
                const MAX: Self = <$ty>::MAX;

                #[inline]
                fn checked_increment(self) -> Option<Self> {
                    self.checked_add(1)
                }

                #[inline]
                fn checked_decrement(self) -> Option<Self> {
                    self.checked_sub(1)
                }

                #[inline]
                fn to_usize(self) -> Option<usize> {
                    usize::try_from(self).ok()
                }
            }
        )*
    };
}

impl_index_value!(u16, u32, u64, usize, i32, i64);
