// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

use crate::{
    error::{FixedPointError, Result},
    utils::extract_from_raw_bytes,
};

/// Signed Q64.64 fixed-point numerical type
///
/// ## Fields
///
/// * `0` - The Q64.64 value represented as a i128
///
/// ## Notes
///
/// * Uses an I256 intermediate type for multiplication and division
/// * sign bit, 63 integer bits, 64 fractional bits
/// * Range: integer = [-2^63, 2^63), fractional resolution = 2^-64 ≈ 5.421 * 10^-20
/// * Every operation rounds toward negative infinity and reports overflow
///   instead of wrapping
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct SQ64x64(pub i128);

const FRAC_MASK: u128 = u64::MAX as u128;

impl SQ64x64 {
    pub const FRAC_BITS: u32 = 64;
    pub const MAX: Self = Self(i128::MAX);
    pub const MIN: Self = Self(i128::MIN);
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1 << 64);
    /// Smallest positive value, one unit in the last place (2^-64)
    pub const ULP: Self = Self(1);

    /// Largest integer accepted by [`SQ64x64::from_int`]
    pub const MAX_INT: i128 = i64::MAX as i128;
    /// Smallest integer accepted by [`SQ64x64::from_int`]
    pub const MIN_INT: i128 = i64::MIN as i128;

    #[inline] pub const fn new(value: i128) -> Self { Self(value) }
    #[inline] pub const fn into_raw(self) -> i128 { self.0 }

    /// ## Convert a signed integer to Q64.64
    ///
    /// ### Arguments
    ///
    /// * `value` - integer in [-2^63, 2^63 - 1]
    ///
    /// ### Returns
    ///
    /// `value << 64`, or `Overflow` when the integer part does not fit in 64 signed bits
    #[inline]
    pub fn from_int(value: i128) -> Result<Self> {
        if !(Self::MIN_INT..=Self::MAX_INT).contains(&value) {
            return Err(FixedPointError::overflow("from_int"));
        }
        Ok(Self(value << Self::FRAC_BITS))
    }

    /// ## Convert an unsigned integer to Q64.64
    ///
    /// Fails with `Overflow` for values of 2^63 and above.
    #[inline]
    pub fn from_uint(value: u128) -> Result<Self> {
        if value > Self::MAX_INT as u128 {
            return Err(FixedPointError::overflow("from_uint"));
        }
        Ok(Self((value as i128) << Self::FRAC_BITS))
    }

    /// Integer part, rounded toward negative infinity
    #[inline]
    pub const fn to_int(self) -> i64 {
        (self.0 >> Self::FRAC_BITS) as i64
    }

    /// Integer part as unsigned, `NegativeValue` for negative inputs
    #[inline]
    pub fn to_uint(self) -> Result<u64> {
        if self.0 < 0 {
            return Err(FixedPointError::negative("to_uint"));
        }
        Ok((self.0 >> Self::FRAC_BITS) as u64)
    }

    /// Fractional bits as an unsigned Q0.64 value, always in [0, 1)
    #[inline]
    pub const fn frac_bits(self) -> u64 {
        self.0 as u64
    }

    #[inline] pub const fn is_negative(&self) -> bool { self.0 < 0 }
    #[inline] pub const fn is_positive(&self) -> bool { self.0 > 0 }
    #[inline] pub const fn is_zero(&self) -> bool { self.0 == 0 }

    // --- raw encoding ---

    #[inline] pub const fn to_le_bytes(self) -> [u8; 16] { self.0.to_le_bytes() }
    #[inline] pub const fn to_be_bytes(self) -> [u8; 16] { self.0.to_be_bytes() }
    #[inline] pub const fn from_le_bytes(bytes: [u8; 16]) -> Self { Self(i128::from_le_bytes(bytes)) }
    #[inline] pub const fn from_be_bytes(bytes: [u8; 16]) -> Self { Self(i128::from_be_bytes(bytes)) }

    /// Decode the little-endian raw encoding, which must be exactly 16 bytes
    pub fn from_raw_bytes(bytes: &[u8]) -> Result<Self> {
        extract_from_raw_bytes(bytes).map(Self::from_le_bytes)
    }
}

/// Build an `SQ64x64` constant at compile time.
///
/// * `sq64x64!(3)` / `sq64x64!(-3)` - an integer
/// * `sq64x64!(1 / 3)` - a ratio of integer literals, rounded toward negative infinity
#[macro_export]
macro_rules! sq64x64 {
    ($num:literal / $den:literal) => {{
        const VAL: i128 = (($num as i128) << 64).div_euclid($den as i128);

        $crate::fixed_point::SQ64x64::new(VAL)
    }};
    ($int:literal) => {{
        const VAL: i128 = ($int as i128) << 64;

        $crate::fixed_point::SQ64x64::new(VAL)
    }};
}

pub use sq64x64;

// ---- conversions from base integers ----

macro_rules! impl_from_narrow_int {
    ($($int:ty),*) => {
        $(
            impl core::convert::From<$int> for SQ64x64 {
                #[inline]
                fn from(v: $int) -> Self {
                    Self((v as i128) << Self::FRAC_BITS)
                }
            }
        )*
    };
}

impl_from_narrow_int!(i64, i32, i16, i8, u32, u16, u8);

impl core::convert::TryFrom<i128> for SQ64x64 {
    type Error = FixedPointError;

    #[inline]
    fn try_from(v: i128) -> Result<Self> {
        Self::from_int(v)
    }
}

impl core::convert::TryFrom<u128> for SQ64x64 {
    type Error = FixedPointError;

    #[inline]
    fn try_from(v: u128) -> Result<Self> {
        Self::from_uint(v)
    }
}

impl core::convert::TryFrom<u64> for SQ64x64 {
    type Error = FixedPointError;

    #[inline]
    fn try_from(v: u64) -> Result<Self> {
        Self::from_uint(v as u128)
    }
}

// ---- operator impls (PANIC on failure, use the checked methods to handle errors) ----

macro_rules! impl_panicking_binop {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $checked:ident) => {
        impl core::ops::$trait<SQ64x64> for SQ64x64 {
            type Output = Self;

            #[track_caller]
            #[inline]
            fn $method(self, rhs: Self) -> Self {
                self.$checked(rhs).unwrap_or_else(|e| panic!("{e}"))
            }
        }

        impl core::ops::$assign_trait<SQ64x64> for SQ64x64 {
            #[track_caller]
            #[inline]
            fn $assign_method(&mut self, rhs: Self) {
                *self = self.$checked(rhs).unwrap_or_else(|e| panic!("{e}"));
            }
        }
    };
}

impl_panicking_binop!(Add, add, AddAssign, add_assign, checked_add);
impl_panicking_binop!(Sub, sub, SubAssign, sub_assign, checked_sub);
impl_panicking_binop!(Mul, mul, MulAssign, mul_assign, checked_mul);
impl_panicking_binop!(Div, div, DivAssign, div_assign, checked_div);

impl core::ops::Neg for SQ64x64 {
    type Output = Self;

    #[track_caller]
    #[inline]
    fn neg(self) -> Self {
        self.checked_neg().unwrap_or_else(|e| panic!("{e}"))
    }
}

impl core::ops::Neg for &SQ64x64 {
    type Output = SQ64x64;

    #[track_caller]
    #[inline]
    fn neg(self) -> SQ64x64 { -*self }
}

impl core::iter::Sum for SQ64x64 {
    #[track_caller]
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

/// Exact decimal rendering, truncated toward zero.
///
/// Without a precision the fraction is printed to 20 digits with trailing
/// zeros trimmed; `{:.N}` prints exactly N digits.
impl std::fmt::Display for SQ64x64 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let magnitude = self.0.unsigned_abs();
        let int_part = magnitude >> Self::FRAC_BITS;
        let mut frac = magnitude & FRAC_MASK;

        let digits = f.precision().unwrap_or(20);
        let mut frac_str = String::with_capacity(digits);
        for _ in 0..digits {
            frac *= 10;
            frac_str.push(char::from(b'0' + (frac >> Self::FRAC_BITS) as u8));
            frac &= FRAC_MASK;
        }

        let trimmed = if f.precision().is_some() {
            frac_str.as_str()
        } else {
            frac_str.trim_end_matches('0')
        };

        let shows_nonzero = int_part != 0 || trimmed.bytes().any(|b| b != b'0');
        let sign = if self.0 < 0 && shows_nonzero { "-" } else { "" };

        if trimmed.is_empty() {
            write!(f, "{sign}{int_part}")
        } else {
            write!(f, "{sign}{int_part}.{trimmed}")
        }
    }
}

// Optional: bytemuck
#[cfg(feature = "bytemuck")]
unsafe impl bytemuck::Zeroable for SQ64x64 {}
#[cfg(feature = "bytemuck")]
unsafe impl bytemuck::Pod for SQ64x64 {}

// Optional: serde, as the raw i128
#[cfg(feature = "serde")]
impl serde::Serialize for SQ64x64 {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
        where S: serde::Serializer
    {
        self.0.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SQ64x64 {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
        where D: serde::Deserializer<'de>
    {
        <i128>::deserialize(deserializer).map(Self)
    }
}
