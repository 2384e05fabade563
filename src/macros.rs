/// Macro to construct a two's-complement signed integer wrapping a `uint` type.
///
/// Only the operations the fixed-point engine needs for its widened
/// intermediates are generated: sign/magnitude helpers, checked
/// multiplication, floor division and arithmetic shifts.
#[macro_export]
macro_rules! construct_sint {
    ( $(#[$attr:meta])* $visibility:vis struct $sname:ident ( $uname:ident ); ) => {
        /// Signed integer type wrapping an unsigned type
        #[repr(transparent)]
        $(#[$attr])*
        #[derive(Copy, Clone, Eq, PartialEq, Debug)]
        $visibility struct $sname($uname);

        impl $sname {
            /// The number of bits in this signed integer type
            pub const BITS: u32 = (core::mem::size_of::<$uname>() * 8) as u32;
            /// Position of the sign bit (MSB)
            const SIGN_BIT: usize = Self::BITS as usize - 1;

            /// Minimum negative value (-2^(n-1))
            pub const MIN: $sname = {
                let mut min_val = $uname::zero();
                min_val.0[Self::SIGN_BIT / 64] = 1u64 << (Self::SIGN_BIT % 64);
                $sname(min_val)
            };

            pub const fn one() -> Self {
                Self($uname::one())
            }

            pub const fn is_negative(&self) -> bool {
                self.0.bit(Self::SIGN_BIT)
            }

            pub const fn is_zero(&self) -> bool {
                self.0.is_zero()
            }

            /// Reinterpret the two's-complement bits as unsigned
            pub const fn to_unsigned(self) -> $uname {
                self.0
            }

            /// Reinterpret unsigned bits as two's-complement
            pub const fn from_unsigned(value: $uname) -> Self {
                Self(value)
            }

            /// Magnitude of the value; exact even for `MIN`
            #[inline]
            pub fn unsigned_abs(&self) -> $uname {
                if self.is_negative() {
                    self.wrapping_neg().0
                } else {
                    self.0
                }
            }

            #[inline]
            pub fn wrapping_neg(&self) -> Self {
                Self((!self.0).overflowing_add($uname::one()).0)
            }

            /// Build a value from a sign and a magnitude, `None` if it does not fit
            #[inline]
            pub fn from_sign_and_magnitude(negative: bool, magnitude: $uname) -> Option<Self> {
                let value = Self(magnitude);
                if !negative {
                    return if value.is_negative() { None } else { Some(value) };
                }
                if magnitude > Self::MIN.0 {
                    return None;
                }
                Some(value.wrapping_neg())
            }

            /// Checked multiplication, `None` if the product leaves the signed range
            #[inline]
            pub fn checked_mul(self, other: Self) -> Option<Self> {
                let (magnitude, overflow) = self.unsigned_abs().overflowing_mul(other.unsigned_abs());
                if overflow {
                    return None;
                }
                Self::from_sign_and_magnitude(self.is_negative() ^ other.is_negative(), magnitude)
            }

            /// Division rounding toward negative infinity.
            ///
            /// `None` on division by zero or when the quotient is not representable
            /// (`MIN / -1`).
            #[inline]
            pub fn checked_div_floor(self, other: Self) -> Option<Self> {
                if other.is_zero() {
                    return None;
                }
                let num = self.unsigned_abs();
                let den = other.unsigned_abs();
                let (quotient, remainder) = num.div_mod(den);
                let negative = self.is_negative() ^ other.is_negative();

                // a negative quotient with a remainder lies one below the truncated value
                let magnitude = if negative && !remainder.is_zero() {
                    quotient.checked_add($uname::one())?
                } else {
                    quotient
                };
                Self::from_sign_and_magnitude(negative, magnitude)
            }

            /// Left shift by `rhs` bits, high bits are discarded
            #[inline]
            pub fn logical_shl(self, rhs: usize) -> Self {
                if rhs == 0 { return self; }
                if rhs >= Self::BITS as usize { panic!("shift overflow"); }

                Self(self.0 << rhs)
            }

            /// Arithmetic right shift (sign-extending, rounds toward negative infinity)
            #[inline]
            pub fn arithmetic_shr(self, rhs: usize) -> Self {
                if rhs == 0 { return self; }
                if rhs >= Self::BITS as usize { panic!("shift overflow"); }

                let logical = self.0 >> rhs;
                if !self.is_negative() {
                    Self(logical)
                } else {
                    // fill the top `rhs` bits with 1s to preserve the sign
                    let mask = (!$uname::zero()) << (Self::BITS as usize - rhs);
                    Self(logical | mask)
                }
            }
        }

        impl From<i128> for $sname {
            fn from(value: i128) -> Self {
                // two's-complement bits of the source
                let bits: u128 = value as u128;
                let mut u = $uname::from(bits);

                // sign-extend into the wider words
                if value < 0 {
                    u = u | ((!$uname::zero()) << 128);
                }

                Self(u)
            }
        }

        impl core::ops::Shl<usize> for $sname {
            type Output = Self;

            #[inline]
            fn shl(self, rhs: usize) -> Self { self.logical_shl(rhs) }
        }

        impl core::ops::Shr<usize> for $sname {
            type Output = Self;

            #[inline]
            fn shr(self, rhs: usize) -> Self { self.arithmetic_shr(rhs) }
        }
    };
}
