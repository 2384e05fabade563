use crate::{construct_sint, error::FixedPointError};
use ::uint::construct_uint;

// these have scuffed doc comments because the macro codegens the beginning of them
construct_uint! {
    /// with 256-bits of precision, consisting of four 64-bit words.
    pub struct U256(4);
}

construct_sint! {
    /// Two's-complement 256-bit integer, the widened intermediate for Q64.64 products and quotients
    pub struct I256(U256);
}

impl TryFrom<I256> for i128 {
    type Error = FixedPointError;

    fn try_from(v: I256) -> Result<Self, Self::Error> {
        let neg = v.is_negative();
        let U256(ref a) = v.to_unsigned(); // LE limbs: [lo, mid1, mid2, hi]

        if !neg {
            // non-negative must have all bits >=128 clear AND bit127 clear
            if a[3] != 0 || a[2] != 0 || (a[1] >> 63) != 0 {
                return Err(FixedPointError::Overflow("i256 -> i128"));
            }
        } else {
            // negative must be proper sign-extension: bits 128..255 all ones
            // and bit127 set (>= i128::MIN)
            if a[3] != u64::MAX || a[2] != u64::MAX || (a[1] >> 63) == 0 {
                return Err(FixedPointError::Overflow("i256 -> i128"));
            }
        }

        let lo128 = ((a[1] as u128) << 64) | (a[0] as u128);
        Ok(lo128 as i128)
    }
}

/// Narrow an unsigned 256-bit value into the non-negative half of `i128`
pub(crate) fn u256_to_i128(v: U256) -> Option<i128> {
    let U256(ref a) = v;
    if a[2] != 0 || a[3] != 0 || (a[1] >> 63) != 0 {
        return None;
    }
    Some((((a[1] as u128) << 64) | (a[0] as u128)) as i128)
}
