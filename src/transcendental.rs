//! Base-2 logarithm and exponential by bit decomposition, plus the natural
//! variants derived from them.
//!
//! Mantissas are held as unsigned integers at 2^-127 resolution so that a
//! value in [1, 2) occupies exactly the top bit of a u128 and its square fits
//! in a U256.

use std::sync::LazyLock;

use crate::{
    error::{FixedPointError, Result},
    fixed_point::SQ64x64,
    integers::{u256_to_i128, I256, U256},
    utils::isqrt_u256,
};

/// Number of fractional bits of the mantissa encoding
const MANTISSA_BITS: usize = 127;

/// ln(2) * 2^128, rounded down
const LN2_Q128: I256 = I256::from_unsigned(U256([0xc9e3_b398_03f2_f6af, 0xb172_17f7_d1cf_79ab, 0x0, 0x0]));

/// Smallest argument `exp_2` rejects on the high side (2^63 does not fit)
const EXP2_UPPER: i128 = 63 << 64;
/// Smallest argument `exp_2` accepts (2^-64 is one ULP)
const EXP2_LOWER: i128 = -64 << 64;

/// `EXP2_FACTORS[i] = 2^(2^-(i+1)) * 2^127`, rounded down.
///
/// Each entry is the square root of the previous one, so the table is derived
/// from integer square roots only and is identical on every platform.
static EXP2_FACTORS: LazyLock<[u128; 64]> = LazyLock::new(|| {
    let mut table = [0u128; 64];
    // sqrt(2) * 2^127 = sqrt(2^255)
    let mut factor = isqrt_u256(U256::one() << 255usize);

    for (i, entry) in table.iter_mut().enumerate() {
        if i > 0 {
            factor = isqrt_u256(factor << MANTISSA_BITS);
        }
        *entry = factor.low_u128();
    }

    log::debug!("built exp_2 factor table ({} entries)", table.len());
    table
});

impl SQ64x64 {
    /// log2(e), rounded down
    pub const LOG2E: Self = Self(0x1_7154_7652_b82f_e177);
    /// ln(2), rounded down
    pub const LN2: Self = Self(0xb172_17f7_d1cf_79ab);

    /// ## Binary logarithm
    ///
    /// The integer part is the position of the highest set bit relative to the
    /// binary point. The 64 fractional bits are produced one per round by
    /// squaring the normalized mantissa and testing whether it reached 2.
    ///
    /// ### Returns
    ///
    /// floor(log2(x) * 2^64) as a Q64.64 value, or `DomainError` for x <= 0
    pub fn log_2(self) -> Result<Self> {
        if self.0 <= 0 {
            return Err(FixedPointError::domain("log_2"));
        }

        let msb = 127 - self.0.leading_zeros();
        let mut result: i128 = (msb as i128 - 64) << 64;

        // mantissa in [1, 2) at 2^-127 resolution
        let mut mantissa = U256::from(self.0 as u128) << (MANTISSA_BITS - msb as usize);
        for bit in (0..64).rev() {
            mantissa = mantissa * mantissa;
            let carry = (mantissa >> 255usize).low_u64();
            mantissa = mantissa >> (MANTISSA_BITS + carry as usize);
            result += (carry as i128) << bit;
        }

        Ok(Self(result))
    }

    /// Natural logarithm, log2(x) * ln(2) rounded down
    pub fn ln(self) -> Result<Self> {
        let log2 = self.log_2().map_err(|_| FixedPointError::domain("ln"))?;
        let product = I256::from(log2.0)
            .checked_mul(LN2_Q128)
            .ok_or_else(|| FixedPointError::overflow("ln"))?;
        Self::from_wide(product >> 128usize, "ln")
    }

    /// ## Binary exponential
    ///
    /// Splits x into k = floor(x) and the fraction f, multiplies 1.0 by
    /// 2^(2^-i) for every set bit i of f, then shifts by k.
    ///
    /// ### Returns
    ///
    /// 2^x rounded down, or `Overflow` outside [-64, 63) where the result
    /// would not be representable
    pub fn exp_2(self) -> Result<Self> {
        if !(EXP2_LOWER..EXP2_UPPER).contains(&self.0) {
            return Err(FixedPointError::overflow("exp_2"));
        }

        let k = self.0 >> 64;
        let frac = self.frac_bits();

        let mut mantissa = U256::one() << MANTISSA_BITS;
        for (i, factor) in EXP2_FACTORS.iter().enumerate() {
            if (frac >> (63 - i)) & 1 == 1 {
                mantissa = (mantissa * U256::from(*factor)) >> MANTISSA_BITS;
            }
        }

        // k in [-64, 62] keeps the shift in [1, 127]
        let shift = (63 - k) as usize;
        u256_to_i128(mantissa >> shift)
            .map(Self)
            .ok_or_else(|| FixedPointError::overflow("exp_2"))
    }

    /// ## Natural exponential
    ///
    /// exp(x) = 2^(x * log2(e)), with the product taken against [`Self::LOG2E`]
    /// and rounded down like any other `checked_mul` before `exp_2`.
    pub fn exp(self) -> Result<Self> {
        self.checked_mul(Self::LOG2E)
            .and_then(Self::exp_2)
            .map_err(|_| FixedPointError::overflow("exp"))
    }
}
