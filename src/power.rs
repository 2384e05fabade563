use crate::{
    error::{FixedPointError, Result},
    fixed_point::SQ64x64,
    integers::{u256_to_i128, U256},
    utils::isqrt_u256,
};

impl SQ64x64 {
    /// ## Raise to a non-negative integer power
    ///
    /// Binary exponentiation: one multiplication per set bit of `exponent` and
    /// one squaring per remaining bit. Each step rounds toward negative
    /// infinity like [`SQ64x64::checked_mul`].
    ///
    /// ### Returns
    ///
    /// `ONE` for `exponent == 0` (including `0^0`), `Overflow` if any
    /// intermediate product leaves the range
    pub fn pow(self, exponent: u64) -> Result<Self> {
        let mut result = Self::ONE;
        let mut base = self;
        let mut remaining = exponent;

        while remaining > 0 {
            if remaining & 1 == 1 {
                result = result.checked_mul(base).map_err(|_| FixedPointError::overflow("pow"))?;
            }
            remaining >>= 1;
            // the last square would be discarded, skip it so it cannot overflow
            if remaining > 0 {
                base = base.checked_mul(base).map_err(|_| FixedPointError::overflow("pow"))?;
            }
        }

        Ok(result)
    }

    /// ## Square root, rounded down
    ///
    /// Returns the largest r with r * r <= x over the reals, i.e.
    /// floor(sqrt(raw * 2^64)) as a raw value. Runs a fixed 128-round
    /// bisection regardless of the input.
    ///
    /// ### Returns
    ///
    /// `DomainError` for negative inputs
    pub fn sqrt(self) -> Result<Self> {
        if self.0 < 0 {
            return Err(FixedPointError::domain("sqrt"));
        }

        let scaled = U256::from(self.0 as u128) << 64usize;
        // raw < 2^127 keeps the root below 2^96
        u256_to_i128(isqrt_u256(scaled))
            .map(Self)
            .ok_or_else(|| FixedPointError::overflow("sqrt"))
    }
}
