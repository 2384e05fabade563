use crate::{
    error::{FixedPointError, Result},
    fixed_point::SQ64x64,
    integers::{u256_to_i128, I256, U256},
    utils::isqrt_u256,
};

impl SQ64x64 {
    /// Narrow a 256-bit intermediate back into the Q64.64 range
    #[inline]
    pub(crate) fn from_wide(value: I256, op: &'static str) -> Result<Self> {
        i128::try_from(value)
            .map(Self)
            .map_err(|_| FixedPointError::overflow(op))
    }

    #[inline]
    pub fn checked_add(self, rhs: Self) -> Result<Self> {
        self.0
            .checked_add(rhs.0)
            .map(Self)
            .ok_or_else(|| FixedPointError::overflow("add"))
    }

    #[inline]
    pub fn checked_sub(self, rhs: Self) -> Result<Self> {
        self.0
            .checked_sub(rhs.0)
            .map(Self)
            .ok_or_else(|| FixedPointError::overflow("sub"))
    }

    #[inline]
    pub fn checked_neg(self) -> Result<Self> {
        self.0
            .checked_neg()
            .map(Self)
            .ok_or_else(|| FixedPointError::overflow("neg"))
    }

    /// Absolute value, `Overflow` for `MIN`
    #[inline]
    pub fn abs(self) -> Result<Self> {
        self.0
            .checked_abs()
            .map(Self)
            .ok_or_else(|| FixedPointError::overflow("abs"))
    }

    /// (a * b) >> 64, rounded toward negative infinity
    #[inline]
    pub fn checked_mul(self, rhs: Self) -> Result<Self> {
        // two i128 magnitudes multiply to at most 2^254
        let product = I256::from(self.0)
            .checked_mul(I256::from(rhs.0))
            .ok_or_else(|| FixedPointError::overflow("mul"))?;
        Self::from_wide(product >> 64usize, "mul")
    }

    /// (a << 64) / b, rounded toward negative infinity
    #[inline]
    pub fn checked_div(self, rhs: Self) -> Result<Self> {
        if rhs.0 == 0 {
            return Err(FixedPointError::division_by_zero("div"));
        }
        let num = I256::from(self.0) << 64usize;
        let quotient = num
            .checked_div_floor(I256::from(rhs.0))
            .ok_or_else(|| FixedPointError::overflow("div"))?;
        Self::from_wide(quotient, "div")
    }

    /// 1 / x, rounded toward negative infinity
    #[inline]
    pub fn inv(self) -> Result<Self> {
        if self.0 == 0 {
            return Err(FixedPointError::division_by_zero("inv"));
        }
        let unit_squared = I256::one() << 128usize;
        let quotient = unit_squared
            .checked_div_floor(I256::from(self.0))
            .ok_or_else(|| FixedPointError::overflow("inv"))?;
        Self::from_wide(quotient, "inv")
    }

    /// Arithmetic mean, floor((x + y) / 2), computed without a widened sum
    #[inline]
    pub const fn avg(self, rhs: Self) -> Self {
        Self((self.0 >> 1) + (rhs.0 >> 1) + (self.0 & rhs.0 & 1))
    }

    /// Geometric mean sqrt(x * y), rounded down.
    ///
    /// The result is non-negative. Fails with `DomainError` when the product
    /// is negative, i.e. the operands are non-zero with opposite signs.
    pub fn gavg(self, rhs: Self) -> Result<Self> {
        let product = I256::from(self.0)
            .checked_mul(I256::from(rhs.0))
            .ok_or_else(|| FixedPointError::overflow("gavg"))?;
        if product.is_negative() {
            return Err(FixedPointError::domain("gavg"));
        }

        // sqrt(x * 2^64 * y * 2^64) = sqrt(x * y) * 2^64
        let root = isqrt_u256(product.to_unsigned());
        u256_to_i128(root)
            .map(Self)
            .ok_or_else(|| FixedPointError::overflow("gavg"))
    }

    /// Arithmetic shift of the raw value.
    ///
    /// Positive `bits` shift left and fail with `Overflow` if any significant
    /// bit (or the sign) would be lost. Negative `bits` shift right, rounding
    /// toward negative infinity; this never fails.
    pub fn shift(self, bits: i32) -> Result<Self> {
        if bits < 0 {
            let bits = bits.unsigned_abs().min(i128::BITS - 1);
            return Ok(Self(self.0 >> bits));
        }
        if self.0 == 0 {
            return Ok(self);
        }

        let bits = bits as u32;
        if bits >= i128::BITS {
            return Err(FixedPointError::overflow("shift"));
        }
        let shifted = self.0 << bits;
        if shifted >> bits != self.0 {
            return Err(FixedPointError::overflow("shift"));
        }
        Ok(Self(shifted))
    }

    /// floor(x * y) for an integer y, as an integer
    pub fn muli(self, rhs: i128) -> Result<i128> {
        let product = I256::from(self.0)
            .checked_mul(I256::from(rhs))
            .ok_or_else(|| FixedPointError::overflow("muli"))?;
        i128::try_from(product >> 64usize).map_err(|_| FixedPointError::overflow("muli"))
    }

    /// floor(x * y) for an unsigned integer y, as an unsigned integer.
    ///
    /// `NegativeValue` if x is negative.
    pub fn mulu(self, rhs: u128) -> Result<u128> {
        if self.0 < 0 {
            return Err(FixedPointError::negative("mulu"));
        }
        // x < 2^127 and y < 2^128 keep the product below 2^255
        let product = U256::from(self.0 as u128) * U256::from(rhs);
        u128::try_from(product >> 64usize).map_err(|_| FixedPointError::overflow("mulu"))
    }

    /// Fixed-point quotient x / y of two integers, rounded toward negative infinity
    pub fn divi(numerator: i128, denominator: i128) -> Result<Self> {
        if denominator == 0 {
            return Err(FixedPointError::division_by_zero("divi"));
        }
        let num = I256::from(numerator) << 64usize;
        let quotient = num
            .checked_div_floor(I256::from(denominator))
            .ok_or_else(|| FixedPointError::overflow("divi"))?;
        Self::from_wide(quotient, "divi")
    }

    /// Fixed-point quotient x / y of two unsigned integers, rounded down
    pub fn divu(numerator: u128, denominator: u128) -> Result<Self> {
        if denominator == 0 {
            return Err(FixedPointError::division_by_zero("divu"));
        }
        let quotient = (U256::from(numerator) << 64usize) / U256::from(denominator);
        u256_to_i128(quotient)
            .map(Self)
            .ok_or_else(|| FixedPointError::overflow("divu"))
    }
}
