use crate::{error::FixedPointError, integers::U256};

/// Decode a fixed-size value from a slice that holds exactly its raw bytes
#[inline]
pub(crate) fn extract_from_raw_bytes<T>(bytes: &[u8]) -> Result<T, FixedPointError>
where
    T: Sized + for<'a> TryFrom<&'a [u8]>,
{
    T::try_from(bytes).map_err(|_| FixedPointError::InvalidLength {
        expected: core::mem::size_of::<T>(),
        actual: bytes.len(),
    })
}

/// floor(sqrt(n)) by digit-by-digit bisection.
///
/// Always runs 128 rounds, one result bit per round, whatever the input.
pub(crate) fn isqrt_u256(n: U256) -> U256 {
    let mut rem = n;
    let mut root = U256::zero();
    let mut bit = U256::one() << 254usize;

    for _ in 0..128 {
        let trial = root + bit;
        if rem >= trial {
            rem = rem - trial;
            root = (root >> 1usize) + bit;
        } else {
            root = root >> 1usize;
        }
        bit = bit >> 2usize;
    }

    root
}
