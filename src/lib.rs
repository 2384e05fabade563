//! Deterministic signed Q64.64 fixed-point arithmetic.
//!
//! [`SQ64x64`] wraps an `i128` whose high 64 bits are the signed integer part
//! and whose low 64 bits are the binary fraction. All operations are pure,
//! round toward negative infinity and return a [`FixedPointError`] instead of
//! wrapping, so results are bit-for-bit reproducible on every platform.
//!
//! ```
//! use fixed_q64::SQ64x64;
//!
//! let two = SQ64x64::from_int(2)?;
//! let root = two.sqrt()?;
//! assert!(root.checked_mul(root)? <= two);
//! assert_eq!(SQ64x64::ONE.checked_div(SQ64x64::from_int(-2)?)?.to_string(), "-0.5");
//! # Ok::<(), fixed_q64::FixedPointError>(())
//! ```

pub mod error;
pub mod macros;
pub mod fixed_point;
pub mod integers;
mod arithmetic;
mod power;
mod transcendental;
mod utils;

pub use error::{FixedPointError, Result};
pub use fixed_point::SQ64x64;
