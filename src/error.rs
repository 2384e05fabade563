use thiserror::Error;

/// Failure of a checked fixed-point operation.
///
/// Every variant carries the name of the operation that rejected its
/// arguments, so a failure deep inside a formula can still be traced back.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixedPointError {
    /// Result or operand falls outside the representable Q64.64 range
    #[error("{0}: result outside the Q64.64 range")]
    Overflow(&'static str),

    /// Denominator is zero
    #[error("{0}: division by zero")]
    DivisionByZero(&'static str),

    /// Argument outside the mathematical domain of the function
    #[error("{0}: argument outside the function domain")]
    DomainError(&'static str),

    /// Negative value where an unsigned result was requested
    #[error("{0}: negative value has no unsigned representation")]
    NegativeValue(&'static str),

    /// Raw encoding of the wrong length
    #[error("invalid raw encoding: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

pub type Result<T> = core::result::Result<T, FixedPointError>;

impl FixedPointError {
    #[cold]
    pub(crate) fn overflow(op: &'static str) -> Self {
        log::trace!("{op}: overflow");
        Self::Overflow(op)
    }

    #[cold]
    pub(crate) fn division_by_zero(op: &'static str) -> Self {
        log::trace!("{op}: division by zero");
        Self::DivisionByZero(op)
    }

    #[cold]
    pub(crate) fn domain(op: &'static str) -> Self {
        log::trace!("{op}: argument outside domain");
        Self::DomainError(op)
    }

    #[cold]
    pub(crate) fn negative(op: &'static str) -> Self {
        log::trace!("{op}: negative value");
        Self::NegativeValue(op)
    }

    /// Name of the operation that failed, if any
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Self::Overflow(op)
            | Self::DivisionByZero(op)
            | Self::DomainError(op)
            | Self::NegativeValue(op) => Some(op),
            Self::InvalidLength { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_operation() {
        assert_eq!(
            FixedPointError::Overflow("mul").to_string(),
            "mul: result outside the Q64.64 range"
        );
        assert_eq!(
            FixedPointError::InvalidLength { expected: 16, actual: 3 }.to_string(),
            "invalid raw encoding: expected 16 bytes, got 3"
        );
    }

    #[test]
    fn operation_accessor() {
        assert_eq!(FixedPointError::domain("sqrt").operation(), Some("sqrt"));
        assert_eq!(FixedPointError::negative("to_uint"), FixedPointError::NegativeValue("to_uint"));
        assert_eq!(FixedPointError::InvalidLength { expected: 16, actual: 0 }.operation(), None);
    }
}
