//! Errors raised by the library

use std::fmt::Display;

/// Every failure the library reports instead of recovering locally.
///
/// Numerically degenerate situations (singular matrices, division by zero,
/// gimbal lock) are *not* errors: they are recovered in place. What ends up
/// here are requests that cannot be honoured without producing a wrong answer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GmathError {
    /// (IndexOutOfRange) Element access beyond the dimensionality of a type
    IndexOutOfRange {
        type_name: &'static str,
        index: usize,
        len: usize,
    },
    /// (InvalidLength) A slice with the wrong number of values was used to build a type
    InvalidLength {
        type_name: &'static str,
        expected: usize,
        got: usize,
    },
    /// (NonUniformScale) An `Xfo` operation that would shear
    NonUniformScale { operation: &'static str },
    /// (InvalidAxisPair) Primary and secondary aim axes lie on the same line
    InvalidAxisPair {
        primary: crate::axis::Axis,
        secondary: crate::axis::Axis,
    },
    /// (InvalidCode) An integer that does not map onto an enumeration
    InvalidCode { kind: &'static str, code: i32 },
}

impl Display for GmathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GmathError::IndexOutOfRange { type_name, index, len } => write!(
                f,
                "(IndexOutOfRange) {}: index {} out of range (len = {})",
                type_name, index, len
            ),
            GmathError::InvalidLength { type_name, expected, got } => write!(
                f,
                "(InvalidLength) {} needs exactly {} values, got {}",
                type_name, expected, got
            ),
            GmathError::NonUniformScale { operation } => write!(
                f,
                "(NonUniformScale) {}: non-uniform scale would cause shearing; use a full matrix instead",
                operation
            ),
            GmathError::InvalidAxisPair { primary, secondary } => write!(
                f,
                "(InvalidAxisPair) primary axis {} and secondary axis {} must differ",
                primary, secondary
            ),
            GmathError::InvalidCode { kind, code } => {
                write!(f, "(InvalidCode) {} is not a valid {}", code, kind)
            },
        }
    }
}

/// Shorthand used across the crate.
pub type Result<T> = std::result::Result<T, GmathError>;

/// Bounds check shared by every indexed accessor.
#[inline]
pub(crate) const fn check_index(type_name: &'static str, index: usize, len: usize) -> Result<usize> {
    if index < len {
        Ok(index)
    } else {
        Err(GmathError::IndexOutOfRange { type_name, index, len })
    }
}

/// Slice length check shared by every `TryFrom<&[Real]>`.
#[inline]
pub(crate) const fn check_len(type_name: &'static str, expected: usize, got: usize) -> Result<()> {
    if expected == got {
        Ok(())
    } else {
        Err(GmathError::InvalidLength { type_name, expected, got })
    }
}
