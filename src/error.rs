//! Error types for Blindar operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for Blindar operations.
///
/// Provides detailed context about failures including dimension mismatches,
/// invalid matrix structure, and uncorrectable memory corruption.
///
/// # Examples
///
/// ```
/// use blindar::error::BlindarError;
///
/// let err = BlindarError::DimensionMismatch {
///     expected: "vector of length 3".to_string(),
///     actual: "2".to_string(),
/// };
/// assert!(err.to_string().contains("dimension mismatch"));
/// ```
#[derive(Debug)]
pub enum BlindarError {
    /// Vector/result dimensions don't match the matrix.
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Matrix structure failed validation (lengths, bounds, row pointers).
    InvalidMatrix {
        /// Reason for invalidity
        reason: String,
    },

    /// A stored entry holds a double-bit error the SECDED code can detect
    /// but not correct. The result row touched by this entry is unreliable.
    UncorrectableCorruption {
        /// Index of the corrupted entry in storage order
        entry: usize,
        /// Row associated with the entry (stored field for COO, so itself
        /// possibly corrupt; structural and trustworthy for CSR)
        row: u32,
    },

    /// Index outside the valid range.
    IndexOutOfBounds {
        /// Offending index
        index: usize,
        /// Length of the indexed range
        len: usize,
    },

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for BlindarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlindarError::DimensionMismatch { expected, actual } => {
                write!(f, "dimension mismatch: expected {expected}, got {actual}")
            }
            BlindarError::InvalidMatrix { reason } => {
                write!(f, "invalid matrix: {reason}")
            }
            BlindarError::UncorrectableCorruption { entry, row } => {
                write!(
                    f,
                    "uncorrectable double-bit corruption in entry {entry} (row {row})"
                )
            }
            BlindarError::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds (len={len})")
            }
            BlindarError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for BlindarError {}

impl From<&str> for BlindarError {
    fn from(msg: &str) -> Self {
        BlindarError::Other(msg.to_string())
    }
}

impl From<String> for BlindarError {
    fn from(msg: String) -> Self {
        BlindarError::Other(msg)
    }
}

impl BlindarError {
    /// Create a dimension mismatch error with descriptive context.
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }

    /// Create an invalid matrix error.
    #[must_use]
    pub fn invalid_matrix(reason: impl Into<String>) -> Self {
        Self::InvalidMatrix {
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, BlindarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_display() {
        let err = BlindarError::dimension_mismatch("n", 3, 2);
        assert!(err.to_string().contains("dimension mismatch"));
        assert!(err.to_string().contains("n=3"));
        assert!(err.to_string().contains('2'));
    }

    #[test]
    fn test_invalid_matrix_display() {
        let err = BlindarError::invalid_matrix("row 5 out of range");
        assert!(err.to_string().contains("invalid matrix"));
        assert!(err.to_string().contains("row 5"));
    }

    #[test]
    fn test_uncorrectable_display() {
        let err = BlindarError::UncorrectableCorruption { entry: 7, row: 1 };
        let msg = err.to_string();
        assert!(msg.contains("uncorrectable"));
        assert!(msg.contains("entry 7"));
        assert!(msg.contains("row 1"));
    }

    #[test]
    fn test_index_out_of_bounds_display() {
        let err = BlindarError::IndexOutOfBounds { index: 10, len: 5 };
        let msg = err.to_string();
        assert!(msg.contains("index 10"));
        assert!(msg.contains("len=5"));
    }

    #[test]
    fn test_from_str() {
        let err: BlindarError = "test error".into();
        assert!(matches!(err, BlindarError::Other(_)));
        assert_eq!(err.to_string(), "test error");
    }

    #[test]
    fn test_from_string() {
        let err: BlindarError = "test error".to_string().into();
        assert!(matches!(err, BlindarError::Other(_)));
    }
}
