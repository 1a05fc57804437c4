//! Blindar: ECC-hardened sparse matrix kernels in pure Rust.
//!
//! Blindar protects sparse-matrix data against single-bit memory corruption
//! (e.g., radiation-induced soft errors) during sparse matrix-vector
//! multiplication. Every stored entry carries an extended Hamming SECDED
//! code: single bit flips are corrected transparently at read time, double
//! flips are detected and surfaced as errors instead of silently poisoning
//! the computation.
//!
//! # Quick Start
//!
//! ```
//! use blindar::prelude::*;
//!
//! // 3x3 matrix with one non-zero: value 4.5 at (row 1, col 2)
//! let mut m = CooMatrix::from_triplets(3, &[(1, 2, 4.5)]).unwrap();
//!
//! // Compute and embed parity bits (once, at load time)
//! m.init_ecc();
//!
//! // Protected multiply: entries are validated before use
//! let mut result = vec![0.0; 3];
//! let report = m.protected_spmv(&[1.0, 1.0, 1.0], &mut result).unwrap();
//! assert_eq!(result[1], 4.5);
//! assert_eq!(report.corrected, 0);
//! ```
//!
//! # Modules
//!
//! - [`ecc`]: SECDED entry codecs (encode, syndrome check, bit location)
//! - [`sparse`]: `CooMatrix` and `CsrMatrix` storage with protected entries
//! - [`spmv`]: ECC initialization and the protected multiply kernel
//! - [`fault`]: bit-flip injection for resilience testing
//! - [`error`]: crate error type and `Result` alias

pub mod ecc;
pub mod error;
pub mod fault;
pub mod prelude;
pub mod sparse;
pub mod spmv;

pub use error::{BlindarError, Result};
