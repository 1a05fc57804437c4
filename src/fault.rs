//! Bit-flip injection for resilience testing.
//!
//! Simulates memory corruption between ECC initialization and the multiply,
//! using the same physical bit addressing as the codecs: a flip injected at
//! position `k` is located at position `k` by a subsequent check.
//!
//! # Examples
//!
//! ```
//! use blindar::fault;
//! use blindar::prelude::*;
//!
//! let mut m = CooMatrix::from_triplets(3, &[(1, 2, 4.5)]).unwrap();
//! m.init_ecc();
//! fault::inject_coo(&mut m, 0, 70).unwrap();
//!
//! let mut result = vec![0.0; 3];
//! let report = m.protected_spmv(&[1.0, 1.0, 1.0], &mut result).unwrap();
//! assert_eq!(report.corrected, 1);
//! assert_eq!(result[1], 4.5);
//! ```

use rand::Rng;

use crate::ecc::{coo, csr};
use crate::error::{BlindarError, Result};
use crate::sparse::{CooMatrix, CsrMatrix};

/// Flips physical bit `bit` of stored entry `entry` in a coordinate matrix.
///
/// # Errors
///
/// [`BlindarError::IndexOutOfBounds`] if `entry` or `bit` is out of range.
pub fn inject_coo(matrix: &mut CooMatrix, entry: usize, bit: u32) -> Result<()> {
    if entry >= matrix.nnz() {
        return Err(BlindarError::IndexOutOfBounds {
            index: entry,
            len: matrix.nnz(),
        });
    }
    if bit >= coo::ENTRY_BITS {
        return Err(BlindarError::IndexOutOfBounds {
            index: bit as usize,
            len: coo::ENTRY_BITS as usize,
        });
    }
    let mut e = matrix.entry(entry);
    coo::flip_bit(&mut e, bit);
    matrix.set_entry(entry, e);
    Ok(())
}

/// Flips physical bit `bit` of stored entry `entry` in a compressed matrix.
///
/// # Errors
///
/// [`BlindarError::IndexOutOfBounds`] if `entry` or `bit` is out of range.
pub fn inject_csr(matrix: &mut CsrMatrix, entry: usize, bit: u32) -> Result<()> {
    if entry >= matrix.nnz() {
        return Err(BlindarError::IndexOutOfBounds {
            index: entry,
            len: matrix.nnz(),
        });
    }
    if bit >= csr::ENTRY_BITS {
        return Err(BlindarError::IndexOutOfBounds {
            index: bit as usize,
            len: csr::ENTRY_BITS as usize,
        });
    }
    let mut e = matrix.entry(entry);
    csr::flip_bit(&mut e, bit);
    matrix.set_entry(entry, e);
    Ok(())
}

/// Flips one uniformly chosen bit of one uniformly chosen entry.
///
/// Returns the `(entry, bit)` pair so the campaign can assert the eventual
/// correction against the injection site. Use a seeded rng for reproducible
/// campaigns.
///
/// # Errors
///
/// [`BlindarError::InvalidMatrix`] if the matrix stores no entries.
pub fn inject_random_coo<R: Rng>(matrix: &mut CooMatrix, rng: &mut R) -> Result<(usize, u32)> {
    if matrix.nnz() == 0 {
        return Err(BlindarError::invalid_matrix("no entries to corrupt"));
    }
    let entry = rng.gen_range(0..matrix.nnz());
    let bit = rng.gen_range(0..coo::ENTRY_BITS);
    inject_coo(matrix, entry, bit)?;
    Ok((entry, bit))
}

/// Compressed-layout twin of [`inject_random_coo`].
///
/// # Errors
///
/// [`BlindarError::InvalidMatrix`] if the matrix stores no entries.
pub fn inject_random_csr<R: Rng>(matrix: &mut CsrMatrix, rng: &mut R) -> Result<(usize, u32)> {
    if matrix.nnz() == 0 {
        return Err(BlindarError::invalid_matrix("no entries to corrupt"));
    }
    let entry = rng.gen_range(0..matrix.nnz());
    let bit = rng.gen_range(0..csr::ENTRY_BITS);
    inject_csr(matrix, entry, bit)?;
    Ok((entry, bit))
}
