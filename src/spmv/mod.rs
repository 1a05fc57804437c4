//! ECC initialization and the protected multiply kernel.
//!
//! [`CooMatrix::init_ecc`] / [`CsrMatrix::init_ecc`] run the one-time bulk
//! encode over every stored entry, immediately after loading and before any
//! multiply. `protected_spmv` then validates each entry the moment before it
//! feeds the multiply-accumulate: clean entries pass through, single-bit
//! errors are corrected in place (so later passes see clean data), and
//! double-bit errors abort the multiply with
//! [`BlindarError::UncorrectableCorruption`] rather than silently producing
//! a wrong result.
//!
//! Only the stored entry is validated; the accumulation arithmetic and the
//! dense vectors are unprotected by design.
//!
//! # Examples
//!
//! ```
//! use blindar::prelude::*;
//!
//! let mut m = CooMatrix::from_triplets(2, &[(0, 0, 2.0), (1, 1, 3.0)]).unwrap();
//! m.init_ecc();
//!
//! let mut result = vec![0.0; 2];
//! let report = m.protected_spmv(&[1.0, 1.0], &mut result).unwrap();
//! assert_eq!(result, vec![2.0, 3.0]);
//! assert!(report.events.is_empty());
//! ```

use serde::{Deserialize, Serialize};

use crate::ecc::{coo, csr, EccCheck};
use crate::error::{BlindarError, Result};
use crate::sparse::{CooMatrix, CsrMatrix};

/// One corrected single-bit error, for caller-side telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionEvent {
    /// Index of the affected entry in storage order.
    pub entry: usize,
    /// Physical bit position that was flipped back.
    pub bit: u32,
}

/// Outcome of a successful protected multiply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpmvReport {
    /// Number of single-bit errors corrected during this pass.
    pub corrected: usize,
    /// One event per correction, in traversal order.
    pub events: Vec<CorrectionEvent>,
}

impl SpmvReport {
    fn record(&mut self, entry: usize, bit: u32) {
        self.corrected += 1;
        self.events.push(CorrectionEvent { entry, bit });
    }
}

fn check_dimensions(n: usize, vector: &[f64], result: &[f64]) -> Result<()> {
    if vector.len() != n {
        return Err(BlindarError::dimension_mismatch("n", n, vector.len()));
    }
    if result.len() != n {
        return Err(BlindarError::dimension_mismatch("n", n, result.len()));
    }
    Ok(())
}

impl CooMatrix {
    /// Computes and embeds parity bits for every stored entry, in place.
    ///
    /// Call exactly once after construction and before any multiply. Entry
    /// count and ordering are unchanged; only bits within existing storage
    /// are rewritten.
    pub fn init_ecc(&mut self) {
        for i in 0..self.nnz() {
            let mut entry = self.entry(i);
            coo::encode(&mut entry);
            self.set_entry(i, entry);
        }
    }

    /// Sparse matrix-vector multiply with per-entry validation:
    /// `result = M * vector`.
    ///
    /// Corrected entries are written back to storage and counted in the
    /// returned report.
    ///
    /// # Errors
    ///
    /// [`BlindarError::DimensionMismatch`] if `vector` or `result` are not
    /// of length `n`; [`BlindarError::UncorrectableCorruption`] on the first
    /// entry with a double-bit error, in which case `result` contents are
    /// unspecified. The reported row is the stored row field and may itself
    /// be corrupt.
    pub fn protected_spmv(&mut self, vector: &[f64], result: &mut [f64]) -> Result<SpmvReport> {
        check_dimensions(self.n(), vector, result)?;
        result.fill(0.0);

        let mut report = SpmvReport::default();
        for i in 0..self.nnz() {
            let mut entry = self.entry(i);
            match coo::repair(&mut entry) {
                EccCheck::Clean => {}
                EccCheck::CorrectableAt(bit) => {
                    self.set_entry(i, entry);
                    report.record(i, bit);
                }
                EccCheck::Uncorrectable => {
                    return Err(BlindarError::UncorrectableCorruption {
                        entry: i,
                        row: entry.row,
                    });
                }
            }
            let row = entry.row as usize;
            let col = entry.column_index() as usize;
            result[row] += entry.value * vector[col];
        }
        Ok(report)
    }
}

impl CsrMatrix {
    /// Computes and embeds parity bits for every stored entry, in place.
    pub fn init_ecc(&mut self) {
        for i in 0..self.nnz() {
            let mut entry = self.entry(i);
            csr::encode(&mut entry);
            self.set_entry(i, entry);
        }
    }

    /// Sparse matrix-vector multiply with per-entry validation:
    /// `result = M * vector`.
    ///
    /// # Errors
    ///
    /// As for [`CooMatrix::protected_spmv`], except the row in
    /// [`BlindarError::UncorrectableCorruption`] comes from the row-pointer
    /// structure and is trustworthy.
    pub fn protected_spmv(&mut self, vector: &[f64], result: &mut [f64]) -> Result<SpmvReport> {
        check_dimensions(self.n(), vector, result)?;
        result.fill(0.0);

        let mut report = SpmvReport::default();
        for row in 0..self.n() {
            let mut acc = 0.0;
            for i in self.row_range(row) {
                let mut entry = self.entry(i);
                match csr::repair(&mut entry) {
                    EccCheck::Clean => {}
                    EccCheck::CorrectableAt(bit) => {
                        self.set_entry(i, entry);
                        report.record(i, bit);
                    }
                    EccCheck::Uncorrectable => {
                        return Err(BlindarError::UncorrectableCorruption {
                            entry: i,
                            row: row as u32,
                        });
                    }
                }
                acc += entry.value * vector[entry.column_index() as usize];
            }
            result[row] = acc;
        }
        Ok(report)
    }
}
