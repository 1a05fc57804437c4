//! Sparse matrix storage with ECC-protectable entries.
//!
//! Two layouts are supported, mirroring the two entry codecs:
//!
//! - [`CooMatrix`]: coordinate format as parallel `cols`/`rows`/`values`
//!   arrays; each logical entry is a 128-bit [`CooEntry`].
//! - [`CsrMatrix`]: compressed sparse row format with a row-pointer array;
//!   each stored entry is a 96-bit [`CsrEntry`] whose row is implicit.
//!
//! The parity bits written by ECC initialization live inside the high bits
//! of the stored column words, so the in-memory layout here is the wire
//! format: a serialized matrix round-trips bit-for-bit, parity included.
//!
//! # Examples
//!
//! ```
//! use blindar::sparse::{CooMatrix, CsrMatrix};
//!
//! let coo = CooMatrix::from_triplets(3, &[(0, 0, 1.0), (1, 2, 4.5)]).unwrap();
//! assert_eq!(coo.nnz(), 2);
//!
//! let csr = CsrMatrix::from_coo(&coo);
//! assert_eq!(csr.row_range(1), 1..2);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{BlindarError, Result};

/// Largest supported matrix dimension: column indices must fit the 24 low
/// bits of the column word, the high 8 bits being reserved for parity.
pub const MAX_DIMENSION: usize = 1 << 24;

/// Mask selecting the real column index out of a stored column word.
pub const COLUMN_MASK: u32 = 0x00FF_FFFF;

/// One coordinate-format entry: a 128-bit protected record.
///
/// `col` holds the real column index in its low 24 bits; after ECC
/// initialization its high 8 bits carry the parity code. `row` and `value`
/// are plain payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CooEntry {
    pub col: u32,
    pub row: u32,
    pub value: f64,
}

impl CooEntry {
    /// Creates an entry with a clear parity field.
    #[must_use]
    pub fn new(col: u32, row: u32, value: f64) -> Self {
        Self { col, row, value }
    }

    /// Real column index, with the parity bits masked off.
    #[must_use]
    pub fn column_index(&self) -> u32 {
        self.col & COLUMN_MASK
    }

    /// Little-endian word view `[col, row, value_lo, value_hi]`. Physical
    /// bit `k` of the entry is bit `k % 32` of word `k / 32`.
    pub(crate) fn to_words(self) -> [u32; 4] {
        let bits = self.value.to_bits();
        [self.col, self.row, bits as u32, (bits >> 32) as u32]
    }

    pub(crate) fn from_words(words: [u32; 4]) -> Self {
        let bits = u64::from(words[2]) | (u64::from(words[3]) << 32);
        Self {
            col: words[0],
            row: words[1],
            value: f64::from_bits(bits),
        }
    }
}

/// One compressed-layout entry: a 96-bit protected record with implicit row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CsrEntry {
    pub value: f64,
    pub col: u32,
}

impl CsrEntry {
    /// Creates an entry with a clear parity field.
    #[must_use]
    pub fn new(value: f64, col: u32) -> Self {
        Self { value, col }
    }

    /// Real column index, with the parity bits masked off.
    #[must_use]
    pub fn column_index(&self) -> u32 {
        self.col & COLUMN_MASK
    }

    /// Little-endian word view `[value_lo, value_hi, col]`.
    pub(crate) fn to_words(self) -> [u32; 3] {
        let bits = self.value.to_bits();
        [bits as u32, (bits >> 32) as u32, self.col]
    }

    pub(crate) fn from_words(words: [u32; 3]) -> Self {
        let bits = u64::from(words[0]) | (u64::from(words[1]) << 32);
        Self {
            value: f64::from_bits(bits),
            col: words[2],
        }
    }
}

/// Square sparse matrix in coordinate format.
///
/// Entries live in parallel arrays; the ECC initializer and the protected
/// multiply rewrite bits within this storage but never resize or reorder it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CooMatrix {
    pub(crate) n: usize,
    pub(crate) cols: Vec<u32>,
    pub(crate) rows: Vec<u32>,
    pub(crate) values: Vec<f64>,
}

impl CooMatrix {
    /// Builds an `n`-by-`n` matrix from `(row, col, value)` triplets.
    ///
    /// # Errors
    ///
    /// Returns [`BlindarError::InvalidMatrix`] if `n` exceeds
    /// [`MAX_DIMENSION`] or any index is out of range.
    pub fn from_triplets(n: usize, triplets: &[(u32, u32, f64)]) -> Result<Self> {
        if n > MAX_DIMENSION {
            return Err(BlindarError::invalid_matrix(format!(
                "dimension {n} exceeds {MAX_DIMENSION} (column index must fit 24 bits)"
            )));
        }
        let mut cols = Vec::with_capacity(triplets.len());
        let mut rows = Vec::with_capacity(triplets.len());
        let mut values = Vec::with_capacity(triplets.len());
        for &(row, col, value) in triplets {
            if row as usize >= n || col as usize >= n {
                return Err(BlindarError::invalid_matrix(format!(
                    "entry ({row}, {col}) outside {n}x{n} matrix"
                )));
            }
            rows.push(row);
            cols.push(col);
            values.push(value);
        }
        Ok(Self { n, cols, rows, values })
    }

    /// Matrix dimension.
    #[must_use]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of stored entries.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Reads entry `i` out of the parallel arrays.
    ///
    /// # Panics
    ///
    /// Panics if `i >= nnz()`.
    #[must_use]
    pub fn entry(&self, i: usize) -> CooEntry {
        CooEntry {
            col: self.cols[i],
            row: self.rows[i],
            value: self.values[i],
        }
    }

    /// Writes entry `i` back into the parallel arrays.
    ///
    /// # Panics
    ///
    /// Panics if `i >= nnz()`.
    pub fn set_entry(&mut self, i: usize, entry: CooEntry) {
        self.cols[i] = entry.col;
        self.rows[i] = entry.row;
        self.values[i] = entry.value;
    }
}

/// Square sparse matrix in compressed sparse row format.
///
/// `row_ptr[r]..row_ptr[r + 1]` indexes the entries of row `r` within the
/// parallel `cols`/`values` arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsrMatrix {
    pub(crate) n: usize,
    pub(crate) row_ptr: Vec<usize>,
    pub(crate) cols: Vec<u32>,
    pub(crate) values: Vec<f64>,
}

impl CsrMatrix {
    /// Builds a matrix from raw CSR components.
    ///
    /// # Errors
    ///
    /// Returns [`BlindarError::InvalidMatrix`] if the row pointers are not a
    /// monotone cover of the entry arrays, the arrays disagree in length, or
    /// any column index is out of range.
    pub fn new(n: usize, row_ptr: Vec<usize>, cols: Vec<u32>, values: Vec<f64>) -> Result<Self> {
        if n > MAX_DIMENSION {
            return Err(BlindarError::invalid_matrix(format!(
                "dimension {n} exceeds {MAX_DIMENSION} (column index must fit 24 bits)"
            )));
        }
        if cols.len() != values.len() {
            return Err(BlindarError::invalid_matrix(format!(
                "cols length ({}) != values length ({})",
                cols.len(),
                values.len()
            )));
        }
        if row_ptr.len() != n + 1 {
            return Err(BlindarError::invalid_matrix(format!(
                "row_ptr length ({}) != n + 1 ({})",
                row_ptr.len(),
                n + 1
            )));
        }
        if row_ptr.first() != Some(&0) || row_ptr.last() != Some(&values.len()) {
            return Err(BlindarError::invalid_matrix(
                "row_ptr must start at 0 and end at nnz",
            ));
        }
        for i in 1..row_ptr.len() {
            if row_ptr[i] < row_ptr[i - 1] {
                return Err(BlindarError::invalid_matrix(format!(
                    "row_ptr not monotone at index {i}: {} < {}",
                    row_ptr[i],
                    row_ptr[i - 1]
                )));
            }
        }
        for &col in &cols {
            if col as usize >= n {
                return Err(BlindarError::invalid_matrix(format!(
                    "column index {col} >= n ({n})"
                )));
            }
        }
        Ok(Self { n, row_ptr, cols, values })
    }

    /// Converts a coordinate matrix, sorting entries by row then column.
    ///
    /// Convert before ECC initialization: the sort keys on the raw column
    /// words, which must not yet carry parity bits.
    #[must_use]
    pub fn from_coo(coo: &CooMatrix) -> Self {
        let mut order: Vec<usize> = (0..coo.nnz()).collect();
        order.sort_by_key(|&i| (coo.rows[i], coo.cols[i]));

        let mut row_ptr = vec![0usize; coo.n + 1];
        let mut cols = Vec::with_capacity(coo.nnz());
        let mut values = Vec::with_capacity(coo.nnz());
        for &i in &order {
            row_ptr[coo.rows[i] as usize + 1] += 1;
            cols.push(coo.cols[i]);
            values.push(coo.values[i]);
        }
        for r in 0..coo.n {
            row_ptr[r + 1] += row_ptr[r];
        }
        Self {
            n: coo.n,
            row_ptr,
            cols,
            values,
        }
    }

    /// Matrix dimension.
    #[must_use]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of stored entries.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Index range of row `r`'s entries within the entry arrays.
    ///
    /// # Panics
    ///
    /// Panics if `r >= n()`.
    #[must_use]
    pub fn row_range(&self, r: usize) -> std::ops::Range<usize> {
        self.row_ptr[r]..self.row_ptr[r + 1]
    }

    /// Reads stored entry `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= nnz()`.
    #[must_use]
    pub fn entry(&self, i: usize) -> CsrEntry {
        CsrEntry {
            value: self.values[i],
            col: self.cols[i],
        }
    }

    /// Writes stored entry `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= nnz()`.
    pub fn set_entry(&mut self, i: usize, entry: CsrEntry) {
        self.values[i] = entry.value;
        self.cols[i] = entry.col;
    }
}

#[cfg(test)]
mod tests;
