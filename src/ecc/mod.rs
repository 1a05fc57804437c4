//! SECDED entry codecs for protected sparse-matrix storage.
//!
//! Each stored matrix entry is treated as a flat little-endian word array and
//! wrapped in an extended Hamming code: 7 parity bits cover the payload via
//! fixed bit-subset masks, and one overall-parity bit distinguishes single
//! from double flips. Single-bit errors (anywhere in the protected word,
//! parity bits included) are located and corrected; double-bit errors are
//! detected and reported.
//!
//! Two structurally parallel codecs exist, one per storage layout:
//!
//! - [`coo`]: 128-bit `{col, row, value}` records, parity embedded in the
//!   high 8 bits of the column word.
//! - [`csr`]: 96-bit `{value, col}` records (row implicit in the compressed
//!   structure), same construction at narrower width.
//!
//! # Examples
//!
//! ```
//! use blindar::ecc::{coo, EccCheck};
//! use blindar::sparse::CooEntry;
//!
//! let mut entry = CooEntry::new(2, 1, 4.5);
//! coo::encode(&mut entry);
//! assert_eq!(coo::check(&entry), EccCheck::Clean);
//!
//! coo::flip_bit(&mut entry, 70); // simulate a soft error in the value
//! assert_eq!(coo::check(&entry), EccCheck::CorrectableAt(70));
//! ```

pub mod coo;
pub mod csr;

mod layout;


/// Outcome of validating a stored entry against its parity bits.
///
/// Makes the SECDED three-way branch explicit: the caller must handle
/// correction and detection-without-correction as distinct cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EccCheck {
    /// Parity holds; the entry is intact.
    Clean,
    /// Exactly one bit flipped since encoding; flipping the physical bit at
    /// this position restores the original entry.
    CorrectableAt(u32),
    /// Two bits flipped; detected but not locatable. The entry must not be
    /// consumed.
    Uncorrectable,
}

impl EccCheck {
    /// Returns true for [`EccCheck::Clean`].
    #[must_use]
    pub fn is_clean(self) -> bool {
        matches!(self, EccCheck::Clean)
    }

    /// Returns true unless the entry is uncorrectably corrupt.
    #[must_use]
    pub fn is_usable(self) -> bool {
        !matches!(self, EccCheck::Uncorrectable)
    }
}

/// Even/odd parity of a 32-bit word: 1 if an odd number of bits are set.
#[inline]
pub(crate) fn word_parity(x: u32) -> u32 {
    x.count_ones() & 1
}
