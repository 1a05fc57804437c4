//! SECDED codec for 128-bit coordinate-format entries.
//!
//! A [`CooEntry`] packs into four little-endian words `[col, row, value_lo,
//! value_hi]`. After [`encode`], the column word reads:
//!
//! ```text
//! bit 31 .. 25   Hamming parity bits p1 .. p7
//! bit 24         overall-parity bit (XOR of all 128 bits is even)
//! bit 23 .. 0    real column index
//! ```
//!
//! Encoding is a pure linear function of the entry bits, so re-running it
//! over a stored entry yields the error syndrome: zero where the stored
//! parity still holds, non-zero in exactly the groups touched by corruption.

use std::sync::OnceLock;

use super::layout::{self, OVERALL_OFFSET, PARITY_GROUPS};
use super::{word_parity, EccCheck};
use crate::sparse::CooEntry;

/// Number of protected physical bit positions per entry.
pub const ENTRY_BITS: u32 = 128;

/// Physical position of the overall-parity bit.
pub const OVERALL_BIT: u32 = OVERALL_OFFSET;

const WORDS: usize = 4;
const PARITY_WORD: usize = 0;

static MASKS: OnceLock<[[u32; WORDS]; PARITY_GROUPS]> = OnceLock::new();

pub(crate) fn parity_masks() -> &'static [[u32; WORDS]; PARITY_GROUPS] {
    MASKS.get_or_init(|| layout::derive_masks::<WORDS>(PARITY_WORD))
}

/// Computes the 7 Hamming parity bits over the entry as stored, packed into
/// bits 31..=25 of the result (group 1 at bit 31).
///
/// Over a freshly encoded entry this is the zero syndrome; over a corrupted
/// entry it is non-zero in exactly the affected groups.
#[must_use]
pub fn syndrome(words: &[u32; 4]) -> u32 {
    let mut result = 0u32;
    for (idx, mask) in parity_masks().iter().enumerate() {
        let mut acc = 0u32;
        for (word, m) in words.iter().zip(mask) {
            acc ^= word & m;
        }
        result |= word_parity(acc) << (31 - idx as u32);
    }
    result
}

/// Overall parity of all 128 entry bits: 0 when even.
#[must_use]
pub fn overall_parity(words: &[u32; 4]) -> u32 {
    word_parity(words[0] ^ words[1] ^ words[2] ^ words[3])
}

/// Computes and embeds the parity bits for `entry` in place.
///
/// The parity field may hold anything beforehand; the syndrome is XORed into
/// it, and linearity cancels prior contents, so the stored bits come out as
/// a pure function of the payload. Encoding an already-clean entry is a
/// no-op.
pub fn encode(entry: &mut CooEntry) {
    let mut words = entry.to_words();
    words[PARITY_WORD] ^= syndrome(&words);
    let overall = overall_parity(&words);
    words[PARITY_WORD] ^= overall << OVERALL_BIT;
    *entry = CooEntry::from_words(words);
}

/// Validates a stored entry against its parity bits.
///
/// Classification follows the SECDED duality of syndrome and overall parity:
///
/// | syndrome | overall parity | meaning                          |
/// |----------|----------------|----------------------------------|
/// | zero     | even           | clean                            |
/// | zero     | odd            | overall-parity bit itself flipped |
/// | non-zero | odd            | one bit flipped, locatable       |
/// | non-zero | even           | two bits flipped, uncorrectable  |
#[must_use]
pub fn check(entry: &CooEntry) -> EccCheck {
    let words = entry.to_words();
    let syn = syndrome(&words);
    let odd = overall_parity(&words) == 1;
    match (syn, odd) {
        (0, false) => EccCheck::Clean,
        (0, true) => EccCheck::CorrectableAt(OVERALL_BIT),
        (_, true) => EccCheck::CorrectableAt(locate(syn)),
        (_, false) => EccCheck::Uncorrectable,
    }
}

/// Validates `entry` and corrects it in place when possible.
///
/// Returns the pre-correction check outcome; after a
/// [`EccCheck::CorrectableAt`] return the entry is restored bit-for-bit and
/// a subsequent [`check`] reports [`EccCheck::Clean`].
pub fn repair(entry: &mut CooEntry) -> EccCheck {
    let outcome = check(entry);
    if let EccCheck::CorrectableAt(bit) = outcome {
        flip_bit(entry, bit);
    }
    outcome
}

/// Maps a non-zero syndrome to the physical position of the flipped bit.
///
/// The syndrome bits reassemble the virtual index of the corrupted position.
/// A power-of-two virtual index names a stored parity bit (group `p` lives
/// at physical `32 - p`); any other value is a data bit, recovered by
/// subtracting the skipped power-of-two indices and shifting past the
/// reserved high bits of the column word.
#[must_use]
pub fn locate(syndrome: u32) -> u32 {
    let mut virt = 0u32;
    for p in 1..=PARITY_GROUPS as u32 {
        if (syndrome >> (32 - p)) & 1 == 1 {
            virt |= 1 << (p - 1);
        }
    }
    debug_assert!(virt != 0, "locate called with a zero syndrome");

    if virt.is_power_of_two() {
        // Parity bit p has virtual index 2^(p-1); clz maps it to 32 - p.
        return virt.leading_zeros();
    }
    let data_bit = virt - (32 - virt.leading_zeros()) - 1;
    if data_bit >= 24 {
        data_bit + 8
    } else {
        data_bit
    }
}

/// Flips one physical bit of the entry. Shared primitive of correction and
/// fault injection; both sides use the same bit addressing.
///
/// # Panics
///
/// Panics if `bit >= 128`.
pub fn flip_bit(entry: &mut CooEntry, bit: u32) {
    assert!(bit < ENTRY_BITS, "bit {bit} outside 128-bit COO entry");
    let mut words = entry.to_words();
    words[(bit / 32) as usize] ^= 1 << (bit % 32);
    *entry = CooEntry::from_words(words);
}
