//! SECDED codec for 96-bit compressed-layout entries.
//!
//! A [`CsrEntry`] packs into three little-endian words `[value_lo, value_hi,
//! col]`; the row index is implicit in the enclosing row-pointer structure,
//! so the protected word is narrower than the coordinate form. The same
//! virtual-index construction applies at 96 bits: the column word carries
//! p1..p7 in bits 31..=25 and the overall-parity bit in bit 24 (physical
//! positions 95..=88), and the 88 data bits consume exactly the non-power-
//! of-two virtual indices 3..=95.
//!
//! Because the reserved region sits at the top of the bit walk, a data bit's
//! ordinal equals its physical position and location needs no discontinuity
//! shift, unlike the coordinate codec.

use std::sync::OnceLock;

use super::layout::{self, OVERALL_OFFSET, PARITY_GROUPS};
use super::{word_parity, EccCheck};
use crate::sparse::CsrEntry;

/// Number of protected physical bit positions per entry.
pub const ENTRY_BITS: u32 = 96;

/// Physical position of the overall-parity bit (bit 24 of the column word).
pub const OVERALL_BIT: u32 = 64 + OVERALL_OFFSET;

const WORDS: usize = 3;
const PARITY_WORD: usize = 2;

static MASKS: OnceLock<[[u32; WORDS]; PARITY_GROUPS]> = OnceLock::new();

pub(crate) fn parity_masks() -> &'static [[u32; WORDS]; PARITY_GROUPS] {
    MASKS.get_or_init(|| layout::derive_masks::<WORDS>(PARITY_WORD))
}

/// Computes the 7 Hamming parity bits over the entry as stored, packed into
/// bits 31..=25 of the result (group 1 at bit 31).
#[must_use]
pub fn syndrome(words: &[u32; 3]) -> u32 {
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

/// Overall parity of all 96 entry bits: 0 when even.
#[must_use]
pub fn overall_parity(words: &[u32; 3]) -> u32 {
    word_parity(words[0] ^ words[1] ^ words[2])
}

/// Computes and embeds the parity bits for `entry` in place. Insensitive to
/// prior parity-field contents, like the coordinate codec.
pub fn encode(entry: &mut CsrEntry) {
    let mut words = entry.to_words();
    words[PARITY_WORD] ^= syndrome(&words);
    let overall = overall_parity(&words);
    words[PARITY_WORD] ^= overall << OVERALL_OFFSET;
    *entry = CsrEntry::from_words(words);
}

/// Validates a stored entry against its parity bits. Same classification as
/// [`crate::ecc::coo::check`].
#[must_use]
pub fn check(entry: &CsrEntry) -> EccCheck {
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

/// Validates `entry` and corrects it in place when possible, returning the
/// pre-correction outcome.
pub fn repair(entry: &mut CsrEntry) -> EccCheck {
    let outcome = check(entry);
    if let EccCheck::CorrectableAt(bit) = outcome {
        flip_bit(entry, bit);
    }
    outcome
}

/// Maps a non-zero syndrome to the physical position of the flipped bit.
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
        // Parity bit p has virtual index 2^(p-1) and lives at physical 96 - p.
        return 64 + virt.leading_zeros();
    }
    // Data ordinal is physical position: the reserved region follows all
    // data bits in the walk.
    virt - (32 - virt.leading_zeros()) - 1
}

/// Flips one physical bit of the entry.
///
/// # Panics
///
/// Panics if `bit >= 96`.
pub fn flip_bit(entry: &mut CsrEntry, bit: u32) {
    assert!(bit < ENTRY_BITS, "bit {bit} outside 96-bit CSR entry");
    let mut words = entry.to_words();
    words[(bit / 32) as usize] ^= 1 << (bit % 32);
    *entry = CsrEntry::from_words(words);
}
