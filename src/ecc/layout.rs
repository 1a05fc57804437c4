//! Parity-group mask derivation for the extended Hamming construction.
//!
//! Rather than carrying opaque constant tables, the bit-subset masks are
//! derived from first principles by the virtual-index walk below and cached
//! once per process. A unit test pins the derived COO masks against the
//! known-good constants of the construction.

/// Number of Hamming parity groups per entry.
pub(crate) const PARITY_GROUPS: usize = 7;

/// Width of the reserved region at the top of the parity word: 7 Hamming
/// parity bits plus the overall-parity bit.
pub(crate) const RESERVED_WIDTH: u32 = 8;

/// Bit offset of the overall-parity bit within the parity word.
pub(crate) const OVERALL_OFFSET: u32 = 32 - RESERVED_WIDTH;

/// Derives the parity-group masks for an entry of `W` little-endian 32-bit
/// words whose word `parity_word` carries the reserved region in its high
/// [`RESERVED_WIDTH`] bits.
///
/// The construction walks all physical bit positions in order. Reserved
/// positions are excluded from the virtual-index sequence; the storage bit
/// for group `p` (offset `32 - p` within the parity word) is instead made
/// the sole reserved member of its own group, which is what makes the code
/// self-canceling under re-encoding. Every other position consumes the next
/// virtual index, starting at 3 and skipping exact powers of two (reserved
/// for parity bits in the classical Hamming numbering). A data bit belongs
/// to group `p` exactly when bit `p - 1` of its virtual index is set.
pub(crate) fn derive_masks<const W: usize>(parity_word: usize) -> [[u32; W]; PARITY_GROUPS] {
    let reserved_lo = parity_word as u32 * 32 + OVERALL_OFFSET;
    let reserved_hi = parity_word as u32 * 32 + 32;

    let mut masks = [[0u32; W]; PARITY_GROUPS];
    for p in 1..=PARITY_GROUPS as u32 {
        let mut x: u32 = 3;
        for w in 0..W {
            let mut mask = 0u32;
            for b in 0..32u32 {
                if x.is_power_of_two() {
                    x += 1;
                }
                let bit = w as u32 * 32 + b;
                if (reserved_lo..reserved_hi).contains(&bit) {
                    if 32 - b == p {
                        mask |= 1 << b;
                    }
                } else {
                    if x & (1 << (p - 1)) != 0 {
                        mask |= 1 << b;
                    }
                    x += 1;
                }
            }
            masks[(p - 1) as usize][w] = mask;
        }
    }
    masks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masks_disjoint_from_overall_bit() {
        // The overall-parity position belongs to no Hamming group in either
        // layout; a flip there must yield a zero syndrome.
        let coo = derive_masks::<4>(0);
        for group in &coo {
            assert_eq!(group[0] & (1 << OVERALL_OFFSET), 0);
        }
        let csr = derive_masks::<3>(2);
        for group in &csr {
            assert_eq!(group[2] & (1 << OVERALL_OFFSET), 0);
        }
    }

    #[test]
    fn test_each_parity_bit_in_own_group_only() {
        let coo = derive_masks::<4>(0);
        for (idx, group) in coo.iter().enumerate() {
            let p = idx as u32 + 1;
            let storage = 1u32 << (32 - p);
            assert_eq!(group[0] & storage, storage, "group {p} misses its storage bit");
            for (other_idx, other) in coo.iter().enumerate() {
                if other_idx != idx {
                    assert_eq!(other[0] & storage, 0, "storage bit of group {p} leaked");
                }
            }
        }
    }
}
