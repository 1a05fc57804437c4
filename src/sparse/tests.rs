//! Tests for sparse matrix storage and entry packing.

use super::*;

#[test]
fn test_coo_entry_word_layout() {
    let e = CooEntry::new(0x0012_3456, 0x789A_BCDE, f64::from_bits(0xDEAD_BEEF_0BAD_F00D));
    let words = e.to_words();
    assert_eq!(words[0], 0x0012_3456);
    assert_eq!(words[1], 0x789A_BCDE);
    assert_eq!(words[2], 0x0BAD_F00D);
    assert_eq!(words[3], 0xDEAD_BEEF);
    let back = CooEntry::from_words(words);
    assert_eq!(back.to_words(), words);
}

#[test]
fn test_csr_entry_word_layout() {
    let e = CsrEntry::new(f64::from_bits(0x0123_4567_89AB_CDEF), 0x00FE_DCBA);
    let words = e.to_words();
    assert_eq!(words[0], 0x89AB_CDEF);
    assert_eq!(words[1], 0x0123_4567);
    assert_eq!(words[2], 0x00FE_DCBA);
}

#[test]
fn test_column_index_masks_parity_bits() {
    let mut e = CooEntry::new(42, 0, 1.0);
    e.col |= 0xFF00_0000;
    assert_eq!(e.column_index(), 42);
}

#[test]
fn test_from_triplets_valid() {
    let m = CooMatrix::from_triplets(3, &[(1, 2, 4.5), (0, 0, -1.0)]).unwrap();
    assert_eq!(m.n(), 3);
    assert_eq!(m.nnz(), 2);
    assert_eq!(m.entry(0), CooEntry::new(2, 1, 4.5));
    assert_eq!(m.entry(1), CooEntry::new(0, 0, -1.0));
}

#[test]
fn test_from_triplets_rejects_out_of_range_entry() {
    let err = CooMatrix::from_triplets(3, &[(3, 0, 1.0)]).unwrap_err();
    assert!(matches!(err, BlindarError::InvalidMatrix { .. }));
    assert!(CooMatrix::from_triplets(3, &[(0, 3, 1.0)]).is_err());
}

#[test]
fn test_from_triplets_rejects_oversized_dimension() {
    let err = CooMatrix::from_triplets(MAX_DIMENSION + 1, &[]).unwrap_err();
    assert!(err.to_string().contains("24 bits"));
}

#[test]
fn test_set_entry_round_trips() {
    let mut m = CooMatrix::from_triplets(4, &[(0, 0, 0.0)]).unwrap();
    let e = CooEntry::new(3, 2, 9.75);
    m.set_entry(0, e);
    assert_eq!(m.entry(0), e);
}

#[test]
fn test_csr_new_valid() {
    let m = CsrMatrix::new(3, vec![0, 1, 1, 2], vec![0, 2], vec![1.0, 2.0]).unwrap();
    assert_eq!(m.nnz(), 2);
    assert_eq!(m.row_range(0), 0..1);
    assert_eq!(m.row_range(1), 1..1);
    assert_eq!(m.row_range(2), 1..2);
}

#[test]
fn test_csr_new_rejects_length_mismatch() {
    assert!(CsrMatrix::new(2, vec![0, 1, 2], vec![0], vec![1.0, 2.0]).is_err());
}

#[test]
fn test_csr_new_rejects_bad_row_ptr() {
    // Wrong length.
    assert!(CsrMatrix::new(2, vec![0, 2], vec![0, 1], vec![1.0, 2.0]).is_err());
    // Not monotone.
    assert!(CsrMatrix::new(2, vec![0, 2, 1], vec![0, 1], vec![1.0, 2.0]).is_err());
    // Doesn't end at nnz.
    assert!(CsrMatrix::new(2, vec![0, 1, 1], vec![0, 1], vec![1.0, 2.0]).is_err());
}

#[test]
fn test_csr_new_rejects_column_out_of_range() {
    let err = CsrMatrix::new(2, vec![0, 1, 2], vec![0, 5], vec![1.0, 2.0]).unwrap_err();
    assert!(err.to_string().contains("column index 5"));
}

#[test]
fn test_from_coo_sorts_by_row_then_column() {
    let coo = CooMatrix::from_triplets(
        3,
        &[(2, 0, 5.0), (0, 1, 1.0), (2, 2, 6.0), (0, 0, 0.5), (1, 1, 3.0)],
    )
    .unwrap();
    let csr = CsrMatrix::from_coo(&coo);

    assert_eq!(csr.row_ptr, vec![0, 2, 3, 5]);
    assert_eq!(csr.cols, vec![0, 1, 1, 0, 2]);
    assert_eq!(csr.values, vec![0.5, 1.0, 3.0, 5.0, 6.0]);
    assert_eq!(csr.entry(3), CsrEntry::new(5.0, 0));
}

#[test]
fn test_from_coo_empty() {
    let coo = CooMatrix::from_triplets(2, &[]).unwrap();
    let csr = CsrMatrix::from_coo(&coo);
    assert_eq!(csr.nnz(), 0);
    assert_eq!(csr.row_ptr, vec![0, 0, 0]);
}
