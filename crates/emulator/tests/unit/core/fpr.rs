//! FP/SIMD Register Bank Unit Tests.

use pretty_assertions::assert_eq;
use sw64_unaligned::core::arch::FpBank;

#[test]
fn scalar_access_uses_lane_zero() {
    let mut fp = FpBank::new();
    fp.write_simd_d(2, [1, 2, 3, 4]);
    fp.write(2, 9);
    assert_eq!(fp.read(2), 9);
    assert_eq!(fp.read_simd_d(2), [9, 2, 3, 4]);
}

#[test]
fn simd_s_preserves_upper_lanes() {
    let mut fp = FpBank::new();
    fp.write_simd_d(5, [1, 2, 3, 4]);
    fp.write_simd_s(5, 10, 20);
    assert_eq!(fp.read_simd_s(5), [10, 20]);
    assert_eq!(fp.read_simd_d(5), [10, 20, 3, 4]);
}

#[test]
fn ldwe_broadcasts_to_every_word_slot() {
    let mut fp = FpBank::new();
    fp.write_simd_ldwe(1, 0xdead_beef);
    assert_eq!(fp.read_simd_d(1), [0xdead_beef_dead_beef; 4]);
}
