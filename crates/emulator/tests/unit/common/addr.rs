//! Address Arithmetic Unit Tests.
//!
//! Verifies the alignment helpers of `VirtAddr` and the size tables of `Width`.

use pretty_assertions::assert_eq;
use rstest::rstest;
use sw64_unaligned::common::{VirtAddr, Width};

// ══════════════════════════════════════════════════════════
// 1. Alignment
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(0x1003, 4, 0x1000, 3)]
#[case(0x1007, 8, 0x1000, 7)]
#[case(0x1008, 8, 0x1008, 0)]
#[case(0x1001, 2, 0x1000, 1)]
#[case(0x100f, 16, 0x1000, 15)]
fn align_down_and_offset(
    #[case] addr: u64,
    #[case] unit: u64,
    #[case] floor: u64,
    #[case] offset: u64,
) {
    let va = VirtAddr::new(addr);
    assert_eq!(va.align_down(unit), VirtAddr::new(floor));
    assert_eq!(va.offset_in(unit), offset);
    assert_eq!(va.is_aligned(unit), offset == 0);
}

#[test]
fn add_wraps_at_top_of_address_space() {
    assert_eq!(VirtAddr::new(u64::MAX).add(2), VirtAddr::new(1));
}

#[test]
fn page_offset_uses_8k_pages() {
    assert_eq!(VirtAddr::new(0x1_2345).page_offset(), 0x345);
    assert_eq!(VirtAddr::new(0x1_3345).page_offset(), 0x1345);
}

#[test]
fn display_is_zero_padded_hex() {
    assert_eq!(VirtAddr::new(0x1001).to_string(), "0x0000000000001001");
}

// ══════════════════════════════════════════════════════════
// 2. Widths
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(Width::Byte, 1, 1, true)]
#[case(Width::Half, 2, 1, true)]
#[case(Width::Word, 4, 1, true)]
#[case(Width::Long, 8, 1, true)]
#[case(Width::Vec2, 16, 2, false)]
#[case(Width::Vec4, 32, 4, false)]
fn width_tables(
    #[case] width: Width,
    #[case] bytes: u64,
    #[case] lanes: usize,
    #[case] primitive: bool,
) {
    assert_eq!(width.bytes(), bytes);
    assert_eq!(width.bits(), (bytes * 8) as u32);
    assert_eq!(width.lanes(), lanes);
    assert_eq!(width.is_primitive(), primitive);
}

#[test]
fn width_masks() {
    assert_eq!(Width::Half.mask(), 0xffff);
    assert_eq!(Width::Word.mask(), 0xffff_ffff);
    assert_eq!(Width::Long.mask(), u64::MAX);
}
