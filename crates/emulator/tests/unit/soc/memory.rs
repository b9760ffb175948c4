//! Sparse Memory Unit Tests.
//!
//! Verifies region mapping, primitive access checks (alignment, mapping,
//! permissions) and the permission-free setup accessors.

use pretty_assertions::assert_eq;
use rstest::rstest;
use sw64_unaligned::common::{AccessType, FaultKind, MapError, Perms, VirtAddr, Width};
use sw64_unaligned::soc::{GuestMemory, SparseMemory};

const BASE: u64 = 0x8000;

fn mem() -> SparseMemory {
    let mut m = SparseMemory::new();
    m.map(VirtAddr::new(BASE), 0x100, Perms::RW).unwrap();
    m.map(VirtAddr::new(BASE + 0x100), 0x100, Perms::RX).unwrap();
    m
}

fn va(off: u64) -> VirtAddr {
    VirtAddr::new(BASE + off)
}

// ══════════════════════════════════════════════════════════
// 1. Mapping
// ══════════════════════════════════════════════════════════

#[test]
fn map_rejects_overlap_and_empty() {
    let mut m = mem();
    assert!(matches!(
        m.map(va(0xf0), 0x20, Perms::RW),
        Err(MapError::Overlap { .. })
    ));
    assert!(matches!(m.map(va(0x1000), 0, Perms::RW), Err(MapError::Empty { .. })));
    assert!(matches!(
        m.map(VirtAddr::new(u64::MAX - 7), 16, Perms::RW),
        Err(MapError::Empty { .. })
    ));
    m.map(va(0x200), 0x10, Perms::READ).unwrap();
}

#[test]
fn new_mappings_are_zeroed() {
    assert_eq!(mem().peek(va(0x10), 4), Some(vec![0; 4]));
}

// ══════════════════════════════════════════════════════════
// 2. Primitive access
// ══════════════════════════════════════════════════════════

#[test]
fn little_endian_load_store() {
    let mut m = mem();
    m.store(va(8), Width::Long, 0x0102_0304_0506_0708).unwrap();
    assert_eq!(m.peek(va(8), 2), Some(vec![0x08, 0x07]));
    assert_eq!(m.load(va(8), Width::Word, AccessType::Read).unwrap(), 0x0506_0708);
    assert_eq!(m.load(va(14), Width::Half, AccessType::Read).unwrap(), 0x0102);
    m.write_u8(va(9), 0xff).unwrap();
    assert_eq!(m.read_u64(va(8)).unwrap(), 0x0102_0304_0506_ff08);
}

#[rstest]
#[case(1, Width::Half)]
#[case(2, Width::Word)]
#[case(4, Width::Long)]
#[case(0, Width::Vec2)]
fn misaligned_primitives_fault(#[case] off: u64, #[case] width: Width) {
    let fault = mem().load(va(off), width, AccessType::Read).unwrap_err();
    assert_eq!(fault.kind, FaultKind::Misaligned);
    assert_eq!((fault.addr, fault.width), (va(off), width));
}

#[test]
fn unmapped_access_faults() {
    let mut m = mem();
    let fault = m.load(va(0x200), Width::Long, AccessType::Read).unwrap_err();
    assert_eq!(fault.kind, FaultKind::NotMapped);
    let fault = m.store(VirtAddr::new(BASE - 8), Width::Long, 0).unwrap_err();
    assert_eq!(fault.kind, FaultKind::NotMapped);
    assert_eq!(fault.access, AccessType::Write);
}

#[test]
fn permissions_are_enforced() {
    let mut m = mem();
    assert!(m.fetch_insn(va(0x100)).is_ok());
    assert_eq!(
        m.fetch_insn(va(0)).unwrap_err().kind,
        FaultKind::Protection
    );
    assert_eq!(
        m.store(va(0x100), Width::Word, 1).unwrap_err().kind,
        FaultKind::Protection
    );

    assert!(m.protect(va(0), Perms::READ));
    assert_eq!(
        m.write_u8(va(3), 1).unwrap_err().kind,
        FaultKind::Protection
    );
    assert!(!m.protect(va(4), Perms::RW));
}

#[test]
fn accesses_never_straddle_regions() {
    let mut m = mem();
    // Word loads stay within one region even at the boundary.
    assert!(m.load(va(0xfc), Width::Word, AccessType::Read).is_ok());
    assert!(m.load(va(0x100), Width::Word, AccessType::Read).is_ok());
}

// ══════════════════════════════════════════════════════════
// 3. Setup access
// ══════════════════════════════════════════════════════════

#[test]
fn poke_ignores_permissions_but_not_mapping() {
    let mut m = mem();
    assert!(m.poke(va(0x100), &[0xaa, 0xbb]));
    assert_eq!(m.peek(va(0x100), 2), Some(vec![0xaa, 0xbb]));
    // Spans both regions.
    assert!(m.poke(va(0xff), &[1, 2]));
    assert_eq!(m.peek(va(0xff), 2), Some(vec![1, 2]));

    assert!(!m.poke(va(0x1ff), &[9, 9]));
    assert_eq!(m.peek(va(0x1ff), 1), Some(vec![0]));
    assert_eq!(m.peek(va(0x1ff), 2), None);
}
