//! Exception Table Unit Tests.

use pretty_assertions::assert_eq;
use sw64_unaligned::common::RegisterAccess;
use sw64_unaligned::core::arch::AllRegs;
use sw64_unaligned::kernel::{
    ExceptionTable, ExceptionTableEntry, ExceptionTableSearch, fixup_exception,
};

const EFAULT: u64 = (-14i64) as u64;

fn table() -> ExceptionTable {
    [
        ExceptionTableEntry::new(0x3000, 0x3100),
        ExceptionTableEntry::new(0x1000, 0x1100).with_valreg(1),
        ExceptionTableEntry::new(0x2000, 0x2100).with_errreg(2),
    ]
    .into_iter()
    .collect()
}

#[test]
fn search_exact_instruction() {
    let t = table();
    assert_eq!(t.len(), 3);
    assert_eq!(t.search(0x2000).map(|e| e.continuation), Some(0x2100));
    assert_eq!(t.search(0x1000).and_then(|e| e.valreg), Some(1));
    assert!(t.search(0x2004).is_none());
    assert!(ExceptionTable::new().search(0x1000).is_none());
}

#[test]
fn insert_replaces_same_instruction() {
    let mut t = table();
    t.insert(ExceptionTableEntry::new(0x2000, 0x2200));
    assert_eq!(t.len(), 3);
    assert_eq!(t.search(0x2000).map(|e| e.continuation), Some(0x2200));
}

#[test]
fn fixup_sets_value_and_error_registers() {
    let mut regs = AllRegs::with_pc(0x1004);
    regs.write_reg(3, 0xdead);
    regs.write_reg(16, 0xbeef);
    let entry = ExceptionTableEntry::new(0x1000, 0x1800)
        .with_valreg(3)
        .with_errreg(16);

    assert_eq!(fixup_exception(&mut regs, &entry, 0x1000), 0x1800);
    assert_eq!(regs.read_reg(3), 0);
    assert_eq!(regs.a0, EFAULT);
    // The caller owns the pc update.
    assert_eq!(regs.pc, 0x1004);
}

#[test]
fn fixup_without_registers_only_redirects() {
    let mut regs = AllRegs::with_pc(0x1004);
    regs.write_reg(1, 7);
    let before = regs.clone();
    let entry = ExceptionTableEntry::new(0x1000, 0x1800);
    assert_eq!(fixup_exception(&mut regs, &entry, 0x1000), 0x1800);
    assert_eq!(regs, before);
}

#[test]
fn fixup_ignores_out_of_range_registers() {
    let mut regs = AllRegs::with_pc(0x1004);
    regs.write_reg(5, 9);
    let before = regs.clone();
    let entry = ExceptionTableEntry::new(0x1000, 0x1800)
        .with_valreg(40)
        .with_errreg(32);
    assert_eq!(fixup_exception(&mut regs, &entry, 0x1000), 0x1800);
    assert_eq!(regs, before);
}
