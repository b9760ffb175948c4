//! End-to-End Scenarios.
//!
//! Multi-trap sequences: a value stored through one unaligned trap and read
//! back through another, and a task whose policy changes between traps.

use pretty_assertions::assert_eq;
use sw64_unaligned::common::{AccessType, RegisterAccess, SigCode, Width};
use sw64_unaligned::core::arch::UserContext;
use sw64_unaligned::core::units::fpu::s_mem_to_reg;
use sw64_unaligned::isa::instruction::encode_mem;
use sw64_unaligned::isa::opcodes::*;
use sw64_unaligned::kernel::UacFlags;
use sw64_unaligned::trap::Disposition;

use crate::common::harness::{DATA, TEXT, UserFixture};

const ONE: u32 = 0x3f80_0000;

fn rearm(f: &mut UserFixture) {
    let fp = f.ctx.fp.clone();
    f.ctx = UserContext::with_pc(TEXT + 4);
    f.ctx.fp = fp;
}

#[test]
fn float_store_then_load_round_trips() {
    let mut f = UserFixture::new();
    let va = DATA + 0x1001;
    f.ctx.fp.write(1, s_mem_to_reg(ONE));

    // Store side: one byte store per byte of the word.
    let out = f.run(encode_mem(OP_FSTS, 1, 16, 1), va, OP_FSTS, 1);
    assert_eq!(out, Disposition::Resume);
    let writes = f.mem.data_accesses();
    assert_eq!(writes.len(), 4);
    assert!(writes.iter().all(|a| a.kind == AccessType::Write && a.width == Width::Byte));
    assert_eq!(f.peek(va, 4), ONE.to_le_bytes().to_vec());

    // Load side: two aligned word loads.
    rearm(&mut f);
    let out = f.run(encode_mem(OP_FLDS, 2, 16, 1), va, OP_FLDS, 2);
    assert_eq!(out, Disposition::Resume);
    let reads = f.mem.data_accesses();
    assert_eq!(reads.len(), 2);
    assert!(reads.iter().all(|a| a.width == Width::Word && a.addr.is_aligned(4)));
    assert_eq!(f.ctx.fp.read(2), s_mem_to_reg(ONE));

    assert_eq!(f.emu.stats().user.count(), 2);
}

#[test]
fn integer_store_then_load_round_trips() {
    let mut f = UserFixture::new();
    let va = DATA + 0x1102;
    f.ctx.write_reg(3, 0xffff_ffff_9abc_def0);

    assert_eq!(f.run(encode_mem(OP_STW, 3, 16, 2), va, OP_STW, 3), Disposition::Resume);
    assert_eq!(f.mem.count(AccessType::Write), 4);

    rearm(&mut f);
    assert_eq!(f.run(encode_mem(OP_LDW, 4, 16, 2), va, OP_LDW, 4), Disposition::Resume);
    assert_eq!(f.mem.count(AccessType::Read), 2);
    assert_eq!(f.ctx.read_reg(4), 0xffff_ffff_9abc_def0);
}

#[test]
fn policy_change_between_traps() {
    let mut f = UserFixture::new();
    f.poke(DATA + 0x1203, &7u64.to_le_bytes());
    let ldl = encode_mem(OP_LDL, 1, 16, 3);

    f.task.set_uac(UacFlags::SIGBUS);
    let Disposition::Signal(info) = f.run(ldl, DATA + 0x1203, OP_LDL, 1) else {
        panic!("expected a signal");
    };
    assert_eq!(info.code, SigCode::AdrAln);
    assert_eq!(f.ctx.regs.pc(), TEXT);

    // The handler re-executes the instruction after clearing the flag.
    f.task.set_uac(UacFlags::empty());
    rearm(&mut f);
    assert_eq!(f.run(ldl, DATA + 0x1203, OP_LDL, 1), Disposition::Resume);
    assert_eq!(f.ctx.read_reg(1), 7);

    assert_eq!(f.task.take_signals().len(), 1);
    assert_eq!(f.emu.stats().alignment_faults(), 2);
    assert_eq!(f.emu.stats().user.count(), 1);
}
