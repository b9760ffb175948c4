//! Decode Table Unit Tests.
//!
//! Every table must be total over the 64 opcodes: each opcode either decodes
//! to an operation whose width and register class are fixed by the opcode, or
//! is rejected as unsupported.

use pretty_assertions::assert_eq;
use rstest::rstest;
use sw64_unaligned::common::{EmulationError, VirtAddr, Width};
use sw64_unaligned::isa::decode::{KERNEL_TABLE, USER_SCALAR_TABLE, USER_VECTOR_TABLE};
use sw64_unaligned::isa::instruction::encode_mem;
use sw64_unaligned::isa::opcodes::*;
use sw64_unaligned::isa::{AccessKind, Direction, decode_kernel, decode_user};

const VA: VirtAddr = VirtAddr::new(0x1001);

/// Instruction word whose major opcode selects no vector operation.
fn scalar_insn(opcode: u32) -> u32 {
    encode_mem(opcode, 1, 2, 0)
}

// ══════════════════════════════════════════════════════════
// 1. Totality
// ══════════════════════════════════════════════════════════

#[test]
fn kernel_table_is_total() {
    let supported = [OP_LDHU, OP_LDW, OP_LDL, OP_STH, OP_STW, OP_STL];
    for opcode in 0..64 {
        let result = decode_kernel(opcode, 1, VA);
        if supported.contains(&opcode) {
            let desc = result.unwrap();
            assert!(!desc.is_float() && !desc.is_vector(), "{opcode:#x}");
        } else {
            assert_eq!(result, Err(EmulationError::Unsupported { opcode, reg: 1 }));
        }
    }
}

#[test]
fn user_scalar_table_is_total() {
    for opcode in 0..64 {
        let populated = USER_SCALAR_TABLE.lookup(opcode).is_some();
        let vector = USER_VECTOR_TABLE.lookup(opcode).is_some();
        let result = decode_user(opcode, scalar_insn(opcode), 3, VA);
        assert_eq!(result.is_ok(), populated || vector, "{opcode:#x}");
        if let Err(err) = result {
            assert_eq!(err, EmulationError::Unsupported { opcode, reg: 3 });
        }
    }
}

#[test]
fn out_of_range_opcodes_and_registers_are_rejected() {
    assert!(KERNEL_TABLE.lookup(64).is_none());
    assert!(decode_kernel(OP_LDW, 32, VA).is_err());
    assert!(decode_user(OP_LDW, scalar_insn(OP_LDW), 40, VA).is_err());
}

#[test]
fn kernel_rejects_gp_but_user_accepts_it() {
    for opcode in [OP_LDHU, OP_LDW, OP_LDL, OP_STH, OP_STW, OP_STL] {
        assert_eq!(
            decode_kernel(opcode, 29, VA),
            Err(EmulationError::Unsupported { opcode, reg: 29 })
        );
        assert!(decode_kernel(opcode, 28, VA).is_ok());
    }
    assert!(decode_user(OP_LDW, scalar_insn(OP_LDW), 29, VA).is_ok());
}

#[test]
fn table_sizes() {
    assert_eq!(KERNEL_TABLE.iter().count(), 6);
    assert_eq!(USER_SCALAR_TABLE.iter().count(), 10);
    assert_eq!(USER_VECTOR_TABLE.iter().count(), 7);
    assert_eq!(KERNEL_TABLE.name(), "kernel");
}

// ══════════════════════════════════════════════════════════
// 2. Operation shapes
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(OP_LDHU, "ldhu", Direction::Load, Width::Half, AccessKind::Int { sign_extend: false })]
#[case(OP_LDW, "ldw", Direction::Load, Width::Word, AccessKind::Int { sign_extend: true })]
#[case(OP_LDL, "ldl", Direction::Load, Width::Long, AccessKind::Int { sign_extend: false })]
#[case(OP_FLDS, "flds", Direction::Load, Width::Word, AccessKind::FloatSingle)]
#[case(OP_FLDD, "fldd", Direction::Load, Width::Long, AccessKind::FloatDouble)]
#[case(OP_STH, "sth", Direction::Store, Width::Half, AccessKind::Int { sign_extend: false })]
#[case(OP_STW, "stw", Direction::Store, Width::Word, AccessKind::Int { sign_extend: false })]
#[case(OP_STL, "stl", Direction::Store, Width::Long, AccessKind::Int { sign_extend: false })]
#[case(OP_FSTS, "fsts", Direction::Store, Width::Word, AccessKind::FloatSingle)]
#[case(OP_FSTD, "fstd", Direction::Store, Width::Long, AccessKind::FloatDouble)]
fn user_scalar_shapes(
    #[case] opcode: u32,
    #[case] mnemonic: &str,
    #[case] direction: Direction,
    #[case] width: Width,
    #[case] kind: AccessKind,
) {
    let desc = decode_user(opcode, scalar_insn(opcode), 4, VA).unwrap();
    assert_eq!(desc.op.mnemonic, mnemonic);
    assert_eq!(desc.op.direction, direction);
    assert_eq!(desc.op.width, width);
    assert_eq!(desc.op.kind, kind);
    assert_eq!((desc.reg, desc.addr, desc.opcode), (4, VA, opcode));
}

#[rstest]
#[case(OP_LDWE, Width::Word, AccessKind::WordBroadcast, true)]
#[case(OP_LDSE, Width::Word, AccessKind::Replicate, true)]
#[case(OP_LDDE, Width::Long, AccessKind::Replicate, true)]
#[case(OP_VLDS, Width::Vec2, AccessKind::Vector, true)]
#[case(OP_VLDD, Width::Vec4, AccessKind::Vector, true)]
#[case(OP_VSTS, Width::Vec2, AccessKind::Vector, false)]
#[case(OP_VSTD, Width::Vec4, AccessKind::Vector, false)]
fn vector_ops_come_from_instruction_word(
    #[case] major: u32,
    #[case] width: Width,
    #[case] kind: AccessKind,
    #[case] load: bool,
) {
    // The trap's opcode is irrelevant once the instruction names a vector op.
    let desc = decode_user(OP_LDL, encode_mem(major, 5, 6, 0), 5, VA).unwrap();
    assert_eq!(desc.op.width, width);
    assert_eq!(desc.op.kind, kind);
    assert_eq!(desc.op.is_load(), load);
    assert!(desc.is_vector() && desc.is_float());
    assert_eq!(desc.opcode, major);
}

#[test]
fn kernel_rejects_float_opcodes() {
    for opcode in [OP_FLDS, OP_FLDD, OP_FSTS, OP_FSTD, OP_VLDS] {
        assert!(decode_kernel(opcode, 0, VA).is_err(), "{opcode:#x}");
    }
}

#[test]
fn byte_opcodes_are_never_emulated() {
    assert!(decode_kernel(OP_LDBU, 0, VA).is_err());
    assert!(decode_user(OP_STB, scalar_insn(OP_STB), 0, VA).is_err());
}
