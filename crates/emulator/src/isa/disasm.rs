//! Memory-instruction disassembler.
//!
//! Converts SW64 memory-format instruction words and decoded accesses into
//! human-readable text for the unaligned-trap notice and die reports.
//!
//! # Usage
//!
//! ```
//! use sw64_unaligned::isa::disasm::disassemble;
//! use sw64_unaligned::isa::instruction::encode_mem;
//! use sw64_unaligned::isa::opcodes::OP_LDW;
//!
//! let text = disassemble(encode_mem(OP_LDW, 1, 16, 3));
//! assert_eq!(text, "ldw t0, 3(a0)");
//! ```

use crate::isa::abi::reg_name;
use crate::isa::decode::{AccessDescriptor, MemOp, USER_SCALAR_TABLE, USER_VECTOR_TABLE};
use crate::isa::instruction::InstructionBits;

/// Formats the data-register operand of `op`.
fn operand(op: &MemOp, reg: usize) -> String {
    if op.is_vector() {
        format!("$v{reg}")
    } else if op.is_float() {
        format!("$f{reg}")
    } else {
        reg_name(reg).to_string()
    }
}

/// Disassembles a 32-bit memory-format instruction.
///
/// Returns a string like `"fldd $f3, -8(sp)"`, or `"unknown"` for opcodes
/// the emulator does not recognise.
///
/// # Arguments
///
/// * `inst` - The raw 32-bit instruction encoding.
pub fn disassemble(inst: u32) -> String {
    let major = inst.major_opcode();
    let Some(op) = USER_VECTOR_TABLE
        .lookup(major)
        .or_else(|| USER_SCALAR_TABLE.lookup(major))
    else {
        return "unknown".to_string();
    };
    format!(
        "{} {}, {}({})",
        op.mnemonic,
        operand(op, inst.ra()),
        inst.disp(),
        reg_name(inst.rb())
    )
}

/// Describes a decoded access for logs, e.g. `"stw t3 -> 0x...1001"`.
pub fn describe(desc: &AccessDescriptor) -> String {
    let arrow = if desc.op.is_load() { "<-" } else { "->" };
    format!(
        "{} {} {arrow} {}",
        desc.op.mnemonic,
        operand(&desc.op, desc.reg),
        desc.addr
    )
}
