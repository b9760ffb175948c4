//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the parts of the SW64 ISA the unaligned-access emulator needs:
//! memory-instruction opcodes, instruction-word fields, the decode tables that
//! map opcodes to memory operations, and a small disassembler for diagnostics.

/// Application Binary Interface (ABI) register names.
pub mod abi;

/// Opcode-to-operation decode tables.
pub mod decode;

/// Memory-instruction disassembler for logs and die reports.
pub mod disasm;

/// Instruction-word field extraction and encoding.
pub mod instruction;

/// Memory-instruction major opcodes.
pub mod opcodes;

pub use decode::{
    AccessDescriptor, AccessKind, DecodeTable, Direction, MemOp, decode_kernel, decode_user,
};
