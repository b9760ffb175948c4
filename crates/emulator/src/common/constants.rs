//! Global Architecture Constants.
//!
//! This module defines constants shared by the trap handlers. It includes:
//! 1. **Memory Constants:** Page geometry and the user/kernel address-space boundary.
//! 2. **Instruction Constants:** Instruction size and the major-opcode field position.
//! 3. **Register Constants:** Indices of registers with special roles in trap handling.
//! 4. **Errno Constants:** Values written into fix-up error registers.

/// Page size in bytes (8 KiB on SW64).
pub const PAGE_SIZE: u64 = 8192;

/// Mask for extracting the page offset from an address.
pub const PAGE_OFFSET_MASK: u64 = PAGE_SIZE - 1;

/// Default size of the user portion of the address space.
///
/// Addresses at or above this boundary can never be mapped for a user task.
pub const DEFAULT_TASK_SIZE: u64 = 0x0000_0400_0000_0000;

/// Size of every SW64 instruction in bytes.
pub const INSTRUCTION_SIZE: u64 = 4;

/// Bit position of the 6-bit major opcode in an instruction word.
pub const OPCODE_SHIFT: u32 = 26;

/// Mask for the major opcode after shifting.
pub const OPCODE_MASK: u32 = 0x3F;

/// Number of distinct major opcodes.
pub const OPCODE_COUNT: usize = 64;

/// Number of integer (and floating-point) architectural registers.
pub const NUM_REGS: usize = 32;

/// Return-address register (`ra`).
pub const REG_RA: usize = 26;

/// Global pointer register (`gp`).
pub const REG_GP: usize = 29;

/// Stack pointer register (`sp`); the user copy lives in the task's usp.
pub const REG_SP: usize = 30;

/// Hardwired zero register.
pub const REG_ZERO: usize = 31;

/// `EFAULT` errno; fix-up error registers receive its negation.
pub const EFAULT: i64 = 14;
