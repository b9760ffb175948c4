//! Instruction word field extraction.
//!
//! Provides bit extraction for the SW64 memory instruction format:
//!
//! ```text
//!  31    26 25  21 20  16 15                0
//! +--------+------+------+-------------------+
//! | opcode |  ra  |  rb  |   displacement    |
//! +--------+------+------+-------------------+
//! ```

use crate::common::constants::{OPCODE_MASK, OPCODE_SHIFT};

/// Bit mask for a 5-bit register field.
pub const REG_MASK: u32 = 0x1F;
/// Shift of the `ra` (data register) field.
pub const RA_SHIFT: u32 = 21;
/// Shift of the `rb` (base register) field.
pub const RB_SHIFT: u32 = 16;
/// Bit mask for the 16-bit displacement field.
pub const DISP_MASK: u32 = 0xFFFF;

/// Trait for extracting memory-format fields from encoded instructions.
pub trait InstructionBits {
    /// Extracts the 6-bit major opcode (bits 31-26).
    fn major_opcode(&self) -> u32;

    /// Extracts the data register field (bits 25-21).
    fn ra(&self) -> usize;

    /// Extracts the base register field (bits 20-16).
    fn rb(&self) -> usize;

    /// Extracts the displacement (bits 15-0), sign-extended.
    fn disp(&self) -> i64;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn major_opcode(&self) -> u32 {
        (self >> OPCODE_SHIFT) & OPCODE_MASK
    }

    #[inline(always)]
    fn ra(&self) -> usize {
        ((self >> RA_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rb(&self) -> usize {
        ((self >> RB_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn disp(&self) -> i64 {
        i64::from((self & DISP_MASK) as u16 as i16)
    }
}

/// Encodes a memory-format instruction word.
///
/// # Arguments
///
/// * `opcode` - 6-bit major opcode.
/// * `ra` - Data register.
/// * `rb` - Base register.
/// * `disp` - Signed 16-bit displacement.
///
/// # Returns
///
/// The 32-bit instruction word.
pub const fn encode_mem(opcode: u32, ra: usize, rb: usize, disp: i16) -> u32 {
    ((opcode & OPCODE_MASK) << OPCODE_SHIFT)
        | (((ra as u32) & REG_MASK) << RA_SHIFT)
        | (((rb as u32) & REG_MASK) << RB_SHIFT)
        | ((disp as u16) as u32)
}
