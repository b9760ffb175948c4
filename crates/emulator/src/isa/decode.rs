//! Memory-instruction decode tables.
//!
//! Maps a 6-bit major opcode to the memory operation the emulator must
//! reproduce. Three tables exist, each total over all 64 opcodes:
//!
//! 1. **Kernel:** Integer loads and stores of 2, 4 and 8 bytes only.
//! 2. **User scalar:** The kernel set plus S-float and T-float loads and stores.
//! 3. **User vector:** SIMD loads and stores, selected by the major opcode of the
//!    re-fetched instruction word and consulted before the scalar table.
//!
//! An opcode with no entry decodes to [`EmulationError::Unsupported`].

use std::fmt;

use crate::common::constants::{NUM_REGS, OPCODE_COUNT, OPCODE_MASK, REG_GP};
use crate::common::{EmulationError, VirtAddr, Width};
use crate::isa::instruction::InstructionBits;
use crate::isa::opcodes::*;

/// Direction of a memory operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Memory to register.
    Load,
    /// Register to memory.
    Store,
}

/// How the transferred bytes relate to the register file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessKind {
    /// Integer register; narrow loads optionally sign-extend.
    Int {
        /// Sign-extend the loaded value to 64 bits.
        sign_extend: bool,
    },
    /// S-float register; the value is converted between memory and register layout.
    FloatSingle,
    /// T-float register; the value is moved unchanged.
    FloatDouble,
    /// Vector register, one 8-byte lane per quadword of memory.
    Vector,
    /// Vector register filled with copies of one scalar.
    Replicate,
    /// Vector register with one word broadcast to every word slot.
    WordBroadcast,
}

/// A decoded memory operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MemOp {
    /// Assembler mnemonic.
    pub mnemonic: &'static str,
    /// Load or store.
    pub direction: Direction,
    /// Bytes transferred to or from memory.
    pub width: Width,
    /// Register-file interpretation.
    pub kind: AccessKind,
}

impl MemOp {
    const fn new(mnemonic: &'static str, direction: Direction, width: Width, kind: AccessKind) -> Self {
        Self {
            mnemonic,
            direction,
            width,
            kind,
        }
    }

    const fn int_load(mnemonic: &'static str, width: Width, sign_extend: bool) -> Self {
        Self::new(mnemonic, Direction::Load, width, AccessKind::Int { sign_extend })
    }

    const fn int_store(mnemonic: &'static str, width: Width) -> Self {
        Self::new(
            mnemonic,
            Direction::Store,
            width,
            AccessKind::Int { sign_extend: false },
        )
    }

    /// Returns `true` for loads.
    #[inline]
    pub const fn is_load(&self) -> bool {
        matches!(self.direction, Direction::Load)
    }

    /// Returns `true` if the register operand lives in the floating-point bank.
    #[inline]
    pub const fn is_float(&self) -> bool {
        !matches!(self.kind, AccessKind::Int { .. })
    }

    /// Returns `true` if the register operand is a multi-lane vector.
    #[inline]
    pub const fn is_vector(&self) -> bool {
        matches!(
            self.kind,
            AccessKind::Vector | AccessKind::Replicate | AccessKind::WordBroadcast
        )
    }
}

impl fmt::Display for MemOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic)
    }
}

/// A total opcode-to-operation table.
#[derive(Debug)]
pub struct DecodeTable {
    name: &'static str,
    entries: [Option<MemOp>; OPCODE_COUNT],
}

impl DecodeTable {
    const fn empty(name: &'static str) -> Self {
        Self {
            name,
            entries: [None; OPCODE_COUNT],
        }
    }

    const fn with(mut self, opcode: u32, op: MemOp) -> Self {
        self.entries[opcode as usize] = Some(op);
        self
    }

    /// Name of the table, for diagnostics.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Looks up an opcode. Only the low 6 bits are significant when `opcode`
    /// is below 64; anything larger has no entry.
    ///
    /// # Returns
    ///
    /// The operation, or `None` for an opcode outside the table's domain.
    pub const fn lookup(&self, opcode: u32) -> Option<&MemOp> {
        if opcode > OPCODE_MASK {
            return None;
        }
        self.entries[opcode as usize].as_ref()
    }

    /// Iterates over the populated entries as `(opcode, op)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &MemOp)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(opc, op)| op.as_ref().map(|op| (opc as u32, op)))
    }
}

/// Operations the kernel-mode handler emulates.
pub static KERNEL_TABLE: DecodeTable = DecodeTable::empty("kernel")
    .with(OP_LDHU, MemOp::int_load("ldhu", Width::Half, false))
    .with(OP_LDW, MemOp::int_load("ldw", Width::Word, true))
    .with(OP_LDL, MemOp::int_load("ldl", Width::Long, false))
    .with(OP_STH, MemOp::int_store("sth", Width::Half))
    .with(OP_STW, MemOp::int_store("stw", Width::Word))
    .with(OP_STL, MemOp::int_store("stl", Width::Long));

/// Scalar operations the user-mode handler emulates, keyed by the trap's opcode.
pub static USER_SCALAR_TABLE: DecodeTable = DecodeTable::empty("user-scalar")
    .with(OP_LDHU, MemOp::int_load("ldhu", Width::Half, false))
    .with(OP_LDW, MemOp::int_load("ldw", Width::Word, true))
    .with(OP_LDL, MemOp::int_load("ldl", Width::Long, false))
    .with(
        OP_FLDS,
        MemOp::new("flds", Direction::Load, Width::Word, AccessKind::FloatSingle),
    )
    .with(
        OP_FLDD,
        MemOp::new("fldd", Direction::Load, Width::Long, AccessKind::FloatDouble),
    )
    .with(OP_STH, MemOp::int_store("sth", Width::Half))
    .with(OP_STW, MemOp::int_store("stw", Width::Word))
    .with(OP_STL, MemOp::int_store("stl", Width::Long))
    .with(
        OP_FSTS,
        MemOp::new("fsts", Direction::Store, Width::Word, AccessKind::FloatSingle),
    )
    .with(
        OP_FSTD,
        MemOp::new("fstd", Direction::Store, Width::Long, AccessKind::FloatDouble),
    );

/// Vector operations the user-mode handler emulates, keyed by the instruction's
/// major opcode.
pub static USER_VECTOR_TABLE: DecodeTable = DecodeTable::empty("user-vector")
    .with(
        OP_LDWE,
        MemOp::new("ldwe", Direction::Load, Width::Word, AccessKind::WordBroadcast),
    )
    .with(
        OP_LDSE,
        MemOp::new("ldse", Direction::Load, Width::Word, AccessKind::Replicate),
    )
    .with(
        OP_LDDE,
        MemOp::new("ldde", Direction::Load, Width::Long, AccessKind::Replicate),
    )
    .with(
        OP_VLDS,
        MemOp::new("vlds", Direction::Load, Width::Vec2, AccessKind::Vector),
    )
    .with(
        OP_VLDD,
        MemOp::new("vldd", Direction::Load, Width::Vec4, AccessKind::Vector),
    )
    .with(
        OP_VSTS,
        MemOp::new("vsts", Direction::Store, Width::Vec2, AccessKind::Vector),
    )
    .with(
        OP_VSTD,
        MemOp::new("vstd", Direction::Store, Width::Vec4, AccessKind::Vector),
    );

/// A fully decoded unaligned access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessDescriptor {
    /// The memory operation.
    pub op: MemOp,
    /// Opcode the operation was decoded from.
    pub opcode: u32,
    /// Target (load) or source (store) register index.
    pub reg: usize,
    /// The faulting, unaligned address.
    pub addr: VirtAddr,
}

impl AccessDescriptor {
    /// Returns `true` if the register operand lives in the floating-point bank.
    pub const fn is_float(&self) -> bool {
        self.op.is_float()
    }

    /// Returns `true` if the register operand is a multi-lane vector.
    pub const fn is_vector(&self) -> bool {
        self.op.is_vector()
    }
}

fn unsupported(opcode: u32, reg: usize) -> EmulationError {
    EmulationError::Unsupported { opcode, reg }
}

/// Decodes a kernel-mode unaligned trap.
///
/// # Arguments
///
/// * `opcode` - Opcode reported by the trap entry.
/// * `reg` - Data register reported by the trap entry.
/// * `addr` - Faulting address.
///
/// # Errors
///
/// [`EmulationError::Unsupported`] if the opcode has no kernel entry, the
/// register index is out of range, or the register is `gp`. The kernel trap
/// frame keeps the interrupted `gp` outside the register slots, so an access
/// naming it cannot be emulated faithfully.
pub fn decode_kernel(opcode: u32, reg: usize, addr: VirtAddr) -> Result<AccessDescriptor, EmulationError> {
    if reg >= NUM_REGS || reg == REG_GP {
        return Err(unsupported(opcode, reg));
    }
    let op = KERNEL_TABLE
        .lookup(opcode)
        .ok_or_else(|| unsupported(opcode, reg))?;
    Ok(AccessDescriptor {
        op: *op,
        opcode,
        reg,
        addr,
    })
}

/// Decodes a user-mode unaligned trap.
///
/// The major opcode of the re-fetched instruction word selects a vector
/// operation if it names one; otherwise the trap's `opcode` selects a scalar
/// operation.
///
/// # Arguments
///
/// * `opcode` - Opcode reported by the trap entry.
/// * `instr` - The faulting instruction word.
/// * `reg` - Data register reported by the trap entry.
/// * `addr` - Faulting address.
///
/// # Errors
///
/// [`EmulationError::Unsupported`] if neither table has an entry or the
/// register index is out of range.
pub fn decode_user(
    opcode: u32,
    instr: u32,
    reg: usize,
    addr: VirtAddr,
) -> Result<AccessDescriptor, EmulationError> {
    if reg >= NUM_REGS {
        return Err(unsupported(opcode, reg));
    }
    let major = instr.major_opcode();
    let (op, opcode) = match USER_VECTOR_TABLE.lookup(major) {
        Some(op) => (op, major),
        None => {
            let op = USER_SCALAR_TABLE
                .lookup(opcode)
                .ok_or_else(|| unsupported(opcode, reg))?;
            (op, opcode)
        }
    };
    Ok(AccessDescriptor {
        op: *op,
        opcode,
        reg,
        addr,
    })
}
