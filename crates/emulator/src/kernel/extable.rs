//! Kernel exception-table fix-ups.
//!
//! Kernel code that may legitimately fault on a memory access (for example
//! while copying from a user pointer) registers an exception-table entry for
//! that instruction. When such an instruction faults, execution continues at
//! the entry's continuation instead of oopsing, with the value register
//! cleared and the error register set to `-EFAULT`.
//!
//! The unaligned-trap path consults this table only when one of its own
//! synthetic accesses faults, using the address of the instruction that took
//! the unaligned trap.

use tracing::debug;

use crate::common::RegisterAccess;
use crate::common::constants::{EFAULT, NUM_REGS};

/// One exception-table entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExceptionTableEntry {
    /// Address of the instruction allowed to fault.
    pub insn: u64,
    /// Address execution continues at after a fault.
    pub continuation: u64,
    /// Register that receives 0 (the load destination), if any.
    pub valreg: Option<usize>,
    /// Register that receives `-EFAULT`, if any.
    pub errreg: Option<usize>,
}

impl ExceptionTableEntry {
    /// Creates an entry that only redirects execution.
    pub const fn new(insn: u64, continuation: u64) -> Self {
        Self {
            insn,
            continuation,
            valreg: None,
            errreg: None,
        }
    }

    /// Sets the register cleared on fix-up.
    pub const fn with_valreg(mut self, reg: usize) -> Self {
        self.valreg = Some(reg);
        self
    }

    /// Sets the register that receives `-EFAULT` on fix-up.
    pub const fn with_errreg(mut self, reg: usize) -> Self {
        self.errreg = Some(reg);
        self
    }
}

/// Lookup of the fix-up registered for a faulting instruction.
pub trait ExceptionTableSearch {
    /// Returns the entry registered for the instruction at `pc`.
    fn search(&self, pc: u64) -> Option<ExceptionTableEntry>;
}

/// An exception table sorted by instruction address.
#[derive(Clone, Debug, Default)]
pub struct ExceptionTable {
    entries: Vec<ExceptionTableEntry>,
}

impl ExceptionTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, keeping the table sorted. A later entry for the same
    /// instruction replaces the earlier one.
    pub fn insert(&mut self, entry: ExceptionTableEntry) {
        match self.entries.binary_search_by_key(&entry.insn, |e| e.insn) {
            Ok(pos) => self.entries[pos] = entry,
            Err(pos) => self.entries.insert(pos, entry),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<ExceptionTableEntry> for ExceptionTable {
    fn from_iter<I: IntoIterator<Item = ExceptionTableEntry>>(iter: I) -> Self {
        let mut table = Self::new();
        for entry in iter {
            table.insert(entry);
        }
        table
    }
}

impl ExceptionTableSearch for ExceptionTable {
    fn search(&self, pc: u64) -> Option<ExceptionTableEntry> {
        self.entries
            .binary_search_by_key(&pc, |e| e.insn)
            .ok()
            .map(|pos| self.entries[pos])
    }
}

/// Applies a fix-up to the saved registers.
///
/// Register names outside `0..32` are ignored.
///
/// # Arguments
///
/// * `regs` - Register accessor of the faulting context.
/// * `entry` - The entry found for `pc`.
/// * `pc` - Address of the faulting instruction.
///
/// # Returns
///
/// The address execution continues at.
pub fn fixup_exception<R: RegisterAccess + ?Sized>(
    regs: &mut R,
    entry: &ExceptionTableEntry,
    pc: u64,
) -> u64 {
    if let Some(reg) = entry.valreg.filter(|&r| r < NUM_REGS) {
        regs.write_reg(reg, 0);
    }
    if let Some(reg) = entry.errreg.filter(|&r| r < NUM_REGS) {
        regs.write_reg(reg, (-EFAULT) as u64);
    }
    debug!(pc, continuation = entry.continuation, "applied exception fixup");
    entry.continuation
}
