//! Saved register contexts delivered by the trap entry stubs.
//!
//! The two unaligned-trap entry points save registers in different layouts:
//! 1. **Kernel (`AllRegs`):** All 32 integer registers in order, followed by
//!    ps, pc, gp and the three argument slots. The entry stub reuses `r16..=r18`
//!    to pass the handler arguments, so their saved values live in `a0..=a2`.
//! 2. **User (`UserContext`):** The ordinary process save layout (`PtRegs`), with
//!    the callee-saved `r9..=r15` stored out of band in a `SwitchStack` placed
//!    before it, `r29` saved as `gp`, the stack pointer held in the task's usp
//!    and `r31` hardwired to zero.
//!
//! Logical register numbers are resolved through [`user_reg_location`], a single
//! table lookup, instead of offset arithmetic on the raw record.

use super::fpr::FpBank;
use crate::common::RegisterAccess;
use crate::common::constants::{INSTRUCTION_SIZE, NUM_REGS, REG_ZERO};

/// Kernel-mode unaligned-trap context.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[repr(C)]
pub struct AllRegs {
    /// Integer register slots. Slots 16-18 hold handler arguments, not the
    /// interrupted values.
    pub regs: [u64; NUM_REGS],
    /// Processor status.
    pub ps: u64,
    /// Saved program counter; points past the faulting instruction.
    pub pc: u64,
    /// Kernel global pointer at trap time.
    pub gp: u64,
    /// Interrupted value of `r16`.
    pub a0: u64,
    /// Interrupted value of `r17`.
    pub a1: u64,
    /// Interrupted value of `r18`.
    pub a2: u64,
}

impl AllRegs {
    /// Creates a zeroed context whose saved pc is `pc`.
    pub fn with_pc(pc: u64) -> Self {
        Self {
            pc,
            ..Self::default()
        }
    }

    /// Address of the instruction that took the unaligned trap.
    #[inline]
    pub const fn faulting_pc(&self) -> u64 {
        self.pc.wrapping_sub(INSTRUCTION_SIZE)
    }
}

impl RegisterAccess for AllRegs {
    fn read_reg(&self, idx: usize) -> u64 {
        match idx {
            16 => self.a0,
            17 => self.a1,
            18 => self.a2,
            REG_ZERO => 0,
            _ => self.regs.get(idx).copied().unwrap_or(0),
        }
    }

    fn write_reg(&mut self, idx: usize, val: u64) {
        match idx {
            16 => self.a0 = val,
            17 => self.a1 = val,
            18 => self.a2 = val,
            REG_ZERO => {}
            _ => {
                if let Some(slot) = self.regs.get_mut(idx) {
                    *slot = val;
                }
            }
        }
    }
}

/// Word indices into [`PtRegs`].
pub mod pt {
    /// `r0`..=`r8` occupy words 0-8.
    pub const R0: usize = 0;
    /// `r19`..=`r28` occupy words 9-18.
    pub const R19: usize = 9;
    /// Trap argument 0.
    pub const TRAP_A0: usize = 19;
    /// Trap argument 1.
    pub const TRAP_A1: usize = 20;
    /// Trap argument 2.
    pub const TRAP_A2: usize = 21;
    /// Processor status.
    pub const PS: usize = 22;
    /// Saved program counter.
    pub const PC: usize = 23;
    /// Global pointer (`r29`).
    pub const GP: usize = 24;
    /// `r16`..=`r18` occupy words 25-27.
    pub const R16: usize = 25;
    /// Number of words in the record.
    pub const WORDS: usize = 28;
}

/// Process register save record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[repr(C)]
pub struct PtRegs {
    words: [u64; pt::WORDS],
}

impl PtRegs {
    /// Reads a word by its record index (see [`pt`]).
    #[inline]
    pub const fn word(&self, idx: usize) -> u64 {
        self.words[idx]
    }

    /// Writes a word by its record index (see [`pt`]).
    #[inline]
    pub const fn set_word(&mut self, idx: usize, val: u64) {
        self.words[idx] = val;
    }

    /// Saved program counter.
    pub const fn pc(&self) -> u64 {
        self.words[pt::PC]
    }

    /// Overwrites the saved program counter.
    pub const fn set_pc(&mut self, pc: u64) {
        self.words[pt::PC] = pc;
    }

    /// Saved processor status.
    pub const fn ps(&self) -> u64 {
        self.words[pt::PS]
    }
}

/// Callee-saved registers `r9..=r15`, stored immediately before [`PtRegs`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[repr(C)]
pub struct SwitchStack {
    /// `r9` at index 0 through `r15` at index 6.
    pub r9_r15: [u64; 7],
}

/// Physical home of a logical user register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegLocation {
    /// Word index into the primary [`PtRegs`] record.
    Frame(usize),
    /// Index into the out-of-band [`SwitchStack`].
    SwitchStack(usize),
    /// The user stack pointer kept by the task, not in either record.
    UserStack,
    /// Hardwired zero.
    Zero,
}

/// Logical register index to save location for user faults.
pub const USER_REG_LOCATIONS: [RegLocation; NUM_REGS] = {
    let mut table = [RegLocation::Zero; NUM_REGS];
    let mut r = 0;
    while r < NUM_REGS {
        table[r] = match r {
            0..=8 => RegLocation::Frame(pt::R0 + r),
            9..=15 => RegLocation::SwitchStack(r - 9),
            16..=18 => RegLocation::Frame(pt::R16 + (r - 16)),
            19..=28 => RegLocation::Frame(pt::R19 + (r - 19)),
            29 => RegLocation::Frame(pt::GP),
            30 => RegLocation::UserStack,
            _ => RegLocation::Zero,
        };
        r += 1;
    }
    table
};

/// Resolves a logical user register to its save location.
///
/// Indices outside `0..32` resolve to [`RegLocation::Zero`].
#[inline]
pub const fn user_reg_location(idx: usize) -> RegLocation {
    if idx < NUM_REGS {
        USER_REG_LOCATIONS[idx]
    } else {
        RegLocation::Zero
    }
}

/// User-mode unaligned-trap context.
///
/// Bundles everything the user handler may read or rewrite: the save record,
/// the out-of-band callee-saved block, the user stack pointer, and the FP/SIMD
/// register bank.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserContext {
    /// Primary save record.
    pub regs: PtRegs,
    /// Out-of-band `r9..=r15`.
    pub switch_stack: SwitchStack,
    /// User stack pointer (`r30`).
    pub usp: u64,
    /// Floating-point and vector registers.
    pub fp: FpBank,
}

impl UserContext {
    /// Creates a zeroed context whose saved pc is `pc`.
    pub fn with_pc(pc: u64) -> Self {
        let mut ctx = Self::default();
        ctx.regs.set_pc(pc);
        ctx
    }

    /// Address of the instruction that took the unaligned trap.
    #[inline]
    pub const fn faulting_pc(&self) -> u64 {
        self.regs.pc().wrapping_sub(INSTRUCTION_SIZE)
    }

    /// Rewinds the saved pc so the faulting instruction is reported (and
    /// re-executed if the signal is handled).
    pub const fn rewind_pc(&mut self) {
        let pc = self.faulting_pc();
        self.regs.set_pc(pc);
    }
}

impl RegisterAccess for UserContext {
    fn read_reg(&self, idx: usize) -> u64 {
        match user_reg_location(idx) {
            RegLocation::Frame(w) => self.regs.word(w),
            RegLocation::SwitchStack(i) => self.switch_stack.r9_r15[i],
            RegLocation::UserStack => self.usp,
            RegLocation::Zero => 0,
        }
    }

    fn write_reg(&mut self, idx: usize, val: u64) {
        match user_reg_location(idx) {
            RegLocation::Frame(w) => self.regs.set_word(w, val),
            RegLocation::SwitchStack(i) => self.switch_stack.r9_r15[i] = val,
            RegLocation::UserStack => self.usp = val,
            RegLocation::Zero => {}
        }
    }
}
