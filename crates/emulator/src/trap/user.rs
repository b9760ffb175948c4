//! User-mode unaligned trap handler.
//!
//! Flow of one user trap:
//! 1. Count the alignment-fault event and emit the rate-limited notice.
//! 2. Apply the task's UAC policy: `SIGBUS` signals at once, `NOFIX` returns
//!    with the context untouched.
//! 3. Reject addresses at or above the task size with `SIGSEGV`.
//! 4. Re-fetch the faulting instruction and decode it; the vector table is
//!    keyed by the instruction's major opcode, the scalar table by the trap's opcode.
//! 5. Emulate. Unsupported operations raise `SIGBUS`/`BUS_ADRALN`; synthetic
//!    faults raise `SIGSEGV` with a code derived from the task's VMA list.
//!
//! Whenever a signal is raised the saved pc is rewound to the faulting instruction.

use tracing::{debug, info};

use super::emulate::emulate_user;
use super::{Disposition, Emulator};
use crate::common::{EmulationError, SigCode, Signal, VirtAddr};
use crate::core::arch::UserContext;
use crate::isa::decode_user;
use crate::isa::disasm::{describe, disassemble};
use crate::kernel::{ExceptionTableSearch, Task, UacFlags};
use crate::soc::GuestMemory;

impl<T: ExceptionTableSearch> Emulator<T> {
    /// Handles an unaligned access taken in user mode.
    ///
    /// # Arguments
    ///
    /// * `mem` - The task's view of memory.
    /// * `task` - The faulting task.
    /// * `va` - Faulting address.
    /// * `opcode` - Opcode reported by the trap entry.
    /// * `reg` - Data register reported by the trap entry.
    /// * `ctx` - Saved user context; the saved pc points past the faulting
    ///   instruction.
    ///
    /// # Returns
    ///
    /// - [`Disposition::Resume`] once the access has been emulated.
    /// - [`Disposition::Skipped`] under the `NOFIX` policy.
    /// - [`Disposition::Signal`] when a signal was queued on `task`.
    pub fn handle_user_unaligned<M: GuestMemory + ?Sized>(
        &self,
        mem: &mut M,
        task: &Task,
        va: VirtAddr,
        opcode: u32,
        reg: usize,
        ctx: &mut UserContext,
    ) -> Disposition {
        let pc = ctx.faulting_pc();
        self.stats.count_alignment_fault();

        let uac = task.uac();
        if self.config.general.print_unaligned
            && !uac.contains(UacFlags::NOPRINT)
            && self.notice.check()
        {
            info!(
                "{}({}): unaligned trap at {pc:016x}: {va} {opcode:x} {reg}",
                task.comm(),
                task.pid()
            );
        }

        if uac.contains(UacFlags::SIGBUS) {
            return Self::give_sigbus(task, va, ctx);
        }
        if uac.contains(UacFlags::NOFIX) {
            debug!(pc, %va, "NOFIX set, leaving unaligned access unemulated");
            return Disposition::Skipped;
        }
        if va.val() >= self.config.general.task_size {
            debug!(pc, %va, "user address beyond the task size");
            return self.give_sigsegv(task, va, ctx);
        }

        self.stats.user.record(va.val(), pc);

        let instr = match mem.fetch_insn(VirtAddr::new(pc)) {
            Ok(instr) => instr,
            Err(fault) => {
                debug!(pc, %fault, "could not re-fetch faulting instruction");
                return self.give_sigsegv(task, va, ctx);
            }
        };

        let desc = match decode_user(opcode, instr, reg, va) {
            Ok(desc) => desc,
            Err(err) => {
                debug!(pc, %err, insn = %disassemble(instr), "unsupported user unaligned access");
                return Self::give_sigbus(task, va, ctx);
            }
        };
        debug!(pc, access = %describe(&desc), "emulating user unaligned access");

        match emulate_user(mem, &desc, ctx) {
            Ok(()) => Disposition::Resume,
            Err(EmulationError::Synthetic { index, fault }) => {
                debug!(pc, index, %fault, "user synthetic access faulted");
                self.give_sigsegv(task, va, ctx)
            }
            Err(EmulationError::Unsupported { .. }) => Self::give_sigbus(task, va, ctx),
        }
    }

    fn give_sigbus(task: &Task, va: VirtAddr, ctx: &mut UserContext) -> Disposition {
        ctx.rewind_pc();
        Disposition::Signal(task.force_sig_fault(Signal::Bus, SigCode::AdrAln, va, 0))
    }

    fn give_sigsegv(&self, task: &Task, va: VirtAddr, ctx: &mut UserContext) -> Disposition {
        ctx.rewind_pc();
        let code = task.mm().classify_fault(va, self.config.general.task_size);
        Disposition::Signal(task.force_sig_fault(Signal::Segv, code, va, 0))
    }
}
