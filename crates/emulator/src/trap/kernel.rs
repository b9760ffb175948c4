//! Kernel-mode unaligned trap handler.
//!
//! The trap entry has already decoded the opcode and data register, so no
//! instruction is re-fetched. Only integer loads and stores of 2, 4 and 8
//! bytes are emulated. A fault in one of the synthetic accesses is forwarded to
//! the exception-table entry of the faulting instruction when there is one;
//! everything else ends in the die path.

use tracing::{debug, error, warn};

use super::emulate::emulate_int;
use super::{Disposition, Emulator};
use crate::common::{EmulationError, Signal, VirtAddr};
use crate::core::arch::AllRegs;
use crate::isa::decode_kernel;
use crate::isa::disasm::describe;
use crate::kernel::die::die;
use crate::kernel::{ExceptionTableSearch, Task, fixup_exception};
use crate::soc::GuestMemory;

impl<T: ExceptionTableSearch> Emulator<T> {
    /// Handles an unaligned access taken in kernel mode.
    ///
    /// # Arguments
    ///
    /// * `mem` - Kernel view of memory.
    /// * `task` - The current task.
    /// * `va` - Faulting address.
    /// * `opcode` - Opcode decoded by the trap entry.
    /// * `reg` - Data register decoded by the trap entry.
    /// * `regs` - Kernel trap frame; the saved pc points past the faulting
    ///   instruction.
    ///
    /// # Returns
    ///
    /// - [`Disposition::Resume`] once the access has been emulated.
    /// - [`Disposition::Fixup`] when a synthetic fault was forwarded to the
    ///   exception table.
    /// - [`Disposition::Exit`], [`Disposition::Panic`] or [`Disposition::Halt`]
    ///   from the die path.
    pub fn handle_kernel_unaligned<M: GuestMemory + ?Sized>(
        &self,
        mem: &mut M,
        task: &Task,
        va: VirtAddr,
        opcode: u32,
        reg: usize,
        regs: &mut AllRegs,
    ) -> Disposition {
        let pc = regs.faulting_pc();
        self.stats.kernel.record(va.val(), pc);

        let desc = match decode_kernel(opcode, reg, va) {
            Ok(desc) => desc,
            Err(err) => {
                error!(%err, "Bad unaligned kernel access at {pc:016x}: {va} {opcode:x} {reg}");
                return self.kernel_die(mem, task, "bad unaligned kernel access", regs);
            }
        };
        debug!(pc, access = %describe(&desc), "emulating kernel unaligned access");

        match emulate_int(mem, &desc, regs) {
            Ok(()) => Disposition::Resume,
            Err(EmulationError::Synthetic { index, fault }) => {
                debug!(pc, index, %fault, "kernel synthetic access faulted");
                let Some(entry) = self.extable.search(pc) else {
                    return self.kernel_die(mem, task, "unhandled unaligned exception", regs);
                };
                let new_pc = fixup_exception(regs, &entry, pc);
                warn!("Forwarding unaligned exception at {pc:x} ({new_pc:x})");
                regs.pc = new_pc;
                Disposition::Fixup { pc: new_pc }
            }
            Err(err) => {
                error!(%err, pc, "kernel unaligned emulation failed");
                self.kernel_die(mem, task, "bad unaligned kernel access", regs)
            }
        }
    }

    fn kernel_die<M: GuestMemory + ?Sized>(
        &self,
        mem: &mut M,
        task: &Task,
        reason: &str,
        regs: &AllRegs,
    ) -> Disposition {
        let (report, action) = die(mem, task, reason, regs, Signal::Segv, &self.config);
        Disposition::from_die(report, action)
    }
}
