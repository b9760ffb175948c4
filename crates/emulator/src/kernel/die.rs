//! Fatal kernel fault reporting.
//!
//! When a kernel-mode unaligned access cannot be emulated or recovered, the
//! die path dumps the interrupted context and terminates. The report contains:
//! 1. **Identity:** Task name, pid and the reason for dying.
//! 2. **Registers:** pc, ra, ps, gp, sp and every integer register.
//! 3. **Code:** The instruction words from six before to one after the faulting
//!    pc, stopping at the first unreadable word.
//! 4. **Trace:** Kernel-text addresses found on the stack between sp and the
//!    next trace boundary.
//!
//! After reporting, the task's dying flag is test-and-set. A task that was
//! already dying halts; otherwise the configured oops policy decides between a
//! system panic and exiting the task.

use std::fmt;

use tracing::error;

use crate::common::constants::{INSTRUCTION_SIZE, REG_RA, REG_SP};
use crate::common::{RegisterAccess, Signal, VirtAddr};
use crate::config::{Config, DiagnosticsConfig};
use crate::core::arch::AllRegs;
use crate::kernel::task::Task;
use crate::soc::GuestMemory;

/// Offsets (in instructions) of the first and one-past-last code words shown.
const CODE_WINDOW: std::ops::Range<i64> = -6..2;

/// How the die path ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DieAction {
    /// Terminate the task with the report's signal.
    Exit,
    /// Escalate to a system panic.
    Panic,
    /// The task was already dying; stop executing it.
    Halt,
}

/// A diagnostic dump of a fatal kernel fault.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DieReport {
    /// Task name.
    pub comm: String,
    /// Task pid.
    pub pid: u32,
    /// Why the task is dying.
    pub reason: String,
    /// Exit signal.
    pub signal: Signal,
    /// Faulting pc.
    pub pc: u64,
    /// Processor status.
    pub ps: u64,
    /// Global pointer.
    pub gp: u64,
    /// Integer registers `$0`..`$31` as seen by the faulting code.
    pub regs: [u64; 32],
    /// `(offset, word)` pairs around the faulting pc.
    pub code: Vec<(i64, u32)>,
    /// Kernel-text addresses found on the stack.
    pub trace: Vec<u64>,
    /// The trace was cut short at the configured entry limit.
    pub trace_truncated: bool,
}

impl DieReport {
    /// Collects a report for a kernel fault.
    ///
    /// # Arguments
    ///
    /// * `mem` - Memory used to read code words and stack words.
    /// * `task` - The current task.
    /// * `reason` - Human-readable reason.
    /// * `regs` - Kernel trap frame.
    /// * `signal` - Exit signal.
    /// * `diag` - Trace parameters.
    pub fn collect<M: GuestMemory + ?Sized>(
        mem: &mut M,
        task: &Task,
        reason: impl Into<String>,
        regs: &AllRegs,
        signal: Signal,
        diag: &DiagnosticsConfig,
    ) -> Self {
        let pc = regs.faulting_pc();
        let regs_view: [u64; 32] = std::array::from_fn(|i| regs.read_reg(i));
        let code = code_window(mem, pc);
        let (trace, trace_truncated) = stack_trace(mem, regs_view[REG_SP], diag);
        Self {
            comm: task.comm().to_string(),
            pid: task.pid(),
            reason: reason.into(),
            signal,
            pc,
            ps: regs.ps,
            gp: regs.gp,
            regs: regs_view,
            code,
            trace,
            trace_truncated,
        }
    }
}

fn code_window<M: GuestMemory + ?Sized>(mem: &mut M, pc: u64) -> Vec<(i64, u32)> {
    let mut words = Vec::new();
    for i in CODE_WINDOW {
        let addr = pc.wrapping_add_signed(i * INSTRUCTION_SIZE as i64);
        match mem.fetch_insn(VirtAddr::new(addr)) {
            Ok(word) => words.push((i, word)),
            Err(_) => break,
        }
    }
    words
}

fn stack_trace<M: GuestMemory + ?Sized>(
    mem: &mut M,
    sp: u64,
    diag: &DiagnosticsConfig,
) -> (Vec<u64>, bool) {
    let mut trace = Vec::new();
    if diag.trace_boundary == 0 {
        return (trace, false);
    }
    let mut sp = VirtAddr::new(sp).align_down(8);
    while !sp.is_aligned(diag.trace_boundary) {
        let Ok(word) = mem.read_u64(sp) else {
            break;
        };
        sp = sp.add(8);
        if !diag.is_kernel_text(word) {
            continue;
        }
        if trace.len() >= diag.max_trace_entries {
            return (trace, true);
        }
        trace.push(word);
    }
    (trace, false)
}

impl fmt::Display for DieReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}({}): {}", self.comm, self.pid, self.reason)?;
        writeln!(
            f,
            "pc = [<{:016x}>]  ra = [<{:016x}>]  ps = {:04x}",
            self.pc, self.regs[REG_RA], self.ps
        )?;
        for (row, vals) in self.regs[..REG_SP].chunks(3).enumerate() {
            let line: Vec<String> = vals
                .iter()
                .enumerate()
                .map(|(k, v)| format!("{:<3}= {v:016x}", format!("r{}", row * 3 + k)))
                .collect();
            writeln!(f, "{}", line.join("  "))?;
        }
        writeln!(f, "gp = {:016x}  sp = {:016x}", self.gp, self.regs[REG_SP])?;
        write!(f, "Code:")?;
        for (i, word) in &self.code {
            if *i == 0 {
                write!(f, "<{word:08x}>")?;
            } else {
                write!(f, " {word:08x} ")?;
            }
        }
        writeln!(f)?;
        writeln!(f, "Trace:")?;
        for addr in &self.trace {
            writeln!(f, "[<{addr:016x}>]")?;
        }
        if self.trace_truncated {
            writeln!(f, " ...")?;
        }
        Ok(())
    }
}

/// Reports a fatal kernel fault and decides how it ends.
///
/// # Arguments
///
/// * `mem` - Memory used to read code and stack words.
/// * `task` - The current task.
/// * `reason` - Human-readable reason.
/// * `regs` - Kernel trap frame.
/// * `signal` - Exit signal.
/// * `config` - Emulator configuration.
///
/// # Returns
///
/// The report and the action that ends the die path.
pub fn die<M: GuestMemory + ?Sized>(
    mem: &mut M,
    task: &Task,
    reason: &str,
    regs: &AllRegs,
    signal: Signal,
    config: &Config,
) -> (DieReport, DieAction) {
    let report = DieReport::collect(mem, task, reason, regs, signal, &config.diagnostics);
    for line in report.to_string().lines() {
        error!(pid = report.pid, "{line}");
    }

    if task.test_and_set_dying() {
        error!(pid = report.pid, "die_if_kernel recursion detected");
        return (report, DieAction::Halt);
    }
    if config.general.panic_on_oops {
        error!(pid = report.pid, "Fatal exception: panic_on_oops");
        return (report, DieAction::Panic);
    }
    (report, DieAction::Exit)
}
