//! Unaligned-access trap handlers.
//!
//! This module is the entry point of the emulator. An [`Emulator`] owns the
//! configuration, statistics, notice rate limiter and exception table, and
//! exposes one handler per trap path:
//! 1. **Kernel:** [`Emulator::handle_kernel_unaligned`] emulates integer accesses
//!    made by kernel code, forwarding faults to the exception table or the die path.
//! 2. **User:** [`Emulator::handle_user_unaligned`] applies the task's UAC policy,
//!    re-fetches the instruction and emulates scalar, float and vector accesses,
//!    converting failures into signals.
//!
//! Neither handler returns an error. Every outcome is a [`Disposition`] that
//! tells the trap-return path what happened to the saved context.

/// Register-file side of the emulation.
mod emulate;

/// Kernel-mode handler.
pub mod kernel;

/// User-mode handler.
pub mod user;

use crate::common::SigInfo;
use crate::config::Config;
use crate::kernel::die::{DieAction, DieReport};
use crate::kernel::{ExceptionTable, ExceptionTableSearch, RateLimiter};
use crate::stats::UnalignedStats;

/// Outcome of one unaligned trap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Disposition {
    /// The access was emulated; resume at the saved pc (the next instruction).
    Resume,
    /// A kernel synthetic fault was forwarded; the saved pc now holds `pc`.
    Fixup {
        /// The fix-up continuation.
        pc: u64,
    },
    /// `NOFIX` policy: nothing was emulated and the context is untouched.
    Skipped,
    /// A signal was queued on the task and the saved pc rewound to the
    /// faulting instruction.
    Signal(SigInfo),
    /// Fatal kernel fault; the task exits.
    Exit(Box<DieReport>),
    /// Fatal kernel fault with `panic_on_oops` set.
    Panic(Box<DieReport>),
    /// Fatal kernel fault while the task was already dying.
    Halt,
}

impl Disposition {
    /// Returns `true` if execution continues in the interrupted context.
    pub const fn resumes(&self) -> bool {
        matches!(self, Self::Resume | Self::Fixup { .. } | Self::Skipped)
    }

    pub(crate) fn from_die(report: DieReport, action: DieAction) -> Self {
        match action {
            DieAction::Exit => Self::Exit(Box::new(report)),
            DieAction::Panic => Self::Panic(Box::new(report)),
            DieAction::Halt => Self::Halt,
        }
    }
}

/// The unaligned-access emulator.
///
/// Handlers take `&self`; statistics and the rate limiter are internally
/// synchronized, so one emulator can serve every CPU.
#[derive(Debug)]
pub struct Emulator<T: ExceptionTableSearch = ExceptionTable> {
    config: Config,
    stats: UnalignedStats,
    extable: T,
    notice: RateLimiter,
}

impl Emulator<ExceptionTable> {
    /// Creates an emulator with an empty exception table.
    pub fn new(config: Config) -> Self {
        Self::with_extable(config, ExceptionTable::new())
    }
}

impl Default for Emulator<ExceptionTable> {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl<T: ExceptionTableSearch> Emulator<T> {
    /// Creates an emulator that resolves kernel fix-ups through `extable`.
    pub fn with_extable(config: Config, extable: T) -> Self {
        let notice = RateLimiter::from_config("unaligned", &config.ratelimit);
        Self {
            config,
            stats: UnalignedStats::new(),
            extable,
            notice,
        }
    }

    /// The active configuration.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Fault statistics.
    pub const fn stats(&self) -> &UnalignedStats {
        &self.stats
    }

    /// The exception table.
    pub const fn extable(&self) -> &T {
        &self.extable
    }

    /// Mutable access to the exception table, for registering fix-ups.
    pub const fn extable_mut(&mut self) -> &mut T {
        &mut self.extable
    }
}
