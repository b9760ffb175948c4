//! Per-task state consulted by the user-mode handler.
//!
//! This module models the slice of a task the unaligned-trap path reads and
//! writes:
//! 1. **Identity:** Command name and pid for the notice and die reports.
//! 2. **UAC Policy:** The `NOPRINT`/`NOFIX`/`SIGBUS` flags set through the
//!    process-control interface.
//! 3. **Signals:** A queue of forced fault signals.
//! 4. **Dying Flag:** The test-and-set latch that stops recursive die paths.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use crate::common::{SigCode, SigInfo, Signal, VirtAddr};
use crate::kernel::mm::AddressSpace;

bitflags::bitflags! {
    /// Unaligned-access control flags of a task.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct UacFlags: u32 {
        /// Suppress the unaligned-trap notice.
        const NOPRINT = 1;
        /// Do not emulate; return to the interrupted context untouched.
        const NOFIX = 2;
        /// Deliver `SIGBUS` instead of emulating.
        const SIGBUS = 4;
    }
}

/// A task (thread) that can take unaligned traps.
#[derive(Debug)]
pub struct Task {
    comm: String,
    pid: u32,
    uac: AtomicU32,
    dying: AtomicBool,
    mm: Arc<AddressSpace>,
    signals: Mutex<Vec<SigInfo>>,
}

impl Task {
    /// Creates a task with no UAC flags set.
    ///
    /// # Arguments
    ///
    /// * `comm` - Command name.
    /// * `pid` - Process id.
    /// * `mm` - Address space shared with the task's siblings.
    pub fn new(comm: impl Into<String>, pid: u32, mm: Arc<AddressSpace>) -> Self {
        Self {
            comm: comm.into(),
            pid,
            uac: AtomicU32::new(0),
            dying: AtomicBool::new(false),
            mm,
            signals: Mutex::new(Vec::new()),
        }
    }

    /// Command name.
    pub fn comm(&self) -> &str {
        &self.comm
    }

    /// Process id.
    pub const fn pid(&self) -> u32 {
        self.pid
    }

    /// The task's address space.
    pub fn mm(&self) -> &AddressSpace {
        &self.mm
    }

    /// Current UAC flags.
    pub fn uac(&self) -> UacFlags {
        UacFlags::from_bits_truncate(self.uac.load(Ordering::Relaxed))
    }

    /// Replaces the UAC flags.
    pub fn set_uac(&self, flags: UacFlags) {
        self.uac.store(flags.bits(), Ordering::Relaxed);
    }

    /// Queues a fault signal on the task.
    ///
    /// # Arguments
    ///
    /// * `signal` - Signal number.
    /// * `code` - `si_code` classification.
    /// * `addr` - Faulting address reported in `si_addr`.
    /// * `extra` - Architecture-specific trap number, 0 for alignment faults.
    ///
    /// # Returns
    ///
    /// The queued signal record.
    pub fn force_sig_fault(&self, signal: Signal, code: SigCode, addr: VirtAddr, extra: u64) -> SigInfo {
        let info = SigInfo {
            signal,
            code,
            addr,
            extra,
        };
        debug!(comm = %self.comm, pid = self.pid, %info, "forcing fault signal");
        self.signals
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(info);
        info
    }

    /// Returns a copy of the queued signals, oldest first.
    pub fn pending_signals(&self) -> Vec<SigInfo> {
        self.signals
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Removes and returns the queued signals.
    pub fn take_signals(&self) -> Vec<SigInfo> {
        std::mem::take(&mut *self.signals.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Sets the dying flag and returns its previous value.
    pub fn test_and_set_dying(&self) -> bool {
        self.dying.swap(true, Ordering::AcqRel)
    }

    /// Returns `true` once the task has entered the die path.
    pub fn is_dying(&self) -> bool {
        self.dying.load(Ordering::Acquire)
    }
}
