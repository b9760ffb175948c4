//! Unaligned-access statistics collection and reporting.
//!
//! This module tracks how often each handler runs. It provides:
//! 1. **Per-mode counters:** Count, last faulting address and last faulting pc
//!    for kernel and user faults.
//! 2. **Alignment-fault events:** A count of every user unaligned trap, taken
//!    before any policy flag is consulted.
//! 3. **Reporting:** A serializable snapshot, JSON rendering and a text table.
//!
//! The counters are lossy telemetry. They use relaxed atomics, and a concurrent
//! fault may interleave its `va`/`pc` with another's.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counters for one fault mode.
#[derive(Debug, Default)]
pub struct UnalignedStat {
    count: AtomicU64,
    va: AtomicU64,
    pc: AtomicU64,
}

impl UnalignedStat {
    /// Creates zeroed counters.
    pub const fn new() -> Self {
        Self {
            count: AtomicU64::new(0),
            va: AtomicU64::new(0),
            pc: AtomicU64::new(0),
        }
    }

    /// Records one fault.
    ///
    /// # Arguments
    ///
    /// * `va` - Faulting data address.
    /// * `pc` - Address of the faulting instruction.
    pub fn record(&self, va: u64, pc: u64) {
        let _ = self.count.fetch_add(1, Ordering::Relaxed);
        self.va.store(va, Ordering::Relaxed);
        self.pc.store(pc, Ordering::Relaxed);
    }

    /// Number of faults recorded.
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    /// Reads the counters.
    pub fn snapshot(&self) -> StatSnapshot {
        StatSnapshot {
            count: self.count.load(Ordering::Relaxed),
            va: self.va.load(Ordering::Relaxed),
            pc: self.pc.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time copy of [`UnalignedStat`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StatSnapshot {
    /// Faults recorded.
    pub count: u64,
    /// Last faulting data address.
    pub va: u64,
    /// Last faulting pc.
    pub pc: u64,
}

/// All statistics kept by the emulator.
#[derive(Debug, Default)]
pub struct UnalignedStats {
    /// Kernel-mode faults that reached emulation.
    pub kernel: UnalignedStat,
    /// User-mode faults that passed the policy checks.
    pub user: UnalignedStat,
    alignment_faults: AtomicU64,
}

/// Valid section identifiers for [`UnalignedStats::render_sections`].
pub const STATS_SECTIONS: &[&str] = &["kernel", "user", "events"];

impl UnalignedStats {
    /// Creates zeroed statistics.
    pub const fn new() -> Self {
        Self {
            kernel: UnalignedStat::new(),
            user: UnalignedStat::new(),
            alignment_faults: AtomicU64::new(0),
        }
    }

    /// Counts one user alignment-fault event.
    pub fn count_alignment_fault(&self) {
        let _ = self.alignment_faults.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of user alignment-fault events.
    pub fn alignment_faults(&self) -> u64 {
        self.alignment_faults.load(Ordering::Relaxed)
    }

    /// Reads every counter.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            kernel: self.kernel.snapshot(),
            user: self.user.snapshot(),
            alignment_faults: self.alignment_faults(),
        }
    }

    /// Renders a snapshot as JSON.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.snapshot())
    }

    /// Renders the requested sections as a text table.
    ///
    /// Pass an empty slice for every section; unknown names are ignored.
    pub fn render_sections(&self, sections: &[&str]) -> String {
        let want = |s: &str| sections.is_empty() || sections.contains(&s);
        let snap = self.snapshot();
        let mut out = String::new();
        out.push_str("==========================================================\n");
        out.push_str("UNALIGNED ACCESS STATISTICS\n");
        out.push_str("==========================================================\n");
        let mut stat = |name: &str, s: &StatSnapshot| {
            out.push_str(&format!(
                "  {:<6} count: {:<10} | va: {:#018x} | pc: {:#018x}\n",
                name, s.count, s.va, s.pc
            ));
        };
        if want("kernel") {
            stat("kernel", &snap.kernel);
        }
        if want("user") {
            stat("user", &snap.user);
        }
        if want("events") {
            out.push_str(&format!("  alignment_faults       {}\n", snap.alignment_faults));
        }
        out.push_str("==========================================================\n");
        out
    }
}

impl fmt::Display for UnalignedStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_sections(&[]))
    }
}

/// A point-in-time copy of [`UnalignedStats`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    /// Kernel-mode counters.
    pub kernel: StatSnapshot,
    /// User-mode counters.
    pub user: StatSnapshot,
    /// User alignment-fault events.
    pub alignment_faults: u64,
}
