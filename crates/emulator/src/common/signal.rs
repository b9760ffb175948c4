//! Signal delivery types.
//!
//! This module defines the signals the unaligned-access handlers can raise at
//! user tasks, using the numbering of the Alpha-derived SW64 ABI.

use std::fmt;

use super::addr::VirtAddr;

/// Signals raised by the unaligned-access paths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Signal {
    /// Bus error (bad alignment policy or unsupported access).
    Bus = 10,
    /// Segmentation violation (synthetic access fault or bad address).
    Segv = 11,
}

impl Signal {
    /// Returns the ABI signal number.
    pub const fn number(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus => f.write_str("SIGBUS"),
            Self::Segv => f.write_str("SIGSEGV"),
        }
    }
}

/// Secondary `si_code` classification carried with a signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SigCode {
    /// `SEGV_MAPERR`: address not mapped to an object.
    MapErr,
    /// `SEGV_ACCERR`: invalid permissions for a mapped object.
    AccErr,
    /// `BUS_ADRALN`: invalid address alignment.
    AdrAln,
}

impl SigCode {
    /// Returns the ABI `si_code` value.
    pub const fn value(self) -> i32 {
        match self {
            Self::MapErr | Self::AdrAln => 1,
            Self::AccErr => 2,
        }
    }
}

impl fmt::Display for SigCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MapErr => f.write_str("SEGV_MAPERR"),
            Self::AccErr => f.write_str("SEGV_ACCERR"),
            Self::AdrAln => f.write_str("BUS_ADRALN"),
        }
    }
}

/// A fault signal as passed to `force_sig_fault`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SigInfo {
    /// Signal to deliver.
    pub signal: Signal,
    /// Secondary classification.
    pub code: SigCode,
    /// Faulting data address.
    pub addr: VirtAddr,
    /// Architecture-specific extra word (`si_trapno`); zero for these faults.
    pub extra: u64,
}

impl SigInfo {
    /// `SIGBUS`/`BUS_ADRALN` at `addr`.
    pub const fn bus_adraln(addr: VirtAddr) -> Self {
        Self {
            signal: Signal::Bus,
            code: SigCode::AdrAln,
            addr,
            extra: 0,
        }
    }

    /// `SIGSEGV` with the given code at `addr`.
    pub const fn segv(code: SigCode, addr: VirtAddr) -> Self {
        Self {
            signal: Signal::Segv,
            code,
            addr,
            extra: 0,
        }
    }
}

impl fmt::Display for SigInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} at {}", self.signal, self.code, self.addr)
    }
}
