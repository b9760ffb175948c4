//! Fault and error definitions.
//!
//! This module defines the error handling types of the emulator. It provides:
//! 1. **Access Faults:** The failure of a single synthetic (aligned) access.
//! 2. **Emulation Errors:** Why an unaligned access could not be emulated.
//! 3. **Configuration and Mapping Errors:** Failures of the ambient setup paths.
//!
//! Handlers never surface these to their caller: every error is resolved into a
//! [`Disposition`](crate::trap::Disposition) by the escalation logic.

use thiserror::Error;

use super::addr::VirtAddr;
use super::data::{AccessType, Width};

/// Why a primitive access against guest memory failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaultKind {
    /// No mapping covers the address.
    NotMapped,
    /// A mapping exists but does not permit the access type.
    Protection,
    /// The primitive access itself was not naturally aligned.
    ///
    /// The synthesis only issues aligned primitives, so this indicates a bug
    /// in the caller rather than a property of the guest.
    Misaligned,
}

/// A failed synthetic access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("{access} of {width} at {addr} faulted: {kind:?}")]
pub struct AccessFault {
    /// Address of the primitive access that faulted.
    pub addr: VirtAddr,
    /// Width of the primitive access.
    pub width: Width,
    /// Direction of the primitive access.
    pub access: AccessType,
    /// Fault classification.
    pub kind: FaultKind,
}

impl AccessFault {
    /// Creates a fault record.
    pub const fn new(addr: VirtAddr, width: Width, access: AccessType, kind: FaultKind) -> Self {
        Self {
            addr,
            width,
            access,
            kind,
        }
    }
}

/// Errors produced while emulating one unaligned access.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EmulationError {
    /// The opcode (or opcode/register pair) is outside the decode table's domain.
    #[error("unsupported unaligned access: opcode {opcode:#04x} reg {reg}")]
    Unsupported {
        /// Opcode supplied by the trap entry or re-decoded from the instruction.
        opcode: u32,
        /// Target or source register index.
        reg: usize,
    },

    /// One of the synthetic aligned sub-accesses faulted.
    #[error("synthetic access #{index} faulted: {fault}")]
    Synthetic {
        /// Zero-based index of the failed sub-access within the sequence.
        index: usize,
        /// The underlying primitive fault.
        fault: AccessFault,
    },
}

/// Errors raised when registering a virtual memory area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MapError {
    /// The area has `end <= start`.
    #[error("empty or inverted area {start}..{end}")]
    Empty {
        /// Start address.
        start: VirtAddr,
        /// End address (exclusive).
        end: VirtAddr,
    },
    /// The area overlaps an existing mapping.
    #[error("area {start}..{end} overlaps an existing mapping")]
    Overlap {
        /// Start address.
        start: VirtAddr,
        /// End address (exclusive).
        end: VirtAddr,
    },
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
    /// A range in the configuration is inverted.
    #[error("{field}: start {start:#x} is above end {end:#x}")]
    InvertedRange {
        /// Name of the offending field pair.
        field: &'static str,
        /// Range start.
        start: u64,
        /// Range end.
        end: u64,
    },
    /// The rate-limit burst is zero while printing is enabled.
    #[error("ratelimit.burst must be non-zero")]
    ZeroBurst,
    /// The stack-trace boundary is zero or not a power of two.
    #[error("diagnostics.trace_boundary {0:#x} must be a non-zero power of two")]
    TraceBoundary(u64),
}
