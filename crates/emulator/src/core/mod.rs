//! Processor-side state and data paths.
//!
//! This module contains the architectural state the trap handlers operate on
//! and the units that move data between that state and memory.

/// Architecture-specific components (saved register contexts, FP/SIMD bank).
pub mod arch;

/// Execution units (LSU, FPU format conversion).
pub mod units;

pub use self::arch::{AllRegs, FpBank, UserContext};
