//! Execution units used by the trap handlers.
//!
//! This module contains the data-movement units that emulate a memory instruction:
//! 1. **LSU:** Reconstructs unaligned loads and stores from aligned primitives.
//! 2. **FPU:** Converts single-precision values between memory and register layouts.

/// Floating-point format conversion.
pub mod fpu;

/// Load/store unit.
pub mod lsu;
