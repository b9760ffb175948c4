//! SW64 architecture-specific components.
//!
//! This module contains the architectural state the unaligned-trap handlers
//! read and rewrite:
//! 1. **Register Contexts:** Kernel (`AllRegs`) and user (`UserContext`) trap frames
//!    and the logical-register location table.
//! 2. **FP/SIMD Bank:** Scalar and vector floating-point registers.

/// Floating-point / SIMD register bank.
pub mod fpr;

/// Saved register contexts.
pub mod regs;

pub use fpr::FpBank;
pub use regs::{AllRegs, PtRegs, RegLocation, SwitchStack, UserContext, user_reg_location};
