//! Floating-Point Unit (FPU) helpers.
//!
//! The emulator never performs floating-point arithmetic; it only moves
//! floating-point values between memory and the register file:
//! - [`sfloat`]: S-float memory/register layout conversion.

/// S-float memory/register format conversion.
pub mod sfloat;

pub use sfloat::{s_mem_to_reg, s_reg_to_mem};
