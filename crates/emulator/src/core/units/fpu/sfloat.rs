//! S-float memory/register format conversion.
//!
//! A single-precision value occupies 32 bits in memory but is held in a 64-bit
//! floating-point register using the double-precision exponent width:
//!
//! - **Memory** ([`s_reg_to_mem`] output): sign (1), exponent (8), fraction (23).
//! - **Register** ([`s_mem_to_reg`] output): sign (1), exponent (11), fraction (52),
//!   with the 23 fraction bits in the top of the 52-bit field.
//!
//! The 8-bit memory exponent is split into its top bit and low 7 bits. A set
//! top bit keeps the high register exponent bits clear (`1_000_xxxxxxx`) unless
//! the exponent is all ones, which maps to the all-ones register exponent
//! (infinity/NaN). A clear top bit fills the middle bits (`0_111_xxxxxxx`) unless
//! the exponent is all zeros, which stays zero (zero/subnormal). For normal
//! values this is exactly the `f32 -> f64` widening.

/// Sign bit of the memory format.
const MEM_SIGN: u32 = 1 << 31;

/// Top exponent bit of the memory format.
const MEM_EXP_MSB: u32 = 1 << 30;

/// Low 7 exponent bits of the memory format (bits 29:23).
const MEM_EXP_LOW_SHIFT: u32 = 23;
const MEM_EXP_LOW_MASK: u32 = 0x7f;

/// Fraction field of the memory format.
const MEM_FRAC_MASK: u32 = 0x007f_ffff;

/// Register exponent for infinity and NaN.
const REG_EXP_SPECIAL: u64 = 0x7ff;

/// Fill bits for a memory exponent with a clear top bit.
const REG_EXP_BIAS_FILL: u64 = 0x380;

/// Position of the exponent and fraction within the register format.
const REG_EXP_SHIFT: u32 = 52;
const REG_FRAC_SHIFT: u32 = 29;

/// Expands a 32-bit memory S-float into register format.
///
/// # Arguments
///
/// * `mem` - The 32-bit value as loaded from memory.
///
/// # Returns
///
/// The 64-bit register image.
#[inline]
pub const fn s_mem_to_reg(mem: u32) -> u64 {
    let frac = (mem & MEM_FRAC_MASK) as u64;
    let sign = ((mem & MEM_SIGN) >> 31) as u64;
    let exp_msb = ((mem & MEM_EXP_MSB) >> 30) as u64;
    let exp_low = ((mem >> MEM_EXP_LOW_SHIFT) & MEM_EXP_LOW_MASK) as u64;

    let mut exp = (exp_msb << 10) | exp_low;
    if exp_msb == 1 {
        if exp_low == MEM_EXP_LOW_MASK as u64 {
            exp = REG_EXP_SPECIAL;
        }
    } else if exp_low != 0 {
        exp |= REG_EXP_BIAS_FILL;
    }

    (sign << 63) | (exp << REG_EXP_SHIFT) | (frac << REG_FRAC_SHIFT)
}

/// Packs a register-format S-float back into its 32-bit memory layout.
///
/// Keeps the sign and top exponent bit, then the low 7 exponent bits and the
/// top 23 fraction bits. Low fraction bits are truncated.
///
/// # Arguments
///
/// * `reg` - The 64-bit register image.
///
/// # Returns
///
/// The 32-bit memory value.
#[inline]
pub const fn s_reg_to_mem(reg: u64) -> u32 {
    (((reg >> 62) << 30) | ((reg << 5) >> 34)) as u32
}
