//! SW64 Application Binary Interface (ABI) register names.
//!
//! Defines the calling-convention names of the 32 integer registers, used by
//! the disassembler and the die-path register dump.

/// ABI names for `$0`–`$31`.
pub const REG_NAMES: [&str; 32] = [
    "v0", "t0", "t1", "t2", "t3", "t4", "t5", "t6", "t7", "s0", "s1", "s2", "s3", "s4", "s5",
    "fp", "a0", "a1", "a2", "a3", "a4", "a5", "t8", "t9", "t10", "t11", "ra", "t12", "at", "gp",
    "sp", "zero",
];

/// Returns the ABI name for an integer register index.
#[inline]
pub fn reg_name(idx: usize) -> &'static str {
    REG_NAMES.get(idx).copied().unwrap_or("$??")
}
