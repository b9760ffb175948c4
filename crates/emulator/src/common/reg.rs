//! Register access abstraction.
//!
//! Fix-up entries name registers by their logical index, but the kernel and user
//! fault contexts store registers in different, non-contiguous layouts. This
//! trait gives the fix-up code a single way to reach a logical register.

/// Read/write access to logical integer registers `0..32` of a saved context.
pub trait RegisterAccess {
    /// Reads logical register `idx`.
    ///
    /// Register 31 and indices outside `0..32` read as zero.
    fn read_reg(&self, idx: usize) -> u64;

    /// Writes logical register `idx`.
    ///
    /// Writes to register 31 or to indices outside `0..32` are discarded.
    fn write_reg(&mut self, idx: usize, val: u64);
}
