//! SW64 Floating-Point / SIMD Register Bank.
//!
//! This module implements the floating-point register bank seen by the user
//! unaligned-access handler. It performs the following:
//! 1. **Storage:** 32 vector registers of four 64-bit lanes (`f0`-`f31`).
//! 2. **Scalar Access:** Lane 0 holds the scalar register-format value.
//! 3. **Vector Access:** Whole-lane reads and writes for `vlds`/`vldd`-style
//!    transfers and the broadcast forms used by `ldse`/`ldde`/`ldwe`.

use crate::common::constants::NUM_REGS;

/// Lanes per vector register.
pub const LANES: usize = 4;

/// Floating-point/SIMD register bank.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FpBank {
    vregs: [[u64; LANES]; NUM_REGS],
}

impl Default for FpBank {
    fn default() -> Self {
        Self::new()
    }
}

impl FpBank {
    /// Creates a bank with every lane of every register set to zero.
    pub const fn new() -> Self {
        Self {
            vregs: [[0; LANES]; NUM_REGS],
        }
    }

    /// Reads the scalar (lane 0) value of register `idx`, in register format.
    pub const fn read(&self, idx: usize) -> u64 {
        self.vregs[idx][0]
    }

    /// Writes the scalar (lane 0) value of register `idx`; other lanes are preserved.
    pub const fn write(&mut self, idx: usize, val: u64) {
        self.vregs[idx][0] = val;
    }

    /// Reads the two low lanes (the 128-bit single-precision vector view).
    pub const fn read_simd_s(&self, idx: usize) -> [u64; 2] {
        [self.vregs[idx][0], self.vregs[idx][1]]
    }

    /// Writes the two low lanes; lanes 2-3 are preserved.
    pub const fn write_simd_s(&mut self, idx: usize, lo: u64, hi: u64) {
        self.vregs[idx][0] = lo;
        self.vregs[idx][1] = hi;
    }

    /// Reads all four lanes (the 256-bit double-precision vector view).
    pub const fn read_simd_d(&self, idx: usize) -> [u64; LANES] {
        self.vregs[idx]
    }

    /// Writes all four lanes.
    pub const fn write_simd_d(&mut self, idx: usize, lanes: [u64; LANES]) {
        self.vregs[idx] = lanes;
    }

    /// Broadcasts a 32-bit word into every word slot of register `idx`.
    pub const fn write_simd_ldwe(&mut self, idx: usize, word: u32) {
        let pair = (word as u64) | ((word as u64) << 32);
        self.vregs[idx] = [pair; LANES];
    }
}
