//! Virtual address type.
//!
//! This module defines a strong type for the faulting virtual addresses handled
//! by the unaligned-access emulator. It provides the following:
//! 1. **Type Safety:** Keeps addresses apart from register values and opcodes.
//! 2. **Alignment Arithmetic:** Rounding down to an alignment unit and extracting the
//!    byte offset within that unit, which drive the aligned-access synthesis.

use std::fmt;

/// A virtual address in the SW64 address space.
///
/// Both kernel and user faults are reported against virtual addresses; the
/// emulator never sees physical addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct VirtAddr(pub u64);

impl VirtAddr {
    /// Creates a new virtual address from a raw 64-bit value.
    ///
    /// # Arguments
    ///
    /// * `addr` - The raw 64-bit address value.
    ///
    /// # Returns
    ///
    /// A new `VirtAddr` instance wrapping the provided address.
    #[inline(always)]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw 64-bit address value.
    #[inline(always)]
    pub const fn val(&self) -> u64 {
        self.0
    }

    /// Rounds the address down to a multiple of `unit`.
    ///
    /// # Arguments
    ///
    /// * `unit` - Alignment unit in bytes; must be a power of two.
    ///
    /// # Returns
    ///
    /// The largest address `<= self` that is a multiple of `unit`.
    #[inline(always)]
    pub const fn align_down(&self, unit: u64) -> Self {
        Self(self.0 & !(unit - 1))
    }

    /// Returns the byte offset of the address within an alignment unit.
    ///
    /// # Arguments
    ///
    /// * `unit` - Alignment unit in bytes; must be a power of two.
    #[inline(always)]
    pub const fn offset_in(&self, unit: u64) -> u64 {
        self.0 & (unit - 1)
    }

    /// Returns `true` if the address is a multiple of `unit`.
    #[inline(always)]
    pub const fn is_aligned(&self, unit: u64) -> bool {
        self.offset_in(unit) == 0
    }

    /// Adds a byte displacement, wrapping at the top of the address space.
    ///
    /// Synthetic accesses near `u64::MAX` wrap the same way the hardware
    /// address adder does; such addresses are never mapped and fault.
    #[inline(always)]
    pub const fn add(&self, bytes: u64) -> Self {
        Self(self.0.wrapping_add(bytes))
    }

    /// Extracts the page offset from the virtual address.
    ///
    /// # Returns
    ///
    /// The byte offset (0-8191) within the containing 8 KiB page.
    pub const fn page_offset(&self) -> u64 {
        self.0 & super::constants::PAGE_OFFSET_MASK
    }
}

impl From<u64> for VirtAddr {
    fn from(addr: u64) -> Self {
        Self(addr)
    }
}

impl fmt::LowerHex for VirtAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl fmt::Display for VirtAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}
