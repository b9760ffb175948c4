//! Guest memory trait for synthetic accesses.
//!
//! This module defines the `GuestMemory` trait through which the emulator performs
//! every memory access. It provides:
//! 1. **Primitive Access:** Naturally aligned loads and stores of 1, 2, 4 or 8 bytes
//!    that report faults instead of trapping.
//! 2. **Convenience:** Byte stores, quadword loads and instruction fetches built on the
//!    primitives.
//!
//! An implementation models the platform's fault-recoverable access region: on real
//! hardware each primitive is an instruction with an exception-table entry; in the
//! simulation it is a lookup in a sparse map of mapped regions.

use crate::common::{AccessFault, AccessType, VirtAddr, Width};

/// Fault-reporting access to the address space of the interrupted context.
pub trait GuestMemory {
    /// Loads `width` bytes (little-endian, zero-extended) from `addr`.
    ///
    /// `addr` must be aligned to `width`; `access` selects which permission is
    /// checked (`Read` for data, `Fetch` for instruction words).
    ///
    /// # Errors
    ///
    /// Returns an [`AccessFault`] if the address is unmapped, not permitted,
    /// misaligned, or `width` is not a primitive width.
    fn load(&mut self, addr: VirtAddr, width: Width, access: AccessType)
    -> Result<u64, AccessFault>;

    /// Stores the low `width` bytes of `val` (little-endian) at `addr`.
    ///
    /// `addr` must be aligned to `width`.
    ///
    /// # Errors
    ///
    /// Returns an [`AccessFault`] if the address is unmapped, not writable,
    /// misaligned, or `width` is not a primitive width.
    fn store(&mut self, addr: VirtAddr, width: Width, val: u64) -> Result<(), AccessFault>;

    /// Loads an aligned quadword.
    ///
    /// # Errors
    ///
    /// See [`GuestMemory::load`].
    fn read_u64(&mut self, addr: VirtAddr) -> Result<u64, AccessFault> {
        self.load(addr, Width::Long, AccessType::Read)
    }

    /// Stores a single byte. Byte stores can never be misaligned.
    ///
    /// # Errors
    ///
    /// See [`GuestMemory::store`].
    fn write_u8(&mut self, addr: VirtAddr, val: u8) -> Result<(), AccessFault> {
        self.store(addr, Width::Byte, u64::from(val))
    }

    /// Fetches the instruction word at `pc`.
    ///
    /// # Errors
    ///
    /// See [`GuestMemory::load`].
    fn fetch_insn(&mut self, pc: VirtAddr) -> Result<u32, AccessFault> {
        self.load(pc, Width::Word, AccessType::Fetch)
            .map(|w| w as u32)
    }
}
