//! Sparse guest memory.
//!
//! This module implements a simulated address space made of independently mapped
//! regions. It provides:
//! 1. **Regions:** Byte-granular mappings with their own permissions and backing storage.
//! 2. **Guest Access:** A [`GuestMemory`] implementation that faults on unmapped,
//!    unpermitted or misaligned primitive accesses.
//! 3. **Setup Access:** Permission-free byte reads and writes for loading test images.

use std::collections::BTreeMap;

use crate::common::{AccessFault, AccessType, FaultKind, MapError, Perms, VirtAddr, Width};
use crate::soc::traits::GuestMemory;

/// A mapped region.
#[derive(Clone, Debug)]
struct Region {
    end: u64,
    perms: Perms,
    data: Vec<u8>,
}

/// Sparse, region-based guest memory.
#[derive(Clone, Debug, Default)]
pub struct SparseMemory {
    /// Regions keyed by start address; never overlapping.
    regions: BTreeMap<u64, Region>,
}

impl SparseMemory {
    /// Creates an empty address space.
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `[start, start + len)` with the given permissions, zero-filled.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Empty`] for a zero-length or wrapping region and
    /// [`MapError::Overlap`] if it intersects an existing region.
    pub fn map(&mut self, start: VirtAddr, len: u64, perms: Perms) -> Result<(), MapError> {
        let end = start.val().checked_add(len).filter(|&e| e > start.val());
        let Some(end) = end else {
            return Err(MapError::Empty {
                start,
                end: start.add(len),
            });
        };
        if self.overlaps(start.val(), end) {
            return Err(MapError::Overlap {
                start,
                end: VirtAddr::new(end),
            });
        }
        let region = Region {
            end,
            perms,
            data: vec![0; len as usize],
        };
        let _ = self.regions.insert(start.val(), region);
        Ok(())
    }

    /// Changes the permissions of the region starting exactly at `start`.
    ///
    /// Returns `false` if no region starts there.
    pub fn protect(&mut self, start: VirtAddr, perms: Perms) -> bool {
        match self.regions.get_mut(&start.val()) {
            Some(region) => {
                region.perms = perms;
                true
            }
            None => false,
        }
    }

    /// Copies `data` into mapped memory at `addr`, ignoring permissions.
    ///
    /// Returns `false` (writing nothing) if any byte falls outside a mapping.
    pub fn poke(&mut self, addr: VirtAddr, data: &[u8]) -> bool {
        let all_mapped = (0..data.len() as u64).all(|i| self.locate(addr.add(i).val()).is_some());
        if !all_mapped {
            return false;
        }
        for (i, byte) in data.iter().enumerate() {
            if let Some((base, region)) = self.locate_mut(addr.add(i as u64).val()) {
                region.data[base] = *byte;
            }
        }
        true
    }

    /// Reads `len` bytes at `addr`, ignoring permissions.
    ///
    /// Returns `None` if any byte falls outside a mapping.
    pub fn peek(&self, addr: VirtAddr, len: usize) -> Option<Vec<u8>> {
        (0..len as u64)
            .map(|i| {
                self.locate(addr.add(i).val())
                    .map(|(off, region)| region.data[off])
            })
            .collect()
    }

    fn overlaps(&self, start: u64, end: u64) -> bool {
        self.regions
            .range(..end)
            .next_back()
            .is_some_and(|(_, region)| region.end > start)
    }

    fn locate(&self, addr: u64) -> Option<(usize, &Region)> {
        let (&base, region) = self.regions.range(..=addr).next_back()?;
        (addr < region.end).then(|| ((addr - base) as usize, region))
    }

    fn locate_mut(&mut self, addr: u64) -> Option<(usize, &mut Region)> {
        let (&base, region) = self.regions.range_mut(..=addr).next_back()?;
        (addr < region.end).then(move || ((addr - base) as usize, region))
    }

    /// Validates a primitive access and returns the offset and region of its first byte.
    fn check(
        &self,
        addr: VirtAddr,
        width: Width,
        access: AccessType,
    ) -> Result<(usize, &Region), AccessFault> {
        let fault = |kind| AccessFault::new(addr, width, access, kind);
        if !width.is_primitive() || !addr.is_aligned(width.bytes()) {
            return Err(fault(FaultKind::Misaligned));
        }
        let (off, region) = self
            .locate(addr.val())
            .ok_or_else(|| fault(FaultKind::NotMapped))?;
        // An aligned primitive never straddles two regions unless the region
        // itself ends mid-word.
        if addr.val() + width.bytes() > region.end {
            return Err(fault(FaultKind::NotMapped));
        }
        if !region.perms.allows(access) {
            return Err(fault(FaultKind::Protection));
        }
        Ok((off, region))
    }
}

impl GuestMemory for SparseMemory {
    fn load(
        &mut self,
        addr: VirtAddr,
        width: Width,
        access: AccessType,
    ) -> Result<u64, AccessFault> {
        let (off, region) = self.check(addr, width, access)?;
        let n = width.bytes() as usize;
        let mut buf = [0u8; 8];
        buf[..n].copy_from_slice(&region.data[off..off + n]);
        Ok(u64::from_le_bytes(buf))
    }

    fn store(&mut self, addr: VirtAddr, width: Width, val: u64) -> Result<(), AccessFault> {
        let (off, _) = self.check(addr, width, AccessType::Write)?;
        let n = width.bytes() as usize;
        if let Some((_, region)) = self.locate_mut(addr.val()) {
            region.data[off..off + n].copy_from_slice(&val.to_le_bytes()[..n]);
        }
        Ok(())
    }
}
