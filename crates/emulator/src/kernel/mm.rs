//! Virtual memory areas of a task.
//!
//! The user-mode handler consults the area list only after a synthetic access
//! has faulted, to tell an unmapped address (`SEGV_MAPERR`) from a mapped
//! address the access was not allowed to touch (`SEGV_ACCERR`). The list is
//! guarded by a reader/writer lock; fault classification only takes the read side.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use tracing::trace;

use crate::common::{MapError, Perms, SigCode, VirtAddr};

/// A mapped virtual memory area `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Vma {
    /// First mapped address.
    pub start: VirtAddr,
    /// First address past the area.
    pub end: VirtAddr,
    /// Access permissions.
    pub perms: Perms,
}

impl Vma {
    /// Returns `true` if `addr` lies inside the area.
    pub const fn contains(&self, addr: VirtAddr) -> bool {
        addr.val() >= self.start.val() && addr.val() < self.end.val()
    }
}

/// The set of areas mapped by a process.
#[derive(Debug, Default)]
pub struct AddressSpace {
    vmas: RwLock<BTreeMap<u64, Vma>>,
}

impl AddressSpace {
    /// Creates an empty address space.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the area `[start, start + len)`.
    ///
    /// # Errors
    ///
    /// [`MapError::Empty`] for a zero-length or wrapping area and
    /// [`MapError::Overlap`] if it intersects an existing area.
    pub fn map(&self, start: VirtAddr, len: u64, perms: Perms) -> Result<Vma, MapError> {
        let end = start.add(len);
        if end.val() <= start.val() {
            return Err(MapError::Empty { start, end });
        }
        let mut vmas = self.vmas.write().unwrap_or_else(PoisonError::into_inner);
        let overlaps = vmas
            .range(..end.val())
            .next_back()
            .is_some_and(|(_, vma)| vma.end.val() > start.val());
        if overlaps {
            return Err(MapError::Overlap { start, end });
        }
        let vma = Vma { start, end, perms };
        let _ = vmas.insert(start.val(), vma);
        Ok(vma)
    }

    /// Returns the area containing `addr`, if any.
    pub fn find_vma(&self, addr: VirtAddr) -> Option<Vma> {
        let vmas = self.vmas.read().unwrap_or_else(PoisonError::into_inner);
        vmas.range(..=addr.val())
            .next_back()
            .map(|(_, vma)| *vma)
            .filter(|vma| vma.contains(addr))
    }

    /// Number of mapped areas.
    pub fn len(&self) -> usize {
        self.vmas.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns `true` if nothing is mapped.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Classifies a user fault at `addr` for `SIGSEGV` delivery.
    ///
    /// Addresses at or above `task_size` are access errors without a lookup.
    /// Otherwise the read lock is held only for the lookup itself.
    ///
    /// # Returns
    ///
    /// [`SigCode::AccErr`] if `addr` is inside some area (or beyond the user
    /// boundary), [`SigCode::MapErr`] otherwise.
    pub fn classify_fault(&self, addr: VirtAddr, task_size: u64) -> SigCode {
        if addr.val() >= task_size {
            return SigCode::AccErr;
        }
        let code = match self.find_vma(addr) {
            Some(_) => SigCode::AccErr,
            None => SigCode::MapErr,
        };
        trace!(%addr, %code, "classified user fault");
        code
    }
}
