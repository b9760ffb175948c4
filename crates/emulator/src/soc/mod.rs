//! Guest memory components.
//!
//! This module organizes the memory side of the emulator: the fault-reporting
//! access trait every synthetic access goes through, and a sparse simulated
//! address space implementing it.

/// Sparse region-based guest memory.
pub mod memory;

/// Guest memory access trait.
pub mod traits;

pub use memory::SparseMemory;
pub use traits::GuestMemory;
