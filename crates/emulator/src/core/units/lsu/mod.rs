//! Load/Store Unit (LSU).
//!
//! This module groups the memory-side algorithms of the emulator:
//! - [`unaligned`]: reconstruction of unaligned accesses from aligned primitives.

/// Unaligned access synthesis.
pub mod unaligned;

pub use unaligned::{load_lanes, load_unaligned, split_store, store_lanes};
