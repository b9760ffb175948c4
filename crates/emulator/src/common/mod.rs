//! Common utilities and types used throughout the unaligned-access emulator.
//!
//! This module provides fundamental building blocks shared by the decoders,
//! the synthesis units and the trap handlers. It includes:
//! 1. **Address Types:** A strong type for faulting virtual addresses.
//! 2. **Constants:** Page geometry, register roles, and opcode field layout.
//! 3. **Memory Access:** Access direction and transfer width definitions.
//! 4. **Error Handling:** Access faults, emulation errors, and setup errors.
//! 5. **Signals:** Signal numbers, `si_code` values, and `SigInfo` records.
//! 6. **Register Access:** A uniform accessor over differently laid out contexts.

/// Address type definitions.
pub mod addr;

/// Architecture constants.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Error types.
pub mod error;

/// Register accessor trait.
pub mod reg;

/// Signal definitions.
pub mod signal;

pub use addr::VirtAddr;
pub use data::{AccessType, Perms, Width};
pub use error::{AccessFault, ConfigError, EmulationError, FaultKind, MapError};
pub use reg::RegisterAccess;
pub use signal::{SigCode, SigInfo, Signal};
