//! Kernel collaborators of the unaligned-trap handlers.
//!
//! The handlers depend on a handful of kernel services that are not part of the
//! emulation itself:
//! 1. **Tasks:** Identity, UAC policy flags, the signal queue and the dying flag.
//! 2. **Address Spaces:** The VMA list used to classify user faults.
//! 3. **Exception Tables:** Fix-up lookup and application for kernel faults.
//! 4. **Rate Limiting:** Throttling of the user-fault notice.
//! 5. **Die Path:** Fatal fault reporting.

/// Fatal kernel fault reporting.
pub mod die;

/// Exception-table fix-ups.
pub mod extable;

/// Virtual memory areas.
pub mod mm;

/// Message rate limiting.
pub mod ratelimit;

/// Task state.
pub mod task;

pub use die::{DieAction, DieReport, die};
pub use extable::{ExceptionTable, ExceptionTableEntry, ExceptionTableSearch, fixup_exception};
pub use mm::{AddressSpace, Vma};
pub use ratelimit::RateLimiter;
pub use task::{Task, UacFlags};
