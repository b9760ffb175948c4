//! SW64 unaligned-access emulation library.
//!
//! This crate emulates loads and stores that trapped because their address was
//! not naturally aligned. It provides the following:
//! 1. **Trap Handlers:** Kernel-mode and user-mode entry points that decode the
//!    faulting access, emulate it and report a [`Disposition`].
//! 2. **Synthesis:** Reconstruction of unaligned accesses from naturally aligned
//!    primitive loads and single-byte stores.
//! 3. **ISA:** Opcode decode tables for integer, floating-point and vector memory
//!    instructions, plus S-float memory/register conversion.
//! 4. **Kernel Collaborators:** Tasks with UAC policy flags, VMA lookup,
//!    exception-table fix-ups, message rate limiting and the die path.
//! 5. **Support:** Configuration, statistics and a sparse simulated guest memory.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use sw64_unaligned::common::{Perms, RegisterAccess, VirtAddr};
//! use sw64_unaligned::core::arch::UserContext;
//! use sw64_unaligned::isa::instruction::encode_mem;
//! use sw64_unaligned::isa::opcodes::OP_LDL;
//! use sw64_unaligned::kernel::{AddressSpace, Task};
//! use sw64_unaligned::soc::SparseMemory;
//! use sw64_unaligned::{Disposition, Emulator};
//!
//! let text = VirtAddr::new(0x1_2000_0000);
//! let data = VirtAddr::new(0x1_4000_0000);
//!
//! let mut mem = SparseMemory::new();
//! mem.map(text, 0x2000, Perms::RX).unwrap();
//! mem.map(data, 0x2000, Perms::RW).unwrap();
//! assert!(mem.poke(text, &encode_mem(OP_LDL, 1, 16, 3).to_le_bytes()));
//! assert!(mem.poke(data.add(3), &0x1122_3344_5566_7788u64.to_le_bytes()));
//!
//! let task = Task::new("demo", 42, Arc::new(AddressSpace::new()));
//! let mut ctx = UserContext::with_pc(text.val() + 4);
//!
//! let emu = Emulator::default();
//! let outcome = emu.handle_user_unaligned(&mut mem, &task, data.add(3), OP_LDL, 1, &mut ctx);
//! assert_eq!(outcome, Disposition::Resume);
//! assert_eq!(ctx.read_reg(1), 0x1122_3344_5566_7788);
//! ```

/// Common types and constants (addresses, errors, signals, register access).
pub mod common;
/// Emulator configuration (defaults and hierarchical config structures).
pub mod config;
/// Saved register contexts and the synthesis/conversion units.
pub mod core;
/// Instruction set (opcodes, decode tables, instruction fields, disassembly).
pub mod isa;
/// Kernel collaborators (tasks, VMAs, exception tables, rate limiting, die path).
pub mod kernel;
/// Guest memory seam and its sparse simulation.
pub mod soc;
/// Unaligned-access statistics.
pub mod stats;
/// Kernel-mode and user-mode trap handlers.
pub mod trap;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Trap handler outcome.
pub use crate::trap::Disposition;
/// The emulator; owns configuration, statistics and the exception table.
pub use crate::trap::Emulator;
