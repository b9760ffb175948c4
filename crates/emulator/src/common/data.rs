//! Memory Access Types.
//!
//! This module defines the classification of memory accesses used by the emulator.
//! These types are used for the following:
//! 1. **Permission Validation:** Checking read/write/execute permissions on simulated pages.
//! 2. **Fault Generation:** Determining which kind of access failed.
//! 3. **Access Widths:** Naming the primitive and emulated transfer sizes.

use std::fmt;

/// Type of memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessType {
    /// Instruction fetch access.
    ///
    /// Used when the user handler re-reads the faulting instruction word.
    /// Requires execute permission.
    Fetch,

    /// Data read access.
    ///
    /// Occurs during load emulation. Requires read permission.
    Read,

    /// Data write access.
    ///
    /// Occurs during store emulation. Requires write permission.
    Write,
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Fetch => "fetch",
            Self::Read => "read",
            Self::Write => "write",
        };
        f.write_str(s)
    }
}

/// Width of a memory transfer.
///
/// Primitive widths (1, 2, 4, 8) are what the guest memory seam accepts;
/// the vector widths (16, 32) only appear in decoded access descriptors and
/// are synthesised from quadword lanes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Width {
    /// 1 byte.
    Byte,
    /// 2 bytes (halfword).
    Half,
    /// 4 bytes (word).
    Word,
    /// 8 bytes (longword / quadword).
    Long,
    /// 16 bytes: two 8-byte lanes.
    Vec2,
    /// 32 bytes: four 8-byte lanes.
    Vec4,
}

impl Width {
    /// Returns the transfer size in bytes.
    #[inline(always)]
    pub const fn bytes(self) -> u64 {
        match self {
            Self::Byte => 1,
            Self::Half => 2,
            Self::Word => 4,
            Self::Long => 8,
            Self::Vec2 => 16,
            Self::Vec4 => 32,
        }
    }

    /// Returns the transfer size in bits.
    #[inline(always)]
    pub const fn bits(self) -> u32 {
        (self.bytes() * 8) as u32
    }

    /// Returns the number of 8-byte lanes a vector width spans (1 for scalars).
    pub const fn lanes(self) -> usize {
        match self {
            Self::Vec2 => 2,
            Self::Vec4 => 4,
            _ => 1,
        }
    }

    /// Returns `true` for widths the memory seam can transfer in one access.
    pub const fn is_primitive(self) -> bool {
        matches!(self, Self::Byte | Self::Half | Self::Word | Self::Long)
    }

    /// Mask selecting the low `bytes()` bytes of a 64-bit value.
    ///
    /// Vector widths return the full 64-bit mask of a single lane.
    #[inline(always)]
    pub const fn mask(self) -> u64 {
        match self {
            Self::Byte => 0xff,
            Self::Half => 0xffff,
            Self::Word => 0xffff_ffff,
            Self::Long | Self::Vec2 | Self::Vec4 => u64::MAX,
        }
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}B", self.bytes())
    }
}

bitflags::bitflags! {
    /// Access permissions of a mapping.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Perms: u8 {
        /// Readable.
        const READ = 1 << 0;
        /// Writable.
        const WRITE = 1 << 1;
        /// Executable.
        const EXEC = 1 << 2;
        /// Read and write.
        const RW = Self::READ.bits() | Self::WRITE.bits();
        /// Read and execute.
        const RX = Self::READ.bits() | Self::EXEC.bits();
    }
}

impl Perms {
    /// Returns `true` if these permissions allow `access`.
    pub fn allows(self, access: AccessType) -> bool {
        match access {
            AccessType::Fetch => self.contains(Self::EXEC),
            AccessType::Read => self.contains(Self::READ),
            AccessType::Write => self.contains(Self::WRITE),
        }
    }
}
