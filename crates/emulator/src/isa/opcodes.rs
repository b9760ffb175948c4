//! SW64 memory-instruction major opcodes.
//!
//! Defines the 6-bit major opcodes (bits 31-26) of the memory instructions the
//! unaligned-access emulator recognises.

/// Load word and broadcast to every word slot of a vector register (`ldwe`).
pub const OP_LDWE: u32 = 0x09;

/// Load word and replicate into both lanes of a 2-lane vector (`ldse`).
pub const OP_LDSE: u32 = 0x0a;

/// Load quadword and replicate into all four lanes (`ldde`).
pub const OP_LDDE: u32 = 0x0b;

/// Vector load, 2 x 8 bytes (`vlds`).
pub const OP_VLDS: u32 = 0x0c;

/// Vector load, 4 x 8 bytes (`vldd`).
pub const OP_VLDD: u32 = 0x0d;

/// Vector store, 2 x 8 bytes (`vsts`).
pub const OP_VSTS: u32 = 0x0e;

/// Vector store, 4 x 8 bytes (`vstd`).
pub const OP_VSTD: u32 = 0x0f;

/// Load byte unsigned (`ldbu`). Never emulated.
pub const OP_LDBU: u32 = 0x20;

/// Load halfword unsigned (`ldhu`).
pub const OP_LDHU: u32 = 0x21;

/// Load word, sign-extended (`ldw`).
pub const OP_LDW: u32 = 0x22;

/// Load longword (`ldl`).
pub const OP_LDL: u32 = 0x23;

/// Load S-float (`flds`).
pub const OP_FLDS: u32 = 0x26;

/// Load T-float (`fldd`).
pub const OP_FLDD: u32 = 0x27;

/// Store byte (`stb`). Never emulated.
pub const OP_STB: u32 = 0x28;

/// Store halfword (`sth`).
pub const OP_STH: u32 = 0x29;

/// Store word (`stw`).
pub const OP_STW: u32 = 0x2a;

/// Store longword (`stl`).
pub const OP_STL: u32 = 0x2b;

/// Store S-float (`fsts`).
pub const OP_FSTS: u32 = 0x2e;

/// Store T-float (`fstd`).
pub const OP_FSTD: u32 = 0x2f;
