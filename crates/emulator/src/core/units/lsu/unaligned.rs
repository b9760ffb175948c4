//! Unaligned memory access synthesis.
//!
//! This module reconstructs unaligned loads and stores from naturally aligned
//! primitive accesses. It provides:
//! 1. **Alignment Checks:** `is_aligned` for access-size validation.
//! 2. **Scalar Loads:** Two overlapping aligned loads combined by an offset-dependent shift.
//! 3. **Scalar Stores:** One single-byte store per byte of the value.
//! 4. **Vector Lanes:** Quadword-lane loads and stores for 16- and 32-byte transfers.
//!
//! Every primitive access is individually fault-checked. The first failure aborts
//! the sequence and is reported as [`EmulationError::Synthetic`] carrying the
//! zero-based index of the failed sub-access. Bytes already written by a store
//! sequence stay written.

use tracing::trace;

use crate::common::{AccessFault, AccessType, EmulationError, VirtAddr, Width};
use crate::soc::GuestMemory;

/// Checks whether a memory access at `addr` with `size` bytes is naturally aligned.
///
/// # Arguments
///
/// * `addr` - The byte address of the access.
/// * `size` - The access width in bytes (1, 2, 4, 8, 16 or 32).
///
/// # Returns
///
/// `true` if the access is naturally aligned.
pub const fn is_aligned(addr: u64, size: u64) -> bool {
    if size == 0 || size == 1 {
        return true;
    }
    (addr & (size - 1)) == 0
}

/// Combines two aligned `width`-sized words into the value at byte `offset`.
///
/// `lo` is the word at `floor(A)`, `hi` the word at `floor(A + N - 1)`; the
/// result is the `N` bytes starting `offset` bytes into `lo`, zero-extended.
/// For `offset == 0` the result is `lo`.
///
/// # Arguments
///
/// * `lo` - The aligned word containing the first requested byte.
/// * `hi` - The aligned word containing the last requested byte.
/// * `offset` - `A mod N`.
/// * `width` - A primitive width.
///
/// # Returns
///
/// The reconstructed little-endian value.
#[inline]
pub const fn combine(lo: u64, hi: u64, offset: u64, width: Width) -> u64 {
    let mask = width.mask();
    let pair = (((hi & mask) as u128) << width.bits()) | ((lo & mask) as u128);
    ((pair >> (offset * 8)) as u64) & mask
}

/// Sign-extends the low `width` bytes of `val` to 64 bits.
#[inline]
pub const fn sign_extend(val: u64, width: Width) -> u64 {
    let shift = 64 - width.bits();
    (((val << shift) as i64) >> shift) as u64
}

/// Wraps a primitive fault with its position in the access sequence.
const fn synthetic(index: usize, fault: AccessFault) -> EmulationError {
    EmulationError::Synthetic { index, fault }
}

/// Loads `width` bytes from a possibly unaligned `addr`.
///
/// Issues exactly two aligned loads, at `floor_N(addr)` and
/// `floor_N(addr + N - 1)`, and combines them. Both loads are issued even when
/// they coincide.
///
/// # Arguments
///
/// * `mem` - Guest memory of the interrupted context.
/// * `addr` - The possibly unaligned address.
/// * `width` - A primitive width (2, 4 or 8 bytes in practice).
///
/// # Returns
///
/// The value zero-extended to 64 bits.
///
/// # Errors
///
/// [`EmulationError::Synthetic`] with index 0 or 1 if either load faults.
pub fn load_unaligned<M: GuestMemory + ?Sized>(
    mem: &mut M,
    addr: VirtAddr,
    width: Width,
) -> Result<u64, EmulationError> {
    let n = width.bytes();
    let lo_addr = addr.align_down(n);
    let hi_addr = addr.add(n - 1).align_down(n);

    let lo = mem
        .load(lo_addr, width, AccessType::Read)
        .map_err(|f| synthetic(0, f))?;
    let hi = mem
        .load(hi_addr, width, AccessType::Read)
        .map_err(|f| synthetic(1, f))?;

    let val = combine(lo, hi, addr.offset_in(n), width);
    trace!(%addr, %width, lo = %lo_addr, hi = %hi_addr, val, "synthesised load");
    Ok(val)
}

/// Stores the low `width` bytes of `val` at a possibly unaligned `addr`.
///
/// Each byte is written by its own single-byte store, lowest address first.
///
/// # Arguments
///
/// * `mem` - Guest memory of the interrupted context.
/// * `addr` - The possibly unaligned address.
/// * `width` - A primitive width.
/// * `val` - The value to store (little-endian).
///
/// # Errors
///
/// [`EmulationError::Synthetic`] with the index of the first byte store that faulted.
pub fn split_store<M: GuestMemory + ?Sized>(
    mem: &mut M,
    addr: VirtAddr,
    width: Width,
    val: u64,
) -> Result<(), EmulationError> {
    for i in 0..width.bytes() {
        let byte = ((val >> (i * 8)) & 0xFF) as u8;
        mem.write_u8(addr.add(i), byte)
            .map_err(|f| synthetic(i as usize, f))?;
    }
    trace!(%addr, %width, val, "synthesised store");
    Ok(())
}

/// Loads `lanes` consecutive quadwords from a possibly unaligned `addr`.
///
/// An aligned address needs `lanes` aligned quadword loads; an unaligned one
/// needs `lanes + 1`, and lane `i` is the combination of quadwords `i` and `i + 1`.
///
/// # Arguments
///
/// * `mem` - Guest memory of the interrupted context.
/// * `addr` - Start of the vector.
/// * `lanes` - Number of 8-byte lanes (2 or 4).
///
/// # Returns
///
/// The lane values, lowest address first.
///
/// # Errors
///
/// [`EmulationError::Synthetic`] with the index of the first quadword load that faulted.
pub fn load_lanes<M: GuestMemory + ?Sized>(
    mem: &mut M,
    addr: VirtAddr,
    lanes: usize,
) -> Result<Vec<u64>, EmulationError> {
    let offset = addr.offset_in(8);
    let base = addr.align_down(8);
    let loads = if offset == 0 { lanes } else { lanes + 1 };

    let mut quads = Vec::with_capacity(loads);
    for i in 0..loads {
        let q = mem
            .read_u64(base.add(8 * i as u64))
            .map_err(|f| synthetic(i, f))?;
        quads.push(q);
    }

    if offset == 0 {
        return Ok(quads);
    }
    Ok(quads
        .windows(2)
        .map(|w| combine(w[0], w[1], offset, Width::Long))
        .collect())
}

/// Stores quadword `lanes` at a possibly unaligned `addr`.
///
/// An 8-byte-aligned address is written with one aligned quadword store per
/// lane; anything else falls back to single-byte stores.
///
/// # Arguments
///
/// * `mem` - Guest memory of the interrupted context.
/// * `addr` - Start of the vector.
/// * `lanes` - Lane values, lowest address first.
///
/// # Errors
///
/// [`EmulationError::Synthetic`] with the index of the first store that faulted,
/// counted across all lanes.
pub fn store_lanes<M: GuestMemory + ?Sized>(
    mem: &mut M,
    addr: VirtAddr,
    lanes: &[u64],
) -> Result<(), EmulationError> {
    if addr.is_aligned(8) {
        for (i, &lane) in lanes.iter().enumerate() {
            mem.store(addr.add(8 * i as u64), Width::Long, lane)
                .map_err(|f| synthetic(i, f))?;
        }
        return Ok(());
    }

    for (i, &lane) in lanes.iter().enumerate() {
        let lane_addr = addr.add(8 * i as u64);
        split_store(mem, lane_addr, Width::Long, lane).map_err(|e| match e {
            EmulationError::Synthetic { index, fault } => synthetic(i * 8 + index, fault),
            other => other,
        })?;
    }
    Ok(())
}
