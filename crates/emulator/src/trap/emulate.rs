//! Register-file side of the emulation.
//!
//! Moves the bytes produced by the aligned-access synthesis into the saved
//! register context, or reads the value to store out of it, according to the
//! decoded [`AccessKind`].

use crate::common::{EmulationError, RegisterAccess, Width};
use crate::core::arch::UserContext;
use crate::core::units::fpu::{s_mem_to_reg, s_reg_to_mem};
use crate::core::units::lsu::unaligned::sign_extend;
use crate::core::units::lsu::{load_lanes, load_unaligned, split_store, store_lanes};
use crate::isa::{AccessDescriptor, AccessKind, Direction};
use crate::soc::GuestMemory;

fn unsupported(desc: &AccessDescriptor) -> EmulationError {
    EmulationError::Unsupported {
        opcode: desc.opcode,
        reg: desc.reg,
    }
}

/// Emulates an integer load or store against integer registers.
///
/// # Errors
///
/// [`EmulationError::Synthetic`] if a sub-access faults;
/// [`EmulationError::Unsupported`] if `desc` is not an integer access.
pub(crate) fn emulate_int<M, R>(
    mem: &mut M,
    desc: &AccessDescriptor,
    regs: &mut R,
) -> Result<(), EmulationError>
where
    M: GuestMemory + ?Sized,
    R: RegisterAccess + ?Sized,
{
    let AccessKind::Int { sign_extend: sext } = desc.op.kind else {
        return Err(unsupported(desc));
    };
    let width = desc.op.width;
    match desc.op.direction {
        Direction::Load => {
            let raw = load_unaligned(mem, desc.addr, width)?;
            let val = if sext { sign_extend(raw, width) } else { raw };
            regs.write_reg(desc.reg, val);
        }
        Direction::Store => {
            split_store(mem, desc.addr, width, regs.read_reg(desc.reg))?;
        }
    }
    Ok(())
}

/// Emulates any user-mode access against the user context.
///
/// # Errors
///
/// [`EmulationError::Synthetic`] if a sub-access faults;
/// [`EmulationError::Unsupported`] for operation shapes no table produces.
pub(crate) fn emulate_user<M: GuestMemory + ?Sized>(
    mem: &mut M,
    desc: &AccessDescriptor,
    ctx: &mut UserContext,
) -> Result<(), EmulationError> {
    let (addr, reg, width) = (desc.addr, desc.reg, desc.op.width);
    match (desc.op.direction, desc.op.kind) {
        (_, AccessKind::Int { .. }) => emulate_int(mem, desc, ctx)?,

        (Direction::Load, AccessKind::FloatSingle) => {
            let raw = load_unaligned(mem, addr, Width::Word)?;
            ctx.fp.write(reg, s_mem_to_reg(raw as u32));
        }
        (Direction::Load, AccessKind::FloatDouble) => {
            let raw = load_unaligned(mem, addr, Width::Long)?;
            ctx.fp.write(reg, raw);
        }
        (Direction::Store, AccessKind::FloatSingle) => {
            let val = u64::from(s_reg_to_mem(ctx.fp.read(reg)));
            split_store(mem, addr, Width::Word, val)?;
        }
        (Direction::Store, AccessKind::FloatDouble) => {
            split_store(mem, addr, Width::Long, ctx.fp.read(reg))?;
        }

        (Direction::Load, AccessKind::Vector) => {
            match load_lanes(mem, addr, width.lanes())?.as_slice() {
                &[lo, hi] => ctx.fp.write_simd_s(reg, lo, hi),
                &[a, b, c, d] => ctx.fp.write_simd_d(reg, [a, b, c, d]),
                _ => return Err(unsupported(desc)),
            }
        }
        (Direction::Store, AccessKind::Vector) => {
            match width {
                Width::Vec2 => store_lanes(mem, addr, &ctx.fp.read_simd_s(reg))?,
                Width::Vec4 => store_lanes(mem, addr, &ctx.fp.read_simd_d(reg))?,
                _ => return Err(unsupported(desc)),
            }
        }

        (Direction::Load, AccessKind::Replicate) => match width {
            Width::Word => {
                let word = load_unaligned(mem, addr, Width::Word)?;
                let pair = word | (word << 32);
                ctx.fp.write_simd_s(reg, pair, pair);
            }
            Width::Long => {
                let quad = load_unaligned(mem, addr, Width::Long)?;
                ctx.fp.write_simd_d(reg, [quad; 4]);
            }
            _ => return Err(unsupported(desc)),
        },
        (Direction::Load, AccessKind::WordBroadcast) => {
            let word = load_unaligned(mem, addr, Width::Word)?;
            ctx.fp.write_simd_ldwe(reg, word as u32);
        }

        (Direction::Store, AccessKind::Replicate | AccessKind::WordBroadcast) => {
            return Err(unsupported(desc));
        }
    }
    Ok(())
}
