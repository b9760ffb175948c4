use std::sync::Arc;

use sw64_unaligned::Config;
use sw64_unaligned::common::{Perms, VirtAddr};
use sw64_unaligned::core::arch::{AllRegs, UserContext};
use sw64_unaligned::kernel::{AddressSpace, ExceptionTable, ExceptionTableSearch, Task};
use sw64_unaligned::soc::SparseMemory;
use sw64_unaligned::trap::{Disposition, Emulator};

use crate::common::mocks::memory::CountingMemory;

/// User text segment; the faulting instruction lives at its start.
pub const TEXT: u64 = 0x1_2000_0000;
/// User data segment.
pub const DATA: u64 = 0x1_4000_0000;
/// Length of the user data segment.
pub const DATA_LEN: u64 = 0x4000;

/// Kernel text; matches the default diagnostics range.
pub const KTEXT: u64 = 0xfff0_0000_0091_0000;
/// Kernel data.
pub const KDATA: u64 = 0xfff0_0000_0400_0000;
/// Kernel stack region (one 8 KiB page).
pub const KSTACK: u64 = 0xfff0_0000_0500_0000;

/// Offset of the faulting kernel instruction inside [`KTEXT`].
pub const KFAULT_OFFSET: u64 = 0x100;

/// Installs a test subscriber honouring `RUST_LOG`. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Config with the user notice disabled, to keep test output quiet.
pub fn quiet_config() -> Config {
    let mut config = Config::default();
    config.general.print_unaligned = false;
    config
}

/// A user task with text and data mapped both in memory and in its VMA list.
#[derive(Debug)]
pub struct UserFixture {
    pub mem: CountingMemory,
    pub task: Task,
    pub ctx: UserContext,
    pub emu: Emulator,
}

impl Default for UserFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl UserFixture {
    pub fn new() -> Self {
        Self::with_config(quiet_config())
    }

    pub fn with_config(config: Config) -> Self {
        init_tracing();
        let mm = Arc::new(AddressSpace::new());
        let mut mem = SparseMemory::new();
        for (start, len, perms) in [(TEXT, 0x2000, Perms::RX), (DATA, DATA_LEN, Perms::RW)] {
            mem.map(VirtAddr::new(start), len, perms).unwrap();
            mm.map(VirtAddr::new(start), len, perms).unwrap();
        }
        Self {
            mem: CountingMemory::new(mem),
            task: Task::new("fixture", 100, mm),
            ctx: UserContext::with_pc(TEXT + 4),
            emu: Emulator::new(config),
        }
    }

    /// Writes the faulting instruction word.
    pub fn place_insn(&mut self, word: u32) {
        assert!(self.mem.inner.poke(VirtAddr::new(TEXT), &word.to_le_bytes()));
    }

    /// Writes raw bytes at `addr`.
    pub fn poke(&mut self, addr: u64, bytes: &[u8]) {
        assert!(self.mem.inner.poke(VirtAddr::new(addr), bytes));
    }

    /// Reads raw bytes at `addr`.
    pub fn peek(&self, addr: u64, len: usize) -> Vec<u8> {
        self.mem.inner.peek(VirtAddr::new(addr), len).unwrap()
    }

    /// Places `insn` and runs the user handler.
    pub fn run(&mut self, insn: u32, va: u64, opcode: u32, reg: usize) -> Disposition {
        self.place_insn(insn);
        self.mem.clear();
        self.emu.handle_user_unaligned(
            &mut self.mem,
            &self.task,
            VirtAddr::new(va),
            opcode,
            reg,
            &mut self.ctx,
        )
    }
}

/// Kernel text, data and stack mapped, with the saved pc just past
/// `KTEXT + KFAULT_OFFSET`.
#[derive(Debug)]
pub struct KernelFixture<T: ExceptionTableSearch = ExceptionTable> {
    pub mem: CountingMemory,
    pub task: Task,
    pub regs: AllRegs,
    pub emu: Emulator<T>,
}

impl KernelFixture {
    pub fn new() -> Self {
        Self::with_extable(Config::default(), ExceptionTable::new())
    }
}

impl Default for KernelFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ExceptionTableSearch> KernelFixture<T> {
    pub fn with_extable(config: Config, extable: T) -> Self {
        init_tracing();
        let mut mem = SparseMemory::new();
        mem.map(VirtAddr::new(KTEXT), 0x2000, Perms::RX).unwrap();
        mem.map(VirtAddr::new(KDATA), 0x2000, Perms::RW).unwrap();
        mem.map(VirtAddr::new(KSTACK), 0x2000, Perms::RW).unwrap();

        let mut regs = AllRegs::with_pc(KTEXT + KFAULT_OFFSET + 4);
        regs.regs[30] = KSTACK + 0x1f00;
        Self {
            mem: CountingMemory::new(mem),
            task: Task::new("kworker", 7, Arc::new(AddressSpace::new())),
            regs,
            emu: Emulator::with_extable(config, extable),
        }
    }

    /// Address of the instruction that took the trap.
    pub const fn fault_pc(&self) -> u64 {
        KTEXT + KFAULT_OFFSET
    }

    pub fn poke(&mut self, addr: u64, bytes: &[u8]) {
        assert!(self.mem.inner.poke(VirtAddr::new(addr), bytes));
    }

    pub fn peek(&self, addr: u64, len: usize) -> Vec<u8> {
        self.mem.inner.peek(VirtAddr::new(addr), len).unwrap()
    }

    pub fn run(&mut self, va: u64, opcode: u32, reg: usize) -> Disposition {
        self.mem.clear();
        self.emu.handle_kernel_unaligned(
            &mut self.mem,
            &self.task,
            VirtAddr::new(va),
            opcode,
            reg,
            &mut self.regs,
        )
    }
}
