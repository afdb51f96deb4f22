//! Shared test utilities for building small programs in a flat address
//! space.
//!
//! `setup(prg)` places `prg` at [`ORIGIN`], points the reset vector at it and
//! returns a CPU that has already been reset. IRQ and NMI vectors are left at
//! $0000 unless a test sets them.

use crate::cpu::core::Cpu;
use crate::memory::FlatMemory;

/// Load address used by `setup`.
pub const ORIGIN: u16 = 0x8000;

/// Build memory holding `prg` at `ORIGIN` and a CPU reset into it.
pub fn setup(prg: &[u8]) -> (Cpu, FlatMemory) {
    let mut mem = FlatMemory::with_program(ORIGIN, prg);
    let mut cpu = Cpu::new();
    cpu.reset(&mut mem);
    (cpu, mem)
}
