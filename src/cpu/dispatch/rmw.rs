/*!
rmw.rs - Shifts, rotates, increments and decrements

Overview
========
ASL / LSR / ROL / ROR work on A (accumulator mode) or on memory; INC / DEC
only on memory. Memory forms go through `execute::modify`, which performs
the read, dummy-write, final-write sequence of the real part.

INX / INY / DEX / DEY are register-only and wrap modulo 256.

Cycle Rules
===========
Read-modify-write costs are fixed per mode (zp 5, zp,X 6, abs 6, abs,X 7);
abs,X never takes a page-cross penalty because the worst case is already
in the base count.
*/

use crate::cpu::addressing::Operand;
use crate::cpu::execute::{self, load, modify};
use crate::cpu::state::CpuState;
use crate::memory::Memory;

pub(crate) fn asl(cpu: &mut CpuState, mem: &mut dyn Memory, op: Operand) -> u32 {
    modify(cpu, mem, op, execute::asl);
    0
}

pub(crate) fn lsr(cpu: &mut CpuState, mem: &mut dyn Memory, op: Operand) -> u32 {
    modify(cpu, mem, op, execute::lsr);
    0
}

pub(crate) fn rol(cpu: &mut CpuState, mem: &mut dyn Memory, op: Operand) -> u32 {
    modify(cpu, mem, op, execute::rol);
    0
}

pub(crate) fn ror(cpu: &mut CpuState, mem: &mut dyn Memory, op: Operand) -> u32 {
    modify(cpu, mem, op, execute::ror);
    0
}

pub(crate) fn inc(cpu: &mut CpuState, mem: &mut dyn Memory, op: Operand) -> u32 {
    modify(cpu, mem, op, |c, v| load(c, v.wrapping_add(1)));
    0
}

pub(crate) fn dec(cpu: &mut CpuState, mem: &mut dyn Memory, op: Operand) -> u32 {
    modify(cpu, mem, op, |c, v| load(c, v.wrapping_sub(1)));
    0
}

// ---------------------------------------------------------------------------
// Register increments
// ---------------------------------------------------------------------------

pub(crate) fn inx(cpu: &mut CpuState, _mem: &mut dyn Memory, _op: Operand) -> u32 {
    let r = cpu.x.wrapping_add(1);
    cpu.x = load(cpu, r);
    0
}

pub(crate) fn iny(cpu: &mut CpuState, _mem: &mut dyn Memory, _op: Operand) -> u32 {
    let r = cpu.y.wrapping_add(1);
    cpu.y = load(cpu, r);
    0
}

pub(crate) fn dex(cpu: &mut CpuState, _mem: &mut dyn Memory, _op: Operand) -> u32 {
    let r = cpu.x.wrapping_sub(1);
    cpu.x = load(cpu, r);
    0
}

pub(crate) fn dey(cpu: &mut CpuState, _mem: &mut dyn Memory, _op: Operand) -> u32 {
    let r = cpu.y.wrapping_sub(1);
    cpu.y = load(cpu, r);
    0
}
