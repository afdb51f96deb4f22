/*!
logical.rs - AND / ORA / EOR / BIT

AND, ORA and EOR combine the operand into A and update Z/N. BIT sets Z from
A & M and copies bits 7 and 6 of M into N and V, leaving A untouched.
*/

use crate::cpu::addressing::Operand;
use crate::cpu::execute::{bit_test, load, read_operand};
use crate::cpu::state::CpuState;
use crate::memory::Memory;

pub(crate) fn and(cpu: &mut CpuState, mem: &mut dyn Memory, op: Operand) -> u32 {
    let v = read_operand(cpu, mem, op);
    let r = cpu.a & v;
    cpu.a = load(cpu, r);
    0
}

pub(crate) fn ora(cpu: &mut CpuState, mem: &mut dyn Memory, op: Operand) -> u32 {
    let v = read_operand(cpu, mem, op);
    let r = cpu.a | v;
    cpu.a = load(cpu, r);
    0
}

pub(crate) fn eor(cpu: &mut CpuState, mem: &mut dyn Memory, op: Operand) -> u32 {
    let v = read_operand(cpu, mem, op);
    let r = cpu.a ^ v;
    cpu.a = load(cpu, r);
    0
}

pub(crate) fn bit(cpu: &mut CpuState, mem: &mut dyn Memory, op: Operand) -> u32 {
    let v = read_operand(cpu, mem, op);
    bit_test(cpu, v);
    0
}
