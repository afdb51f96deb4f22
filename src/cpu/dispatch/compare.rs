/*!
compare.rs - CMP / CPX / CPY

Each compares a register with the operand via `execute::compare`:
C = reg >= M, Z = reg == M, N = bit 7 of (reg - M). No register changes.
*/

use crate::cpu::addressing::Operand;
use crate::cpu::execute::{compare, read_operand};
use crate::cpu::state::CpuState;
use crate::memory::Memory;

pub(crate) fn cmp(cpu: &mut CpuState, mem: &mut dyn Memory, op: Operand) -> u32 {
    let v = read_operand(cpu, mem, op);
    let a = cpu.a;
    compare(cpu, a, v);
    0
}

pub(crate) fn cpx(cpu: &mut CpuState, mem: &mut dyn Memory, op: Operand) -> u32 {
    let v = read_operand(cpu, mem, op);
    let x = cpu.x;
    compare(cpu, x, v);
    0
}

pub(crate) fn cpy(cpu: &mut CpuState, mem: &mut dyn Memory, op: Operand) -> u32 {
    let v = read_operand(cpu, mem, op);
    let y = cpu.y;
    compare(cpu, y, v);
    0
}
