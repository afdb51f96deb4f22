/*!
load_store.rs - LDA / LDX / LDY / STA / STX / STY

Loads copy the operand into a register and update Z/N from it. Stores copy a
register to the operand address and leave the flags alone.

Page-cross penalties for the indexed load forms are applied by the cycle
accounting from the descriptor; handlers here never return extra cycles.
*/

use crate::cpu::addressing::Operand;
use crate::cpu::execute::{load, read_operand, write_operand};
use crate::cpu::state::CpuState;
use crate::memory::Memory;

pub(crate) fn lda(cpu: &mut CpuState, mem: &mut dyn Memory, op: Operand) -> u32 {
    let v = read_operand(cpu, mem, op);
    cpu.a = load(cpu, v);
    0
}

pub(crate) fn ldx(cpu: &mut CpuState, mem: &mut dyn Memory, op: Operand) -> u32 {
    let v = read_operand(cpu, mem, op);
    cpu.x = load(cpu, v);
    0
}

pub(crate) fn ldy(cpu: &mut CpuState, mem: &mut dyn Memory, op: Operand) -> u32 {
    let v = read_operand(cpu, mem, op);
    cpu.y = load(cpu, v);
    0
}

pub(crate) fn sta(cpu: &mut CpuState, mem: &mut dyn Memory, op: Operand) -> u32 {
    let a = cpu.a;
    write_operand(cpu, mem, op, a);
    0
}

pub(crate) fn stx(cpu: &mut CpuState, mem: &mut dyn Memory, op: Operand) -> u32 {
    let x = cpu.x;
    write_operand(cpu, mem, op, x);
    0
}

pub(crate) fn sty(cpu: &mut CpuState, mem: &mut dyn Memory, op: Operand) -> u32 {
    let y = cpu.y;
    write_operand(cpu, mem, op, y);
    0
}
