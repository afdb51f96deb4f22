/*!
branches.rs - Relative branch opcode handlers (BPL/BMI/BVC/BVS/BCC/BCS/BNE/BEQ)

Overview
========
Operand resolution has already consumed the displacement and computed the
target relative to the next instruction, so a handler only evaluates its
condition and, when taken, moves PC to the target.

Cycle Rules
===========
Base cost: 2 cycles.
If branch is taken: +1 cycle.
If branch is taken and target crosses a page boundary: +2 total (vs base).

The extra is returned to the dispatcher (`cycles::branch_penalty`); the
descriptor for relative mode carries no page penalty of its own.
*/

use crate::cpu::addressing::Operand;
use crate::cpu::cycles::branch_penalty;
use crate::cpu::state::CpuState;
use crate::cpu::status::Flag;
use crate::memory::Memory;

#[inline]
fn branch_if(cpu: &mut CpuState, op: Operand, cond: bool) -> u32 {
    match op {
        Operand::Address { addr, page_crossed } if cond => {
            cpu.pc = addr;
            branch_penalty(true, page_crossed)
        }
        _ => branch_penalty(false, false),
    }
}

pub(crate) fn bpl(cpu: &mut CpuState, _mem: &mut dyn Memory, op: Operand) -> u32 {
    let cond = cpu.status.is_clear(Flag::NEGATIVE);
    branch_if(cpu, op, cond)
}

pub(crate) fn bmi(cpu: &mut CpuState, _mem: &mut dyn Memory, op: Operand) -> u32 {
    let cond = cpu.status.is_set(Flag::NEGATIVE);
    branch_if(cpu, op, cond)
}

pub(crate) fn bvc(cpu: &mut CpuState, _mem: &mut dyn Memory, op: Operand) -> u32 {
    let cond = cpu.status.is_clear(Flag::OVERFLOW);
    branch_if(cpu, op, cond)
}

pub(crate) fn bvs(cpu: &mut CpuState, _mem: &mut dyn Memory, op: Operand) -> u32 {
    let cond = cpu.status.is_set(Flag::OVERFLOW);
    branch_if(cpu, op, cond)
}

pub(crate) fn bcc(cpu: &mut CpuState, _mem: &mut dyn Memory, op: Operand) -> u32 {
    let cond = cpu.status.is_clear(Flag::CARRY);
    branch_if(cpu, op, cond)
}

pub(crate) fn bcs(cpu: &mut CpuState, _mem: &mut dyn Memory, op: Operand) -> u32 {
    let cond = cpu.status.is_set(Flag::CARRY);
    branch_if(cpu, op, cond)
}

pub(crate) fn bne(cpu: &mut CpuState, _mem: &mut dyn Memory, op: Operand) -> u32 {
    let cond = cpu.status.is_clear(Flag::ZERO);
    branch_if(cpu, op, cond)
}

pub(crate) fn beq(cpu: &mut CpuState, _mem: &mut dyn Memory, op: Operand) -> u32 {
    let cond = cpu.status.is_set(Flag::ZERO);
    branch_if(cpu, op, cond)
}
