/*!
control_flow.rs - JMP / JSR / RTS / BRK / RTI

Overview
========
- JMP: PC <- operand address (absolute, or indirect with the $xxFF page-wrap
  quirk applied during resolution).
- JSR: push (address of last JSR byte) = PC - 1, then PC <- target.
- RTS: pull PC, then PC + 1.
- BRK: skip the padding byte, push PC, push P with B and U set, set I, load
  PC from $FFFE/$FFFF.
- RTI: pull P verbatim, then pull PC (no +1).

All return-address arithmetic wraps at 16 bits, so a JSR sitting at the top
of the address space returns to $0000 and onward.
*/

use crate::cpu::addressing::Operand;
use crate::cpu::state::{CpuState, IRQ_VECTOR};
use crate::cpu::status::{Flag, StatusRegister};
use crate::memory::Memory;

pub(crate) fn jmp(cpu: &mut CpuState, _mem: &mut dyn Memory, op: Operand) -> u32 {
    if let Some(target) = op.address() {
        cpu.pc = target;
    }
    0
}

pub(crate) fn jsr(cpu: &mut CpuState, mem: &mut dyn Memory, op: Operand) -> u32 {
    if let Some(target) = op.address() {
        let ret = cpu.pc.wrapping_sub(1);
        cpu.push_u16(mem, ret);
        cpu.pc = target;
    }
    0
}

pub(crate) fn rts(cpu: &mut CpuState, mem: &mut dyn Memory, _op: Operand) -> u32 {
    cpu.pc = cpu.pop_u16(mem).wrapping_add(1);
    0
}

pub(crate) fn brk(cpu: &mut CpuState, mem: &mut dyn Memory, _op: Operand) -> u32 {
    // Padding byte after the opcode.
    cpu.advance_pc(1);
    let pc = cpu.pc;
    cpu.push_u16(mem, pc);
    let p = cpu.status.for_push(true);
    cpu.push_u8(mem, p);
    cpu.status.set(Flag::IRQ_DISABLE);
    cpu.pc = mem.read_word(IRQ_VECTOR);
    0
}

pub(crate) fn rti(cpu: &mut CpuState, mem: &mut dyn Memory, _op: Operand) -> u32 {
    cpu.status = StatusRegister::from_bits(cpu.pop_u8(mem));
    cpu.pc = cpu.pop_u16(mem);
    0
}
