/*!
arithmetic.rs - ADC / SBC opcode family

Overview
========
Both instructions read their operand and defer to the binary adder in
`execute` (`add_with_carry` / `subtract_with_carry`). The D flag is ignored;
the NES CPU has no decimal adder.

Flags
=====
C: carry out of bit 7 (ADC) / no borrow (SBC)
Z, N: from the result
V: signed overflow
*/

use crate::cpu::addressing::Operand;
use crate::cpu::execute::{add_with_carry, read_operand, subtract_with_carry};
use crate::cpu::state::CpuState;
use crate::memory::Memory;

pub(crate) fn adc(cpu: &mut CpuState, mem: &mut dyn Memory, op: Operand) -> u32 {
    let v = read_operand(cpu, mem, op);
    add_with_carry(cpu, v);
    0
}

pub(crate) fn sbc(cpu: &mut CpuState, mem: &mut dyn Memory, op: Operand) -> u32 {
    let v = read_operand(cpu, mem, op);
    subtract_with_carry(cpu, v);
    0
}
