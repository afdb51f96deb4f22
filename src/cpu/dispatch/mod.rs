/*!
dispatch - Orchestrator for a single 6502 instruction step and for
interrupt entry.

Overview
========
`step` executes exactly one instruction:
1. Fetch the opcode at PC and advance PC.
2. Decode through the static table (`table::lookup`). Undefined bytes are
   handed to `finalize::undefined_opcode`.
3. Resolve the operand for the descriptor's addressing mode (advances PC
   past the operand bytes).
4. Run the family handler.
5. Account cycles: base + page penalty + handler extra (`cycles`).

Per-instruction trace lines belong to `core::Cpu::step` (feature `trace`);
this module only logs undefined opcodes.

`service_interrupt` performs the hardware interrupt entry sequence between
steps: push PC, push P (B clear, U set), set I, load the vector.

Family handlers
===============
load_store, arithmetic, logical, compare, rmw, branches, control_flow and
misc each hold the handlers for one instruction group. Handlers never fetch
opcode or operand bytes themselves.

Cycle accounting is returned to the caller; dispatch never keeps a running
total. `core::Cpu` owns the counter.
*/

pub(crate) mod arithmetic;
pub(crate) mod branches;
pub(crate) mod compare;
pub(crate) mod control_flow;
pub(crate) mod finalize;
pub(crate) mod load_store;
pub(crate) mod logical;
pub(crate) mod misc;
pub(crate) mod rmw;

use crate::cpu::addressing::resolve;
use crate::cpu::config::CpuConfig;
use crate::cpu::cycles::{instruction_cycles, INTERRUPT_CYCLES};
use crate::cpu::state::{CpuState, IRQ_VECTOR, NMI_VECTOR};
use crate::cpu::status::Flag;
use crate::cpu::table::lookup;
use crate::error::CpuResult;
use crate::memory::Memory;

/// Hardware interrupt line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    /// Non-maskable; vector $FFFA.
    Nmi,
    /// Maskable by the I flag; vector $FFFE.
    Irq,
}

impl Interrupt {
    #[inline]
    pub const fn vector(self) -> u16 {
        match self {
            Interrupt::Nmi => NMI_VECTOR,
            Interrupt::Irq => IRQ_VECTOR,
        }
    }
}

/// Execute one instruction and return the cycles it consumed.
pub(crate) fn step(cpu: &mut CpuState, mem: &mut dyn Memory, config: &CpuConfig) -> CpuResult<u32> {
    let address = cpu.pc;
    let opcode = cpu.fetch_u8(mem);

    let Some(instr) = lookup(opcode) else {
        return finalize::undefined_opcode(cpu, opcode, address, config);
    };

    let operand = resolve(instr.mode, cpu, mem);
    let extra = (instr.handler)(cpu, mem, operand);
    Ok(instruction_cycles(instr, operand, extra))
}

/// Enter an interrupt handler. Returns 0 when an IRQ is masked by I,
/// otherwise the cycles spent on the entry sequence.
pub(crate) fn service_interrupt(cpu: &mut CpuState, mem: &mut dyn Memory, kind: Interrupt) -> u32 {
    if kind == Interrupt::Irq && cpu.status.is_set(Flag::IRQ_DISABLE) {
        return 0;
    }
    let pc = cpu.pc;
    cpu.push_u16(mem, pc);
    let p = cpu.status.for_push(false);
    cpu.push_u8(mem, p);
    cpu.status.set(Flag::IRQ_DISABLE);
    cpu.pc = mem.read_word(kind.vector());
    INTERRUPT_CYCLES
}
