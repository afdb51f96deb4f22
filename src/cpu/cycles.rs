/*!
cycles.rs - Cycle accounting for a single instruction.

Total cost of an instruction =

```text
    base cycles                     (descriptor, `table::Instruction::cycles`)
  + 1 if the descriptor is page-penalized and the operand crossed a page
  + handler extra                   (branches: +1 taken, +1 more on page cross)
```

Only read instructions in abs,X / abs,Y / (ind),Y modes are page-penalized.
Stores and read-modify-write instructions always pay their worst case, which
is already folded into their base count.
*/

use crate::cpu::addressing::Operand;
use crate::cpu::table::Instruction;

/// Cost of BRK-less interrupt entry (IRQ / NMI).
pub const INTERRUPT_CYCLES: u32 = 7;

/// Cost charged for an undefined opcode executed as a 1-byte NOP.
pub const UNDEFINED_NOP_CYCLES: u32 = 2;

/// Extra cycles for a conditional branch.
#[inline]
pub(crate) fn branch_penalty(taken: bool, page_crossed: bool) -> u32 {
    match (taken, page_crossed) {
        (false, _) => 0,
        (true, false) => 1,
        (true, true) => 2,
    }
}

/// Total cycles for one executed instruction.
#[inline]
pub(crate) fn instruction_cycles(instr: &Instruction, operand: Operand, extra: u32) -> u32 {
    let penalty = u32::from(instr.page_penalty && operand.page_crossed());
    u32::from(instr.cycles) + penalty + extra
}
