/*!
cpu::mod - Public facade for the 6502 instruction engine.

Layout:

```text
state.rs        - Registers, stack helpers, vectors and reset values.
status.rs       - Status register (P) and named flag bits.
addressing.rs   - Addressing mode enum & operand resolution.
execute.rs      - Instruction semantic helpers (ALU, shifts, RMW, operand access).
table.rs        - Static opcode table: mnemonic, mode, cycles, handler.
cycles.rs       - Per-instruction cycle accounting.
dispatch/       - Single-step orchestration and the per-family handlers.
config.rs       - Engine configuration (undefined opcode policy).
trace.rs        - Disassembler and nestest-style trace lines.
core/           - `Cpu`, the facade hosts drive.
```

The public surface is the `Cpu` facade plus the descriptor and state types
re-exported below. Downstream code should not rely on internal module
layout.

Feature flags:
    trace           - Per-instruction `log::trace!` lines from `Cpu::step`.

Usage:
```rust
use nes6502::{Cpu, FlatMemory};

let mut mem = FlatMemory::with_program(0x8000, &[0xA9, 0x42, 0xAA]); // LDA #$42; TAX
let mut cpu = Cpu::new();
cpu.reset(&mut mem);
let cycles = cpu.run(&mut mem, 2)?;
assert_eq!((cpu.x(), cycles), (0x42, 4));
# Ok::<(), nes6502::CpuError>(())
```
*/

pub mod addressing;
pub mod config;
pub mod core;
pub mod cycles;
pub(crate) mod dispatch;
pub(crate) mod execute;
pub mod state;
pub mod status;
pub mod table;
pub mod trace;

pub use crate::cpu::addressing::{AddressingMode, Operand};
pub use crate::cpu::config::{CpuConfig, UndefinedOpcodePolicy};
pub use crate::cpu::core::Cpu;
pub use crate::cpu::state::{
    CpuState, IRQ_VECTOR, NMI_VECTOR, RESET_STATUS, RESET_SP, RESET_VECTOR, Register,
    STACK_BASE,
};
pub use crate::cpu::status::{Flag, StatusRegister};
pub use crate::cpu::table::{Handler, Instruction, Mnemonic, lookup};
pub use crate::cpu::trace::{Disassembly, TraceLine, disassemble, disassemble_range};
