#![doc = r#"
nes6502 library crate.

Instruction engine for the NES variant of the MOS 6502 (the 2A03 core:
no decimal-mode arithmetic). The engine fetches, decodes and executes one
instruction per `step` against a host-supplied memory and reports the
cycles it consumed.

Modules:
- cpu: engine facade, registers and status, addressing, decode table,
  per-family instruction handlers, cycle accounting, disassembly / trace
- memory: the `Memory` contract the engine reads and writes through, plus
  `FlatMemory`, a flat 64 KiB backing store
- error: `CpuError` / `CpuResult`

In tests, shared program builders are available under `crate::test_utils`.
"#]

pub mod cpu;
pub mod error;
pub mod memory;

// Re-export commonly used types at the crate root for convenience.
pub use cpu::core::Cpu;
pub use cpu::{CpuConfig, UndefinedOpcodePolicy};
pub use error::{CpuError, CpuResult};
pub use memory::{FlatMemory, Memory};

// Shared test utilities (only compiled for tests)
#[cfg(test)]
pub mod test_utils;
