//! Engine configuration.

/// What `step` does when it fetches a byte with no documented instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UndefinedOpcodePolicy {
    /// Report `CpuError::UndefinedOpcode` and leave the CPU untouched
    /// (PC still points at the offending byte).
    #[default]
    Error,
    /// Treat the byte as a 1-byte, 2-cycle NOP and keep going.
    Nop,
}

/// Construction-time knobs for [`Cpu`](crate::cpu::Cpu).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CpuConfig {
    pub undefined_opcode: UndefinedOpcodePolicy,
}

impl CpuConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_undefined_opcode(mut self, policy: UndefinedOpcodePolicy) -> Self {
        self.undefined_opcode = policy;
        self
    }
}
