/*!
finalize.rs - Undefined opcode handling.

Overview
========
The decode table only lists the 151 documented opcodes. When the dispatcher
fetches any other byte it hands off here and the configured
`UndefinedOpcodePolicy` decides the outcome:

- `Error` (default): undo the opcode fetch so PC points back at the byte,
  and return `CpuError::UndefinedOpcode`. Registers, flags, memory and the
  cycle counter are left exactly as they were before the step.
- `Nop`: consume the byte as a 1-byte, 2-cycle no-op.

Either way a warning is logged with the opcode and its address.

Non-Responsibilities
====================
- Does NOT emulate unofficial opcode semantics (LAX, SAX, DCP, ...).
*/

use log::warn;

use crate::cpu::config::{CpuConfig, UndefinedOpcodePolicy};
use crate::cpu::cycles::UNDEFINED_NOP_CYCLES;
use crate::cpu::state::CpuState;
use crate::error::{CpuError, CpuResult};

/// Apply the undefined-opcode policy. `address` is where `opcode` was
/// fetched from; PC has already moved past it.
pub(crate) fn undefined_opcode(
    cpu: &mut CpuState,
    opcode: u8,
    address: u16,
    config: &CpuConfig,
) -> CpuResult<u32> {
    match config.undefined_opcode {
        UndefinedOpcodePolicy::Error => {
            warn!("undefined opcode ${opcode:02X} at ${address:04X}");
            cpu.pc = address;
            Err(CpuError::UndefinedOpcode { opcode, address })
        }
        UndefinedOpcodePolicy::Nop => {
            warn!("undefined opcode ${opcode:02X} at ${address:04X}, executing as NOP");
            Ok(UNDEFINED_NOP_CYCLES)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_policy_rewinds_pc() {
        let mut cpu = CpuState::new();
        cpu.pc = 0x8001;
        let before = cpu;
        let r = undefined_opcode(&mut cpu, 0x02, 0x8000, &CpuConfig::new());
        assert_eq!(
            r,
            Err(CpuError::UndefinedOpcode {
                opcode: 0x02,
                address: 0x8000
            })
        );
        assert_eq!(cpu, CpuState { pc: 0x8000, ..before });
    }

    #[test]
    fn nop_policy_keeps_pc_past_the_byte() {
        let mut cpu = CpuState::new();
        cpu.pc = 0x8001;
        let config = CpuConfig::new().with_undefined_opcode(UndefinedOpcodePolicy::Nop);
        assert_eq!(undefined_opcode(&mut cpu, 0xFF, 0x8000, &config), Ok(2));
        assert_eq!(cpu.pc, 0x8001);
    }
}
