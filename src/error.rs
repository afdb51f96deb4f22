//! Error types surfaced by the CPU engine.
//!
//! Everything arithmetic (wraparound, page crossings, flag updates) is defined
//! behavior and never shows up here. The only condition the engine reports is
//! an opcode byte with no instruction descriptor. Faults inside a `Memory`
//! implementation are that implementation's business and are not caught.

use thiserror::Error;

/// Errors returned by fallible engine operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuError {
    /// The byte at `address` does not decode to a documented instruction.
    ///
    /// The program counter is left pointing at `address`; no register, flag
    /// or cycle count was changed.
    #[error("undefined opcode ${opcode:02X} at ${address:04X}")]
    UndefinedOpcode { opcode: u8, address: u16 },
}

/// Result alias used across the engine API.
pub type CpuResult<T> = Result<T, CpuError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_opcode_message_names_opcode_and_address() {
        let err = CpuError::UndefinedOpcode {
            opcode: 0x02,
            address: 0xC123,
        };
        assert_eq!(err.to_string(), "undefined opcode $02 at $C123");
    }
}
