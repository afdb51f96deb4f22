/*!
trace.rs - Disassembly and execution trace lines.

Overview
========
`disassemble(mem, addr)` decodes the instruction at `addr` through the same
table the dispatcher uses, reading memory with `Memory::peek` so tooling
never triggers read side effects. `TraceLine` pairs a disassembly with a
register snapshot and renders it in the column layout popularized by the
nestest log:

```text
C000  4C F5 C5  JMP $C5F5                       A:00 X:00 Y:00 P:24 SP:FD CYC:7
```

Operand syntax
==============

```text
Implied        (nothing)
Accumulator    A
Immediate      #$nn
ZeroPage       $nn        $nn,X      $nn,Y
Absolute       $nnnn      $nnnn,X    $nnnn,Y
Indirect       ($nnnn)
IndirectX      ($nn,X)
IndirectY      ($nn),Y
Relative       $tttt      (branch target, not the raw offset)
```

Undefined opcodes render as `.byte $nn` with a length of 1.
*/

use std::fmt;

use crate::cpu::addressing::AddressingMode;
use crate::cpu::state::CpuState;
use crate::cpu::table::{lookup, Instruction};
use crate::memory::Memory;

/// One decoded instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disassembly {
    pub address: u16,
    /// Raw instruction bytes; only the first `len` are meaningful.
    pub bytes: [u8; 3],
    pub len: u16,
    /// Mnemonic and operand, e.g. `LDA ($20),Y`.
    pub text: String,
}

impl Disassembly {
    /// Address of the following instruction.
    #[inline]
    pub fn next_address(&self) -> u16 {
        self.address.wrapping_add(self.len)
    }

    /// Raw bytes as space-separated hex, e.g. `B1 20`.
    pub fn hex(&self) -> String {
        self.bytes[..self.len as usize]
            .iter()
            .map(|b| format!("{b:02X}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Disassembly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}  {:<8}  {}", self.address, self.hex(), self.text)
    }
}

/// Decode the instruction at `addr` without side effects on `mem`.
pub fn disassemble(mem: &mut dyn Memory, addr: u16) -> Disassembly {
    let opcode = mem.peek(addr);
    let Some(instr) = lookup(opcode) else {
        return Disassembly {
            address: addr,
            bytes: [opcode, 0, 0],
            len: 1,
            text: format!(".byte ${opcode:02X}"),
        };
    };

    let len = instr.byte_len();
    let mut bytes = [opcode, 0, 0];
    for i in 1..len {
        bytes[i as usize] = mem.peek(addr.wrapping_add(i));
    }
    let text = render(instr, addr, &bytes);
    Disassembly {
        address: addr,
        bytes,
        len,
        text,
    }
}

/// Disassemble `count` consecutive instructions starting at `addr`.
pub fn disassemble_range(mem: &mut dyn Memory, addr: u16, count: usize) -> Vec<Disassembly> {
    let mut out = Vec::with_capacity(count);
    let mut pc = addr;
    for _ in 0..count {
        let d = disassemble(mem, pc);
        pc = d.next_address();
        out.push(d);
    }
    out
}

fn render(instr: &Instruction, addr: u16, bytes: &[u8; 3]) -> String {
    let m = instr.mnemonic;
    let b = bytes[1];
    let w = u16::from_le_bytes([bytes[1], bytes[2]]);
    match instr.mode {
        AddressingMode::Implied => m.to_string(),
        AddressingMode::Accumulator => format!("{m} A"),
        AddressingMode::Immediate => format!("{m} #${b:02X}"),
        AddressingMode::ZeroPage => format!("{m} ${b:02X}"),
        AddressingMode::ZeroPageX => format!("{m} ${b:02X},X"),
        AddressingMode::ZeroPageY => format!("{m} ${b:02X},Y"),
        AddressingMode::Absolute => format!("{m} ${w:04X}"),
        AddressingMode::AbsoluteX => format!("{m} ${w:04X},X"),
        AddressingMode::AbsoluteY => format!("{m} ${w:04X},Y"),
        AddressingMode::Indirect => format!("{m} (${w:04X})"),
        AddressingMode::IndirectX => format!("{m} (${b:02X},X)"),
        AddressingMode::IndirectY => format!("{m} (${b:02X}),Y"),
        AddressingMode::Relative => {
            let target = addr.wrapping_add(2).wrapping_add(b as i8 as u16);
            format!("{m} ${target:04X}")
        }
    }
}

/// A disassembled instruction plus the register state before it executes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceLine {
    pub disassembly: Disassembly,
    pub state: CpuState,
    pub cycles: u64,
}

impl TraceLine {
    /// Capture the instruction at the current PC.
    pub fn capture(state: &CpuState, cycles: u64, mem: &mut dyn Memory) -> Self {
        Self {
            disassembly: disassemble(mem, state.pc),
            state: *state,
            cycles,
        }
    }
}

impl fmt::Display for TraceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.disassembly;
        let s = &self.state;
        write!(
            f,
            "{:04X}  {:<8}  {:<32}A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            d.address,
            d.hex(),
            d.text,
            s.a,
            s.x,
            s.y,
            s.status.bits(),
            s.sp,
            self.cycles
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::status::StatusRegister;
    use crate::memory::FlatMemory;

    fn text_of(program: &[u8]) -> String {
        let mut mem = FlatMemory::new();
        mem.load(0xC000, program);
        disassemble(&mut mem, 0xC000).text
    }

    #[test]
    fn operand_syntax_per_mode() {
        assert_eq!(text_of(&[0xEA]), "NOP");
        assert_eq!(text_of(&[0x0A]), "ASL A");
        assert_eq!(text_of(&[0xA9, 0x10]), "LDA #$10");
        assert_eq!(text_of(&[0xA5, 0x10]), "LDA $10");
        assert_eq!(text_of(&[0xB5, 0x10]), "LDA $10,X");
        assert_eq!(text_of(&[0xB6, 0x10]), "LDX $10,Y");
        assert_eq!(text_of(&[0xAD, 0x34, 0x12]), "LDA $1234");
        assert_eq!(text_of(&[0xBD, 0x34, 0x12]), "LDA $1234,X");
        assert_eq!(text_of(&[0xB9, 0x34, 0x12]), "LDA $1234,Y");
        assert_eq!(text_of(&[0x6C, 0xFF, 0x02]), "JMP ($02FF)");
        assert_eq!(text_of(&[0xA1, 0x20]), "LDA ($20,X)");
        assert_eq!(text_of(&[0xB1, 0x20]), "LDA ($20),Y");
    }

    #[test]
    fn relative_shows_target() {
        assert_eq!(text_of(&[0xD0, 0x03]), "BNE $C005");
        assert_eq!(text_of(&[0xD0, 0xFE]), "BNE $C000");
    }

    #[test]
    fn undefined_byte() {
        let mut mem = FlatMemory::new();
        mem.write(0x0000, 0x02);
        let d = disassemble(&mut mem, 0x0000);
        assert_eq!(d.text, ".byte $02");
        assert_eq!(d.len, 1);
    }

    #[test]
    fn range_walks_instruction_lengths() {
        let mut mem = FlatMemory::new();
        mem.load(0x8000, &[0xA9, 0x01, 0x8D, 0x00, 0x02, 0xE8]);
        let lines = disassemble_range(&mut mem, 0x8000, 3);
        let addrs: Vec<u16> = lines.iter().map(|d| d.address).collect();
        assert_eq!(addrs, vec![0x8000, 0x8002, 0x8005]);
        assert_eq!(lines[1].hex(), "8D 00 02");
        assert_eq!(lines[1].to_string(), "8002  8D 00 02  STA $0200");
    }

    #[test]
    fn trace_line_layout() {
        let mut mem = FlatMemory::new();
        mem.load(0xC000, &[0x4C, 0xF5, 0xC5]);
        let mut state = CpuState::new();
        state.pc = 0xC000;
        state.status = StatusRegister::from_bits(0x24);
        let line = TraceLine::capture(&state, 7, &mut mem);
        assert_eq!(
            line.to_string(),
            "C000  4C F5 C5  JMP $C5F5                       A:00 X:00 Y:00 P:24 SP:FD CYC:7"
        );
    }
}
