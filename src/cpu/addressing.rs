/*!
addressing.rs - Addressing modes and operand resolution.

Overview
========
`resolve(mode, cpu, mem)` turns the operand bytes at PC into an [`Operand`]
and advances PC by the mode's operand width. Handlers only ever see the
resolved locus; none of them do their own PC arithmetic.

Operand width is a property of the mode (`AddressingMode::operand_width`):

```text
0 bytes: Implied, Accumulator
1 byte : Immediate, ZeroPage, ZeroPageX, ZeroPageY, IndirectX, IndirectY, Relative
2 bytes: Absolute, AbsoluteX, AbsoluteY, Indirect
```

Quirks reproduced
=================
- Zero-page indexing wraps inside page 0 ($FF + 1 -> $00).
- Zero-page pointers for (ind,X) / (ind),Y fetch their high byte from
  `(ptr + 1) & $FF`.
- JMP ($xxFF) fetches the high byte of the target from $xx00, not from the
  next page.
- abs,X / abs,Y / (ind),Y use a full 16-bit add and report a page crossing
  when the high byte changes. Whether that costs a cycle is the
  instruction's business (see `table::Instruction::page_penalty`).

Immediate resolves to the address of the immediate byte so read handlers
treat it like any other memory operand. Relative resolves to the branch
target; its crossing flag compares the target with the address of the next
instruction.
*/

use crate::cpu::state::CpuState;
use crate::memory::Memory;

/// The 6502 addressing modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY,
    Relative,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    #[inline]
    pub const fn operand_width(self) -> u16 {
        match self {
            AddressingMode::Implied | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY
            | AddressingMode::Relative => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }

    /// Total instruction length including the opcode byte.
    #[inline]
    pub const fn instruction_len(self) -> u16 {
        1 + self.operand_width()
    }
}

/// Resolved operand locus handed to instruction handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// No operand (transfers, flag ops, stack ops, ...).
    Implied,
    /// Operate on A in place.
    Accumulator,
    /// Effective address; `page_crossed` is set when indexing changed the high byte.
    Address { addr: u16, page_crossed: bool },
}

impl Operand {
    #[inline]
    pub(crate) const fn at(addr: u16) -> Self {
        Operand::Address {
            addr,
            page_crossed: false,
        }
    }

    /// Effective address, if any.
    #[inline]
    pub fn address(self) -> Option<u16> {
        match self {
            Operand::Address { addr, .. } => Some(addr),
            _ => None,
        }
    }

    #[inline]
    pub fn page_crossed(self) -> bool {
        matches!(
            self,
            Operand::Address {
                page_crossed: true,
                ..
            }
        )
    }
}

/// True when `a` and `b` live on different 256-byte pages.
#[inline]
pub(crate) fn crosses_page(a: u16, b: u16) -> bool {
    (a & 0xFF00) != (b & 0xFF00)
}

/// Resolve the operand for `mode` starting at PC and advance PC past it.
pub fn resolve(mode: AddressingMode, cpu: &mut CpuState, mem: &mut dyn Memory) -> Operand {
    let pc = cpu.pc;
    let operand = match mode {
        AddressingMode::Implied => Operand::Implied,
        AddressingMode::Accumulator => Operand::Accumulator,
        AddressingMode::Immediate => Operand::at(pc),
        AddressingMode::ZeroPage => Operand::at(mem.read(pc) as u16),
        AddressingMode::ZeroPageX => Operand::at(mem.read(pc).wrapping_add(cpu.x) as u16),
        AddressingMode::ZeroPageY => Operand::at(mem.read(pc).wrapping_add(cpu.y) as u16),
        AddressingMode::Absolute => Operand::at(mem.read_word(pc)),
        AddressingMode::AbsoluteX => indexed(mem.read_word(pc), cpu.x),
        AddressingMode::AbsoluteY => indexed(mem.read_word(pc), cpu.y),
        AddressingMode::Indirect => {
            let ptr = mem.read_word(pc);
            Operand::at(read_word_indirect_bug(mem, ptr))
        }
        AddressingMode::IndirectX => {
            let zp = mem.read(pc).wrapping_add(cpu.x);
            Operand::at(read_word_zp(mem, zp))
        }
        AddressingMode::IndirectY => {
            let zp = mem.read(pc);
            indexed(read_word_zp(mem, zp), cpu.y)
        }
        AddressingMode::Relative => {
            let offset = mem.read(pc) as i8;
            let next = pc.wrapping_add(1);
            let target = next.wrapping_add(offset as u16);
            Operand::Address {
                addr: target,
                page_crossed: crosses_page(next, target),
            }
        }
    };
    cpu.advance_pc(mode.operand_width());
    operand
}

#[inline]
fn indexed(base: u16, index: u8) -> Operand {
    let addr = base.wrapping_add(index as u16);
    Operand::Address {
        addr,
        page_crossed: crosses_page(base, addr),
    }
}

/// Read a 16-bit little endian pointer from zero page; the high byte wraps
/// within page 0.
#[inline]
pub(crate) fn read_word_zp(mem: &mut dyn Memory, base: u8) -> u16 {
    let lo = mem.read(base as u16) as u16;
    let hi = mem.read(base.wrapping_add(1) as u16) as u16;
    (hi << 8) | lo
}

/// JMP (indirect) hardware bug: when the pointer's low byte is $FF the high
/// byte of the target comes from the start of the same page.
#[inline]
pub(crate) fn read_word_indirect_bug(mem: &mut dyn Memory, addr: u16) -> u16 {
    let lo = mem.read(addr) as u16;
    let hi_addr = (addr & 0xFF00) | (addr.wrapping_add(1) & 0x00FF);
    let hi = mem.read(hi_addr) as u16;
    (hi << 8) | lo
}
