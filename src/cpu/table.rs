/*!
table.rs - Opcode decode table.

Purpose
=======
Maps every opcode byte to an [`Instruction`] descriptor: mnemonic,
addressing mode, base cycle count, whether a page crossing costs an extra
cycle, and the handler that carries out the semantics. The table is a
`static [Option<Instruction>; 256]` built in a const block, so decode is a
single index with no runtime initialization.

Design
------
- Handler signature: `fn(&mut CpuState, &mut dyn Memory, Operand) -> u32`.
  The handler receives an already resolved operand and returns extra cycles
  (only branches return non-zero).
- All 151 documented opcodes are present. Every other slot is `None`; the
  dispatcher routes those through the undefined-opcode policy.
- `page_penalty` is set only on read instructions in abs,X / abs,Y /
  (ind),Y modes.

Cycle reference
---------------

```text
ALU reads   imm 2, zp 3, zp,X 4, abs 4, abs,X 4+, abs,Y 4+, (ind,X) 6, (ind),Y 5+
STA         zp 3, zp,X 4, abs 4, abs,X 5, abs,Y 5, (ind,X) 6, (ind),Y 6
RMW         A 2, zp 5, zp,X 6, abs 6, abs,X 7
JMP         abs 3, (ind) 5
JSR/RTS/RTI 6, BRK 7, push 3, pull 4, branches 2 (+1/+2), implied 2
```
*/

use std::fmt;

use crate::cpu::addressing::{AddressingMode, Operand};
use crate::cpu::dispatch::{
    arithmetic, branches, compare, control_flow, load_store, logical, misc, rmw,
};
use crate::cpu::state::CpuState;
use crate::memory::Memory;

/// Instruction semantics. Returns cycles beyond the descriptor's base count.
pub type Handler = fn(&mut CpuState, &mut dyn Memory, Operand) -> u32;

/// The 56 documented 6502 mnemonics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
}

impl Mnemonic {
    pub const fn as_str(self) -> &'static str {
        match self {
            Mnemonic::Adc => "ADC",
            Mnemonic::And => "AND",
            Mnemonic::Asl => "ASL",
            Mnemonic::Bcc => "BCC",
            Mnemonic::Bcs => "BCS",
            Mnemonic::Beq => "BEQ",
            Mnemonic::Bit => "BIT",
            Mnemonic::Bmi => "BMI",
            Mnemonic::Bne => "BNE",
            Mnemonic::Bpl => "BPL",
            Mnemonic::Brk => "BRK",
            Mnemonic::Bvc => "BVC",
            Mnemonic::Bvs => "BVS",
            Mnemonic::Clc => "CLC",
            Mnemonic::Cld => "CLD",
            Mnemonic::Cli => "CLI",
            Mnemonic::Clv => "CLV",
            Mnemonic::Cmp => "CMP",
            Mnemonic::Cpx => "CPX",
            Mnemonic::Cpy => "CPY",
            Mnemonic::Dec => "DEC",
            Mnemonic::Dex => "DEX",
            Mnemonic::Dey => "DEY",
            Mnemonic::Eor => "EOR",
            Mnemonic::Inc => "INC",
            Mnemonic::Inx => "INX",
            Mnemonic::Iny => "INY",
            Mnemonic::Jmp => "JMP",
            Mnemonic::Jsr => "JSR",
            Mnemonic::Lda => "LDA",
            Mnemonic::Ldx => "LDX",
            Mnemonic::Ldy => "LDY",
            Mnemonic::Lsr => "LSR",
            Mnemonic::Nop => "NOP",
            Mnemonic::Ora => "ORA",
            Mnemonic::Pha => "PHA",
            Mnemonic::Php => "PHP",
            Mnemonic::Pla => "PLA",
            Mnemonic::Plp => "PLP",
            Mnemonic::Rol => "ROL",
            Mnemonic::Ror => "ROR",
            Mnemonic::Rti => "RTI",
            Mnemonic::Rts => "RTS",
            Mnemonic::Sbc => "SBC",
            Mnemonic::Sec => "SEC",
            Mnemonic::Sed => "SED",
            Mnemonic::Sei => "SEI",
            Mnemonic::Sta => "STA",
            Mnemonic::Stx => "STX",
            Mnemonic::Sty => "STY",
            Mnemonic::Tax => "TAX",
            Mnemonic::Tay => "TAY",
            Mnemonic::Tsx => "TSX",
            Mnemonic::Txa => "TXA",
            Mnemonic::Txs => "TXS",
            Mnemonic::Tya => "TYA",
        }
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Static descriptor for one opcode.
#[derive(Debug, Clone, Copy)]
pub struct Instruction {
    pub opcode: u8,
    pub mnemonic: Mnemonic,
    pub mode: AddressingMode,
    /// Base cycle count.
    pub cycles: u8,
    /// +1 cycle when the operand crossed a page.
    pub page_penalty: bool,
    pub handler: Handler,
}

impl Instruction {
    pub const fn new(
        opcode: u8,
        mnemonic: Mnemonic,
        mode: AddressingMode,
        cycles: u8,
        handler: Handler,
    ) -> Self {
        Self {
            opcode,
            mnemonic,
            mode,
            cycles,
            page_penalty: false,
            handler,
        }
    }

    pub const fn with_page_penalty(self) -> Self {
        Self {
            page_penalty: true,
            ..self
        }
    }

    /// Instruction length in bytes, opcode included.
    #[inline]
    pub const fn byte_len(&self) -> u16 {
        self.mode.instruction_len()
    }
}

/// Descriptor for `opcode`, or `None` if the byte is not a documented instruction.
#[inline]
pub fn lookup(opcode: u8) -> Option<&'static Instruction> {
    OPCODES[opcode as usize].as_ref()
}

const fn op(
    opcode: u8,
    m: Mnemonic,
    mode: AddressingMode,
    cycles: u8,
    h: Handler,
) -> Option<Instruction> {
    Some(Instruction::new(opcode, m, mode, cycles, h))
}

const fn paged(
    opcode: u8,
    m: Mnemonic,
    mode: AddressingMode,
    cycles: u8,
    h: Handler,
) -> Option<Instruction> {
    Some(Instruction::new(opcode, m, mode, cycles, h).with_page_penalty())
}

static OPCODES: [Option<Instruction>; 256] = {
    use AddressingMode::*;
    use Mnemonic::*;

    let mut t: [Option<Instruction>; 256] = [None; 256];

    // Loads / stores
    t[0xA1] = op(0xA1, Lda, IndirectX, 6, load_store::lda);
    t[0xA5] = op(0xA5, Lda, ZeroPage, 3, load_store::lda);
    t[0xA9] = op(0xA9, Lda, Immediate, 2, load_store::lda);
    t[0xAD] = op(0xAD, Lda, Absolute, 4, load_store::lda);
    t[0xB1] = paged(0xB1, Lda, IndirectY, 5, load_store::lda);
    t[0xB5] = op(0xB5, Lda, ZeroPageX, 4, load_store::lda);
    t[0xB9] = paged(0xB9, Lda, AbsoluteY, 4, load_store::lda);
    t[0xBD] = paged(0xBD, Lda, AbsoluteX, 4, load_store::lda);
    t[0xA2] = op(0xA2, Ldx, Immediate, 2, load_store::ldx);
    t[0xA6] = op(0xA6, Ldx, ZeroPage, 3, load_store::ldx);
    t[0xAE] = op(0xAE, Ldx, Absolute, 4, load_store::ldx);
    t[0xB6] = op(0xB6, Ldx, ZeroPageY, 4, load_store::ldx);
    t[0xBE] = paged(0xBE, Ldx, AbsoluteY, 4, load_store::ldx);
    t[0xA0] = op(0xA0, Ldy, Immediate, 2, load_store::ldy);
    t[0xA4] = op(0xA4, Ldy, ZeroPage, 3, load_store::ldy);
    t[0xAC] = op(0xAC, Ldy, Absolute, 4, load_store::ldy);
    t[0xB4] = op(0xB4, Ldy, ZeroPageX, 4, load_store::ldy);
    t[0xBC] = paged(0xBC, Ldy, AbsoluteX, 4, load_store::ldy);
    t[0x81] = op(0x81, Sta, IndirectX, 6, load_store::sta);
    t[0x85] = op(0x85, Sta, ZeroPage, 3, load_store::sta);
    t[0x8D] = op(0x8D, Sta, Absolute, 4, load_store::sta);
    t[0x91] = op(0x91, Sta, IndirectY, 6, load_store::sta);
    t[0x95] = op(0x95, Sta, ZeroPageX, 4, load_store::sta);
    t[0x99] = op(0x99, Sta, AbsoluteY, 5, load_store::sta);
    t[0x9D] = op(0x9D, Sta, AbsoluteX, 5, load_store::sta);
    t[0x86] = op(0x86, Stx, ZeroPage, 3, load_store::stx);
    t[0x8E] = op(0x8E, Stx, Absolute, 4, load_store::stx);
    t[0x96] = op(0x96, Stx, ZeroPageY, 4, load_store::stx);
    t[0x84] = op(0x84, Sty, ZeroPage, 3, load_store::sty);
    t[0x8C] = op(0x8C, Sty, Absolute, 4, load_store::sty);
    t[0x94] = op(0x94, Sty, ZeroPageX, 4, load_store::sty);

    // ADC / SBC
    t[0x61] = op(0x61, Adc, IndirectX, 6, arithmetic::adc);
    t[0x65] = op(0x65, Adc, ZeroPage, 3, arithmetic::adc);
    t[0x69] = op(0x69, Adc, Immediate, 2, arithmetic::adc);
    t[0x6D] = op(0x6D, Adc, Absolute, 4, arithmetic::adc);
    t[0x71] = paged(0x71, Adc, IndirectY, 5, arithmetic::adc);
    t[0x75] = op(0x75, Adc, ZeroPageX, 4, arithmetic::adc);
    t[0x79] = paged(0x79, Adc, AbsoluteY, 4, arithmetic::adc);
    t[0x7D] = paged(0x7D, Adc, AbsoluteX, 4, arithmetic::adc);
    t[0xE1] = op(0xE1, Sbc, IndirectX, 6, arithmetic::sbc);
    t[0xE5] = op(0xE5, Sbc, ZeroPage, 3, arithmetic::sbc);
    t[0xE9] = op(0xE9, Sbc, Immediate, 2, arithmetic::sbc);
    t[0xED] = op(0xED, Sbc, Absolute, 4, arithmetic::sbc);
    t[0xF1] = paged(0xF1, Sbc, IndirectY, 5, arithmetic::sbc);
    t[0xF5] = op(0xF5, Sbc, ZeroPageX, 4, arithmetic::sbc);
    t[0xF9] = paged(0xF9, Sbc, AbsoluteY, 4, arithmetic::sbc);
    t[0xFD] = paged(0xFD, Sbc, AbsoluteX, 4, arithmetic::sbc);

    // AND / ORA / EOR / BIT
    t[0x21] = op(0x21, And, IndirectX, 6, logical::and);
    t[0x25] = op(0x25, And, ZeroPage, 3, logical::and);
    t[0x29] = op(0x29, And, Immediate, 2, logical::and);
    t[0x2D] = op(0x2D, And, Absolute, 4, logical::and);
    t[0x31] = paged(0x31, And, IndirectY, 5, logical::and);
    t[0x35] = op(0x35, And, ZeroPageX, 4, logical::and);
    t[0x39] = paged(0x39, And, AbsoluteY, 4, logical::and);
    t[0x3D] = paged(0x3D, And, AbsoluteX, 4, logical::and);
    t[0x24] = op(0x24, Bit, ZeroPage, 3, logical::bit);
    t[0x2C] = op(0x2C, Bit, Absolute, 4, logical::bit);
    t[0x41] = op(0x41, Eor, IndirectX, 6, logical::eor);
    t[0x45] = op(0x45, Eor, ZeroPage, 3, logical::eor);
    t[0x49] = op(0x49, Eor, Immediate, 2, logical::eor);
    t[0x4D] = op(0x4D, Eor, Absolute, 4, logical::eor);
    t[0x51] = paged(0x51, Eor, IndirectY, 5, logical::eor);
    t[0x55] = op(0x55, Eor, ZeroPageX, 4, logical::eor);
    t[0x59] = paged(0x59, Eor, AbsoluteY, 4, logical::eor);
    t[0x5D] = paged(0x5D, Eor, AbsoluteX, 4, logical::eor);
    t[0x01] = op(0x01, Ora, IndirectX, 6, logical::ora);
    t[0x05] = op(0x05, Ora, ZeroPage, 3, logical::ora);
    t[0x09] = op(0x09, Ora, Immediate, 2, logical::ora);
    t[0x0D] = op(0x0D, Ora, Absolute, 4, logical::ora);
    t[0x11] = paged(0x11, Ora, IndirectY, 5, logical::ora);
    t[0x15] = op(0x15, Ora, ZeroPageX, 4, logical::ora);
    t[0x19] = paged(0x19, Ora, AbsoluteY, 4, logical::ora);
    t[0x1D] = paged(0x1D, Ora, AbsoluteX, 4, logical::ora);

    // CMP / CPX / CPY
    t[0xC1] = op(0xC1, Cmp, IndirectX, 6, compare::cmp);
    t[0xC5] = op(0xC5, Cmp, ZeroPage, 3, compare::cmp);
    t[0xC9] = op(0xC9, Cmp, Immediate, 2, compare::cmp);
    t[0xCD] = op(0xCD, Cmp, Absolute, 4, compare::cmp);
    t[0xD1] = paged(0xD1, Cmp, IndirectY, 5, compare::cmp);
    t[0xD5] = op(0xD5, Cmp, ZeroPageX, 4, compare::cmp);
    t[0xD9] = paged(0xD9, Cmp, AbsoluteY, 4, compare::cmp);
    t[0xDD] = paged(0xDD, Cmp, AbsoluteX, 4, compare::cmp);
    t[0xE0] = op(0xE0, Cpx, Immediate, 2, compare::cpx);
    t[0xE4] = op(0xE4, Cpx, ZeroPage, 3, compare::cpx);
    t[0xEC] = op(0xEC, Cpx, Absolute, 4, compare::cpx);
    t[0xC0] = op(0xC0, Cpy, Immediate, 2, compare::cpy);
    t[0xC4] = op(0xC4, Cpy, ZeroPage, 3, compare::cpy);
    t[0xCC] = op(0xCC, Cpy, Absolute, 4, compare::cpy);

    // Shifts, rotates, INC / DEC
    t[0x06] = op(0x06, Asl, ZeroPage, 5, rmw::asl);
    t[0x0A] = op(0x0A, Asl, Accumulator, 2, rmw::asl);
    t[0x0E] = op(0x0E, Asl, Absolute, 6, rmw::asl);
    t[0x16] = op(0x16, Asl, ZeroPageX, 6, rmw::asl);
    t[0x1E] = op(0x1E, Asl, AbsoluteX, 7, rmw::asl);
    t[0xC6] = op(0xC6, Dec, ZeroPage, 5, rmw::dec);
    t[0xCE] = op(0xCE, Dec, Absolute, 6, rmw::dec);
    t[0xD6] = op(0xD6, Dec, ZeroPageX, 6, rmw::dec);
    t[0xDE] = op(0xDE, Dec, AbsoluteX, 7, rmw::dec);
    t[0xCA] = op(0xCA, Dex, Implied, 2, rmw::dex);
    t[0x88] = op(0x88, Dey, Implied, 2, rmw::dey);
    t[0xE6] = op(0xE6, Inc, ZeroPage, 5, rmw::inc);
    t[0xEE] = op(0xEE, Inc, Absolute, 6, rmw::inc);
    t[0xF6] = op(0xF6, Inc, ZeroPageX, 6, rmw::inc);
    t[0xFE] = op(0xFE, Inc, AbsoluteX, 7, rmw::inc);
    t[0xE8] = op(0xE8, Inx, Implied, 2, rmw::inx);
    t[0xC8] = op(0xC8, Iny, Implied, 2, rmw::iny);
    t[0x46] = op(0x46, Lsr, ZeroPage, 5, rmw::lsr);
    t[0x4A] = op(0x4A, Lsr, Accumulator, 2, rmw::lsr);
    t[0x4E] = op(0x4E, Lsr, Absolute, 6, rmw::lsr);
    t[0x56] = op(0x56, Lsr, ZeroPageX, 6, rmw::lsr);
    t[0x5E] = op(0x5E, Lsr, AbsoluteX, 7, rmw::lsr);
    t[0x26] = op(0x26, Rol, ZeroPage, 5, rmw::rol);
    t[0x2A] = op(0x2A, Rol, Accumulator, 2, rmw::rol);
    t[0x2E] = op(0x2E, Rol, Absolute, 6, rmw::rol);
    t[0x36] = op(0x36, Rol, ZeroPageX, 6, rmw::rol);
    t[0x3E] = op(0x3E, Rol, AbsoluteX, 7, rmw::rol);
    t[0x66] = op(0x66, Ror, ZeroPage, 5, rmw::ror);
    t[0x6A] = op(0x6A, Ror, Accumulator, 2, rmw::ror);
    t[0x6E] = op(0x6E, Ror, Absolute, 6, rmw::ror);
    t[0x76] = op(0x76, Ror, ZeroPageX, 6, rmw::ror);
    t[0x7E] = op(0x7E, Ror, AbsoluteX, 7, rmw::ror);

    // Branches
    t[0x90] = op(0x90, Bcc, Relative, 2, branches::bcc);
    t[0xB0] = op(0xB0, Bcs, Relative, 2, branches::bcs);
    t[0xF0] = op(0xF0, Beq, Relative, 2, branches::beq);
    t[0x30] = op(0x30, Bmi, Relative, 2, branches::bmi);
    t[0xD0] = op(0xD0, Bne, Relative, 2, branches::bne);
    t[0x10] = op(0x10, Bpl, Relative, 2, branches::bpl);
    t[0x50] = op(0x50, Bvc, Relative, 2, branches::bvc);
    t[0x70] = op(0x70, Bvs, Relative, 2, branches::bvs);

    // Jumps, subroutines, BRK / RTI
    t[0x00] = op(0x00, Brk, Implied, 7, control_flow::brk);
    t[0x4C] = op(0x4C, Jmp, Absolute, 3, control_flow::jmp);
    t[0x6C] = op(0x6C, Jmp, Indirect, 5, control_flow::jmp);
    t[0x20] = op(0x20, Jsr, Absolute, 6, control_flow::jsr);
    t[0x40] = op(0x40, Rti, Implied, 6, control_flow::rti);
    t[0x60] = op(0x60, Rts, Implied, 6, control_flow::rts);

    // Transfers, stack, flags, NOP
    t[0x18] = op(0x18, Clc, Implied, 2, misc::clc);
    t[0xD8] = op(0xD8, Cld, Implied, 2, misc::cld);
    t[0x58] = op(0x58, Cli, Implied, 2, misc::cli);
    t[0xB8] = op(0xB8, Clv, Implied, 2, misc::clv);
    t[0xEA] = op(0xEA, Nop, Implied, 2, misc::nop);
    t[0x48] = op(0x48, Pha, Implied, 3, misc::pha);
    t[0x08] = op(0x08, Php, Implied, 3, misc::php);
    t[0x68] = op(0x68, Pla, Implied, 4, misc::pla);
    t[0x28] = op(0x28, Plp, Implied, 4, misc::plp);
    t[0x38] = op(0x38, Sec, Implied, 2, misc::sec);
    t[0xF8] = op(0xF8, Sed, Implied, 2, misc::sed);
    t[0x78] = op(0x78, Sei, Implied, 2, misc::sei);
    t[0xAA] = op(0xAA, Tax, Implied, 2, misc::tax);
    t[0xA8] = op(0xA8, Tay, Implied, 2, misc::tay);
    t[0xBA] = op(0xBA, Tsx, Implied, 2, misc::tsx);
    t[0x8A] = op(0x8A, Txa, Implied, 2, misc::txa);
    t[0x9A] = op(0x9A, Txs, Implied, 2, misc::txs);
    t[0x98] = op(0x98, Tya, Implied, 2, misc::tya);

    t
};
