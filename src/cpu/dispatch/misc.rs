/*!
misc.rs - Transfers, stack operations, flag operations and NOP

Transfers
---------
TAX TAY TXA TYA TSX update Z/N from the copied value. TXS does not touch
flags.

Stack
-----
PHA pushes A. PHP pushes P with B and U forced on. PLA pulls into A and
updates Z/N. PLP pulls P verbatim.

Flags
-----
CLC SEC CLI SEI CLD SED CLV. There is no SEV.
*/

use crate::cpu::addressing::Operand;
use crate::cpu::execute::load;
use crate::cpu::state::CpuState;
use crate::cpu::status::{Flag, StatusRegister};
use crate::memory::Memory;

// ---------------------------------------------------------------------------
// Transfers
// ---------------------------------------------------------------------------

pub(crate) fn tax(cpu: &mut CpuState, _mem: &mut dyn Memory, _op: Operand) -> u32 {
    let a = cpu.a;
    cpu.x = load(cpu, a);
    0
}

pub(crate) fn tay(cpu: &mut CpuState, _mem: &mut dyn Memory, _op: Operand) -> u32 {
    let a = cpu.a;
    cpu.y = load(cpu, a);
    0
}

pub(crate) fn txa(cpu: &mut CpuState, _mem: &mut dyn Memory, _op: Operand) -> u32 {
    let x = cpu.x;
    cpu.a = load(cpu, x);
    0
}

pub(crate) fn tya(cpu: &mut CpuState, _mem: &mut dyn Memory, _op: Operand) -> u32 {
    let y = cpu.y;
    cpu.a = load(cpu, y);
    0
}

pub(crate) fn tsx(cpu: &mut CpuState, _mem: &mut dyn Memory, _op: Operand) -> u32 {
    let sp = cpu.sp;
    cpu.x = load(cpu, sp);
    0
}

pub(crate) fn txs(cpu: &mut CpuState, _mem: &mut dyn Memory, _op: Operand) -> u32 {
    cpu.sp = cpu.x;
    0
}

// ---------------------------------------------------------------------------
// Stack
// ---------------------------------------------------------------------------

pub(crate) fn pha(cpu: &mut CpuState, mem: &mut dyn Memory, _op: Operand) -> u32 {
    let a = cpu.a;
    cpu.push_u8(mem, a);
    0
}

pub(crate) fn php(cpu: &mut CpuState, mem: &mut dyn Memory, _op: Operand) -> u32 {
    let p = cpu.status.for_push(true);
    cpu.push_u8(mem, p);
    0
}

pub(crate) fn pla(cpu: &mut CpuState, mem: &mut dyn Memory, _op: Operand) -> u32 {
    let v = cpu.pop_u8(mem);
    cpu.a = load(cpu, v);
    0
}

pub(crate) fn plp(cpu: &mut CpuState, mem: &mut dyn Memory, _op: Operand) -> u32 {
    cpu.status = StatusRegister::from_bits(cpu.pop_u8(mem));
    0
}

// ---------------------------------------------------------------------------
// Flags
// ---------------------------------------------------------------------------

pub(crate) fn clc(cpu: &mut CpuState, _mem: &mut dyn Memory, _op: Operand) -> u32 {
    cpu.status.clear(Flag::CARRY);
    0
}

pub(crate) fn sec(cpu: &mut CpuState, _mem: &mut dyn Memory, _op: Operand) -> u32 {
    cpu.status.set(Flag::CARRY);
    0
}

pub(crate) fn cli(cpu: &mut CpuState, _mem: &mut dyn Memory, _op: Operand) -> u32 {
    cpu.status.clear(Flag::IRQ_DISABLE);
    0
}

pub(crate) fn sei(cpu: &mut CpuState, _mem: &mut dyn Memory, _op: Operand) -> u32 {
    cpu.status.set(Flag::IRQ_DISABLE);
    0
}

pub(crate) fn cld(cpu: &mut CpuState, _mem: &mut dyn Memory, _op: Operand) -> u32 {
    cpu.status.clear(Flag::DECIMAL);
    0
}

pub(crate) fn sed(cpu: &mut CpuState, _mem: &mut dyn Memory, _op: Operand) -> u32 {
    cpu.status.set(Flag::DECIMAL);
    0
}

pub(crate) fn clv(cpu: &mut CpuState, _mem: &mut dyn Memory, _op: Operand) -> u32 {
    cpu.status.clear(Flag::OVERFLOW);
    0
}

pub(crate) fn nop(_cpu: &mut CpuState, _mem: &mut dyn Memory, _op: Operand) -> u32 {
    0
}

#[cfg(test)]
mod tests {
    use crate::cpu::status::Flag;
    use crate::memory::Memory;
    use crate::test_utils::setup;

    #[test]
    fn transfers_update_flags_except_txs() {
        // TAX; TAY; TXS; TSX
        let (mut cpu, mut mem) = setup(&[0xAA, 0xA8, 0x9A, 0xBA]);
        cpu.set_a(0x00);
        assert_eq!(cpu.step(&mut mem), Ok(2));
        assert_eq!(cpu.x(), 0x00);
        assert!(cpu.status().is_set(Flag::ZERO));
        cpu.step(&mut mem).expect("TAY");
        assert_eq!(cpu.y(), 0x00);

        cpu.set_x(0x80);
        let before = cpu.status();
        cpu.step(&mut mem).expect("TXS");
        assert_eq!(cpu.sp(), 0x80);
        assert_eq!(cpu.status(), before);

        cpu.set_x(0x00);
        cpu.step(&mut mem).expect("TSX");
        assert_eq!(cpu.x(), 0x80);
        assert!(cpu.status().is_set(Flag::NEGATIVE));
        assert!(cpu.status().is_clear(Flag::ZERO));
    }

    #[test]
    fn txa_tya() {
        let (mut cpu, mut mem) = setup(&[0x8A, 0x98]);
        cpu.set_x(0x11);
        cpu.set_y(0xF0);
        cpu.step(&mut mem).expect("TXA");
        assert_eq!(cpu.a(), 0x11);
        cpu.step(&mut mem).expect("TYA");
        assert_eq!(cpu.a(), 0xF0);
        assert!(cpu.status().is_set(Flag::NEGATIVE));
    }

    #[test]
    fn pha_pla_round_trip() {
        // PHA; LDA #$00; PLA
        let (mut cpu, mut mem) = setup(&[0x48, 0xA9, 0x00, 0x68]);
        cpu.set_a(0x9C);
        assert_eq!(cpu.step(&mut mem), Ok(3));
        assert_eq!(mem.read(0x01FD), 0x9C);
        cpu.step(&mut mem).expect("LDA");
        assert_eq!(cpu.step(&mut mem), Ok(4));
        assert_eq!(cpu.a(), 0x9C);
        assert_eq!(cpu.sp(), 0xFD);
        assert!(cpu.status().is_set(Flag::NEGATIVE));
        assert!(cpu.status().is_clear(Flag::ZERO));
    }

    #[test]
    fn php_forces_break_and_unused() {
        let (mut cpu, mut mem) = setup(&[0x08]);
        cpu.set_status(0x01);
        assert_eq!(cpu.step(&mut mem), Ok(3));
        assert_eq!(mem.read(0x01FD), 0x31);
        // The live register is untouched.
        assert_eq!(cpu.status().bits(), 0x01);
    }

    #[test]
    fn plp_restores_verbatim() {
        let (mut cpu, mut mem) = setup(&[0x28]);
        cpu.set_sp(0xFC);
        mem.write(0x01FD, 0xC2);
        assert_eq!(cpu.step(&mut mem), Ok(4));
        assert_eq!(cpu.status().bits(), 0xC2);
        assert_eq!(cpu.sp(), 0xFD);
    }

    #[test]
    fn flag_instructions() {
        // SEC; SED; SEI; CLC; CLD; CLI; CLV
        let (mut cpu, mut mem) = setup(&[0x38, 0xF8, 0x78, 0x18, 0xD8, 0x58, 0xB8]);
        cpu.set_status(0x40);
        cpu.run(&mut mem, 3).expect("sets");
        assert!(cpu.status().is_set(Flag::CARRY | Flag::DECIMAL | Flag::IRQ_DISABLE));
        cpu.run(&mut mem, 4).expect("clears");
        assert!(
            cpu.status()
                .is_clear(Flag::CARRY | Flag::DECIMAL | Flag::IRQ_DISABLE | Flag::OVERFLOW)
        );
    }

    #[test]
    fn nop_only_advances_pc() {
        let (mut cpu, mut mem) = setup(&[0xEA]);
        let before = *cpu.state();
        assert_eq!(cpu.step(&mut mem), Ok(2));
        assert_eq!(cpu.pc(), 0x8001);
        assert_eq!(cpu.a(), before.a);
        assert_eq!(cpu.status(), before.status);
    }
}
