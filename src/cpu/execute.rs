/*!
execute.rs - Instruction semantic helpers (ALU, shifts, operand access).

Purpose
=======
The per-opcode handlers in `dispatch::*` are thin: they read the resolved
operand, call one of these helpers and write the result back. Keeping the
arithmetic here means every addressing-mode variant of an instruction shares
one implementation, and the helpers can be tested without memory at all.

Inventory
---------
Operand access:
    read_operand, write_operand, modify

Loads / transfers:
    load (shared Z/N update)

ALU:
    add_with_carry, subtract_with_carry, compare, bit_test

Shifts / rotates (return result, update C/Z/N):
    asl, lsr, rol, ror

Decimal mode
============
The NES CPU has the D flag but no BCD adder. ADC/SBC are always binary.
*/

use crate::cpu::addressing::Operand;
use crate::cpu::state::CpuState;
use crate::cpu::status::Flag;
use crate::memory::Memory;

// ---------------------------------------------------------------------------
// Operand access
// ---------------------------------------------------------------------------

/// Read the value an operand designates. `Implied` reads as 0; the table never
/// pairs an implied mode with a reading handler.
#[inline]
pub(crate) fn read_operand(cpu: &CpuState, mem: &mut dyn Memory, operand: Operand) -> u8 {
    match operand {
        Operand::Accumulator => cpu.a,
        Operand::Address { addr, .. } => mem.read(addr),
        Operand::Implied => 0,
    }
}

/// Store `value` to the operand's locus.
#[inline]
pub(crate) fn write_operand(cpu: &mut CpuState, mem: &mut dyn Memory, operand: Operand, value: u8) {
    match operand {
        Operand::Accumulator => cpu.a = value,
        Operand::Address { addr, .. } => mem.write(addr, value),
        Operand::Implied => {}
    }
}

/// Read-modify-write on A or memory.
///
/// Memory targets follow the 6502 bus sequence: read, write the unmodified
/// value back, then write the result. Memory-mapped registers observe both
/// writes.
pub(crate) fn modify<F>(cpu: &mut CpuState, mem: &mut dyn Memory, operand: Operand, transform: F) -> u8
where
    F: FnOnce(&mut CpuState, u8) -> u8,
{
    match operand {
        Operand::Address { addr, .. } => {
            let old = mem.read(addr);
            mem.write(addr, old);
            let new = transform(cpu, old);
            mem.write(addr, new);
            new
        }
        _ => {
            let a = cpu.a;
            let new = transform(cpu, a);
            cpu.a = new;
            new
        }
    }
}

// ---------------------------------------------------------------------------
// Loads
// ---------------------------------------------------------------------------

/// Common post-condition of loads and transfers.
#[inline]
pub(crate) fn load(cpu: &mut CpuState, value: u8) -> u8 {
    cpu.update_zn(value);
    value
}

// ---------------------------------------------------------------------------
// ADC / SBC
// ---------------------------------------------------------------------------

/// A <- A + M + C (binary).
///
/// Carry is bit 8 of the 9-bit sum. Overflow is set when A and M share a sign
/// that differs from the sign of the truncated result.
#[inline]
pub(crate) fn add_with_carry(cpu: &mut CpuState, value: u8) {
    let a = cpu.a;
    let carry_in = u16::from(cpu.status.is_set(Flag::CARRY));
    let sum = a as u16 + value as u16 + carry_in;
    let result = sum as u8;

    cpu.status.assign(Flag::CARRY, sum > 0xFF);
    cpu.status
        .assign(Flag::OVERFLOW, (!(a ^ value) & (a ^ result) & 0x80) != 0);

    cpu.a = result;
    cpu.update_zn(result);
}

/// A <- A - M - !C, computed as ADC of the one's complement.
#[inline]
pub(crate) fn subtract_with_carry(cpu: &mut CpuState, value: u8) {
    add_with_carry(cpu, value ^ 0xFF);
}

// ---------------------------------------------------------------------------
// Compare / BIT
// ---------------------------------------------------------------------------

/// CMP/CPX/CPY: C <- reg >= M, Z/N from reg - M. Registers are untouched.
#[inline]
pub(crate) fn compare(cpu: &mut CpuState, reg: u8, value: u8) {
    cpu.status.assign(Flag::CARRY, reg >= value);
    cpu.update_zn(reg.wrapping_sub(value));
}

/// BIT: Z from A & M; N and V copied from bits 7 and 6 of M.
#[inline]
pub(crate) fn bit_test(cpu: &mut CpuState, value: u8) {
    cpu.status.update_zero(cpu.a & value);
    cpu.status.assign(Flag::NEGATIVE, value & 0x80 != 0);
    cpu.status.assign(Flag::OVERFLOW, value & 0x40 != 0);
}

// ---------------------------------------------------------------------------
// Shifts / Rotates
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn asl(cpu: &mut CpuState, v: u8) -> u8 {
    cpu.status.assign(Flag::CARRY, v & 0x80 != 0);
    let r = v << 1;
    cpu.update_zn(r);
    r
}

#[inline]
pub(crate) fn lsr(cpu: &mut CpuState, v: u8) -> u8 {
    cpu.status.assign(Flag::CARRY, v & 0x01 != 0);
    let r = v >> 1;
    cpu.update_zn(r);
    r
}

#[inline]
pub(crate) fn rol(cpu: &mut CpuState, v: u8) -> u8 {
    let carry_in = u8::from(cpu.status.is_set(Flag::CARRY));
    cpu.status.assign(Flag::CARRY, v & 0x80 != 0);
    let r = (v << 1) | carry_in;
    cpu.update_zn(r);
    r
}

#[inline]
pub(crate) fn ror(cpu: &mut CpuState, v: u8) -> u8 {
    let carry_in = if cpu.status.is_set(Flag::CARRY) { 0x80 } else { 0 };
    cpu.status.assign(Flag::CARRY, v & 0x01 != 0);
    let r = (v >> 1) | carry_in;
    cpu.update_zn(r);
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::FlatMemory;

    fn cpu_with_a(a: u8, carry: bool) -> CpuState {
        let mut cpu = CpuState::new();
        cpu.a = a;
        cpu.status.assign(Flag::CARRY, carry);
        cpu
    }

    /// Reference ADC built from signed and unsigned widening arithmetic.
    fn reference_adc(a: u8, b: u8, c: bool) -> (u8, bool, bool) {
        let unsigned = a as u16 + b as u16 + c as u16;
        let signed = a as i8 as i16 + b as i8 as i16 + c as i16;
        (unsigned as u8, unsigned > 255, !(-128..=127).contains(&signed))
    }

    #[test]
    fn adc_matches_reference_for_all_inputs() {
        for a in 0..=255u8 {
            for b in 0..=255u8 {
                for c in [false, true] {
                    let mut cpu = cpu_with_a(a, c);
                    add_with_carry(&mut cpu, b);
                    let (result, carry, overflow) = reference_adc(a, b, c);
                    assert_eq!(cpu.a, result, "a={a:02X} b={b:02X} c={c}");
                    assert_eq!(cpu.status.is_set(Flag::CARRY), carry, "a={a:02X} b={b:02X} c={c}");
                    assert_eq!(
                        cpu.status.is_set(Flag::OVERFLOW),
                        overflow,
                        "a={a:02X} b={b:02X} c={c}"
                    );
                    assert_eq!(cpu.status.is_set(Flag::ZERO), result == 0);
                    assert_eq!(cpu.status.is_set(Flag::NEGATIVE), result & 0x80 != 0);
                }
            }
        }
    }

    #[test]
    fn adc_sign_magnitude_table() {
        // (A, M, C) -> (result, C, V)
        let cases: [(u8, u8, bool, u8, bool, bool); 8] = [
            (0x50, 0x10, false, 0x60, false, false), // +,+ no overflow
            (0x50, 0x50, false, 0xA0, false, true),  // +,+ overflow
            (0x50, 0x90, false, 0xE0, false, false), // +,- never overflows
            (0x50, 0xD0, false, 0x20, true, false),  // +,- with carry out
            (0xD0, 0x10, false, 0xE0, false, false), // -,+
            (0xD0, 0x90, false, 0x60, true, true),   // -,- overflow
            (0xD0, 0xD0, false, 0xA0, true, false),  // -,- no overflow
            (0x7F, 0x00, true, 0x80, false, true),   // carry-in tips over
        ];
        for (a, m, c, r, carry, v) in cases {
            let mut cpu = cpu_with_a(a, c);
            add_with_carry(&mut cpu, m);
            assert_eq!(cpu.a, r);
            assert_eq!(cpu.status.is_set(Flag::CARRY), carry);
            assert_eq!(cpu.status.is_set(Flag::OVERFLOW), v);
        }
    }

    #[test]
    fn adc_ignores_decimal_flag() {
        let mut cpu = cpu_with_a(0x09, false);
        cpu.status.set(Flag::DECIMAL);
        add_with_carry(&mut cpu, 0x01);
        assert_eq!(cpu.a, 0x0A);
    }

    #[test]
    fn sbc_borrow_semantics() {
        let mut cpu = cpu_with_a(0x10, true);
        subtract_with_carry(&mut cpu, 0x01);
        assert_eq!(cpu.a, 0x0F);
        assert!(cpu.status.is_set(Flag::CARRY)); // no borrow

        let mut cpu = cpu_with_a(0x00, true);
        subtract_with_carry(&mut cpu, 0x01);
        assert_eq!(cpu.a, 0xFF);
        assert!(cpu.status.is_clear(Flag::CARRY)); // borrow
        assert!(cpu.status.is_set(Flag::NEGATIVE));

        let mut cpu = cpu_with_a(0x80, true);
        subtract_with_carry(&mut cpu, 0x01);
        assert_eq!(cpu.a, 0x7F);
        assert!(cpu.status.is_set(Flag::OVERFLOW));

        let mut cpu = cpu_with_a(0x05, false);
        subtract_with_carry(&mut cpu, 0x02);
        assert_eq!(cpu.a, 0x02);
    }

    #[test]
    fn compare_sets_carry_zero_negative() {
        let mut cpu = CpuState::new();
        compare(&mut cpu, 0x40, 0x40);
        assert!(cpu.status.is_set(Flag::CARRY | Flag::ZERO));
        assert!(cpu.status.is_clear(Flag::NEGATIVE));

        compare(&mut cpu, 0x40, 0x41);
        assert!(cpu.status.is_clear(Flag::CARRY | Flag::ZERO));
        assert!(cpu.status.is_set(Flag::NEGATIVE));

        compare(&mut cpu, 0x41, 0x40);
        assert!(cpu.status.is_set(Flag::CARRY));
        assert!(cpu.status.is_clear(Flag::ZERO | Flag::NEGATIVE));
    }

    #[test]
    fn bit_copies_operand_bits_not_and_result() {
        let mut cpu = cpu_with_a(0x01, false);
        bit_test(&mut cpu, 0xC0);
        assert!(cpu.status.is_set(Flag::ZERO));
        assert!(cpu.status.is_set(Flag::NEGATIVE));
        assert!(cpu.status.is_set(Flag::OVERFLOW));
        assert_eq!(cpu.a, 0x01);

        bit_test(&mut cpu, 0x01);
        assert!(cpu.status.is_clear(Flag::ZERO | Flag::NEGATIVE | Flag::OVERFLOW));
    }

    #[test]
    fn shifts_and_rotates() {
        let mut cpu = cpu_with_a(0, false);
        assert_eq!(asl(&mut cpu, 0x81), 0x02);
        assert!(cpu.status.is_set(Flag::CARRY));

        assert_eq!(rol(&mut cpu, 0x40), 0x81); // carry shifted in at bit 0
        assert!(cpu.status.is_clear(Flag::CARRY));
        assert!(cpu.status.is_set(Flag::NEGATIVE));

        assert_eq!(lsr(&mut cpu, 0x01), 0x00);
        assert!(cpu.status.is_set(Flag::CARRY | Flag::ZERO));

        assert_eq!(ror(&mut cpu, 0x02), 0x81); // carry shifted in at bit 7
        assert!(cpu.status.is_clear(Flag::CARRY));
        assert!(cpu.status.is_set(Flag::NEGATIVE));
    }

    #[test]
    fn modify_memory_and_accumulator() {
        let mut mem = FlatMemory::new();
        let mut cpu = cpu_with_a(0x0F, false);
        mem.write(0x0200, 0x40);

        let r = modify(&mut cpu, &mut mem, Operand::at(0x0200), asl);
        assert_eq!(r, 0x80);
        assert_eq!(mem.read(0x0200), 0x80);
        assert_eq!(cpu.a, 0x0F);

        let r = modify(&mut cpu, &mut mem, Operand::Accumulator, |c, v| load(c, v.wrapping_add(1)));
        assert_eq!(r, 0x10);
        assert_eq!(cpu.a, 0x10);
    }

    #[test]
    fn operand_reads_and_writes() {
        let mut mem = FlatMemory::new();
        let mut cpu = cpu_with_a(0x33, false);
        mem.write(0x0010, 0x44);
        assert_eq!(read_operand(&cpu, &mut mem, Operand::Accumulator), 0x33);
        assert_eq!(read_operand(&cpu, &mut mem, Operand::at(0x0010)), 0x44);
        write_operand(&mut cpu, &mut mem, Operand::at(0x0011), 0x55);
        assert_eq!(mem.read(0x0011), 0x55);
        write_operand(&mut cpu, &mut mem, Operand::Accumulator, 0x66);
        assert_eq!(cpu.a, 0x66);
    }
}
