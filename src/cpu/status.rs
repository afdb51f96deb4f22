/*!
status.rs - Processor status register (P).

Bit layout
==========
Bit: 7 6 5 4 3 2 1 0
     N V 1 B D I Z C

  N = NEGATIVE
  V = OVERFLOW
  1 = UNUSED (reads as 1 by convention; forced on every push)
  B = BREAK (only meaningful in pushed copies: set by BRK/PHP, clear for IRQ/NMI)
  D = DECIMAL (settable, but the 2A03 has no BCD adder)
  I = IRQ_DISABLE
  Z = ZERO
  C = CARRY

`Flag` names the bits; `StatusRegister` is the packed byte the CPU carries.
Pushing and pulling the register round-trips the full byte.
*/

use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Named status bits.
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Flag: u8 {
        const CARRY = 0b0000_0001;
        const ZERO = 0b0000_0010;
        const IRQ_DISABLE = 0b0000_0100;
        /// Not wired to the ALU on the NES.
        const DECIMAL = 0b0000_1000;
        const BREAK = 0b0001_0000;
        const UNUSED = 0b0010_0000;
        const OVERFLOW = 0b0100_0000;
        const NEGATIVE = 0b1000_0000;
    }
}

/// Packed 8-bit status register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StatusRegister(Flag);

impl StatusRegister {
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        Self(Flag::from_bits_retain(bits))
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0.bits()
    }

    /// The register as a flag set.
    #[inline]
    pub const fn flags(self) -> Flag {
        self.0
    }

    #[inline]
    pub fn set(&mut self, flag: Flag) {
        self.0.insert(flag);
    }

    #[inline]
    pub fn clear(&mut self, flag: Flag) {
        self.0.remove(flag);
    }

    /// True when every bit of `flag` is set.
    #[inline]
    pub fn is_set(self, flag: Flag) -> bool {
        self.0.contains(flag)
    }

    /// True when no bit of `flag` is set.
    #[inline]
    pub fn is_clear(self, flag: Flag) -> bool {
        !self.0.intersects(flag)
    }

    /// Set or clear `flag` from a boolean.
    #[inline]
    pub fn assign(&mut self, flag: Flag, on: bool) {
        self.0.set(flag, on);
    }

    /// ZERO <- (value == 0)
    #[inline]
    pub fn update_zero(&mut self, value: u8) {
        self.assign(Flag::ZERO, value == 0);
    }

    /// NEGATIVE <- bit 7 of value
    #[inline]
    pub fn update_negative(&mut self, value: u8) {
        self.assign(Flag::NEGATIVE, value & 0x80 != 0);
    }

    /// Both ZERO and NEGATIVE from `value`; the post-condition of most instructions.
    #[inline]
    pub fn update_zn(&mut self, value: u8) {
        self.update_zero(value);
        self.update_negative(value);
    }

    /// Byte to push on the stack.
    ///
    /// UNUSED is always forced on. BREAK is set for software pushes (BRK, PHP)
    /// and cleared for hardware interrupt entry.
    #[inline]
    pub fn for_push(self, software: bool) -> u8 {
        let mut pushed = self.0 | Flag::UNUSED;
        pushed.set(Flag::BREAK, software);
        pushed.bits()
    }
}

impl From<StatusRegister> for u8 {
    fn from(p: StatusRegister) -> u8 {
        p.bits()
    }
}

impl From<u8> for StatusRegister {
    fn from(bits: u8) -> Self {
        Self::from_bits(bits)
    }
}

impl From<Flag> for StatusRegister {
    fn from(flags: Flag) -> Self {
        Self(flags)
    }
}

/// Renders the register as `NV-BDIZC`, upper case for set bits.
impl fmt::Display for StatusRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(Flag, char); 8] = [
            (Flag::NEGATIVE, 'N'),
            (Flag::OVERFLOW, 'V'),
            (Flag::UNUSED, '-'),
            (Flag::BREAK, 'B'),
            (Flag::DECIMAL, 'D'),
            (Flag::IRQ_DISABLE, 'I'),
            (Flag::ZERO, 'Z'),
            (Flag::CARRY, 'C'),
        ];
        for (flag, name) in NAMES {
            let c = if self.is_set(flag) {
                name
            } else {
                name.to_ascii_lowercase()
            };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}
