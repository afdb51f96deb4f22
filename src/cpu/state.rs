/*!
state.rs - Architectural 6502 state (registers, status, stack) and the
fetch / stack helpers every instruction shares.

Overview
========
`CpuState` is the single owner of the programmer-visible registers. It does
not know about decode, dispatch or cycle accounting; those live in
`dispatch`, `table` and `cycles`. The engine facade (`core::Cpu`) wraps a
`CpuState` together with the cycle counter and configuration.

Fields are public so tests and tooling can build arbitrary states directly.

Stack
=====
The stack lives in page $01 and grows downward:

```text
push: write at $0100 | SP, then SP = SP - 1
pop:  SP = SP + 1, then read at $0100 | SP
```

Both adjustments wrap modulo 256; running off either end of the page is
defined wraparound, not an error. Words go high byte first on push so a pop
of low then high rebuilds them little-endian.

Reset
=====
Reset zeroes A/X/Y, sets SP to $FD (the value left by the three suppressed
pushes of the hardware reset sequence starting from $00) and P to $34
(I, B and the unused bit set).
*/

use crate::cpu::status::StatusRegister;
use crate::memory::Memory;

/// Base address of the stack page.
pub const STACK_BASE: u16 = 0x0100;
/// NMI vector ($FFFA/$FFFB).
pub const NMI_VECTOR: u16 = 0xFFFA;
/// Reset vector ($FFFC/$FFFD).
pub const RESET_VECTOR: u16 = 0xFFFC;
/// IRQ / BRK vector ($FFFE/$FFFF).
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Stack pointer after reset.
pub const RESET_SP: u8 = 0xFD;
/// Status register after reset: IRQ_DISABLE | BREAK | UNUSED.
pub const RESET_STATUS: u8 = 0x34;

/// Register selector for generic inspection (debuggers, visualizers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    A,
    X,
    Y,
    /// Processor status
    P,
    /// Stack pointer
    SP,
}

/// Programmer-visible 6502 registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuState {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub status: StatusRegister,
}

impl Default for CpuState {
    fn default() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: RESET_SP,
            pc: 0x0000,
            status: StatusRegister::from_bits(RESET_STATUS),
        }
    }
}

impl CpuState {
    // ---------------------------------------------------------------------
    // Construction / Reset
    // ---------------------------------------------------------------------

    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset registers and load PC from the reset vector at $FFFC/$FFFD.
    pub fn reset(&mut self, mem: &mut dyn Memory) {
        let pc = mem.read_word(RESET_VECTOR);
        self.reset_to(pc);
    }

    /// Reset registers and start execution at `pc` instead of the vector.
    pub fn reset_to(&mut self, pc: u16) {
        *self = Self {
            pc,
            ..Self::default()
        };
    }

    /// Read a register by kind.
    pub fn register(&self, reg: Register) -> u8 {
        match reg {
            Register::A => self.a,
            Register::X => self.x,
            Register::Y => self.y,
            Register::P => self.status.bits(),
            Register::SP => self.sp,
        }
    }

    // ---------------------------------------------------------------------
    // Program Counter Helpers
    // ---------------------------------------------------------------------

    /// Advance PC by `delta` (wrapping at 16 bits).
    #[inline]
    pub fn advance_pc(&mut self, delta: u16) {
        self.pc = self.pc.wrapping_add(delta);
    }

    /// Read the byte at PC, then advance PC by 1.
    #[inline]
    pub fn fetch_u8(&mut self, mem: &mut dyn Memory) -> u8 {
        let b = mem.read(self.pc);
        self.advance_pc(1);
        b
    }

    // ---------------------------------------------------------------------
    // Flag shorthand
    // ---------------------------------------------------------------------

    #[inline]
    pub fn update_zn(&mut self, result: u8) {
        self.status.update_zn(result);
    }

    // ---------------------------------------------------------------------
    // Stack Helpers
    // ---------------------------------------------------------------------

    #[inline]
    fn stack_addr(&self) -> u16 {
        STACK_BASE | self.sp as u16
    }

    /// Push a byte onto the stack.
    #[inline]
    pub fn push_u8(&mut self, mem: &mut dyn Memory, value: u8) {
        mem.write(self.stack_addr(), value);
        self.sp = self.sp.wrapping_sub(1);
    }

    /// Pull a byte from the stack.
    #[inline]
    pub fn pop_u8(&mut self, mem: &mut dyn Memory) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        mem.read(self.stack_addr())
    }

    /// Push a word, high byte first (return-address order).
    #[inline]
    pub fn push_u16(&mut self, mem: &mut dyn Memory, value: u16) {
        self.push_u8(mem, (value >> 8) as u8);
        self.push_u8(mem, value as u8);
    }

    /// Pull a word, low byte first.
    #[inline]
    pub fn pop_u16(&mut self, mem: &mut dyn Memory) -> u16 {
        let lo = self.pop_u8(mem) as u16;
        let hi = self.pop_u8(mem) as u16;
        (hi << 8) | lo
    }
}
