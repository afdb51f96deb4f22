/*!
memory.rs - Address-space contract consumed by the CPU, plus a flat 64 KiB
backing store.

Contract
========
The CPU only ever talks to memory through [`Memory`]:

```text
read(addr)  -> u8
write(addr, value)
```

Reads take `&mut self` because real NES address spaces have read side effects
(PPU status, controller shift registers). The CPU never caches memory
contents between instructions, so "last write wins" is the only ordering
guarantee an implementation has to provide.

Faults
======
The contract is infallible. Address decoding, open-bus values and any fault
reporting belong to the implementation; the CPU does not validate addresses.

FlatMemory
==========
`FlatMemory` maps every address to its own byte. It is the store used by the
crate's own tests and is a reasonable default for hosts that populate memory
up-front (test ROMs, tooling) before calling `reset`.
*/

use crate::cpu::state::{IRQ_VECTOR, NMI_VECTOR, RESET_VECTOR};

/// Size of the 6502 address space in bytes.
pub const ADDRESS_SPACE: usize = 0x1_0000;

/// Byte-addressable read/write surface borrowed by the CPU for each call.
pub trait Memory {
    /// Read the byte visible at `addr`.
    fn read(&mut self, addr: u16) -> u8;

    /// Write `value` at `addr`.
    fn write(&mut self, addr: u16, value: u8);

    /// Read a little-endian word (low byte at `addr`, high byte at `addr + 1`,
    /// wrapping at $FFFF).
    #[inline]
    fn read_word(&mut self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Read used by tooling (disassembly, trace lines).
    ///
    /// Defaults to `read`. Implementations whose reads have side effects
    /// should override this with a side-effect free lookup.
    #[inline]
    fn peek(&mut self, addr: u16) -> u8 {
        self.read(addr)
    }
}

/// Flat 64 KiB store: every address is backed by its own byte.
pub struct FlatMemory {
    data: Box<[u8]>,
}

impl Default for FlatMemory {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FlatMemory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlatMemory")
            .field("len", &self.data.len())
            .finish()
    }
}

impl FlatMemory {
    /// Create a zero-filled address space.
    pub fn new() -> Self {
        Self {
            data: vec![0; ADDRESS_SPACE].into_boxed_slice(),
        }
    }

    /// Create a store holding `program` at `origin`, with the reset vector
    /// pointing at `origin`.
    pub fn with_program(origin: u16, program: &[u8]) -> Self {
        let mut mem = Self::new();
        mem.load(origin, program);
        mem.set_reset_vector(origin);
        mem
    }

    /// Copy `bytes` starting at `addr`. Writes past $FFFF wrap to $0000.
    pub fn load(&mut self, addr: u16, bytes: &[u8]) {
        for (i, b) in bytes.iter().enumerate() {
            let idx = (addr as usize + i) & (ADDRESS_SPACE - 1);
            self.data[idx] = *b;
        }
    }

    /// Write a little-endian word at `addr` (high byte wraps at $FFFF).
    pub fn write_word(&mut self, addr: u16, value: u16) {
        self.write(addr, value as u8);
        self.write(addr.wrapping_add(1), (value >> 8) as u8);
    }

    pub fn set_reset_vector(&mut self, target: u16) {
        self.write_word(RESET_VECTOR, target);
    }

    pub fn set_nmi_vector(&mut self, target: u16) {
        self.write_word(NMI_VECTOR, target);
    }

    pub fn set_irq_vector(&mut self, target: u16) {
        self.write_word(IRQ_VECTOR, target);
    }

    /// Clear every byte to 0.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Expose the whole address space (read-only). Useful for visualizers.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

impl Memory for FlatMemory {
    #[inline]
    fn read(&mut self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    #[inline]
    fn write(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }

    #[inline]
    fn peek(&mut self, addr: u16) -> u8 {
        self.data[addr as usize]
    }
}
