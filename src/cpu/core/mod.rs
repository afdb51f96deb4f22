/*!
core::Cpu - 6502 engine facade wrapping `CpuState`.

Design
======
- `Cpu` owns the architectural state (`CpuState`), the running cycle
  counter and the `CpuConfig` it was built with.
- Memory is borrowed per call (`&mut dyn Memory`); the engine never owns or
  caches it.
- `step` executes exactly one instruction through `dispatch::step` and adds
  its cost to the counter. An undefined opcode under the default policy
  returns `CpuError::UndefinedOpcode` and leaves the engine untouched,
  counter included.
- `trigger_interrupt` runs the IRQ/NMI entry sequence between steps.

Lifecycle
=========
`new()` yields power-up state. `reset(mem)` (vector) or `reset_to(pc)`
(explicit start) put the registers in their reset values and zero the
cycle counter. There is no halted state; the host simply stops calling
`step`.

Tracing
=======
With the `trace` feature, every `step` emits a `log::trace!` line in the
nestest column layout (see `cpu::trace`) before the instruction executes.
*/

use log::debug;

use crate::cpu::config::CpuConfig;
use crate::cpu::dispatch::{self, Interrupt};
use crate::cpu::state::{CpuState, RESET_VECTOR, Register};
use crate::cpu::status::StatusRegister;
use crate::error::CpuResult;
use crate::memory::Memory;

#[derive(Debug, Clone, Default)]
pub struct Cpu {
    state: CpuState,
    cycles: u64,
    config: CpuConfig,
}

impl Cpu {
    /// Construct a new CPU with power-up defaults.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CpuConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> CpuConfig {
        self.config
    }

    /// Return immutable reference to internal state (for inspection / testing).
    pub fn state(&self) -> &CpuState {
        &self.state
    }

    /// Mutable access for tooling and tests.
    pub fn state_mut(&mut self) -> &mut CpuState {
        &mut self.state
    }

    /// Reset registers, zero the cycle counter and load PC from $FFFC/$FFFD.
    pub fn reset(&mut self, mem: &mut dyn Memory) {
        self.state.reset(mem);
        self.cycles = 0;
        debug!(
            "reset: vector ${RESET_VECTOR:04X} -> PC ${:04X}",
            self.state.pc
        );
    }

    /// Reset registers and start at `pc`, bypassing the reset vector.
    pub fn reset_to(&mut self, pc: u16) {
        self.state.reset_to(pc);
        self.cycles = 0;
        debug!("reset: PC ${pc:04X}");
    }

    // ---------------------------------------------------------------------
    // Execution
    // ---------------------------------------------------------------------

    /// Execute one instruction and return the cycles it took.
    pub fn step(&mut self, mem: &mut dyn Memory) -> CpuResult<u32> {
        #[cfg(feature = "trace")]
        if log::log_enabled!(log::Level::Trace) {
            let line = crate::cpu::trace::TraceLine::capture(&self.state, self.cycles, mem);
            log::trace!("{line}");
        }

        let cycles = dispatch::step(&mut self.state, mem, &self.config)?;
        self.cycles += u64::from(cycles);
        Ok(cycles)
    }

    /// Execute up to `max_instructions` instructions and return the cycles
    /// consumed. Stops at the first error.
    pub fn run(&mut self, mem: &mut dyn Memory, max_instructions: usize) -> CpuResult<u64> {
        let mut total = 0u64;
        for _ in 0..max_instructions {
            total += u64::from(self.step(mem)?);
        }
        Ok(total)
    }

    /// Enter the NMI (`non_maskable`) or IRQ handler. Returns the cycles
    /// spent, 0 if an IRQ was masked by the I flag.
    pub fn trigger_interrupt(&mut self, mem: &mut dyn Memory, non_maskable: bool) -> u32 {
        let kind = if non_maskable {
            Interrupt::Nmi
        } else {
            Interrupt::Irq
        };
        let from = self.state.pc;
        let cycles = dispatch::service_interrupt(&mut self.state, mem, kind);
        if cycles > 0 {
            debug!(
                "{kind:?} taken at ${from:04X} -> ${:04X}",
                self.state.pc
            );
        } else {
            debug!("IRQ at ${from:04X} masked");
        }
        self.cycles += u64::from(cycles);
        cycles
    }

    // ---------------------------------------------------------------------
    // Register accessors (read)
    // ---------------------------------------------------------------------
    pub fn a(&self) -> u8 {
        self.state.a
    }
    pub fn x(&self) -> u8 {
        self.state.x
    }
    pub fn y(&self) -> u8 {
        self.state.y
    }
    pub fn sp(&self) -> u8 {
        self.state.sp
    }
    pub fn pc(&self) -> u16 {
        self.state.pc
    }
    pub fn status(&self) -> StatusRegister {
        self.state.status
    }
    /// Cycles consumed since the last reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }
    pub fn register(&self, reg: Register) -> u8 {
        self.state.register(reg)
    }

    // ---------------------------------------------------------------------
    // Register mutators (write)
    // ---------------------------------------------------------------------
    pub fn set_a(&mut self, v: u8) {
        self.state.a = v;
    }
    pub fn set_x(&mut self, v: u8) {
        self.state.x = v;
    }
    pub fn set_y(&mut self, v: u8) {
        self.state.y = v;
    }
    pub fn set_sp(&mut self, v: u8) {
        self.state.sp = v;
    }
    pub fn set_pc(&mut self, v: u16) {
        self.state.pc = v;
    }
    pub fn set_status(&mut self, v: u8) {
        self.state.status = StatusRegister::from_bits(v);
    }

    /// Move PC by a signed offset, wrapping at 16 bits.
    pub fn move_pc(&mut self, offset: i32) {
        // Truncating the offset is exact modulo 2^16.
        self.state.pc = self.state.pc.wrapping_add(offset as u16);
    }
}

// -------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::config::UndefinedOpcodePolicy;
    use crate::cpu::status::Flag;
    use crate::error::CpuError;
    use crate::memory::FlatMemory;
    use crate::test_utils::{setup, ORIGIN};

    #[test]
    fn construction_and_reset() {
        let (cpu, _mem) = setup(&[0xEA]);
        assert_eq!(cpu.sp(), 0xFD);
        assert_eq!(cpu.pc(), ORIGIN);
        assert_eq!(cpu.cycles(), 0);
        assert!(cpu.status().is_set(Flag::IRQ_DISABLE | Flag::UNUSED));
        assert_eq!(cpu.register(Register::P), 0x34);
    }

    #[test]
    fn step_accumulates_cycles() {
        // LDA #$01; STA $0200; NOP
        let (mut cpu, mut mem) = setup(&[0xA9, 0x01, 0x8D, 0x00, 0x02, 0xEA]);
        assert_eq!(cpu.run(&mut mem, 3), Ok(8));
        assert_eq!(cpu.cycles(), 8);
        assert_eq!(cpu.pc(), ORIGIN + 6);
    }

    #[test]
    fn reset_zeroes_cycle_counter() {
        let (mut cpu, mut mem) = setup(&[0xEA, 0xEA]);
        cpu.run(&mut mem, 2).expect("run");
        assert_eq!(cpu.cycles(), 4);
        cpu.reset(&mut mem);
        assert_eq!(cpu.cycles(), 0);
        assert_eq!(cpu.pc(), ORIGIN);
    }

    #[test]
    fn undefined_opcode_stops_run_and_leaves_state() {
        // NOP; .byte $02; NOP
        let (mut cpu, mut mem) = setup(&[0xEA, 0x02, 0xEA]);
        let r = cpu.run(&mut mem, 3);
        assert_eq!(
            r,
            Err(CpuError::UndefinedOpcode {
                opcode: 0x02,
                address: ORIGIN + 1
            })
        );
        assert_eq!(cpu.pc(), ORIGIN + 1);
        assert_eq!(cpu.cycles(), 2);
        // Retrying reports the same thing.
        let snapshot = *cpu.state();
        assert!(cpu.step(&mut mem).is_err());
        assert_eq!(*cpu.state(), snapshot);
        assert_eq!(cpu.cycles(), 2);
    }

    #[test]
    fn nop_policy_runs_through_undefined_bytes() {
        let mut mem = FlatMemory::with_program(0x8000, &[0x02, 0xE8]);
        let mut cpu =
            Cpu::with_config(CpuConfig::new().with_undefined_opcode(UndefinedOpcodePolicy::Nop));
        cpu.reset(&mut mem);
        assert_eq!(cpu.run(&mut mem, 2), Ok(4));
        assert_eq!(cpu.x(), 1);
    }

    #[test]
    fn irq_respects_i_flag_and_nmi_does_not() {
        let (mut cpu, mut mem) = setup(&[0xEA]);
        mem.set_irq_vector(0x9000);
        mem.set_nmi_vector(0xA000);

        // Reset leaves I set.
        assert_eq!(cpu.trigger_interrupt(&mut mem, false), 0);
        assert_eq!(cpu.pc(), ORIGIN);

        cpu.state_mut().status.clear(Flag::IRQ_DISABLE);
        assert_eq!(cpu.trigger_interrupt(&mut mem, false), 7);
        assert_eq!(cpu.pc(), 0x9000);
        assert_eq!(cpu.cycles(), 7);

        // I is now set, NMI still goes through.
        assert_eq!(cpu.trigger_interrupt(&mut mem, true), 7);
        assert_eq!(cpu.pc(), 0xA000);
        assert_eq!(cpu.sp(), 0xFD - 6);
    }

    #[test]
    fn irq_handler_returns_with_rti() {
        // $8000: NOP ; handler at $9000: RTI
        let (mut cpu, mut mem) = setup(&[0xEA, 0xEA]);
        mem.set_irq_vector(0x9000);
        mem.write(0x9000, 0x40);
        cpu.set_status(0x20);
        cpu.step(&mut mem).expect("NOP");
        cpu.trigger_interrupt(&mut mem, false);
        cpu.step(&mut mem).expect("RTI");
        assert_eq!(cpu.pc(), ORIGIN + 1);
        assert!(cpu.status().is_clear(Flag::IRQ_DISABLE | Flag::BREAK));
        assert_eq!(cpu.sp(), 0xFD);
    }

    #[test]
    fn pc_tooling_setters() {
        let mut cpu = Cpu::new();
        cpu.set_pc(0x0010);
        cpu.move_pc(-0x20);
        assert_eq!(cpu.pc(), 0xFFF0);
        cpu.move_pc(0x20);
        assert_eq!(cpu.pc(), 0x0010);
        cpu.set_pc(0xFFFF);
        cpu.move_pc(i32::MAX);
        assert_eq!(cpu.pc(), 0xFFFE);
        cpu.move_pc(i32::MIN);
        assert_eq!(cpu.pc(), 0xFFFE);
        cpu.move_pc(-0x1_0001);
        assert_eq!(cpu.pc(), 0xFFFD);
        cpu.set_a(1);
        cpu.set_x(2);
        cpu.set_y(3);
        cpu.set_sp(4);
        assert_eq!(
            [Register::A, Register::X, Register::Y, Register::SP].map(|r| cpu.register(r)),
            [1, 2, 3, 4]
        );
    }

    #[test]
    fn reset_to_skips_vector() {
        let mut mem = FlatMemory::new();
        mem.set_reset_vector(0x1234);
        let mut cpu = Cpu::new();
        cpu.reset(&mut mem);
        assert_eq!(cpu.pc(), 0x1234);
        cpu.reset_to(0x0400);
        assert_eq!(cpu.pc(), 0x0400);
        assert_eq!(cpu.register(Register::P), 0x34);
    }

    mod trace_logging {
        use std::cell::Cell;
        use std::sync::Once;

        use log::{Level, LevelFilter, Log, Metadata, Record};

        use crate::test_utils::setup;

        thread_local! {
            static TRACE_RECORDS: Cell<usize> = const { Cell::new(0) };
        }

        /// Counts trace-level records emitted on the calling thread.
        struct TraceCounter;

        impl Log for TraceCounter {
            fn enabled(&self, _metadata: &Metadata) -> bool {
                true
            }

            fn log(&self, record: &Record) {
                if record.level() == Level::Trace {
                    TRACE_RECORDS.with(|n| n.set(n.get() + 1));
                }
            }

            fn flush(&self) {}
        }

        static LOGGER: TraceCounter = TraceCounter;
        static INSTALL: Once = Once::new();

        fn install() {
            INSTALL.call_once(|| {
                let _ = log::set_logger(&LOGGER);
                log::set_max_level(LevelFilter::Trace);
            });
        }

        #[test]
        fn one_trace_line_per_step_only_with_feature() {
            install();
            let (mut cpu, mut mem) = setup(&[0xEA, 0xE8]);
            TRACE_RECORDS.with(|n| n.set(0));
            cpu.step(&mut mem).expect("NOP");
            let expected = usize::from(cfg!(feature = "trace"));
            assert_eq!(TRACE_RECORDS.with(Cell::get), expected);

            cpu.step(&mut mem).expect("INX");
            assert_eq!(TRACE_RECORDS.with(Cell::get), 2 * expected);
        }
    }
}
