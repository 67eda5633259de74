//! Motorola 6809 CPU core.
//!
//! One call to `step()` runs one whole instruction, or one interrupt
//! entry, and returns the cycles it cost. The bus is borrowed for the
//! duration of the step and never owned.

mod execute;
mod interrupts;
mod stack;

pub use interrupts::{
    VECTOR_FIRQ, VECTOR_IRQ, VECTOR_NMI, VECTOR_RESET, VECTOR_SWI, VECTOR_SWI2, VECTOR_SWI3,
};

use emu_core::{Bus, Cpu, Observable, Value};

use crate::error::CpuFault;
use crate::flags::{C, E, F, H, I, N, V, Z};
use crate::registers::Registers;
use crate::trace::{TraceBuffer, TraceEntry};

/// What the CPU is doing between instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecState {
    /// Fetching and executing instructions.
    #[default]
    Running,
    /// Stopped by SYNC until any interrupt line is asserted.
    Sync,
    /// Stopped by CWAI with the entire frame already stacked.
    Wait,
}

/// Latched interrupt inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Lines {
    nmi: bool,
    firq: bool,
    irq: bool,
}

/// Motorola 6809 CPU.
pub struct Mc6809 {
    /// Register file.
    pub regs: Registers,
    state: ExecState,
    lines: Lines,
    /// Total cycles consumed.
    cycles: u64,
    /// Instructions retired, interrupt entries excluded.
    instructions: u64,
    trace: Option<TraceBuffer>,
}

impl Mc6809 {
    /// Create a CPU in the post-reset register state.
    ///
    /// The program counter is zero until [`Cpu::reset`] loads the reset
    /// vector from a bus.
    #[must_use]
    pub fn new() -> Self {
        Self {
            regs: Registers::new(),
            state: ExecState::Running,
            lines: Lines::default(),
            cycles: 0,
            instructions: 0,
            trace: None,
        }
    }

    /// Current execution state.
    #[must_use]
    pub const fn state(&self) -> ExecState {
        self.state
    }

    /// Total cycles consumed since creation.
    #[must_use]
    pub const fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Instructions executed since creation.
    #[must_use]
    pub const fn instructions(&self) -> u64 {
        self.instructions
    }

    /// Latch a non-maskable interrupt. Cleared when serviced.
    pub fn assert_nmi(&mut self) {
        self.lines.nmi = true;
    }

    /// Assert IRQ. Stays latched until serviced or released.
    pub fn assert_irq(&mut self) {
        self.lines.irq = true;
    }

    /// Assert FIRQ. Stays latched until serviced or released.
    pub fn assert_firq(&mut self) {
        self.lines.firq = true;
    }

    /// Drop the IRQ line before it has been serviced.
    pub fn release_irq(&mut self) {
        self.lines.irq = false;
    }

    /// Drop the FIRQ line before it has been serviced.
    pub fn release_firq(&mut self) {
        self.lines.firq = false;
    }

    /// Start recording executed instructions, keeping the last `capacity`.
    pub fn enable_trace(&mut self, capacity: usize) {
        self.trace = Some(TraceBuffer::new(capacity));
    }

    /// Stop recording and discard the trace.
    pub fn disable_trace(&mut self) {
        self.trace = None;
    }

    /// Recorded instructions, oldest first. Empty when tracing is off.
    pub fn trace(&self) -> impl Iterator<Item = &TraceEntry> {
        self.trace.iter().flat_map(TraceBuffer::iter)
    }

    // === Bus helpers ===

    fn read16<B: Bus>(bus: &mut B, address: u16) -> u16 {
        let hi = bus.read(address);
        let lo = bus.read(address.wrapping_add(1));
        u16::from_be_bytes([hi, lo])
    }

    fn write16<B: Bus>(bus: &mut B, address: u16, value: u16) {
        let [hi, lo] = value.to_be_bytes();
        bus.write(address, hi);
        bus.write(address.wrapping_add(1), lo);
    }

    fn fetch8<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let value = bus.read(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    fn fetch16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let hi = self.fetch8(bus);
        let lo = self.fetch8(bus);
        u16::from_be_bytes([hi, lo])
    }

    fn run_instruction<B: Bus>(&mut self, bus: &mut B) -> Result<u32, CpuFault> {
        let start = self.regs.pc;
        match self.execute(bus, start) {
            Ok((opcode, cycles)) => {
                self.instructions += 1;
                log::trace!("${start:04X} {} ({cycles} cycles)", opcode.mnemonic);
                if let Some(trace) = &mut self.trace {
                    trace.push(TraceEntry {
                        pc: start,
                        page: opcode.page,
                        opcode: opcode.code,
                        mnemonic: opcode.mnemonic,
                        cycles,
                        registers: self.regs,
                    });
                }
                Ok(cycles)
            }
            Err(fault) => {
                // Leave the CPU on the faulting instruction
                self.regs.pc = start;
                log::warn!("{fault}");
                Err(fault)
            }
        }
    }
}

impl Default for Mc6809 {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu for Mc6809 {
    type Registers = Registers;
    type Fault = CpuFault;

    fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32, CpuFault> {
        if self.state == ExecState::Sync {
            if !(self.lines.nmi || self.lines.firq || self.lines.irq) {
                return Ok(0);
            }
            // Any line ends SYNC; a masked one just resumes execution
            self.state = ExecState::Running;
            log::debug!("SYNC released at ${:04X}", self.regs.pc);
        }

        if let Some(kind) = self.pending_interrupt() {
            let cycles = self.service_interrupt(bus, kind);
            self.cycles += u64::from(cycles);
            return Ok(cycles);
        }

        if self.state == ExecState::Wait {
            return Ok(0);
        }

        let cycles = self.run_instruction(bus)?;
        self.cycles += u64::from(cycles);
        Ok(cycles)
    }

    fn pc(&self) -> u16 {
        self.regs.pc
    }

    fn registers(&self) -> Registers {
        self.regs
    }

    fn is_halted(&self) -> bool {
        self.state != ExecState::Running
    }

    fn irq(&mut self) {
        self.assert_irq();
    }

    fn nmi(&mut self) {
        self.assert_nmi();
    }

    fn reset<B: Bus>(&mut self, bus: &mut B) {
        self.reset_sequence(bus);
    }
}

impl Observable for Mc6809 {
    fn query(&self, path: &str) -> Option<Value> {
        let cc = self.regs.cc;
        match path {
            "a" => Some(self.regs.a.into()),
            "b" => Some(self.regs.b.into()),
            "d" => Some(self.regs.d().into()),
            "x" => Some(self.regs.x.into()),
            "y" => Some(self.regs.y.into()),
            "u" => Some(self.regs.u.into()),
            "s" => Some(self.regs.s.into()),
            "pc" => Some(self.regs.pc.into()),
            "dp" => Some(self.regs.dp.into()),
            "cc" => Some(cc.0.into()),

            "cc.c" => Some(cc.is_set(C).into()),
            "cc.v" => Some(cc.is_set(V).into()),
            "cc.z" => Some(cc.is_set(Z).into()),
            "cc.n" => Some(cc.is_set(N).into()),
            "cc.i" => Some(cc.is_set(I).into()),
            "cc.h" => Some(cc.is_set(H).into()),
            "cc.f" => Some(cc.is_set(F).into()),
            "cc.e" => Some(cc.is_set(E).into()),

            "state" => Some(
                match self.state {
                    ExecState::Running => "running",
                    ExecState::Sync => "sync",
                    ExecState::Wait => "wait",
                }
                .into(),
            ),
            "nmi" => Some(self.lines.nmi.into()),
            "firq" => Some(self.lines.firq.into()),
            "irq" => Some(self.lines.irq.into()),
            "cycles" => Some(self.cycles.into()),
            "instructions" => Some(self.instructions.into()),
            _ => None,
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "a",
            "b",
            "d",
            "x",
            "y",
            "u",
            "s",
            "pc",
            "dp",
            "cc",
            "cc.c",
            "cc.v",
            "cc.z",
            "cc.n",
            "cc.i",
            "cc.h",
            "cc.f",
            "cc.e",
            "state",
            "nmi",
            "firq",
            "irq",
            "cycles",
            "instructions",
        ]
    }
}
