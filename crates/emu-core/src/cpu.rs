//! CPU core trait.

use crate::Bus;

/// A CPU core.
///
/// CPUs execute one whole instruction per `step()` and report how many
/// clock cycles it took. The bus is passed in, not owned, so a machine can
/// share it with other components between steps.
///
/// CPUs expose their internal state for observation and debugging.
pub trait Cpu {
    /// The type used for register inspection.
    type Registers;

    /// The error raised when an instruction cannot be decoded.
    type Fault;

    /// Execute one instruction (or one interrupt entry) and return the
    /// cycles it consumed.
    ///
    /// A fault leaves the CPU positioned at the faulting instruction; the
    /// caller decides whether to halt, log, or treat it as a breakpoint.
    fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32, Self::Fault>;

    /// Returns the current program counter.
    fn pc(&self) -> u16;

    /// Returns a snapshot of all registers for inspection.
    fn registers(&self) -> Self::Registers;

    /// Returns true if the CPU is halted waiting for an interrupt.
    fn is_halted(&self) -> bool;

    /// Assert the maskable interrupt request line.
    fn irq(&mut self);

    /// Signal a non-maskable interrupt.
    fn nmi(&mut self);

    /// Reset the CPU, loading the program counter from the reset vector.
    fn reset<B: Bus>(&mut self, bus: &mut B);
}
