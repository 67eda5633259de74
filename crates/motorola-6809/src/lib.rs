//! Cycle-counting Motorola 6809 CPU core.
//!
//! Each `step()` executes one complete instruction (or one interrupt
//! entry) against a borrowed [`emu_core::Bus`] and returns the number of
//! clock cycles it took. Undecodable instructions surface as a
//! [`CpuFault`] instead of panicking.
//!
//! ```
//! use emu_core::{Cpu, SimpleBus};
//! use motorola_6809::Mc6809;
//!
//! let mut bus = SimpleBus::new();
//! bus.load(0xFFFE, &[0x02, 0x00]); // reset vector
//! bus.load(0x0200, &[0x86, 0x42]); // LDA #$42
//!
//! let mut cpu = Mc6809::new();
//! cpu.reset(&mut bus);
//! assert_eq!(cpu.step(&mut bus), Ok(2));
//! assert_eq!(cpu.regs.a, 0x42);
//! ```

pub mod addressing;
pub mod alu;
mod cpu;
mod disasm;
mod error;
pub mod flags;
pub mod opcodes;
mod registers;
mod trace;

pub use addressing::{IndexedForm, IndexedMode, Resolution};
pub use cpu::{
    ExecState, Mc6809, VECTOR_FIRQ, VECTOR_IRQ, VECTOR_NMI, VECTOR_RESET, VECTOR_SWI,
    VECTOR_SWI2, VECTOR_SWI3,
};
pub use disasm::{Disassembly, disassemble};
pub use error::CpuFault;
pub use flags::ConditionCodes;
pub use opcodes::{AddressingMode, Opcode, Page};
pub use registers::{IndexRegister, Registers, transfer_name};
pub use trace::TraceEntry;
