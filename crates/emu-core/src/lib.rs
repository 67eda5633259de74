//! Core traits and types for emulation.
//!
//! CPU cores talk to memory only through [`Bus`], and expose their state
//! through [`Observable`] so debuggers and test harnesses can inspect it
//! without touching emulation state.

mod bus;
mod cpu;
mod map;
mod observable;

pub use bus::{Bus, SimpleBus};
pub use cpu::Cpu;
pub use map::{Device, MapError, MemoryMap, Ram, Rom};
pub use observable::{Observable, Value};
