//! Instruction trace ring buffer.

use std::collections::VecDeque;
use std::fmt;

use crate::opcodes::Page;
use crate::registers::Registers;

/// One executed instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TraceEntry {
    /// Address of the first instruction byte.
    pub pc: u16,
    pub page: Page,
    pub opcode: u8,
    pub mnemonic: &'static str,
    /// Cycles the instruction took.
    pub cycles: u32,
    /// Register state after execution.
    pub registers: Registers,
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.registers;
        write!(
            f,
            "{:04X}  {:<5} A={:02X} B={:02X} X={:04X} Y={:04X} U={:04X} S={:04X} DP={:02X} CC={:02X} ({})",
            self.pc, self.mnemonic, r.a, r.b, r.x, r.y, r.u, r.s, r.dp, r.cc.0, self.cycles
        )
    }
}

/// Bounded history of executed instructions.
#[derive(Debug, Clone)]
pub(crate) struct TraceBuffer {
    entries: VecDeque<TraceEntry>,
    capacity: usize,
}

impl TraceBuffer {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub(crate) fn push(&mut self, entry: TraceEntry) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &TraceEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(pc: u16) -> TraceEntry {
        TraceEntry {
            pc,
            page: Page::Page0,
            opcode: 0x12,
            mnemonic: "NOP",
            cycles: 2,
            registers: Registers::new(),
        }
    }

    #[test]
    fn keeps_most_recent() {
        let mut buffer = TraceBuffer::new(2);
        for pc in 0..5 {
            buffer.push(entry(pc));
        }
        let pcs: Vec<u16> = buffer.iter().map(|e| e.pc).collect();
        assert_eq!(pcs, vec![3, 4]);
    }

    #[test]
    fn display() {
        let text = entry(0x0200).to_string();
        assert!(text.starts_with("0200  NOP"));
        assert!(text.ends_with("CC=50 (2)"));
    }
}
