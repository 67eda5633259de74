//! CPU faults.

use thiserror::Error;

use crate::opcodes::Page;

/// An instruction the decoder cannot execute.
///
/// `address` is the first byte of the faulting instruction, prefix
/// included. The CPU's program counter is left pointing there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CpuFault {
    /// No instruction is defined for this byte on this page.
    #[error("illegal opcode ${opcode:02X} on page {} at ${address:04X}", .page.number())]
    IllegalOpcode { address: u16, page: Page, opcode: u8 },

    /// The indexed postbyte selects a reserved encoding.
    #[error("illegal indexed postbyte ${postbyte:02X} at ${address:04X}")]
    IllegalAddressingPostbyte { address: u16, postbyte: u8 },
}

impl CpuFault {
    /// Address of the first byte of the faulting instruction.
    #[must_use]
    pub const fn address(&self) -> u16 {
        match self {
            Self::IllegalOpcode { address, .. } | Self::IllegalAddressingPostbyte { address, .. } => {
                *address
            }
        }
    }
}
