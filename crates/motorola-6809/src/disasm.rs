//! Disassembler producing Motorola assembler syntax.
//!
//! Decoding uses the same opcode tables and postbyte decoder as the CPU,
//! so anything the CPU would fault on is reported with the same
//! [`CpuFault`].

use std::fmt;

use emu_core::Bus;

use crate::addressing::{IndexedForm, IndexedMode};
use crate::error::CpuFault;
use crate::opcodes::{
    self, AddressingMode, Opcode, Operation, PAGE1_PREFIX, PAGE2_PREFIX, Page, Stack,
};
use crate::registers::transfer_name;

/// One disassembled instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disassembly {
    /// Address of the first byte.
    pub address: u16,
    /// Every byte of the instruction, prefix and operands included.
    pub bytes: Vec<u8>,
    pub opcode: &'static Opcode,
    /// Operand text, empty for inherent instructions.
    pub operand: String,
}

impl Disassembly {
    /// Encoded length in bytes.
    #[must_use]
    pub fn len(&self) -> u16 {
        self.bytes.len() as u16
    }

    /// Always false; every instruction has an opcode byte.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Address of the following instruction.
    #[must_use]
    pub fn next_address(&self) -> u16 {
        self.address.wrapping_add(self.len())
    }
}

impl fmt::Display for Disassembly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operand.is_empty() {
            f.write_str(self.opcode.mnemonic)
        } else {
            write!(f, "{:<6}{}", self.opcode.mnemonic, self.operand)
        }
    }
}

/// Sequential reader that remembers the bytes it consumed.
struct Reader<'a, B: Bus> {
    bus: &'a mut B,
    address: u16,
    bytes: Vec<u8>,
}

impl<B: Bus> Reader<'_, B> {
    fn byte(&mut self) -> u8 {
        let value = self.bus.read(self.address);
        self.address = self.address.wrapping_add(1);
        self.bytes.push(value);
        value
    }

    fn word(&mut self) -> u16 {
        let hi = self.byte();
        let lo = self.byte();
        u16::from_be_bytes([hi, lo])
    }
}

fn signed_hex(value: i16) -> String {
    if value < 0 {
        format!("-${:02X}", value.unsigned_abs())
    } else {
        format!("${value:02X}")
    }
}

fn register_list(mask: u8, stack: Stack) -> String {
    let other = match stack {
        Stack::S => "U",
        Stack::U => "S",
    };
    let names = ["CC", "A", "B", "DP", "X", "Y", other, "PC"];
    names
        .iter()
        .enumerate()
        .filter(|(bit, _)| mask & (1 << bit) != 0)
        .map(|(_, name)| *name)
        .collect::<Vec<_>>()
        .join(",")
}

fn indexed_operand<B: Bus>(reader: &mut Reader<'_, B>, start: u16) -> Result<String, CpuFault> {
    let postbyte = reader.byte();
    let mode = IndexedMode::decode(postbyte).ok_or(CpuFault::IllegalAddressingPostbyte {
        address: start,
        postbyte,
    })?;
    let r = mode.register.name();

    let text = match mode.form {
        IndexedForm::Offset5(n) => format!("{},{r}", signed_hex(i16::from(n))),
        IndexedForm::PostIncrement1 => format!(",{r}+"),
        IndexedForm::PostIncrement2 => format!(",{r}++"),
        IndexedForm::PreDecrement1 => format!(",-{r}"),
        IndexedForm::PreDecrement2 => format!(",--{r}"),
        IndexedForm::NoOffset => format!(",{r}"),
        IndexedForm::AccumulatorB => format!("B,{r}"),
        IndexedForm::AccumulatorA => format!("A,{r}"),
        IndexedForm::AccumulatorD => format!("D,{r}"),
        IndexedForm::Offset8 => {
            let n = reader.byte() as i8;
            format!("{},{r}", signed_hex(i16::from(n)))
        }
        IndexedForm::Offset16 => format!("${:04X},{r}", reader.word()),
        IndexedForm::PcOffset8 => {
            let n = reader.byte() as i8;
            format!("{},PCR", signed_hex(i16::from(n)))
        }
        IndexedForm::PcOffset16 => format!("${:04X},PCR", reader.word()),
        IndexedForm::ExtendedIndirect => return Ok(format!("[${:04X}]", reader.word())),
    };

    Ok(if mode.indirect { format!("[{text}]") } else { text })
}

/// Disassemble the instruction at `address`.
///
/// Reads go through the bus, so memory-mapped devices with read side
/// effects will see them.
pub fn disassemble<B: Bus>(bus: &mut B, address: u16) -> Result<Disassembly, CpuFault> {
    let mut reader = Reader {
        bus,
        address,
        bytes: Vec::with_capacity(5),
    };

    let (page, code) = match reader.byte() {
        PAGE1_PREFIX => (Page::Page1, reader.byte()),
        PAGE2_PREFIX => (Page::Page2, reader.byte()),
        code => (Page::Page0, code),
    };
    let opcode = opcodes::lookup(page, code).ok_or(CpuFault::IllegalOpcode {
        address,
        page,
        opcode: code,
    })?;

    let operand = match opcode.mode {
        AddressingMode::Inherent => String::new(),
        AddressingMode::Immediate => match opcode.operation {
            Operation::Push(stack) | Operation::Pull(stack) => {
                register_list(reader.byte(), stack)
            }
            Operation::Tfr | Operation::Exg => {
                let postbyte = reader.byte();
                let src = transfer_name(postbyte >> 4).unwrap_or("?");
                let dst = transfer_name(postbyte & 0x0F).unwrap_or("?");
                format!("{src},{dst}")
            }
            _ if opcode.immediate_width() == 2 => format!("#${:04X}", reader.word()),
            _ => format!("#${:02X}", reader.byte()),
        },
        AddressingMode::Direct => format!("<${:02X}", reader.byte()),
        AddressingMode::Extended => format!("${:04X}", reader.word()),
        AddressingMode::Indexed => indexed_operand(&mut reader, address)?,
        AddressingMode::Relative => {
            let offset = reader.byte() as i8;
            format!("${:04X}", reader.address.wrapping_add_signed(i16::from(offset)))
        }
        AddressingMode::LongRelative => {
            let offset = reader.word();
            format!("${:04X}", reader.address.wrapping_add(offset))
        }
    };

    Ok(Disassembly {
        address,
        bytes: reader.bytes,
        opcode,
        operand,
    })
}
