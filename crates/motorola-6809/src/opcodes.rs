//! Opcode tables.
//!
//! The 6809 has three opcode pages. Page 0 is selected by a bare opcode
//! byte; pages 1 and 2 by a `$10` / `$11` prefix before the real opcode.
//! Each page is a flat 256-entry array built at compile time, with `None`
//! in every illegal slot.
//!
//! Cycle counts are the MC6809 datasheet base counts. Indexed addressing
//! adds postbyte-dependent cycles on top (see [`crate::addressing`]), and a
//! few operations add their own (taken long branches, PSH/PUL per byte,
//! RTI with the entire flag set). `size` includes the prefix byte; for
//! indexed modes it is the size with no offset bytes after the postbyte.

use crate::registers::IndexRegister;

/// Opcode page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Page {
    /// Unprefixed opcodes.
    Page0,
    /// Opcodes prefixed with `$10`.
    Page1,
    /// Opcodes prefixed with `$11`.
    Page2,
}

impl Page {
    /// The prefix byte selecting this page, if any.
    #[must_use]
    pub const fn prefix(self) -> Option<u8> {
        match self {
            Self::Page0 => None,
            Self::Page1 => Some(PAGE1_PREFIX),
            Self::Page2 => Some(PAGE2_PREFIX),
        }
    }

    /// Page number (0, 1 or 2).
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Page0 => 0,
            Self::Page1 => 1,
            Self::Page2 => 2,
        }
    }
}

/// Prefix byte selecting page 1.
pub const PAGE1_PREFIX: u8 = 0x10;
/// Prefix byte selecting page 2.
pub const PAGE2_PREFIX: u8 = 0x11;

/// How an instruction locates its operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// No operand, or the operand is implied by the opcode.
    Inherent,
    /// Operand bytes follow the opcode.
    Immediate,
    /// `DP:byte`.
    Direct,
    /// 16-bit absolute address.
    Extended,
    /// Postbyte-driven register-relative addressing.
    Indexed,
    /// 8-bit PC-relative displacement.
    Relative,
    /// 16-bit PC-relative displacement.
    LongRelative,
}

/// Accumulator operand of an 8-bit instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acc {
    A,
    B,
}

/// 16-bit register operand of a 16-bit instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reg16 {
    D,
    X,
    Y,
    U,
    S,
}

/// Where a read-modify-write instruction operates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Memory,
    A,
    B,
}

/// Single-operand read-modify-write operations (`$00`-`$0F` family).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Com,
    Lsr,
    Ror,
    Asr,
    Asl,
    Rol,
    Dec,
    Inc,
    Tst,
    Clr,
}

/// Two-operand 8-bit accumulator operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp8 {
    Sub,
    Cmp,
    Sbc,
    And,
    Bit,
    Ld,
    Eor,
    Adc,
    Or,
    Add,
}

/// Two-operand 16-bit register operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp16 {
    Sub,
    Add,
    Cmp,
    Ld,
}

/// Stack selected by PSH/PUL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stack {
    S,
    U,
}

/// Software interrupt flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoftwareInterrupt {
    Swi,
    Swi2,
    Swi3,
}

/// What an opcode does. The dispatcher has one handler per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Unary(UnaryOp, Target),
    Alu8(AluOp8, Acc),
    Store8(Acc),
    Alu16(AluOp16, Reg16),
    Store16(Reg16),
    Lea(IndexRegister),
    /// Conditional branch; the payload is the condition nibble.
    Branch(u8),
    Bsr,
    Jmp,
    Jsr,
    Rts,
    Rti,
    Push(Stack),
    Pull(Stack),
    Tfr,
    Exg,
    Orcc,
    Andcc,
    Cwai,
    Sync,
    Swi(SoftwareInterrupt),
    Nop,
    Daa,
    Sex,
    Abx,
    Mul,
}

/// Immutable description of one opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    /// Page the opcode lives on.
    pub page: Page,
    /// Opcode byte (after any prefix).
    pub code: u8,
    /// Assembler mnemonic.
    pub mnemonic: &'static str,
    /// Addressing mode.
    pub mode: AddressingMode,
    /// Base cycle count.
    pub cycles: u8,
    /// Encoded size in bytes, prefix included.
    pub size: u8,
    /// Execution category.
    pub operation: Operation,
}

impl Opcode {
    /// Full opcode encoding: `$10xx` / `$11xx` for prefixed pages.
    #[must_use]
    pub const fn encoding(&self) -> u16 {
        match self.page.prefix() {
            Some(prefix) => (prefix as u16) << 8 | self.code as u16,
            None => self.code as u16,
        }
    }

    /// Number of opcode bytes (1, or 2 with a prefix).
    #[must_use]
    pub const fn opcode_len(&self) -> u8 {
        if self.page.prefix().is_some() { 2 } else { 1 }
    }

    /// Width in bytes of an immediate operand.
    #[must_use]
    pub const fn immediate_width(&self) -> u8 {
        match self.operation {
            Operation::Alu16(..) => 2,
            _ => 1,
        }
    }
}

use AddressingMode::{Direct, Extended, Immediate, Indexed, Inherent, LongRelative, Relative};
use Operation::{
    Abx, Alu8, Alu16, Andcc, Branch, Bsr, Cwai, Daa, Exg, Jmp, Jsr, Lea, Mul, Nop, Orcc, Pull,
    Push, Rti, Rts, Sex, Store8, Store16, Swi, Sync, Tfr, Unary,
};

const fn op(
    page: Page,
    code: u8,
    mnemonic: &'static str,
    mode: AddressingMode,
    cycles: u8,
    size: u8,
    operation: Operation,
) -> Opcode {
    Opcode {
        page,
        code,
        mnemonic,
        mode,
        cycles,
        size,
        operation,
    }
}

const fn p0(
    code: u8,
    mnemonic: &'static str,
    mode: AddressingMode,
    cycles: u8,
    size: u8,
    operation: Operation,
) -> Opcode {
    op(Page::Page0, code, mnemonic, mode, cycles, size, operation)
}

const fn p1(
    code: u8,
    mnemonic: &'static str,
    mode: AddressingMode,
    cycles: u8,
    size: u8,
    operation: Operation,
) -> Opcode {
    op(Page::Page1, code, mnemonic, mode, cycles, size, operation)
}

const fn p2(
    code: u8,
    mnemonic: &'static str,
    mode: AddressingMode,
    cycles: u8,
    size: u8,
    operation: Operation,
) -> Opcode {
    op(Page::Page2, code, mnemonic, mode, cycles, size, operation)
}

const fn build(entries: &[Opcode]) -> [Option<Opcode>; 256] {
    let mut table = [None; 256];
    let mut i = 0;
    while i < entries.len() {
        let entry = entries[i];
        assert!(
            table[entry.code as usize].is_none(),
            "duplicate opcode in table"
        );
        table[entry.code as usize] = Some(entry);
        i += 1;
    }
    table
}

const MEM: Target = Target::Memory;
const TA: Target = Target::A;
const TB: Target = Target::B;

#[rustfmt::skip]
const PAGE0_ENTRIES: &[Opcode] = &[
    // Direct read-modify-write
    p0(0x00, "NEG", Direct, 6, 2, Unary(UnaryOp::Neg, MEM)),
    p0(0x03, "COM", Direct, 6, 2, Unary(UnaryOp::Com, MEM)),
    p0(0x04, "LSR", Direct, 6, 2, Unary(UnaryOp::Lsr, MEM)),
    p0(0x06, "ROR", Direct, 6, 2, Unary(UnaryOp::Ror, MEM)),
    p0(0x07, "ASR", Direct, 6, 2, Unary(UnaryOp::Asr, MEM)),
    p0(0x08, "ASL", Direct, 6, 2, Unary(UnaryOp::Asl, MEM)),
    p0(0x09, "ROL", Direct, 6, 2, Unary(UnaryOp::Rol, MEM)),
    p0(0x0A, "DEC", Direct, 6, 2, Unary(UnaryOp::Dec, MEM)),
    p0(0x0C, "INC", Direct, 6, 2, Unary(UnaryOp::Inc, MEM)),
    p0(0x0D, "TST", Direct, 6, 2, Unary(UnaryOp::Tst, MEM)),
    p0(0x0E, "JMP", Direct, 3, 2, Jmp),
    p0(0x0F, "CLR", Direct, 6, 2, Unary(UnaryOp::Clr, MEM)),

    p0(0x12, "NOP", Inherent, 2, 1, Nop),
    p0(0x13, "SYNC", Inherent, 2, 1, Sync),
    p0(0x16, "LBRA", LongRelative, 5, 3, Branch(0x0)),
    p0(0x17, "LBSR", LongRelative, 9, 3, Bsr),
    p0(0x19, "DAA", Inherent, 2, 1, Daa),
    p0(0x1A, "ORCC", Immediate, 3, 2, Orcc),
    p0(0x1C, "ANDCC", Immediate, 3, 2, Andcc),
    p0(0x1D, "SEX", Inherent, 2, 1, Sex),
    p0(0x1E, "EXG", Immediate, 8, 2, Exg),
    p0(0x1F, "TFR", Immediate, 6, 2, Tfr),

    p0(0x20, "BRA", Relative, 3, 2, Branch(0x0)),
    p0(0x21, "BRN", Relative, 3, 2, Branch(0x1)),
    p0(0x22, "BHI", Relative, 3, 2, Branch(0x2)),
    p0(0x23, "BLS", Relative, 3, 2, Branch(0x3)),
    p0(0x24, "BCC", Relative, 3, 2, Branch(0x4)),
    p0(0x25, "BCS", Relative, 3, 2, Branch(0x5)),
    p0(0x26, "BNE", Relative, 3, 2, Branch(0x6)),
    p0(0x27, "BEQ", Relative, 3, 2, Branch(0x7)),
    p0(0x28, "BVC", Relative, 3, 2, Branch(0x8)),
    p0(0x29, "BVS", Relative, 3, 2, Branch(0x9)),
    p0(0x2A, "BPL", Relative, 3, 2, Branch(0xA)),
    p0(0x2B, "BMI", Relative, 3, 2, Branch(0xB)),
    p0(0x2C, "BGE", Relative, 3, 2, Branch(0xC)),
    p0(0x2D, "BLT", Relative, 3, 2, Branch(0xD)),
    p0(0x2E, "BGT", Relative, 3, 2, Branch(0xE)),
    p0(0x2F, "BLE", Relative, 3, 2, Branch(0xF)),

    p0(0x30, "LEAX", Indexed, 4, 2, Lea(IndexRegister::X)),
    p0(0x31, "LEAY", Indexed, 4, 2, Lea(IndexRegister::Y)),
    p0(0x32, "LEAS", Indexed, 4, 2, Lea(IndexRegister::S)),
    p0(0x33, "LEAU", Indexed, 4, 2, Lea(IndexRegister::U)),
    p0(0x34, "PSHS", Immediate, 5, 2, Push(Stack::S)),
    p0(0x35, "PULS", Immediate, 5, 2, Pull(Stack::S)),
    p0(0x36, "PSHU", Immediate, 5, 2, Push(Stack::U)),
    p0(0x37, "PULU", Immediate, 5, 2, Pull(Stack::U)),
    p0(0x39, "RTS", Inherent, 5, 1, Rts),
    p0(0x3A, "ABX", Inherent, 3, 1, Abx),
    p0(0x3B, "RTI", Inherent, 6, 1, Rti),
    p0(0x3C, "CWAI", Immediate, 20, 2, Cwai),
    p0(0x3D, "MUL", Inherent, 11, 1, Mul),
    p0(0x3F, "SWI", Inherent, 19, 1, Swi(SoftwareInterrupt::Swi)),

    // Accumulator A read-modify-write
    p0(0x40, "NEGA", Inherent, 2, 1, Unary(UnaryOp::Neg, TA)),
    p0(0x43, "COMA", Inherent, 2, 1, Unary(UnaryOp::Com, TA)),
    p0(0x44, "LSRA", Inherent, 2, 1, Unary(UnaryOp::Lsr, TA)),
    p0(0x46, "RORA", Inherent, 2, 1, Unary(UnaryOp::Ror, TA)),
    p0(0x47, "ASRA", Inherent, 2, 1, Unary(UnaryOp::Asr, TA)),
    p0(0x48, "ASLA", Inherent, 2, 1, Unary(UnaryOp::Asl, TA)),
    p0(0x49, "ROLA", Inherent, 2, 1, Unary(UnaryOp::Rol, TA)),
    p0(0x4A, "DECA", Inherent, 2, 1, Unary(UnaryOp::Dec, TA)),
    p0(0x4C, "INCA", Inherent, 2, 1, Unary(UnaryOp::Inc, TA)),
    p0(0x4D, "TSTA", Inherent, 2, 1, Unary(UnaryOp::Tst, TA)),
    p0(0x4F, "CLRA", Inherent, 2, 1, Unary(UnaryOp::Clr, TA)),

    // Accumulator B read-modify-write
    p0(0x50, "NEGB", Inherent, 2, 1, Unary(UnaryOp::Neg, TB)),
    p0(0x53, "COMB", Inherent, 2, 1, Unary(UnaryOp::Com, TB)),
    p0(0x54, "LSRB", Inherent, 2, 1, Unary(UnaryOp::Lsr, TB)),
    p0(0x56, "RORB", Inherent, 2, 1, Unary(UnaryOp::Ror, TB)),
    p0(0x57, "ASRB", Inherent, 2, 1, Unary(UnaryOp::Asr, TB)),
    p0(0x58, "ASLB", Inherent, 2, 1, Unary(UnaryOp::Asl, TB)),
    p0(0x59, "ROLB", Inherent, 2, 1, Unary(UnaryOp::Rol, TB)),
    p0(0x5A, "DECB", Inherent, 2, 1, Unary(UnaryOp::Dec, TB)),
    p0(0x5C, "INCB", Inherent, 2, 1, Unary(UnaryOp::Inc, TB)),
    p0(0x5D, "TSTB", Inherent, 2, 1, Unary(UnaryOp::Tst, TB)),
    p0(0x5F, "CLRB", Inherent, 2, 1, Unary(UnaryOp::Clr, TB)),

    // Indexed read-modify-write
    p0(0x60, "NEG", Indexed, 6, 2, Unary(UnaryOp::Neg, MEM)),
    p0(0x63, "COM", Indexed, 6, 2, Unary(UnaryOp::Com, MEM)),
    p0(0x64, "LSR", Indexed, 6, 2, Unary(UnaryOp::Lsr, MEM)),
    p0(0x66, "ROR", Indexed, 6, 2, Unary(UnaryOp::Ror, MEM)),
    p0(0x67, "ASR", Indexed, 6, 2, Unary(UnaryOp::Asr, MEM)),
    p0(0x68, "ASL", Indexed, 6, 2, Unary(UnaryOp::Asl, MEM)),
    p0(0x69, "ROL", Indexed, 6, 2, Unary(UnaryOp::Rol, MEM)),
    p0(0x6A, "DEC", Indexed, 6, 2, Unary(UnaryOp::Dec, MEM)),
    p0(0x6C, "INC", Indexed, 6, 2, Unary(UnaryOp::Inc, MEM)),
    p0(0x6D, "TST", Indexed, 6, 2, Unary(UnaryOp::Tst, MEM)),
    p0(0x6E, "JMP", Indexed, 3, 2, Jmp),
    p0(0x6F, "CLR", Indexed, 6, 2, Unary(UnaryOp::Clr, MEM)),

    // Extended read-modify-write
    p0(0x70, "NEG", Extended, 7, 3, Unary(UnaryOp::Neg, MEM)),
    p0(0x73, "COM", Extended, 7, 3, Unary(UnaryOp::Com, MEM)),
    p0(0x74, "LSR", Extended, 7, 3, Unary(UnaryOp::Lsr, MEM)),
    p0(0x76, "ROR", Extended, 7, 3, Unary(UnaryOp::Ror, MEM)),
    p0(0x77, "ASR", Extended, 7, 3, Unary(UnaryOp::Asr, MEM)),
    p0(0x78, "ASL", Extended, 7, 3, Unary(UnaryOp::Asl, MEM)),
    p0(0x79, "ROL", Extended, 7, 3, Unary(UnaryOp::Rol, MEM)),
    p0(0x7A, "DEC", Extended, 7, 3, Unary(UnaryOp::Dec, MEM)),
    p0(0x7C, "INC", Extended, 7, 3, Unary(UnaryOp::Inc, MEM)),
    p0(0x7D, "TST", Extended, 7, 3, Unary(UnaryOp::Tst, MEM)),
    p0(0x7E, "JMP", Extended, 4, 3, Jmp),
    p0(0x7F, "CLR", Extended, 7, 3, Unary(UnaryOp::Clr, MEM)),

    // A / X immediate
    p0(0x80, "SUBA", Immediate, 2, 2, Alu8(AluOp8::Sub, Acc::A)),
    p0(0x81, "CMPA", Immediate, 2, 2, Alu8(AluOp8::Cmp, Acc::A)),
    p0(0x82, "SBCA", Immediate, 2, 2, Alu8(AluOp8::Sbc, Acc::A)),
    p0(0x83, "SUBD", Immediate, 4, 3, Alu16(AluOp16::Sub, Reg16::D)),
    p0(0x84, "ANDA", Immediate, 2, 2, Alu8(AluOp8::And, Acc::A)),
    p0(0x85, "BITA", Immediate, 2, 2, Alu8(AluOp8::Bit, Acc::A)),
    p0(0x86, "LDA", Immediate, 2, 2, Alu8(AluOp8::Ld, Acc::A)),
    p0(0x88, "EORA", Immediate, 2, 2, Alu8(AluOp8::Eor, Acc::A)),
    p0(0x89, "ADCA", Immediate, 2, 2, Alu8(AluOp8::Adc, Acc::A)),
    p0(0x8A, "ORA", Immediate, 2, 2, Alu8(AluOp8::Or, Acc::A)),
    p0(0x8B, "ADDA", Immediate, 2, 2, Alu8(AluOp8::Add, Acc::A)),
    p0(0x8C, "CMPX", Immediate, 4, 3, Alu16(AluOp16::Cmp, Reg16::X)),
    p0(0x8D, "BSR", Relative, 7, 2, Bsr),
    p0(0x8E, "LDX", Immediate, 3, 3, Alu16(AluOp16::Ld, Reg16::X)),

    // A / X direct
    p0(0x90, "SUBA", Direct, 4, 2, Alu8(AluOp8::Sub, Acc::A)),
    p0(0x91, "CMPA", Direct, 4, 2, Alu8(AluOp8::Cmp, Acc::A)),
    p0(0x92, "SBCA", Direct, 4, 2, Alu8(AluOp8::Sbc, Acc::A)),
    p0(0x93, "SUBD", Direct, 6, 2, Alu16(AluOp16::Sub, Reg16::D)),
    p0(0x94, "ANDA", Direct, 4, 2, Alu8(AluOp8::And, Acc::A)),
    p0(0x95, "BITA", Direct, 4, 2, Alu8(AluOp8::Bit, Acc::A)),
    p0(0x96, "LDA", Direct, 4, 2, Alu8(AluOp8::Ld, Acc::A)),
    p0(0x97, "STA", Direct, 4, 2, Store8(Acc::A)),
    p0(0x98, "EORA", Direct, 4, 2, Alu8(AluOp8::Eor, Acc::A)),
    p0(0x99, "ADCA", Direct, 4, 2, Alu8(AluOp8::Adc, Acc::A)),
    p0(0x9A, "ORA", Direct, 4, 2, Alu8(AluOp8::Or, Acc::A)),
    p0(0x9B, "ADDA", Direct, 4, 2, Alu8(AluOp8::Add, Acc::A)),
    p0(0x9C, "CMPX", Direct, 6, 2, Alu16(AluOp16::Cmp, Reg16::X)),
    p0(0x9D, "JSR", Direct, 7, 2, Jsr),
    p0(0x9E, "LDX", Direct, 5, 2, Alu16(AluOp16::Ld, Reg16::X)),
    p0(0x9F, "STX", Direct, 5, 2, Store16(Reg16::X)),

    // A / X indexed
    p0(0xA0, "SUBA", Indexed, 4, 2, Alu8(AluOp8::Sub, Acc::A)),
    p0(0xA1, "CMPA", Indexed, 4, 2, Alu8(AluOp8::Cmp, Acc::A)),
    p0(0xA2, "SBCA", Indexed, 4, 2, Alu8(AluOp8::Sbc, Acc::A)),
    p0(0xA3, "SUBD", Indexed, 6, 2, Alu16(AluOp16::Sub, Reg16::D)),
    p0(0xA4, "ANDA", Indexed, 4, 2, Alu8(AluOp8::And, Acc::A)),
    p0(0xA5, "BITA", Indexed, 4, 2, Alu8(AluOp8::Bit, Acc::A)),
    p0(0xA6, "LDA", Indexed, 4, 2, Alu8(AluOp8::Ld, Acc::A)),
    p0(0xA7, "STA", Indexed, 4, 2, Store8(Acc::A)),
    p0(0xA8, "EORA", Indexed, 4, 2, Alu8(AluOp8::Eor, Acc::A)),
    p0(0xA9, "ADCA", Indexed, 4, 2, Alu8(AluOp8::Adc, Acc::A)),
    p0(0xAA, "ORA", Indexed, 4, 2, Alu8(AluOp8::Or, Acc::A)),
    p0(0xAB, "ADDA", Indexed, 4, 2, Alu8(AluOp8::Add, Acc::A)),
    p0(0xAC, "CMPX", Indexed, 6, 2, Alu16(AluOp16::Cmp, Reg16::X)),
    p0(0xAD, "JSR", Indexed, 7, 2, Jsr),
    p0(0xAE, "LDX", Indexed, 5, 2, Alu16(AluOp16::Ld, Reg16::X)),
    p0(0xAF, "STX", Indexed, 5, 2, Store16(Reg16::X)),

    // A / X extended
    p0(0xB0, "SUBA", Extended, 5, 3, Alu8(AluOp8::Sub, Acc::A)),
    p0(0xB1, "CMPA", Extended, 5, 3, Alu8(AluOp8::Cmp, Acc::A)),
    p0(0xB2, "SBCA", Extended, 5, 3, Alu8(AluOp8::Sbc, Acc::A)),
    p0(0xB3, "SUBD", Extended, 7, 3, Alu16(AluOp16::Sub, Reg16::D)),
    p0(0xB4, "ANDA", Extended, 5, 3, Alu8(AluOp8::And, Acc::A)),
    p0(0xB5, "BITA", Extended, 5, 3, Alu8(AluOp8::Bit, Acc::A)),
    p0(0xB6, "LDA", Extended, 5, 3, Alu8(AluOp8::Ld, Acc::A)),
    p0(0xB7, "STA", Extended, 5, 3, Store8(Acc::A)),
    p0(0xB8, "EORA", Extended, 5, 3, Alu8(AluOp8::Eor, Acc::A)),
    p0(0xB9, "ADCA", Extended, 5, 3, Alu8(AluOp8::Adc, Acc::A)),
    p0(0xBA, "ORA", Extended, 5, 3, Alu8(AluOp8::Or, Acc::A)),
    p0(0xBB, "ADDA", Extended, 5, 3, Alu8(AluOp8::Add, Acc::A)),
    p0(0xBC, "CMPX", Extended, 7, 3, Alu16(AluOp16::Cmp, Reg16::X)),
    p0(0xBD, "JSR", Extended, 8, 3, Jsr),
    p0(0xBE, "LDX", Extended, 6, 3, Alu16(AluOp16::Ld, Reg16::X)),
    p0(0xBF, "STX", Extended, 6, 3, Store16(Reg16::X)),

    // B / D / U immediate
    p0(0xC0, "SUBB", Immediate, 2, 2, Alu8(AluOp8::Sub, Acc::B)),
    p0(0xC1, "CMPB", Immediate, 2, 2, Alu8(AluOp8::Cmp, Acc::B)),
    p0(0xC2, "SBCB", Immediate, 2, 2, Alu8(AluOp8::Sbc, Acc::B)),
    p0(0xC3, "ADDD", Immediate, 4, 3, Alu16(AluOp16::Add, Reg16::D)),
    p0(0xC4, "ANDB", Immediate, 2, 2, Alu8(AluOp8::And, Acc::B)),
    p0(0xC5, "BITB", Immediate, 2, 2, Alu8(AluOp8::Bit, Acc::B)),
    p0(0xC6, "LDB", Immediate, 2, 2, Alu8(AluOp8::Ld, Acc::B)),
    p0(0xC8, "EORB", Immediate, 2, 2, Alu8(AluOp8::Eor, Acc::B)),
    p0(0xC9, "ADCB", Immediate, 2, 2, Alu8(AluOp8::Adc, Acc::B)),
    p0(0xCA, "ORB", Immediate, 2, 2, Alu8(AluOp8::Or, Acc::B)),
    p0(0xCB, "ADDB", Immediate, 2, 2, Alu8(AluOp8::Add, Acc::B)),
    p0(0xCC, "LDD", Immediate, 3, 3, Alu16(AluOp16::Ld, Reg16::D)),
    p0(0xCE, "LDU", Immediate, 3, 3, Alu16(AluOp16::Ld, Reg16::U)),

    // B / D / U direct
    p0(0xD0, "SUBB", Direct, 4, 2, Alu8(AluOp8::Sub, Acc::B)),
    p0(0xD1, "CMPB", Direct, 4, 2, Alu8(AluOp8::Cmp, Acc::B)),
    p0(0xD2, "SBCB", Direct, 4, 2, Alu8(AluOp8::Sbc, Acc::B)),
    p0(0xD3, "ADDD", Direct, 6, 2, Alu16(AluOp16::Add, Reg16::D)),
    p0(0xD4, "ANDB", Direct, 4, 2, Alu8(AluOp8::And, Acc::B)),
    p0(0xD5, "BITB", Direct, 4, 2, Alu8(AluOp8::Bit, Acc::B)),
    p0(0xD6, "LDB", Direct, 4, 2, Alu8(AluOp8::Ld, Acc::B)),
    p0(0xD7, "STB", Direct, 4, 2, Store8(Acc::B)),
    p0(0xD8, "EORB", Direct, 4, 2, Alu8(AluOp8::Eor, Acc::B)),
    p0(0xD9, "ADCB", Direct, 4, 2, Alu8(AluOp8::Adc, Acc::B)),
    p0(0xDA, "ORB", Direct, 4, 2, Alu8(AluOp8::Or, Acc::B)),
    p0(0xDB, "ADDB", Direct, 4, 2, Alu8(AluOp8::Add, Acc::B)),
    p0(0xDC, "LDD", Direct, 5, 2, Alu16(AluOp16::Ld, Reg16::D)),
    p0(0xDD, "STD", Direct, 5, 2, Store16(Reg16::D)),
    p0(0xDE, "LDU", Direct, 5, 2, Alu16(AluOp16::Ld, Reg16::U)),
    p0(0xDF, "STU", Direct, 5, 2, Store16(Reg16::U)),

    // B / D / U indexed
    p0(0xE0, "SUBB", Indexed, 4, 2, Alu8(AluOp8::Sub, Acc::B)),
    p0(0xE1, "CMPB", Indexed, 4, 2, Alu8(AluOp8::Cmp, Acc::B)),
    p0(0xE2, "SBCB", Indexed, 4, 2, Alu8(AluOp8::Sbc, Acc::B)),
    p0(0xE3, "ADDD", Indexed, 6, 2, Alu16(AluOp16::Add, Reg16::D)),
    p0(0xE4, "ANDB", Indexed, 4, 2, Alu8(AluOp8::And, Acc::B)),
    p0(0xE5, "BITB", Indexed, 4, 2, Alu8(AluOp8::Bit, Acc::B)),
    p0(0xE6, "LDB", Indexed, 4, 2, Alu8(AluOp8::Ld, Acc::B)),
    p0(0xE7, "STB", Indexed, 4, 2, Store8(Acc::B)),
    p0(0xE8, "EORB", Indexed, 4, 2, Alu8(AluOp8::Eor, Acc::B)),
    p0(0xE9, "ADCB", Indexed, 4, 2, Alu8(AluOp8::Adc, Acc::B)),
    p0(0xEA, "ORB", Indexed, 4, 2, Alu8(AluOp8::Or, Acc::B)),
    p0(0xEB, "ADDB", Indexed, 4, 2, Alu8(AluOp8::Add, Acc::B)),
    p0(0xEC, "LDD", Indexed, 5, 2, Alu16(AluOp16::Ld, Reg16::D)),
    p0(0xED, "STD", Indexed, 5, 2, Store16(Reg16::D)),
    p0(0xEE, "LDU", Indexed, 5, 2, Alu16(AluOp16::Ld, Reg16::U)),
    p0(0xEF, "STU", Indexed, 5, 2, Store16(Reg16::U)),

    // B / D / U extended
    p0(0xF0, "SUBB", Extended, 5, 3, Alu8(AluOp8::Sub, Acc::B)),
    p0(0xF1, "CMPB", Extended, 5, 3, Alu8(AluOp8::Cmp, Acc::B)),
    p0(0xF2, "SBCB", Extended, 5, 3, Alu8(AluOp8::Sbc, Acc::B)),
    p0(0xF3, "ADDD", Extended, 7, 3, Alu16(AluOp16::Add, Reg16::D)),
    p0(0xF4, "ANDB", Extended, 5, 3, Alu8(AluOp8::And, Acc::B)),
    p0(0xF5, "BITB", Extended, 5, 3, Alu8(AluOp8::Bit, Acc::B)),
    p0(0xF6, "LDB", Extended, 5, 3, Alu8(AluOp8::Ld, Acc::B)),
    p0(0xF7, "STB", Extended, 5, 3, Store8(Acc::B)),
    p0(0xF8, "EORB", Extended, 5, 3, Alu8(AluOp8::Eor, Acc::B)),
    p0(0xF9, "ADCB", Extended, 5, 3, Alu8(AluOp8::Adc, Acc::B)),
    p0(0xFA, "ORB", Extended, 5, 3, Alu8(AluOp8::Or, Acc::B)),
    p0(0xFB, "ADDB", Extended, 5, 3, Alu8(AluOp8::Add, Acc::B)),
    p0(0xFC, "LDD", Extended, 6, 3, Alu16(AluOp16::Ld, Reg16::D)),
    p0(0xFD, "STD", Extended, 6, 3, Store16(Reg16::D)),
    p0(0xFE, "LDU", Extended, 6, 3, Alu16(AluOp16::Ld, Reg16::U)),
    p0(0xFF, "STU", Extended, 6, 3, Store16(Reg16::U)),
];

#[rustfmt::skip]
const PAGE1_ENTRIES: &[Opcode] = &[
    p1(0x21, "LBRN", LongRelative, 5, 4, Branch(0x1)),
    p1(0x22, "LBHI", LongRelative, 5, 4, Branch(0x2)),
    p1(0x23, "LBLS", LongRelative, 5, 4, Branch(0x3)),
    p1(0x24, "LBCC", LongRelative, 5, 4, Branch(0x4)),
    p1(0x25, "LBCS", LongRelative, 5, 4, Branch(0x5)),
    p1(0x26, "LBNE", LongRelative, 5, 4, Branch(0x6)),
    p1(0x27, "LBEQ", LongRelative, 5, 4, Branch(0x7)),
    p1(0x28, "LBVC", LongRelative, 5, 4, Branch(0x8)),
    p1(0x29, "LBVS", LongRelative, 5, 4, Branch(0x9)),
    p1(0x2A, "LBPL", LongRelative, 5, 4, Branch(0xA)),
    p1(0x2B, "LBMI", LongRelative, 5, 4, Branch(0xB)),
    p1(0x2C, "LBGE", LongRelative, 5, 4, Branch(0xC)),
    p1(0x2D, "LBLT", LongRelative, 5, 4, Branch(0xD)),
    p1(0x2E, "LBGT", LongRelative, 5, 4, Branch(0xE)),
    p1(0x2F, "LBLE", LongRelative, 5, 4, Branch(0xF)),
    p1(0x3F, "SWI2", Inherent, 20, 2, Swi(SoftwareInterrupt::Swi2)),

    p1(0x83, "CMPD", Immediate, 5, 4, Alu16(AluOp16::Cmp, Reg16::D)),
    p1(0x8C, "CMPY", Immediate, 5, 4, Alu16(AluOp16::Cmp, Reg16::Y)),
    p1(0x8E, "LDY", Immediate, 4, 4, Alu16(AluOp16::Ld, Reg16::Y)),
    p1(0x93, "CMPD", Direct, 7, 3, Alu16(AluOp16::Cmp, Reg16::D)),
    p1(0x9C, "CMPY", Direct, 7, 3, Alu16(AluOp16::Cmp, Reg16::Y)),
    p1(0x9E, "LDY", Direct, 6, 3, Alu16(AluOp16::Ld, Reg16::Y)),
    p1(0x9F, "STY", Direct, 6, 3, Store16(Reg16::Y)),
    p1(0xA3, "CMPD", Indexed, 7, 3, Alu16(AluOp16::Cmp, Reg16::D)),
    p1(0xAC, "CMPY", Indexed, 7, 3, Alu16(AluOp16::Cmp, Reg16::Y)),
    p1(0xAE, "LDY", Indexed, 6, 3, Alu16(AluOp16::Ld, Reg16::Y)),
    p1(0xAF, "STY", Indexed, 6, 3, Store16(Reg16::Y)),
    p1(0xB3, "CMPD", Extended, 8, 4, Alu16(AluOp16::Cmp, Reg16::D)),
    p1(0xBC, "CMPY", Extended, 8, 4, Alu16(AluOp16::Cmp, Reg16::Y)),
    p1(0xBE, "LDY", Extended, 7, 4, Alu16(AluOp16::Ld, Reg16::Y)),
    p1(0xBF, "STY", Extended, 7, 4, Store16(Reg16::Y)),

    p1(0xCE, "LDS", Immediate, 4, 4, Alu16(AluOp16::Ld, Reg16::S)),
    p1(0xDE, "LDS", Direct, 6, 3, Alu16(AluOp16::Ld, Reg16::S)),
    p1(0xDF, "STS", Direct, 6, 3, Store16(Reg16::S)),
    p1(0xEE, "LDS", Indexed, 6, 3, Alu16(AluOp16::Ld, Reg16::S)),
    p1(0xEF, "STS", Indexed, 6, 3, Store16(Reg16::S)),
    p1(0xFE, "LDS", Extended, 7, 4, Alu16(AluOp16::Ld, Reg16::S)),
    p1(0xFF, "STS", Extended, 7, 4, Store16(Reg16::S)),
];

#[rustfmt::skip]
const PAGE2_ENTRIES: &[Opcode] = &[
    p2(0x3F, "SWI3", Inherent, 20, 2, Swi(SoftwareInterrupt::Swi3)),
    p2(0x83, "CMPU", Immediate, 5, 4, Alu16(AluOp16::Cmp, Reg16::U)),
    p2(0x8C, "CMPS", Immediate, 5, 4, Alu16(AluOp16::Cmp, Reg16::S)),
    p2(0x93, "CMPU", Direct, 7, 3, Alu16(AluOp16::Cmp, Reg16::U)),
    p2(0x9C, "CMPS", Direct, 7, 3, Alu16(AluOp16::Cmp, Reg16::S)),
    p2(0xA3, "CMPU", Indexed, 7, 3, Alu16(AluOp16::Cmp, Reg16::U)),
    p2(0xAC, "CMPS", Indexed, 7, 3, Alu16(AluOp16::Cmp, Reg16::S)),
    p2(0xB3, "CMPU", Extended, 8, 4, Alu16(AluOp16::Cmp, Reg16::U)),
    p2(0xBC, "CMPS", Extended, 8, 4, Alu16(AluOp16::Cmp, Reg16::S)),
];

static PAGE0: [Option<Opcode>; 256] = build(PAGE0_ENTRIES);
static PAGE1: [Option<Opcode>; 256] = build(PAGE1_ENTRIES);
static PAGE2: [Option<Opcode>; 256] = build(PAGE2_ENTRIES);

/// Look up an opcode. `None` means the slot is illegal on that page.
#[must_use]
pub fn lookup(page: Page, code: u8) -> Option<&'static Opcode> {
    let table = match page {
        Page::Page0 => &PAGE0,
        Page::Page1 => &PAGE1,
        Page::Page2 => &PAGE2,
    };
    table[code as usize].as_ref()
}

/// Iterate every defined opcode, page 0 first.
pub fn iter() -> impl Iterator<Item = &'static Opcode> {
    PAGE0
        .iter()
        .chain(PAGE1.iter())
        .chain(PAGE2.iter())
        .filter_map(Option::as_ref)
}
