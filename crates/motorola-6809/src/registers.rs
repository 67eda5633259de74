//! 6809 CPU registers.
//!
//! - A, B: 8-bit accumulators, concatenated as the 16-bit D (A high)
//! - X, Y: 16-bit index registers
//! - U, S: 16-bit user and hardware stack pointers
//! - PC: 16-bit program counter
//! - DP: 8-bit direct page register
//! - CC: condition codes

use crate::ConditionCodes;
use crate::flags::{F, I};

/// 6809 CPU register set.
///
/// D is not stored: [`Registers::d`] and [`Registers::set_d`] go through
/// A and B, so the three can never disagree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Registers {
    /// Accumulator A (high byte of D).
    pub a: u8,
    /// Accumulator B (low byte of D).
    pub b: u8,
    /// X index register.
    pub x: u16,
    /// Y index register.
    pub y: u16,
    /// User stack pointer.
    pub u: u16,
    /// Hardware stack pointer.
    pub s: u16,
    /// Program counter.
    pub pc: u16,
    /// Direct page register.
    pub dp: u8,
    /// Condition codes.
    pub cc: ConditionCodes,
}

impl Registers {
    /// Create registers in the post-reset state (masks set, rest zero).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            a: 0,
            b: 0,
            x: 0,
            y: 0,
            u: 0,
            s: 0,
            pc: 0,
            dp: 0,
            cc: ConditionCodes(I | F),
        }
    }

    /// D accumulator (A:B).
    #[must_use]
    pub const fn d(&self) -> u16 {
        (self.a as u16) << 8 | self.b as u16
    }

    /// Set D, splitting it into A and B.
    pub fn set_d(&mut self, value: u16) {
        let [a, b] = value.to_be_bytes();
        self.a = a;
        self.b = b;
    }

    /// Read an index register.
    #[must_use]
    pub const fn index(&self, reg: IndexRegister) -> u16 {
        match reg {
            IndexRegister::X => self.x,
            IndexRegister::Y => self.y,
            IndexRegister::U => self.u,
            IndexRegister::S => self.s,
        }
    }

    /// Write an index register.
    pub fn set_index(&mut self, reg: IndexRegister, value: u16) {
        match reg {
            IndexRegister::X => self.x = value,
            IndexRegister::Y => self.y = value,
            IndexRegister::U => self.u = value,
            IndexRegister::S => self.s = value,
        }
    }

    /// Read a register by its TFR/EXG postbyte nibble.
    ///
    /// 8-bit registers read into the low byte with $FF above them, as the
    /// real chip does when an 8-bit source feeds a 16-bit destination.
    /// Undefined codes read as $FFFF.
    #[must_use]
    pub const fn transfer_source(&self, code: u8) -> u16 {
        match code & 0x0F {
            0x0 => self.d(),
            0x1 => self.x,
            0x2 => self.y,
            0x3 => self.u,
            0x4 => self.s,
            0x5 => self.pc,
            0x8 => 0xFF00 | self.a as u16,
            0x9 => 0xFF00 | self.b as u16,
            0xA => 0xFF00 | self.cc.0 as u16,
            0xB => 0xFF00 | self.dp as u16,
            _ => 0xFFFF,
        }
    }

    /// Write a register by its TFR/EXG postbyte nibble.
    ///
    /// 8-bit destinations take the low byte. Undefined codes are ignored.
    pub fn transfer_dest(&mut self, code: u8, value: u16) {
        match code & 0x0F {
            0x0 => self.set_d(value),
            0x1 => self.x = value,
            0x2 => self.y = value,
            0x3 => self.u = value,
            0x4 => self.s = value,
            0x5 => self.pc = value,
            0x8 => self.a = value as u8,
            0x9 => self.b = value as u8,
            0xA => self.cc.0 = value as u8,
            0xB => self.dp = value as u8,
            _ => {}
        }
    }
}

/// A register usable as an indexed-addressing base.
///
/// The discriminant is the postbyte encoding (bits 6-5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexRegister {
    X = 0,
    Y = 1,
    U = 2,
    S = 3,
}

impl IndexRegister {
    /// Decode bits 6-5 of an indexed postbyte.
    #[must_use]
    pub const fn from_postbyte(postbyte: u8) -> Self {
        match (postbyte >> 5) & 0x03 {
            0 => Self::X,
            1 => Self::Y,
            2 => Self::U,
            _ => Self::S,
        }
    }

    /// Assembler name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::X => "X",
            Self::Y => "Y",
            Self::U => "U",
            Self::S => "S",
        }
    }
}

/// Name of a TFR/EXG register code, `None` for undefined codes.
#[must_use]
pub const fn transfer_name(code: u8) -> Option<&'static str> {
    match code & 0x0F {
        0x0 => Some("D"),
        0x1 => Some("X"),
        0x2 => Some("Y"),
        0x3 => Some("U"),
        0x4 => Some("S"),
        0x5 => Some("PC"),
        0x8 => Some("A"),
        0x9 => Some("B"),
        0xA => Some("CC"),
        0xB => Some("DP"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn d_tracks_a_and_b() {
        let mut regs = Registers::new();
        regs.set_d(0x1234);
        assert_eq!((regs.a, regs.b), (0x12, 0x34));
        regs.a = 0xAB;
        assert_eq!(regs.d(), 0xAB34);
        regs.b = 0xCD;
        assert_eq!(regs.d(), 0xABCD);
    }

    #[test]
    fn index_register_numbering_matches_postbyte() {
        assert_eq!(IndexRegister::from_postbyte(0x0B), IndexRegister::X);
        assert_eq!(IndexRegister::from_postbyte(0x2B), IndexRegister::Y);
        assert_eq!(IndexRegister::from_postbyte(0x4B), IndexRegister::U);
        assert_eq!(IndexRegister::from_postbyte(0xE4), IndexRegister::S);
    }

    #[test]
    fn mixed_width_transfers() {
        let mut regs = Registers::new();
        regs.a = 0x42;
        regs.x = 0x1234;
        assert_eq!(regs.transfer_source(0x8), 0xFF42);
        regs.transfer_dest(0x9, regs.transfer_source(0x1));
        assert_eq!(regs.b, 0x34);
        assert_eq!(regs.transfer_source(0x6), 0xFFFF);
        let before = regs;
        regs.transfer_dest(0xC, 0);
        assert_eq!(regs, before);
    }
}
