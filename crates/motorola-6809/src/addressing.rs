//! Indexed addressing postbyte decoding.
//!
//! ```text
//!   0RRnnnnn          n5,R      5-bit signed offset
//!   1RRI0000          ,R+       (indirect form reserved)
//!   1RRI0001          ,R++
//!   1RRI0010          ,-R       (indirect form reserved)
//!   1RRI0011          ,--R
//!   1RRI0100          ,R
//!   1RRI0101          B,R
//!   1RRI0110          A,R
//!   1RRI1000          n8,R
//!   1RRI1001          n16,R
//!   1RRI1011          D,R
//!   1RRI1100          n8,PCR
//!   1RRI1101          n16,PCR
//!   1xx11111          [n16]
//! ```
//!
//! `RR` selects X, Y, U or S and `I` requests one level of indirection.
//! Everything else is reserved.
//!
//! Decoding and address computation are pure: [`IndexedMode::resolve`]
//! reports the register update an auto-increment form needs instead of
//! applying it, so the caller performs exactly one writeback. Constant
//! offset forms never produce one.

use crate::registers::{IndexRegister, Registers};

/// Offset kind selected by an indexed postbyte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexedForm {
    /// Signed offset packed into the low five postbyte bits.
    Offset5(i8),
    /// `,R+`
    PostIncrement1,
    /// `,R++`
    PostIncrement2,
    /// `,-R`
    PreDecrement1,
    /// `,--R`
    PreDecrement2,
    /// `,R`
    NoOffset,
    /// `B,R`
    AccumulatorB,
    /// `A,R`
    AccumulatorA,
    /// `n8,R`
    Offset8,
    /// `n16,R`
    Offset16,
    /// `D,R`
    AccumulatorD,
    /// `n8,PCR`
    PcOffset8,
    /// `n16,PCR`
    PcOffset16,
    /// `[n16]`
    ExtendedIndirect,
}

/// A decoded indexed postbyte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexedMode {
    pub form: IndexedForm,
    pub register: IndexRegister,
    pub indirect: bool,
}

/// Result of resolving an indexed operand against the register file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Effective address, or the pointer address when `indirect` is set.
    pub address: u16,
    /// Register update for auto-increment and auto-decrement forms.
    pub writeback: Option<(IndexRegister, u16)>,
    /// The operand address must be read from `address`.
    pub indirect: bool,
}

impl IndexedMode {
    /// Decode a postbyte. Returns `None` for reserved encodings.
    #[must_use]
    pub const fn decode(postbyte: u8) -> Option<Self> {
        let register = IndexRegister::from_postbyte(postbyte);

        if postbyte & 0x80 == 0 {
            // Sign-extend bits 4-0
            let offset = ((postbyte << 3) as i8) >> 3;
            return Some(Self {
                form: IndexedForm::Offset5(offset),
                register,
                indirect: false,
            });
        }

        let indirect = postbyte & 0x10 != 0;
        let form = match postbyte & 0x0F {
            0x0 if !indirect => IndexedForm::PostIncrement1,
            0x1 => IndexedForm::PostIncrement2,
            0x2 if !indirect => IndexedForm::PreDecrement1,
            0x3 => IndexedForm::PreDecrement2,
            0x4 => IndexedForm::NoOffset,
            0x5 => IndexedForm::AccumulatorB,
            0x6 => IndexedForm::AccumulatorA,
            0x8 => IndexedForm::Offset8,
            0x9 => IndexedForm::Offset16,
            0xB => IndexedForm::AccumulatorD,
            0xC => IndexedForm::PcOffset8,
            0xD => IndexedForm::PcOffset16,
            0xF if indirect => IndexedForm::ExtendedIndirect,
            _ => return None,
        };

        Some(Self {
            form,
            register,
            indirect,
        })
    }

    /// Number of offset bytes following the postbyte.
    #[must_use]
    pub const fn extra_bytes(&self) -> u8 {
        match self.form {
            IndexedForm::Offset8 | IndexedForm::PcOffset8 => 1,
            IndexedForm::Offset16 | IndexedForm::PcOffset16 | IndexedForm::ExtendedIndirect => 2,
            _ => 0,
        }
    }

    /// Cycles added to the instruction's base count.
    #[must_use]
    pub const fn extra_cycles(&self) -> u8 {
        let direct = match self.form {
            IndexedForm::NoOffset => 0,
            IndexedForm::Offset5(_)
            | IndexedForm::AccumulatorB
            | IndexedForm::AccumulatorA
            | IndexedForm::Offset8
            | IndexedForm::PcOffset8 => 1,
            IndexedForm::PostIncrement1 | IndexedForm::PreDecrement1 => 2,
            IndexedForm::PostIncrement2 | IndexedForm::PreDecrement2 => 3,
            IndexedForm::Offset16 | IndexedForm::AccumulatorD => 4,
            IndexedForm::PcOffset16 => 5,
            // Total cost; the indirection is already included
            IndexedForm::ExtendedIndirect => return 5,
        };
        if self.indirect { direct + 3 } else { direct }
    }

    /// Compute the operand address.
    ///
    /// `offset` holds the bytes fetched after the postbyte (the low byte
    /// for 8-bit forms). For PC-relative forms `regs.pc` must already
    /// point past them.
    #[must_use]
    pub fn resolve(&self, regs: &Registers, offset: u16) -> Resolution {
        let base = regs.index(self.register);
        let mut writeback = None;

        let address = match self.form {
            IndexedForm::Offset5(n) => base.wrapping_add_signed(i16::from(n)),
            IndexedForm::PostIncrement1 => {
                writeback = Some((self.register, base.wrapping_add(1)));
                base
            }
            IndexedForm::PostIncrement2 => {
                writeback = Some((self.register, base.wrapping_add(2)));
                base
            }
            IndexedForm::PreDecrement1 => {
                let address = base.wrapping_sub(1);
                writeback = Some((self.register, address));
                address
            }
            IndexedForm::PreDecrement2 => {
                let address = base.wrapping_sub(2);
                writeback = Some((self.register, address));
                address
            }
            IndexedForm::NoOffset => base,
            IndexedForm::AccumulatorB => base.wrapping_add_signed(i16::from(regs.b as i8)),
            IndexedForm::AccumulatorA => base.wrapping_add_signed(i16::from(regs.a as i8)),
            IndexedForm::Offset8 => base.wrapping_add_signed(i16::from(offset as u8 as i8)),
            IndexedForm::Offset16 => base.wrapping_add(offset),
            IndexedForm::AccumulatorD => base.wrapping_add(regs.d()),
            IndexedForm::PcOffset8 => regs.pc.wrapping_add_signed(i16::from(offset as u8 as i8)),
            IndexedForm::PcOffset16 => regs.pc.wrapping_add(offset),
            IndexedForm::ExtendedIndirect => offset,
        };

        Resolution {
            address,
            writeback,
            indirect: self.indirect,
        }
    }
}
