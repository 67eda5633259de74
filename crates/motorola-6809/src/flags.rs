//! 6809 condition code register (CC).
//!
//! ```text
//!   7   6   5   4   3   2   1   0
//!   E   F   H   I   N   Z   V   C
//! ```

/// Carry - unsigned carry out of / borrow into the top bit.
pub const C: u8 = 0x01;

/// Overflow - signed (two's complement) overflow.
pub const V: u8 = 0x02;

/// Zero - result is zero.
pub const Z: u8 = 0x04;

/// Negative - top bit of the result.
pub const N: u8 = 0x08;

/// IRQ mask - when set, IRQ is ignored.
pub const I: u8 = 0x10;

/// Half carry - carry out of bit 3 on 8-bit additions, consumed by DAA.
pub const H: u8 = 0x20;

/// FIRQ mask - when set, FIRQ is ignored.
pub const F: u8 = 0x40;

/// Entire - the stacked frame holds every register, not just PC and CC.
pub const E: u8 = 0x80;

/// Condition code register.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionCodes(pub u8);

impl ConditionCodes {
    /// Check if a flag is set.
    #[must_use]
    pub const fn is_set(self, flag: u8) -> bool {
        self.0 & flag != 0
    }

    /// Set a flag.
    pub fn set(&mut self, flag: u8) {
        self.0 |= flag;
    }

    /// Clear a flag.
    pub fn clear(&mut self, flag: u8) {
        self.0 &= !flag;
    }

    /// Set or clear a flag based on condition.
    pub fn set_if(&mut self, flag: u8, condition: bool) {
        if condition {
            self.set(flag);
        } else {
            self.clear(flag);
        }
    }

    #[must_use]
    pub const fn carry(self) -> bool {
        self.is_set(C)
    }

    #[must_use]
    pub const fn overflow(self) -> bool {
        self.is_set(V)
    }

    #[must_use]
    pub const fn zero(self) -> bool {
        self.is_set(Z)
    }

    #[must_use]
    pub const fn negative(self) -> bool {
        self.is_set(N)
    }

    #[must_use]
    pub const fn irq_mask(self) -> bool {
        self.is_set(I)
    }

    #[must_use]
    pub const fn half_carry(self) -> bool {
        self.is_set(H)
    }

    #[must_use]
    pub const fn firq_mask(self) -> bool {
        self.is_set(F)
    }

    #[must_use]
    pub const fn entire(self) -> bool {
        self.is_set(E)
    }

    pub fn set_carry(&mut self, on: bool) {
        self.set_if(C, on);
    }

    pub fn set_overflow(&mut self, on: bool) {
        self.set_if(V, on);
    }

    pub fn set_zero(&mut self, on: bool) {
        self.set_if(Z, on);
    }

    pub fn set_negative(&mut self, on: bool) {
        self.set_if(N, on);
    }

    pub fn set_irq_mask(&mut self, on: bool) {
        self.set_if(I, on);
    }

    pub fn set_half_carry(&mut self, on: bool) {
        self.set_if(H, on);
    }

    pub fn set_firq_mask(&mut self, on: bool) {
        self.set_if(F, on);
    }

    pub fn set_entire(&mut self, on: bool) {
        self.set_if(E, on);
    }

    /// Evaluate a branch condition from the low nibble of a branch opcode
    /// (`$20`-`$2F`, and the `$10 $2x` long forms).
    #[must_use]
    pub const fn condition(self, code: u8) -> bool {
        let c = self.carry();
        let v = self.overflow();
        let z = self.zero();
        let n = self.negative();
        match code & 0x0F {
            0x0 => true,          // BRA
            0x1 => false,         // BRN
            0x2 => !(c || z),     // BHI
            0x3 => c || z,        // BLS
            0x4 => !c,            // BCC/BHS
            0x5 => c,             // BCS/BLO
            0x6 => !z,            // BNE
            0x7 => z,             // BEQ
            0x8 => !v,            // BVC
            0x9 => v,             // BVS
            0xA => !n,            // BPL
            0xB => n,             // BMI
            0xC => n == v,        // BGE
            0xD => n != v,        // BLT
            0xE => !z && n == v,  // BGT
            _ => z || n != v,     // BLE
        }
    }
}

impl From<u8> for ConditionCodes {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl From<ConditionCodes> for u8 {
    fn from(cc: ConditionCodes) -> Self {
        cc.0
    }
}
