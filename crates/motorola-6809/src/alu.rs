//! ALU operations for the 6809.
//!
//! Every function is pure: it returns the result value, the flag bits it
//! computed and the mask of flags it owns. Flags outside the mask are left
//! exactly as they were when the result is applied.

use crate::flags::{C, ConditionCodes, H, N, V, Z};

const NZ: u8 = N | Z;
const NZV: u8 = N | Z | V;
const NZC: u8 = N | Z | C;
const NZVC: u8 = N | Z | V | C;

/// Result of an ALU operation with flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AluResult<T> {
    pub value: T,
    /// Computed flag bits (only meaningful under `mask`).
    pub flags: u8,
    /// Flags this operation updates.
    pub mask: u8,
}

impl<T: Copy> AluResult<T> {
    /// Merge the computed flags into `cc` and return the value.
    pub fn apply(self, cc: &mut ConditionCodes) -> T {
        cc.0 = (cc.0 & !self.mask) | (self.flags & self.mask);
        self.value
    }
}

fn nz8(value: u8) -> u8 {
    let mut flags = 0;
    if value & 0x80 != 0 {
        flags |= N;
    }
    if value == 0 {
        flags |= Z;
    }
    flags
}

fn nz16(value: u16) -> u8 {
    let mut flags = 0;
    if value & 0x8000 != 0 {
        flags |= N;
    }
    if value == 0 {
        flags |= Z;
    }
    flags
}

const fn flag_if(flag: u8, on: bool) -> u8 {
    if on { flag } else { 0 }
}

/// ADD / ADC: updates H, N, Z, V and C.
#[must_use]
pub fn add8(a: u8, b: u8, carry: bool) -> AluResult<u8> {
    let c = u8::from(carry);
    let sum = u16::from(a) + u16::from(b) + u16::from(c);
    let value = sum as u8;

    let half = (a & 0x0F) + (b & 0x0F) + c > 0x0F;
    // Both operands same sign, result different sign
    let overflow = (a ^ value) & (b ^ value) & 0x80 != 0;

    AluResult {
        value,
        flags: nz8(value) | flag_if(H, half) | flag_if(V, overflow) | flag_if(C, sum > 0xFF),
        mask: NZVC | H,
    }
}

/// SUB / SBC / CMP: updates N, Z, V and C. H is left alone.
#[must_use]
pub fn sub8(a: u8, b: u8, borrow: bool) -> AluResult<u8> {
    let c = u8::from(borrow);
    let value = a.wrapping_sub(b).wrapping_sub(c);

    let overflow = (a ^ b) & (a ^ value) & 0x80 != 0;
    let carry = u16::from(a) < u16::from(b) + u16::from(c);

    AluResult {
        value,
        flags: nz8(value) | flag_if(V, overflow) | flag_if(C, carry),
        mask: NZVC,
    }
}

/// 16-bit add (ADDD): updates N, Z, V and C.
#[must_use]
pub fn add16(a: u16, b: u16) -> AluResult<u16> {
    let (value, carry) = a.overflowing_add(b);
    let overflow = (a ^ value) & (b ^ value) & 0x8000 != 0;
    AluResult {
        value,
        flags: nz16(value) | flag_if(V, overflow) | flag_if(C, carry),
        mask: NZVC,
    }
}

/// 16-bit subtract (SUBD, CMPD/X/Y/U/S): updates N, Z, V and C.
#[must_use]
pub fn sub16(a: u16, b: u16) -> AluResult<u16> {
    let (value, borrow) = a.overflowing_sub(b);
    let overflow = (a ^ b) & (a ^ value) & 0x8000 != 0;
    AluResult {
        value,
        flags: nz16(value) | flag_if(V, overflow) | flag_if(C, borrow),
        mask: NZVC,
    }
}

/// Loads, stores and logical operations: N, Z from the value, V cleared.
#[must_use]
pub fn logic8(value: u8) -> AluResult<u8> {
    AluResult {
        value,
        flags: nz8(value),
        mask: NZV,
    }
}

/// 16-bit loads and stores: N, Z from the value, V cleared.
#[must_use]
pub fn logic16(value: u16) -> AluResult<u16> {
    AluResult {
        value,
        flags: nz16(value),
        mask: NZV,
    }
}

/// NEG: two's complement. V set for $80, C set for any nonzero result.
#[must_use]
pub fn neg8(a: u8) -> AluResult<u8> {
    let value = a.wrapping_neg();
    AluResult {
        value,
        flags: nz8(value) | flag_if(V, a == 0x80) | flag_if(C, value != 0),
        mask: NZVC,
    }
}

/// COM: one's complement. V cleared, C set.
#[must_use]
pub fn com8(a: u8) -> AluResult<u8> {
    let value = !a;
    AluResult {
        value,
        flags: nz8(value) | C,
        mask: NZVC,
    }
}

/// CLR: Z set, N, V and C cleared.
#[must_use]
pub fn clr8() -> AluResult<u8> {
    AluResult {
        value: 0,
        flags: Z,
        mask: NZVC,
    }
}

/// INC: V set when $7F wraps to $80. C untouched.
#[must_use]
pub fn inc8(a: u8) -> AluResult<u8> {
    let value = a.wrapping_add(1);
    AluResult {
        value,
        flags: nz8(value) | flag_if(V, a == 0x7F),
        mask: NZV,
    }
}

/// DEC: V set when $80 wraps to $7F. C untouched.
#[must_use]
pub fn dec8(a: u8) -> AluResult<u8> {
    let value = a.wrapping_sub(1);
    AluResult {
        value,
        flags: nz8(value) | flag_if(V, a == 0x80),
        mask: NZV,
    }
}

/// LSR: bit 0 into C, zero into bit 7. V untouched.
#[must_use]
pub fn lsr8(a: u8) -> AluResult<u8> {
    let value = a >> 1;
    AluResult {
        value,
        flags: nz8(value) | flag_if(C, a & 0x01 != 0),
        mask: NZC,
    }
}

/// ASR: bit 0 into C, bit 7 preserved, V = old bit 7 xor C.
#[must_use]
pub fn asr8(a: u8) -> AluResult<u8> {
    let value = (a & 0x80) | (a >> 1);
    let carry = a & 0x01 != 0;
    AluResult {
        value,
        flags: nz8(value) | flag_if(V, (a & 0x80 != 0) != carry) | flag_if(C, carry),
        mask: NZVC,
    }
}

/// ROR: C into bit 7, bit 0 into C. V untouched.
#[must_use]
pub fn ror8(a: u8, carry: bool) -> AluResult<u8> {
    let value = (u8::from(carry) << 7) | (a >> 1);
    AluResult {
        value,
        flags: nz8(value) | flag_if(C, a & 0x01 != 0),
        mask: NZC,
    }
}

/// ASL (LSL): bit 7 into C, V = N xor C.
#[must_use]
pub fn asl8(a: u8) -> AluResult<u8> {
    let value = a << 1;
    AluResult {
        value,
        flags: nz8(value) | flag_if(V, (a ^ value) & 0x80 != 0) | flag_if(C, a & 0x80 != 0),
        mask: NZVC,
    }
}

/// ROL: C into bit 0, bit 7 into C, V = N xor C.
#[must_use]
pub fn rol8(a: u8, carry: bool) -> AluResult<u8> {
    let value = (a << 1) | u8::from(carry);
    AluResult {
        value,
        flags: nz8(value) | flag_if(V, (a ^ value) & 0x80 != 0) | flag_if(C, a & 0x80 != 0),
        mask: NZVC,
    }
}

/// DAA: decimal-adjust A after a BCD addition.
///
/// C is only ever set, never cleared. V is left alone.
#[must_use]
pub fn daa(a: u8, cc: ConditionCodes) -> AluResult<u8> {
    let lsn = a & 0x0F;
    let msn = a >> 4;

    let mut correction = 0u8;
    if cc.half_carry() || lsn > 9 {
        correction |= 0x06;
    }
    if cc.carry() || msn > 9 || (msn > 8 && lsn > 9) {
        correction |= 0x60;
    }

    let sum = u16::from(a) + u16::from(correction);
    let value = sum as u8;
    AluResult {
        value,
        flags: nz8(value) | flag_if(C, cc.carry() || sum > 0xFF),
        mask: NZC,
    }
}

/// MUL: unsigned A * B into D. Z from D, C from bit 7 of B.
#[must_use]
pub fn mul(a: u8, b: u8) -> AluResult<u16> {
    let value = u16::from(a) * u16::from(b);
    AluResult {
        value,
        flags: flag_if(Z, value == 0) | flag_if(C, value & 0x0080 != 0),
        mask: Z | C,
    }
}

/// SEX: sign-extend B into D. N, Z from D.
#[must_use]
pub fn sex(b: u8) -> AluResult<u16> {
    let value = b as i8 as i16 as u16;
    AluResult {
        value,
        flags: nz16(value),
        mask: NZ,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run<T: Copy>(result: AluResult<T>, cc: u8) -> (T, u8) {
        let mut cc = ConditionCodes(cc);
        let value = result.apply(&mut cc);
        (value, cc.0)
    }

    #[test]
    fn add_signed_overflow() {
        let (value, cc) = run(add8(0x7F, 0x01, false), 0);
        assert_eq!(value, 0x80);
        assert_eq!(cc, N | V | H);
    }

    #[test]
    fn sub_borrow() {
        let (value, cc) = run(sub8(0x00, 0x01, false), H);
        assert_eq!(value, 0xFF);
        // H preserved
        assert_eq!(cc, N | C | H);
    }

    #[test]
    fn sbc_uses_borrow() {
        let (value, cc) = run(sub8(0x10, 0x0F, true), 0);
        assert_eq!(value, 0x00);
        assert_eq!(cc, Z);
    }

    #[test]
    fn adc_carry_out() {
        let (value, cc) = run(add8(0xFF, 0x00, true), 0);
        assert_eq!(value, 0x00);
        assert_eq!(cc, Z | C | H);
    }

    #[test]
    fn sixteen_bit() {
        let (value, cc) = run(add16(0x7FFF, 0x0001), 0);
        assert_eq!(value, 0x8000);
        assert_eq!(cc, N | V);
        let (value, cc) = run(sub16(0x0000, 0x0001), 0);
        assert_eq!(value, 0xFFFF);
        assert_eq!(cc, N | C);
    }

    #[test]
    fn neg_edge_cases() {
        assert_eq!(run(neg8(0x80), 0), (0x80, N | V | C));
        assert_eq!(run(neg8(0x00), C), (0x00, Z));
        assert_eq!(run(neg8(0x01), 0), (0xFF, N | C));
    }

    #[test]
    fn inc_dec_overflow_and_carry_preserved() {
        assert_eq!(run(inc8(0x7F), C), (0x80, N | V | C));
        assert_eq!(run(dec8(0x80), 0), (0x7F, V));
        assert_eq!(run(dec8(0x01), C), (0x00, Z | C));
    }

    #[test]
    fn shifts() {
        // ASL: V is N xor C
        assert_eq!(run(asl8(0x40), 0), (0x80, N | V));
        assert_eq!(run(asl8(0xC0), 0), (0x80, N | C));
        // ASR: V is the old sign xor C
        assert_eq!(run(asr8(0x81), V), (0xC0, N | C));
        assert_eq!(run(asr8(0x01), 0), (0x00, Z | V | C));
        assert_eq!(run(asr8(0x80), 0), (0xC0, N | V));
        // LSR/ROR leave V alone
        assert_eq!(run(lsr8(0x01), V), (0x00, Z | V | C));
        assert_eq!(run(ror8(0x01, true), 0), (0x80, N | C));
        assert_eq!(run(rol8(0x80, false), 0), (0x00, Z | V | C));
    }

    #[test]
    fn com_and_clr() {
        assert_eq!(run(com8(0xFF), V), (0x00, Z | C));
        assert_eq!(run(clr8(), N | V | C | H), (0x00, Z | H));
    }

    #[test]
    fn daa_adjusts_bcd_sum() {
        // $19 + $28 = $41 with H set; adjusted to $47
        let (sum, cc) = run(add8(0x19, 0x28, false), 0);
        assert_eq!((sum, cc & H), (0x41, H));
        assert_eq!(run(daa(sum, ConditionCodes(cc)), cc), (0x47, H));

        // $99 + $01 = $9A; adjusted to $00 with carry
        let (sum, cc) = run(add8(0x99, 0x01, false), 0);
        let (value, flags) = run(daa(sum, ConditionCodes(cc)), cc);
        assert_eq!(value, 0x00);
        assert_eq!(flags & (Z | C), Z | C);
    }

    #[test]
    fn mul_and_sex() {
        assert_eq!(run(mul(0x0C, 0x64), 0), (0x04B0, C));
        assert_eq!(run(mul(0x00, 0x64), C), (0x0000, Z));
        assert_eq!(run(sex(0x80), V), (0xFF80, N | V));
        assert_eq!(run(sex(0x00), N), (0x0000, Z));
    }
}
