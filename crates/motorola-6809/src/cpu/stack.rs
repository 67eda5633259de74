//! Stack operations: PSHS/PSHU, PULS/PULU and the primitives the
//! interrupt and subroutine paths share.
//!
//! Both stacks grow downward and the pointer addresses the last byte
//! pushed. 16-bit values are pushed low byte first so they sit in memory
//! big-endian.
//!
//! PSH/PUL postbyte:
//!
//! ```text
//!   7    6     5   4   3    2   1   0
//!   PC   U/S   Y   X   DP   B   A   CC
//! ```
//!
//! Bit 6 names the other stack pointer (U for PSHS/PULS, S for
//! PSHU/PULU). Push goes from bit 7 down, pull from bit 0 up.

use emu_core::Bus;

use crate::opcodes::Stack;

use super::Mc6809;

impl Mc6809 {
    const fn stack_pointer(&self, stack: Stack) -> u16 {
        match stack {
            Stack::S => self.regs.s,
            Stack::U => self.regs.u,
        }
    }

    fn set_stack_pointer(&mut self, stack: Stack, value: u16) {
        match stack {
            Stack::S => self.regs.s = value,
            Stack::U => self.regs.u = value,
        }
    }

    /// The pointer that bit 6 of a PSH/PUL postbyte refers to.
    const fn other_stack(stack: Stack) -> Stack {
        match stack {
            Stack::S => Stack::U,
            Stack::U => Stack::S,
        }
    }

    pub(super) fn push8<B: Bus>(&mut self, bus: &mut B, stack: Stack, value: u8) {
        let sp = self.stack_pointer(stack).wrapping_sub(1);
        self.set_stack_pointer(stack, sp);
        bus.write(sp, value);
    }

    pub(super) fn push16<B: Bus>(&mut self, bus: &mut B, stack: Stack, value: u16) {
        let [hi, lo] = value.to_be_bytes();
        self.push8(bus, stack, lo);
        self.push8(bus, stack, hi);
    }

    pub(super) fn pull8<B: Bus>(&mut self, bus: &mut B, stack: Stack) -> u8 {
        let sp = self.stack_pointer(stack);
        let value = bus.read(sp);
        self.set_stack_pointer(stack, sp.wrapping_add(1));
        value
    }

    pub(super) fn pull16<B: Bus>(&mut self, bus: &mut B, stack: Stack) -> u16 {
        let hi = self.pull8(bus, stack);
        let lo = self.pull8(bus, stack);
        u16::from_be_bytes([hi, lo])
    }

    /// Push the registers selected by `mask`. Returns the bytes pushed,
    /// which is also the extra cycle count.
    pub(super) fn push_registers<B: Bus>(&mut self, bus: &mut B, stack: Stack, mask: u8) -> u32 {
        let mut bytes = 0;
        if mask & 0x80 != 0 {
            self.push16(bus, stack, self.regs.pc);
            bytes += 2;
        }
        if mask & 0x40 != 0 {
            let other = self.stack_pointer(Self::other_stack(stack));
            self.push16(bus, stack, other);
            bytes += 2;
        }
        if mask & 0x20 != 0 {
            self.push16(bus, stack, self.regs.y);
            bytes += 2;
        }
        if mask & 0x10 != 0 {
            self.push16(bus, stack, self.regs.x);
            bytes += 2;
        }
        if mask & 0x08 != 0 {
            self.push8(bus, stack, self.regs.dp);
            bytes += 1;
        }
        if mask & 0x04 != 0 {
            self.push8(bus, stack, self.regs.b);
            bytes += 1;
        }
        if mask & 0x02 != 0 {
            self.push8(bus, stack, self.regs.a);
            bytes += 1;
        }
        if mask & 0x01 != 0 {
            self.push8(bus, stack, self.regs.cc.0);
            bytes += 1;
        }
        bytes
    }

    /// Pull the registers selected by `mask`. Returns the bytes pulled.
    pub(super) fn pull_registers<B: Bus>(&mut self, bus: &mut B, stack: Stack, mask: u8) -> u32 {
        let mut bytes = 0;
        if mask & 0x01 != 0 {
            self.regs.cc.0 = self.pull8(bus, stack);
            bytes += 1;
        }
        if mask & 0x02 != 0 {
            self.regs.a = self.pull8(bus, stack);
            bytes += 1;
        }
        if mask & 0x04 != 0 {
            self.regs.b = self.pull8(bus, stack);
            bytes += 1;
        }
        if mask & 0x08 != 0 {
            self.regs.dp = self.pull8(bus, stack);
            bytes += 1;
        }
        if mask & 0x10 != 0 {
            self.regs.x = self.pull16(bus, stack);
            bytes += 2;
        }
        if mask & 0x20 != 0 {
            self.regs.y = self.pull16(bus, stack);
            bytes += 2;
        }
        if mask & 0x40 != 0 {
            let value = self.pull16(bus, stack);
            self.set_stack_pointer(Self::other_stack(stack), value);
            bytes += 2;
        }
        if mask & 0x80 != 0 {
            self.regs.pc = self.pull16(bus, stack);
            bytes += 2;
        }
        bytes
    }
}
