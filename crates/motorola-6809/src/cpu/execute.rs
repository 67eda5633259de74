//! Instruction decode and execution.
//!
//! Operands are located before any register is touched, so a reserved
//! indexed postbyte can still fault cleanly.

use emu_core::Bus;

use crate::addressing::IndexedMode;
use crate::alu::{self, AluResult};
use crate::error::CpuFault;
use crate::opcodes::{
    self, Acc, AddressingMode, AluOp8, AluOp16, Opcode, Operation, PAGE1_PREFIX, PAGE2_PREFIX,
    Page, Reg16, Stack, Target, UnaryOp,
};
use crate::registers::IndexRegister;

use super::Mc6809;

/// Compute a read-modify-write result.
fn unary(op: UnaryOp, value: u8, carry: bool) -> AluResult<u8> {
    match op {
        UnaryOp::Neg => alu::neg8(value),
        UnaryOp::Com => alu::com8(value),
        UnaryOp::Lsr => alu::lsr8(value),
        UnaryOp::Ror => alu::ror8(value, carry),
        UnaryOp::Asr => alu::asr8(value),
        UnaryOp::Asl => alu::asl8(value),
        UnaryOp::Rol => alu::rol8(value, carry),
        UnaryOp::Dec => alu::dec8(value),
        UnaryOp::Inc => alu::inc8(value),
        UnaryOp::Tst => alu::logic8(value),
        UnaryOp::Clr => alu::clr8(),
    }
}

impl Mc6809 {
    /// Fetch, decode and execute one instruction starting at `start`.
    ///
    /// Returns the opcode and the total cycles, extras included.
    pub(super) fn execute<B: Bus>(
        &mut self,
        bus: &mut B,
        start: u16,
    ) -> Result<(&'static Opcode, u32), CpuFault> {
        let (page, code) = match self.fetch8(bus) {
            PAGE1_PREFIX => (Page::Page1, self.fetch8(bus)),
            PAGE2_PREFIX => (Page::Page2, self.fetch8(bus)),
            code => (Page::Page0, code),
        };

        let opcode = opcodes::lookup(page, code).ok_or(CpuFault::IllegalOpcode {
            address: start,
            page,
            opcode: code,
        })?;

        let extra = self.dispatch(bus, opcode, start)?;
        Ok((opcode, u32::from(opcode.cycles) + extra))
    }

    fn dispatch<B: Bus>(
        &mut self,
        bus: &mut B,
        opcode: &Opcode,
        start: u16,
    ) -> Result<u32, CpuFault> {
        let extra = match opcode.operation {
            Operation::Unary(op, target) => self.op_unary(bus, opcode, start, op, target)?,
            Operation::Alu8(op, acc) => self.op_alu8(bus, opcode, start, op, acc)?,
            Operation::Store8(acc) => {
                let (address, extra) = self.operand_address(bus, opcode, start)?;
                let value = alu::logic8(self.acc(acc)).apply(&mut self.regs.cc);
                bus.write(address, value);
                extra
            }
            Operation::Alu16(op, reg) => self.op_alu16(bus, opcode, start, op, reg)?,
            Operation::Store16(reg) => {
                let (address, extra) = self.operand_address(bus, opcode, start)?;
                let value = alu::logic16(self.reg16(reg)).apply(&mut self.regs.cc);
                Self::write16(bus, address, value);
                extra
            }
            Operation::Lea(reg) => {
                let (address, extra) = self.operand_address(bus, opcode, start)?;
                self.regs.set_index(reg, address);
                // Only LEAX and LEAY touch the flags
                if matches!(reg, IndexRegister::X | IndexRegister::Y) {
                    self.regs.cc.set_zero(address == 0);
                }
                extra
            }
            Operation::Branch(condition) => self.op_branch(bus, opcode, condition),
            Operation::Bsr => {
                let target = self.branch_target(bus, opcode.mode);
                self.push16(bus, Stack::S, self.regs.pc);
                self.regs.pc = target;
                0
            }
            Operation::Jmp => {
                let (address, extra) = self.operand_address(bus, opcode, start)?;
                self.regs.pc = address;
                extra
            }
            Operation::Jsr => {
                let (address, extra) = self.operand_address(bus, opcode, start)?;
                self.push16(bus, Stack::S, self.regs.pc);
                self.regs.pc = address;
                extra
            }
            Operation::Rts => {
                self.regs.pc = self.pull16(bus, Stack::S);
                0
            }
            Operation::Rti => self.op_rti(bus),
            Operation::Push(stack) => {
                let mask = self.fetch8(bus);
                self.push_registers(bus, stack, mask)
            }
            Operation::Pull(stack) => {
                let mask = self.fetch8(bus);
                self.pull_registers(bus, stack, mask)
            }
            Operation::Tfr => {
                let postbyte = self.fetch8(bus);
                let value = self.regs.transfer_source(postbyte >> 4);
                self.regs.transfer_dest(postbyte & 0x0F, value);
                0
            }
            Operation::Exg => {
                let postbyte = self.fetch8(bus);
                let (r1, r2) = (postbyte >> 4, postbyte & 0x0F);
                let v1 = self.regs.transfer_source(r1);
                let v2 = self.regs.transfer_source(r2);
                self.regs.transfer_dest(r1, v2);
                self.regs.transfer_dest(r2, v1);
                0
            }
            Operation::Orcc => {
                let mask = self.fetch8(bus);
                self.regs.cc.0 |= mask;
                0
            }
            Operation::Andcc => {
                let mask = self.fetch8(bus);
                self.regs.cc.0 &= mask;
                0
            }
            Operation::Cwai => self.op_cwai(bus),
            Operation::Sync => self.op_sync(),
            Operation::Swi(kind) => self.op_swi(bus, kind),
            Operation::Nop => 0,
            Operation::Daa => {
                self.regs.a = alu::daa(self.regs.a, self.regs.cc).apply(&mut self.regs.cc);
                0
            }
            Operation::Sex => {
                let d = alu::sex(self.regs.b).apply(&mut self.regs.cc);
                self.regs.set_d(d);
                0
            }
            Operation::Abx => {
                self.regs.x = self.regs.x.wrapping_add(u16::from(self.regs.b));
                0
            }
            Operation::Mul => {
                let d = alu::mul(self.regs.a, self.regs.b).apply(&mut self.regs.cc);
                self.regs.set_d(d);
                0
            }
        };
        Ok(extra)
    }

    // === Operand location ===

    /// Locate the operand of a memory or immediate instruction.
    ///
    /// Immediate operands are addressed in place and PC skips over them.
    /// Returns the address and any indexed-mode extra cycles.
    fn operand_address<B: Bus>(
        &mut self,
        bus: &mut B,
        opcode: &Opcode,
        start: u16,
    ) -> Result<(u16, u32), CpuFault> {
        match opcode.mode {
            AddressingMode::Immediate => {
                let address = self.regs.pc;
                self.regs.pc = address.wrapping_add(u16::from(opcode.immediate_width()));
                Ok((address, 0))
            }
            AddressingMode::Direct => {
                let dp = self.regs.dp;
                let low = self.fetch8(bus);
                Ok((u16::from_be_bytes([dp, low]), 0))
            }
            AddressingMode::Extended => Ok((self.fetch16(bus), 0)),
            AddressingMode::Indexed => self.indexed_address(bus, start),
            AddressingMode::Inherent | AddressingMode::Relative | AddressingMode::LongRelative => {
                Ok((self.regs.pc, 0))
            }
        }
    }

    fn indexed_address<B: Bus>(&mut self, bus: &mut B, start: u16) -> Result<(u16, u32), CpuFault> {
        let postbyte = self.fetch8(bus);
        let mode = IndexedMode::decode(postbyte).ok_or(CpuFault::IllegalAddressingPostbyte {
            address: start,
            postbyte,
        })?;

        let offset = match mode.extra_bytes() {
            1 => u16::from(self.fetch8(bus)),
            2 => self.fetch16(bus),
            _ => 0,
        };

        let resolution = mode.resolve(&self.regs, offset);
        if let Some((reg, value)) = resolution.writeback {
            self.regs.set_index(reg, value);
        }

        let address = if resolution.indirect {
            Self::read16(bus, resolution.address)
        } else {
            resolution.address
        };
        Ok((address, u32::from(mode.extra_cycles())))
    }

    /// Read a relative displacement and return the branch target.
    fn branch_target<B: Bus>(&mut self, bus: &mut B, mode: AddressingMode) -> u16 {
        if mode == AddressingMode::LongRelative {
            let offset = self.fetch16(bus);
            self.regs.pc.wrapping_add(offset)
        } else {
            let offset = self.fetch8(bus) as i8;
            self.regs.pc.wrapping_add_signed(i16::from(offset))
        }
    }

    // === Register access ===

    const fn acc(&self, acc: Acc) -> u8 {
        match acc {
            Acc::A => self.regs.a,
            Acc::B => self.regs.b,
        }
    }

    fn set_acc(&mut self, acc: Acc, value: u8) {
        match acc {
            Acc::A => self.regs.a = value,
            Acc::B => self.regs.b = value,
        }
    }

    const fn reg16(&self, reg: Reg16) -> u16 {
        match reg {
            Reg16::D => self.regs.d(),
            Reg16::X => self.regs.x,
            Reg16::Y => self.regs.y,
            Reg16::U => self.regs.u,
            Reg16::S => self.regs.s,
        }
    }

    fn set_reg16(&mut self, reg: Reg16, value: u16) {
        match reg {
            Reg16::D => self.regs.set_d(value),
            Reg16::X => self.regs.x = value,
            Reg16::Y => self.regs.y = value,
            Reg16::U => self.regs.u = value,
            Reg16::S => self.regs.s = value,
        }
    }

    // === Handlers ===

    fn op_unary<B: Bus>(
        &mut self,
        bus: &mut B,
        opcode: &Opcode,
        start: u16,
        op: UnaryOp,
        target: Target,
    ) -> Result<u32, CpuFault> {
        let carry = self.regs.cc.carry();
        match target {
            Target::A => {
                self.regs.a = unary(op, self.regs.a, carry).apply(&mut self.regs.cc);
                Ok(0)
            }
            Target::B => {
                self.regs.b = unary(op, self.regs.b, carry).apply(&mut self.regs.cc);
                Ok(0)
            }
            Target::Memory => {
                let (address, extra) = self.operand_address(bus, opcode, start)?;
                let value = bus.read(address);
                let result = unary(op, value, carry).apply(&mut self.regs.cc);
                if op != UnaryOp::Tst {
                    bus.write(address, result);
                }
                Ok(extra)
            }
        }
    }

    fn op_alu8<B: Bus>(
        &mut self,
        bus: &mut B,
        opcode: &Opcode,
        start: u16,
        op: AluOp8,
        acc: Acc,
    ) -> Result<u32, CpuFault> {
        let (address, extra) = self.operand_address(bus, opcode, start)?;
        let operand = bus.read(address);
        let value = self.acc(acc);
        let carry = self.regs.cc.carry();

        let (result, store) = match op {
            AluOp8::Sub => (alu::sub8(value, operand, false), true),
            AluOp8::Cmp => (alu::sub8(value, operand, false), false),
            AluOp8::Sbc => (alu::sub8(value, operand, carry), true),
            AluOp8::And => (alu::logic8(value & operand), true),
            AluOp8::Bit => (alu::logic8(value & operand), false),
            AluOp8::Ld => (alu::logic8(operand), true),
            AluOp8::Eor => (alu::logic8(value ^ operand), true),
            AluOp8::Adc => (alu::add8(value, operand, carry), true),
            AluOp8::Or => (alu::logic8(value | operand), true),
            AluOp8::Add => (alu::add8(value, operand, false), true),
        };

        let result = result.apply(&mut self.regs.cc);
        if store {
            self.set_acc(acc, result);
        }
        Ok(extra)
    }

    fn op_alu16<B: Bus>(
        &mut self,
        bus: &mut B,
        opcode: &Opcode,
        start: u16,
        op: AluOp16,
        reg: Reg16,
    ) -> Result<u32, CpuFault> {
        let (address, extra) = self.operand_address(bus, opcode, start)?;
        let operand = Self::read16(bus, address);
        let value = self.reg16(reg);

        let (result, store) = match op {
            AluOp16::Sub => (alu::sub16(value, operand), true),
            AluOp16::Add => (alu::add16(value, operand), true),
            AluOp16::Cmp => (alu::sub16(value, operand), false),
            AluOp16::Ld => (alu::logic16(operand), true),
        };

        let result = result.apply(&mut self.regs.cc);
        if store {
            self.set_reg16(reg, result);
        }
        Ok(extra)
    }

    fn op_branch<B: Bus>(&mut self, bus: &mut B, opcode: &Opcode, condition: u8) -> u32 {
        let target = self.branch_target(bus, opcode.mode);
        if !self.regs.cc.condition(condition) {
            return 0;
        }
        self.regs.pc = target;
        // Taken long conditional branches cost one more cycle
        u32::from(opcode.page == Page::Page1)
    }
}
