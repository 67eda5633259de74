//! Interrupt entry and exit.
//!
//! NMI and IRQ stack the entire register set (E set, 12 bytes). FIRQ
//! stacks only PC and CC (E clear, 3 bytes). RTI looks at the stacked E
//! flag to decide how much to pull back. Priority is NMI, then FIRQ,
//! then IRQ.
//!
//! After CWAI the entire frame is already on the stack, so the interrupt
//! that ends the wait only sets its masks and jumps through its vector.

use emu_core::Bus;

use crate::flags::{ConditionCodes, E, F, I};
use crate::opcodes::{SoftwareInterrupt, Stack};

use super::{ExecState, Lines, Mc6809};

/// SWI3 vector.
pub const VECTOR_SWI3: u16 = 0xFFF2;
/// SWI2 vector.
pub const VECTOR_SWI2: u16 = 0xFFF4;
/// FIRQ vector.
pub const VECTOR_FIRQ: u16 = 0xFFF6;
/// IRQ vector.
pub const VECTOR_IRQ: u16 = 0xFFF8;
/// SWI vector.
pub const VECTOR_SWI: u16 = 0xFFFA;
/// NMI vector.
pub const VECTOR_NMI: u16 = 0xFFFC;
/// Reset vector.
pub const VECTOR_RESET: u16 = 0xFFFE;

/// Full-frame stacking mask (every register).
const ENTIRE_FRAME: u8 = 0xFF;
/// FIRQ stacking mask (PC and CC).
const FAST_FRAME: u8 = 0x81;

/// Hardware interrupt sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Interrupt {
    Nmi,
    Firq,
    Irq,
}

impl Mc6809 {
    /// The highest-priority interrupt that is asserted and unmasked.
    pub(super) const fn pending_interrupt(&self) -> Option<Interrupt> {
        if self.lines.nmi {
            Some(Interrupt::Nmi)
        } else if self.lines.firq && !self.regs.cc.firq_mask() {
            Some(Interrupt::Firq)
        } else if self.lines.irq && !self.regs.cc.irq_mask() {
            Some(Interrupt::Irq)
        } else {
            None
        }
    }

    /// Enter an interrupt handler. Returns the cycles consumed.
    pub(super) fn service_interrupt<B: Bus>(&mut self, bus: &mut B, kind: Interrupt) -> u32 {
        let stacked = self.state == ExecState::Wait;
        self.state = ExecState::Running;

        let (vector, masks, cycles) = match kind {
            Interrupt::Nmi => {
                self.lines.nmi = false;
                if !stacked {
                    self.regs.cc.set(E);
                    self.push_registers(bus, Stack::S, ENTIRE_FRAME);
                }
                (VECTOR_NMI, I | F, 19)
            }
            Interrupt::Firq => {
                self.lines.firq = false;
                if !stacked {
                    self.regs.cc.clear(E);
                    self.push_registers(bus, Stack::S, FAST_FRAME);
                }
                (VECTOR_FIRQ, I | F, 10)
            }
            Interrupt::Irq => {
                self.lines.irq = false;
                if !stacked {
                    self.regs.cc.set(E);
                    self.push_registers(bus, Stack::S, ENTIRE_FRAME);
                }
                (VECTOR_IRQ, I, 19)
            }
        };

        self.regs.cc.set(masks);
        self.regs.pc = Self::read16(bus, vector);
        log::debug!(
            "{kind:?} -> ${:04X} (S=${:04X})",
            self.regs.pc,
            self.regs.s
        );

        // The CWAI that stacked the frame already paid for it
        if stacked { 0 } else { cycles }
    }

    /// SWI, SWI2, SWI3: stack everything and jump through the vector.
    pub(super) fn op_swi<B: Bus>(&mut self, bus: &mut B, kind: SoftwareInterrupt) -> u32 {
        self.regs.cc.set(E);
        self.push_registers(bus, Stack::S, ENTIRE_FRAME);
        let vector = match kind {
            SoftwareInterrupt::Swi => {
                self.regs.cc.set(I | F);
                VECTOR_SWI
            }
            SoftwareInterrupt::Swi2 => VECTOR_SWI2,
            SoftwareInterrupt::Swi3 => VECTOR_SWI3,
        };
        self.regs.pc = Self::read16(bus, vector);
        log::debug!("{kind:?} -> ${:04X}", self.regs.pc);
        0
    }

    /// RTI: pull CC, then the rest of the frame if E says it was stacked.
    pub(super) fn op_rti<B: Bus>(&mut self, bus: &mut B) -> u32 {
        self.regs.cc.0 = self.pull8(bus, Stack::S);
        if self.regs.cc.entire() {
            // A, B, DP, X, Y, U, PC
            self.pull_registers(bus, Stack::S, ENTIRE_FRAME & !0x01);
            log::debug!("RTI (entire) -> ${:04X}", self.regs.pc);
            9
        } else {
            self.regs.pc = self.pull16(bus, Stack::S);
            log::debug!("RTI (fast) -> ${:04X}", self.regs.pc);
            0
        }
    }

    /// CWAI: clear masks, stack everything, then wait for an interrupt.
    pub(super) fn op_cwai<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let mask = self.fetch8(bus);
        self.regs.cc.0 &= mask;
        self.regs.cc.set(E);
        self.push_registers(bus, Stack::S, ENTIRE_FRAME);
        self.state = ExecState::Wait;
        log::debug!("CWAI: waiting with S=${:04X}", self.regs.s);
        0
    }

    /// SYNC: stop until any interrupt line is asserted.
    pub(super) fn op_sync(&mut self) -> u32 {
        self.state = ExecState::Sync;
        log::debug!("SYNC: waiting for an interrupt line");
        0
    }

    /// Hardware reset: DP cleared, FIRQ and IRQ masked, PC from the vector.
    pub(super) fn reset_sequence<B: Bus>(&mut self, bus: &mut B) {
        self.state = ExecState::Running;
        self.lines = Lines::default();
        self.regs.dp = 0;
        self.regs.cc = ConditionCodes(I | F);
        self.regs.pc = Self::read16(bus, VECTOR_RESET);
        log::debug!("reset -> ${:04X}", self.regs.pc);
    }
}
