//! Memory and I/O bus interface.

/// Memory and I/O bus interface.
///
/// CPUs reach memory and memory-mapped peripherals only through this trait.
/// The bus owns address decoding; the CPU never learns which device
/// answered. Reads are not side-effect free: an I/O register may change
/// state when read.
pub trait Bus {
    /// Read a byte from the given address.
    fn read(&mut self, address: u16) -> u8;

    /// Write a byte to the given address.
    fn write(&mut self, address: u16, value: u8);
}

/// Flat 64 KB of RAM with no devices.
///
/// Used by unit tests and simple harnesses. Every address is readable and
/// writable.
pub struct SimpleBus {
    ram: Box<[u8; 0x1_0000]>,
}

impl Default for SimpleBus {
    fn default() -> Self {
        Self::new()
    }
}

impl SimpleBus {
    /// Create a bus with all memory cleared.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ram: Box::new([0; 0x1_0000]),
        }
    }

    /// Copy `data` into memory starting at `base`, wrapping at $FFFF.
    pub fn load(&mut self, base: u16, data: &[u8]) {
        let mut addr = base;
        for &byte in data {
            self.ram[addr as usize] = byte;
            addr = addr.wrapping_add(1);
        }
    }

    /// Read memory without going through the [`Bus`] trait.
    #[must_use]
    pub fn peek(&self, address: u16) -> u8 {
        self.ram[address as usize]
    }

    /// Read a big-endian word without going through the [`Bus`] trait.
    #[must_use]
    pub fn peek16(&self, address: u16) -> u16 {
        u16::from_be_bytes([self.peek(address), self.peek(address.wrapping_add(1))])
    }

    /// Write memory without going through the [`Bus`] trait.
    pub fn poke(&mut self, address: u16, value: u8) {
        self.ram[address as usize] = value;
    }
}

impl Bus for SimpleBus {
    fn read(&mut self, address: u16) -> u8 {
        self.ram[address as usize]
    }

    fn write(&mut self, address: u16, value: u8) {
        self.ram[address as usize] = value;
    }
}
