//! Device-mapped memory bus.
//!
//! A machine's 64 KB address space is carved into inclusive ranges, each
//! owned by one [`Device`]. Devices see offsets relative to their own base,
//! so a cartridge ROM mapped at $0000 and a RAM chip mapped at $C800 are
//! both addressed from zero.

use thiserror::Error;

use crate::Bus;

/// A memory-mapped device.
pub trait Device {
    /// Read the byte at `offset` from the start of the device's range.
    fn read(&mut self, offset: u16) -> u8;

    /// Write the byte at `offset` from the start of the device's range.
    fn write(&mut self, offset: u16, value: u8);
}

/// Errors raised while building a [`MemoryMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MapError {
    /// `end` is below `start`.
    #[error("invalid range ${start:04X}-${end:04X}")]
    InvalidRange { start: u16, end: u16 },
    /// The range overlaps a device that is already mapped.
    #[error("range ${start:04X}-${end:04X} overlaps ${other_start:04X}-${other_end:04X}")]
    Overlap {
        start: u16,
        end: u16,
        other_start: u16,
        other_end: u16,
    },
}

struct Mapping {
    start: u16,
    end: u16,
    device: Box<dyn Device>,
}

/// A bus that routes each access to the device owning the address.
///
/// Unmapped reads return a fixed value (open bus); unmapped writes are
/// dropped.
pub struct MemoryMap {
    mappings: Vec<Mapping>,
    unmapped_value: u8,
}

impl MemoryMap {
    /// Create an empty map whose unmapped reads return `unmapped_value`.
    #[must_use]
    pub fn new(unmapped_value: u8) -> Self {
        Self {
            mappings: Vec::new(),
            unmapped_value,
        }
    }

    /// Map `device` over the inclusive range `start..=end`.
    pub fn map(
        &mut self,
        start: u16,
        end: u16,
        device: impl Device + 'static,
    ) -> Result<(), MapError> {
        if end < start {
            return Err(MapError::InvalidRange { start, end });
        }
        if let Some(other) = self
            .mappings
            .iter()
            .find(|m| start <= m.end && m.start <= end)
        {
            return Err(MapError::Overlap {
                start,
                end,
                other_start: other.start,
                other_end: other.end,
            });
        }

        self.mappings.push(Mapping {
            start,
            end,
            device: Box::new(device),
        });
        self.mappings.sort_by_key(|m| m.start);
        Ok(())
    }

    /// Number of mapped devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    /// True if nothing is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    fn find(&mut self, address: u16) -> Option<&mut Mapping> {
        // Sorted and non-overlapping: the owner is the last range starting
        // at or below the address.
        let idx = self.mappings.partition_point(|m| m.start <= address);
        let mapping = self.mappings.get_mut(idx.checked_sub(1)?)?;
        (address <= mapping.end).then_some(mapping)
    }
}

impl Bus for MemoryMap {
    fn read(&mut self, address: u16) -> u8 {
        match self.find(address) {
            Some(m) => {
                let offset = address - m.start;
                m.device.read(offset)
            }
            None => {
                log::trace!("read from unmapped ${address:04X}");
                self.unmapped_value
            }
        }
    }

    fn write(&mut self, address: u16, value: u8) {
        match self.find(address) {
            Some(m) => {
                let offset = address - m.start;
                m.device.write(offset, value);
            }
            None => log::trace!("write ${value:02X} to unmapped ${address:04X} dropped"),
        }
    }
}

/// Read/write memory. Offsets past the end wrap around the chip.
pub struct Ram {
    data: Vec<u8>,
}

impl Ram {
    /// Create `size` bytes of zeroed RAM.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size.max(1)],
        }
    }
}

impl Device for Ram {
    fn read(&mut self, offset: u16) -> u8 {
        self.data[offset as usize % self.data.len()]
    }

    fn write(&mut self, offset: u16, value: u8) {
        let len = self.data.len();
        self.data[offset as usize % len] = value;
    }
}

/// Read-only memory. Writes are ignored; reads past the image wrap.
pub struct Rom {
    data: Vec<u8>,
}

impl Rom {
    /// Wrap a ROM image. An empty image reads as $FF.
    #[must_use]
    pub fn new(image: Vec<u8>) -> Self {
        Self { data: image }
    }
}

impl Device for Rom {
    fn read(&mut self, offset: u16) -> u8 {
        if self.data.is_empty() {
            return 0xFF;
        }
        self.data[offset as usize % self.data.len()]
    }

    fn write(&mut self, offset: u16, value: u8) {
        log::trace!("write ${value:02X} to ROM offset ${offset:04X} ignored");
    }
}
