use crate::cpu::Bus8080;
use crate::MEMORY_SIZE;

/// Flat 64 KiB address space shared by data and instruction fetch.
///
/// Every 16-bit address is valid; multi-byte accesses wrap past 0xffff.
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Default for Memory {
    fn default() -> Self {
        Self {
            bytes: [0; MEMORY_SIZE],
        }
    }
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn read(&self, addr: u16) -> u8 {
        self.bytes[addr as usize]
    }

    #[inline]
    pub fn write(&mut self, addr: u16, value: u8) {
        self.bytes[addr as usize] = value;
    }

    /// Zero-fill the whole address space.
    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }

    /// Copy `data` byte-for-byte starting at `start`, wrapping to 0x0000 when
    /// the end of the address space is reached.
    pub fn load_at(&mut self, start: u16, data: &[u8]) {
        let mut addr = start;
        for &byte in data {
            self.write(addr, byte);
            addr = addr.wrapping_add(1);
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl Bus8080 for Memory {
    fn mem_read(&mut self, addr: u16) -> u8 {
        self.read(addr)
    }

    fn mem_write(&mut self, addr: u16, value: u8) {
        self.write(addr, value);
    }
}
