//! Bit-serial CRC-32 (polynomial `0x04C11DB7`, MSB first, seed 0, no final XOR).

const POLYNOMIAL: u32 = 0x04C1_1DB7;

pub fn crc32(bytes: &[u8]) -> u32 {
    Crc32::new().update(bytes).finish()
}

#[derive(Clone, Copy, Default, Debug)]
pub struct Crc32 {
    crc: u32,
}

impl Crc32 {
    pub fn new() -> Self {
        Self { crc: 0 }
    }

    pub fn update(mut self, bytes: &[u8]) -> Self {
        for &byte in bytes {
            self.crc = crc32_byte(self.crc, byte);
        }
        self
    }

    /// Folds `len` zero bytes, as if the caller had passed a zeroed slice.
    pub fn update_zeroed(mut self, len: usize) -> Self {
        for _ in 0..len {
            self.crc = crc32_byte(self.crc, 0);
        }
        self
    }

    pub fn finish(self) -> u32 {
        self.crc
    }
}

fn crc32_byte(mut crc: u32, byte: u8) -> u32 {
    crc ^= (byte as u32) << 24;
    for _ in 0..8 {
        if (crc & 0x8000_0000) != 0 {
            crc = (crc << 1) ^ POLYNOMIAL;
        } else {
            crc <<= 1;
        }
    }
    crc
}
