//! BitReader: A module for bzview.
//!
//! Reads a packed bitstream for the block-oriented deconstruction of BZIP2 compressed files.
//!
//! NOTE: The whole compressed file is held in memory. The reader borrows it and only tracks a
//! bit cursor, so asking for bits that are not there is an error instead of a refill.
//!

use crate::error::{DecodeError, Result};

/// Reads a binary Bzip2 buffer, most significant bit first.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    position: u64,
}

impl<'a> BitReader<'a> {
    /// Creates a new BitReader positioned on the first bit of data.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Total number of bits in the underlying buffer.
    pub fn bit_len(&self) -> u64 {
        self.data.len() as u64 * 8
    }

    /// Current bit cursor.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Number of bits not yet consumed.
    pub fn remaining(&self) -> u64 {
        self.bit_len() - self.position
    }

    /// True if fewer than 8 bits remain.
    pub fn at_end(&self) -> bool {
        self.remaining() < 8
    }

    /// Return the next bit (1 or 0).
    pub fn bit(&mut self) -> Result<u32> {
        self.ensure(1)?;
        let byte = self.data[(self.position >> 3) as usize];
        let bit = (byte >> (7 - (self.position & 7))) & 1;
        self.position += 1;
        Ok(bit as u32)
    }

    /// Return *true* if the next bit is 1, *false* if 0, consuming the bit.
    pub fn bool_bit(&mut self) -> Result<bool> {
        self.bit().map(|bit| bit == 1)
    }

    /// Return the next n bits (0..=32) as an unsigned integer.
    pub fn bint(&mut self, n: u32) -> Result<u32> {
        /*
        Signatures and crc values are stored as big-endian fields, so bint(32) hands back
        a crc directly.

        Read as many bits as possible from each byte: first whatever is left of a partially
        consumed byte, then whole bytes, then the leading bits of the last byte.
        */
        if n > 32 {
            return Err(DecodeError::corrupt(format!(
                "bint can return at most 32 bits, asked for {}",
                n
            )));
        }
        self.ensure(u64::from(n))?;

        let mut result = 0_u64;
        let mut needed = n;
        while needed > 0 {
            let byte = self.data[(self.position >> 3) as usize];
            let used = (self.position & 7) as u32;
            let available = 8 - used;
            let take = needed.min(available);
            let bits = (u32::from(byte) >> (available - take)) & ((1 << take) - 1);
            result = result << take | u64::from(bits);
            self.position += take as u64;
            needed -= take;
        }
        Ok(result as u32)
    }

    /// Returns a byte. This is a convenience function, and calls bint(8).
    pub fn byte(&mut self) -> Result<u8> {
        self.bint(8).map(|byte| byte as u8)
    }

    /// Returns n bytes. This is a convenience function, and calls byte n times.
    pub fn bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        self.ensure((n as u64).saturating_mul(8))?;
        (0..n).map(|_| self.byte()).collect()
    }

    /// Skip the padding bits up to the next byte boundary.
    pub fn align_to_byte(&mut self) {
        self.position = (self.position + 7) & !7;
        self.position = self.position.min(self.bit_len());
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.position >> 3, self.position & 7)
    }

    /// Fail with TruncatedStream unless n more bits are available.
    fn ensure(&self, n: u64) -> Result<()> {
        if self.remaining() < n {
            return Err(DecodeError::TruncatedStream {
                position: self.position,
                needed: n,
                available: self.remaining(),
            });
        }
        Ok(())
    }
}
