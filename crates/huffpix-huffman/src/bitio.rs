//! MSB-first bit I/O.
//!
//! The writer fills each byte from the high bit down and zero-pads the final
//! partial byte. There is no byte-stuffing and no trailer.

use huffpix_core::{Error, Result};

use crate::table::HuffmanCode;

/// Bit writer with doubling output growth.
#[derive(Debug)]
pub struct BitWriter {
    data: Vec<u8>,
    /// Pending bits, right-aligned.
    current: u8,
    /// Bits held in `current` (0-7 between calls).
    filled: u8,
    bits_written: u64,
}

impl BitWriter {
    /// Create a writer whose output starts with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)
            .map_err(|_| Error::allocation_failed(capacity))?;
        Ok(Self {
            data,
            current: 0,
            filled: 0,
            bits_written: 0,
        })
    }

    /// Append one bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.current = (self.current << 1) | bit as u8;
        self.filled += 1;
        self.bits_written += 1;

        if self.filled == 8 {
            self.commit(self.current)?;
            self.current = 0;
            self.filled = 0;
        }
        Ok(())
    }

    /// Append every bit of a code, first bit first.
    #[inline]
    pub fn write_code(&mut self, code: &HuffmanCode) -> Result<()> {
        for bit in code.bits() {
            self.write_bit(bit)?;
        }
        Ok(())
    }

    /// Flush the partial byte (zero-padded in the low bits) and return the
    /// output with the exact number of code bits written.
    pub fn finish(mut self) -> Result<(Vec<u8>, u64)> {
        if self.filled > 0 {
            let byte = self.current << (8 - self.filled);
            self.commit(byte)?;
        }
        Ok((self.data, self.bits_written))
    }

    /// Bits written so far, excluding padding.
    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Output length if finished now.
    pub fn len(&self) -> usize {
        self.data.len() + if self.filled > 0 { 1 } else { 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty() && self.filled == 0
    }

    #[cfg(test)]
    fn capacity(&self) -> usize {
        self.data.capacity()
    }

    fn commit(&mut self, byte: u8) -> Result<()> {
        if self.data.len() == self.data.capacity() {
            let additional = self.data.capacity().max(1);
            self.data.try_reserve_exact(additional).map_err(|_| {
                Error::allocation_failed(self.data.capacity().saturating_add(additional))
            })?;
        }
        self.data.push(byte);
        Ok(())
    }
}

/// Bit reader over a byte slice, MSB-first.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    pos: usize,
    /// Next bit to read within `data[pos]`, 0 = most significant.
    bit: u8,
}

impl<'a> BitReader<'a> {
    /// Create a new bit reader.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            bit: 0,
        }
    }

    /// Read one bit, or `None` once the input is exhausted.
    #[inline]
    pub fn read_bit(&mut self) -> Option<bool> {
        let byte = *self.data.get(self.pos)?;
        let value = (byte >> (7 - self.bit)) & 1 == 1;
        self.bit += 1;
        if self.bit == 8 {
            self.bit = 0;
            self.pos += 1;
        }
        Some(value)
    }

    /// Bytes from which at least one bit has been read.
    pub fn bytes_consumed(&self) -> usize {
        self.pos + if self.bit > 0 { 1 } else { 0 }
    }

    #[cfg(test)]
    fn bits_remaining(&self) -> usize {
        (self.data.len() - self.pos) * 8 - self.bit as usize
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }
}
