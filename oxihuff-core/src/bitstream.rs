//! Bit-level I/O for adaptive Huffman streams.
//!
//! This module provides `BitReader` and `BitWriter` for reading and writing
//! data one bit at a time on top of any byte-oriented `Read`/`Write`.
//!
//! # Bit Ordering
//!
//! Bits are packed MSB-first (Most Significant Bit first): the first bit
//! written lands in bit 7 of the first byte. The final partial byte is padded
//! with zero bits in its low positions.
//!
//! # Example
//!
//! ```
//! use oxihuff_core::bitstream::{BitReader, BitWriter};
//! use std::io::Cursor;
//!
//! // Writing bits
//! let mut writer = BitWriter::new(Vec::new());
//! writer.write_bit(true).unwrap();
//! writer.write_bit(false).unwrap();
//! writer.write_byte(0xFF).unwrap();
//! let output = writer.into_inner().unwrap();
//! assert_eq!(output, vec![0xBF, 0xC0]);
//!
//! // Reading bits
//! let mut reader = BitReader::new(Cursor::new(output));
//! assert_eq!(reader.read_bit().unwrap(), Some(true));
//! assert_eq!(reader.read_bit().unwrap(), Some(false));
//! assert_eq!(reader.read_byte().unwrap(), Some(0xFF));
//! ```

use crate::bits::BitSequence;
use crate::error::{OxiHuffError, Result};
use std::io::{ErrorKind, Read, Write};

/// A bit-level reader that wraps any `Read` implementation.
///
/// Bytes are pulled from the underlying reader one at a time, only when the
/// buffered bits run out.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    /// Underlying reader.
    reader: R,
    /// Current byte; valid bits sit at the top.
    buffer: u8,
    /// Number of valid bits left in `buffer`.
    bits_in_buffer: u8,
    /// Total bits read (for error reporting).
    total_bits_read: u64,
}

impl<R: Read> BitReader<R> {
    /// Create a new `BitReader` wrapping the given reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_read: 0,
        }
    }

    /// Get a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Consume this `BitReader` and return the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Get the total number of bits read so far.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }

    /// Number of bits still buffered from the current byte.
    pub fn buffered_bits(&self) -> u8 {
        self.bits_in_buffer
    }

    /// Pull the next byte from the underlying reader.
    ///
    /// Returns `false` when the reader is exhausted.
    fn refill(&mut self) -> Result<bool> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(false),
                Ok(_) => {
                    self.buffer = byte[0];
                    self.bits_in_buffer = 8;
                    return Ok(true);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Read a single bit.
    ///
    /// Returns `Ok(None)` once no buffered bits remain and the underlying
    /// reader has no further byte.
    #[inline]
    pub fn read_bit(&mut self) -> Result<Option<bool>> {
        if self.bits_in_buffer == 0 && !self.refill()? {
            return Ok(None);
        }

        let bit = self.buffer & 0x80 != 0;
        self.buffer <<= 1;
        self.bits_in_buffer -= 1;
        self.total_bits_read += 1;

        Ok(Some(bit))
    }

    /// Read eight bits as a byte, MSB first.
    ///
    /// Returns `Ok(None)` if the stream is cleanly exhausted before the first
    /// bit, and an error if it ends part-way through the byte.
    pub fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut value = match self.read_bit()? {
            Some(bit) => bit as u8,
            None => return Ok(None),
        };

        for _ in 1..8 {
            let bit = self
                .read_bit()?
                .ok_or_else(|| OxiHuffError::unexpected_eof(self.total_bits_read))?;
            value = (value << 1) | bit as u8;
        }

        Ok(Some(value))
    }

    /// Whether every still-buffered bit of the current byte is zero.
    pub fn buffered_bits_are_zero(&self) -> bool {
        // Consumed bits are shifted out and replaced by zeros.
        self.buffer == 0
    }

    /// Align to the next byte boundary by discarding buffered bits.
    pub fn align_to_byte(&mut self) {
        self.total_bits_read += self.bits_in_buffer as u64;
        self.buffer = 0;
        self.bits_in_buffer = 0;
    }

    /// Check if the reader is at end of stream.
    ///
    /// A byte fetched by this probe stays buffered for the next read.
    pub fn is_eof(&mut self) -> Result<bool> {
        if self.bits_in_buffer > 0 {
            return Ok(false);
        }
        Ok(!self.refill()?)
    }
}

/// A bit-level writer that wraps any `Write` implementation.
///
/// `BitWriter` accumulates bits in a one-byte buffer and emits every
/// completed byte. Call `flush()` (or `into_inner()`) when done to write the
/// remaining partial byte.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    /// Underlying writer.
    writer: W,
    /// Bit buffer, filled from the LSB side and shifted up.
    buffer: u8,
    /// Number of bits in buffer.
    bits_in_buffer: u8,
    /// Total bits written.
    total_bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new `BitWriter` wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_written: 0,
        }
    }

    /// Get a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Get a mutable reference to the underlying writer.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Get the total number of bits written so far, excluding padding.
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Number of bits waiting for the current byte to complete.
    pub fn pending_bits(&self) -> u8 {
        self.bits_in_buffer
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.buffer = (self.buffer << 1) | bit as u8;
        self.bits_in_buffer += 1;
        self.total_bits_written += 1;

        if self.bits_in_buffer == 8 {
            self.writer.write_all(&[self.buffer])?;
            self.buffer = 0;
            self.bits_in_buffer = 0;
        }

        Ok(())
    }

    /// Write every bit of a sequence, head first.
    pub fn write_bits(&mut self, bits: &BitSequence) -> Result<()> {
        for bit in bits {
            self.write_bit(bit)?;
        }
        Ok(())
    }

    /// Write a byte as eight bits, MSB first.
    pub fn write_byte(&mut self, byte: u8) -> Result<()> {
        if self.bits_in_buffer == 0 {
            self.writer.write_all(&[byte])?;
            self.total_bits_written += 8;
            return Ok(());
        }

        for shift in (0..8).rev() {
            self.write_bit((byte >> shift) & 1 == 1)?;
        }
        Ok(())
    }

    /// Flush any remaining bits to the underlying writer.
    ///
    /// A partial byte is shifted up so its valid bits sit at the top and the
    /// low bits are zero. Calling `flush` with nothing pending only flushes
    /// the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        if self.bits_in_buffer > 0 {
            let byte = self.buffer << (8 - self.bits_in_buffer);
            self.writer.write_all(&[byte])?;
            self.buffer = 0;
            self.bits_in_buffer = 0;
        }

        self.writer.flush()?;

        Ok(())
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.writer)
    }
}
