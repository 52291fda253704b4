//! CRC-32 (ISO 3309) checksum.
//!
//! Framed streams store the CRC-32 of the original data so a decoder can tell
//! a desynchronized tree from a clean decode. Same polynomial as ZIP, GZIP
//! and PNG.

use std::io::{self, Write};

/// Reflected form of polynomial 0x04C11DB7.
const POLYNOMIAL: u32 = 0xEDB8_8320;

const fn make_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut n = 0;
    while n < 256 {
        let mut value = n as u32;
        let mut bit = 0;
        while bit < 8 {
            value = if value & 1 == 1 {
                (value >> 1) ^ POLYNOMIAL
            } else {
                value >> 1
            };
            bit += 1;
        }
        table[n] = value;
        n += 1;
    }
    table
}

static TABLE: [u32; 256] = make_table();

/// Running CRC-32.
///
/// # Example
///
/// ```
/// use oxihuff_core::crc::Crc32;
///
/// let mut crc = Crc32::new();
/// crc.update(b"Hello, ");
/// crc.update(b"World!");
/// assert_eq!(crc.finalize(), 0xEC4AC3D0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Crc32 {
    state: u32,
}

impl Crc32 {
    /// Start a new checksum.
    pub fn new() -> Self {
        Self { state: !0 }
    }

    /// Restart from the initial state.
    pub fn reset(&mut self) {
        self.state = !0;
    }

    /// Feed more data.
    #[inline]
    pub fn update(&mut self, data: &[u8]) {
        self.state = data.iter().fold(self.state, |state, &byte| {
            TABLE[((state ^ u32::from(byte)) & 0xFF) as usize] ^ (state >> 8)
        });
    }

    /// Checksum of everything fed so far.
    #[inline]
    pub fn value(&self) -> u32 {
        !self.state
    }

    /// Consume the calculator and return the checksum.
    #[inline]
    pub fn finalize(self) -> u32 {
        self.value()
    }

    /// Checksum of `data` in one call.
    pub fn compute(data: &[u8]) -> u32 {
        let mut crc = Self::new();
        crc.update(data);
        crc.finalize()
    }
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}

/// A writer that checksums everything passing through it.
#[derive(Debug)]
pub struct CrcWriter<W: Write> {
    inner: W,
    crc: Crc32,
    written: u64,
}

impl<W: Write> CrcWriter<W> {
    /// Wrap `inner`.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            crc: Crc32::new(),
            written: 0,
        }
    }

    /// CRC-32 of the bytes written so far.
    pub fn crc(&self) -> u32 {
        self.crc.value()
    }

    /// Number of bytes written so far.
    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    /// Unwrap the inner writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for CrcWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.crc.update(&buf[..n]);
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc32_known_values() {
        assert_eq!(Crc32::compute(b""), 0);
        assert_eq!(Crc32::compute(b"123456789"), 0xCBF4_3926);
        assert_eq!(Crc32::compute(b"Hello, World!"), 0xEC4A_C3D0);
    }

    #[test]
    fn test_table_entries() {
        assert_eq!(TABLE[0], 0);
        assert_eq!(TABLE[1], 0x7707_3096);
        assert_eq!(TABLE[255], 0x2D02_EF8D);
    }

    #[test]
    fn test_incremental_matches_oneshot() {
        let data = b"The quick brown fox jumps over the lazy dog";
        let mut crc = Crc32::new();
        for chunk in data.chunks(5) {
            crc.update(chunk);
        }
        assert_eq!(crc.value(), Crc32::compute(data));

        crc.reset();
        crc.update(b"123456789");
        assert_eq!(crc.finalize(), 0xCBF4_3926);
    }

    #[test]
    fn test_crc_writer_passes_through() {
        let mut writer = CrcWriter::new(Vec::new());
        writer.write_all(b"1234").unwrap();
        writer.write_all(b"56789").unwrap();
        writer.flush().unwrap();

        assert_eq!(writer.crc(), 0xCBF4_3926);
        assert_eq!(writer.bytes_written(), 9);
        assert_eq!(writer.into_inner(), b"123456789");
    }
}
