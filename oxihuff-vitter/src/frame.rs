//! Self-describing frame around a raw adaptive Huffman stream.
//!
//! ```text
//! offset  size  field
//! 0       4     magic "VHUF"
//! 4       1     version (1)
//! 5       1     flags (0)
//! 6       8     original length, u64 LE
//! 14      4     CRC-32 of the original data, LE
//! 18      ...   raw stream
//! ```

use crate::config::VitterConfig;
use crate::decoder::VitterDecoder;
use crate::encoder::VitterEncoder;
use crate::error::{Result, VitterError};
use crate::state::CodingStats;
use log::debug;
use oxihuff_core::{Crc32, CrcWriter};
use std::io::{ErrorKind, Read, Write};

/// Frame magic bytes.
pub const MAGIC: [u8; 4] = *b"VHUF";

/// Frame format version written by this crate.
pub const VERSION: u8 = 1;

/// Size of the fixed frame header.
pub const HEADER_SIZE: usize = 18;

/// Parsed frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Number of bytes (symbols) in the original data.
    pub original_len: u64,
    /// CRC-32 of the original data.
    pub crc32: u32,
}

impl FrameHeader {
    /// Header describing `data`.
    pub fn for_data(data: &[u8]) -> Self {
        Self {
            original_len: data.len() as u64,
            crc32: Crc32::compute(data),
        }
    }

    /// Serialize the header.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&MAGIC);
        bytes[4] = VERSION;
        bytes[5] = 0;
        bytes[6..14].copy_from_slice(&self.original_len.to_le_bytes());
        bytes[14..18].copy_from_slice(&self.crc32.to_le_bytes());
        bytes
    }

    /// Parse a header from the start of `data`.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() >= MAGIC.len() && data[..4] != MAGIC {
            return Err(VitterError::InvalidMagic {
                expected: MAGIC,
                found: data[..4].to_vec(),
            });
        }
        if data.len() < HEADER_SIZE {
            return Err(VitterError::HeaderTruncated {
                needed: HEADER_SIZE,
                available: data.len(),
            });
        }

        let (version, flags) = (data[4], data[5]);
        if version != VERSION || flags != 0 {
            return Err(VitterError::UnsupportedVersion { version, flags });
        }

        let mut len_bytes = [0u8; 8];
        len_bytes.copy_from_slice(&data[6..14]);
        let mut crc_bytes = [0u8; 4];
        crc_bytes.copy_from_slice(&data[14..18]);

        Ok(Self {
            original_len: u64::from_le_bytes(len_bytes),
            crc32: u32::from_le_bytes(crc_bytes),
        })
    }

    /// Write the header to `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.to_bytes())?;
        Ok(())
    }

    /// Read and parse a header from `reader`.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut bytes = [0u8; HEADER_SIZE];
        let mut filled = 0;
        while filled < HEADER_SIZE {
            match reader.read(&mut bytes[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Self::parse(&bytes[..filled])
    }

    /// Original length as a `usize`.
    pub fn original_len_usize(&self) -> Result<usize> {
        usize::try_from(self.original_len).map_err(|_| VitterError::LengthOverflow {
            length: self.original_len,
        })
    }
}

/// Encode `data` into a frame with the default configuration.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    compress_with(data, VitterConfig::DEFAULT)
}

/// Encode `data` into a frame.
pub fn compress_with(data: &[u8], config: VitterConfig) -> Result<Vec<u8>> {
    let header = FrameHeader::for_data(data);
    let payload = VitterEncoder::new(config).encode(data)?;

    let mut output = Vec::with_capacity(HEADER_SIZE + payload.len());
    header.write_to(&mut output)?;
    output.extend_from_slice(&payload);

    debug!(
        "frame: {} bytes -> {} bytes (crc {:#010x})",
        data.len(),
        output.len(),
        header.crc32
    );
    Ok(output)
}

/// Decode a frame with the default configuration.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    decompress_with(data, VitterConfig::DEFAULT)
}

/// Decode a frame, verifying its length and checksum.
pub fn decompress_with(data: &[u8], config: VitterConfig) -> Result<Vec<u8>> {
    let header = FrameHeader::parse(data)?;
    let len = header.original_len_usize()?;

    let output = VitterDecoder::new(config).decode(&data[HEADER_SIZE..], len)?;

    let computed = Crc32::compute(&output);
    if computed != header.crc32 {
        return Err(VitterError::CrcMismatch {
            expected: header.crc32,
            computed,
        });
    }
    Ok(output)
}

/// Decode a frame from `reader` into `writer` without buffering the output.
///
/// The checksum is verified once the last symbol is written, so on
/// [`VitterError::CrcMismatch`] the bad data has already reached `writer`.
pub fn decompress_stream<R: Read, W: Write>(
    mut reader: R,
    writer: W,
    config: VitterConfig,
) -> Result<CodingStats> {
    let header = FrameHeader::read_from(&mut reader)?;

    let mut writer = CrcWriter::new(writer);
    let stats = VitterDecoder::new(config).decode_stream(reader, &mut writer, header.original_len)?;

    let computed = writer.crc();
    if computed != header.crc32 {
        return Err(VitterError::CrcMismatch {
            expected: header.crc32,
            computed,
        });
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout() {
        let header = FrameHeader::for_data(b"123456789");
        let bytes = header.to_bytes();
        assert_eq!(&bytes[0..4], b"VHUF");
        assert_eq!(bytes[4], 1);
        assert_eq!(bytes[5], 0);
        assert_eq!(&bytes[6..14], &9u64.to_le_bytes());
        assert_eq!(&bytes[14..18], &0xCBF4_3926u32.to_le_bytes());
        assert_eq!(FrameHeader::parse(&bytes).unwrap(), header);
    }

    #[test]
    fn test_empty_frame() {
        let framed = compress(b"").unwrap();
        assert_eq!(framed.len(), HEADER_SIZE);
        assert!(decompress(&framed).unwrap().is_empty());
    }

    #[test]
    fn test_frame_roundtrip() {
        let data = b"She sells sea shells by the sea shore";
        let framed = compress(data).unwrap();
        assert_eq!(decompress(&framed).unwrap(), data);
    }

    #[test]
    fn test_bad_magic() {
        let mut framed = compress(b"abc").unwrap();
        framed[0] = b'X';
        assert!(matches!(
            decompress(&framed),
            Err(VitterError::InvalidMagic { .. })
        ));
    }

    #[test]
    fn test_truncated_header() {
        let framed = compress(b"abc").unwrap();
        let err = FrameHeader::parse(&framed[..10]).unwrap_err();
        assert!(matches!(
            err,
            VitterError::HeaderTruncated {
                needed: HEADER_SIZE,
                available: 10
            }
        ));
    }

    #[test]
    fn test_unsupported_version() {
        let mut framed = compress(b"abc").unwrap();
        framed[4] = 2;
        assert!(matches!(
            decompress(&framed),
            Err(VitterError::UnsupportedVersion { version: 2, .. })
        ));
    }

    #[test]
    fn test_crc_mismatch() {
        let mut framed = compress(b"abc").unwrap();
        framed[14] ^= 0xFF;
        assert!(matches!(
            decompress(&framed),
            Err(VitterError::CrcMismatch { .. })
        ));
    }

    #[test]
    fn test_decompress_stream() {
        let data = b"streamed frames are checked as they are written ".repeat(40);
        let framed = compress(&data).unwrap();

        let mut output = Vec::new();
        let stats = decompress_stream(&framed[..], &mut output, VitterConfig::DEFAULT).unwrap();
        assert_eq!(output, data);
        assert_eq!(stats.symbols, data.len() as u64);

        let mut corrupted = framed.clone();
        corrupted[15] ^= 0x01;
        let err = decompress_stream(&corrupted[..], Vec::new(), VitterConfig::DEFAULT).unwrap_err();
        assert!(matches!(err, VitterError::CrcMismatch { .. }));
    }

    #[test]
    fn test_read_from() {
        let framed = compress(b"hello").unwrap();
        let mut cursor = &framed[..];
        let header = FrameHeader::read_from(&mut cursor).unwrap();
        assert_eq!(header.original_len, 5);
        assert_eq!(cursor.len(), framed.len() - HEADER_SIZE);
    }
}
