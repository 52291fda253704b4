//! # OxiHuff Core
//!
//! Core components for the OxiHuff adaptive Huffman library.
//!
//! This crate provides the building blocks below the code tree:
//!
//! - [`bits`]: `BitSequence`, the codeword accumulator
//! - [`bitstream`]: MSB-first bit-level I/O with a final partial-byte flush
//! - [`crc`]: CRC-32 checksum for framed streams
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! OxiHuff is designed as a layered stack:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: Frontend                                            │
//! │     oxihuff CLI, framed streams                         │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     Adaptive code tree, encode/decode drivers           │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                              │
//! │     BitSequence, BitReader/BitWriter, CRC               │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxihuff_core::bits::BitSequence;
//! use oxihuff_core::bitstream::{BitReader, BitWriter};
//! use std::io::Cursor;
//!
//! let code: BitSequence = "101".parse().unwrap();
//! let mut writer = BitWriter::new(Vec::new());
//! writer.write_bits(&code).unwrap();
//! let data = writer.into_inner().unwrap();
//! assert_eq!(data, vec![0b1010_0000]);
//!
//! let mut reader = BitReader::new(Cursor::new(data));
//! assert_eq!(reader.read_bit().unwrap(), Some(true));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod bits;
pub mod bitstream;
pub mod crc;
pub mod error;

// Re-exports for convenience
pub use bits::BitSequence;
pub use bitstream::{BitReader, BitWriter};
pub use crc::{Crc32, CrcWriter};
pub use error::{OxiHuffError, Result};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bits::BitSequence;
    pub use crate::bitstream::{BitReader, BitWriter};
    pub use crate::crc::{Crc32, CrcWriter};
    pub use crate::error::{OxiHuffError, Result};
}
