//! # OxiHuff-Vitter: Pure Rust Adaptive Huffman Coding
//!
//! This crate provides one-pass adaptive Huffman compression and
//! decompression built on the FGK/Vitter update of a sibling-property code
//! tree.
//!
//! ## Features
//!
//! - **Pure Rust**: No C dependencies, 100% safe Rust
//! - **One pass**: No frequency table is transmitted; encoder and decoder
//!   grow identical trees from the symbols themselves
//! - **Byte alphabet**: 256 symbol values, first occurrences sent as an
//!   escape code plus 8-bit literal
//! - **Framing**: Optional `VHUF` header carrying length and CRC-32
//!
//! ## Stream Format
//!
//! The raw stream is a sequence of codewords, MSB first:
//!
//! - **Known symbol**: the root-to-leaf path of the symbol (0 = left, 1 = right)
//! - **New symbol**: the path to the NYT leaf followed by the 8-bit literal
//! - **End**: zero padding to the next byte; there is no end marker, so the
//!   decoder needs the symbol count
//!
//! ## Example
//!
//! ```rust
//! use oxihuff_vitter::{decode, encode, VitterConfig};
//!
//! let original = b"abracadabra";
//!
//! let encoded = encode(original, VitterConfig::DEFAULT).unwrap();
//! let decoded = decode(&encoded, original.len(), VitterConfig::DEFAULT).unwrap();
//!
//! assert_eq!(decoded, original);
//! ```
//!
//! A single byte is sent as its own literal:
//!
//! ```rust
//! use oxihuff_vitter::{encode, VitterConfig};
//!
//! assert_eq!(encode(&[0x41], VitterConfig::DEFAULT).unwrap(), vec![0x41]);
//! ```
//!
//! ## Framed Streams
//!
//! ```rust
//! use oxihuff_vitter::{compress, decompress};
//!
//! let framed = compress(b"hello hello hello").unwrap();
//! assert_eq!(&framed[..4], b"VHUF");
//! assert_eq!(decompress(&framed).unwrap(), b"hello hello hello");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod config;
mod decoder;
mod encoder;
mod error;
pub mod frame;
mod state;
pub mod tree;

pub use config::VitterConfig;
pub use decoder::VitterDecoder;
pub use encoder::VitterEncoder;
pub use error::{Result, VitterError};
pub use frame::{
    FrameHeader, compress, compress_with, decompress, decompress_stream, decompress_with,
};
pub use state::{CoderState, CodingStats};
pub use tree::{AdaptiveCodeTree, Insertion, Node, NodeId, NodeKind};

/// Encode data into a raw (headerless) adaptive Huffman stream.
///
/// # Example
///
/// ```rust
/// use oxihuff_vitter::{encode, VitterConfig};
///
/// let encoded = encode(b"AAA", VitterConfig::DEFAULT).unwrap();
/// assert_eq!(encoded, vec![0x41, 0xC0]);
/// ```
pub fn encode(data: &[u8], config: VitterConfig) -> Result<Vec<u8>> {
    VitterEncoder::new(config).encode(data)
}

/// Decode `expected_len` symbols from a raw adaptive Huffman stream.
///
/// # Example
///
/// ```rust
/// use oxihuff_vitter::{decode, VitterConfig};
///
/// let decoded = decode(&[0x41, 0xC0], 3, VitterConfig::DEFAULT).unwrap();
/// assert_eq!(decoded, b"AAA");
/// ```
pub fn decode(data: &[u8], expected_len: usize, config: VitterConfig) -> Result<Vec<u8>> {
    VitterDecoder::new(config).decode(data, expected_len)
}
