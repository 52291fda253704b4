//! Error types for OxiHuff bit-level operations.
//!
//! Codec crates wrap [`OxiHuffError`] in their own error enums; this type only
//! covers what can go wrong below the code tree: I/O, running out of bits and
//! malformed textual bit strings.

use std::io;
use thiserror::Error;

/// The main error type for OxiHuff bit-level operations.
#[derive(Debug, Error)]
pub enum OxiHuffError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input ended in the middle of a multi-bit read.
    #[error("Unexpected end of stream at bit position {bit_position}")]
    UnexpectedEof {
        /// Bit position where the stream ran out.
        bit_position: u64,
    },

    /// A textual bit string contained something other than '0' or '1'.
    #[error("Invalid bit character {character:?} at index {index}")]
    InvalidBitChar {
        /// The offending character.
        character: char,
        /// Character index inside the string.
        index: usize,
    },
}

/// Result type alias for OxiHuff core operations.
pub type Result<T> = std::result::Result<T, OxiHuffError>;

impl OxiHuffError {
    /// Create an unexpected EOF error.
    pub fn unexpected_eof(bit_position: u64) -> Self {
        Self::UnexpectedEof { bit_position }
    }

    /// Create an invalid bit character error.
    pub fn invalid_bit_char(character: char, index: usize) -> Self {
        Self::InvalidBitChar { character, index }
    }
}
