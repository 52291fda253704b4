//! Adaptive Huffman error types.

use oxihuff_core::OxiHuffError;
use thiserror::Error;

/// Adaptive Huffman coding errors.
#[derive(Debug, Error)]
pub enum VitterError {
    /// The code tree broke one of its structural invariants.
    ///
    /// This indicates a bug in the tree update, not bad input.
    #[error("Code tree invariant violated: {message}")]
    InvariantViolation {
        /// Description of the broken invariant.
        message: String,
    },

    /// The stream ended in the middle of a codeword path.
    #[error("Stream truncated inside a codeword at bit position {position}")]
    TruncatedCode {
        /// Bit position where the input ran out.
        position: u64,
    },

    /// The stream ended inside the 8-bit literal following an escape code.
    #[error("Stream truncated inside a literal at bit position {position}")]
    TruncatedLiteral {
        /// Bit position where the input ran out.
        position: u64,
    },

    /// The decoder's tree no longer matches the encoder's.
    #[error("Decoder out of sync at bit position {position}: {message}")]
    Desync {
        /// Bit position of the offending codeword.
        position: u64,
        /// What went wrong.
        message: String,
    },

    /// Whole bytes remained after the last expected symbol.
    #[error("Trailing data after {symbols} decoded symbols")]
    TrailingData {
        /// Number of symbols decoded before the trailing bytes.
        symbols: usize,
    },

    /// The coder already finished its pass; call `reset` to start another.
    #[error("Coder already finished")]
    Finished,

    /// The padding of the final byte was not zero.
    #[error("Non-zero padding bits in final byte")]
    InvalidPadding,

    /// Frame header did not start with the expected magic.
    #[error("Invalid frame magic: expected {expected:02x?}, found {found:02x?}")]
    InvalidMagic {
        /// Expected magic bytes.
        expected: [u8; 4],
        /// Actual bytes found.
        found: Vec<u8>,
    },

    /// Frame version or flags this build does not understand.
    #[error("Unsupported frame version {version} (flags {flags:#04x})")]
    UnsupportedVersion {
        /// Version byte.
        version: u8,
        /// Flags byte.
        flags: u8,
    },

    /// The frame header was shorter than its fixed size.
    #[error("Frame header truncated: need {needed} bytes, have {available}")]
    HeaderTruncated {
        /// Header size.
        needed: usize,
        /// Bytes available.
        available: usize,
    },

    /// Decoded data does not match the frame checksum.
    #[error("CRC mismatch: expected {expected:#010x}, computed {computed:#010x}")]
    CrcMismatch {
        /// CRC stored in the frame.
        expected: u32,
        /// CRC of the decoded data.
        computed: u32,
    },

    /// The frame's length does not fit this platform.
    #[error("Frame length {length} exceeds addressable memory")]
    LengthOverflow {
        /// Length stored in the frame.
        length: u64,
    },

    /// Bit-level error.
    #[error(transparent)]
    Core(#[from] OxiHuffError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for adaptive Huffman operations.
pub type Result<T> = std::result::Result<T, VitterError>;

impl VitterError {
    /// Create an invariant violation error.
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: message.into(),
        }
    }

    /// Create a decoder desync error.
    pub fn desync(position: u64, message: impl Into<String>) -> Self {
        Self::Desync {
            position,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VitterError::invariant("leader missing");
        assert!(err.to_string().contains("leader missing"));

        let err = VitterError::TruncatedLiteral { position: 9 };
        assert!(err.to_string().contains("literal"));

        let err = VitterError::CrcMismatch {
            expected: 0x1234,
            computed: 0xBEEF,
        };
        assert!(err.to_string().contains("0x00001234"));
    }

    #[test]
    fn test_core_error_conversion() {
        let err: VitterError = OxiHuffError::unexpected_eof(3).into();
        assert!(matches!(err, VitterError::Core(_)));
    }
}
