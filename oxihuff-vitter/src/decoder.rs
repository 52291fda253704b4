//! Adaptive Huffman decoder (decompression).
//!
//! The raw stream has no end marker, so every decode call takes the number of
//! symbols to produce. With `strict_padding` the bits left after the last
//! symbol must be the zero padding of the final byte.

use crate::config::VitterConfig;
use crate::error::{Result, VitterError};
use crate::state::{CoderState, CodingStats};
use crate::tree::AdaptiveCodeTree;
use log::{debug, trace};
use oxihuff_core::BitReader;
use std::io::{Read, Write};

/// Output buffer size for [`VitterDecoder::decode_stream`].
const CHUNK_SIZE: usize = 64 * 1024;

/// One-pass adaptive Huffman decoder.
#[derive(Debug)]
pub struct VitterDecoder {
    tree: AdaptiveCodeTree,
    config: VitterConfig,
    state: CoderState,
    stats: CodingStats,
}

impl VitterDecoder {
    /// Create a decoder with an empty code tree.
    pub fn new(config: VitterConfig) -> Self {
        Self {
            tree: AdaptiveCodeTree::new(),
            config,
            state: CoderState::Streaming,
            stats: CodingStats::default(),
        }
    }

    /// The decoder's code tree.
    pub fn tree(&self) -> &AdaptiveCodeTree {
        &self.tree
    }

    /// Current pass state.
    pub fn state(&self) -> CoderState {
        self.state
    }

    /// Counters for the current pass.
    pub fn stats(&self) -> CodingStats {
        self.stats
    }

    /// Decode one symbol.
    ///
    /// Walks the tree from the root, 0 to the left and 1 to the right, until
    /// a symbol leaf or the NYT leaf. At the NYT leaf the next 8 bits are the
    /// literal. The symbol is then fed through the same insertion the encoder
    /// performed.
    pub fn decode_symbol<R: Read>(&mut self, reader: &mut BitReader<R>) -> Result<u8> {
        if self.state != CoderState::Streaming {
            return Err(VitterError::Finished);
        }

        let start = reader.bits_read();
        let mut current = self.tree.root();
        let symbol = loop {
            let node = self.tree.node(current);
            if node.is_nyt() {
                let literal = read_literal(reader)?;
                if self.tree.contains(literal) {
                    return Err(VitterError::desync(
                        start,
                        format!("literal {literal:#04x} is already in the tree"),
                    ));
                }
                break literal;
            }
            if let Some(symbol) = node.symbol() {
                break symbol;
            }

            let bit = reader.read_bit()?.ok_or_else(|| VitterError::TruncatedCode {
                position: reader.bits_read(),
            })?;
            current = node
                .child(bit)
                .ok_or_else(|| VitterError::invariant("decoder walk left the tree"))?;
        };

        let insertion = self.tree.insert(symbol)?;
        if self.config.check_invariants {
            self.tree.check_invariants()?;
        }

        let consumed = reader.bits_read() - start;
        if consumed != insertion.cost_bits() as u64 {
            return Err(VitterError::desync(
                start,
                format!(
                    "consumed {consumed} bits for {symbol:#04x}, expected {}",
                    insertion.cost_bits()
                ),
            ));
        }
        trace!("decode: {} -> {symbol:#04x}", insertion.code());

        self.stats.symbols += 1;
        self.stats.bits += consumed;
        if insertion.was_new() {
            self.stats.new_symbols += 1;
        }
        Ok(symbol)
    }

    /// End the pass, checking what follows the last symbol.
    ///
    /// With `strict_padding`, non-zero bits in the final byte are
    /// [`VitterError::InvalidPadding`] and any further byte is
    /// [`VitterError::TrailingData`].
    pub fn finish<R: Read>(&mut self, reader: &mut BitReader<R>) -> Result<()> {
        if self.state == CoderState::Done {
            return Ok(());
        }
        self.state = CoderState::Flushing;

        if self.config.strict_padding {
            if !reader.buffered_bits_are_zero() {
                return Err(VitterError::InvalidPadding);
            }
            reader.align_to_byte();
            if !reader.is_eof()? {
                return Err(VitterError::TrailingData {
                    symbols: self.stats.symbols as usize,
                });
            }
        }

        self.state = CoderState::Done;
        debug!(
            "decode: {} symbols ({} new) from {} bits",
            self.stats.symbols, self.stats.new_symbols, self.stats.bits
        );
        Ok(())
    }

    /// Decode exactly `expected_len` symbols from `data`.
    pub fn decode(&mut self, data: &[u8], expected_len: usize) -> Result<Vec<u8>> {
        // Every symbol after the first costs at least one bit.
        let capacity = expected_len.min(data.len().saturating_mul(8).saturating_add(1));
        let mut output = Vec::with_capacity(capacity);

        let mut reader = BitReader::new(data);
        for _ in 0..expected_len {
            output.push(self.decode_symbol(&mut reader)?);
        }
        self.finish(&mut reader)?;

        Ok(output)
    }

    /// Decode exactly `expected_len` symbols from `reader` into `writer`.
    pub fn decode_stream<R: Read, W: Write>(
        &mut self,
        reader: R,
        mut writer: W,
        expected_len: u64,
    ) -> Result<CodingStats> {
        let mut reader = BitReader::new(reader);
        let mut chunk = Vec::with_capacity(CHUNK_SIZE);

        for _ in 0..expected_len {
            chunk.push(self.decode_symbol(&mut reader)?);
            if chunk.len() == CHUNK_SIZE {
                writer.write_all(&chunk)?;
                chunk.clear();
            }
        }
        writer.write_all(&chunk)?;
        writer.flush()?;

        self.finish(&mut reader)?;
        Ok(self.stats)
    }

    /// Discard the tree and counters to start a new pass.
    pub fn reset(&mut self) {
        self.tree = AdaptiveCodeTree::new();
        self.state = CoderState::Streaming;
        self.stats = CodingStats::default();
    }
}

impl Default for VitterDecoder {
    fn default() -> Self {
        Self::new(VitterConfig::DEFAULT)
    }
}

fn read_literal<R: Read>(reader: &mut BitReader<R>) -> Result<u8> {
    let mut value = 0u8;
    for _ in 0..8 {
        let bit = reader.read_bit()?.ok_or_else(|| VitterError::TruncatedLiteral {
            position: reader.bits_read(),
        })?;
        value = (value << 1) | bit as u8;
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::VitterEncoder;

    #[test]
    fn test_decode_single_literal() {
        let mut decoder = VitterDecoder::default();
        assert_eq!(decoder.decode(&[0x41], 1).unwrap(), b"A");
        assert_eq!(decoder.state(), CoderState::Done);
    }

    #[test]
    fn test_decode_known_bitstreams() {
        let mut decoder = VitterDecoder::new(VitterConfig::PARANOID);
        assert_eq!(decoder.decode(&[0x41, 0xC0], 3).unwrap(), b"AAA");

        let mut decoder = VitterDecoder::new(VitterConfig::PARANOID);
        assert_eq!(decoder.decode(&[0x41, 0x21, 0x50], 4).unwrap(), b"ABAB");
        assert_eq!(decoder.stats().bits, 20);
    }

    #[test]
    fn test_decode_empty() {
        let mut decoder = VitterDecoder::default();
        assert!(decoder.decode(&[], 0).unwrap().is_empty());
    }

    #[test]
    fn test_truncated_literal() {
        let mut decoder = VitterDecoder::default();
        let err = decoder.decode(&[], 1).unwrap_err();
        assert!(matches!(err, VitterError::TruncatedLiteral { position: 0 }));

        // "AB" needs 17 bits; one byte ends inside the escape of 'B'.
        let mut decoder = VitterDecoder::default();
        let err = decoder.decode(&[0x41], 2).unwrap_err();
        assert!(matches!(err, VitterError::TruncatedCode { position: 8 }));
    }

    #[test]
    fn test_truncated_code() {
        // Nine 'A's fill exactly two bytes; a tenth code has no bits left.
        let encoded = VitterEncoder::default().encode(&[b'A'; 9]).unwrap();
        assert_eq!(encoded, vec![0x41, 0xFF]);

        let mut decoder = VitterDecoder::default();
        let err = decoder.decode(&encoded, 10).unwrap_err();
        assert!(matches!(err, VitterError::TruncatedCode { position: 16 }));
    }

    #[test]
    fn test_strict_padding() {
        // 'A', 'A' then a set padding bit.
        let mut decoder = VitterDecoder::default();
        let err = decoder.decode(&[0x41, 0xC1], 2).unwrap_err();
        assert!(matches!(err, VitterError::InvalidPadding));

        let mut decoder = VitterDecoder::new(VitterConfig::LENIENT);
        assert_eq!(decoder.decode(&[0x41, 0xC1], 2).unwrap(), b"AA");
    }

    #[test]
    fn test_trailing_data() {
        let mut decoder = VitterDecoder::default();
        let err = decoder.decode(&[0x41, 0x00], 1).unwrap_err();
        assert!(matches!(err, VitterError::TrailingData { symbols: 1 }));

        let mut decoder = VitterDecoder::default();
        let err = decoder.decode(&[0x41], 0).unwrap_err();
        assert!(matches!(err, VitterError::TrailingData { symbols: 0 }));
    }

    #[test]
    fn test_repeated_literal_is_desync() {
        // 'A', then escape "0" followed by literal 'A' again.
        let mut decoder = VitterDecoder::default();
        let err = decoder.decode(&[0x41, 0x20, 0x80], 2).unwrap_err();
        assert!(matches!(err, VitterError::Desync { position: 8, .. }));
    }

    #[test]
    fn test_decode_stream() {
        let data: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8 ^ (i / 997) as u8).collect();
        let encoded = VitterEncoder::default().encode(&data).unwrap();

        let mut decoder = VitterDecoder::default();
        let mut output = Vec::new();
        let stats = decoder
            .decode_stream(&encoded[..], &mut output, data.len() as u64)
            .unwrap();

        assert_eq!(output, data);
        assert_eq!(stats.symbols, data.len() as u64);
        assert_eq!(stats.bytes(), encoded.len() as u64);
    }
}
