//! Adaptive Huffman encoder (compression).

use crate::config::VitterConfig;
use crate::error::{Result, VitterError};
use crate::state::{CoderState, CodingStats};
use crate::tree::{AdaptiveCodeTree, Insertion};
use log::{debug, trace};
use oxihuff_core::BitWriter;
use std::io::{ErrorKind, Read, Write};

/// Read chunk size for [`VitterEncoder::encode_stream`].
const CHUNK_SIZE: usize = 64 * 1024;

/// One-pass adaptive Huffman encoder.
#[derive(Debug)]
pub struct VitterEncoder {
    tree: AdaptiveCodeTree,
    config: VitterConfig,
    state: CoderState,
    stats: CodingStats,
}

impl VitterEncoder {
    /// Create an encoder with an empty code tree.
    pub fn new(config: VitterConfig) -> Self {
        Self {
            tree: AdaptiveCodeTree::new(),
            config,
            state: CoderState::Streaming,
            stats: CodingStats::default(),
        }
    }

    /// The encoder's code tree.
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

    /// The configuration in use.
    pub fn config(&self) -> VitterConfig {
        self.config
    }

    /// Encode one symbol into `writer`.
    ///
    /// A first occurrence writes the escape code followed by the 8-bit
    /// literal; a repeat writes the symbol's current code.
    pub fn encode_byte<W: Write>(&mut self, writer: &mut BitWriter<W>, symbol: u8) -> Result<()> {
        if self.state != CoderState::Streaming {
            return Err(VitterError::Finished);
        }

        let insertion = self.tree.insert(symbol)?;
        if self.config.check_invariants {
            self.tree.check_invariants()?;
        }

        match &insertion {
            Insertion::New { escape } => {
                writer.write_bits(escape)?;
                writer.write_byte(symbol)?;
                self.stats.new_symbols += 1;
            }
            Insertion::Known { code } => writer.write_bits(code)?,
        }
        trace!(
            "encode: {symbol:#04x} as {}{}",
            insertion.code(),
            if insertion.was_new() { " + literal" } else { "" }
        );

        self.stats.symbols += 1;
        self.stats.bits += insertion.cost_bits() as u64;
        Ok(())
    }

    /// End the pass: pad and emit the final partial byte.
    ///
    /// Only the first call flushes; later calls do nothing.
    pub fn finish<W: Write>(&mut self, writer: &mut BitWriter<W>) -> Result<()> {
        if self.state == CoderState::Done {
            return Ok(());
        }

        self.state = CoderState::Flushing;
        writer.flush()?;
        self.state = CoderState::Done;

        debug!(
            "encode: {} symbols ({} new) in {} bits",
            self.stats.symbols, self.stats.new_symbols, self.stats.bits
        );
        Ok(())
    }

    /// Encode a whole buffer and return the padded bitstream.
    ///
    /// Empty input produces empty output.
    pub fn encode(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let mut writer = BitWriter::new(Vec::with_capacity(input.len()));
        for &symbol in input {
            self.encode_byte(&mut writer, symbol)?;
        }
        self.finish(&mut writer)?;
        Ok(writer.into_inner()?)
    }

    /// Encode everything `reader` yields into `writer`.
    pub fn encode_stream<R: Read, W: Write>(
        &mut self,
        mut reader: R,
        writer: W,
    ) -> Result<CodingStats> {
        let mut writer = BitWriter::new(writer);
        let mut chunk = vec![0u8; CHUNK_SIZE];

        loop {
            let n = match reader.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            for &symbol in &chunk[..n] {
                self.encode_byte(&mut writer, symbol)?;
            }
        }

        self.finish(&mut writer)?;
        Ok(self.stats)
    }

    /// Discard the tree and counters to start a new pass.
    pub fn reset(&mut self) {
        self.tree = AdaptiveCodeTree::new();
        self.state = CoderState::Streaming;
        self.stats = CodingStats::default();
    }
}

impl Default for VitterEncoder {
    fn default() -> Self {
        Self::new(VitterConfig::DEFAULT)
    }
}
