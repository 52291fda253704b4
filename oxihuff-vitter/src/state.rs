//! Driver state shared by encoder and decoder.

/// Lifecycle of a coding pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoderState {
    /// Symbols are being processed.
    #[default]
    Streaming,
    /// Input is exhausted; the final byte is being flushed or checked.
    Flushing,
    /// The pass is complete.
    Done,
}

/// Counters collected during one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodingStats {
    /// Symbols processed.
    pub symbols: u64,
    /// Symbols sent as escape code plus literal.
    pub new_symbols: u64,
    /// Code and literal bits, excluding final padding.
    pub bits: u64,
}

impl CodingStats {
    /// Bytes occupied by `bits` once padded.
    pub fn bytes(&self) -> u64 {
        self.bits.div_ceil(8)
    }

    /// Average bits per symbol, `0.0` for an empty pass.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.symbols == 0 {
            0.0
        } else {
            self.bits as f64 / self.symbols as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_helpers() {
        let stats = CodingStats {
            symbols: 4,
            new_symbols: 2,
            bits: 20,
        };
        assert_eq!(stats.bytes(), 3);
        assert!((stats.bits_per_symbol() - 5.0).abs() < f64::EPSILON);
        assert_eq!(CodingStats::default().bits_per_symbol(), 0.0);
    }
}
