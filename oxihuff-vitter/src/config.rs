//! Adaptive Huffman coder configuration.

/// Coder configuration parameters.
///
/// Neither option changes the bitstream; they only decide how much checking
/// the encoder and decoder do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VitterConfig {
    /// Run the full-tree invariant check after every insertion.
    /// Linear in tree size per symbol; meant for tests and debugging.
    pub check_invariants: bool,
    /// Reject streams whose final padding bits are non-zero or which carry
    /// whole bytes after the last expected symbol.
    pub strict_padding: bool,
}

impl VitterConfig {
    /// Default configuration: strict padding, no per-symbol tree checks.
    pub const DEFAULT: Self = Self {
        check_invariants: false,
        strict_padding: true,
    };

    /// Everything checked, every symbol.
    pub const PARANOID: Self = Self {
        check_invariants: true,
        strict_padding: true,
    };

    /// Accept any padding and ignore trailing bytes.
    pub const LENIENT: Self = Self {
        check_invariants: false,
        strict_padding: false,
    };

    /// Return a copy with invariant checking set to `enabled`.
    pub fn with_invariant_checks(mut self, enabled: bool) -> Self {
        self.check_invariants = enabled;
        self
    }

    /// Return a copy with strict padding set to `enabled`.
    pub fn with_strict_padding(mut self, enabled: bool) -> Self {
        self.strict_padding = enabled;
        self
    }
}

impl Default for VitterConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
