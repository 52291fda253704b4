//! Growable bit sequences used to carry Huffman codewords.
//!
//! A [`BitSequence`] is a stack of bits: the code tree walk pushes a bit when
//! it descends into a child and pops it on the way back, so the sequence
//! always holds the path from the root to the node being visited.
//!
//! # Example
//!
//! ```
//! use oxihuff_core::bits::BitSequence;
//!
//! let mut code = BitSequence::new();
//! code.push(true);
//! code.push(false);
//! code.push(true);
//! assert_eq!(code.to_string(), "101");
//!
//! code.pop();
//! assert_eq!(code.len(), 2);
//! assert!(code[0]);
//! ```

use crate::error::{OxiHuffError, Result};
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

/// An ordered sequence of bits with push/pop at the tail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BitSequence {
    bits: Vec<bool>,
}

impl BitSequence {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self { bits: Vec::new() }
    }

    /// Create an empty sequence with room for `capacity` bits.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: Vec::with_capacity(capacity),
        }
    }

    /// The 8-bit literal for `byte`, most significant bit first.
    pub fn from_byte(byte: u8) -> Self {
        (0..8).rev().map(|shift| (byte >> shift) & 1 == 1).collect()
    }

    /// Append a bit at the tail.
    #[inline]
    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Remove and return the tail bit.
    #[inline]
    pub fn pop(&mut self) -> Option<bool> {
        self.bits.pop()
    }

    /// Bit at `index`, if in range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    /// Number of bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the sequence holds no bits.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Remove every bit, keeping the allocation.
    pub fn clear(&mut self) {
        self.bits.clear();
    }

    /// Append all bits of `other`.
    pub fn extend_from(&mut self, other: &BitSequence) {
        self.bits.extend_from_slice(&other.bits);
    }

    /// Iterate over the bits from head to tail.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    /// Borrow the bits as a slice.
    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }
}

impl Index<usize> for BitSequence {
    type Output = bool;

    fn index(&self, index: usize) -> &bool {
        &self.bits[index]
    }
}

impl fmt::Display for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for BitSequence {
    type Err = OxiHuffError;

    fn from_str(s: &str) -> Result<Self> {
        s.chars()
            .enumerate()
            .map(|(index, c)| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(OxiHuffError::invalid_bit_char(other, index)),
            })
            .collect()
    }
}

impl FromIterator<bool> for BitSequence {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<bool>> for BitSequence {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl<'a> IntoIterator for &'a BitSequence {
    type Item = bool;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, bool>>;

    fn into_iter(self) -> Self::IntoIter {
        self.bits.iter().copied()
    }
}
