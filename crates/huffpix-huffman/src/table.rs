//! Symbol-to-code table derived from a Huffman tree.
//!
//! A depth-first walk appends `0` for every left edge and `1` for every
//! right edge; the path at each leaf is that leaf's code. A degenerate tree
//! (one leaf, no edges) gives its symbol the 1-bit code `0`.

use std::fmt;

use tracing::debug;

use huffpix_core::{ALPHABET_SIZE, MAX_CODE_BITS};

use crate::histogram::FrequencyTable;
use crate::tree::{HuffmanTree, TreeNode};

const CODE_WORDS: usize = MAX_CODE_BITS / 64;

/// A variable-length code of up to [`MAX_CODE_BITS`] bits, stored MSB-first.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct HuffmanCode {
    words: [u64; CODE_WORDS],
    len: u16,
}

impl HuffmanCode {
    /// Empty code.
    pub const fn new() -> Self {
        Self {
            words: [0; CODE_WORDS],
            len: 0,
        }
    }

    /// Build a code from a `0`/`1` bit sequence.
    pub fn from_bits(bits: &[bool]) -> Self {
        let mut code = Self::new();
        for &bit in bits {
            code.push(bit);
        }
        code
    }

    /// Number of bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bit at position `index`, counting from the first bit emitted.
    #[inline]
    pub fn bit(&self, index: usize) -> bool {
        debug_assert!(index < self.len());
        (self.words[index / 64] >> (63 - index % 64)) & 1 == 1
    }

    /// Iterate over the bits in emission order.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len()).map(move |i| self.bit(i))
    }

    fn push(&mut self, bit: bool) {
        let index = self.len();
        debug_assert!(index < MAX_CODE_BITS);
        let mask = 1u64 << (63 - index % 64);
        if bit {
            self.words[index / 64] |= mask;
        } else {
            self.words[index / 64] &= !mask;
        }
        self.len += 1;
    }

    fn pop(&mut self) {
        debug_assert!(self.len > 0);
        self.len -= 1;
    }
}

impl fmt::Debug for HuffmanCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HuffmanCode({self})")
    }
}

impl fmt::Display for HuffmanCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Fixed 256-slot table mapping each symbol to its code.
///
/// Slots for symbols absent from the tree hold an empty code.
#[derive(Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [HuffmanCode; ALPHABET_SIZE],
}

impl CodeTable {
    /// Derive the code table for a tree. `None` yields an all-empty table.
    pub fn from_tree(tree: Option<&HuffmanTree>) -> Self {
        let mut table = Self {
            codes: [HuffmanCode::new(); ALPHABET_SIZE],
        };

        let Some(tree) = tree else {
            return table;
        };

        match tree.root() {
            TreeNode::Leaf { symbol, .. } => {
                table.codes[*symbol as usize] = HuffmanCode::from_bits(&[false]);
            }
            root => {
                let mut path = HuffmanCode::new();
                table.assign(root, &mut path);
            }
        }

        debug!(
            symbols = table.len(),
            max_code_len = table.max_code_len(),
            "Built code table"
        );

        table
    }

    fn assign(&mut self, node: &TreeNode, path: &mut HuffmanCode) {
        match node {
            TreeNode::Leaf { symbol, .. } => {
                self.codes[*symbol as usize] = *path;
            }
            TreeNode::Internal { left, right, .. } => {
                path.push(false);
                self.assign(left, path);
                path.pop();

                path.push(true);
                self.assign(right, path);
                path.pop();
            }
        }
    }

    /// Code for a symbol, or `None` if the symbol is not in the tree.
    #[inline]
    pub fn get(&self, symbol: u8) -> Option<&HuffmanCode> {
        let code = &self.codes[symbol as usize];
        if code.is_empty() {
            None
        } else {
            Some(code)
        }
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().filter(|c| !c.is_empty()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.iter().all(HuffmanCode::is_empty)
    }

    /// Length of the longest code.
    pub fn max_code_len(&self) -> usize {
        self.codes.iter().map(HuffmanCode::len).max().unwrap_or(0)
    }

    /// Symbols with a code, in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &HuffmanCode)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_empty())
            .map(|(s, c)| (s as u8, c))
    }

    /// Exact number of bits needed to encode data with this histogram.
    ///
    /// Symbols without a code contribute nothing.
    pub fn encoded_bits(&self, frequencies: &FrequencyTable) -> u64 {
        frequencies
            .iter_present()
            .map(|(s, count)| count as u64 * self.codes[s as usize].len() as u64)
            .sum()
    }
}

impl fmt::Debug for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
