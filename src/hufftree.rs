use std::cmp::Ordering;

use crate::bitstream::BitStreamReader;
use crate::canonical::{CanonicalCode, CodeLengthTable};
use crate::error::{CodecError, Result};
use crate::frequency::FrequencyTable;
use crate::min_heap::MinHeap;

#[derive(Debug, Clone)]
pub enum HuffNode {
    Leaf {
        weight: u64,
        symbol: u8,
    },
    Internal {
        weight: u64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn new(symbol: u8, weight: u64) -> Self {
        HuffNode::Leaf { weight, symbol }
    }

    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn merge(a: Self, b: Self) -> Self {
        // a is the smaller node and becomes the 0 branch
        let weight = a.weight() + b.weight();
        HuffNode::Internal {
            weight,
            left: Box::new(a),
            right: Box::new(b),
        }
    }
}

/// Heap entry for tree construction.
///
/// Entries order by (weight, rank). Leaves are ranked 0..n in ascending
/// symbol order and each merged node takes the next free rank, so equal
/// weights resolve to the earlier-built node, and between leaves to the
/// lower symbol.
#[derive(Debug)]
struct Ranked {
    rank: usize,
    node: HuffNode,
}

impl Ranked {
    fn key(&self) -> (u64, usize) {
        (self.node.weight(), self.rank)
    }
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

#[derive(Debug, Clone)]
pub struct HuffmanTree {
    root: HuffNode,
}

impl HuffmanTree {
    pub fn from_samples(samples: &[u8]) -> Result<Self> {
        let frequencies = FrequencyTable::from_samples(samples)?;
        HuffmanTree::from_frequencies(&frequencies)
    }

    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        let nodes: Vec<Ranked> = frequencies
            .iter()
            .enumerate()
            .map(|(rank, (symbol, count))| Ranked {
                rank,
                node: HuffNode::new(symbol, count),
            })
            .collect();

        let mut next_rank = nodes.len();
        let mut heap = MinHeap::build(nodes);

        while heap.heap_size() > 1 {
            let x = heap.extract_min().map_err(|_| CodecError::EmptyInput)?;
            let y = heap.extract_min().map_err(|_| CodecError::EmptyInput)?;
            heap.insert(Ranked {
                rank: next_rank,
                node: HuffNode::merge(x.node, y.node),
            });
            next_rank += 1;
        }

        let root = heap
            .extract_min()
            .map_err(|_| CodecError::EmptyInput)?
            .node;
        Ok(HuffmanTree { root })
    }

    pub fn root(&self) -> &HuffNode {
        &self.root
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes().filter(|(node, _)| matches!(node, HuffNode::Leaf { .. })).count()
    }

    pub fn internal_count(&self) -> usize {
        self.nodes().filter(|(node, _)| matches!(node, HuffNode::Internal { .. })).count()
    }

    /// Depth of every leaf. A lone leaf gets depth 1 so that it still
    /// has a one-bit code.
    pub fn code_lengths(&self) -> CodeLengthTable {
        let depths = self
            .nodes()
            .filter_map(|(node, depth)| match node {
                HuffNode::Leaf { symbol, .. } => {
                    // 256 leaves cannot sit deeper than 255; saturate rather than wrap
                    Some((*symbol, u8::try_from(depth.max(1)).unwrap_or(u8::MAX)))
                }
                HuffNode::Internal { .. } => None,
            })
            .collect();

        CodeLengthTable::from_leaf_depths(depths)
    }

    /// Preorder walk with depths, driven by an explicit stack.
    fn nodes(&self) -> impl Iterator<Item = (&HuffNode, usize)> + '_ {
        let mut stack = vec![(&self.root, 0usize)];
        std::iter::from_fn(move || {
            let (node, depth) = stack.pop()?;
            if let HuffNode::Internal { left, right, .. } = node {
                stack.push((&**right, depth + 1));
                stack.push((&**left, depth + 1));
            }
            Some((node, depth))
        })
    }
}

#[derive(Debug)]
enum DecodeNode {
    Vacant,
    Leaf(u8),
    Branch(Box<DecodeNode>, Box<DecodeNode>),
}

/// Binary tree rebuilt from a canonical code, walked one bit at a time.
#[derive(Debug)]
pub struct DecodeTree {
    root: DecodeNode,
}

impl DecodeTree {
    pub fn from_code(code: &CanonicalCode) -> Result<Self> {
        let mut root = DecodeNode::Vacant;

        for (symbol, codeword) in code.iter() {
            let mut node = &mut root;
            for pos in (0..codeword.length).rev() {
                let bit = (codeword.bits >> pos) & 1 == 1;
                if matches!(node, DecodeNode::Vacant) {
                    *node = DecodeNode::Branch(
                        Box::new(DecodeNode::Vacant),
                        Box::new(DecodeNode::Vacant),
                    );
                }
                let current = node;
                node = match current {
                    DecodeNode::Branch(left, right) => {
                        if bit {
                            right.as_mut()
                        } else {
                            left.as_mut()
                        }
                    }
                    _ => {
                        return Err(CodecError::format(format!(
                            "code for symbol {symbol} runs through another code"
                        )))
                    }
                };
            }

            if !matches!(node, DecodeNode::Vacant) {
                return Err(CodecError::format(format!(
                    "code for symbol {symbol} collides with another code"
                )));
            }
            *node = DecodeNode::Leaf(symbol);
        }

        Ok(DecodeTree { root })
    }

    /// Reads bits until a leaf is reached. `Ok(None)` means the stream
    /// ran out of valid bits first.
    pub fn decode_symbol(&self, reader: &mut BitStreamReader<'_>) -> Result<Option<u8>> {
        let mut node = &self.root;
        loop {
            match node {
                DecodeNode::Leaf(symbol) => return Ok(Some(*symbol)),
                DecodeNode::Branch(left, right) => {
                    let Some(bit) = reader.read_bit() else {
                        return Ok(None);
                    };
                    node = if bit { &**right } else { &**left };
                }
                DecodeNode::Vacant => {
                    return Err(CodecError::format(format!(
                        "bit pattern ending at bit {} matches no code",
                        reader.position()
                    )))
                }
            }
        }
    }
}
