use log::trace;

use crate::bitstream::bitwriter::BitWriter;
use crate::tools::mtf::mtf_encode;

use super::huffman_code_from_weights::code_len_from_weights;
use std::cmp::Ordering;
use std::io::Write;

/// Symbols are coded in groups of this many, each group naming its tree with one selector.
pub const GROUP_SIZE: usize = 50;
/// The fewest trees a block may carry.
pub const MIN_TABLES: usize = 2;
/// The most trees a block may carry.
pub const MAX_TABLES: usize = 6;

#[derive(Debug, Clone)]
pub enum NodeData {
    Kids(Box<Node>, Box<Node>),
    Leaf(u16),
}
#[derive(Debug, Clone)]
pub struct Node {
    pub weight: u32,
    pub depth: u8,
    /// Creation order, used to break ties between equal weights.
    pub order: u32,
    pub node_data: NodeData,
}
impl Node {
    /// Create a new node
    pub fn new(weight: u32, depth: u8, order: u32, node_data: NodeData) -> Node {
        Node {
            weight,
            depth,
            order,
            node_data,
        }
    }
}
impl Ord for Node {
    /// Sort Nodes by decreasing weight and decreasing creation order, so a max-heap hands out
    /// the lightest, oldest node first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.order.cmp(&self.order))
    }
}
impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Node {}

/// One symbol's code: `len` bits taken from the bottom of `bits`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HuffmanCode {
    pub len: u8,
    pub bits: u32,
}

/// A canonical prefix code over the block alphabet (RUNA, RUNB, MTF values, EOB).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    /// Code length for each symbol, in symbol order.
    pub lengths: Vec<u8>,
    /// Code for each symbol, in symbol order.
    pub codes: Vec<HuffmanCode>,
}

impl HuffmanTree {
    /// Build a tree from symbol frequencies. Every symbol gets a code, even if it never occurs.
    pub fn new(freqs: &[u32]) -> Self {
        let lengths = code_len_from_weights(freqs);
        let codes = codes_from_lengths(&lengths);
        HuffmanTree { lengths, codes }
    }

    /// Shortest code length in the tree.
    pub fn min_len(&self) -> u8 {
        self.lengths.iter().copied().min().unwrap_or(0)
    }
}

/// Assign codes from lengths. Codes are sequential within each length, and shorter lengths come
/// first, so a decoder can rebuild the same codes from the lengths alone.
fn codes_from_lengths(lengths: &[u8]) -> Vec<HuffmanCode> {
    let mut codes = vec![HuffmanCode::default(); lengths.len()];
    if lengths.is_empty() {
        return codes;
    }

    // Sort symbols ascending by length, and by symbol within each length.
    let mut len_sym: Vec<(u8, u16)> = lengths
        .iter()
        .enumerate()
        .map(|(sym, &len)| (len, sym as u16))
        .collect();
    len_sym.sort_unstable();

    /*
    When the length changes, do a shift left for each increment and continue. So
    for example, if the length is now 5 and the last code had a length of 3 and
    was 010, we would now start with 01000, 01001, 01010, etc.
    */
    let mut next_code: (u8, u32) = (len_sym[0].0, 0);
    for &(len, sym) in &len_sym {
        if len != next_code.0 {
            next_code.1 <<= len - next_code.0;
            next_code.0 = len;
        }
        codes[sym as usize] = HuffmanCode {
            len,
            bits: next_code.1,
        };
        next_code.1 += 1;
    }
    codes
}

/// Decide how many trees and selectors a block of `symbol_len` RLE2 symbols needs, build the
/// trees from the block frequencies and schedule them round robin.
///
/// All trees are built from the same block frequencies, so every schedule codes the block in
/// the same number of bits. The decoder still requires at least two trees.
pub fn generate_trees(freqs: &[u32], symbol_len: usize) -> (Vec<HuffmanTree>, Vec<u8>) {
    let selector_count = ((symbol_len + GROUP_SIZE - 1) / GROUP_SIZE).max(1);
    let table_count = if selector_count <= MIN_TABLES {
        MIN_TABLES
    } else {
        selector_count.min(MAX_TABLES)
    };

    let tree = HuffmanTree::new(freqs);
    trace!(
        "{} trees, {} selectors, code lengths {:?}",
        table_count,
        selector_count,
        tree.lengths
    );
    let trees = vec![tree; table_count];
    let selectors = (0..selector_count)
        .map(|i| (i % table_count) as u8)
        .collect();
    (trees, selectors)
}

/// Write the huffman section of a block: tree count, selectors, code length tables and finally
/// the coded symbols, switching trees every 50 symbols as the selectors say.
pub fn huf_encode<W: Write>(
    bw: &mut BitWriter<W>,
    symbols: &[u16],
    trees: &[HuffmanTree],
    selectors: &[u8],
) {
    // A 3 bit number of Huffman trees that exist
    trace!("Table count {} written at {}.", trees.len(), bw.loc());
    bw.out(3, trees.len() as u64);

    // Then a 15 bit number indicating the how many selectors are used
    trace!("Selector count {} written at {}.", selectors.len(), bw.loc());
    bw.out(15, selectors.len() as u64);

    /*
    Selectors tell us which table is to be used for each 50 symbol chunk of input
    data in this block. They are written after a Move-To-Front transform, to save space,
    and each MTF index is written in unary: that many 1 bits and a closing 0.
    */
    let table_idx: Vec<u8> = (0..trees.len() as u8).collect();
    let mut mtf_selectors = selectors.to_vec();
    mtf_encode(&table_idx, &mut mtf_selectors);
    for &rank in &mtf_selectors {
        bw.out(rank + 1, ((1_u64 << rank) - 1) << 1);
    }

    /*
    Next we write out the symbol lengths that will be used in the decompression.
    They start with a five bit "origin", the shortest length in the tree.
    Each symbol's length is then written as the delta from the last symbol. Each delta
    step is exactly 2 bits long, 10 to add one or 11 to take one away. The end of the
    delta is indicated with a single zero bit.
    */
    for (t, tree) in trees.iter().enumerate() {
        let mut origin = tree.min_len();
        trace!("Origin {} for huffman map {} at {}.", origin, t, bw.loc());
        bw.out(5, origin as u64);
        for &len in &tree.lengths {
            let mut delta = len as i32 - origin as i32;
            origin = len;
            loop {
                match delta.cmp(&0) {
                    Ordering::Greater => {
                        bw.out(2, 0b10);
                        delta -= 1;
                    }
                    Ordering::Less => {
                        bw.out(2, 0b11);
                        delta += 1;
                    }
                    Ordering::Equal => break,
                }
            }
            bw.out(1, 0);
        }
    }

    // Now write the data itself, 50 symbols per selector.
    trace!("Huffman data written at {}.", bw.loc());
    for (chunk, &selector) in symbols.chunks(GROUP_SIZE).zip(selectors) {
        let codes = &trees[selector as usize].codes;
        for &sym in chunk {
            let code = codes[sym as usize];
            bw.out(code.len, code.bits as u64);
        }
    }
}

#[cfg(test)]
mod test {
    use super::{codes_from_lengths, generate_trees, huf_encode, HuffmanTree};
    use crate::bitstream::bitwriter::BitWriter;

    #[test]
    fn canonical_codes_test() {
        let codes = codes_from_lengths(&[2, 3, 3, 2, 2]);
        let bits: Vec<(u8, u32)> = codes.iter().map(|c| (c.len, c.bits)).collect();
        assert_eq!(bits, vec![(2, 0b00), (3, 0b110), (3, 0b111), (2, 0b01), (2, 0b10)]);
    }

    #[test]
    fn prefix_free_test() {
        let freqs: Vec<u32> = (0..40).map(|i| (i * 37 % 11) as u32).collect();
        let tree = HuffmanTree::new(&freqs);
        for (a, ca) in tree.codes.iter().enumerate() {
            for (b, cb) in tree.codes.iter().enumerate() {
                if a == b || ca.len > cb.len {
                    continue;
                }
                assert_ne!(
                    cb.bits >> (cb.len - ca.len),
                    ca.bits,
                    "code for {} is a prefix of code for {}",
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn small_block_gets_two_trees_test() {
        let freqs = [3_u32, 1, 5, 1];
        for len in [0, 1, 50, 100] {
            let (trees, selectors) = generate_trees(&freqs, len);
            assert_eq!(trees.len(), 2);
            assert!(selectors.len() <= 2 && !selectors.is_empty());
        }
    }

    #[test]
    fn large_block_gets_six_trees_test() {
        let freqs = vec![10_u32; 258];
        let (trees, selectors) = generate_trees(&freqs, 12_345);
        assert_eq!(trees.len(), 6);
        assert_eq!(selectors.len(), 247);
        assert!(selectors.iter().all(|&s| s < 6));

        let (trees, selectors) = generate_trees(&freqs, 201);
        assert_eq!(trees.len(), 5);
        assert_eq!(selectors, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn huf_encode_bits_test() {
        // Symbols RUNA, RUNB, 2, EOB (3) with lengths 1, 2, 3, 3.
        let freqs = [8_u32, 4, 2, 1];
        let (trees, selectors) = generate_trees(&freqs, 4);
        assert_eq!(trees[0].lengths, vec![1, 2, 3, 3]);

        let mut bw = BitWriter::new(vec![]);
        huf_encode(&mut bw, &[0, 1, 2, 3], &trees, &selectors);
        bw.align();
        bw.flush().unwrap();

        let expected = concat!(
            "010",             // two trees
            "000000000000001", // one selector
            "0",               // selector 0
            "00001",           // origin 1
            "0", "100", "100", "0",
            "00001",
            "0", "100", "100", "0",
            "0", "10", "110", "111", // data
            "00",              // padding
        );
        let bytes: Vec<u8> = expected
            .as_bytes()
            .chunks(8)
            .map(|c| u8::from_str_radix(std::str::from_utf8(c).unwrap(), 2).unwrap())
            .collect();
        assert_eq!(bw.into_inner(), bytes);
    }
}
