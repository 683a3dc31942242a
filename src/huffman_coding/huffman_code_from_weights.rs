//! This helper function is part of the huffman encoding system.
//!
//! It builds a huffman tree from the symbol frequencies of a block and reports how deep each
//! symbol sits in it. That depth is the symbol's code length. The BZIP2 standard requires codes
//! of at most 20 bits, and this encoder stays at 17 like the original. If the frequencies create
//! longer codes, the weights will be flattened and another attempt will be made.
//!
//! The process of encoding each block is inherently sequential and does not benefit from multithreading.
//!

use std::collections::BinaryHeap;

use log::debug;

use super::huffman::{Node, NodeData};

/// Longest code length this encoder will produce.
pub const MAX_CODE_LEN: u8 = 17;

/// Compute a code length (1-17) for every symbol from its weight. Symbols with a weight of
/// zero are still given a code.
pub fn code_len_from_weights(sym_weight: &[u32]) -> Vec<u8> {
    let mut weight = sym_weight.to_vec();
    let mut codes = vec![0_u8; weight.len()];

    // We need to make codes of 17 bits or less. If we can't, we will adjust the weights and try again.
    loop {
        let root = match build_tree(&weight) {
            Some(root) => root,
            None => return codes,
        };

        if root.depth <= MAX_CODE_LEN {
            return_leaves(&root, 0, &mut codes);
            return codes;
        }

        debug!(
            "Huffman tree depth {} is over {}, flattening weights.",
            root.depth, MAX_CODE_LEN
        );
        // Adjust weights by dividing each weight by 2 and adding 1
        // This "flattens" the node tree. Then go try this again.
        for item in weight.iter_mut() {
            *item = 1 + (*item / 2);
        }
    }
}

/// Pare the leaves down to one single node with child nodes. The two lightest nodes are merged
/// each time, equal weights go in the order the nodes were created.
fn build_tree(weight: &[u32]) -> Option<Node> {
    let mut tree: BinaryHeap<Node> = weight
        .iter()
        .enumerate()
        .map(|(sym, &w)| Node::new(w, 0, sym as u32, NodeData::Leaf(sym as u16)))
        .collect();

    let mut order = weight.len() as u32;
    while tree.len() > 1 {
        // Pull off the bottom nodes and make a new parent
        if let (Some(left_child), Some(right_child)) = (tree.pop(), tree.pop()) {
            tree.push(Node::new(
                left_child.weight.saturating_add(right_child.weight),
                left_child.depth.max(right_child.depth).saturating_add(1),
                order,
                NodeData::Kids(Box::new(left_child), Box::new(right_child)),
            ));
            order += 1;
        }
    }
    tree.pop()
}

/// Recursively walk the tree and record in "codes" how far (deep) from the root node each leaf is.
/// Depth is the same as the code length, and will be used to create actual codes later.
fn return_leaves(node: &Node, depth: u8, codes: &mut [u8]) {
    match &node.node_data {
        NodeData::Kids(left_child, right_child) => {
            return_leaves(left_child, depth + 1, codes);
            return_leaves(right_child, depth + 1, codes);
        }
        // A lone leaf at the root still needs a one bit code.
        NodeData::Leaf(sym) => codes[*sym as usize] = depth.max(1),
    };
}
