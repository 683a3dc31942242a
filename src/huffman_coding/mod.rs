//! The huffman module generates the huffman part of each block's bitstream.
//!
//! BZIP2 is a block-oriented approach to compress data.
//!
//! Huffman encoding is used in lieu of arithmetic encoding because of an historical problem with licensing restrictions.
//! While that has been resolved in more recent years, the BZIP2 standard was set based on the huffman standard.
//!
//! The huffman coding algorithm as used by BZIP2 is both block and chunk oriented. Within each block, chunks of 50
//! symbols are encoded with one of two to six huffman tables, named by a selector per chunk. Here every table of a
//! block is built from the same block frequencies and the selectors simply take turns, which keeps the output
//! deterministic while still producing the multi-table layout every decoder expects.
//!
//! The process of encoding each block is inherently sequential and does not benefit from multithreading.
//!

pub mod huffman;
pub mod huffman_code_from_weights;
