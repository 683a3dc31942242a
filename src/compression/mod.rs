//! The compression module manages the compression side of this bzip2 library.
//!
//! BZIP2 compression happens in the following steps:
//! - Run Length Encoding 1: Compress all runs of 4-259 identical bytes.
//! - Burrow Wheeler Transform: Sort the data to increase the probability of runs of identical bytes.
//! - Move To Front transform: Increase the frequency of lower byte values, and thereby decrease the frequency of other byte values.
//! - Run Length Encoding 2: Compress all runs of the zero byte.
//! - Huffman coding: Encode frequent byte values using smaller bit codes and less frequent byte values with longer bit codes.
//!
//! While the initial RLE1 compression is probably not necessary, it is part of the bzip2 format and must be preserved.
//!
//! `block` gathers RLE1 data up to the block size, `compress_block` turns one block into bits, and
//! `compress` holds the stream writer that ties blocks, CRCs, header and footer together.
//!

pub mod block;
pub mod compress;
pub mod compress_block;
