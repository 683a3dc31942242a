//! Rust bzip2 compressor.
//!
//! Provides streaming compression into the bzip2 format. Output is readable by any standard
//! bzip2 decoder. Decompression is not part of this crate.
//!
//! Basic usage:
//!
//! ```
//! use std::io::Write;
//! use bzwrite::{BzWriter, Level};
//!
//! let mut bz = BzWriter::with_level(Vec::new(), Level::best());
//! bz.write_all(b"hello hello hello").unwrap();
//! let compressed = bz.finish().unwrap();
//! assert_eq!(&compressed[..4], b"BZh9");
//! ```
//!
//! Each stage of the pipeline (RLE1, BWT, MTF, RLE2, huffman coding) is a public module of its
//! own and can be used on its own.
//!
pub mod bitstream;
pub mod bwt_algorithms;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use compression::compress::{BzWriter, Level};
pub use error::BzError;
