//! The tools module provides the per-block transforms of the Rust bzip2 compressor.
//!
//! BZIP2 is a block-oriented approach to compress data.
//!
//! The tools are:
//! - crc: CRC32 checksum for BZIP2, both block and stream versions.
//! - mtf: Move-To-Front transform.
//! - rle1: Run-Length-Encoding phase 1, applied to the raw input before the BWT.
//! - rle2: Run-Length-Encoding phase 2, applied to the zero runs of the MTF output.
//! - symbol_map: Find the symbols a block uses and encode the bzip2 symbol map.
//!
pub mod crc;
pub mod mtf;
pub mod rle1;
pub mod rle2;
pub mod symbol_map;
