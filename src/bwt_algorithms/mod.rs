//! The bwt_algorithms module forms the critical sorting subsystem for the Rust bzip2 compressor.
//!
//! BZIP2 uses the Burrow-Wheeler Transform (BWT) to prepare data for compression. This transform
//! alters the data in such a way that runs of similar bytes are more likely to occur. This allows
//! for more effective compression.
//!
//! The Burrow-Wheeler Transform requires "computationally expensive" sorting of every rotation of
//! the block. Small blocks are sorted by direct rotation comparison, larger ones by prefix doubling.
//!
pub mod bwt_sort;
