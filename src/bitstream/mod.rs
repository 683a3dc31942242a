//! The bitstream module forms the output side of the Rust bzip2 compressor.
//!
//! A bzip2 stream is a sequence of fields of odd bit widths (48 bit magic numbers, 24 bit BWT
//! keys, 1-20 bit huffman codes, single flag bits) with no byte alignment until the very end of
//! the stream. The BitWriter packs those fields most significant bit first and hands finished
//! bytes to the sink.
//!
pub mod bitwriter;
