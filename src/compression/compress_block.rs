use std::io::Write;

use log::{debug, trace};

use crate::bitstream::bitwriter::BitWriter;
use crate::bwt_algorithms::bwt_sort::bwt_encode;
use crate::huffman_coding::huffman::{generate_trees, huf_encode};
use crate::tools::mtf::mtf_encode;
use crate::tools::rle2::rle2_encode;
use crate::tools::symbol_map::{analyze, encode_sym_map};

/// Magic number that opens every block (BCD of pi).
pub const BLOCK_MAGIC: u64 = 0x3141_5926_5359;

/// Called by the stream writer, this compresses one block of RLE1 data and puts it on the
/// bitstream: block header, BWT key, symbol maps, then the huffman section.
pub fn compress_block<W: Write>(bw: &mut BitWriter<W>, data: &[u8], block_crc: u32) {
    // For each block, write the block header:
    // Six bytes of magic, 4 bytes of crc data, 1 bit for Randomized flag.
    trace!("Writing magic and CRC at {}.", bw.loc());
    bw.out(48, BLOCK_MAGIC);
    bw.out32(block_crc);
    bw.out(1, 0);

    let (key, mut bwt) = bwt_encode(data);

    // Now that we have the key, we can write the 24bit BWT key
    trace!("Writing key {} at {}.", key, bw.loc());
    bw.out(24, key as u64);

    // Write out the the symbol maps, 16 bit L1 + 0-16 words of 16 bit L2 maps.
    let symbols = analyze(&bwt);
    trace!("Symbol maps written at {}.", bw.loc());
    for word in encode_sym_map(&symbols.present) {
        bw.out16(word);
    }

    // The BWT output is not needed again, so the MTF happens in place.
    mtf_encode(&symbols.reduced, &mut bwt);
    let rle2 = rle2_encode(&bwt, symbols.len());

    let (trees, selectors) = generate_trees(&rle2.freqs, rle2.symbols.len());
    debug!(
        "{} bytes in block, {} after MTF & RLE2 coding, {} syms in use, {} trees, {} selectors",
        data.len(),
        rle2.symbols.len(),
        rle2.eob + 1,
        trees.len(),
        selectors.len()
    );

    // Now for the compression - the Huffman encoding (which also writes out data)
    huf_encode(bw, &rle2.symbols, &trees, &selectors);
    debug!("Bit stream now at {}", bw.loc());
}
