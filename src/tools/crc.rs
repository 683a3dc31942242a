//! CRC32 checksums for BZIP2, both block and stream versions.
//!
//! BZIP2 uses the IEEE polynomial, but shifts bits out of the top of the register (MSB first)
//! rather than the reflected form used by zlib and friends. The lookup table is built at
//! compile time.

const POLY: u32 = 0x04c1_1db7;

const CRC_TABLE: [u32; 256] = make_table();

const fn make_table() -> [u32; 256] {
    let mut table = [0_u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut c = (i as u32) << 24;
        let mut bit = 0;
        while bit < 8 {
            c = if c & 0x8000_0000 == 0 { c << 1 } else { (c << 1) ^ POLY };
            bit += 1;
        }
        table[i] = c;
        i += 1;
    }
    table
}

/// Fold `data` into a running block crc. Start a new block with a crc of 0.
/// Splitting the data across several calls gives the same result as one call.
pub fn do_crc(crc: u32, data: &[u8]) -> u32 {
    let mut crc = !crc;
    for &byte in data {
        crc = (crc << 8) ^ CRC_TABLE[((crc >> 24) as u8 ^ byte) as usize];
    }
    !crc
}

/// Merge a block crc into the stream crc. Blocks must be merged in the order they are written.
pub fn do_stream_crc(stream_crc: u32, block_crc: u32) -> u32 {
    stream_crc.rotate_left(1) ^ block_crc
}
