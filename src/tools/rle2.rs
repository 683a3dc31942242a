//! Run-Length-Encoding phase 2 for BZIP2.
//!
//! Runs of the zero MTF rank are compressed regardless of their length. The length is written
//! in a bijective base-2 scheme using the two symbols RUNA and RUNB, which is very space
//! efficient. Since the move-to-front transform increases the frequency of the zero rank, this
//! reduces the symbol count significantly for most data.
//!
//! Every other rank `r` is written as `r + 1`, and the block ends with one end-of-block symbol.
//! The frequency of every symbol is counted on the way, since the huffman stage needs it.

pub const RUNA: u16 = 0;
pub const RUNB: u16 = 1;

/// RLE2 encoder output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rle2 {
    /// Encoded symbols, ending with the end-of-block symbol.
    pub symbols: Vec<u16>,
    /// How often each symbol of the alphabet `0..=eob` occurs.
    pub freqs: Vec<u32>,
    /// The end-of-block symbol, always the last (and largest) symbol of the alphabet.
    pub eob: u16,
}

/// Encode MTF ranks. `symbol_count` is the size of the reduced alphabet the ranks were made
/// against, which fixes the end-of-block symbol at `symbol_count + 1`.
pub fn rle2_encode(mtf: &[u8], symbol_count: usize) -> Rle2 {
    let eob = symbol_count as u16 + 1;
    let mut symbols = Vec::with_capacity(mtf.len() + 1);
    let mut freqs = vec![0_u32; eob as usize + 1];
    let mut zeros = 0_usize;

    for &rank in mtf {
        if rank == 0 {
            zeros += 1;
            continue;
        }
        // Not a zero, so output any pending zeros first
        write_run(zeros, &mut symbols, &mut freqs);
        zeros = 0;

        let sym = rank as u16 + 1;
        symbols.push(sym);
        freqs[sym as usize] += 1;
    }
    // Write any trailing zeros
    write_run(zeros, &mut symbols, &mut freqs);

    symbols.push(eob);
    freqs[eob as usize] += 1;

    Rle2 {
        symbols,
        freqs,
        eob,
    }
}

/// Encode a run of zeros as RUNA/RUNB, recording how many RUNA and RUNB were used.
fn write_run(mut run: usize, out: &mut Vec<u16>, freqs: &mut [u32]) {
    while run > 0 {
        let sym = if run & 1 == 1 {
            run -= 1;
            RUNA
        } else {
            run -= 2;
            RUNB
        };
        out.push(sym);
        freqs[sym as usize] += 1;
        run >>= 1;
    }
}
