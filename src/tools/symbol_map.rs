//! Find which byte values a block uses, and build the bzip2 symbol map that records them.

const BIT_MASK: u16 = 0x8000;

/// The byte values present in a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolSet {
    /// Presence flag for every byte value.
    pub present: [bool; 256],
    /// Ascending list of the byte values that are present.
    pub reduced: Vec<u8>,
}

impl SymbolSet {
    /// Count of distinct byte values in use.
    pub fn len(&self) -> usize {
        self.reduced.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reduced.is_empty()
    }
}

/// Scan the data once and return both the presence table and the reduced alphabet.
pub fn analyze(data: &[u8]) -> SymbolSet {
    let mut present = [false; 256];
    for &byte in data {
        present[byte as usize] = true;
    }
    let reduced = present
        .iter()
        .enumerate()
        .filter(|(_, &p)| p)
        .map(|(byte, _)| byte as u8)
        .collect();
    SymbolSet { present, reduced }
}

/// Takes the presence table of all u8s used at the BWT stage and returns a
/// bzip2 symbol map: the 16 bit range bitmap followed by one 16 bit word for
/// each range that has at least one symbol.
pub fn encode_sym_map(present: &[bool; 256]) -> Vec<u16> {
    /*
       There are 256 possible u8s, which equals 16 sets of 16 u8s. The first word has bit i
       set (counting from the most significant bit) when any byte in 16i..16i+16 is used.
       Each range that is used is then described by its own word, with bit j set when byte
       16i+j is present.
    */
    let mut sym_maps: Vec<u16> = vec![0; 17];

    present.iter().enumerate().for_each(|(idx, &sym)| {
        if sym {
            sym_maps[0] |= BIT_MASK >> (idx >> 4);
            sym_maps[1 + (idx >> 4)] |= BIT_MASK >> (idx & 15)
        }
    });

    let ranges = sym_maps[0];
    let mut out = Vec::with_capacity(17);
    out.push(ranges);
    out.extend(
        sym_maps[1..]
            .iter()
            .enumerate()
            .filter(|(range, _)| ranges & (BIT_MASK >> range) > 0)
            .map(|(_, &map)| map),
    );
    out
}
