//! Move-To-Front transform for the Rust version of the standard BZIP2 library.
//!
//! The move-to-front transform will increase the frequency of lower byte values. The result of
//! this is that the huffman codes can more efficiently compress those high frequency bytes.

/// Replace every byte of `data` with its current position in a recency list, in place.
/// The list starts as `symbols` (ascending) and each byte is moved to the front after it is
/// used. `symbols` must contain every byte that appears in `data`.
pub fn mtf_encode(symbols: &[u8], data: &mut [u8]) {
    // Using an array for speed
    let mut index = [0_u8; 256];
    index[..symbols.len()].copy_from_slice(symbols);
    let index = &mut index[..symbols.len()];

    for byte in data.iter_mut() {
        let sym = *byte;
        let idx = index
            .iter()
            .position(|&c| c == sym)
            .expect("byte missing from its own symbol set");
        *byte = idx as u8;

        // Shift each index in front of the current byte back one, then put it at the front.
        if idx > 0 {
            index.copy_within(0..idx, 1);
            index[0] = sym;
        }
    }
}

#[cfg(test)]
mod test {
    use super::mtf_encode;

    #[test]
    fn mtf_banana_test() {
        let mut data = b"nnbaaa".to_vec();
        mtf_encode(b"abn", &mut data);
        assert_eq!(data, vec![2, 0, 2, 2, 0, 0]);
    }

    #[test]
    fn mtf_selectors_test() {
        let mut selectors = vec![0, 1, 2, 0, 1, 2, 2, 5];
        mtf_encode(&[0, 1, 2, 3, 4, 5], &mut selectors);
        assert_eq!(selectors, vec![0, 1, 2, 2, 2, 2, 0, 5]);
    }

    #[test]
    fn mtf_full_alphabet_test() {
        let symbols = (0..=255).collect::<Vec<u8>>();
        let mut data = vec![255, 255, 0, 255];
        mtf_encode(&symbols, &mut data);
        assert_eq!(data, vec![255, 0, 1, 1]);
    }

    #[test]
    fn mtf_empty_test() {
        let mut data: Vec<u8> = vec![];
        mtf_encode(&[], &mut data);
        assert!(data.is_empty());
    }
}
