use std::cmp::Ordering;

use log::trace;

/// Blocks up to this size are sorted by comparing rotations directly.
const DIRECT_SORT_LIMIT: usize = 4096;

/// Burrows-Wheeler-Transform. Sorts every rotation of the (circular) block and returns the key
/// (sorted position of the unrotated block) and the last byte of each sorted rotation.
///
/// Small blocks compare rotations byte by byte. Larger blocks use prefix doubling over cyclic
/// ranks, which stays fast on highly repetitive data. Both give the same output.
pub fn bwt_encode(rle1_data: &[u8]) -> (u32, Vec<u8>) {
    let n = rle1_data.len();
    if n < 2 {
        return (0, rle1_data.to_vec());
    }

    let index = if n <= DIRECT_SORT_LIMIT {
        trace!("Sorting {} rotations directly.", n);
        direct_sort(rle1_data)
    } else {
        trace!("Sorting {} rotations by prefix doubling.", n);
        doubling_sort(rle1_data)
    };

    // Get key and BWT output
    let mut key = 0_u32;
    let mut bwt = vec![0; n];
    for (i, &rotation) in index.iter().enumerate() {
        if rotation == 0 {
            key = i as u32;
            bwt[i] = rle1_data[n - 1];
        } else {
            bwt[i] = rle1_data[rotation as usize - 1];
        }
    }
    (key, bwt)
}

/// Sort rotation start positions by comparing the rotations themselves.
fn direct_sort(block: &[u8]) -> Vec<u32> {
    let mut index = (0_u32..block.len() as u32).collect::<Vec<u32>>();
    index.sort_unstable_by(|&a, &b| {
        block_compare(a as usize, b as usize, block).then_with(|| a.cmp(&b))
    });
    index
}

/// compare the two rotations starting at a and b, wrapping around the end of the block
fn block_compare(a: usize, b: usize, block: &[u8]) -> Ordering {
    let min = std::cmp::min(block[a..].len(), block[b..].len());

    // Lexicographical comparison
    let mut result = block[a..a + min].cmp(&block[b..b + min]);

    // Implement wraparound if needed
    if result == Ordering::Equal {
        if a < b {
            let to_end = block.len() - a - min;
            result = block[(a + min)..].cmp(&block[..to_end]);
            if result == Ordering::Equal {
                let rest_of_block = block.len() - to_end - min;
                return block[..rest_of_block].cmp(&block[to_end..(to_end + rest_of_block)]);
            }
        } else {
            let to_end = block.len() - b - min;
            result = block[..to_end].cmp(&block[(b + min)..]);
            if result == Ordering::Equal {
                let rest_of_block = block.len() - to_end - min;
                return block[to_end..(to_end + rest_of_block)].cmp(&block[..rest_of_block]);
            }
        }
    }
    result
}

/// Sort rotation start positions by prefix doubling. After the round for `k`, `rank[i]` orders
/// rotation i by its first 2k bytes. Once 2k covers the block (or every rank is distinct) the
/// order is final. Rotations that are identical keep their index order.
fn doubling_sort(block: &[u8]) -> Vec<u32> {
    let n = block.len();
    let mut index = (0_u32..n as u32).collect::<Vec<u32>>();
    let mut rank = block.iter().map(|&b| b as u32).collect::<Vec<u32>>();
    let mut next_rank = vec![0_u32; n];

    let mut k = 1;
    loop {
        {
            let pair = |i: u32| (rank[i as usize], rank[(i as usize + k) % n]);
            index.sort_unstable_by_key(|&i| (pair(i), i));

            next_rank[index[0] as usize] = 0;
            for w in 1..n {
                let (prev, cur) = (index[w - 1], index[w]);
                next_rank[cur as usize] =
                    next_rank[prev as usize] + (pair(prev) != pair(cur)) as u32;
            }
        }
        std::mem::swap(&mut rank, &mut next_rank);

        let distinct = rank[index[n - 1] as usize] as usize + 1;
        k *= 2;
        if distinct == n || k >= n {
            break;
        }
    }
    index
}
