use crate::tools::crc::do_crc;
use crate::tools::rle1::{committed_len, rle1_encode_into, Run};

/// One block of RLE1 data being gathered for compression.
///
/// The block holds at most `size` encoded bytes. Its CRC covers the original (pre-RLE1) bytes
/// it accepted, and the open run is carried between writes so a run split across writes is
/// still encoded as one run.
#[derive(Debug)]
pub struct Block {
    /// RLE1 encoded data. The count byte of an open run is not in here yet.
    data: Vec<u8>,
    /// Capacity in encoded bytes.
    size: usize,
    /// Running CRC of the original bytes accepted so far.
    crc: u32,
    /// Run being encoded.
    run: Run,
    /// Original bytes accepted, for logging.
    accepted: u64,
}

impl Block {
    /// Create an empty block that holds up to `size` encoded bytes.
    pub fn new(size: usize) -> Self {
        Block {
            data: Vec::with_capacity(size),
            size,
            crc: 0,
            run: Run::default(),
            accepted: 0,
        }
    }

    /// Add as much of `input` as fits. Returns how many bytes of `input` were accepted, and
    /// true when the block is full (it could not take everything, or it is now exactly at
    /// capacity). A full block must be compressed before more data can go in.
    ///
    /// A run of four identical bytes is never left without room for its count byte. If the
    /// fourth byte would land on the last free byte it is not accepted, and the caller hands
    /// it to the next block.
    pub fn write(&mut self, input: &[u8]) -> (usize, bool) {
        let used = rle1_encode_into(input, &mut self.data, &mut self.run, self.size);
        self.crc = do_crc(self.crc, &input[..used]);
        self.accepted += used as u64;
        let full = used < input.len() || self.len() >= self.size;
        (used, full)
    }

    /// Encoded length, counting the count byte an open run still owes.
    pub fn len(&self) -> usize {
        committed_len(&self.data, &self.run)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// CRC of the original bytes accepted so far.
    pub fn crc(&self) -> u32 {
        self.crc
    }

    /// Count of original bytes accepted so far.
    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    /// Close the open run and return the finished RLE1 data.
    pub fn finish(&mut self) -> &[u8] {
        self.run.close(&mut self.data);
        &self.data
    }

    /// Empty the block so it can be filled again, keeping its buffer.
    pub fn reset(&mut self) {
        self.data.clear();
        self.crc = 0;
        self.run = Run::default();
        self.accepted = 0;
    }
}
