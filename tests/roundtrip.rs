use std::io::{self, Read, Write};

use bzwrite::tools::crc::do_crc;
use bzwrite::{BzError, BzWriter, Level};
use proptest::prelude::*;
use rand::{Rng, SeedableRng};

/// Compress `data` in one write at the given level.
fn compress(data: &[u8], level: Level) -> Vec<u8> {
    let mut bz = BzWriter::with_level(vec![], level);
    bz.write(data).unwrap();
    bz.finish().unwrap()
}

/// Decode with an independent bzip2 decoder.
///
/// bzip2-rs 0.1 rejects full blocks of incompressible data ("huffman bitstream truncated"),
/// even when they come from the reference bzip2. Tests that fill whole blocks use
/// compressible data.
fn decompress(data: &[u8]) -> Vec<u8> {
    let mut out = vec![];
    bzip2_rs::DecoderReader::new(data)
        .read_to_end(&mut out)
        .unwrap();
    out
}

fn assert_round_trip(data: &[u8], level: Level) {
    let compressed = compress(data, level);
    assert_eq!(&compressed[..3], b"BZh");
    assert_eq!(compressed[3], b'0' + level.get() as u8);
    assert!(decompress(&compressed) == data, "round trip failed");
}

#[test]
fn empty_stream_test() {
    let compressed = BzWriter::new(vec![]).finish().unwrap();
    assert!(decompress(&compressed).is_empty());
}

#[test]
fn short_inputs_test() {
    let inputs: [&[u8]; 5] = [b"a", b"banana", b"Making a silly test.", b"aaaa", b"aaaaa"];
    for data in inputs {
        assert_round_trip(data, Level::default());
    }
}

#[test]
fn all_byte_values_test() {
    let data: Vec<u8> = (0..=255_u8).cycle().take(256 * 40).collect();
    assert_round_trip(&data, Level::fast());
}

#[test]
fn long_runs_test() {
    let mut data = vec![b'x'; 10_000];
    data.extend(vec![0_u8; 259]);
    data.extend(vec![1_u8; 260]);
    data.extend(vec![2_u8; 4]);
    data.extend(b"tail");
    assert_round_trip(&data, Level::fast());
}

#[test]
fn exactly_one_block_test() {
    // No runs, so RLE1 leaves the size alone and the block is exactly full.
    let data: Vec<u8> = (0..100_000).map(|i| (i % 251) as u8).collect();
    let compressed = compress(&data, Level::fast());
    assert_eq!(decompress(&compressed), data);

    // One more byte starts a second block.
    let mut longer = data.clone();
    longer.push(7);
    assert_eq!(decompress(&compress(&longer, Level::fast())), longer);
}

#[test]
fn multi_block_test() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(2);
    let mut data = Vec::new();
    while data.len() < 250_000 {
        let words: [&[u8]; 5] = [b"alpha ", b"beta ", b"gamma ", b"\n", b"zzzzzzzz"];
        let word = words[rng.gen_range(0..5)];
        data.extend_from_slice(word);
        data.push(rng.gen());
    }
    let mut bz = BzWriter::with_level(vec![], Level::fast());
    bz.write(&data).unwrap();
    // Full blocks go out as soon as they are done.
    assert!(bz.get_ref().len() > 4);
    let compressed = bz.finish().unwrap();
    assert_eq!(decompress(&compressed), data);
}

#[test]
fn run_across_block_boundary_test() {
    // Fill the block to just short of capacity, then finish with a run that has to be split.
    for pad in 1..6 {
        let mut data: Vec<u8> = (0..100_000 - pad).map(|i| (i % 251) as u8).collect();
        data.extend(vec![b'q'; 300]);
        assert_round_trip(&data, Level::fast());
    }
}

#[test]
fn split_writes_test() {
    let data = b"split writes keep runs together: aaaaaaaaaaaaaaaaaaaa bbbbbbbbbb".repeat(50);
    let mut bz = BzWriter::new(vec![]);
    for chunk in data.chunks(7) {
        bz.write(chunk).unwrap();
    }
    let split = bz.finish().unwrap();
    assert_eq!(split, compress(&data, Level::default()));
    assert_eq!(decompress(&split), data);
}

#[test]
fn flush_mid_stream_test() {
    let mut bz = BzWriter::new(vec![]);
    bz.write(b"first part, ").unwrap();
    bz.flush().unwrap();
    assert!(bz.get_ref().len() > 4);
    bz.write(b"second part").unwrap();
    let out = bz.finish().unwrap();
    assert_eq!(decompress(&out), b"first part, second part");
}

#[test]
fn io_copy_test() {
    let data = b"copied through std::io::copy ".repeat(1000);
    let mut bz = BzWriter::with_level(vec![], Level::new(2).unwrap());
    io::copy(&mut &data[..], &mut bz).unwrap();
    assert_eq!(decompress(&bz.finish().unwrap()), data);
}

/// Sink that accepts `budget` bytes, then fails every call and counts them.
struct FailingSink {
    budget: usize,
    written: Vec<u8>,
    failures: usize,
}

impl Write for FailingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.budget == 0 {
            self.failures += 1;
            return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
        }
        let n = buf.len().min(self.budget);
        self.budget -= n;
        self.written.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn sticky_error_test() {
    let sink = FailingSink {
        budget: 10,
        written: vec![],
        failures: 0,
    };
    let mut bz = BzWriter::with_level(sink, Level::fast());
    let data: Vec<u8> = (0..150_000_u32).map(|i| (i * 7 % 253) as u8).collect();

    // The first block goes out while writing and hits the full sink.
    // No count comes back with the failure.
    assert!(matches!(bz.write(&data), Err(BzError::Io(_))));
    assert_eq!(bz.get_ref().failures, 1);
    assert!(bz.err().is_some());

    // Every later call hands back the same error without trying the sink again.
    assert!(matches!(bz.write(b"more"), Err(BzError::Io(_))));
    assert!(matches!(bz.flush(), Err(BzError::Io(_))));
    assert!(matches!(bz.close(), Err(BzError::Io(_))));
    assert_eq!(bz.get_ref().failures, 1);
    assert_eq!(bz.get_ref().written.len(), 10);

    // Reset clears the failure.
    let old = bz.reset(FailingSink {
        budget: usize::MAX,
        written: vec![],
        failures: 0,
    });
    assert_eq!(old.failures, 1);
    bz.write(b"fresh start").unwrap();
    let sink = bz.finish().unwrap();
    assert_eq!(decompress(&sink.written), b"fresh start");
}

#[test]
fn write_after_close_test() {
    let mut bz = BzWriter::new(vec![]);
    bz.write(b"done").unwrap();
    bz.close().unwrap();
    let len = bz.get_ref().len();
    assert!(matches!(bz.write(b"late"), Err(BzError::Closed)));
    assert_eq!(bz.get_ref().len(), len);

    let err = Write::write(&mut bz, b"late").unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
}

#[test]
fn drop_writes_nothing_test() {
    let mut out = vec![];
    {
        let mut bz = BzWriter::new(&mut out);
        bz.write(b"never closed").unwrap();
    }
    // Only the header was staged, and it was never flushed.
    assert!(out.is_empty());
}

#[test]
fn invalid_level_test() {
    assert!(matches!(Level::new(0), Err(BzError::InvalidLevel(0))));
    assert!(matches!(Level::new(42), Err(BzError::InvalidLevel(42))));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn crc_chunking_test(data in proptest::collection::vec(any::<u8>(), 0..2000), split in any::<prop::sample::Index>()) {
        let k = split.index(data.len() + 1);
        let whole = do_crc(0, &data);
        let parts = do_crc(do_crc(0, &data[..k]), &data[k..]);
        prop_assert_eq!(whole, parts);
    }

    #[test]
    fn random_round_trip_test(data in proptest::collection::vec(prop_oneof![Just(b'a'), Just(b'b'), any::<u8>()], 0..3000)) {
        let compressed = compress(&data, Level::fast());
        prop_assert_eq!(decompress(&compressed), data);
    }
}
