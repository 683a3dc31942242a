use std::io::{self, Write};

use log::{debug, info, trace};

use crate::bitstream::bitwriter::BitWriter;
use crate::error::BzError;
use crate::tools::crc::do_stream_crc;

use super::block::Block;
use super::compress_block::compress_block;

/// Block capacity per level step, in RLE1 encoded bytes.
pub const BASE_BLOCK_SIZE: usize = 100_000;
/// Magic number that closes the stream (BCD of sqrt(pi)).
pub const END_MAGIC: u64 = 0x1772_4538_5090;

/// Compression level, 1 to 9. The level sets the block size to `level * 100_000` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Level(u32);

impl Level {
    /// Validate a level. Anything outside 1..=9 is refused rather than clamped.
    pub fn new(level: u32) -> Result<Self, BzError> {
        if (1..=9).contains(&level) {
            Ok(Level(level))
        } else {
            Err(BzError::InvalidLevel(level))
        }
    }

    /// Smallest blocks.
    pub const fn fast() -> Self {
        Level(1)
    }

    /// Largest blocks.
    pub const fn best() -> Self {
        Level(9)
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    /// Block capacity in RLE1 encoded bytes.
    pub fn block_size(&self) -> usize {
        self.0 as usize * BASE_BLOCK_SIZE
    }
}

impl Default for Level {
    fn default() -> Self {
        Level(6)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Nothing written yet, not even the header.
    Unopened,
    HeaderWritten,
    /// Footer written. Only `reset` brings the writer back.
    Closed,
}

/*
    The stream writer owns the bitstream, the block being filled and the stream CRC.

    Input goes through RLE1 into the open block. Each time the block fills up it is handed to
    compress_block for BWT, MTF, RLE2 and huffman coding, the block CRC is folded into the
    stream CRC, and filling starts again with whatever input the full block could not take.
    Close compresses the last partial block and writes the stream footer.
*/

/// Compresses everything written to it into a bzip2 stream on the underlying writer.
///
/// The first failure of the underlying writer is sticky: every later call returns it without
/// touching the writer again. Call [`BzWriter::close`] (or [`BzWriter::finish`]) when done.
/// Dropping the writer writes nothing further, so an unclosed stream is left incomplete.
pub struct BzWriter<W: Write> {
    bw: BitWriter<W>,
    level: Level,
    block: Block,
    stream_crc: u32,
    blocks: u32,
    state: State,
}

impl<W: Write> BzWriter<W> {
    /// Create a writer using the default level.
    pub fn new(writer: W) -> Self {
        Self::with_level(writer, Level::default())
    }

    pub fn with_level(writer: W, level: Level) -> Self {
        BzWriter {
            bw: BitWriter::new(writer),
            level,
            block: Block::new(level.block_size()),
            stream_crc: 0,
            blocks: 0,
            state: State::Unopened,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Compress all of `data`. Full blocks are written out as they complete, the rest waits
    /// in the open block. Returns `data.len()`.
    ///
    /// If the underlying writer fails while a full block goes out, the error is returned and
    /// no count is reported. Part of `data` may already have been taken into blocks by then.
    /// After a failure the stream can only be `reset`.
    pub fn write(&mut self, data: &[u8]) -> Result<usize, BzError> {
        self.check()?;
        self.write_header();

        let mut rest = data;
        while !rest.is_empty() {
            let (used, full) = self.block.write(rest);
            rest = &rest[used..];
            if full {
                self.write_block()?;
            }
        }
        Ok(data.len())
    }

    /// Compress the open block now, even though it is not full, and flush the underlying
    /// writer. Up to seven bits of the stream stay held back until close.
    pub fn flush(&mut self) -> Result<(), BzError> {
        self.check()?;
        self.write_header();
        self.write_block()?;
        self.bw.flush()
    }

    /// Compress the open block and write the stream footer. The underlying writer is flushed
    /// but not closed. A second close fails with [`BzError::Closed`].
    pub fn close(&mut self) -> Result<(), BzError> {
        self.check()?;
        self.write_header();
        self.write_block()?;

        // Stream footer: six bytes of magic, the stream CRC, then pad to a byte boundary.
        trace!("Writing stream footer at {}.", self.bw.loc());
        self.bw.out(48, END_MAGIC);
        self.bw.out32(self.stream_crc);
        self.bw.align();
        self.bw.flush()?;

        self.state = State::Closed;
        info!(
            "Stream closed after {} blocks at {}. CRC is {:#010x}.",
            self.blocks,
            self.bw.loc(),
            self.stream_crc
        );
        Ok(())
    }

    /// Close the stream if needed and give back the underlying writer.
    pub fn finish(mut self) -> Result<W, BzError> {
        if self.state != State::Closed {
            self.close()?;
        }
        Ok(self.bw.into_inner())
    }

    /// Discard all stream state, including a sticky error or a closed stream, and start a new
    /// stream on `writer`. The old writer is returned.
    pub fn reset(&mut self, writer: W) -> W {
        self.block.reset();
        self.stream_crc = 0;
        self.blocks = 0;
        self.state = State::Unopened;
        self.bw.reset(writer)
    }

    /// The first failure seen, if any.
    pub fn err(&self) -> Option<&BzError> {
        self.bw.error()
    }

    pub fn get_ref(&self) -> &W {
        self.bw.get_ref()
    }

    pub fn get_mut(&mut self) -> &mut W {
        self.bw.get_mut()
    }

    /// Give back the underlying writer without closing the stream.
    pub fn into_inner(self) -> W {
        self.bw.into_inner()
    }

    /// Fail with the sticky error, or with `Closed` after close.
    fn check(&self) -> Result<(), BzError> {
        self.bw.result()?;
        if self.state == State::Closed {
            return Err(BzError::Closed);
        }
        Ok(())
    }

    /// The header goes out exactly once, ahead of everything else.
    fn write_header(&mut self) {
        if self.state != State::Unopened {
            return;
        }
        trace!("Writing BZh signature header at {}.", self.bw.loc());
        self.bw
            .write_bytes(&[b'B', b'Z', b'h', b'0' + self.level.get() as u8]);
        self.state = State::HeaderWritten;
    }

    /// Compress the open block (if it holds anything), fold its CRC into the stream CRC and
    /// hand the finished bytes to the underlying writer.
    fn write_block(&mut self) -> Result<(), BzError> {
        if self.block.is_empty() {
            return Ok(());
        }
        self.blocks += 1;
        info!("Starting block {}", self.blocks);

        let block_crc = self.block.crc();
        self.stream_crc = do_stream_crc(self.stream_crc, block_crc);
        debug!(
            "{} bytes in, block crc is {:#010x}, stream crc is {:#010x}",
            self.block.accepted(),
            block_crc,
            self.stream_crc,
        );

        compress_block(&mut self.bw, self.block.finish(), block_crc);
        self.block.reset();
        self.bw.flush()
    }
}

impl<W: Write> Write for BzWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(BzWriter::write(self, buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(BzWriter::flush(self)?)
    }
}

#[cfg(test)]
mod test {
    use super::{BzWriter, Level};
    use crate::error::BzError;

    #[test]
    fn level_test() {
        assert_eq!(Level::default().get(), 6);
        assert_eq!(Level::fast().block_size(), 100_000);
        assert_eq!(Level::best().block_size(), 900_000);
        assert_eq!(Level::new(3).unwrap().block_size(), 300_000);
        assert!(matches!(Level::new(0), Err(BzError::InvalidLevel(0))));
        assert!(matches!(Level::new(10), Err(BzError::InvalidLevel(10))));
    }

    #[test]
    fn empty_stream_test() {
        let mut w = BzWriter::new(vec![]);
        w.close().unwrap();
        assert_eq!(
            w.get_ref(),
            &vec![b'B', b'Z', b'h', b'6', 0x17, 0x72, 0x45, 0x38, 0x50, 0x90, 0, 0, 0, 0]
        );
    }

    #[test]
    fn header_uses_level_test() {
        let w = BzWriter::with_level(vec![], Level::new(9).unwrap());
        let out = w.finish().unwrap();
        assert_eq!(&out[..4], b"BZh9");
    }

    #[test]
    fn header_written_once_test() {
        let mut w = BzWriter::new(vec![]);
        w.write(b"abc").unwrap();
        w.write(b"def").unwrap();
        w.flush().unwrap();
        let out = w.finish().unwrap();
        assert_eq!(out.windows(3).filter(|s| s == b"BZh").count(), 1);
    }

    #[test]
    fn closed_test() {
        let mut w = BzWriter::new(vec![]);
        w.write(b"data").unwrap();
        w.close().unwrap();
        assert!(matches!(w.write(b"more"), Err(BzError::Closed)));
        assert!(matches!(w.flush(), Err(BzError::Closed)));
        assert!(matches!(w.close(), Err(BzError::Closed)));
        assert!(w.err().is_none());
    }

    #[test]
    fn reset_test() {
        let mut w = BzWriter::new(vec![]);
        w.write(b"first stream").unwrap();
        w.close().unwrap();
        let first = w.reset(vec![]);
        w.write(b"first stream").unwrap();
        w.close().unwrap();
        assert_eq!(w.get_ref(), &first);
    }
}
