use std::io::Write;

use crate::error::BzError;

/// Completed bytes are handed to the sink once this many are waiting.
const OUTPUT_CHUNK: usize = 64 * 1024;

/// Writes a bitstream for output. Values of any width up to 64 bits are packed most
/// significant bit first. Completed bytes are staged in an output buffer and handed to the
/// sink by `flush()`, at most seven bits are ever held back in the queue.
///
/// The first sink failure is kept. Every later call is then a no-op and `error()` reports it.
pub struct BitWriter<W: Write> {
    /// Handle to the output stream
    writer: W,
    /// Output buffer of completed bytes not yet handed to the writer.
    output: Vec<u8>,
    /// Private queue to hold bits that are waiting to be put as bytes into the output buffer.
    queue: u64,
    /// Count of valid bits in the queue, always less than 8 between calls.
    q_bits: u8,
    /// Total bytes handed to the writer, for position reports.
    written: u64,
    /// First failure seen, if any.
    error: Option<BzError>,
}

impl<W: Write> BitWriter<W> {
    /// Create a new BitWriter around the sink.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            output: Vec::with_capacity(OUTPUT_CHUNK + 8),
            queue: 0,
            q_bits: 0,
            written: 0,
            error: None,
        }
    }

    /// Append the low `bits` bits of `data`, most significant first.
    ///
    /// Panics if `bits` is more than 64.
    pub fn out(&mut self, bits: u8, data: u64) {
        assert!(bits <= 64, "cannot write {} bits at once", bits);
        if self.error.is_some() || bits == 0 {
            return;
        }
        // The queue holds up to 7 bits, so anything wider than 56 goes in two pieces.
        if bits > 56 {
            self.out(bits - 32, data >> 32);
            self.out(32, data & 0xffff_ffff);
            return;
        }
        self.queue = (self.queue << bits) | (data & ((1_u64 << bits) - 1));
        self.q_bits += bits;
        self.push_queue();
    }

    /// Put a byte on the stream.
    pub fn out8(&mut self, data: u8) {
        self.out(8, data as u64)
    }

    /// Put a 16 bit word on the stream.
    pub fn out16(&mut self, data: u16) {
        self.out(16, data as u64)
    }

    /// Put a 32 bit word on the stream.
    pub fn out32(&mut self, data: u32) {
        self.out(32, data as u64)
    }

    /// Write whole bytes. Only legal on a byte boundary.
    pub fn write_bytes(&mut self, data: &[u8]) {
        if self.error.is_some() {
            return;
        }
        if self.q_bits != 0 {
            self.error = Some(BzError::UnalignedWrite(self.q_bits));
            return;
        }
        self.output.extend_from_slice(data);
        if self.output.len() >= OUTPUT_CHUNK {
            self.drain();
        }
    }

    /// Number of bits (0-7) waiting for the rest of their byte.
    pub fn buffered_bits(&self) -> u8 {
        self.q_bits
    }

    /// Pad the last partial byte with zero bits. Only legal at the end of the stream.
    pub fn align(&mut self) {
        if self.q_bits > 0 {
            let pad = 8 - self.q_bits;
            self.out(pad, 0);
        }
    }

    /// Hand every completed byte to the writer and flush it. Bits short of a byte stay queued.
    pub fn flush(&mut self) -> Result<(), BzError> {
        self.drain();
        if self.error.is_none() {
            if let Err(e) = self.writer.flush() {
                self.error = Some(e.into());
            }
        }
        self.result()
    }

    /// The first failure seen, if any.
    pub fn error(&self) -> Option<&BzError> {
        self.error.as_ref()
    }

    /// `Ok` unless a failure has been seen.
    pub fn result(&self) -> Result<(), BzError> {
        match &self.error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    /// Discard all bit state and switch to a new writer, returning the old one.
    pub fn reset(&mut self, writer: W) -> W {
        self.output.clear();
        self.queue = 0;
        self.q_bits = 0;
        self.written = 0;
        self.error = None;
        std::mem::replace(&mut self.writer, writer)
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Give back the writer. Staged bytes that were never flushed are dropped.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Debugging function to return the number of bytes.bits output so far
    pub fn loc(&self) -> String {
        let bytes = self.written + self.output.len() as u64;
        format!("[{}.{}]", bytes, self.q_bits)
    }

    /// Move all full bytes from the queue to the output buffer.
    fn push_queue(&mut self) {
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte);
            self.q_bits -= 8;
        }
        self.queue &= (1_u64 << self.q_bits) - 1;
        if self.output.len() >= OUTPUT_CHUNK {
            self.drain();
        }
    }

    /// Write out the staged bytes, keeping the first failure.
    fn drain(&mut self) {
        if self.error.is_some() || self.output.is_empty() {
            return;
        }
        match self.writer.write_all(&self.output) {
            Ok(()) => {
                self.written += self.output.len() as u64;
                self.output.clear();
            }
            Err(e) => self.error = Some(e.into()),
        }
    }
}
