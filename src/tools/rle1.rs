//! Run-Length-Encoding phase 1 for BZIP2.
//!
//! Runs of identical bytes are written as up to four literal bytes. Once four have been seen,
//! a fifth byte records how many more repeats (0-255) follow, so one encoded unit covers a run
//! of 4 to 259 bytes. Longer runs are written as several units.
//!
//! The encoder works incrementally: the current run is carried in a [`Run`] between calls so a
//! run that is split across several writes is still encoded as one run. The count byte of an
//! open run is only written when the run ends, but space for it is reserved as soon as the
//! fourth byte arrives. That reservation is what keeps a full block from ending on four
//! identical bytes with no count byte after them.

/// Longest run covered by a single encoded unit (four literals plus a count of 255).
pub const MAX_RUN: u16 = 4 + 255;

/// The run currently being encoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Run {
    /// Byte being repeated.
    pub byte: u8,
    /// Bytes seen so far in the current unit (0 when no run is open).
    pub len: u16,
}

impl Run {
    /// True when a count byte is owed for this run.
    pub fn needs_count(&self) -> bool {
        self.len >= 4
    }

    /// End the current run, writing its count byte if one is owed.
    pub fn close(&mut self, out: &mut Vec<u8>) {
        if self.needs_count() {
            out.push((self.len - 4) as u8);
        }
        self.len = 0;
    }
}

/// Encoded length of `out` once the open run is closed.
pub fn committed_len(out: &[u8], run: &Run) -> usize {
    out.len() + run.needs_count() as usize
}

/// RLE1 encode as much of `input` as fits, appending to `out`. The encoded size (including a
/// count byte still owed by the open run) never exceeds `limit`. Returns how many bytes of
/// `input` were consumed.
pub fn rle1_encode_into(input: &[u8], out: &mut Vec<u8>, run: &mut Run, limit: usize) -> usize {
    for (consumed, &byte) in input.iter().enumerate() {
        let extends = run.len > 0 && byte == run.byte && run.len < MAX_RUN;
        // Extra encoded bytes this input byte costs.
        let cost = match (extends, run.len) {
            // Second or third byte of a run is another literal.
            (true, 1..=2) => 1,
            // The fourth literal also reserves the count byte.
            (true, 3) => 2,
            // Beyond four, only the (already reserved) count changes.
            (true, _) => 0,
            // A new run starts with one literal. Closing the old one writes its reserved count.
            (false, _) => 1,
        };
        if committed_len(out, run) + cost > limit {
            return consumed;
        }

        if extends {
            if run.len < 4 {
                out.push(byte);
            }
            run.len += 1;
        } else {
            run.close(out);
            out.push(byte);
            *run = Run { byte, len: 1 };
        }
    }
    input.len()
}

/// Encode a complete buffer in one go.
pub fn rle1_encode(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len() + input.len() / 4 + 1);
    let mut run = Run::default();
    rle1_encode_into(input, &mut out, &mut run, usize::MAX);
    run.close(&mut out);
    out
}
