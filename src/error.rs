//! Errors reported by the compressor.
//!
//! Sink failures are remembered by the writers and handed back on every later call, so the
//! error type must be cheap to clone. The underlying `std::io::Error` is therefore kept behind
//! an `Arc`.
use std::io;
use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum BzError {
    /// Compression level outside 1..=9.
    #[error("invalid compression level {0}, expected 1-9")]
    InvalidLevel(u32),
    /// The underlying sink failed. Once seen, it is returned by every later call.
    #[error("i/o error: {0}")]
    Io(Arc<io::Error>),
    /// The stream was closed and has not been reset.
    #[error("stream already closed")]
    Closed,
    /// Raw bytes were written while the bit writer still held a partial byte.
    #[error("raw byte write with {0} unfinished bits")]
    UnalignedWrite(u8),
}

impl From<io::Error> for BzError {
    fn from(err: io::Error) -> Self {
        BzError::Io(Arc::new(err))
    }
}

impl From<BzError> for io::Error {
    fn from(err: BzError) -> Self {
        match err {
            BzError::Io(inner) => io::Error::new(inner.kind(), BzError::Io(inner)),
            BzError::Closed => io::Error::new(io::ErrorKind::BrokenPipe, err),
            other => io::Error::new(io::ErrorKind::InvalidInput, other),
        }
    }
}

#[cfg(test)]
mod test {
    use super::BzError;
    use std::io;

    #[test]
    fn io_error_keeps_kind_test() {
        let err: BzError = io::Error::new(io::ErrorKind::WriteZero, "full").into();
        let back: io::Error = err.clone().into();
        assert_eq!(back.kind(), io::ErrorKind::WriteZero);
        assert!(matches!(err, BzError::Io(_)));
    }

    #[test]
    fn closed_maps_to_broken_pipe_test() {
        let back: io::Error = BzError::Closed.into();
        assert_eq!(back.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(BzError::InvalidLevel(12).to_string(), "invalid compression level 12, expected 1-9");
    }
}
