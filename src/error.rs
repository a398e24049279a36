use std::collections::TryReserveError;
use std::io::{Error, ErrorKind};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipeReaderError>;

#[derive(Error, Debug)]
pub enum PipeReaderError {
    #[error("unable to duplicate source descriptor: {0}")]
    Duplication(#[source] Error),

    #[error("unable to allocate a ring buffer of {capacity} bytes")]
    Allocation {
        capacity: usize,
        #[source]
        source: TryReserveError,
    },

    #[error("ring buffer capacity must not be zero")]
    ZeroCapacity,

    #[error("reading from source failed: {0}")]
    Pull(#[source] Error),

    /// The source reported end of stream before the requested range was available.
    #[error("end of stream reached while reading at {offset} (current offset {consumed})")]
    EndOfStream { offset: u64, consumed: u64 },

    /// The requested range has already been overwritten by newer data.
    #[error(
        "invalid read of {count} bytes at {offset} \
         (current offset {consumed}, window size {capacity})"
    )]
    OutOfWindow {
        offset: u64,
        count: usize,
        consumed: u64,
        capacity: usize,
    },

    #[error("read of {count} bytes at {offset} exceeds the addressable range")]
    OffsetOverflow { offset: u64, count: usize },

    #[error("expected {expected} bytes, but only {actual} could be served")]
    ShortRead { expected: usize, actual: usize },
}

impl PipeReaderError {
    /// `true` if the byte source failed or ran dry while filling the buffer.
    pub fn is_pull_failure(&self) -> bool {
        matches!(self, Self::Pull(_) | Self::EndOfStream { .. })
    }
}

impl From<PipeReaderError> for Error {
    fn from(err: PipeReaderError) -> Self {
        match err {
            PipeReaderError::Duplication(why) | PipeReaderError::Pull(why) => why,
            PipeReaderError::Allocation { .. } => Error::new(ErrorKind::OutOfMemory, err),
            PipeReaderError::EndOfStream { .. } | PipeReaderError::ShortRead { .. } => {
                Error::new(ErrorKind::UnexpectedEof, err)
            }
            PipeReaderError::ZeroCapacity | PipeReaderError::OffsetOverflow { .. } => {
                Error::new(ErrorKind::InvalidInput, err)
            }
            PipeReaderError::OutOfWindow { .. } => Error::new(ErrorKind::InvalidData, err),
        }
    }
}
