//! This crate provides `pread`-like random access to a strictly sequential stream, such as a
//! pipe delivering a core dump. Parsers of binary formats (like ELF cores) expect to read
//! arbitrary offsets, possibly more than once; a pipe can only be read once, forward.
//! [`RingBufferReader`] consumes the stream exactly once and keeps the most recent bytes in a
//! ring buffer of fixed size, so that reads may look back as far as the buffer reaches.
//!
//! Random access is limited by the following constraints:
//!
//!  - Only `capacity` bytes are kept (defined by the `capacity` parameter of
//!    [`RingBufferReader::open()`] or [`RingBufferReader::with_source()`])
//!  - A single read returns at most `capacity` bytes; longer requests are shortened
//!  - Reading backward is allowed only while the targeted range is within the buffer
//!
//! Every read is logged at `debug` level using the [`log`](https://crates.io/crates/log) facade,
//! reads outside of the buffer at `warn` level.
//!
//! # Reading backward as far as there are data in the buffer
//! ```rust
//! use std::io::Cursor;
//! use ring_pipe_reader::{RingBufferReader, ReadSource};
//! # let mut arr: [u8; 256] = [0; 256];
//! # for (elem, val) in arr.iter_mut().zip(0..=255) { *elem = val; }
//! let source = ReadSource::new(Cursor::new(&arr)); // delivers the values \x00 .. \xff
//! let mut reader = RingBufferReader::with_source(source, 16).unwrap();
//!
//! let mut buffer: [u8; 7] = [0; 7];
//!
//! assert_eq!(reader.pread(&mut buffer, 0).unwrap(), buffer.len());
//! assert_eq!(&buffer, &arr[0..7]);
//!
//! /* reading the same range again, without touching the stream */
//! assert_eq!(reader.pread(&mut buffer, 3).unwrap(), 7);
//! assert_eq!(&buffer, &arr[3..10]);
//! ```
//!
//! # Reading backward is not possible if the range has been overwritten
//! ```rust
//! # use std::io::Cursor;
//! # use ring_pipe_reader::{PipeReaderError, RingBufferReader, ReadSource};
//! # let mut arr: [u8; 256] = [0; 256];
//! # for (elem, val) in arr.iter_mut().zip(0..=255) { *elem = val; }
//! let source = ReadSource::new(Cursor::new(&arr));
//! let mut reader = RingBufferReader::with_source(source, 16).unwrap();
//!
//! let mut buffer: [u8; 7] = [0; 7];
//! assert!(reader.pread(&mut buffer, 96).is_ok());
//! assert!(reader.pread(&mut buffer, 96 + 7 - 16).is_ok());
//! assert!(matches!(
//!     reader.pread(&mut buffer, 95 + 7 - 16),
//!     Err(PipeReaderError::OutOfWindow { .. })
//! ));
//! ```
//!
//! # Reading from a pipe, with a `Read` + `Seek` view for stream based parsers
//! ```rust,no_run
//! use std::io::{Read, Seek, SeekFrom};
//! use ring_pipe_reader::{PipeReader, DEFAULT_CAPACITY};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let stdin = std::io::stdin();
//! let mut reader = PipeReader::open(&stdin, DEFAULT_CAPACITY)?;
//!
//! let mut ident = [0u8; 16];
//! reader.pread_exact(&mut ident, 0)?;
//!
//! let mut cursor = reader.cursor();
//! cursor.seek(SeekFrom::Start(64))?;
//! let mut program_header = [0u8; 56];
//! cursor.read_exact(&mut program_header)?;
//!
//! reader.close()?;
//! # Ok(())
//! # }
//! ```
mod cursor;
mod error;
mod reader;
mod ring;
mod source;

pub use crate::cursor::WindowCursor;
pub use crate::error::{PipeReaderError, Result};
#[cfg(unix)]
pub use crate::reader::PipeReader;
pub use crate::reader::{RingBufferReader, DEFAULT_CAPACITY};
#[cfg(unix)]
pub use crate::source::FdSource;
pub use crate::source::{ByteSource, ReadSource};
