use std::io::{Error, ErrorKind, Read, Result, Seek, SeekFrom};

use crate::error::PipeReaderError;
use crate::reader::RingBufferReader;
use crate::source::ByteSource;

/// A [`Read`] + [`Seek`] view of a [`RingBufferReader`].
///
/// Seeking only moves the position; data is pulled when reading. Seeking
/// backward works as long as the target is still inside the window, which is
/// checked at the next read.
pub struct WindowCursor<'r, S>
where
    S: ByteSource,
{
    reader: &'r mut RingBufferReader<S>,
    position: u64,
}

impl<'r, S> WindowCursor<'r, S>
where
    S: ByteSource,
{
    pub(crate) fn new(reader: &'r mut RingBufferReader<S>) -> Self {
        Self {
            reader,
            position: 0,
        }
    }

    pub fn position(&self) -> u64 {
        self.position
    }
}

impl<S> Read for WindowCursor<'_, S>
where
    S: ByteSource,
{
    fn read(&mut self, dst: &mut [u8]) -> Result<usize> {
        if dst.is_empty() {
            return Ok(0);
        }

        let bytes = match self.reader.pread(dst, self.position) {
            Ok(bytes) => bytes,

            // serve what the stream delivered before it ended
            Err(PipeReaderError::EndOfStream { consumed, .. }) => {
                let available = consumed.saturating_sub(self.position);
                if available == 0 {
                    return Ok(0);
                }
                let len = dst.len().min(available as usize);
                self.reader.pread(&mut dst[..len], self.position)?
            }
            Err(why) => return Err(why.into()),
        };

        self.position += bytes as u64;
        Ok(bytes)
    }
}

impl<S> Seek for WindowCursor<'_, S>
where
    S: ByteSource,
{
    fn seek(&mut self, seek_from: SeekFrom) -> Result<u64> {
        let position = match seek_from {
            SeekFrom::Start(pos) => Some(pos),
            SeekFrom::Current(delta) => {
                if delta < 0 {
                    self.position.checked_sub(delta.unsigned_abs())
                } else {
                    self.position.checked_add(delta as u64)
                }
            }

            // We don't know where the end of a stream is
            SeekFrom::End(_) => {
                return Err(Error::new(
                    ErrorKind::Unsupported,
                    "cannot seek relative to the end of a stream",
                ))
            }
        };

        self.position = position.ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidInput,
                "invalid seek to a negative or overflowing position",
            )
        })?;
        Ok(self.position)
    }
}

#[cfg(test)]
mod tests {
    use crate::source::ReadSource;
    use crate::RingBufferReader;
    use std::io::{Cursor, ErrorKind, Read, Seek, SeekFrom};

    fn stream() -> Vec<u8> {
        (0..=255).collect()
    }

    fn reader(capacity: usize) -> RingBufferReader<ReadSource<Cursor<Vec<u8>>>> {
        RingBufferReader::with_source(ReadSource::new(Cursor::new(stream())), capacity).unwrap()
    }

    #[test]
    fn seek_backward_inside_window() {
        let mut reader = reader(16);
        let mut cursor = reader.cursor();
        let mut buffer = [0u8; 7];

        cursor.read_exact(&mut buffer).unwrap();
        assert_eq!(&buffer, &stream()[0..7]);

        assert_eq!(cursor.seek(SeekFrom::Current(-4)).unwrap(), 3);
        cursor.read_exact(&mut buffer).unwrap();
        assert_eq!(&buffer, &stream()[3..10]);
        assert_eq!(cursor.position(), 10);
    }

    #[test]
    fn seek_before_window_fails_on_read() {
        let mut reader = reader(16);
        let mut cursor = reader.cursor();
        let mut buffer = [0u8; 7];

        cursor.seek(SeekFrom::Start(96)).unwrap();
        cursor.read_exact(&mut buffer).unwrap();
        assert_eq!(&buffer, &stream()[96..103]);

        cursor.seek(SeekFrom::Start(80)).unwrap();
        let err = cursor.read(&mut buffer).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);

        assert_eq!(
            cursor.seek(SeekFrom::Current(-81)).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            cursor.seek(SeekFrom::End(0)).unwrap_err().kind(),
            ErrorKind::Unsupported
        );
    }

    #[test]
    fn read_to_end_returns_the_whole_stream() {
        let mut reader = reader(16);
        let mut cursor = reader.cursor();
        cursor.seek(SeekFrom::Start(10)).unwrap();

        let mut rest = Vec::new();
        assert_eq!(cursor.read_to_end(&mut rest).unwrap(), 246);
        assert_eq!(&rest[..], &stream()[10..]);
        assert_eq!(cursor.read(&mut [0u8; 4]).unwrap(), 0);
    }

    #[test]
    fn short_tail_is_served_before_end_of_stream() {
        let mut reader = reader(16);
        let mut cursor = reader.cursor();
        let mut buffer = [0u8; 16];

        cursor.seek(SeekFrom::Start(250)).unwrap();
        assert_eq!(cursor.read(&mut buffer).unwrap(), 6);
        assert_eq!(&buffer[..6], &stream()[250..]);
        assert_eq!(cursor.read(&mut buffer).unwrap(), 0);
    }
}
