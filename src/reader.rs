use std::io::ErrorKind;
use std::ops::Range;

#[cfg(unix)]
use std::os::fd::AsFd;

use crate::cursor::WindowCursor;
use crate::error::{PipeReaderError, Result};
use crate::ring::RingIndex;
#[cfg(unix)]
use crate::source::FdSource;
use crate::source::ByteSource;

/// Window size used by callers that have no better idea (1 MiB).
pub const DEFAULT_CAPACITY: usize = 1 << 20;

/// A [`RingBufferReader`] reading from a duplicated descriptor.
#[cfg(unix)]
pub type PipeReader = RingBufferReader<FdSource>;

pub struct RingBufferReader<S>
where
    S: ByteSource,
{
    source: S,
    buffer: Vec<u8>,
    consumed: u64,
    write_cursor: RingIndex,
}

#[cfg(unix)]
impl RingBufferReader<FdSource> {
    /// Creates a reader on a private, close-on-exec duplicate of `fd`.
    ///
    ///  - `fd` - descriptor of the stream; the caller keeps ownership of it
    ///  - `capacity` - size of the ring buffer, which is also the maximum distance
    ///    a read may lag behind the newest byte pulled from the stream
    ///
    /// If the buffer cannot be allocated, the duplicate is closed again before
    /// the error is returned.
    pub fn open<F: AsFd>(fd: F, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(PipeReaderError::ZeroCapacity);
        }
        let source = FdSource::duplicate(fd).map_err(PipeReaderError::Duplication)?;
        Self::with_source(source, capacity)
    }
}

impl<S> RingBufferReader<S>
where
    S: ByteSource,
{
    /// Creates a reader pulling its data from `source`.
    pub fn with_source(source: S, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(PipeReaderError::ZeroCapacity);
        }
        let buffer = Self::allocate(capacity)?;

        Ok(Self {
            source,
            buffer,
            consumed: 0,
            write_cursor: RingIndex::new(capacity),
        })
    }

    fn allocate(capacity: usize) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(capacity)
            .map_err(|source| PipeReaderError::Allocation { capacity, source })?;
        buffer.resize(capacity, 0);
        Ok(buffer)
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Number of bytes pulled from the source so far, which is also the
    /// offset right behind the newest buffered byte.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Absolute offsets which can currently be served without pulling.
    pub fn window(&self) -> Range<u64> {
        self.consumed.saturating_sub(self.capacity() as u64)..self.consumed
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Reads the bytes at `offset..offset + dst.len()` of the stream into `dst`.
    ///
    /// Requests larger than the capacity are shortened to the capacity, so the
    /// returned count may be smaller than `dst.len()`. Use
    /// [`pread_exact`](Self::pread_exact) if that is not acceptable.
    ///
    /// Pulls from the source until the requested range has been seen. Fails
    /// with [`PipeReaderError::OutOfWindow`] if the range has already been
    /// overwritten, and with [`PipeReaderError::EndOfStream`] or
    /// [`PipeReaderError::Pull`] if the source could not deliver. A failed
    /// pull leaves the reader usable, containing all bytes pulled before.
    pub fn pread(&mut self, dst: &mut [u8], offset: u64) -> Result<usize> {
        log::debug!(
            "core read {} bytes at {} (current offset {})",
            dst.len(),
            offset,
            self.consumed
        );

        let capacity = self.capacity();
        let count = dst.len().min(capacity);
        let end = offset
            .checked_add(count as u64)
            .ok_or(PipeReaderError::OffsetOverflow { offset, count })?;

        self.fill_until(end, offset)?;

        // the fill loop guarantees consumed >= end >= offset
        let distance = self.consumed - offset;
        if distance > capacity as u64 {
            log::warn!(
                "invalid read of {} bytes at {} (current offset {})",
                count,
                offset,
                self.consumed
            );
            return Err(PipeReaderError::OutOfWindow {
                offset,
                count,
                consumed: self.consumed,
                capacity,
            });
        }

        let start = self.write_cursor.behind(distance as usize);
        let head = count.min(capacity - start);
        dst[..head].copy_from_slice(&self.buffer[start..start + head]);
        dst[head..count].copy_from_slice(&self.buffer[..count - head]);

        Ok(count)
    }

    /// Like [`pread`](Self::pread), but fails with
    /// [`PipeReaderError::ShortRead`] unless all of `dst` could be filled.
    pub fn pread_exact(&mut self, dst: &mut [u8], offset: u64) -> Result<()> {
        let actual = self.pread(dst, offset)?;
        if actual < dst.len() {
            return Err(PipeReaderError::ShortRead {
                expected: dst.len(),
                actual,
            });
        }
        Ok(())
    }

    /// Returns a [`Read`](std::io::Read) + [`Seek`](std::io::Seek) view
    /// positioned at offset 0.
    pub fn cursor(&mut self) -> WindowCursor<'_, S> {
        WindowCursor::new(self)
    }

    /// Closes the source and frees the buffer. The status of closing the source
    /// is returned as is.
    pub fn close(self) -> std::io::Result<()> {
        let Self { source, buffer, .. } = self;
        drop(buffer);
        source.close()
    }

    fn fill_until(&mut self, end: u64, offset: u64) -> Result<()> {
        while self.consumed < end {
            let needed = end - self.consumed;
            let pos = self.write_cursor.pos();
            let space = self.write_cursor.contiguous_free();
            let chunk = needed.min(space as u64) as usize;

            let pulled = self
                .source
                .pull(&mut self.buffer[pos..pos + chunk])
                .map_err(PipeReaderError::Pull)?;
            if pulled > chunk {
                return Err(PipeReaderError::Pull(std::io::Error::new(
                    ErrorKind::InvalidData,
                    format!("source reported {} bytes for a pull of {}", pulled, chunk),
                )));
            }
            if pulled == 0 {
                return Err(PipeReaderError::EndOfStream {
                    offset,
                    consumed: self.consumed,
                });
            }

            self.consumed += pulled as u64;
            self.write_cursor.advance(pulled);
        }
        Ok(())
    }
}
