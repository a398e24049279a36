use std::io::{ErrorKind, Read, Result};

#[cfg(unix)]
use std::fs::File;
#[cfg(unix)]
use std::os::fd::{AsFd, BorrowedFd, IntoRawFd};

/// Something that can deliver the bytes of a stream strictly in order.
///
/// [`RingBufferReader`](crate::RingBufferReader) pulls from its source only
/// forward and never asks for more bytes than its buffer can hold.
pub trait ByteSource {
    /// Pulls up to `buf.len()` bytes into `buf` and returns the number of
    /// bytes pulled. `Ok(0)` means the stream is exhausted.
    fn pull(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Releases the source and reports whether that succeeded.
    fn close(self) -> Result<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

/// The default source: a privately owned duplicate of a descriptor, read
/// with blocking `read(2)` calls.
#[cfg(unix)]
#[derive(Debug)]
pub struct FdSource {
    file: File,
}

#[cfg(unix)]
impl FdSource {
    /// Duplicates `fd`. The duplicate has close-on-exec set and is owned by
    /// the returned source alone.
    pub fn duplicate<F: AsFd>(fd: F) -> Result<Self> {
        let owned = fd.as_fd().try_clone_to_owned()?;
        Ok(Self {
            file: File::from(owned),
        })
    }
}

#[cfg(unix)]
impl AsFd for FdSource {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.file.as_fd()
    }
}

#[cfg(unix)]
impl ByteSource for FdSource {
    fn pull(&mut self, buf: &mut [u8]) -> Result<usize> {
        loop {
            match self.file.read(buf) {
                Err(why) if why.kind() == ErrorKind::Interrupted => continue,
                result => return result,
            }
        }
    }

    fn close(self) -> Result<()> {
        let fd = self.file.into_raw_fd();

        // SAFETY: `fd` came out of `into_raw_fd`, so nobody else closes it.
        if unsafe { libc::close(fd) } == 0 {
            Ok(())
        } else {
            Err(std::io::Error::last_os_error())
        }
    }
}

/// Adapts any [`Read`] object into a [`ByteSource`].
#[derive(Debug)]
pub struct ReadSource<R> {
    reader: R,
}

impl<R> ReadSource<R>
where
    R: Read,
{
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R> ByteSource for ReadSource<R>
where
    R: Read,
{
    fn pull(&mut self, buf: &mut [u8]) -> Result<usize> {
        loop {
            match self.reader.read(buf) {
                Err(why) if why.kind() == ErrorKind::Interrupted => continue,
                result => return result,
            }
        }
    }
}
