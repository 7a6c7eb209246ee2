//! # Stream Sources
//!
//! The codec reads through the minimal [`Source`] capability so any storage
//! backend can be adapted from outside the crate. Sinks are plain
//! [`std::io::Write`] implementors.

use std::io::{self, Read, Seek, SeekFrom};

/// A readable, seekable byte stream whose total length is known up front.
pub trait Source {
    /// Read up to `buf.len()` bytes.
    ///
    /// Returning fewer bytes than requested is legal and is treated as a
    /// short read; returning `0` signals end of stream.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Reposition to an absolute byte offset. Offset 0 is the first byte of
    /// the stream.
    fn seek(&mut self, offset: u64) -> io::Result<()>;

    /// Total stream length in bytes.
    fn length(&self) -> u64;
}

impl<S: Source + ?Sized> Source for &mut S {
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (**self).read(buf)
    }

    #[inline]
    fn seek(&mut self, offset: u64) -> io::Result<()> {
        (**self).seek(offset)
    }

    #[inline]
    fn length(&self) -> u64 {
        (**self).length()
    }
}

/// [`Source`] adapter over any `Read + Seek` (files, cursors, seekable
/// object-store readers).
///
/// Each [`Source::read`] maps to exactly one `Read::read` call on the inner
/// reader, so short reads from the backend surface unchanged.
#[derive(Debug)]
pub struct StreamSource<R> {
    inner: R,
    len: u64,
}

impl<R: Read + Seek> StreamSource<R> {
    /// Wrap `inner`, measuring its length by seeking to the end and back to
    /// the start.
    pub fn new(mut inner: R) -> io::Result<Self> {
        let len = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(0))?;
        Ok(Self { inner, len })
    }

    /// Wrap `inner` with a length published by the backend (e.g. object
    /// metadata). Offsets stay absolute; the codec rewinds to 0 before use.
    pub fn with_length(inner: R, len: u64) -> Self {
        Self { inner, len }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read + Seek> Source for StreamSource<R> {
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            match self.inner.read(buf) {
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                other => return other,
            }
        }
    }

    #[inline]
    fn seek(&mut self, offset: u64) -> io::Result<()> {
        self.inner.seek(SeekFrom::Start(offset)).map(|_| ())
    }

    #[inline]
    fn length(&self) -> u64 {
        self.len
    }
}
