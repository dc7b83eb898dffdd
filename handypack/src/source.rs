//! Byte sources consumed by the decoders. A source hands out bytes strictly in the order they were written and never
//! rewinds. Sinks need no abstraction of their own: every `std::io::Write` is one.

use crate::error::DecodeError;
use std::io::{ErrorKind, Read};

/// Upper bound for a single buffer growth step when the source cannot tell how much is left.
const CHUNK: usize = 8 * 1024;

pub trait Source {

    /// Fills `buf` completely or fails with `DecodeError::Underflow`.
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), DecodeError>;

    /// The number of bytes left, if the source knows it.
    fn remaining(&self) -> Option<usize>;

    /// The number of bytes consumed so far.
    fn position(&self) -> usize;

    /// Fails early if the source knows it cannot supply `needed` more bytes.
    #[inline]
    fn ensure(&self, needed: usize) -> Result<(), DecodeError> {
        match self.remaining() {
            Some(remaining) if remaining < needed => Err(DecodeError::Underflow { needed, remaining }),
            _ => Ok(()),
        }
    }

    #[inline]
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut buf = [0u8; N];
        self.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Reads `len` bytes into a fresh vector. The vector grows in bounded steps so that a bogus length can not
    /// trigger a huge allocation before the source runs dry.
    fn read_vec(&mut self, len: usize) -> Result<Vec<u8>, DecodeError> {
        self.ensure(len)?;
        let mut out = Vec::with_capacity(len.min(CHUNK));
        let mut chunk = [0u8; CHUNK];
        let mut left = len;
        while left > 0 {
            let n = left.min(CHUNK);
            self.read_exact(&mut chunk[..n])?;
            out.extend_from_slice(&chunk[..n]);
            left -= n;
        }
        Ok(out)
    }

}

impl<S: Source> Source for &mut S {
    #[inline]
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), DecodeError> {
        (**self).read_exact(buf)
    }

    #[inline]
    fn remaining(&self) -> Option<usize> {
        (**self).remaining()
    }

    #[inline]
    fn position(&self) -> usize {
        (**self).position()
    }

    #[inline]
    fn read_vec(&mut self, len: usize) -> Result<Vec<u8>, DecodeError> {
        (**self).read_vec(len)
    }
}

/// Reads from a borrowed buffer without copying it.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {

    pub fn new<B: ?Sized + AsRef<[u8]>>(buf: &'a B) -> Self {
        Self { buf: buf.as_ref(), pos: 0 }
    }

    /// Borrows the next `len` bytes straight out of the underlying buffer.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let buf = self.buf;
        let rest = &buf[self.pos..];
        if rest.len() < len {
            Err(DecodeError::Underflow { needed: len, remaining: rest.len() })
        } else {
            self.pos += len;
            Ok(&rest[..len])
        }
    }

    /// The bytes not consumed yet.
    pub fn rest(&self) -> &'a [u8] {
        let buf = self.buf;
        &buf[self.pos..]
    }

    pub fn is_empty(&self) -> bool {
        self.pos == self.buf.len()
    }

}

impl<'a> Source for SliceSource<'a> {

    #[inline]
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), DecodeError> {
        buf.copy_from_slice(self.take(buf.len())?);
        Ok(())
    }

    #[inline]
    fn remaining(&self) -> Option<usize> {
        Some(self.buf.len() - self.pos)
    }

    #[inline]
    fn position(&self) -> usize {
        self.pos
    }

    fn read_vec(&mut self, len: usize) -> Result<Vec<u8>, DecodeError> {
        self.take(len).map(<[u8]>::to_vec)
    }

}

/// Adapts any `std::io::Read`. The remaining length is unknown, so count prefixes can only be checked as the bytes
/// actually arrive.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    pos: usize,
}

impl<R: Read> ReaderSource<R> {

    pub fn new(reader: R) -> Self {
        Self { reader, pos: 0 }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

}

impl<R: Read> Source for ReaderSource<R> {

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), DecodeError> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => {
                    self.pos += filled;
                    return Err(DecodeError::Underflow { needed: buf.len(), remaining: filled });
                },
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.pos += filled;
                    return Err(DecodeError::Io(e));
                },
            }
        }
        self.pos += filled;
        Ok(())
    }

    #[inline]
    fn remaining(&self) -> Option<usize> {
        None
    }

    #[inline]
    fn position(&self) -> usize {
        self.pos
    }

}

#[cfg(test)]
mod tests {
    use super::{ReaderSource, SliceSource, Source};
    use crate::error::DecodeError;

    #[test]
    fn slice_is_sequential() {
        let data = [1u8, 2, 3, 4, 5];
        let mut src = SliceSource::new(&data);
        assert_eq!(src.take(2).unwrap(), &[1, 2]);
        assert_eq!(src.read_array::<2>().unwrap(), [3, 4]);
        assert_eq!(src.position(), 4);
        assert_eq!(src.remaining(), Some(1));
        assert_eq!(src.rest(), &[5]);
        assert!(!src.is_empty());
    }

    #[test]
    fn slice_underflow_consumes_nothing() {
        let data = [1u8, 2];
        let mut src = SliceSource::new(&data);
        let err = src.read_array::<4>().unwrap_err();
        assert!(matches!(err, DecodeError::Underflow { needed: 4, remaining: 2 }));
        assert_eq!(src.position(), 0);
    }

    #[test]
    fn read_vec_rejects_oversized_lengths() {
        let data = [0u8; 16];
        let mut src = SliceSource::new(&data);
        assert!(matches!(src.read_vec(usize::MAX), Err(DecodeError::Underflow { remaining: 16, .. })));
        assert_eq!(src.read_vec(16).unwrap(), vec![0u8; 16]);
        assert!(src.is_empty());
    }

    #[test]
    fn reader_reports_eof_as_underflow() {
        let data: &[u8] = &[9, 8, 7];
        let mut src = ReaderSource::new(data);
        assert_eq!(src.remaining(), None);
        assert_eq!(src.read_array::<2>().unwrap(), [9, 8]);
        let err = src.read_array::<2>().unwrap_err();
        assert!(matches!(err, DecodeError::Underflow { needed: 2, remaining: 1 }));
    }

    /// Hands out its data in two byte pieces, then fails.
    struct Broken<'a>(&'a [u8]);

    impl std::io::Read for Broken<'_> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.0.is_empty() {
                return Err(std::io::Error::new(std::io::ErrorKind::Other, "line cut"));
            }
            let n = buf.len().min(2).min(self.0.len());
            buf[..n].copy_from_slice(&self.0[..n]);
            self.0 = &self.0[n..];
            Ok(n)
        }
    }

    #[test]
    fn reader_io_error_keeps_position() {
        let mut src = ReaderSource::new(Broken(&[1, 2, 3]));
        let err = src.read_array::<8>().unwrap_err();
        assert!(matches!(err, DecodeError::Io(_)));
        assert_eq!(src.position(), 3);
    }

    #[test]
    fn reader_read_vec_grows_in_chunks() {
        let data = vec![0xabu8; 20_000];
        let mut src = ReaderSource::new(data.as_slice());
        assert_eq!(src.read_vec(20_000).unwrap(), data);
        assert_eq!(src.position(), 20_000);
        let mut src = ReaderSource::new(data.as_slice());
        assert!(src.read_vec(usize::MAX).unwrap_err().is_underflow());
    }

    #[test]
    fn mut_ref_delegates() {
        let data = [1u8, 2, 3];
        let mut inner = SliceSource::new(&data);
        fn first<S: Source>(mut src: S) -> (u8, Option<usize>) {
            (src.read_array::<1>().unwrap()[0], src.remaining())
        }
        assert_eq!(first(&mut inner), (1, Some(2)));
        assert_eq!(inner.position(), 1);
    }
}
