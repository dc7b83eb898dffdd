//! The two capabilities every packable shape implements. Dispatch is purely static: the type a value is decoded as
//! decides how many bytes are read, nothing on the wire identifies the type. Decoding bytes that were produced by a
//! different type is therefore not detected, it merely yields a well-typed but meaningless value.

use crate::error::{DecodeError, EncodeError};
use crate::source::Source;
use std::convert::TryFrom;
use std::io::Write;
use std::mem::size_of;

/// Width in bytes of every string and container count prefix.
pub const LEN_SIZE: usize = size_of::<u32>();

/// Never preallocate more than this many bytes of container storage ahead of the data actually arriving.
const PREALLOC_BYTES: usize = 1 << 20;

pub trait Dump {
    /// Returns the number of written bytes
    fn dump<W: Write + ?Sized>(&self, w: &mut W) -> Result<usize, EncodeError>;
}

pub trait Load {

    /// The smallest number of bytes a single value of this type occupies on wire. Count prefixes are checked
    /// against it before anything gets allocated.
    const MIN_WIRE_SIZE: usize = 0;

    /// Decodes into `self`, replacing whatever it held before.
    fn load<S: Source>(&mut self, src: &mut S) -> Result<(), DecodeError>;

    fn unpack<S: Source>(src: &mut S) -> Result<Self, DecodeError> where Self: Default {
        let mut value = Self::default();
        value.load(src)?;
        Ok(value)
    }

}

/// `MIN_WIRE_SIZE` of a field, named through a projection from its record so the field type can be inferred.
#[doc(hidden)]
pub const fn field_wire_size<R: ?Sized, F: Load>(_field: fn(&R) -> &F) -> usize {
    F::MIN_WIRE_SIZE
}

/// Writes a string or container count prefix. Fails if `len` does not fit the prefix.
#[inline]
pub fn dump_len<W: Write + ?Sized>(len: usize, w: &mut W) -> Result<usize, EncodeError> {
    let prefix = u32::try_from(len).map_err(|_| EncodeError::Length(len))?;
    w.write_all(&prefix.to_le_bytes())?;
    Ok(LEN_SIZE)
}

/// Reads a count prefix and rejects it right away if the source can not possibly hold `len` elements of at least
/// `min_size` bytes each.
#[inline]
pub(crate) fn load_len<S: Source>(src: &mut S, min_size: usize) -> Result<usize, DecodeError> {
    let len = u32::from_le_bytes(src.read_array()?) as usize;
    if let Err(e) = src.ensure(len.saturating_mul(min_size)) {
        log::debug!("rejecting count prefix {} at position {}: {}", len, src.position(), e);
        return Err(e);
    }
    Ok(len)
}

/// How many elements of `T` to reserve up front for a container announced to hold `len` of them.
#[inline]
pub(crate) fn capacity<T, S: Source>(src: &S, len: usize, min_size: usize) -> usize {
    let by_wire = src.remaining().map_or(usize::MAX, |r| r / min_size.max(1));
    let by_mem = PREALLOC_BYTES / size_of::<T>().max(1);
    len.min(by_wire).min(by_mem)
}

#[cfg(test)]
mod tests {
    use super::{capacity, dump_len, load_len, LEN_SIZE};
    use crate::error::DecodeError;
    use crate::source::{ReaderSource, SliceSource};

    #[test]
    fn len_prefix_is_little_endian_u32() {
        let mut buf = Vec::new();
        assert_eq!(dump_len(0x0102_0304, &mut buf).unwrap(), LEN_SIZE);
        assert_eq!(buf, [0x04, 0x03, 0x02, 0x01]);
        assert_eq!(load_len(&mut SliceSource::new(&buf), 0).unwrap(), 0x0102_0304);
    }

    #[test]
    fn oversized_count_is_underflow() {
        let buf = [0xff, 0xff, 0xff, 0xff, 0, 0, 0, 0];
        let err = load_len(&mut SliceSource::new(&buf), 4).unwrap_err();
        assert!(matches!(err, DecodeError::Underflow { needed, remaining: 4 } if needed == 0xffff_ffff * 4));
    }

    #[test]
    fn capacity_is_bounded() {
        let buf = [0u8; 64];
        let src = SliceSource::new(&buf);
        assert_eq!(capacity::<u64, _>(&src, 1000, 8), 8);
        assert_eq!(capacity::<u64, _>(&src, 3, 8), 3);
        let reader = ReaderSource::new(&buf[..]);
        assert_eq!(capacity::<[u8; 1024], _>(&reader, usize::MAX, 0), 1024);
    }
}
