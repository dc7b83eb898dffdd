//! Fixed width numerics are written as their raw bit pattern in little endian byte order, so a value of type `T`
//! always occupies exactly `size_of::<T>()` bytes. Floats are not inspected: NaN payloads and infinities pass through
//! untouched.

use crate::error::{DecodeError, EncodeError};
use crate::pack::{Dump, Load};
use crate::source::Source;
use std::convert::TryFrom;
use std::io::Write;
use std::mem::size_of;

macro_rules! primitive_impls {
    ($($ty:ty)*) => {$(
        impl Dump for $ty {
            #[inline]
            fn dump<W: Write + ?Sized>(&self, w: &mut W) -> Result<usize, EncodeError> {
                w.write_all(&self.to_le_bytes())?;
                Ok(size_of::<$ty>())
            }
        }

        impl Load for $ty {
            const MIN_WIRE_SIZE: usize = size_of::<$ty>();

            #[inline]
            fn load<S: Source>(&mut self, src: &mut S) -> Result<(), DecodeError> {
                *self = <$ty>::from_le_bytes(src.read_array()?);
                Ok(())
            }
        }
    )*};
}

primitive_impls!(i8 u8 i16 u16 i32 u32 i64 u64 i128 u128 f32 f64);

// Pointer sized integers are pinned to 64 bits so the layout doesn't depend on the target.

impl Dump for usize {
    #[inline]
    fn dump<W: Write + ?Sized>(&self, w: &mut W) -> Result<usize, EncodeError> {
        (*self as u64).dump(w)
    }
}

impl Load for usize {
    const MIN_WIRE_SIZE: usize = size_of::<u64>();

    #[inline]
    fn load<S: Source>(&mut self, src: &mut S) -> Result<(), DecodeError> {
        *self = usize::try_from(u64::unpack(src)?)?;
        Ok(())
    }
}

impl Dump for isize {
    #[inline]
    fn dump<W: Write + ?Sized>(&self, w: &mut W) -> Result<usize, EncodeError> {
        (*self as i64).dump(w)
    }
}

impl Load for isize {
    const MIN_WIRE_SIZE: usize = size_of::<i64>();

    #[inline]
    fn load<S: Source>(&mut self, src: &mut S) -> Result<(), DecodeError> {
        *self = isize::try_from(i64::unpack(src)?)?;
        Ok(())
    }
}

impl Dump for bool {
    #[inline]
    fn dump<W: Write + ?Sized>(&self, w: &mut W) -> Result<usize, EncodeError> {
        (*self as u8).dump(w)
    }
}

impl Load for bool {
    const MIN_WIRE_SIZE: usize = 1;

    #[inline]
    fn load<S: Source>(&mut self, src: &mut S) -> Result<(), DecodeError> {
        *self = match u8::unpack(src)? {
            0 => false,
            1 => true,
            b => return Err(DecodeError::Bool(b)),
        };
        Ok(())
    }
}

/// A `char` is one UTF-32 code unit, the same unit wide strings are made of.
impl Dump for char {
    #[inline]
    fn dump<W: Write + ?Sized>(&self, w: &mut W) -> Result<usize, EncodeError> {
        u32::from(*self).dump(w)
    }
}

impl Load for char {
    const MIN_WIRE_SIZE: usize = size_of::<u32>();

    #[inline]
    fn load<S: Source>(&mut self, src: &mut S) -> Result<(), DecodeError> {
        let unit = u32::unpack(src)?;
        *self = char::from_u32(unit).ok_or(DecodeError::Char(unit))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::DecodeError;
    use crate::pack::{Dump, Load};
    use crate::source::SliceSource;

    #[test]
    fn pod_types() {
        let mut buf = Vec::new();
        let written = (-1i8).dump(&mut buf).unwrap()
            + 2u8.dump(&mut buf).unwrap()
            + (-3i16).dump(&mut buf).unwrap()
            + 4u16.dump(&mut buf).unwrap()
            + (-5i32).dump(&mut buf).unwrap()
            + 6u32.dump(&mut buf).unwrap()
            + (-7i64).dump(&mut buf).unwrap()
            + 8u64.dump(&mut buf).unwrap();
        assert_eq!(written, 1 + 1 + 2 + 2 + 4 + 4 + 8 + 8);
        assert_eq!(buf.len(), written);

        let mut src = SliceSource::new(&buf);
        let (mut a, mut b, mut c, mut d) = (0i8, 0u8, 0i16, 0u16);
        let (mut e, mut f, mut g, mut h) = (0i32, 0u32, 0i64, 0u64);
        a.load(&mut src).unwrap();
        b.load(&mut src).unwrap();
        c.load(&mut src).unwrap();
        d.load(&mut src).unwrap();
        e.load(&mut src).unwrap();
        f.load(&mut src).unwrap();
        g.load(&mut src).unwrap();
        h.load(&mut src).unwrap();
        assert_eq!((a, b, c, d, e, f, g, h), (-1, 2, -3, 4, -5, 6, -7, 8));
        assert!(src.is_empty());
    }

    #[test]
    fn byte_order() {
        let mut buf = Vec::new();
        0x1122_3344u32.dump(&mut buf).unwrap();
        assert_eq!(buf, [0x44, 0x33, 0x22, 0x11]);
    }

    #[test]
    fn floats_keep_bit_patterns() {
        let mut buf = Vec::new();
        let nan = f64::from_bits(0x7ff8_0000_dead_beef);
        for v in [f64::MAX, f64::MIN, std::f64::consts::PI, f64::INFINITY, f64::NEG_INFINITY, -0.0, nan] {
            buf.clear();
            assert_eq!(v.dump(&mut buf).unwrap(), 8);
            assert_eq!(f64::unpack(&mut SliceSource::new(&buf)).unwrap().to_bits(), v.to_bits());
        }
        for v in [f32::MAX, f32::MIN, std::f32::consts::PI, f32::NAN] {
            buf.clear();
            assert_eq!(v.dump(&mut buf).unwrap(), 4);
            assert_eq!(f32::unpack(&mut SliceSource::new(&buf)).unwrap().to_bits(), v.to_bits());
        }
    }

    #[test]
    fn wide_integers() {
        let mut buf = Vec::new();
        i128::MIN.dump(&mut buf).unwrap();
        u128::MAX.dump(&mut buf).unwrap();
        usize::MAX.dump(&mut buf).unwrap();
        (-42isize).dump(&mut buf).unwrap();
        assert_eq!(buf.len(), 16 + 16 + 8 + 8);
        let mut src = SliceSource::new(&buf);
        assert_eq!(i128::unpack(&mut src).unwrap(), i128::MIN);
        assert_eq!(u128::unpack(&mut src).unwrap(), u128::MAX);
        assert_eq!(u64::unpack(&mut src).unwrap(), usize::MAX as u64);
        assert_eq!(isize::unpack(&mut src).unwrap(), -42);
    }

    #[test]
    fn bools_and_chars() {
        let mut buf = Vec::new();
        true.dump(&mut buf).unwrap();
        false.dump(&mut buf).unwrap();
        'ы'.dump(&mut buf).unwrap();
        let mut src = SliceSource::new(&buf);
        assert!(bool::unpack(&mut src).unwrap());
        assert!(!bool::unpack(&mut src).unwrap());
        assert_eq!(char::unpack(&mut src).unwrap(), 'ы');

        assert!(matches!(bool::unpack(&mut SliceSource::new(&[2u8])), Err(DecodeError::Bool(2))));
        let surrogate = 0xd800u32.to_le_bytes();
        assert!(matches!(char::unpack(&mut SliceSource::new(&surrogate)), Err(DecodeError::Char(0xd800))));
    }

    #[test]
    fn truncated_primitive_underflows() {
        let buf = [1u8, 2, 3];
        let mut src = SliceSource::new(&buf);
        let mut v = 0u32;
        assert!(matches!(v.load(&mut src), Err(DecodeError::Underflow { needed: 4, remaining: 3 })));
        assert_eq!(v, 0);
    }
}
