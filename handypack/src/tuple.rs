//! Tuples and fixed size arrays have their arity fixed by the type, so they are written as the plain concatenation of
//! their elements without any count prefix.

use crate::error::{DecodeError, EncodeError};
use crate::pack::{Dump, Load};
use crate::source::Source;
use std::io::Write;

impl Dump for () {
    #[inline]
    fn dump<W: Write + ?Sized>(&self, _w: &mut W) -> Result<usize, EncodeError> {
        Ok(0)
    }
}

impl Load for () {
    #[inline]
    fn load<S: Source>(&mut self, _src: &mut S) -> Result<(), DecodeError> {
        Ok(())
    }
}

macro_rules! tuple_impls {
    ($($name:ident $idx:tt)+) => {
        impl<$($name: Dump),+> Dump for ($($name,)+) {
            #[inline]
            fn dump<W: Write + ?Sized>(&self, w: &mut W) -> Result<usize, EncodeError> {
                let mut c = 0;
                $( c += self.$idx.dump(w)?; )+
                Ok(c)
            }
        }

        impl<$($name: Load),+> Load for ($($name,)+) {
            const MIN_WIRE_SIZE: usize = 0 $( + <$name as Load>::MIN_WIRE_SIZE )+;

            #[inline]
            fn load<S: Source>(&mut self, src: &mut S) -> Result<(), DecodeError> {
                $( self.$idx.load(src)?; )+
                Ok(())
            }
        }
    };
}

tuple_impls!(A 0);
tuple_impls!(A 0 B 1);
tuple_impls!(A 0 B 1 C 2);
tuple_impls!(A 0 B 1 C 2 D 3);
tuple_impls!(A 0 B 1 C 2 D 3 E 4);
tuple_impls!(A 0 B 1 C 2 D 3 E 4 F 5);
tuple_impls!(A 0 B 1 C 2 D 3 E 4 F 5 G 6);
tuple_impls!(A 0 B 1 C 2 D 3 E 4 F 5 G 6 H 7);
tuple_impls!(A 0 B 1 C 2 D 3 E 4 F 5 G 6 H 7 I 8);
tuple_impls!(A 0 B 1 C 2 D 3 E 4 F 5 G 6 H 7 I 8 J 9);
tuple_impls!(A 0 B 1 C 2 D 3 E 4 F 5 G 6 H 7 I 8 J 9 K 10);
tuple_impls!(A 0 B 1 C 2 D 3 E 4 F 5 G 6 H 7 I 8 J 9 K 10 L 11);

impl<T: Dump, const N: usize> Dump for [T; N] {
    fn dump<W: Write + ?Sized>(&self, w: &mut W) -> Result<usize, EncodeError> {
        let mut c = 0;
        for item in self {
            c += item.dump(w)?;
        }
        Ok(c)
    }
}

impl<T: Load, const N: usize> Load for [T; N] {
    const MIN_WIRE_SIZE: usize = N * T::MIN_WIRE_SIZE;

    fn load<S: Source>(&mut self, src: &mut S) -> Result<(), DecodeError> {
        src.ensure(Self::MIN_WIRE_SIZE)?;
        for item in self.iter_mut() {
            item.load(src)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::DecodeError;
    use crate::pack::{Dump, Load};
    use crate::source::SliceSource;

    #[test]
    fn tuple() {
        let t1: (u32, i8, String) = (42, -3, String::from("test"));
        let mut buf = Vec::new();
        assert_eq!(t1.dump(&mut buf).unwrap(), 4 + 1 + 4 + 4);
        let mut t2: (u32, i8, String) = Default::default();
        t2.load(&mut SliceSource::new(&buf)).unwrap();
        assert_eq!(t2.0, 42);
        assert_eq!(t2.1, -3);
        assert_eq!(t2.2, "test");
    }

    #[test]
    fn tuple_has_no_prefix() {
        let mut buf = Vec::new();
        (1u8, 2u8).dump(&mut buf).unwrap();
        assert_eq!(buf, [1, 2]);
        assert_eq!(<(u8, u16, u32) as Load>::MIN_WIRE_SIZE, 7);
    }

    #[test]
    fn unit_is_empty() {
        let mut buf = Vec::new();
        assert_eq!(().dump(&mut buf).unwrap(), 0);
        assert!(buf.is_empty());
        ().load(&mut SliceSource::new(&buf)).unwrap();
    }

    #[test]
    fn widest_tuple() {
        let t = (1u8, 2u16, 3u32, 4u64, 5i8, 6i16, 7i32, 8i64, 9.0f32, 10.0f64, 'k', true);
        let mut buf = Vec::new();
        t.dump(&mut buf).unwrap();
        let back = <(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64, char, bool)>::unpack(&mut SliceSource::new(&buf)).unwrap();
        assert_eq!(t, back);
    }

    #[test]
    fn arrays() {
        let a = [[1u16, 2], [3, 4], [5, 6]];
        let mut buf = Vec::new();
        assert_eq!(a.dump(&mut buf).unwrap(), 12);
        let mut b = [[0u16; 2]; 3];
        b.load(&mut SliceSource::new(&buf)).unwrap();
        assert_eq!(a, b);
        let mut short = [0u32; 4];
        let err = short.load(&mut SliceSource::new(&buf[..10])).unwrap_err();
        assert!(matches!(err, DecodeError::Underflow { needed: 16, remaining: 10 }));
    }
}
