//! Records opt into packing by listing the fields that take part, once, with [`handypack!`](crate::handypack). The
//! listed order is the wire order for both directions; it does not have to match the order in which the fields are
//! declared in the struct. Fields that are not listed never touch the wire and keep whatever value the destination
//! held before decoding. The smallest encoding of a record is the sum of the smallest encodings of its listed fields,
//! which lets containers of records reject a bogus count prefix before decoding a single element.

/// Implements [`Dump`](crate::Dump) and [`Load`](crate::Load) for a struct by visiting the listed fields in order.
///
/// Named and tuple struct fields are both supported. Generic structs need the `impl<...>` form, which bounds every
/// type parameter by the respective trait.
///
/// ```
/// use handypack::{handypack, from_bytes, to_bytes};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Point {
///     x: i32,
///     y: i32,
///     cached_norm: Option<f64>,
/// }
///
/// handypack!(Point { x, y });
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Tagged<T>(u8, T);
///
/// handypack!(impl<T> Tagged<T> { 0, 1 });
///
/// let bytes = to_bytes(&Tagged(7, Point { x: 1, y: -1, cached_norm: Some(1.4) })).unwrap();
/// assert_eq!(bytes.len(), 1 + 4 + 4);
/// let back: Tagged<Point> = from_bytes(&bytes).unwrap();
/// assert_eq!(back, Tagged(7, Point { x: 1, y: -1, cached_norm: None }));
/// ```
#[macro_export]
macro_rules! handypack {
    (impl<$($g:ident),+ $(,)?> $ty:ty { $($field:tt),* $(,)? }) => {
        impl<$($g: $crate::Dump),+> $crate::Dump for $ty {
            #[allow(unused_mut, unused_variables)]
            fn dump<W: ::std::io::Write + ?Sized>(&self, w: &mut W) -> ::std::result::Result<usize, $crate::EncodeError> {
                let mut c = 0;
                $( c += $crate::Dump::dump(&self.$field, w)?; )*
                Ok(c)
            }
        }

        impl<$($g: $crate::Load),+> $crate::Load for $ty {
            const MIN_WIRE_SIZE: usize = 0 $( + $crate::field_wire_size::<Self, _>(|r| &r.$field) )*;

            #[allow(unused_variables)]
            fn load<S: $crate::Source>(&mut self, src: &mut S) -> ::std::result::Result<(), $crate::DecodeError> {
                $( $crate::Load::load(&mut self.$field, src)?; )*
                Ok(())
            }
        }
    };
    ($ty:ty { $($field:tt),* $(,)? }) => {
        impl $crate::Dump for $ty {
            #[allow(unused_mut, unused_variables)]
            fn dump<W: ::std::io::Write + ?Sized>(&self, w: &mut W) -> ::std::result::Result<usize, $crate::EncodeError> {
                let mut c = 0;
                $( c += $crate::Dump::dump(&self.$field, w)?; )*
                Ok(c)
            }
        }

        impl $crate::Load for $ty {
            const MIN_WIRE_SIZE: usize = 0 $( + $crate::field_wire_size::<Self, _>(|r| &r.$field) )*;

            #[allow(unused_variables)]
            fn load<S: $crate::Source>(&mut self, src: &mut S) -> ::std::result::Result<(), $crate::DecodeError> {
                $( $crate::Load::load(&mut self.$field, src)?; )*
                Ok(())
            }
        }
    };
}
