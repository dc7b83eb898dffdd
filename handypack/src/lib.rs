//! `handypack` turns plain Rust values into a compact byte stream and back without any schema or ceremony. Every
//! supported type implements [`Dump`] to write itself into any `std::io::Write` and [`Load`] to read itself back from
//! a [`Source`]. The layout of a value is derived solely from its static type:
//!
//! | Shape                               | Layout                                                  |
//! |-------------------------------------|---------------------------------------------------------|
//! | integers, floats                    | raw little endian bytes, `size_of::<T>()` wide          |
//! | `usize`, `isize`                    | as `u64`, `i64`                                         |
//! | `bool`                              | one byte, `0` or `1`                                    |
//! | `char`                              | one `u32` code unit                                     |
//! | `String`, `str`                     | `u32` byte count, UTF-8 bytes                           |
//! | [`WString`]                         | `u32` code point count, one `u32` per code point        |
//! | `Vec`, `VecDeque`, sets, slices     | `u32` element count, elements                           |
//! | `HashMap`, `BTreeMap`               | `u32` entry count, key and value of each entry          |
//! | `Option`                            | tag byte `0` or `1`, value if present                   |
//! | tuples, arrays, [records](handypack)| elements in order, no prefix                            |
//!
//! There is no framing, no type tag and no versioning. A stream can only be decoded with the very types it was
//! encoded with; decoding with a different type is not detected and yields garbage of the right type. The format
//! is meant for trusted, self produced data. It does check every count prefix against the bytes a [`SliceSource`]
//! has left, though, so a corrupt prefix yields `DecodeError::Underflow` instead of a huge allocation.
//!
//! # A note on wide strings
//!
//! The width of a wide character differs between platforms. [`WString`] sidesteps that by always writing UTF-32 code
//! units, so a stream written on one platform reads back on any other.
//!
//! # Examples
//!
//! ```
//! use handypack::*;
//! use std::collections::BTreeMap;
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Message {
//!     version: u8,
//!     scores: BTreeMap<String, i16>,
//! }
//!
//! handypack!(Message { version, scores });
//!
//! let msg = Message { version: 1, scores: BTreeMap::from([(String::from("cat"), -2)]) };
//! let mut buf = Vec::new();
//! let written = dump!(&mut buf, msg, 7u16).unwrap();
//! assert_eq!(written, 16);
//! assert_eq!(buf, [
//!     0x01,                   // version
//!     0x01, 0x00, 0x00, 0x00, // one entry in scores
//!     0x03, 0x00, 0x00, 0x00, // key of length 3
//!     0x63, 0x61, 0x74,       // 'cat'
//!     0xfe, 0xff,             // -2
//!     0x07, 0x00,             // the trailing u16
//! ]);
//!
//! let mut src = SliceSource::new(&buf);
//! let (mut decoded, mut trailer) = (Message::default(), 0u16);
//! load!(&mut src, decoded, trailer).unwrap();
//! assert_eq!(decoded, msg);
//! assert_eq!(trailer, 7);
//! ```

mod container;
mod error;
mod pack;
mod primitive;
mod record;
mod source;
mod string;
mod tuple;

pub use error::*;
pub use pack::{dump_len, Dump, Load, LEN_SIZE};
#[doc(hidden)]
pub use pack::field_wire_size;
pub use source::*;
pub use string::WString;

use std::io::Write;

/// Writes each value in turn into the sink and returns the total number of written bytes. This is exactly
/// equivalent to calling [`Dump::dump`] once per value on the same sink.
#[macro_export]
macro_rules! dump {
    ($w:expr, $($value:expr),+ $(,)?) => {{
        let w = $w;
        (|| -> ::std::result::Result<usize, $crate::EncodeError> {
            let mut c = 0;
            $( c += $crate::Dump::dump(&$value, &mut *w)?; )+
            Ok(c)
        })()
    }};
}

/// Reads each value in turn from the source, stopping at the first error, which gets annotated with the source
/// position it occurred at.
#[macro_export]
macro_rules! load {
    ($src:expr, $($value:expr),+ $(,)?) => {{
        let src = $src;
        let result = (|| -> ::std::result::Result<(), $crate::DecodeError> {
            $( $crate::Load::load(&mut $value, &mut *src)?; )+
            Ok(())
        })();
        result.map_err(|e| e.at($crate::Source::position(&*src)))
    }};
}

/// Writes a single value into the sink.
pub fn dump<T: Dump + ?Sized, W: Write + ?Sized>(w: &mut W, value: &T) -> Result<usize, EncodeError> {
    let c = value.dump(w)?;
    log::trace!("dumped {} bytes", c);
    Ok(c)
}

/// Reads a single value from the source, replacing the contents of `value`.
pub fn load<T: Load, S: Source>(src: &mut S, value: &mut T) -> Result<(), DecoderError> {
    let start = src.position();
    value.load(src).map_err(|e| e.at(src.position()))?;
    log::trace!("loaded {} bytes", src.position() - start);
    Ok(())
}

pub fn to_bytes<T: Dump + ?Sized>(value: &T) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Vec::new();
    dump(&mut buf, value)?;
    Ok(buf)
}

/// Decodes a value which must span the whole buffer.
pub fn from_bytes<T: Load + Default>(buf: &[u8]) -> Result<T, DecoderError> {
    let mut src = SliceSource::new(buf);
    let mut value = T::default();
    load(&mut src, &mut value)?;
    if src.is_empty() {
        Ok(value)
    } else {
        Err(DecodeError::Trailing(src.rest().len()).at(src.position()))
    }
}
