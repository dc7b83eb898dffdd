//! Strings are length prefixed unit sequences. A narrow string counts bytes and writes its UTF-8 representation
//! verbatim. A [`WString`] counts code points and writes each one as a fixed 32 bit unit, regardless of the width of
//! the platform's native wide character type.

use crate::error::{DecodeError, EncodeError};
use crate::pack::{capacity, dump_len, load_len, Dump, Load, LEN_SIZE};
use crate::source::Source;
use std::fmt;
use std::io::Write;
use std::mem::size_of;
use std::ops::Deref;

impl Dump for str {
    #[inline]
    fn dump<W: Write + ?Sized>(&self, w: &mut W) -> Result<usize, EncodeError> {
        let c = dump_len(self.len(), w)?;
        w.write_all(self.as_bytes())?;
        Ok(c + self.len())
    }
}

impl Dump for String {
    #[inline]
    fn dump<W: Write + ?Sized>(&self, w: &mut W) -> Result<usize, EncodeError> {
        self.as_str().dump(w)
    }
}

impl Load for String {
    const MIN_WIRE_SIZE: usize = LEN_SIZE;

    fn load<S: Source>(&mut self, src: &mut S) -> Result<(), DecodeError> {
        let len = load_len(src, 1)?;
        *self = String::from_utf8(src.read_vec(len)?)?;
        Ok(())
    }
}

/// A wide character string. On wire it is a count of code points followed by one little endian `u32` per code point,
/// which makes it layout compatible with `Vec<char>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WString(String);

impl WString {

    pub fn new() -> Self {
        Self::default()
    }

    /// The number of code units this string occupies on wire.
    pub fn units(&self) -> usize {
        self.0.chars().count()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

}

impl Deref for WString {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WString {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for WString {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<WString> for String {
    fn from(s: WString) -> Self {
        s.0
    }
}

impl PartialEq<str> for WString {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for WString {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for WString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Dump for WString {
    fn dump<W: Write + ?Sized>(&self, w: &mut W) -> Result<usize, EncodeError> {
        let mut c = dump_len(self.units(), w)?;
        for ch in self.0.chars() {
            c += ch.dump(w)?;
        }
        Ok(c)
    }
}

impl Load for WString {
    const MIN_WIRE_SIZE: usize = LEN_SIZE;

    fn load<S: Source>(&mut self, src: &mut S) -> Result<(), DecodeError> {
        let len = load_len(src, size_of::<u32>())?;
        // most code points need less than four bytes as UTF-8, one per unit is the cautious guess
        let mut out = String::with_capacity(capacity::<u8, _>(src, len, size_of::<u32>()));
        for _ in 0..len {
            out.push(char::unpack(src)?);
        }
        self.0 = out;
        Ok(())
    }
}
