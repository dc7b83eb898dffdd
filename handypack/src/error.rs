use std::fmt::{Display, Formatter, self};

/// A `DecodeError` annotated with the source position at which decoding stopped.
#[derive(Debug)]
pub struct DecoderError {
    inner: DecodeError,
    at: usize,
}

impl DecoderError {
    pub fn into_inner(self) -> DecodeError {
        self.inner
    }

    pub fn kind(&self) -> &DecodeError {
        &self.inner
    }

    /// Number of bytes the source had handed out when the error was raised.
    pub fn position(&self) -> usize {
        self.at
    }
}

impl std::error::Error for DecoderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
       Some(&self.inner)
    }
}

impl Display for DecoderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{} at input position {}", self.inner, self.at)
    }
}

#[derive(Debug)]
pub enum DecodeError {
    /// The source holds fewer bytes than the value being decoded requires. Also raised up front
    /// when a count prefix claims more elements than the remaining bytes could possibly hold.
    Underflow { needed: usize, remaining: usize },
    Utf8(std::str::Utf8Error),
    Char(u32),
    Bool(u8),
    Tag(u8),
    Int,
    Trailing(usize),
    Io(std::io::Error),
}

impl DecodeError {
    pub fn at(self, at: usize) -> DecoderError {
        DecoderError { inner: self, at }
    }

    pub fn is_underflow(&self) -> bool {
        matches!(self, DecodeError::Underflow { .. })
    }
}

impl From<std::str::Utf8Error> for DecodeError {
    fn from(e: std::str::Utf8Error) -> DecodeError {
        DecodeError::Utf8(e)
    }
}

impl From<std::string::FromUtf8Error> for DecodeError {
    fn from(e: std::string::FromUtf8Error) -> DecodeError {
        DecodeError::Utf8(e.utf8_error())
    }
}

impl From<std::num::TryFromIntError> for DecodeError {
    fn from(_e: std::num::TryFromIntError) -> DecodeError {
        DecodeError::Int
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Utf8(e) => Some(e),
            DecodeError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            DecodeError::Underflow { needed, remaining } => write!(f, "Stream underflow: needed {} bytes but only {} remain", needed, remaining),
            DecodeError::Utf8(e) => write!(f, "String bytes were not valid Utf-8: {}", e),
            DecodeError::Char(value) => write!(f, "{:#x} is not a unicode scalar value", value),
            DecodeError::Bool(value) => write!(f, "{:#04x} is not a valid bool", value),
            DecodeError::Tag(value) => write!(f, "{:#04x} is not a valid option tag", value),
            DecodeError::Int => f.write_str("Integer didn't fit into target type"),
            DecodeError::Trailing(count) => write!(f, "{} trailing bytes in input", count),
            DecodeError::Io(e) => write!(f, "IO error {}", e),
        }
    }
}

#[derive(Debug)]
pub enum EncodeError {
    Io(std::io::Error),
    Length(usize),
}

impl From<std::io::Error> for EncodeError {
    fn from(e: std::io::Error) -> EncodeError {
        EncodeError::Io(e)
    }
}

impl std::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EncodeError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl Display for EncodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            EncodeError::Io(e) => write!(f, "IO error {}", e),
            EncodeError::Length(value) => write!(f, "Length {} exceeds maximum {}", value, u32::MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DecodeError, EncodeError};

    #[test]
    fn underflow_message() {
        let e = DecodeError::Underflow { needed: 4, remaining: 1 }.at(7);
        assert_eq!(e.to_string(), "Stream underflow: needed 4 bytes but only 1 remain at input position 7");
        assert_eq!(e.position(), 7);
        assert!(e.into_inner().is_underflow());
    }

    #[test]
    fn sources_chain() {
        use std::error::Error;
        let io = EncodeError::from(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"));
        assert!(io.source().is_some());
        assert!(EncodeError::Length(usize::MAX).source().is_none());
        let bad = String::from_utf8(vec![0xc3, 0x28]).unwrap_err();
        assert!(matches!(DecodeError::from(bad), DecodeError::Utf8(_)));
    }
}
