//! Conveniently serialize and deserialize your Rust data structures into the `handypack` wire format with serde.
//!
//! The bytes produced here are the very same bytes the `handypack` traits produce for the equivalent types, so a
//! struct deriving `Serialize` can be read back into a struct registered with `handypack!` and vice versa, as long as
//! both visit their fields in the same order.
//!
//! # Mapping of the serde data model
//!
//! * structs and tuples: their fields in order, without any prefix or field names
//! * sequences and maps: a `u32` count followed by the elements; a sequence of unknown length is an error
//! * options: a tag byte `0` or `1`, followed by the value if present
//! * unit types: nothing at all
//! * newtypes: the inner value
//! * enums: the `u32` index of the variant followed by its payload
//! * byte buffers: a `u32` count followed by the raw bytes
//!
//! The format is not self-describing, so types that rely on `deserialize_any`, such as untagged enums or
//! `serde_json::Value`, cannot be read. This is a property of the wire format, not of serde.
//!
//! # Examples
//!
//! ```
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! pub enum Species {
//!     PrionailurusViverrinus,
//!     LynxLynx,
//!     FelisCatus,
//! }
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! pub struct Cat<'a> {
//!     name: &'a str,
//!     species: Species,
//! }
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Message<'a> {
//!     version: u32,
//!     #[serde(borrow)]
//!     cats: Vec<Cat<'a>>,
//! }
//!
//! let msg = Message {
//!     version: 1,
//!     cats: vec![
//!         Cat { name: "Jessica", species: Species::PrionailurusViverrinus },
//!         Cat { name: "Wantan", species: Species::LynxLynx },
//!     ],
//! };
//!
//! let bytes = handypack_serde::to_bytes(&msg).unwrap();
//! assert_eq!(bytes.len(), 37);
//! assert_eq!(bytes, [
//!   0x01, 0x00, 0x00, 0x00,                         // version
//!   0x02, 0x00, 0x00, 0x00,                         // two cats
//!     0x07, 0x00, 0x00, 0x00,                       // name of length 7
//!       0x4a, 0x65, 0x73, 0x73, 0x69, 0x63, 0x61,   // 'Jessica'
//!     0x00, 0x00, 0x00, 0x00,                       // variant 0, PrionailurusViverrinus
//!     0x06, 0x00, 0x00, 0x00,                       // name of length 6
//!       0x57, 0x61, 0x6e, 0x74, 0x61, 0x6e,         // 'Wantan'
//!     0x01, 0x00, 0x00, 0x00,                       // variant 1, LynxLynx
//! ]);
//!
//! let deserialized = handypack_serde::from_bytes(&bytes).unwrap();
//! assert_eq!(msg, deserialized);
//! ```
//!
//! The names borrow directly from `bytes`. For comparison, `serde_json` needs 115 bytes for the same message.

mod de;
mod error;
mod ser;

pub use de::{from_bytes, Deserializer};
pub use error::{DeserializationError, Error, Result};
pub use ser::{to_bytes, to_writer, Serializer};
