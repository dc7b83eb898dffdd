use serde::{ser, Serialize};
use handypack::{Dump, EncodeError};
use std::io::Write;

use crate::error::{Error, Result};

pub struct Serializer<W> {
    output: W,
}

pub fn to_bytes<T: ?Sized + Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut serializer = Serializer::new(Vec::new());
    value.serialize(&mut serializer)?;
    let output = serializer.into_inner();
    log::trace!("serialized {} bytes", output.len());
    Ok(output)
}

pub fn to_writer<T: ?Sized + Serialize, W: Write>(writer: W, value: &T) -> Result<()> {
    let mut serializer = Serializer::new(writer);
    value.serialize(&mut serializer)?;
    Ok(())
}

impl<W: Write> Serializer<W> {

    pub fn new(output: W) -> Self {
        Self { output }
    }

    pub fn into_inner(self) -> W {
        self.output
    }

    #[inline]
    fn dump<T: Dump + ?Sized>(&mut self, v: &T) -> Result<()> {
        v.dump(&mut self.output)?;
        Ok(())
    }

    #[inline]
    fn serialize_len(&mut self, len: usize) -> Result<()> {
        handypack::dump_len(len, &mut self.output)?;
        Ok(())
    }

}

impl<'a, W: Write> ser::Serializer for &'a mut Serializer<W> {

    type Ok = ();
    type Error = Error;
    type SerializeSeq = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeTupleVariant = Self;
    type SerializeMap = Self;
    type SerializeStruct = Self;
    type SerializeStructVariant = Self;

    fn serialize_bool(self, v: bool) -> Result<()> {
        self.dump(&v)
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        self.dump(&v)
    }

    fn serialize_i16(self, v: i16) -> Result<()> {
        self.dump(&v)
    }

    fn serialize_i32(self, v: i32) -> Result<()> {
        self.dump(&v)
    }

    fn serialize_i64(self, v: i64) -> Result<()> {
        self.dump(&v)
    }

    fn serialize_i128(self, v: i128) -> Result<()> {
        self.dump(&v)
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.dump(&v)
    }

    fn serialize_u16(self, v: u16) -> Result<()> {
        self.dump(&v)
    }

    fn serialize_u32(self, v: u32) -> Result<()> {
        self.dump(&v)
    }

    fn serialize_u64(self, v: u64) -> Result<()> {
        self.dump(&v)
    }

    fn serialize_u128(self, v: u128) -> Result<()> {
        self.dump(&v)
    }

    fn serialize_f32(self, v: f32) -> Result<()> {
        self.dump(&v)
    }

    fn serialize_f64(self, v: f64) -> Result<()> {
        self.dump(&v)
    }

    fn serialize_char(self, v: char) -> Result<()> {
        self.dump(&v)
    }

    fn serialize_str(self, v: &str) -> Result<()> {
        self.dump(v)
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<()> {
        self.serialize_len(v.len())?;
        self.output.write_all(v).map_err(EncodeError::from)?;
        Ok(())
    }

    fn serialize_none(self) -> Result<()> {
        self.dump(&0u8)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<()> {
        self.dump(&1u8)?;
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(self, _name: &'static str, index: u32, _variant: &'static str) -> Result<()> {
        self.dump(&index)
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(self, _name: &'static str, value: &T) -> Result<()> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(self, _name: &'static str, index: u32, _variant: &'static str, value: &T) -> Result<()> {
        self.dump(&index)?;
        value.serialize(self)
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        match len {
            Some(l) => {
                self.serialize_len(l)?;
                Ok(self)
            },
            None => Err(Error::Length),
        }
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Ok(self)
    }

    fn serialize_tuple_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeTupleStruct> {
        Ok(self)
    }

    fn serialize_tuple_variant(self, _name: &'static str, index: u32, _variant: &'static str, _len: usize) -> Result<Self::SerializeTupleVariant> {
        self.dump(&index)?;
        Ok(self)
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap> {
        match len {
            Some(l) => {
                self.serialize_len(l)?;
                Ok(self)
            },
            None => Err(Error::Length),
        }
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Ok(self)
    }

    fn serialize_struct_variant(self, name: &'static str, index: u32, variant: &'static str, len: usize) -> Result<Self::SerializeStructVariant> {
        self.serialize_tuple_variant(name, index, variant, len)
    }

    fn is_human_readable(&self) -> bool {
        false
    }

}

impl<'a, W: Write> ser::SerializeSeq for &'a mut Serializer<W> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }

}

impl<'a, W: Write> ser::SerializeTuple for &'a mut Serializer<W> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl<'a, W: Write> ser::SerializeTupleStruct for &'a mut Serializer<W> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl<'a, W: Write> ser::SerializeTupleVariant for &'a mut Serializer<W> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl<'a, W: Write> ser::SerializeMap for &'a mut Serializer<W> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<()> {
        key.serialize(&mut **self)
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }

}

/// Field names never reach the wire, the declaration order of the fields is all that identifies them.
impl<'a, W: Write> ser::SerializeStruct for &'a mut Serializer<W> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, _key: &'static str, value: &T) -> Result<()> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }

}

impl<'a, W: Write> ser::SerializeStructVariant for &'a mut Serializer<W> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, _key: &'static str, value: &T) -> Result<()> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }

}
