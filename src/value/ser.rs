use core::result;

use serde::Serialize;

use crate::{
    error::{Error, Result},
    ByteArray, Compound, IntArray, LongArray, Value, INT_ARRAY_TOKEN, LONG_ARRAY_TOKEN,
};

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Value::Byte(v) => serializer.serialize_i8(*v),
            Value::Short(v) => serializer.serialize_i16(*v),
            Value::Int(v) => serializer.serialize_i32(*v),
            Value::Long(v) => serializer.serialize_i64(*v),
            Value::Float(v) => serializer.serialize_f32(*v),
            Value::Double(v) => serializer.serialize_f64(*v),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::String(v) => serializer.serialize_str(v),
            Value::ByteArray(v) => v.serialize(serializer),
            Value::IntArray(v) => v.serialize(serializer),
            Value::LongArray(v) => v.serialize(serializer),
            Value::List(v) => v.serialize(serializer),
            Value::Compound(v) => v.serialize(serializer),
        }
    }
}

/// Serializer whose output is a `Value`, or nothing at all for `None`.
///
/// This is the serializer that backs [`to_value`][crate::to_value]. The
/// `Option` lets compounds drop fields that serialize as `None`, since NBT has
/// no null tag.
pub(crate) struct Serializer;

fn no_equivalent(what: &str) -> Error {
    Error::bespoke(format!("{} has no nbt equivalent", what))
}

/// Serialize a value that must be present, such as a list element or the root.
pub(crate) fn to_present_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value
        .serialize(&mut Serializer)?
        .ok_or_else(|| no_equivalent("none outside of a compound"))
}

fn into_array<T, F>(value: Option<Value>, what: &str, f: F) -> Result<Vec<T>>
where
    F: Fn(&Value) -> Option<T>,
{
    match value {
        Some(Value::List(items)) => items
            .iter()
            .map(|v| f(v).ok_or_else(|| Error::bespoke(format!("invalid {} element", what))))
            .collect(),
        _ => Err(Error::bespoke(format!("expected sequence for {}", what))),
    }
}

impl<'a> serde::Serializer for &'a mut Serializer {
    type Ok = Option<Value>;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    #[inline]
    fn serialize_bool(self, value: bool) -> Result<Option<Value>> {
        Ok(Some(Value::Bool(value)))
    }

    #[inline]
    fn serialize_i8(self, value: i8) -> Result<Option<Value>> {
        Ok(Some(Value::Byte(value)))
    }

    #[inline]
    fn serialize_i16(self, value: i16) -> Result<Option<Value>> {
        Ok(Some(Value::Short(value)))
    }

    #[inline]
    fn serialize_i32(self, value: i32) -> Result<Option<Value>> {
        Ok(Some(Value::Int(value)))
    }

    #[inline]
    fn serialize_i64(self, value: i64) -> Result<Option<Value>> {
        Ok(Some(Value::Long(value)))
    }

    fn serialize_i128(self, v: i128) -> Result<Option<Value>> {
        self.serialize_u128(v as u128)
    }

    // Same layout the game uses for UUIDs: four ints, most significant first.
    fn serialize_u128(self, v: u128) -> Result<Option<Value>> {
        Ok(Some(Value::IntArray(IntArray::new(vec![
            (v >> 96) as i32,
            (v >> 64) as i32,
            (v >> 32) as i32,
            v as i32,
        ]))))
    }

    #[inline]
    fn serialize_u8(self, value: u8) -> Result<Option<Value>> {
        Ok(Some(Value::Byte(value as i8)))
    }

    #[inline]
    fn serialize_u16(self, value: u16) -> Result<Option<Value>> {
        Ok(Some(Value::Short(value as i16)))
    }

    #[inline]
    fn serialize_u32(self, value: u32) -> Result<Option<Value>> {
        Ok(Some(Value::Int(value as i32)))
    }

    #[inline]
    fn serialize_u64(self, value: u64) -> Result<Option<Value>> {
        Ok(Some(Value::Long(value as i64)))
    }

    #[inline]
    fn serialize_f32(self, value: f32) -> Result<Option<Value>> {
        Ok(Some(Value::Float(value)))
    }

    #[inline]
    fn serialize_f64(self, value: f64) -> Result<Option<Value>> {
        Ok(Some(Value::Double(value)))
    }

    #[inline]
    fn serialize_char(self, value: char) -> Result<Option<Value>> {
        Ok(Some(Value::String(value.to_string())))
    }

    #[inline]
    fn serialize_str(self, value: &str) -> Result<Option<Value>> {
        Ok(Some(Value::String(value.to_owned())))
    }

    fn serialize_bytes(self, value: &[u8]) -> Result<Option<Value>> {
        Ok(Some(Value::ByteArray(ByteArray::new(
            value.iter().map(|b| *b as i8).collect(),
        ))))
    }

    #[inline]
    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Option<Value>> {
        self.serialize_str(variant)
    }

    fn serialize_newtype_struct<T>(self, name: &'static str, value: &T) -> Result<Option<Value>>
    where
        T: ?Sized + Serialize,
    {
        match name {
            INT_ARRAY_TOKEN => {
                let data = into_array(value.serialize(self)?, "int array", |v| match v {
                    Value::Int(i) => Some(*i),
                    _ => None,
                })?;
                Ok(Some(Value::IntArray(IntArray::new(data))))
            }
            LONG_ARRAY_TOKEN => {
                let data = into_array(value.serialize(self)?, "long array", |v| match v {
                    Value::Long(i) => Some(*i),
                    _ => None,
                })?;
                Ok(Some(Value::LongArray(LongArray::new(data))))
            }
            _ => value.serialize(self),
        }
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Option<Value>>
    where
        T: ?Sized + Serialize,
    {
        let mut object = Compound::new();
        object.insert(variant.to_owned(), to_present_value(value)?);
        Ok(Some(Value::Compound(object)))
    }

    #[inline]
    fn serialize_none(self) -> Result<Option<Value>> {
        Ok(None)
    }

    #[inline]
    fn serialize_some<T>(self, value: &T) -> Result<Option<Value>>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Option<Value>> {
        Err(no_equivalent("unit"))
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Option<Value>> {
        Err(no_equivalent(name))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(SerializeVec {
            vec: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            name: variant.into(),
            vec: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(SerializeMap {
            map: Compound::with_capacity(len.unwrap_or(0)),
            next_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Ok(SerializeStructVariant {
            name: variant.into(),
            map: Compound::with_capacity(len),
        })
    }

    fn collect_str<T: ?Sized>(self, value: &T) -> Result<Option<Value>>
    where
        T: std::fmt::Display,
    {
        Ok(Some(Value::String(value.to_string())))
    }
}

pub(crate) struct SerializeVec {
    vec: Vec<Value>,
}

pub(crate) struct SerializeTupleVariant {
    name: String,
    vec: Vec<Value>,
}

pub(crate) struct SerializeMap {
    map: Compound,
    next_key: Option<String>,
}

pub(crate) struct SerializeStructVariant {
    name: String,
    map: Compound,
}

impl serde::ser::SerializeSeq for SerializeVec {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_present_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Option<Value>> {
        Ok(Some(Value::List(self.vec)))
    }
}

impl serde::ser::SerializeTuple for SerializeVec {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        serde::ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Option<Value>> {
        serde::ser::SerializeSeq::end(self)
    }
}

impl serde::ser::SerializeTupleStruct for SerializeVec {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        serde::ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Option<Value>> {
        serde::ser::SerializeSeq::end(self)
    }
}

impl serde::ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_present_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Option<Value>> {
        let mut object = Compound::new();
        object.insert(self.name, Value::List(self.vec));
        Ok(Some(Value::Compound(object)))
    }
}

impl serde::ser::SerializeMap for SerializeMap {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.next_key = Some(key_to_string(key)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self.next_key.take().ok_or_else(|| {
            Error::bespoke("serialize_value called before serialize_key".to_string())
        })?;

        // A None field is an absent key.
        if let Some(value) = value.serialize(&mut Serializer)? {
            self.map.insert(key, value);
        }
        Ok(())
    }

    fn end(self) -> Result<Option<Value>> {
        Ok(Some(Value::Compound(self.map)))
    }
}

impl serde::ser::SerializeStruct for SerializeMap {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        serde::ser::SerializeMap::serialize_entry(self, key, value)
    }

    fn end(self) -> Result<Option<Value>> {
        serde::ser::SerializeMap::end(self)
    }
}

impl serde::ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        if let Some(value) = value.serialize(&mut Serializer)? {
            self.map.insert(String::from(key), value);
        }
        Ok(())
    }

    fn end(self) -> Result<Option<Value>> {
        let mut object = Compound::new();
        object.insert(self.name, Value::Compound(self.map));
        Ok(Some(Value::Compound(object)))
    }
}

fn key_must_be_a_string() -> Error {
    Error::bespoke("Key must be a string".to_string())
}

// Compound keys can be anything that classifies as a string or an integer.
fn key_to_string<T>(key: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    match key.serialize(&mut Serializer)? {
        Some(Value::String(s)) => Ok(s),
        Some(Value::Byte(v)) => Ok(v.to_string()),
        Some(Value::Short(v)) => Ok(v.to_string()),
        Some(Value::Int(v)) => Ok(v.to_string()),
        Some(Value::Long(v)) => Ok(v.to_string()),
        _ => Err(key_must_be_a_string()),
    }
}
