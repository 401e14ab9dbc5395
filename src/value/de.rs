use std::fmt;

use serde::{
    de::{MapAccess, SeqAccess, Visitor},
    Deserialize,
};

use crate::{ByteArray, Compound, Value};

/// Builds a `Value` from any self-describing format.
///
/// Formats that do not carry integer widths, such as JSON, hand over every
/// integer as 64 bits and so produce `Value::Long`.
impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("valid NBT")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::Bool(v))
    }

    fn visit_i8<E>(self, v: i8) -> Result<Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::Byte(v))
    }

    fn visit_i16<E>(self, v: i16) -> Result<Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::Short(v))
    }

    fn visit_i32<E>(self, v: i32) -> Result<Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::Int(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::Long(v))
    }

    fn visit_u8<E>(self, v: u8) -> Result<Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::Byte(v as i8))
    }

    fn visit_u16<E>(self, v: u16) -> Result<Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::Short(v as i16))
    }

    fn visit_u32<E>(self, v: u32) -> Result<Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::Int(v as i32))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Value, E>
    where
        E: serde::de::Error,
    {
        i64::try_from(v)
            .map(Value::Long)
            .map_err(|_| E::custom(format!("integer {} does not fit in a long", v)))
    }

    fn visit_f32<E>(self, v: f32) -> Result<Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::Float(v))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::Double(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::String(v.to_owned()))
    }

    fn visit_string<E>(self, v: String) -> Result<Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::String(v))
    }

    fn visit_bytes<E>(self, v: &[u8]) -> Result<Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::ByteArray(ByteArray::new(
            v.iter().map(|b| *b as i8).collect(),
        )))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        // Homogeneity is only checked when encoding, same as parsed SNBT.
        let mut v = Vec::<Value>::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(el) = seq.next_element()? {
            v.push(el);
        }
        Ok(Value::List(v))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut compound = Compound::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            compound.insert(key, value);
        }
        Ok(Value::Compound(compound))
    }

    fn visit_unit<E>(self) -> Result<Value, E>
    where
        E: serde::de::Error,
    {
        Err(E::custom("null has no nbt equivalent"))
    }
}
