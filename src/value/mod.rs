mod de;
mod ser;

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use serde::Serialize;

use crate::{
    error::Error,
    snbt::{self, ParseOptions, StringifyOptions},
    ByteArray, IntArray, LongArray, Tag,
};

/// An NBT compound. Keys keep the order they were inserted or read in.
pub type Compound = IndexMap<String, Value>;

/// Value is a complete NBT value. It owns its data. Compounds and Lists are
/// recursively decoded. This type takes care to preserve all the information
/// from the original NBT, with the exception of the name of the root tag
/// (which is usually the empty string).
///
/// ```
/// # use nbtcodec::{nbt, Value};
/// # use nbtcodec::error::Result;
/// #
/// # fn main() -> Result<()> {
/// #   let buf = nbt::encode(Some(""), &"{DataVersion: 3465}".parse()?)?;
///     let decoded = nbt::decode(&buf, true, 0)?;
///     match &decoded.value {
///         Value::Compound(c) => match c["DataVersion"] {
///             Value::Int(ver) => println!("Version: {}", ver),
///             _ => {}
///         },
///         _ => {}
///     }
/// #   Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    /// A native boolean. Only produced by parsing SNBT with
    /// [`ParseOptions::use_boolean`]. NBT has no boolean tag, so this is
    /// written to binary as the string `"true"` or `"false"`.
    Bool(bool),
    String(String),
    ByteArray(ByteArray),
    IntArray(IntArray),
    LongArray(LongArray),
    List(Vec<Value>),
    Compound(Compound),
}

impl Value {
    /// The NBT tag this value is written as. This is the discriminator used to
    /// check that lists are homogeneous.
    pub fn tag(&self) -> Tag {
        match self {
            Value::Byte(_) => Tag::Byte,
            Value::Short(_) => Tag::Short,
            Value::Int(_) => Tag::Int,
            Value::Long(_) => Tag::Long,
            Value::Float(_) => Tag::Float,
            Value::Double(_) => Tag::Double,
            Value::Bool(_) | Value::String(_) => Tag::String,
            Value::ByteArray(_) => Tag::ByteArray,
            Value::IntArray(_) => Tag::IntArray,
            Value::LongArray(_) => Tag::LongArray,
            Value::List(_) => Tag::List,
            Value::Compound(_) => Tag::Compound,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Byte(v) => Some(v as i64),
            Value::Short(v) => Some(v as i64),
            Value::Int(v) => Some(v as i64),
            Value::Long(v) => Some(v),
            Value::Float(v) => Some(v as i64),
            Value::Double(v) => Some(v as i64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Byte(v) => Some(v as f64),
            Value::Short(v) => Some(v as f64),
            Value::Int(v) => Some(v as f64),
            Value::Long(v) => Some(v as f64),
            Value::Float(v) => Some(v as f64),
            Value::Double(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Value::Compound(v) => Some(v),
            _ => None,
        }
    }
}

/// Writes compact SNBT using the default [`StringifyOptions`].
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&snbt::stringify(self, &StringifyOptions::default()))
    }
}

/// Parses SNBT using the default [`ParseOptions`].
impl FromStr for Value {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        snbt::parse(s, &ParseOptions::default())
    }
}

// ------------- From<T> impls -------------

macro_rules! from {
    ($type:ty, $variant:ident $(, $($part:tt)+)?) => {
        impl From<$type> for Value {
            fn from(val: $type) -> Self {
                Self::$variant(val$($($part)+)?)
            }
        }
        impl From<&$type> for Value {
            fn from(val: &$type) -> Self {
                Self::$variant(val.to_owned()$($($part)+)?)
            }
        }
    };
}
from!(i8, Byte);
from!(u8, Byte, as i8);
from!(i16, Short);
from!(u16, Short, as i16);
from!(i32, Int);
from!(u32, Int, as i32);
from!(i64, Long);
from!(u64, Long, as i64);
from!(f32, Float);
from!(f64, Double);
from!(bool, Bool);
from!(String, String);
from!(&str, String, .to_owned());
from!(ByteArray, ByteArray);
from!(IntArray, IntArray);
from!(LongArray, LongArray);
from!(Compound, Compound);

impl From<Vec<Value>> for Value {
    fn from(val: Vec<Value>) -> Self {
        Self::List(val)
    }
}

impl FromIterator<(String, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Value::Compound(iter.into_iter().collect())
    }
}

/// Convert a `T` into `nbtcodec::Value`, classifying every Rust value into
/// its NBT tag.
///
/// Maps and structs become compounds. Fields that are `None` are left out of
/// the compound entirely rather than being an error, which makes optional
/// fields behave like absent keys.
///
/// ```
/// use serde::Serialize;
/// use nbtcodec::{to_value, IntArray, Value};
///
/// #[derive(Serialize)]
/// struct Player {
///     name: String,
///     level: i32,
///     pos: IntArray,
///     spawn: Option<IntArray>,
/// }
///
/// let v = to_value(Player {
///     name: "Steve".to_owned(),
///     level: 5,
///     pos: IntArray::new(vec![1, 64, -3]),
///     spawn: None,
/// })
/// .unwrap();
///
/// assert_eq!(v, "{name: Steve, level: 5, pos: [I; 1, 64, -3]}".parse::<Value>().unwrap());
/// ```
///
/// # Errors
///
/// This conversion can fail if `T`'s implementation of `Serialize` decides to
/// fail, if `T` contains a map with non-string keys, or if `T` is a type with
/// no NBT equivalent such as `()`.
pub fn to_value<T>(value: T) -> Result<Value, Error>
where
    T: Serialize,
{
    ser::to_present_value(&value)
}
