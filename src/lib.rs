//! nbtcodec reads and writes NBT data from *Minecraft: Java Edition*, in both
//! its binary form and its stringified form (SNBT). NBT is used by the game to
//! store world data, player inventories, and to send item data over the
//! network.
//!
//! * For the binary format see [`nbt`]: [`nbt::decode`] and [`nbt::encode`].
//! * For the text format see [`snbt`]: [`snbt::parse`] and [`snbt::stringify`].
//! * For the data model see [`Value`] and [`Tag`].
//! * To turn your own `Serialize` types into a [`Value`] see [`to_value`].
//!
//! Compression is not handled here. Most NBT files on disk are GZip or Zlib
//! compressed, so decompress them first, for example with `flate2`.
//!
//! # Quick example
//!
//! ```
//! use nbtcodec::{nbt, snbt, Value};
//!
//! let value: Value = "{ name: Steve, pos: [I;1,64,-3], health: 20.0f }".parse().unwrap();
//!
//! let bytes = nbt::encode(Some(""), &value).unwrap();
//! let decoded = nbt::decode(&bytes, true, 0).unwrap();
//! assert_eq!(decoded.value, value);
//!
//! let pretty = snbt::stringify(&decoded.value, &snbt::StringifyOptions::pretty());
//! assert_eq!(pretty.parse::<Value>().unwrap(), value);
//! ```
//!
//! # Byte, Int and Long array types
//!
//! NBT has dedicated array types that are distinct from a list of bytes,
//! ints or longs. To capture these in your own structs use [`ByteArray`],
//! [`IntArray`] and [`LongArray`]. A plain `Vec<i32>` becomes an NBT list.

pub mod error;
pub mod nbt;
pub mod snbt;
pub mod value;

mod arrays;

pub use arrays::*;
pub use error::{Error, ErrorKind, Result};
pub use value::{to_value, Compound, Value};

#[cfg(test)]
mod test;

/// An NBT tag. This does not carry the value or the name of the data.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[repr(u8)]
pub enum Tag {
    /// Represents the end of a Compound object.
    End = 0,
    /// Equivalent to i8.
    Byte = 1,
    /// Equivalent to i16.
    Short = 2,
    /// Equivalent to i32.
    Int = 3,
    /// Equivalent to i64
    Long = 4,
    /// Equivalent to f32.
    Float = 5,
    /// Equivalent to f64.
    Double = 6,
    /// Represents as array of Byte (i8).
    ByteArray = 7,
    /// Represents a Unicode string.
    String = 8,
    /// Represents a list of other objects, all elements must have the same tag.
    List = 9,
    /// Represents a struct-like structure.
    Compound = 10,
    /// Represents as array of Int (i32).
    IntArray = 11,
    /// Represents as array of Long (i64).
    LongArray = 12,
}

// Serde newtype names used to signal NBT arrays to our own serializer.
pub(crate) const INT_ARRAY_TOKEN: &str = "__nbtcodec_int_array";
pub(crate) const LONG_ARRAY_TOKEN: &str = "__nbtcodec_long_array";

impl TryFrom<u8> for Tag {
    type Error = ();

    fn try_from(value: u8) -> std::result::Result<Self, ()> {
        use Tag::*;
        Ok(match value {
            0 => End,
            1 => Byte,
            2 => Short,
            3 => Int,
            4 => Long,
            5 => Float,
            6 => Double,
            7 => ByteArray,
            8 => String,
            9 => List,
            10 => Compound,
            11 => IntArray,
            12 => LongArray,
            13..=u8::MAX => return Err(()),
        })
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        tag as u8
    }
}
