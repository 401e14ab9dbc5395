use std::{fmt, ops::Deref};

use serde::{
    de::{SeqAccess, Visitor},
    Deserialize, Deserializer, Serialize,
};
use serde_bytes::Bytes;

use crate::{INT_ARRAY_TOKEN, LONG_ARRAY_TOKEN};

/// NBT ByteArray, distinct from a list of bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ByteArray {
    data: Vec<i8>,
}

impl ByteArray {
    pub fn new(data: Vec<i8>) -> Self {
        Self { data }
    }

    pub fn into_inner(self) -> Vec<i8> {
        self.data
    }
}

impl Serialize for ByteArray {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Safe to treat [i8] as [u8].
        let data = unsafe { &*(self.data.as_slice() as *const [i8] as *const [u8]) };
        Bytes::new(data).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ByteArray {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ByteArrayVisitor;

        impl<'de> Visitor<'de> for ByteArrayVisitor {
            type Value = ByteArray;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("bytes or a sequence of i8")
            }

            fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(ByteArray::new(v.iter().map(|b| *b as i8).collect()))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut data = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(b) = seq.next_element::<i8>()? {
                    data.push(b);
                }
                Ok(ByteArray::new(data))
            }
        }

        deserializer.deserialize_bytes(ByteArrayVisitor)
    }
}

impl Deref for ByteArray {
    type Target = Vec<i8>;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl From<Vec<i8>> for ByteArray {
    fn from(data: Vec<i8>) -> Self {
        Self::new(data)
    }
}

/// NBT IntArray, distinct from a list of ints.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct IntArray {
    data: Vec<i32>,
}

impl IntArray {
    pub fn new(data: Vec<i32>) -> Self {
        Self { data }
    }

    pub fn into_inner(self) -> Vec<i32> {
        self.data
    }
}

impl Serialize for IntArray {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Other formats see a plain sequence, our value serializer recognises
        // the token and produces an IntArray rather than a List.
        serializer.serialize_newtype_struct(INT_ARRAY_TOKEN, &self.data)
    }
}

impl Deref for IntArray {
    type Target = Vec<i32>;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl From<Vec<i32>> for IntArray {
    fn from(data: Vec<i32>) -> Self {
        Self::new(data)
    }
}

/// NBT LongArray, distinct from a list of longs.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct LongArray {
    data: Vec<i64>,
}

impl LongArray {
    pub fn new(data: Vec<i64>) -> Self {
        Self { data }
    }

    pub fn into_inner(self) -> Vec<i64> {
        self.data
    }
}

impl Serialize for LongArray {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_newtype_struct(LONG_ARRAY_TOKEN, &self.data)
    }
}

impl Deref for LongArray {
    type Target = Vec<i64>;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl From<Vec<i64>> for LongArray {
    fn from(data: Vec<i64>) -> Self {
        Self::new(data)
    }
}
