use byteorder::{BigEndian, ByteOrder};
use serde::Serialize;

use crate::{
    error::{Error, Result},
    to_value, Tag, Value,
};

const INITIAL_CAPACITY: usize = 256;

/// Encode `value` as binary NBT.
///
/// With `Some(name)` the root is written in the usual file form, a tag type,
/// the name, then the payload. Most files use the empty string as the root
/// name. With `None` the name is left out entirely, giving the unnamed root
/// form used in network packets.
///
/// # Errors
///
/// Fails if a list holds values of more than one tag type, if a string is
/// longer than 65535 bytes, or if an array is longer than `u32::MAX`.
///
/// ```
/// use nbtcodec::{nbt, Value};
///
/// let bytes = nbt::encode(None, &Value::Short(258)).unwrap();
/// assert_eq!(bytes, [2, 1, 2]);
/// ```
pub fn encode(name: Option<&str>, value: &Value) -> Result<Vec<u8>> {
    tracing::trace!(name = ?name, tag = ?value.tag(), "encoding nbt");

    let mut buf = Buffer::with_capacity(INITIAL_CAPACITY);
    let result = buf.write_root(name, value);

    match result {
        Ok(()) => Ok(buf.into_vec()),
        Err(e) => {
            tracing::debug!(error = %e, "nbt encode failed");
            Err(e)
        }
    }
}

/// Serialize any `T` to binary NBT by first classifying it into a [`Value`]
/// with [`to_value`].
///
/// ```
/// use nbtcodec::{nbt, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Slot {
///     id: &'static str,
///     count: i8,
///     tag: Option<String>,
/// }
///
/// let bytes = nbt::to_bytes(Some(""), &Slot { id: "minecraft:dirt", count: 64, tag: None }).unwrap();
/// let value = nbt::from_bytes(&bytes).unwrap();
/// assert_eq!(value, "{id: 'minecraft:dirt', count: 64b}".parse::<Value>().unwrap());
/// ```
pub fn to_bytes<T>(name: Option<&str>, value: &T) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    encode(name, &to_value(value)?)
}

/// A byte buffer that doubles its capacity whenever a write does not fit.
struct Buffer {
    data: Vec<u8>,
    len: usize,
}

impl Buffer {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity],
            len: 0,
        }
    }

    /// Hand out the next `n` bytes of the buffer for writing.
    fn claim(&mut self, n: usize) -> &mut [u8] {
        let needed = self.len + n;
        if needed > self.data.len() {
            let mut capacity = self.data.len().max(1);
            while capacity < needed {
                capacity = capacity.saturating_mul(2);
            }
            self.data.resize(capacity, 0);
        }

        let start = self.len;
        self.len = needed;
        &mut self.data[start..needed]
    }

    fn into_vec(mut self) -> Vec<u8> {
        self.data.truncate(self.len);
        self.data
    }

    fn write_u8(&mut self, v: u8) {
        self.claim(1)[0] = v;
    }

    fn write_all(&mut self, bytes: &[u8]) {
        self.claim(bytes.len()).copy_from_slice(bytes);
    }

    fn write_tag(&mut self, tag: Tag) {
        self.write_u8(tag as u8);
    }

    fn write_size_prefixed_str(&mut self, s: &str) -> Result<()> {
        let len: u16 = s
            .len()
            .try_into()
            .map_err(|_| Error::string_too_long(s.len()))?;
        BigEndian::write_u16(self.claim(2), len);
        self.write_all(s.as_bytes());
        Ok(())
    }

    fn write_len(&mut self, len: usize) -> Result<()> {
        let len: u32 = len.try_into().map_err(|_| Error::len_too_large(len))?;
        BigEndian::write_u32(self.claim(4), len);
        Ok(())
    }

    fn write_root(&mut self, name: Option<&str>, value: &Value) -> Result<()> {
        self.write_tag(value.tag());
        if let Some(name) = name {
            self.write_size_prefixed_str(name)?;
        }
        self.write_payload(value)
    }

    fn write_payload(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Byte(v) => self.write_u8(*v as u8),
            Value::Short(v) => BigEndian::write_i16(self.claim(2), *v),
            Value::Int(v) => BigEndian::write_i32(self.claim(4), *v),
            Value::Long(v) => BigEndian::write_i64(self.claim(8), *v),
            Value::Float(v) => BigEndian::write_f32(self.claim(4), *v),
            Value::Double(v) => BigEndian::write_f64(self.claim(8), *v),
            Value::Bool(v) => self.write_size_prefixed_str(if *v { "true" } else { "false" })?,
            Value::String(v) => self.write_size_prefixed_str(v)?,
            Value::ByteArray(v) => {
                self.write_len(v.len())?;
                for b in v.iter() {
                    self.write_u8(*b as u8);
                }
            }
            Value::IntArray(v) => {
                self.write_len(v.len())?;
                BigEndian::write_i32_into(v, self.claim(v.len() * 4));
            }
            Value::LongArray(v) => {
                self.write_len(v.len())?;
                BigEndian::write_i64_into(v, self.claim(v.len() * 8));
            }
            Value::List(items) => {
                let tag = items.first().map_or(Tag::End, Value::tag);
                self.write_tag(tag);
                self.write_len(items.len())?;
                for item in items {
                    if item.tag() != tag {
                        return Err(Error::heterogeneous_list(tag, item.tag()));
                    }
                    self.write_payload(item)?;
                }
            }
            Value::Compound(compound) => {
                for (name, value) in compound {
                    self.write_tag(value.tag());
                    self.write_size_prefixed_str(name)?;
                    self.write_payload(value)?;
                }
                self.write_tag(Tag::End);
            }
        }
        Ok(())
    }
}
