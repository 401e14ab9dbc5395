use byteorder::{BigEndian, ByteOrder};

use crate::{
    error::{Error, Result},
    ByteArray, Compound, IntArray, LongArray, Tag, Value,
};

/// The result of decoding one tag from a buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    /// Name of the root tag. `None` when decoding an unnamed root.
    pub name: Option<String>,
    pub value: Value,
    /// Offset just past the decoded tag. Decoding can continue from here if
    /// the buffer holds several tags back to back.
    pub offset: usize,
}

/// Decode a root tag from `data` starting at `offset`.
///
/// If `has_name` is true this expects the usual file form: a tag type, a
/// length prefixed name, then the payload. Otherwise it expects the unnamed
/// form used in network packets: a tag type followed directly by the payload.
///
/// ```
/// use nbtcodec::{nbt, Value};
///
/// let data = [8, 0, 2, b'h', b'i', 0, 2, b'o', b'k'];
/// let decoded = nbt::decode(&data, true, 0).unwrap();
/// assert_eq!(decoded.name.as_deref(), Some("hi"));
/// assert_eq!(decoded.value, Value::String("ok".to_owned()));
/// assert_eq!(decoded.offset, data.len());
/// ```
pub fn decode(data: &[u8], has_name: bool, offset: usize) -> Result<Decoded> {
    tracing::trace!(len = data.len(), has_name, offset, "decoding nbt");

    let mut input = Slice { data, offset };
    let result = input.consume_root(has_name);

    match result {
        Ok((name, value)) => Ok(Decoded {
            name,
            value,
            offset: input.offset,
        }),
        Err(e) => {
            tracing::debug!(error = %e, offset = input.offset, "nbt decode failed");
            Err(e)
        }
    }
}

/// Decode the payload of a single tag of type `tag` at `offset`, returning the
/// value and the offset just past it.
pub fn decode_tag(data: &[u8], offset: usize, tag: Tag) -> Result<(Value, usize)> {
    let mut input = Slice { data, offset };
    let value = input.consume_value(tag)?;
    Ok((value, input.offset))
}

/// Decode a named root tag from the start of `data`, discarding the name.
pub fn from_bytes(data: &[u8]) -> Result<Value> {
    decode(data, true, 0).map(|d| d.value)
}

struct Slice<'de> {
    data: &'de [u8],
    offset: usize,
}

impl<'de> Slice<'de> {
    fn consume(&mut self, n: usize) -> Result<&'de [u8]> {
        let end = self
            .offset
            .checked_add(n)
            .filter(|end| *end <= self.data.len())
            .ok_or_else(|| Error::out_of_bounds(self.offset, n, self.data.len()))?;

        let ret = &self.data[self.offset..end];
        self.offset = end;
        Ok(ret)
    }

    fn consume_byte(&mut self) -> Result<u8> {
        Ok(self.consume(1)?[0])
    }

    fn consume_tag(&mut self) -> Result<Tag> {
        let tag = self.consume_byte()?;
        Tag::try_from(tag).map_err(|_| Error::unsupported_tag(tag))
    }

    fn consume_len(&mut self) -> Result<usize> {
        Ok(BigEndian::read_u32(self.consume(4)?) as usize)
    }

    fn consume_str(&mut self) -> Result<String> {
        let len = BigEndian::read_u16(self.consume(2)?) as usize;
        let bytes = self.consume(len)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| Error::nonunicode_string(bytes))
    }

    /// Consume `len` fixed width elements, checking the whole span fits before
    /// reading any of them.
    fn consume_array(&mut self, len: usize, width: usize) -> Result<&'de [u8]> {
        let span = len
            .checked_mul(width)
            .ok_or_else(|| Error::out_of_bounds(self.offset, usize::MAX, self.data.len()))?;
        self.consume(span)
    }

    fn consume_root(&mut self, has_name: bool) -> Result<(Option<String>, Value)> {
        let tag = self.consume_tag()?;
        let name = if has_name && tag != Tag::End {
            Some(self.consume_str()?)
        } else {
            None
        };

        let value = self.consume_value(tag)?;
        Ok((name, value))
    }

    fn consume_value(&mut self, tag: Tag) -> Result<Value> {
        Ok(match tag {
            Tag::Byte => Value::Byte(self.consume_byte()? as i8),
            Tag::Short => Value::Short(BigEndian::read_i16(self.consume(2)?)),
            Tag::Int => Value::Int(BigEndian::read_i32(self.consume(4)?)),
            Tag::Long => Value::Long(BigEndian::read_i64(self.consume(8)?)),
            Tag::Float => Value::Float(BigEndian::read_f32(self.consume(4)?)),
            Tag::Double => Value::Double(BigEndian::read_f64(self.consume(8)?)),
            Tag::String => Value::String(self.consume_str()?),
            Tag::ByteArray => {
                let len = self.consume_len()?;
                let bytes = self.consume_array(len, 1)?;
                Value::ByteArray(ByteArray::new(bytes.iter().map(|b| *b as i8).collect()))
            }
            Tag::IntArray => {
                let len = self.consume_len()?;
                let bytes = self.consume_array(len, 4)?;
                let mut data = vec![0; len];
                BigEndian::read_i32_into(bytes, &mut data);
                Value::IntArray(IntArray::new(data))
            }
            Tag::LongArray => {
                let len = self.consume_len()?;
                let bytes = self.consume_array(len, 8)?;
                let mut data = vec![0; len];
                BigEndian::read_i64_into(bytes, &mut data);
                Value::LongArray(LongArray::new(data))
            }
            Tag::List => {
                let element_tag = self.consume_tag()?;
                let len = self.consume_len()?;

                // An empty list may claim any element type, commonly End.
                if element_tag == Tag::End && len > 0 {
                    return Err(Error::unsupported_tag(Tag::End as u8));
                }

                // Every element takes at least a byte, so a length beyond the
                // remaining input is going to fail. Don't allocate for it.
                let remaining = self.data.len().saturating_sub(self.offset);
                let mut items = Vec::with_capacity(len.min(remaining));
                for _ in 0..len {
                    items.push(self.consume_value(element_tag)?);
                }
                Value::List(items)
            }
            Tag::Compound => {
                let mut compound = Compound::new();
                loop {
                    let tag = self.consume_tag()?;
                    if tag == Tag::End {
                        break;
                    }

                    let name = self.consume_str()?;
                    let value = self.consume_value(tag)?;
                    compound.insert(name, value);
                }
                Value::Compound(compound)
            }
            // End marks the end of a compound, it is never a value itself.
            Tag::End => return Err(Error::unsupported_tag(Tag::End as u8)),
        })
    }
}
