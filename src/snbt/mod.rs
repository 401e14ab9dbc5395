//! Stringified NBT, the text form of NBT used in commands and data packs.
//!
//! ```text
//! {name: Steve, 'display name': "Steve \"the\" Miner", health: 20.0f,
//!  pos: [I; 1, 64, -3], inventory: [{id: dirt, count: 64b}]}
//! ```
//!
//! Numbers carry a suffix for their type: `b` byte, `s` short, none for int,
//! `l` long, `f` float, and `d` or a decimal point for double. Strings can be
//! quoted with either quote, or left unquoted if they only use
//! `0-9 A-Z a-z . + _ -`. A token that looks like a number but has trailing
//! characters or does not fit its type, such as `12abc` or `300b`, is an
//! unquoted string.
//!
//! Parsing does not check that lists are homogeneous. That only matters once
//! the value is encoded to binary, see [`nbt::encode`][crate::nbt::encode].
//!
//! ```
//! use nbtcodec::{snbt, Value};
//!
//! let v = snbt::parse("{a: 1b, b: [1, 2]}", &Default::default()).unwrap();
//! assert_eq!(v.as_compound().unwrap()["a"], Value::Byte(1));
//!
//! let s = snbt::stringify(&v, &snbt::StringifyOptions::default());
//! assert_eq!(s, "{ a: 1b, b: [1, 2] }");
//! ```

mod options;
mod parser;
mod ser;

use serde::Serialize;

use crate::{error::Result, to_value, Value};

pub use options::{ParseOptions, Quote, StringifyOptions};

/// Parse an SNBT document into a [`Value`].
///
/// The whole input must be a single value, surrounded by any amount of
/// whitespace.
///
/// # Errors
///
/// Fails with [`ErrorKind::UnexpectedCharacter`] carrying the byte
/// offset of the problem, [`ErrorKind::UnexpectedEof`] if the input ends
/// inside a value, or [`ErrorKind::InvalidNumber`] if a typed array element
/// does not fit the array.
///
/// [`ErrorKind::UnexpectedCharacter`]: crate::ErrorKind::UnexpectedCharacter
/// [`ErrorKind::UnexpectedEof`]: crate::ErrorKind::UnexpectedEof
/// [`ErrorKind::InvalidNumber`]: crate::ErrorKind::InvalidNumber
pub fn parse(input: &str, options: &ParseOptions) -> Result<Value> {
    tracing::trace!(len = input.len(), ?options, "parsing snbt");

    parser::parse_root(input, options).map_err(|e| {
        tracing::debug!(error = %e, "snbt parse failed");
        e
    })
}

/// Write a [`Value`] as SNBT.
///
/// The output of the default options parses back to an equal value with the
/// default [`ParseOptions`]. With `use_boolean` or `skip_comma` set, parse
/// with the same setting.
///
/// ```
/// use nbtcodec::{snbt::{self, StringifyOptions}, Value};
///
/// let v: Value = "{a: 1, b: 2}".parse().unwrap();
/// let opts = StringifyOptions {
///     break_length: 0,
///     ..StringifyOptions::pretty()
/// };
/// assert_eq!(snbt::stringify(&v, &opts), "{\n    a: 1,\n    b: 2\n}");
/// ```
pub fn stringify(value: &Value, options: &StringifyOptions) -> String {
    tracing::trace!(tag = ?value.tag(), pretty = options.pretty, "stringifying snbt");
    ser::stringify_value(value, options)
}

/// Serialize any `T` to SNBT by first classifying it into a [`Value`] with
/// [`to_value`].
pub fn to_string<T>(value: &T, options: &StringifyOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    Ok(stringify(&to_value(value)?, options))
}
