//! Binary NBT. Use [`decode`] and [`encode`] to go between bytes and
//! [`Value`][crate::Value]s.
//!
//! All numbers are big-endian. Strings are prefixed with their length in
//! bytes as a `u16`, arrays and lists with their element count as a `u32`.
//!
//! A root tag can be named, which is how files store it, or unnamed, which is
//! how newer network packets store it. Pick the form with the `has_name`
//! argument of [`decode`] and the `name` argument of [`encode`].
//!
//! Data is not decompressed for you. Files such as `level.dat` are GZip
//! compressed:
//!
//! ```no_run
//! use flate2::read::GzDecoder;
//! use std::io::Read;
//!
//! let file = std::fs::File::open("level.dat").unwrap();
//! let mut data = vec![];
//! GzDecoder::new(file).read_to_end(&mut data).unwrap();
//!
//! let level = nbtcodec::nbt::decode(&data, true, 0).unwrap();
//! println!("{}", level.value);
//! ```
mod de;
mod ser;

pub use de::{decode, decode_tag, from_bytes, Decoded};
pub use ser::{encode, to_bytes};
