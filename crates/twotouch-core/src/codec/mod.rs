//! Kana ↔ two-touch digit conversion.
//!
//! Encoding decomposes text into table symbols and expands every legal
//! digit representation of each one. Decoding scans key pairs left to right
//! with a one-pair lookahead for modifier codes and always yields the
//! canonical kana.

mod decode;
mod encode;

#[cfg(test)]
mod tests;

pub use decode::{decode, decode_with, parse_digits};
pub use encode::{canonicalize, decompose, encode, encode_with};
