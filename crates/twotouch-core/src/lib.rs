//! Two-touch (2タッチ) pager input codec.
//!
//! Converts kana text to the digit strings of the two-touch input method and
//! back. The symbol table, settings and phrasebook are process-wide
//! read-only singletons; every conversion is a pure function of its input.

pub mod codec;
mod error;
pub mod phrasebook;
pub mod settings;
pub mod symbol;
pub mod unicode;

pub use codec::{decode, encode};
pub use error::{CodecError, MalformedReason};
pub use phrasebook::pager_codes;
