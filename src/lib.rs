// FFI functions perform null checks before dereferencing raw pointers.
// Clippy cannot verify this statically, so we allow it at crate level.
#![allow(clippy::not_unsafe_ptr_arg_deref)]

pub mod ffi;
mod trace_init;

pub use ffi::*;
pub use twotouch_core::{decode, encode, pager_codes, CodecError, MalformedReason};
