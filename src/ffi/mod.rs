//! FFI layer – each sub-module exposes one domain area of the C API.
//!
//! Types and helper functions that are shared across sub-modules live here
//! (macros, `OwnedVec`, status codes, pointer helpers).

use std::ffi::{c_char, CStr, CString};
use std::path::Path;
use std::ptr;

use tracing::debug;
use twotouch_core::CodecError;

// Domain modules
pub mod codec;
pub mod config;


// Re-export all public FFI symbols so `pub use ffi::*;` in lib.rs works.
pub use codec::*;
pub use config::*;

// --- Status codes shared by every result type ---

pub const TT_OK: i32 = 0;
/// Null pointer, invalid UTF-8, or a string with an interior NUL.
pub const TT_INVALID_ARGUMENT: i32 = 1;
pub const TT_UNSUPPORTED_CHARACTER: i32 = 2;
pub const TT_MALFORMED_DIGITS: i32 = 3;
pub const TT_CONFIG_ERROR: i32 = 4;

/// Status code and error location for a codec failure.
/// Returns `(status, offset, ch)`; `ch` is 0 for digit errors. Offsets past
/// `u32::MAX` saturate.
pub(crate) fn codec_status(err: &CodecError) -> (i32, u32, u32) {
    debug!(%err, "codec call rejected");
    let to_u32 = |n: usize| u32::try_from(n).unwrap_or(u32::MAX);
    match *err {
        CodecError::UnsupportedCharacter { ch, position } => {
            (TT_UNSUPPORTED_CHARACTER, to_u32(position), ch as u32)
        }
        CodecError::MalformedDigitSequence { offset, .. } => {
            (TT_MALFORMED_DIGITS, to_u32(offset), 0)
        }
    }
}

/// Safely convert a C string pointer to a `&str`.
/// Returns `None` if the pointer is null or contains invalid UTF-8.
pub(crate) unsafe fn cptr_to_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok()
}

// ---------------------------------------------------------------------------
// FFI boilerplate-reduction macros (crate-internal)
// ---------------------------------------------------------------------------

/// Validate one or more FFI arguments and bind them as safe Rust values,
/// returning `$on_err` from the **calling** function if any check fails.
///
/// | Syntax | What it does |
/// |--------|--------------|
/// | `str: $name = $ptr` | Null-check `$ptr: *const c_char`, convert via [`cptr_to_str`] to `&str`, bind as `$name`. |
///
/// ```ignore
/// ffi_guard!(TtStringList::failed(TT_INVALID_ARGUMENT, 0, 0);
///     str: text = text_ptr,
/// );
/// ```
macro_rules! ffi_guard {
    ($on_err:expr ; ) => {};

    ($on_err:expr ; str: $name:ident = $ptr:expr , $($rest:tt)*) => {
        let Some($name) = (unsafe { $crate::ffi::cptr_to_str($ptr) }) else {
            return $on_err;
        };
        $crate::ffi::ffi_guard!($on_err ; $($rest)*);
    };
}

// Make macros available to sub-modules.
pub(crate) use ffi_guard;

// --- Shared FFI types ---

/// Generic FFI-owned buffer: keeps a `Vec<T>` (whose pointer is exposed to C)
/// alive together with the `CString`s that back any `*const c_char` inside `T`.
pub(crate) struct OwnedVec<T> {
    pub(crate) items: Vec<T>,
    pub(crate) _strings: Vec<CString>,
}

impl<T> OwnedVec<T> {
    /// Box the items + strings, return (data_ptr, len, owned_ptr).
    /// Returns null pointers when `items` is empty.
    pub(crate) fn pack(items: Vec<T>, strings: Vec<CString>) -> (*const T, u32, *mut Self) {
        if items.is_empty() {
            return (ptr::null(), 0, ptr::null_mut());
        }
        let owned = Box::new(Self {
            items,
            _strings: strings,
        });
        // Box::into_raw leaves the Vec's heap buffer where it is.
        let data_ptr = owned.items.as_ptr();
        let len = owned.items.len() as u32;
        let owned_ptr = Box::into_raw(owned);
        (data_ptr, len, owned_ptr)
    }
}

/// Free a heap-allocated value previously created with `Box::into_raw`.
/// No-op if `ptr` is null.
///
/// # Safety
/// `ptr` must come from `Box::into_raw` and must not have been freed already.
pub(crate) unsafe fn owned_drop<T>(ptr: *mut T) {
    if !ptr.is_null() {
        drop(Box::from_raw(ptr));
    }
}

// --- Top-level FFI functions ---

#[no_mangle]
pub extern "C" fn tt_engine_version() -> *const c_char {
    c"0.1.0".as_ptr()
}

#[no_mangle]
#[allow(clippy::unused_unit)]
pub extern "C" fn tt_trace_init(log_dir: *const c_char) {
    ffi_guard!(();
        str: dir_str = log_dir,
    );
    crate::trace_init::init_tracing(Path::new(dir_str));
}
