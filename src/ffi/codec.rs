use std::ffi::{c_char, CString};
use std::ptr;

use super::{codec_status, ffi_guard, owned_drop, OwnedVec};
use super::{TT_INVALID_ARGUMENT, TT_OK};
use twotouch_core::CodecError;

// --- String list (encode / pager codes) ---

/// Ordered digit strings returned to the host.
/// On failure `data` is null, `len` is 0, and `error_offset` / `error_char`
/// locate the offending input character (`error_char` is a code point).
#[repr(C)]
pub struct TtStringList {
    pub data: *const *const c_char,
    pub len: u32,
    pub status: i32,
    pub error_offset: u32,
    pub error_char: u32,
    pub(crate) _owned: *mut OwnedVec<*const c_char>,
}

impl TtStringList {
    pub(crate) fn failed(status: i32, error_offset: u32, error_char: u32) -> Self {
        Self {
            data: ptr::null(),
            len: 0,
            status,
            error_offset,
            error_char,
            _owned: ptr::null_mut(),
        }
    }

    fn from_result(result: Result<Vec<String>, CodecError>) -> Self {
        match result {
            Ok(codes) => Self::pack(codes),
            Err(e) => {
                let (status, offset, ch) = codec_status(&e);
                Self::failed(status, offset, ch)
            }
        }
    }

    fn pack(codes: Vec<String>) -> Self {
        let mut strings = Vec::with_capacity(codes.len());
        for code in codes {
            let Ok(cs) = CString::new(code) else {
                return Self::failed(TT_INVALID_ARGUMENT, 0, 0);
            };
            strings.push(cs);
        }
        let items: Vec<*const c_char> = strings.iter().map(|s| s.as_ptr()).collect();
        let (data, len, owned) = OwnedVec::pack(items, strings);
        Self {
            data,
            len,
            status: TT_OK,
            error_offset: 0,
            error_char: 0,
            _owned: owned,
        }
    }
}

/// Encode kana text to every valid two-touch digit string.
#[no_mangle]
pub extern "C" fn tt_encode(text: *const c_char) -> TtStringList {
    ffi_guard!(TtStringList::failed(TT_INVALID_ARGUMENT, 0, 0);
        str: text_str = text,
    );
    TtStringList::from_result(twotouch_core::encode(text_str))
}

/// Phrasebook codes followed by the two-touch encodings of `text`.
#[no_mangle]
pub extern "C" fn tt_pager_codes(text: *const c_char) -> TtStringList {
    ffi_guard!(TtStringList::failed(TT_INVALID_ARGUMENT, 0, 0);
        str: text_str = text,
    );
    TtStringList::from_result(twotouch_core::pager_codes(text_str))
}

#[no_mangle]
pub extern "C" fn tt_string_list_free(list: TtStringList) {
    unsafe { owned_drop(list._owned) };
}

// --- Decode ---

#[repr(C)]
pub struct TtDecodeResult {
    pub text: *const c_char,
    pub status: i32,
    pub error_offset: u32,
    _owned: *mut CString,
}

impl TtDecodeResult {
    fn failed(status: i32, error_offset: u32) -> Self {
        Self {
            text: ptr::null(),
            status,
            error_offset,
            _owned: ptr::null_mut(),
        }
    }

    fn ok(text: String) -> Self {
        let Ok(cs) = CString::new(text) else {
            return Self::failed(TT_INVALID_ARGUMENT, 0);
        };
        let ptr = cs.as_ptr();
        let owned = Box::into_raw(Box::new(cs));
        Self {
            text: ptr,
            status: TT_OK,
            error_offset: 0,
            _owned: owned,
        }
    }
}

/// Decode a digit string to kana in the configured output script.
#[no_mangle]
pub extern "C" fn tt_decode(digits: *const c_char) -> TtDecodeResult {
    ffi_guard!(TtDecodeResult::failed(TT_INVALID_ARGUMENT, 0);
        str: digits_str = digits,
    );
    match twotouch_core::decode(digits_str) {
        Ok(text) => TtDecodeResult::ok(text),
        Err(e) => {
            let (status, offset, _) = codec_status(&e);
            TtDecodeResult::failed(status, offset)
        }
    }
}

#[no_mangle]
pub extern "C" fn tt_decode_free(result: TtDecodeResult) {
    unsafe { owned_drop(result._owned) };
}
