use std::ffi::c_char;

use tracing::debug;
use twotouch_core::phrasebook::Phrasebook;
use twotouch_core::settings;
use twotouch_core::symbol::SymbolTable;

use super::{ffi_guard, TT_CONFIG_ERROR, TT_INVALID_ARGUMENT, TT_OK};

// --- Configuration FFI ---
//
// Each init must run before the first codec call. Once a singleton is
// built, or a custom TOML is already registered, the init returns
// TT_CONFIG_ERROR and the singleton keeps its contents.

fn config_status<E: std::fmt::Display>(what: &str, result: Result<(), E>) -> i32 {
    match result {
        Ok(()) => TT_OK,
        Err(e) => {
            debug!(%e, what, "custom configuration rejected");
            TT_CONFIG_ERROR
        }
    }
}

/// Register a custom symbol table TOML.
#[no_mangle]
pub extern "C" fn tt_init_table(toml: *const c_char) -> i32 {
    ffi_guard!(TT_INVALID_ARGUMENT;
        str: toml_str = toml,
    );
    config_status("table", SymbolTable::init_custom(toml_str.to_string()))
}

/// Register a custom phrasebook TOML.
#[no_mangle]
pub extern "C" fn tt_init_phrasebook(toml: *const c_char) -> i32 {
    ffi_guard!(TT_INVALID_ARGUMENT;
        str: toml_str = toml,
    );
    config_status("phrasebook", Phrasebook::init_custom(toml_str.to_string()))
}

/// Register a custom settings TOML.
#[no_mangle]
pub extern "C" fn tt_init_settings(toml: *const c_char) -> i32 {
    ffi_guard!(TT_INVALID_ARGUMENT;
        str: toml_str = toml,
    );
    config_status("settings", settings::init_custom(toml_str.to_string()))
}
