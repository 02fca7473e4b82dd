use crate::symbol::{SymbolTable, DEFAULT_TABLE_TOML};

mod roundtrip;

pub(super) fn default_table() -> SymbolTable {
    SymbolTable::from_toml(DEFAULT_TABLE_TOML).unwrap()
}

/// A small table with alternate modifier codes and an alternate grid pair
/// for を, so encodings branch.
pub(super) const ALT_TABLE_TOML: &str = r#"
[grid]
"か" = "21"
"こ" = "25"
"は" = "61"
"ほ" = "65"
"つ" = "43"
"を" = ["02", "82"]

[modifiers.voiced]
codes = ["04", "06"]
marks = ["゛"]

[modifiers.voiced.forms]
"か" = "が"
"こ" = "ご"
"は" = "ば"
"ほ" = "ぼ"

[modifiers.semi_voiced]
codes = ["05", "07"]

[modifiers.semi_voiced.forms]
"は" = "ぱ"
"ほ" = "ぽ"

[modifiers.geminate]
codes = ["00"]

[modifiers.geminate.forms]
"つ" = "っ"

[modifiers.syllabic_n]
codes = ["03"]
symbol = "ん"
"#;

pub(super) fn alt_table() -> SymbolTable {
    SymbolTable::from_toml(ALT_TABLE_TOML).unwrap()
}
