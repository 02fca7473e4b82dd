//! Property-based tests for the encode/decode round trip.

use proptest::prelude::*;

use super::alt_table;
use crate::codec::{canonicalize, decode, decode_with, encode, encode_with};
use crate::settings::{EncodeSettings, Script};
use crate::symbol::{KanaSymbol, Modifier, SymbolTable, DEFAULT_TABLE_TOML};
use crate::unicode::hiragana_to_katakana;

fn arb_text(table: &SymbolTable, max_len: usize) -> impl Strategy<Value = String> {
    let kana: Vec<char> = table.symbols().map(|s| s.kana()).collect();
    prop::collection::vec(prop::sample::select(kana), 0..max_len)
        .prop_map(|chars| chars.into_iter().collect())
}

fn arb_default_text() -> impl Strategy<Value = String> {
    let table = SymbolTable::from_toml(DEFAULT_TABLE_TOML).unwrap();
    arb_text(&table, 16)
}

fn arb_alt_text() -> impl Strategy<Value = String> {
    arb_text(&alt_table(), 6)
}

/// One way of typing `symbol`: hiragana, katakana, or a base kana in either
/// script followed by a mark character.
fn spelling(symbol: KanaSymbol, pick: usize) -> String {
    let marks: &[char] = match symbol.modifier() {
        Some(Modifier::Voiced) => &['゛', '\u{3099}'],
        Some(Modifier::SemiVoiced) => &['゜', '\u{309A}'],
        _ => &[],
    };
    let kana = symbol.kana().to_string();
    let base = symbol.base().to_string();
    let mut options = vec![hiragana_to_katakana(&kana), kana];
    for mark in marks {
        options.push(format!("{base}{mark}"));
        options.push(format!("{}{mark}", hiragana_to_katakana(&base)));
    }
    options.swap_remove(pick % options.len())
}

/// Mixed-script text with marks, paired with its canonical hiragana.
fn arb_spelled_text() -> impl Strategy<Value = (String, String)> {
    let table = SymbolTable::from_toml(DEFAULT_TABLE_TOML).unwrap();
    let symbols: Vec<KanaSymbol> = table.symbols().collect();
    prop::collection::vec((prop::sample::select(symbols), 0usize..6), 0..12).prop_map(
        |picks| {
            let text: String = picks.iter().map(|&(s, pick)| spelling(s, pick)).collect();
            let canonical: String = picks.iter().map(|(s, _)| s.kana()).collect();
            (text, canonical)
        },
    )
}

proptest! {
    #[test]
    fn every_encoding_decodes_to_input(text in arb_default_text()) {
        let variants = encode(&text).unwrap();
        prop_assert!(!variants.is_empty());
        for digits in &variants {
            prop_assert_eq!(decode(digits).unwrap(), text.clone());
        }
    }

    #[test]
    fn every_spelling_decodes_to_canonical_form((text, canonical) in arb_spelled_text()) {
        let table = SymbolTable::global();
        let opts = EncodeSettings::default();
        prop_assert_eq!(canonicalize(table, &opts, &text).unwrap(), canonical.clone());
        for digits in encode(&text).unwrap() {
            prop_assert_eq!(decode(&digits).unwrap(), canonical.clone());
        }
    }

    #[test]
    fn every_alternate_decodes_to_input(text in arb_alt_text()) {
        let table = alt_table();
        let variants = encode_with(&table, &EncodeSettings::default(), &text).unwrap();
        prop_assert!(!variants.is_empty());

        let mut unique = variants.clone();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(unique.len(), variants.len());

        for digits in &variants {
            prop_assert_eq!(
                decode_with(&table, digits, Script::Hiragana).unwrap(),
                text.clone()
            );
        }
    }

    #[test]
    fn encode_is_deterministic(text in arb_alt_text()) {
        let table = alt_table();
        let opts = EncodeSettings::default();
        prop_assert_eq!(
            encode_with(&table, &opts, &text),
            encode_with(&table, &opts, &text)
        );
    }

    #[test]
    fn decoded_text_reencodes_to_input(digits in "[0-9]{0,24}") {
        let decoded = decode(&digits);
        prop_assert_eq!(decoded.clone(), decode(&digits));
        if let Ok(text) = decoded {
            // The default table has one encoding per symbol.
            prop_assert_eq!(encode(&text).unwrap(), vec![digits]);
        }
    }
}
