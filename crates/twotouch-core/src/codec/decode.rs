use tracing::{debug, debug_span};

use crate::error::{CodecError, MalformedReason};
use crate::settings::{settings, Script};
use crate::symbol::{DigitPair, Form, KanaSymbol, PairEntry, SymbolTable};
use crate::unicode::hiragana_to_katakana;

/// Decode a digit string with the global table, in the configured script.
pub fn decode(digits: &str) -> Result<String, CodecError> {
    decode_with(SymbolTable::global(), digits, settings().decode.script)
}

pub fn decode_with(
    table: &SymbolTable,
    digits: &str,
    script: Script,
) -> Result<String, CodecError> {
    let _span = debug_span!("decode", digits = digits.len()).entered();
    let symbols = parse_digits(table, digits)?;
    debug!(symbols = symbols.len());

    let hiragana: String = symbols.iter().map(KanaSymbol::kana).collect();
    Ok(match script {
        Script::Hiragana => hiragana,
        Script::Katakana => hiragana_to_katakana(&hiragana),
    })
}

/// Parse a digit string into table symbols.
///
/// Each unit is a key pair, optionally followed by one modifier code that
/// the table defines for that base. Lookahead is greedy and never
/// backtracks: modifier codes never start a unit of their own.
pub fn parse_digits(table: &SymbolTable, digits: &str) -> Result<Vec<KanaSymbol>, CodecError> {
    if let Some(offset) = digits.chars().position(|c| !c.is_ascii_digit()) {
        return Err(CodecError::malformed(offset, MalformedReason::NotADigit));
    }
    // All ASCII from here, so byte offsets are char offsets.
    let bytes = digits.as_bytes();
    let mut symbols = Vec::with_capacity(bytes.len() / 2);
    let mut i = 0;

    while i < bytes.len() {
        let Some(pair) = pair_at(bytes, i) else {
            return Err(CodecError::malformed(i, MalformedReason::IncompletePair));
        };

        match table.resolve_pair(pair) {
            Some(PairEntry::Symbol(symbol)) => {
                i += 2;
                let modified = match symbol.form() {
                    Form::Base => {
                        pair_at(bytes, i).and_then(|next| table.apply_code(symbol.kana(), next))
                    }
                    _ => None,
                };
                match modified {
                    Some(modified) => {
                        symbols.push(modified);
                        i += 2;
                    }
                    None => symbols.push(symbol),
                }
            }
            Some(PairEntry::Modifier) => {
                return Err(CodecError::malformed(
                    i,
                    MalformedReason::DanglingModifier,
                ));
            }
            None if !pair.is_grid_cell() => {
                return Err(CodecError::malformed(
                    i,
                    MalformedReason::ColumnOutOfRange,
                ));
            }
            None => {
                return Err(CodecError::malformed(i, MalformedReason::UnassignedPair));
            }
        }
    }

    Ok(symbols)
}

fn pair_at(bytes: &[u8], i: usize) -> Option<DigitPair> {
    match bytes.get(i..i + 2)? {
        [r, c] => DigitPair::from_ascii(*r, *c),
        _ => None,
    }
}
