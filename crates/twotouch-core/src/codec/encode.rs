use std::collections::HashSet;

use tracing::{debug, debug_span};

use crate::error::CodecError;
use crate::settings::{settings, EncodeSettings};
use crate::symbol::{KanaSymbol, SymbolTable};
use crate::unicode::katakana_to_hiragana_char;

/// Encode kana text with the global table and settings.
///
/// Returns every distinct digit string that enters `text`; at least one for
/// any supported input. Empty text yields a single empty string.
pub fn encode(text: &str) -> Result<Vec<String>, CodecError> {
    encode_with(SymbolTable::global(), &settings().encode, text)
}

pub fn encode_with(
    table: &SymbolTable,
    opts: &EncodeSettings,
    text: &str,
) -> Result<Vec<String>, CodecError> {
    let _span = debug_span!("encode").entered();
    let symbols = decompose(table, opts, text)?;
    let variants = expand(table, &symbols);
    debug!(symbols = symbols.len(), variants = variants.len());
    Ok(variants)
}

/// Split `text` into table symbols, one per character.
///
/// Mark characters (゛, U+3099, ...) are not symbols of their own: they
/// turn the preceding base kana into its modified form.
pub fn decompose(
    table: &SymbolTable,
    opts: &EncodeSettings,
    text: &str,
) -> Result<Vec<KanaSymbol>, CodecError> {
    let mut symbols: Vec<KanaSymbol> = Vec::with_capacity(text.len() / 3);

    for (position, ch) in text.chars().enumerate() {
        if let Some(modifier) = table.mark(ch) {
            let prev = symbols.last_mut();
            match prev.and_then(|p| table.attach(p, modifier).map(|m| (p, m))) {
                Some((prev, modified)) => *prev = modified,
                None => return Err(CodecError::UnsupportedCharacter { ch, position }),
            }
            continue;
        }

        let folded = if opts.fold_katakana {
            katakana_to_hiragana_char(ch)
        } else {
            ch
        };
        let symbol = table
            .lookup_symbol(folded)
            .ok_or(CodecError::UnsupportedCharacter { ch, position })?;
        symbols.push(symbol);
    }

    Ok(symbols)
}

/// The canonical kana spelling of `text`: katakana folded (when enabled)
/// and marks composed into the preceding kana. Every encoding of `text`
/// decodes to this string.
pub fn canonicalize(
    table: &SymbolTable,
    opts: &EncodeSettings,
    text: &str,
) -> Result<String, CodecError> {
    let symbols = decompose(table, opts, text)?;
    Ok(symbols.iter().map(KanaSymbol::kana).collect())
}

/// Cartesian product of each symbol's encodings, leftmost symbol outermost.
fn expand(table: &SymbolTable, symbols: &[KanaSymbol]) -> Vec<String> {
    let mut acc = vec![String::with_capacity(symbols.len() * 2)];

    for symbol in symbols {
        let codes = table.encodings_for(symbol);
        if let [only] = codes {
            for prefix in &mut acc {
                prefix.push_str(only);
            }
            continue;
        }

        let mut next = Vec::with_capacity(acc.len() * codes.len());
        for prefix in &acc {
            for code in codes {
                let mut s = String::with_capacity(prefix.len() + code.len());
                s.push_str(prefix);
                s.push_str(code);
                next.push(s);
            }
        }
        acc = next;
    }

    let mut seen = HashSet::with_capacity(acc.len());
    acc.retain(|s| seen.insert(s.clone()));
    acc
}
