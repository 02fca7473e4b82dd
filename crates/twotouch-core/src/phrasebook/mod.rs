//! Pager slang lookup.
//!
//! Pager users sent common phrases as short number puns (よろしく → 4649)
//! instead of typing them out. Those codes are not two-touch encodings and
//! never decode back to the phrase, so they live here rather than in the
//! symbol table. [`pager_codes`] puts them ahead of the regular encodings.

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use serde::Deserialize;
use tracing::debug;

use crate::codec::encode_with;
use crate::error::CodecError;
use crate::settings::{settings, EncodeSettings};
use crate::symbol::SymbolTable;
use crate::unicode::{is_hiragana, katakana_to_hiragana};

pub const DEFAULT_PHRASES_TOML: &str = include_str!("default_phrases.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();
static INSTANCE: OnceLock<Phrasebook> = OnceLock::new();

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPhrasebook {
    phrases: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, thiserror::Error)]
pub enum PhrasebookError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[phrases] table is empty")]
    Empty,
    #[error("phrase {0:?} is not kana")]
    NotKana(String),
    #[error("no codes for phrase {0:?}")]
    NoCodes(String),
    #[error("invalid code {code:?} for phrase {phrase:?}")]
    InvalidCode { phrase: String, code: String },
    #[error("phrasebook already initialized")]
    AlreadyInitialized,
}

pub struct Phrasebook {
    /// Hiragana phrase -> codes, in file order.
    entries: HashMap<String, Vec<String>>,
}

impl Phrasebook {
    /// Set custom TOML before first `global()` call.
    pub fn init_custom(toml_content: String) -> Result<(), PhrasebookError> {
        Self::from_toml(&toml_content)?;
        if INSTANCE.get().is_some() {
            return Err(PhrasebookError::AlreadyInitialized);
        }
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| PhrasebookError::AlreadyInitialized)
    }

    /// Get or initialize the global singleton.
    pub fn global() -> &'static Phrasebook {
        INSTANCE.get_or_init(|| {
            let toml_str = CUSTOM_TOML
                .get()
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_PHRASES_TOML);
            Self::from_toml(toml_str).expect("phrasebook TOML must be valid")
        })
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, PhrasebookError> {
        let raw: RawPhrasebook =
            toml::from_str(toml_str).map_err(|e| PhrasebookError::Parse(e.to_string()))?;
        if raw.phrases.is_empty() {
            return Err(PhrasebookError::Empty);
        }

        let mut entries: HashMap<String, Vec<String>> = HashMap::with_capacity(raw.phrases.len());
        for (phrase, codes) in raw.phrases {
            let key = katakana_to_hiragana(&phrase);
            if key.is_empty() || !key.chars().all(|c| is_hiragana(c) || c == 'ー') {
                return Err(PhrasebookError::NotKana(phrase));
            }
            if codes.is_empty() {
                return Err(PhrasebookError::NoCodes(phrase));
            }
            if let Some(bad) = codes
                .iter()
                .find(|c| c.is_empty() || !c.bytes().all(|b| b.is_ascii_digit()))
            {
                return Err(PhrasebookError::InvalidCode {
                    code: bad.clone(),
                    phrase,
                });
            }

            // シー and しー land on the same key
            let slot = entries.entry(key).or_default();
            for code in codes {
                if !slot.contains(&code) {
                    slot.push(code);
                }
            }
        }

        Ok(Self { entries })
    }

    /// Slang codes for an exact phrase; empty when the phrase is unknown.
    pub fn lookup(&self, text: &str) -> &[String] {
        self.entries
            .get(&katakana_to_hiragana(text))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Slang codes followed by the two-touch encodings of `text`, using the
/// global table, phrasebook and settings.
pub fn pager_codes(text: &str) -> Result<Vec<String>, CodecError> {
    let s = settings();
    let book = s.phrasebook.enabled.then(Phrasebook::global);
    pager_codes_with(book, SymbolTable::global(), &s.encode, text)
}

/// If the text cannot be encoded but is a known phrase, the slang codes
/// alone are returned.
pub fn pager_codes_with(
    book: Option<&Phrasebook>,
    table: &SymbolTable,
    opts: &EncodeSettings,
    text: &str,
) -> Result<Vec<String>, CodecError> {
    let phrases = book.map(|b| b.lookup(text)).unwrap_or(&[]);
    debug!(phrase_codes = phrases.len());

    match encode_with(table, opts, text) {
        Ok(encoded) => {
            let mut out = phrases.to_vec();
            for digits in encoded {
                if !out.contains(&digits) {
                    out.push(digits);
                }
            }
            Ok(out)
        }
        Err(_) if !phrases.is_empty() => Ok(phrases.to_vec()),
        Err(e) => Err(e),
    }
}
