use std::collections::BTreeMap;

use serde::Deserialize;

use super::{DigitPair, Modifier};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCodes {
    One(String),
    Many(Vec<String>),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTable {
    grid: BTreeMap<String, RawCodes>,
    #[serde(default)]
    modifiers: BTreeMap<String, RawModifier>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawModifier {
    codes: Vec<String>,
    #[serde(default)]
    forms: BTreeMap<String, String>,
    #[serde(default)]
    marks: Vec<String>,
    symbol: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[grid] table is empty")]
    EmptyGrid,
    #[error("expected a single character, got {0:?}")]
    NotSingleChar(String),
    #[error("unknown modifier kind: {0}")]
    UnknownModifier(String),
    #[error("invalid code {code:?} for {owner}")]
    InvalidCode { owner: String, code: String },
    #[error("no codes for {0}")]
    NoCodes(String),
    #[error("{0} modifier needs a symbol")]
    MissingSymbol(Modifier),
    #[error("{0} modifier cannot have a symbol")]
    UnexpectedSymbol(Modifier),
    #[error("{0} modifier cannot have forms or marks")]
    UnexpectedForms(Modifier),
    #[error("{modifier} form refers to unknown base {base}")]
    UnknownBase { modifier: Modifier, base: char },
    #[error("kana {0} is defined more than once")]
    DuplicateKana(char),
    #[error("code {code} is claimed by both {first} and {second}")]
    CodeConflict {
        code: DigitPair,
        first: String,
        second: String,
    },
    #[error("symbol table already initialized")]
    AlreadyInitialized,
}

/// Table contents after parsing and per-entry checks. Cross-entry checks
/// (conflicts, unknown bases) happen while the table indexes are built.
#[derive(Debug)]
pub(super) struct TableConfig {
    pub(super) grid: Vec<(char, Vec<DigitPair>)>,
    pub(super) modifiers: Vec<ModifierConfig>,
}

#[derive(Debug)]
pub(super) struct ModifierConfig {
    pub(super) kind: Modifier,
    pub(super) codes: Vec<DigitPair>,
    pub(super) forms: Vec<(char, char)>,
    pub(super) marks: Vec<char>,
    pub(super) symbol: Option<char>,
}

pub(super) fn parse_table_toml(toml_str: &str) -> Result<TableConfig, TableError> {
    let raw: RawTable = toml::from_str(toml_str).map_err(|e| TableError::Parse(e.to_string()))?;

    if raw.grid.is_empty() {
        return Err(TableError::EmptyGrid);
    }

    let mut grid = Vec::with_capacity(raw.grid.len());
    for (key, codes) in raw.grid {
        let kana = single_char(&key)?;
        let codes = match codes {
            RawCodes::One(code) => vec![code],
            RawCodes::Many(codes) => codes,
        };
        let pairs = parse_codes(&key, &codes)?;
        if let Some(bad) = pairs.iter().find(|p| !p.is_grid_cell()) {
            return Err(TableError::InvalidCode {
                owner: key,
                code: bad.to_string(),
            });
        }
        grid.push((kana, pairs));
    }

    let mut modifiers = Vec::with_capacity(raw.modifiers.len());
    for (name, raw_mod) in raw.modifiers {
        let kind = Modifier::from_name(&name).ok_or(TableError::UnknownModifier(name))?;
        let codes = parse_codes(kind.name(), &raw_mod.codes)?;

        let symbol = raw_mod.symbol.as_deref().map(single_char).transpose()?;
        if kind.is_standalone() {
            if symbol.is_none() {
                return Err(TableError::MissingSymbol(kind));
            }
            if !raw_mod.forms.is_empty() || !raw_mod.marks.is_empty() {
                return Err(TableError::UnexpectedForms(kind));
            }
        } else if symbol.is_some() {
            return Err(TableError::UnexpectedSymbol(kind));
        }

        let forms = raw_mod
            .forms
            .iter()
            .map(|(base, modified)| Ok((single_char(base)?, single_char(modified)?)))
            .collect::<Result<Vec<_>, TableError>>()?;
        let marks = raw_mod
            .marks
            .iter()
            .map(|m| single_char(m))
            .collect::<Result<Vec<_>, _>>()?;

        modifiers.push(ModifierConfig {
            kind,
            codes,
            forms,
            marks,
            symbol,
        });
    }
    modifiers.sort_by_key(|m| m.kind);

    Ok(TableConfig { grid, modifiers })
}

fn single_char(s: &str) -> Result<char, TableError> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(TableError::NotSingleChar(s.to_string())),
    }
}

fn parse_codes(owner: &str, codes: &[String]) -> Result<Vec<DigitPair>, TableError> {
    if codes.is_empty() {
        return Err(TableError::NoCodes(owner.to_string()));
    }
    codes
        .iter()
        .map(|code| {
            DigitPair::parse(code).ok_or_else(|| TableError::InvalidCode {
                owner: owner.to_string(),
                code: code.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_toml() {
        let toml = r#"
[grid]
"あ" = "11"
"か" = ["21", "26"]

[modifiers.syllabic_n]
codes = ["03"]
symbol = "ん"
"#;
        let err = parse_table_toml(toml).unwrap_err();
        // 26 is outside the kana columns
        assert!(matches!(err, TableError::InvalidCode { .. }));

        let toml = toml.replace("\"26\"", "\"22\"");
        let config = parse_table_toml(&toml).unwrap();
        assert_eq!(config.grid.len(), 2);
        assert_eq!(config.grid[1].0, 'か');
        assert_eq!(config.grid[1].1.len(), 2);
        assert_eq!(config.modifiers.len(), 1);
        assert_eq!(config.modifiers[0].kind, Modifier::SyllabicN);
        assert_eq!(config.modifiers[0].symbol, Some('ん'));
    }

    #[test]
    fn parse_default_toml() {
        let config = parse_table_toml(super::super::DEFAULT_TABLE_TOML).unwrap();
        assert_eq!(config.grid.len(), 45);
        assert_eq!(config.modifiers.len(), Modifier::ALL.len());
        // sorted by kind
        assert_eq!(config.modifiers[0].kind, Modifier::Voiced);
        assert_eq!(config.modifiers[0].marks, vec!['゛', '\u{3099}']);
    }

    #[test]
    fn error_empty_grid() {
        let err = parse_table_toml("[grid]\n").unwrap_err();
        assert!(matches!(err, TableError::EmptyGrid));
    }

    #[test]
    fn error_multi_char_key() {
        let err = parse_table_toml("[grid]\n\"きゃ\" = \"22\"\n").unwrap_err();
        assert!(matches!(err, TableError::NotSingleChar(_)));
    }

    #[test]
    fn error_bad_code() {
        let err = parse_table_toml("[grid]\n\"あ\" = \"1\"\n").unwrap_err();
        assert!(matches!(err, TableError::InvalidCode { .. }));
        let err = parse_table_toml("[grid]\n\"あ\" = []\n").unwrap_err();
        assert!(matches!(err, TableError::NoCodes(_)));
    }

    #[test]
    fn error_unknown_modifier() {
        let toml = r#"
[grid]
"あ" = "11"

[modifiers.dakuten]
codes = ["04"]
"#;
        let err = parse_table_toml(toml).unwrap_err();
        assert!(matches!(err, TableError::UnknownModifier(ref n) if n == "dakuten"));
    }

    #[test]
    fn error_standalone_shape() {
        let toml = r#"
[grid]
"あ" = "11"

[modifiers.long_vowel]
codes = ["69"]
"#;
        let err = parse_table_toml(toml).unwrap_err();
        assert!(matches!(err, TableError::MissingSymbol(Modifier::LongVowel)));

        let toml = r#"
[grid]
"あ" = "11"

[modifiers.voiced]
codes = ["04"]
symbol = "゛"
"#;
        let err = parse_table_toml(toml).unwrap_err();
        assert!(matches!(err, TableError::UnexpectedSymbol(Modifier::Voiced)));
    }

    #[test]
    fn error_unknown_field() {
        let toml = r#"
[grid]
"あ" = "11"

[modifiers.voiced]
codes = ["04"]
placement = "interleaved"
"#;
        let err = parse_table_toml(toml).unwrap_err();
        assert!(matches!(err, TableError::Parse(_)));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_table_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, TableError::Parse(_)));
    }
}
