//! Two-touch symbol table.
//!
//! Maps every supported kana to the key pairs that enter it, and holds the
//! modifier vocabulary (voiced and semi-voiced marks, small forms, the
//! prolonged sound mark and the syllabic ん). Both the encoder and the
//! decoder read from the same [`SymbolTable`].

mod config;
mod table;

use std::fmt;

pub use config::TableError;
pub use table::{PairEntry, SymbolTable, DEFAULT_TABLE_TOML};

/// A two-digit key pair: row selector then column selector.
///
/// Row digit `0` selects the tenth (わ) row. Kana grid cells use columns
/// 1-5; pairs outside that range are only valid when the table reserves
/// them for a standalone symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DigitPair {
    row: u8,
    column: u8,
}

/// Modifier codes are plain key pairs appended after a base pair.
pub type ModifierCode = DigitPair;

impl DigitPair {
    /// Parse exactly two ASCII digits.
    pub fn parse(s: &str) -> Option<Self> {
        match s.as_bytes() {
            [r, c] => Self::from_ascii(*r, *c),
            _ => None,
        }
    }

    pub(crate) fn from_ascii(row: u8, column: u8) -> Option<Self> {
        if row.is_ascii_digit() && column.is_ascii_digit() {
            Some(Self {
                row: row - b'0',
                column: column - b'0',
            })
        } else {
            None
        }
    }

    pub fn is_grid_cell(self) -> bool {
        (1..=5).contains(&self.column)
    }

    pub(crate) fn push_to(self, out: &mut String) {
        out.push(char::from(b'0' + self.row));
        out.push(char::from(b'0' + self.column));
    }
}

impl fmt::Display for DigitPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row, self.column)
    }
}

/// Kind of modification applied to (or standing in for) a grid kana.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Modifier {
    /// 濁点: か → が
    Voiced,
    /// 半濁点: は → ぱ
    SemiVoiced,
    /// 拗音: や → ゃ
    Palatalized,
    /// 促音: つ → っ
    Geminate,
    /// Small vowels and other small kana: あ → ぁ
    Small,
    /// 長音符 ー
    LongVowel,
    /// 撥音 ん
    SyllabicN,
}

impl Modifier {
    pub const ALL: [Modifier; 7] = [
        Modifier::Voiced,
        Modifier::SemiVoiced,
        Modifier::Palatalized,
        Modifier::Geminate,
        Modifier::Small,
        Modifier::LongVowel,
        Modifier::SyllabicN,
    ];

    /// Standalone kinds are a symbol of their own; attached kinds follow a
    /// base pair.
    pub fn is_standalone(self) -> bool {
        matches!(self, Modifier::LongVowel | Modifier::SyllabicN)
    }

    /// Name used for the kind in table TOML (`[modifiers.<name>]`).
    pub fn name(self) -> &'static str {
        match self {
            Modifier::Voiced => "voiced",
            Modifier::SemiVoiced => "semi_voiced",
            Modifier::Palatalized => "palatalized",
            Modifier::Geminate => "geminate",
            Modifier::Small => "small",
            Modifier::LongVowel => "long_vowel",
            Modifier::SyllabicN => "syllabic_n",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Form {
    /// A member of the kana grid.
    Base,
    /// A grid kana with an attached modifier.
    Modified { base: char, modifier: Modifier },
    /// A reserved pair that is not a grid cell (ん, ー).
    Standalone(Modifier),
}

/// One kana as the table understands it, always in canonical hiragana.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KanaSymbol {
    kana: char,
    form: Form,
}

impl KanaSymbol {
    pub(crate) fn new(kana: char, form: Form) -> Self {
        Self { kana, form }
    }

    pub fn kana(&self) -> char {
        self.kana
    }

    pub fn form(&self) -> Form {
        self.form
    }

    pub fn modifier(&self) -> Option<Modifier> {
        match self.form {
            Form::Base => None,
            Form::Modified { modifier, .. } | Form::Standalone(modifier) => Some(modifier),
        }
    }

    /// The grid kana this symbol is built on; itself for base and
    /// standalone symbols.
    pub fn base(&self) -> char {
        match self.form {
            Form::Modified { base, .. } => base,
            Form::Base | Form::Standalone(_) => self.kana,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_pair_parse() {
        let p = DigitPair::parse("04").unwrap();
        assert!(p.is_grid_cell());
        assert_eq!(p.to_string(), "04");

        assert!(!DigitPair::parse("69").unwrap().is_grid_cell());
        assert_eq!(DigitPair::parse("1"), None);
        assert_eq!(DigitPair::parse("123"), None);
        assert_eq!(DigitPair::parse("1a"), None);
        assert_eq!(DigitPair::parse("１２"), None);
    }

    #[test]
    fn modifier_names_roundtrip() {
        for m in Modifier::ALL {
            assert_eq!(Modifier::from_name(m.name()), Some(m));
        }
        assert_eq!(Modifier::from_name("dakuten"), None);
        assert!(Modifier::SyllabicN.is_standalone());
        assert!(!Modifier::Voiced.is_standalone());
    }
}
