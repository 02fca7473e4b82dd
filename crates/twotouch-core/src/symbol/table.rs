use std::collections::HashMap;
use std::sync::OnceLock;

use super::config::{parse_table_toml, TableConfig, TableError};
use super::{DigitPair, Form, KanaSymbol, Modifier};

pub const DEFAULT_TABLE_TOML: &str = include_str!("default_table.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();
static INSTANCE: OnceLock<SymbolTable> = OnceLock::new();

/// What a key pair means when it starts a decoding unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairEntry {
    /// A grid kana or a standalone symbol.
    Symbol(KanaSymbol),
    /// A modifier code. Only valid right after a base pair that has a form
    /// for it.
    Modifier,
}

pub struct SymbolTable {
    /// Canonical kana in table order: grid, standalone, then modified forms.
    order: Vec<char>,
    symbols: HashMap<char, KanaSymbol>,
    /// Grid kana -> base pairs; standalone kana -> their codes.
    base_codes: HashMap<char, Vec<DigitPair>>,
    modifier_codes: HashMap<Modifier, Vec<DigitPair>>,
    forms: HashMap<(char, Modifier), char>,
    marks: HashMap<char, Modifier>,
    pairs: HashMap<DigitPair, PairEntry>,
    /// (base kana, code) -> modified kana, for decoder lookahead.
    attached: HashMap<(char, DigitPair), char>,
    encodings: HashMap<char, Vec<String>>,
}

impl SymbolTable {
    /// Set custom TOML before first `global()` call. Fails with
    /// `AlreadyInitialized` once the global table has been built.
    pub fn init_custom(toml_content: String) -> Result<(), TableError> {
        // Validate eagerly
        Self::from_toml(&toml_content)?;
        if INSTANCE.get().is_some() {
            return Err(TableError::AlreadyInitialized);
        }
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| TableError::AlreadyInitialized)
    }

    /// Get or initialize the global singleton.
    pub fn global() -> &'static SymbolTable {
        INSTANCE.get_or_init(|| {
            let toml_str = CUSTOM_TOML
                .get()
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_TABLE_TOML);
            Self::from_toml(toml_str).expect("symbol table TOML must be valid")
        })
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, TableError> {
        let config = parse_table_toml(toml_str)?;
        Builder::default().build(config)
    }

    /// Classify a single character. Only canonical (hiragana) kana and the
    /// standalone symbols are known; marks are reported by [`Self::mark`].
    pub fn lookup_symbol(&self, ch: char) -> Option<KanaSymbol> {
        self.symbols.get(&ch).copied()
    }

    /// Base pairs of the grid kana under `symbol`, canonical first. For a
    /// standalone symbol these are its reserved pairs.
    pub fn base_codes_for(&self, symbol: &KanaSymbol) -> &[DigitPair] {
        self.base_codes
            .get(&symbol.base())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Canonical code of a modifier kind.
    pub fn modifier_code_for(&self, modifier: Modifier) -> Option<DigitPair> {
        self.modifier_codes_for(modifier).first().copied()
    }

    /// Every accepted code of a modifier kind, canonical first.
    pub fn modifier_codes_for(&self, modifier: Modifier) -> &[DigitPair] {
        self.modifier_codes
            .get(&modifier)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every digit string that enters `symbol`, in table order.
    pub fn encodings_for(&self, symbol: &KanaSymbol) -> &[String] {
        self.encodings
            .get(&symbol.kana())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The form of a base symbol with `modifier` attached, if the table has one.
    pub fn attach(&self, symbol: &KanaSymbol, modifier: Modifier) -> Option<KanaSymbol> {
        if symbol.form() != Form::Base {
            return None;
        }
        let modified = self.forms.get(&(symbol.kana(), modifier))?;
        self.lookup_symbol(*modified)
    }

    /// Modifier carried by a mark character such as ゛.
    pub fn mark(&self, ch: char) -> Option<Modifier> {
        self.marks.get(&ch).copied()
    }

    pub fn resolve_pair(&self, pair: DigitPair) -> Option<PairEntry> {
        self.pairs.get(&pair).copied()
    }

    /// Apply a modifier code that follows the pair of `base`.
    pub fn apply_code(&self, base: char, code: DigitPair) -> Option<KanaSymbol> {
        let modified = self.attached.get(&(base, code))?;
        self.lookup_symbol(*modified)
    }

    /// All symbols in table order.
    pub fn symbols(&self) -> impl Iterator<Item = KanaSymbol> + '_ {
        self.order.iter().filter_map(|ch| self.lookup_symbol(*ch))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[derive(Default)]
struct Builder {
    order: Vec<char>,
    symbols: HashMap<char, KanaSymbol>,
    base_codes: HashMap<char, Vec<DigitPair>>,
    modifier_codes: HashMap<Modifier, Vec<DigitPair>>,
    forms: HashMap<(char, Modifier), char>,
    marks: HashMap<char, Modifier>,
    pairs: HashMap<DigitPair, PairEntry>,
    owners: HashMap<DigitPair, String>,
    attached: HashMap<(char, DigitPair), char>,
}

impl Builder {
    fn build(mut self, config: TableConfig) -> Result<SymbolTable, TableError> {
        for (kana, pairs) in config.grid {
            let symbol = self.add_symbol(kana, Form::Base)?;
            for pair in &pairs {
                self.claim(*pair, kana.to_string(), PairEntry::Symbol(symbol))?;
            }
            self.base_codes.insert(kana, pairs);
        }

        let (standalone, attached): (Vec<_>, Vec<_>) = config
            .modifiers
            .into_iter()
            .partition(|m| m.kind.is_standalone());

        for m in standalone {
            // Shape was checked while parsing
            let Some(kana) = m.symbol else {
                return Err(TableError::MissingSymbol(m.kind));
            };
            let symbol = self.add_symbol(kana, Form::Standalone(m.kind))?;
            for code in &m.codes {
                self.claim(*code, kana.to_string(), PairEntry::Symbol(symbol))?;
            }
            self.base_codes.insert(kana, m.codes.clone());
            self.modifier_codes.insert(m.kind, m.codes);
        }

        for m in attached {
            for code in &m.codes {
                // Attached kinds may share a code; (base, code) is checked below.
                if !matches!(self.pairs.get(code), Some(PairEntry::Modifier)) {
                    self.claim(*code, m.kind.to_string(), PairEntry::Modifier)?;
                }
            }
            for (base, modified) in &m.forms {
                if !matches!(self.symbols.get(base), Some(s) if s.form() == Form::Base) {
                    return Err(TableError::UnknownBase {
                        modifier: m.kind,
                        base: *base,
                    });
                }
                self.add_symbol(
                    *modified,
                    Form::Modified {
                        base: *base,
                        modifier: m.kind,
                    },
                )?;
                self.forms.insert((*base, m.kind), *modified);
                for code in &m.codes {
                    if let Some(existing) = self.attached.insert((*base, *code), *modified) {
                        return Err(TableError::CodeConflict {
                            code: *code,
                            first: existing.to_string(),
                            second: modified.to_string(),
                        });
                    }
                }
            }
            for mark in &m.marks {
                if self.symbols.contains_key(mark) || self.marks.insert(*mark, m.kind).is_some() {
                    return Err(TableError::DuplicateKana(*mark));
                }
            }
            self.modifier_codes.insert(m.kind, m.codes);
        }

        // A mark may not shadow a kana defined after it.
        if let Some(mark) = self.marks.keys().find(|m| self.symbols.contains_key(*m)) {
            return Err(TableError::DuplicateKana(*mark));
        }

        let encodings = self.encodings();
        Ok(SymbolTable {
            order: self.order,
            symbols: self.symbols,
            base_codes: self.base_codes,
            modifier_codes: self.modifier_codes,
            forms: self.forms,
            marks: self.marks,
            pairs: self.pairs,
            attached: self.attached,
            encodings,
        })
    }

    fn add_symbol(&mut self, kana: char, form: Form) -> Result<KanaSymbol, TableError> {
        let symbol = KanaSymbol::new(kana, form);
        if self.symbols.insert(kana, symbol).is_some() {
            return Err(TableError::DuplicateKana(kana));
        }
        self.order.push(kana);
        Ok(symbol)
    }

    fn claim(&mut self, pair: DigitPair, owner: String, entry: PairEntry) -> Result<(), TableError> {
        if let Some(first) = self.owners.get(&pair) {
            return Err(TableError::CodeConflict {
                code: pair,
                first: first.clone(),
                second: owner,
            });
        }
        self.owners.insert(pair, owner);
        self.pairs.insert(pair, entry);
        Ok(())
    }

    /// Expand every symbol into its digit strings: base pair x modifier code
    /// for modified kana, in table order.
    fn encodings(&self) -> HashMap<char, Vec<String>> {
        let mut encodings = HashMap::with_capacity(self.order.len());
        for kana in &self.order {
            let Some(symbol) = self.symbols.get(kana) else {
                continue;
            };
            let base_pairs = self
                .base_codes
                .get(&symbol.base())
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            let codes: Vec<String> = match symbol.form() {
                Form::Base | Form::Standalone(_) => {
                    base_pairs.iter().map(DigitPair::to_string).collect()
                }
                Form::Modified { modifier, .. } => {
                    let modifier_codes = self
                        .modifier_codes
                        .get(&modifier)
                        .map(Vec::as_slice)
                        .unwrap_or(&[]);
                    let mut out = Vec::with_capacity(base_pairs.len() * modifier_codes.len());
                    for pair in base_pairs {
                        for code in modifier_codes {
                            let mut s = String::with_capacity(4);
                            pair.push_to(&mut s);
                            code.push_to(&mut s);
                            out.push(s);
                        }
                    }
                    out
                }
            };
            encodings.insert(*kana, codes);
        }
        encodings
    }
}
