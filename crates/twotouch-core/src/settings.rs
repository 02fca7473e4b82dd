//! Global settings loaded from TOML, following the same OnceLock pattern as
//! the symbol table.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();
static INSTANCE: OnceLock<Settings> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    if INSTANCE.get().is_some() {
        return Err(SettingsError::AlreadyInitialized);
    }
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub decode: DecodeSettings,
    pub encode: EncodeSettings,
    pub phrasebook: PhrasebookSettings,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecodeSettings {
    pub script: Script,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EncodeSettings {
    pub fold_katakana: bool,
}

impl Default for EncodeSettings {
    fn default() -> Self {
        Self {
            fold_katakana: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhrasebookSettings {
    pub enabled: bool,
}

/// Script of decoded text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    #[default]
    Hiragana,
    Katakana,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s.decode.script, Script::Hiragana);
        assert!(s.encode.fold_katakana);
        assert!(s.phrasebook.enabled);
    }

    #[test]
    fn parse_valid_custom_toml() {
        let toml = r#"
[decode]
script = "katakana"

[encode]
fold_katakana = false

[phrasebook]
enabled = false
"#;
        let s = parse_settings_toml(toml).unwrap();
        assert_eq!(s.decode.script, Script::Katakana);
        assert!(!s.encode.fold_katakana);
        assert!(!s.phrasebook.enabled);
    }

    #[test]
    fn error_unknown_script() {
        let toml = r#"
[decode]
script = "romaji"

[encode]
fold_katakana = true

[phrasebook]
enabled = true
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
        assert!(err.to_string().contains("romaji"));
    }

    #[test]
    fn error_missing_section() {
        let toml = r#"
[decode]
script = "hiragana"
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_settings_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_init_custom_after_settings() {
        settings();
        let err = init_custom(DEFAULT_SETTINGS_TOML.to_string()).unwrap_err();
        assert!(matches!(err, SettingsError::AlreadyInitialized));
    }

    #[test]
    fn error_init_custom_invalid() {
        let err = init_custom("[decode]\n".to_string()).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
