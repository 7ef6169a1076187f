use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const MAX_PRECISION: u8 = 8;

/// Stores user-configurable shell preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default)]
    pub default_currency_precision: Option<u8>,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for ledger data. Defaults to `<base>/data`.
    pub data_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: Self::default_currency_symbol(),
            default_currency_precision: None,
            ui_color_enabled: Self::default_ui_color_enabled(),
            data_root: None,
        }
    }
}

impl Config {
    pub fn default_currency_symbol() -> String {
        "$".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    /// Decimal places used when rendering amounts.
    pub fn currency_precision(&self) -> u32 {
        u32::from(self.default_currency_precision.unwrap_or(2))
    }

    pub fn resolve_data_root(&self, base: &Path) -> PathBuf {
        match &self.data_root {
            Some(path) => path.clone(),
            None => base.join("data"),
        }
    }

    /// Returns the display value of a single setting.
    pub fn get(&self, key: ConfigKey) -> String {
        match key {
            ConfigKey::Symbol => self.currency_symbol.clone(),
            ConfigKey::Precision => self.currency_precision().to_string(),
            ConfigKey::Color => self.ui_color_enabled.to_string(),
            ConfigKey::DataRoot => self
                .data_root
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "(default)".into()),
        }
    }

    /// Parses `value` and applies it to the setting named by `key`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<ConfigKey, ConfigError> {
        let parsed = ConfigKey::from_str(key)?;
        let trimmed = value.trim();
        let invalid = |reason: &str| ConfigError::InvalidValue {
            key: parsed.to_string(),
            value: trimmed.to_string(),
            reason: reason.to_string(),
        };
        match parsed {
            ConfigKey::Symbol => {
                if trimmed.is_empty() {
                    return Err(invalid("must not be empty"));
                }
                self.currency_symbol = trimmed.to_string();
            }
            ConfigKey::Precision => {
                let precision: u8 = trimmed
                    .parse()
                    .map_err(|_| invalid("expected a whole number"))?;
                if precision > MAX_PRECISION {
                    return Err(invalid("must be between 0 and 8"));
                }
                self.default_currency_precision = Some(precision);
            }
            ConfigKey::Color => {
                self.ui_color_enabled = match trimmed.to_ascii_lowercase().as_str() {
                    "on" | "true" | "yes" => true,
                    "off" | "false" | "no" => false,
                    _ => return Err(invalid("expected on or off")),
                };
            }
            ConfigKey::DataRoot => {
                self.data_root = match trimmed {
                    "" | "default" => None,
                    path => Some(PathBuf::from(path)),
                };
            }
        }
        Ok(parsed)
    }
}

/// Settings editable from the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    Symbol,
    Precision,
    Color,
    DataRoot,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 4] = [
        ConfigKey::Symbol,
        ConfigKey::Precision,
        ConfigKey::Color,
        ConfigKey::DataRoot,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::Symbol => "symbol",
            ConfigKey::Precision => "precision",
            ConfigKey::Color => "color",
            ConfigKey::DataRoot => "data-root",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('_', "-");
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.as_str() == normalized)
            .ok_or_else(|| ConfigError::UnknownKey(value.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.currency_symbol, "$");
        assert!(cfg.ui_color_enabled);
        assert_eq!(cfg.currency_precision(), 2);
        assert!(cfg.data_root.is_none());
    }

    #[test]
    fn retired_keys_in_older_files_are_ignored() {
        let cfg: Config = serde_json::from_str(
            r#"{"locale":"en-GB","currency":"GBP","currency_symbol":"£"}"#,
        )
        .unwrap();
        assert_eq!(cfg.currency_symbol, "£");
        assert!(!serde_json::to_string(&cfg).unwrap().contains("locale"));
    }

    #[test]
    fn removed_keys_are_unknown() {
        for key in ["locale", "currency"] {
            assert!(matches!(
                ConfigKey::from_str(key),
                Err(ConfigError::UnknownKey(_))
            ));
        }
    }

    #[test]
    fn partial_file_keeps_given_values() {
        let cfg: Config = serde_json::from_str(r#"{"ui_color_enabled":false}"#).unwrap();
        assert!(!cfg.ui_color_enabled);
        assert_eq!(cfg.currency_symbol, "$");
        assert!(cfg.ui_color_enabled);
        assert_eq!(cfg.currency_precision(), 2);
        assert!(cfg.data_root.is_none());
    }

    #[test]
    fn keys_accept_underscores() {
        assert_eq!(ConfigKey::from_str("DATA_ROOT").unwrap(), ConfigKey::DataRoot);
        assert!(matches!(
            ConfigKey::from_str("theme"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn data_root_defaults_under_base() {
        let mut cfg = Config::default();
        let base = Path::new("/tmp/mtp");
        assert_eq!(cfg.resolve_data_root(base), base.join("data"));
        cfg.set("data-root", "/srv/ledger").unwrap();
        assert_eq!(cfg.resolve_data_root(base), PathBuf::from("/srv/ledger"));
        cfg.set("data-root", "default").unwrap();
        assert!(cfg.data_root.is_none());
    }
}
