//! TOML-based application configuration.
//!
//! Stores the local user identity and wizard timing overrides at
//! `~/.config/waymark/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::wizard::WizardTiming;

use super::data_dir;

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/waymark/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Stable local user identity; generated on first use.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Wizard timing (advance delay, inspiration timeout).
    #[serde(default)]
    pub wizard: WizardTiming,
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        data_dir()
            .map(|dir| dir.join("config.toml"))
            .map_err(|e| ConfigError::LoadFailed {
                path: PathBuf::from("~/.config/waymark"),
                message: e.to_string(),
            })
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be parsed, or
    /// if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string())),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// The stable user id, generating and persisting one on first use.
    ///
    /// # Errors
    /// Returns an error if a freshly generated id cannot be persisted.
    pub fn ensure_user_id(&mut self) -> Result<String, ConfigError> {
        if let Some(id) = &self.user_id {
            return Ok(id.clone());
        }
        let id = uuid::Uuid::new_v4().to_string();
        self.user_id = Some(id.clone());
        self.save()?;
        Ok(id)
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key and persist.
    ///
    /// # Errors
    /// Returns an error if the key is unknown, the value cannot be parsed
    /// into the key's type, or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.save()?;
        Ok(())
    }
}

fn get_json_value_by_path<'a>(
    root: &'a serde_json::Value,
    key: &str,
) -> Option<&'a serde_json::Value> {
    if key.is_empty() {
        return None;
    }
    let mut current = root;
    for part in key.split('.') {
        current = current.get(part)?;
    }
    Some(current)
}

fn set_json_value_by_path(
    root: &mut serde_json::Value,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    let unknown = || ConfigError::UnknownKey(key.to_string());
    let invalid = |message: String| ConfigError::InvalidValue {
        key: key.to_string(),
        message,
    };

    let mut parts = key.split('.').peekable();
    if parts.peek().is_none() {
        return Err(unknown());
    }

    let mut current = root;
    while let Some(part) = parts.next() {
        let is_leaf = parts.peek().is_none();
        let obj = current.as_object_mut().ok_or_else(unknown)?;
        if is_leaf {
            let existing = obj.get(part).ok_or_else(unknown)?;
            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                ),
                serde_json::Value::Number(_) => {
                    let n = value.parse::<u64>().map_err(|e| invalid(e.to_string()))?;
                    serde_json::Value::Number(n.into())
                }
                serde_json::Value::String(_) | serde_json::Value::Null => {
                    serde_json::Value::String(value.to_string())
                }
                _ => return Err(invalid("cannot set structured keys".into())),
            };
            obj.insert(part.to_string(), new_value);
            return Ok(());
        }
        current = obj.get_mut(part).ok_or_else(unknown)?;
    }
    Err(unknown())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_the_contractual_timing() {
        let cfg = Config::default();
        assert_eq!(cfg.wizard.advance_delay_ms, 2000);
        assert_eq!(cfg.wizard.inspire_timeout_ms, 4000);
        assert!(cfg.user_id.is_none());
    }

    #[test]
    fn toml_round_trip() {
        let mut cfg = Config::default();
        cfg.user_id = Some("abc-123".into());
        cfg.wizard.advance_delay_ms = 500;

        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.user_id.as_deref(), Some("abc-123"));
        assert_eq!(back.wizard.advance_delay_ms, 500);
        assert_eq!(back.wizard.inspire_timeout_ms, 4000);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let back: Config = toml::from_str("[wizard]\nadvance_delay_ms = 100\n").unwrap();
        assert_eq!(back.wizard.advance_delay_ms, 100);
        assert_eq!(back.wizard.inspire_timeout_ms, 4000);
    }

    #[test]
    fn dotted_get_reads_nested_values() {
        let cfg = Config::default();
        assert_eq!(cfg.get("wizard.advance_delay_ms").as_deref(), Some("2000"));
        assert!(cfg.get("wizard.nope").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn dotted_set_rejects_unknown_keys() {
        let cfg = Config::default();
        let mut json = serde_json::to_value(&cfg).unwrap();
        assert!(matches!(
            set_json_value_by_path(&mut json, "wizard.nope", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            set_json_value_by_path(&mut json, "wizard.advance_delay_ms", "abc"),
            Err(ConfigError::InvalidValue { .. })
        ));
        set_json_value_by_path(&mut json, "wizard.advance_delay_ms", "750").unwrap();
        assert_eq!(json["wizard"]["advance_delay_ms"], 750);
    }
}
