//! gen-statuses configuration management.

use crate::error::{GenerateError, Result};
use crate::text::{DEFAULT_EXCLAMATIONS, DEFAULT_MAX_LENGTH, GenerateOptions, SubstitutionTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusesConfig {
    /// Directory for statuses.json and the cursor file. None means the
    /// platform data directory.
    #[serde(default)]
    pub persist_dir: Option<PathBuf>,

    /// Maximum status length in characters
    #[serde(default = "default_max_length")]
    pub max_length: usize,

    /// Interjections appended to long paragraphs, in rotation order
    #[serde(default = "default_exclamations")]
    pub exclamations: Vec<String>,

    /// Extra substitutions whose replacements trigger "-a" elision
    #[serde(default)]
    pub substitutions: BTreeMap<String, String>,

    /// Extra substitutions that never trigger elision
    #[serde(default)]
    pub plain_substitutions: BTreeMap<String, String>,

    /// Posters that receive each chunk (see status_poster::PosterKind)
    #[serde(default = "default_posters")]
    pub posters: Vec<String>,
}

fn default_max_length() -> usize {
    DEFAULT_MAX_LENGTH
}

fn default_exclamations() -> Vec<String> {
    DEFAULT_EXCLAMATIONS.iter().map(|s| s.to_string()).collect()
}

fn default_posters() -> Vec<String> {
    vec!["console".to_string()]
}

impl Default for StatusesConfig {
    fn default() -> Self {
        Self {
            persist_dir: None,
            max_length: default_max_length(),
            exclamations: default_exclamations(),
            substitutions: BTreeMap::new(),
            plain_substitutions: BTreeMap::new(),
            posters: default_posters(),
        }
    }
}

impl StatusesConfig {
    /// Get the config file path: ~/.config/cli-programs/gen-statuses.toml
    pub fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| {
                GenerateError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "neither HOME nor USERPROFILE is set",
                ))
            })?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("cli-programs")
            .join("gen-statuses.toml"))
    }

    /// Load config from file, returning default if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: StatusesConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.validate()?;
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Reject settings the chunker cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.max_length < 3 {
            return Err(GenerateError::InvalidLimit(self.max_length));
        }
        Ok(())
    }

    /// Build pipeline options: the standard table plus configured extras
    pub fn generate_options(&self) -> GenerateOptions {
        let table = self
            .substitutions
            .iter()
            .fold(SubstitutionTable::standard(), |t, (from, to)| {
                t.with_inflecting(from, to)
            });
        let table = self
            .plain_substitutions
            .iter()
            .fold(table, |t, (from, to)| t.with_plain(from, to));

        GenerateOptions {
            max_length: self.max_length,
            exclamations: self.exclamations.clone(),
            table,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::DialectTransformer;

    #[test]
    fn test_default_config() {
        let config = StatusesConfig::default();
        assert_eq!(config.max_length, 280);
        assert_eq!(config.exclamations.len(), 8);
        assert!(config.persist_dir.is_none());
        assert_eq!(config.posters, vec!["console"]);
    }

    #[test]
    fn test_config_path() {
        let path = StatusesConfig::config_path();
        assert!(path.is_ok());
        let path = path.unwrap();
        assert!(path.ends_with("cli-programs/gen-statuses.toml"));
    }

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
persist_dir = "/var/lib/statuses"
max_length = 500
exclamations = ["Basta!"]

[substitutions]
them = "dem"

[plain_substitutions]
rome = "Roma"
"#;
        let config: StatusesConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.persist_dir, Some(PathBuf::from("/var/lib/statuses")));
        assert_eq!(config.max_length, 500);
        assert_eq!(config.exclamations, vec!["Basta!"]);
        assert_eq!(config.substitutions.get("them").map(String::as_str), Some("dem"));
        assert_eq!(config.plain_substitutions.get("rome").map(String::as_str), Some("Roma"));
    }

    #[test]
    fn test_parse_empty_config() {
        let config: StatusesConfig = toml::from_str("").unwrap();
        assert_eq!(config.max_length, 280);
        assert_eq!(config.exclamations[0], "Capisce?");
        assert!(config.substitutions.is_empty());
    }

    #[test]
    fn test_validate_rejects_tiny_limit() {
        let config = StatusesConfig {
            max_length: 2,
            ..StatusesConfig::default()
        };
        assert!(matches!(config.validate(), Err(GenerateError::InvalidLimit(2))));
    }

    #[test]
    fn test_generate_options_extend_table() {
        let mut config = StatusesConfig::default();
        config.substitutions.insert("them".to_string(), "dem".to_string());
        config.plain_substitutions.insert("rome".to_string(), "Roma".to_string());

        let options = config.generate_options();
        let transformer = DialectTransformer::new(options.table);

        assert_eq!(transformer.transform("Tell them"), "Tell-a dem");
        assert_eq!(transformer.transform("visit rome"), "visit Roma");
        assert_eq!(transformer.transform("that"), "dat");
    }
}
