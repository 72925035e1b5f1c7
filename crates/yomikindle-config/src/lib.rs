use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::assets::AssetsConfig;
use self::dictionary::DictionaryConfig;
use self::output::OutputConfig;

pub mod assets;
pub mod dictionary;
pub mod output;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub output: OutputConfig,
    pub assets: AssetsConfig,
    pub dictionary: DictionaryConfig,
}

impl Config {
    /// Defaults overridden by environment variables
    pub fn new() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Environment variables take precedence over defaults and file values
    pub fn apply_env(&mut self) {
        self.apply_overrides(&|key: &str| env::var(key).ok());
    }

    pub fn apply_overrides(&mut self, lookup: &impl Fn(&str) -> Option<String>) {
        self.output.apply_overrides(lookup);
        self.assets.apply_overrides(lookup);
    }

    /// Read a JSON config file; absent keys take their defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.output.entries_per_file, 10_000);
        assert_eq!(config.output.index_name, "j");
        assert_eq!(config.output.headword_separator, "・");
        assert!(config.output.first_line_as_headword);
        assert!(!config.output.pretty);
        assert_eq!(config.assets.output_dir, "i");
        assert_eq!(config.assets.batch_size, 30);
        assert_eq!(config.assets.size_unit, "px");
        assert!(config.dictionary.reference_path.is_none());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"output": {"entries_per_file": 50}, "assets": {"size_unit": "em"}}"#)
                .expect("valid config");
        assert_eq!(config.output.entries_per_file, 50);
        assert_eq!(config.output.language, "ja");
        assert_eq!(config.assets.size_unit, "em");
        assert_eq!(config.assets.batch_size, 30);
    }

    #[test]
    fn test_overrides_win_over_file_values() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"output": {"entries_per_file": 50}, "assets": {"batch_size": 4, "output_dir": "img"}}"#,
        )
        .expect("write");

        let vars: HashMap<&str, &str> = [
            ("ENTRIES_PER_FILE", "7"),
            ("ASSET_BATCH_SIZE", "0"),
            ("IMAGE_SIZE_UNIT", "em"),
        ]
        .into_iter()
        .collect();
        let mut config = Config::load(&path).expect("loads");
        config.apply_overrides(&|key: &str| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.output.entries_per_file, 7);
        // zero is rejected, file value stays
        assert_eq!(config.assets.batch_size, 4);
        assert_eq!(config.assets.output_dir, "img");
        assert_eq!(config.assets.size_unit, "em");
    }

    #[test]
    fn test_unset_overrides_keep_defaults() {
        let mut config = Config::default();
        config.apply_overrides(&|_: &str| None);
        assert_eq!(config.output.entries_per_file, 10_000);
        assert_eq!(config.assets.output_dir, "i");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"dictionary": {"reference_path": "/tmp/jmdict"}}"#).expect("write");

        let config = Config::load(&path).expect("loads");
        assert_eq!(config.dictionary.reference_path.as_deref(), Some("/tmp/jmdict"));

        fs::write(&path, "{not json").expect("write");
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));
        assert!(matches!(
            Config::load(&dir.path().join("missing.json")),
            Err(ConfigError::Read { .. })
        ));
    }
}
