use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Marker used when the config file doesn't set one.
pub const DEFAULT_MARKER: char = '!';
/// Highlight style used when the config file doesn't set one.
pub const DEFAULT_STYLE: &str = "color:red;font-weight:bold";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid marker {marker:?} in {config_path}: markers must not be whitespace")]
    InvalidMarker { config_path: PathBuf, marker: char },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Character doubled on each side of a highlighted span.
    pub marker: char,
    /// Inline CSS applied to rendered highlights.
    pub style: String,
    /// Where output files go; defaults to the input's directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER,
            style: DEFAULT_STYLE.to_string(),
            output_dir: None,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        if config.marker.is_whitespace() {
            return Err(ConfigError::InvalidMarker {
                config_path: config_path.to_path_buf(),
                marker: config.marker,
            });
        }

        // Expand shell variables and tilde in the output directory
        config.output_dir = config
            .output_dir
            .map(|dir| Self::expand_path(&dir).unwrap_or(dir));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/markdown-highlight");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        // Should not contain tilde anymore
        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/markdown-highlight/config.toml"));
    }

    #[test]
    fn test_defaults_when_fields_missing() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, "");

        let config = Config::load_from_path(&path).unwrap().unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.marker, '!');
        assert_eq!(config.style, "color:red;font-weight:bold");
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, "marker = \"=\"\n");

        let config = Config::load_from_path(&path).unwrap().unwrap();

        assert_eq!(config.marker, '=');
        assert_eq!(config.style, DEFAULT_STYLE);
        assert!(config.output_dir.is_none());
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let original = Config {
            marker: '~',
            style: "background:yellow".to_string(),
            output_dir: Some(PathBuf::from("/tmp/out")),
        };

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_whitespace_marker_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, "marker = \" \"\n");

        let result = Config::load_from_path(&path);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidMarker { marker: ' ', .. })
        ));
    }

    #[test]
    fn test_multi_char_marker_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, "marker = \"!!\"\n");

        let result = Config::load_from_path(&path);

        assert!(matches!(result, Err(ConfigError::ConfigParseError { .. })));
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = Config::expand_path(&path);

        assert!(expanded.is_some());
        let expanded = expanded.unwrap();
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_output_dir_with_env_var_in_toml() {
        unsafe {
            env::set_var("HIGHLIGHT_OUT", "/custom/out");
        }

        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, "output_dir = \"$HIGHLIGHT_OUT/html\"\n");
        let config = Config::load_from_path(&path).unwrap().unwrap();

        assert_eq!(config.output_dir, Some(PathBuf::from("/custom/out/html")));

        unsafe {
            env::remove_var("HIGHLIGHT_OUT");
        }
    }

    #[test]
    fn test_expand_path_with_absolute_path() {
        let path = PathBuf::from("/absolute/path");
        let expanded = Config::expand_path(&path).unwrap();

        assert_eq!(expanded, path);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested/config.toml");
        let test_config = Config {
            marker: '+',
            ..Config::default()
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }
}
