//! Optional configuration file with environment variable overrides.
//!
//! The config selects the model and API base only. The credential is always
//! argv[1]; it never comes from the config file or the environment.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::adapters::live::imagen::{DEFAULT_API_BASE, DEFAULT_MODEL};

/// Endpoint selection, all fields optional.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Model identifier, e.g. `"imagen-3.0-generate-002"`.
    pub model: Option<String>,
    /// API base URL.
    pub base_url: Option<String>,
}

impl Config {
    /// Load configuration from the given path, or return defaults when the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }

    /// Resolve the model: env override, then config file, then the default.
    #[must_use]
    pub fn model(&self) -> String {
        std::env::var("IMAGEN_BRIDGE_MODEL")
            .ok()
            .or_else(|| self.model.clone())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    /// Resolve the API base URL: env override, then config file, then the
    /// default.
    #[must_use]
    pub fn base_url(&self) -> String {
        std::env::var("IMAGEN_BRIDGE_BASE_URL")
            .ok()
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
    }
}

/// Discover the config file path using the resolution order:
/// 1. `IMAGEN_BRIDGE_CONFIG` environment variable
/// 2. `~/.config/imagen-bridge/config.toml`
#[must_use]
pub fn discover_config_path() -> PathBuf {
    if let Ok(p) = std::env::var("IMAGEN_BRIDGE_CONFIG") {
        return PathBuf::from(p);
    }
    default_config_path()
}

/// Default config path: `~/.config/imagen-bridge/config.toml`.
fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/imagen-bridge/config.toml")
    } else {
        PathBuf::from("imagen-bridge.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_nonexistent_returns_defaults() {
        let config = Config::load(Path::new("/nonexistent/path/config.toml")).unwrap();
        assert!(config.model.is_none());
        assert!(config.base_url.is_none());
    }

    #[test]
    fn load_valid_toml() {
        let dir = std::env::temp_dir().join("imagen_bridge_config_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(
            &path,
            r#"
model = "imagen-3.0-generate-001"
base_url = "https://example.invalid/v1beta"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.model.as_deref(), Some("imagen-3.0-generate-001"));
        assert_eq!(config.base_url.as_deref(), Some("https://example.invalid/v1beta"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_invalid_toml_fails() {
        let dir = std::env::temp_dir().join("imagen_bridge_config_bad_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.toml");
        std::fs::write(&path, "this is not valid toml {{{").unwrap();

        assert!(Config::load(&path).is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn resolution_falls_back_to_defaults() {
        std::env::remove_var("IMAGEN_BRIDGE_MODEL");
        std::env::remove_var("IMAGEN_BRIDGE_BASE_URL");
        let config = Config::default();
        assert_eq!(config.model(), DEFAULT_MODEL);
        assert_eq!(config.base_url(), DEFAULT_API_BASE);
    }

    #[test]
    fn file_values_win_over_defaults() {
        std::env::remove_var("IMAGEN_BRIDGE_MODEL");
        let config = Config { model: Some("imagen-3.0-generate-001".into()), base_url: None };
        assert_eq!(config.model(), "imagen-3.0-generate-001");
    }
}
