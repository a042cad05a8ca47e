//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`LESSON_*`)
//! 2. Config file (`storefront.toml`)
//! 3. Defaults (this file)
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! store_name = "Downtown Music School"
//! base_path = "/shop"            # app is served under /shop
//! routes_case_sensitive = false  # "/checkout" finds "/Checkout"
//! emit_cart_events = true        # write cart-changed events to the frontend
//! ```
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::env::VarError;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Env var naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "LESSON_CONFIG";

const CONFIG_FILE_NAME: &str = "storefront.toml";

/// Keys [`ConfigState::apply_env`] understands.
const ENV_KEYS: [&str; 4] = [
    "LESSON_STORE_NAME",
    "LESSON_BASE_PATH",
    "LESSON_ROUTES_CASE_SENSITIVE",
    "LESSON_CART_EVENTS",
];

// =============================================================================
// Errors
// =============================================================================

/// Failures while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema.
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A setting has an unusable value.
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

// =============================================================================
// Config File
// =============================================================================

/// Shape of `storefront.toml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub store_name: Option<String>,
    pub base_path: Option<String>,
    pub routes_case_sensitive: Option<bool>,
    pub emit_cart_events: Option<bool>,
}

impl ConfigFile {
    /// Parses config file contents.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }
}

// =============================================================================
// Config State
// =============================================================================

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Store name shown in the page header.
    pub store_name: String,

    /// Prefix the app is served under. Always starts with `/`, and has no
    /// trailing `/` unless it is the root itself.
    pub base_path: String,

    /// Whether route paths match case-sensitively.
    /// Default: false (`/checkout` finds `/Checkout`)
    pub routes_case_sensitive: bool,

    /// Whether cart-changed events are written to the frontend.
    pub emit_cart_events: bool,
}

impl Default for ConfigState {
    /// Returns default configuration suitable for development.
    fn default() -> Self {
        ConfigState {
            store_name: "Lesson Store".to_string(),
            base_path: "/".to_string(),
            routes_case_sensitive: false,
            emit_cart_events: true,
        }
    }
}

impl ConfigState {
    /// Loads configuration from the config file (if any) and the process
    /// environment.
    ///
    /// A missing config file is not an error; defaults apply.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = ConfigState::default();

        if let Some(path) = config_path() {
            if let Some(file) = read_config_file(&path)? {
                info!(path = %path.display(), "Loaded config file");
                config.apply_file(file)?;
            } else {
                debug!(path = %path.display(), "No config file, using defaults");
            }
        }

        config.apply_env(read_env()?)?;
        Ok(config)
    }

    /// Overlays values from a parsed config file.
    pub fn apply_file(&mut self, file: ConfigFile) -> Result<(), ConfigError> {
        if let Some(store_name) = file.store_name {
            self.store_name = store_name;
        }
        if let Some(base_path) = file.base_path {
            self.base_path = normalize_base_path(&base_path)?;
        }
        if let Some(case_sensitive) = file.routes_case_sensitive {
            self.routes_case_sensitive = case_sensitive;
        }
        if let Some(emit) = file.emit_cart_events {
            self.emit_cart_events = emit;
        }
        Ok(())
    }

    /// Overlays `LESSON_*` environment variables.
    ///
    /// ## Environment Variables
    /// - `LESSON_STORE_NAME`: Override store name
    /// - `LESSON_BASE_PATH`: Override base path (e.g., "/shop")
    /// - `LESSON_ROUTES_CASE_SENSITIVE`: "true" / "false"
    /// - `LESSON_CART_EVENTS`: "true" / "false"
    pub fn apply_env<I>(&mut self, vars: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            match key.as_str() {
                "LESSON_STORE_NAME" => self.store_name = value,
                "LESSON_BASE_PATH" => self.base_path = normalize_base_path(&value)?,
                "LESSON_ROUTES_CASE_SENSITIVE" => {
                    self.routes_case_sensitive = parse_flag(&key, &value)?
                }
                "LESSON_CART_EVENTS" => self.emit_cart_events = parse_flag(&key, &value)?,
                _ => {}
            }
        }
        Ok(())
    }
}

/// Where to look for `storefront.toml`.
///
/// `LESSON_CONFIG` wins; otherwise the platform config directory:
/// - **Linux**: `~/.config/lesson-store/storefront.toml`
/// - **macOS**: `~/Library/Application Support/com.lesson.lesson-store/storefront.toml`
/// - **Windows**: `%APPDATA%\lesson\lesson-store\config\storefront.toml`
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(path));
    }

    ProjectDirs::from("com", "lesson", "lesson-store")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Reads the `LESSON_*` keys from the process environment.
///
/// Only those keys are looked at, so unrelated variables that are not
/// valid UTF-8 are ignored.
fn read_env() -> Result<Vec<(String, String)>, ConfigError> {
    let mut vars = Vec::new();
    for key in ENV_KEYS {
        match std::env::var(key) {
            Ok(value) => vars.push((key.to_string(), value)),
            Err(VarError::NotPresent) => {}
            Err(VarError::NotUnicode(_)) => {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    reason: "value is not valid UTF-8".to_string(),
                })
            }
        }
    }
    Ok(vars)
}

fn read_config_file(path: &Path) -> Result<Option<ConfigFile>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => ConfigFile::from_toml_str(&contents).map(Some),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ConfigError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Normalizes a base path: leading `/`, no trailing `/` (except root).
///
/// `""`, `"/"` and `"  "` all mean the root.
pub fn normalize_base_path(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');

    if trimmed
        .chars()
        .any(|c| c.is_whitespace() || c == '?' || c == '#')
    {
        return Err(ConfigError::InvalidValue {
            key: "base_path".to_string(),
            reason: format!("'{}' must not contain whitespace, '?' or '#'", raw),
        });
    }

    if trimmed.is_empty() {
        return Ok("/".to_string());
    }

    if trimmed.starts_with('/') {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("/{}", trimmed))
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            reason: format!("expected true/false, got '{}'", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, PoisonError};

    /// Serializes tests that touch the process environment.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_lesson_env() {
        std::env::remove_var(CONFIG_PATH_ENV);
        for key in ENV_KEYS {
            std::env::remove_var(key);
        }
    }

    fn temp_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "lesson-store-{}-{}.toml",
            std::process::id(),
            name
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = ConfigState::default();
        assert_eq!(config.base_path, "/");
        assert!(!config.routes_case_sensitive);
        assert!(config.emit_cart_events);
    }

    #[test]
    fn test_normalize_base_path() {
        assert_eq!(normalize_base_path("").unwrap(), "/");
        assert_eq!(normalize_base_path("/").unwrap(), "/");
        assert_eq!(normalize_base_path("shop").unwrap(), "/shop");
        assert_eq!(normalize_base_path("/shop/").unwrap(), "/shop");
        assert_eq!(normalize_base_path(" /a/b// ").unwrap(), "/a/b");
        assert!(normalize_base_path("/my shop").is_err());
        assert!(normalize_base_path("/shop?x=1").is_err());
    }

    #[test]
    fn test_apply_file() {
        let file = ConfigFile::from_toml_str(
            r#"
            store_name = "Downtown Music School"
            base_path = "/shop/"
            routes_case_sensitive = true
            "#,
        )
        .unwrap();

        let mut config = ConfigState::default();
        config.apply_file(file).unwrap();

        assert_eq!(config.store_name, "Downtown Music School");
        assert_eq!(config.base_path, "/shop");
        assert!(config.routes_case_sensitive);
        assert!(config.emit_cart_events);
    }

    #[test]
    fn test_unknown_file_keys_rejected() {
        assert!(matches!(
            ConfigFile::from_toml_str("currency = \"USD\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = ConfigState::default();
        config
            .apply_file(ConfigFile {
                store_name: Some("From File".to_string()),
                ..ConfigFile::default()
            })
            .unwrap();
        config
            .apply_env(vars(&[
                ("LESSON_STORE_NAME", "From Env"),
                ("LESSON_BASE_PATH", "lessons"),
                ("LESSON_CART_EVENTS", "off"),
                ("UNRELATED", "ignored"),
            ]))
            .unwrap();

        assert_eq!(config.store_name, "From Env");
        assert_eq!(config.base_path, "/lessons");
        assert!(!config.emit_cart_events);
    }

    #[test]
    fn test_bad_flag_rejected() {
        let mut config = ConfigState::default();
        let err = config
            .apply_env(vars(&[("LESSON_ROUTES_CASE_SENSITIVE", "maybe")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key, .. } if key == "LESSON_ROUTES_CASE_SENSITIVE"));
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let path = std::env::temp_dir().join("lesson-store-does-not-exist.toml");
        assert!(read_config_file(&path).unwrap().is_none());
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(ConfigState::default()).unwrap();
        assert_eq!(json["storeName"], "Lesson Store");
        assert_eq!(json["basePath"], "/");
    }

    #[test]
    fn test_load_layers_file_then_env() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        clear_lesson_env();

        let path = temp_config(
            "layers",
            r#"
            store_name = "From File"
            base_path = "/shop"
            routes_case_sensitive = true
            "#,
        );
        std::env::set_var(CONFIG_PATH_ENV, &path);
        std::env::set_var("LESSON_STORE_NAME", "From Env");
        std::env::set_var("LESSON_CART_EVENTS", "false");

        let loaded = ConfigState::load();
        clear_lesson_env();
        std::fs::remove_file(&path).unwrap();
        let config = loaded.unwrap();

        // env beats file
        assert_eq!(config.store_name, "From Env");
        assert!(!config.emit_cart_events);
        // file beats defaults
        assert_eq!(config.base_path, "/shop");
        assert!(config.routes_case_sensitive);
    }

    #[test]
    fn test_load_surfaces_bad_config_file() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        clear_lesson_env();

        let path = temp_config("bad", "store_name = 42");
        std::env::set_var(CONFIG_PATH_ENV, &path);

        let loaded = ConfigState::load();
        clear_lesson_env();
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(loaded, Err(ConfigError::Parse(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_load_ignores_unrelated_non_utf8_env() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let _guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        clear_lesson_env();

        let not_utf8 = OsStr::from_bytes(&[0x66, 0xff, 0x6f]);
        std::env::set_var("LESSON_TEST_UNRELATED", not_utf8);
        std::env::set_var(
            CONFIG_PATH_ENV,
            std::env::temp_dir().join("lesson-store-does-not-exist.toml"),
        );

        let loaded = ConfigState::load();

        std::env::set_var("LESSON_STORE_NAME", not_utf8);
        let bad_name = ConfigState::load();

        std::env::remove_var("LESSON_TEST_UNRELATED");
        clear_lesson_env();

        assert_eq!(loaded.unwrap(), ConfigState::default());
        assert!(matches!(
            bad_name,
            Err(ConfigError::InvalidValue { key, .. }) if key == "LESSON_STORE_NAME"
        ));
    }
}
