//! File-based config discovery.
//!
//! Looks for `shakeout.toml` in the package root, then for a `shakeout`
//! field in `package.json`. When neither exists the built-in configuration
//! is used.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::config::ShakeoutConfig;
use crate::error::{ConfigError, Result};

pub const CONFIG_FILE_NAME: &str = "shakeout.toml";
pub const PACKAGE_JSON_FIELD: &str = "shakeout";

/// Searches a package root for configuration.
///
/// ```no_run
/// use shakeout_config::ConfigDiscovery;
///
/// let config = ConfigDiscovery::new(".").load_or_default().unwrap();
/// println!("compiled tree: {}", config.library.compiled_dir.display());
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find a config file in the root directory.
    pub fn find(&self) -> Option<PathBuf> {
        let toml_path = self.root.join(CONFIG_FILE_NAME);
        if toml_path.is_file() {
            return Some(toml_path);
        }

        let pkg_path = self.root.join("package.json");
        let content = fs::read_to_string(&pkg_path).ok()?;
        let parsed: Value = serde_json::from_str(&content).ok()?;
        match parsed.get(PACKAGE_JSON_FIELD) {
            Some(field) if !field.is_null() => Some(pkg_path),
            _ => None,
        }
    }

    /// Load the discovered config.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if there is nothing to load.
    pub fn load(&self) -> Result<ShakeoutConfig> {
        let path = self
            .find()
            .ok_or_else(|| ConfigError::NotFound(self.root.clone()))?;
        self.load_from(&path)
    }

    /// Load the discovered config, or the built-ins when there is none.
    pub fn load_or_default(&self) -> Result<ShakeoutConfig> {
        match self.find() {
            Some(path) => self.load_from(&path),
            None => {
                tracing::debug!(root = %self.root.display(), "no config found, using built-ins");
                Ok(ShakeoutConfig::default())
            }
        }
    }

    /// Load config from a specific file.
    pub fn load_from(&self, path: &Path) -> Result<ShakeoutConfig> {
        tracing::debug!(path = %path.display(), "loading config");

        if path.file_name() == Some(std::ffi::OsStr::new("package.json")) {
            return self.load_from_package_json(path);
        }

        let content = fs::read_to_string(path)?;
        let toml_val: toml::Value = toml::from_str(&content)
            .map_err(|e| ConfigError::invalid("toml", format!("Invalid TOML syntax: {e}")))?;
        let value = serde_json::to_value(toml_val).map_err(|e| {
            ConfigError::invalid("toml", format!("TOML to JSON conversion failed: {e}"))
        })?;

        ShakeoutConfig::from_value(value)
    }

    fn load_from_package_json(&self, path: &Path) -> Result<ShakeoutConfig> {
        let content = fs::read_to_string(path)?;
        let parsed: Value = serde_json::from_str(&content)
            .map_err(|e| ConfigError::invalid("package.json", format!("Invalid JSON: {e}")))?;

        let field = parsed.get(PACKAGE_JSON_FIELD).ok_or_else(|| {
            ConfigError::invalid(
                PACKAGE_JSON_FIELD,
                "Add a 'shakeout' field to your package.json",
            )
        })?;
        if field.is_null() {
            return Err(ConfigError::invalid(
                PACKAGE_JSON_FIELD,
                "The 'shakeout' field cannot be null",
            ));
        }

        ShakeoutConfig::from_value(field.clone())
    }
}

/// Discover config from the current directory, falling back to the built-ins.
pub fn discover() -> Result<ShakeoutConfig> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(root).load_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn find_returns_none_when_no_config() {
        let dir = TempDir::new().unwrap();
        assert!(ConfigDiscovery::new(dir.path()).find().is_none());
    }

    #[test]
    fn load_returns_not_found_when_no_config() {
        let dir = TempDir::new().unwrap();
        let err = ConfigDiscovery::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn load_or_default_falls_back_to_builtins() {
        let dir = TempDir::new().unwrap();
        let config = ConfigDiscovery::new(dir.path()).load_or_default().unwrap();
        assert_eq!(&config, ShakeoutConfig::builtin());
    }

    #[test]
    fn toml_config_wins_over_package_json() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"
[library]
compiledDir = "dist/esm"

[externals]
patterns = ["^lodash.*"]
"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{ "name": "lib", "shakeout": { "library": { "compiledDir": "lib" } } }"#,
        )
        .unwrap();

        let discovery = ConfigDiscovery::new(dir.path());
        assert_eq!(discovery.find().unwrap(), dir.path().join(CONFIG_FILE_NAME));

        let config = discovery.load().unwrap();
        assert_eq!(config.library.compiled_dir, PathBuf::from("dist/esm"));
        assert_eq!(config.externals.patterns, vec!["^lodash.*"]);
        // sibling fields keep their defaults
        assert_eq!(
            config.externals.special,
            vec!["use-sync-external-store/shim/with-selector"]
        );
    }

    #[test]
    fn toml_known_issues_replace_builtins() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"
knownIssues = [
    { component = "XAxis", expectedInBundle = ["XAxis", "CartesianAxis"] },
    { component = "Legend", expectedInBundle = ["Legend", "Surface"] },
]
"#,
        )
        .unwrap();

        let config = ConfigDiscovery::new(dir.path()).load().unwrap();
        assert_eq!(config.known_issues.len(), 2);
        assert!(config.known_issue("Legend").is_some());
        assert!(config.known_issue("BarStack").is_none());
        assert!(config.expected_group("Text").is_some());
    }

    #[test]
    fn package_json_field_is_discovered() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{ "name": "lib", "shakeout": { "tracked": { "chart": ["Gauge"] } } }"#,
        )
        .unwrap();

        let config = ConfigDiscovery::new(dir.path()).load().unwrap();
        assert_eq!(config.tracked.chart, vec!["Gauge"]);
        assert_eq!(config.tracked.polar.len(), 6);
    }

    #[test]
    fn package_json_without_field_is_ignored() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), r#"{ "name": "lib" }"#).unwrap();
        assert!(ConfigDiscovery::new(dir.path()).find().is_none());
    }

    #[test]
    fn invalid_toml_is_reported() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "library = [").unwrap();
        let err = ConfigDiscovery::new(dir.path()).load().unwrap_err();
        assert!(err.to_string().contains("toml"));
    }
}
