//! Externals resolution.
//!
//! Imports matched here are left out of every bundle: the library's declared
//! runtime dependencies, a few deep-import paths, and vendor packages matched
//! by pattern.

use std::path::Path;

use indexmap::IndexMap;
use regex::Regex;
use serde::Deserialize;
use shakeout_config::ExternalsConfig;

use crate::{Error, Result};

/// The parts of `package.json` that decide externals.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageJson {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub dependencies: IndexMap<String, String>,
    #[serde(default)]
    pub peer_dependencies: IndexMap<String, String>,
}

impl PackageJson {
    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::PackageJson {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| Error::PackageJson {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Dependency names in declaration order, runtime dependencies first.
    pub fn dependency_names(&self) -> impl Iterator<Item = &str> {
        self.dependencies
            .keys()
            .chain(self.peer_dependencies.keys())
            .map(String::as_str)
    }
}

/// One rule deciding whether an import specifier is external.
#[derive(Debug, Clone)]
pub enum ExternalPattern {
    /// Matches the specifier verbatim.
    Exact(String),
    /// Matches a package name and any of its sub-paths.
    Package(String),
    /// Matches when the regular expression finds a match.
    Regex(Regex),
}

impl ExternalPattern {
    pub fn regex(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(ExternalPattern::Regex)
            .map_err(|source| Error::InvalidExternalPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    pub fn matches(&self, specifier: &str) -> bool {
        match self {
            ExternalPattern::Exact(name) => specifier == name,
            ExternalPattern::Package(name) => specifier
                .strip_prefix(name.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/')),
            ExternalPattern::Regex(re) => re.is_match(specifier),
        }
    }
}

/// The resolved external rules for one library.
#[derive(Debug, Clone, Default)]
pub struct Externals {
    patterns: Vec<ExternalPattern>,
}

impl Externals {
    pub fn new(patterns: Vec<ExternalPattern>) -> Self {
        Self { patterns }
    }

    pub fn patterns(&self) -> &[ExternalPattern] {
        &self.patterns
    }

    /// Whether a bare or deep import specifier stays out of the bundle.
    ///
    /// Relative and absolute specifiers are never external.
    pub fn is_external(&self, specifier: &str) -> bool {
        if specifier.starts_with('.') || Path::new(specifier).is_absolute() {
            return false;
        }
        self.patterns.iter().any(|p| p.matches(specifier))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Rules for a parsed manifest: its dependencies and peer dependencies
    /// (with sub-paths), then the configured special paths and patterns.
    pub fn from_manifest(manifest: &PackageJson, config: &ExternalsConfig) -> Result<Self> {
        let mut patterns: Vec<ExternalPattern> = manifest
            .dependency_names()
            .map(|name| ExternalPattern::Package(name.to_string()))
            .collect();
        patterns.extend(
            config
                .special
                .iter()
                .map(|path| ExternalPattern::Exact(path.clone())),
        );
        for pattern in &config.patterns {
            patterns.push(ExternalPattern::regex(pattern)?);
        }

        tracing::debug!(
            package = manifest.name.as_deref().unwrap_or("<unnamed>"),
            dependencies = manifest.dependencies.len(),
            peer_dependencies = manifest.peer_dependencies.len(),
            rules = patterns.len(),
            "externals resolved"
        );

        Ok(Self::new(patterns))
    }
}

/// Build the external rules from `package.json` and the externals config.
pub fn resolve_externals(package_json: &Path, config: &ExternalsConfig) -> Result<Externals> {
    let manifest = PackageJson::read(package_json)?;
    Externals::from_manifest(&manifest, config)
}
