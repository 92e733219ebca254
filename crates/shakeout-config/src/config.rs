//! The `ShakeoutConfig` document and its sections.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::curated::{
    ExpectedBundleGroup, KnownIssue, builtin_expected_groups, builtin_known_issues,
};
use crate::error::{ConfigError, Result};

static BUILTIN: Lazy<ShakeoutConfig> = Lazy::new(|| ShakeoutConfig {
    library: LibraryLayout::default(),
    externals: ExternalsConfig::default(),
    tracked: TrackedSymbols::default(),
    known_issues: builtin_known_issues(),
    expected_groups: builtin_expected_groups(),
    analysis: AnalysisSettings::default(),
});

/// Complete configuration. Missing sections fall back to the built-ins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShakeoutConfig {
    pub library: LibraryLayout,
    pub externals: ExternalsConfig,
    pub tracked: TrackedSymbols,
    /// Replaces the built-in table when present; list every issue, including
    /// the built-in ones still wanted
    pub known_issues: Vec<KnownIssue>,
    pub expected_groups: Vec<ExpectedBundleGroup>,
    pub analysis: AnalysisSettings,
}

impl Default for ShakeoutConfig {
    fn default() -> Self {
        BUILTIN.clone()
    }
}

/// Where the compiled library lives, relative to the package root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LibraryLayout {
    /// Directory holding the compiled ES module tree
    pub compiled_dir: PathBuf,
    /// Entry file inside `compiled_dir`
    pub entry_file: PathBuf,
    /// Command that produces the compiled tree, shown when it is missing
    pub build_command: String,
}

impl Default for LibraryLayout {
    fn default() -> Self {
        Self {
            compiled_dir: PathBuf::from("es6"),
            entry_file: PathBuf::from("index.js"),
            build_command: "npm run build-es6".to_string(),
        }
    }
}

impl LibraryLayout {
    pub fn compiled_root(&self, package_root: &Path) -> PathBuf {
        package_root.join(&self.compiled_dir)
    }

    pub fn entry_path(&self, package_root: &Path) -> PathBuf {
        self.compiled_root(package_root).join(&self.entry_file)
    }
}

/// Imports kept out of the bundle besides the declared dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExternalsConfig {
    /// Deep-import paths treated as external verbatim
    pub special: Vec<String>,
    /// Regular expressions; a matching specifier is external
    pub patterns: Vec<String>,
}

impl Default for ExternalsConfig {
    fn default() -> Self {
        Self {
            special: vec!["use-sync-external-store/shim/with-selector".to_string()],
            patterns: vec!["^victory-vendor.*".to_string(), "^es-toolkit.*".to_string()],
        }
    }
}

/// Exported symbols whose co-bundling is checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackedSymbols {
    pub chart: Vec<String>,
    pub cartesian: Vec<String>,
    pub polar: Vec<String>,
}

impl Default for TrackedSymbols {
    fn default() -> Self {
        fn names(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| s.to_string()).collect()
        }

        Self {
            chart: names(&[
                "LineChart",
                "BarChart",
                "AreaChart",
                "ScatterChart",
                "PieChart",
                "RadarChart",
                "RadialBarChart",
                "ComposedChart",
                "FunnelChart",
                "SunburstChart",
                "Treemap",
                "Sankey",
            ]),
            cartesian: names(&[
                "Line",
                "Area",
                "Bar",
                "BarStack",
                "Scatter",
                "XAxis",
                "YAxis",
                "ZAxis",
                "ErrorBar",
                "Brush",
                "ReferenceLine",
                "ReferenceDot",
                "ReferenceArea",
                "CartesianAxis",
                "CartesianGrid",
                "Funnel",
            ]),
            polar: names(&[
                "Pie",
                "Radar",
                "RadialBar",
                "PolarGrid",
                "PolarAngleAxis",
                "PolarRadiusAxis",
            ]),
        }
    }
}

impl TrackedSymbols {
    /// Every tracked name, chart names first, duplicates removed.
    pub fn all(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        self.chart
            .iter()
            .chain(&self.cartesian)
            .chain(&self.polar)
            .filter(|name| seen.insert(name.as_str()))
            .cloned()
            .collect()
    }

    /// Names of one category, `None` for unknown categories.
    pub fn category(&self, name: &str) -> Option<&[String]> {
        match name {
            "chart" => Some(&self.chart),
            "cartesian" => Some(&self.cartesian),
            "polar" => Some(&self.polar),
            _ => None,
        }
    }
}

/// Tuning for trace and sweep runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisSettings {
    /// Import paths reported per traced module
    pub max_paths: usize,
    /// Builds run at once during a sweep, `None` for the CPU count capped at 8
    pub max_parallel_builds: Option<usize>,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            max_paths: 8,
            max_parallel_builds: None,
        }
    }
}

impl ShakeoutConfig {
    /// The built-in configuration.
    pub fn builtin() -> &'static ShakeoutConfig {
        &BUILTIN
    }

    /// Deserialize and validate a config value.
    pub fn from_value(value: Value) -> Result<Self> {
        let config: ShakeoutConfig = serde_json::from_value(value)
            .map_err(|e| ConfigError::invalid("config", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::invalid("config", e.to_string()))
    }

    pub fn known_issue(&self, symbol: &str) -> Option<&KnownIssue> {
        self.known_issues.iter().find(|i| i.component == symbol)
    }

    pub fn expected_group(&self, symbol: &str) -> Option<&ExpectedBundleGroup> {
        self.expected_groups.iter().find(|g| g.component == symbol)
    }

    /// Reject configs that cannot describe a library.
    pub fn validate(&self) -> Result<()> {
        if self.library.compiled_dir.as_os_str().is_empty() {
            return Err(ConfigError::invalid(
                "library.compiledDir",
                "must name the directory holding the compiled modules",
            ));
        }
        if self.library.entry_file.as_os_str().is_empty() {
            return Err(ConfigError::invalid(
                "library.entryFile",
                "must name the compiled entry module",
            ));
        }
        if self.analysis.max_paths == 0 {
            return Err(ConfigError::invalid(
                "analysis.maxPaths",
                "must be at least 1",
            ));
        }
        if self.analysis.max_parallel_builds == Some(0) {
            return Err(ConfigError::invalid(
                "analysis.maxParallelBuilds",
                "must be at least 1",
            ));
        }

        let mut seen = BTreeSet::new();
        for issue in &self.known_issues {
            if !seen.insert(issue.component.as_str()) {
                return Err(ConfigError::Duplicate {
                    kind: "known issue",
                    symbol: issue.component.clone(),
                });
            }
        }
        let mut seen = BTreeSet::new();
        for group in &self.expected_groups {
            if !seen.insert(group.component.as_str()) {
                return Err(ConfigError::Duplicate {
                    kind: "expected group",
                    symbol: group.component.clone(),
                });
            }
        }

        Ok(())
    }
}
