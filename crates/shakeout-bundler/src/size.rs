//! Bundle size accounting across the optimization stages.

use std::fmt;
use std::path::Path;

use serde::Serialize;
use walkdir::WalkDir;

use crate::Result;

/// A point in the optimization pipeline at which size is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BundleStage {
    RawFolder,
    TreeShaken,
    Minified,
    #[serde(rename = "minified+compressed")]
    MinifiedCompressed,
}

impl BundleStage {
    pub const ALL: [BundleStage; 4] = [
        BundleStage::RawFolder,
        BundleStage::TreeShaken,
        BundleStage::Minified,
        BundleStage::MinifiedCompressed,
    ];
}

impl fmt::Display for BundleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BundleStage::RawFolder => "raw-folder",
            BundleStage::TreeShaken => "tree-shaken",
            BundleStage::Minified => "minified",
            BundleStage::MinifiedCompressed => "minified+compressed",
        };
        // `pad` so width specifiers in report tables apply.
        f.pad(name)
    }
}

/// Size of the bundle at one stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleSizeStage {
    pub stage: BundleStage,
    pub bytes: u64,
    pub human_readable_size: String,
    /// Percent saved relative to the raw folder, two decimals
    pub reduction_from_baseline_percent: f64,
}

impl BundleSizeStage {
    pub fn new(stage: BundleStage, bytes: u64, raw_bytes: u64) -> Self {
        Self {
            stage,
            bytes,
            human_readable_size: format_bundle_size(bytes),
            reduction_from_baseline_percent: reduction_percent(raw_bytes, bytes),
        }
    }
}

/// Sizes of one symbol subset at every stage, in pipeline order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleSizeReport {
    pub components: Vec<String>,
    pub stages: Vec<BundleSizeStage>,
}

impl BundleSizeReport {
    /// Build a report from the raw sizes of all four stages.
    pub fn from_sizes(
        components: Vec<String>,
        raw: u64,
        tree_shaken: u64,
        minified: u64,
        compressed: u64,
    ) -> Self {
        let stages = [raw, tree_shaken, minified, compressed]
            .into_iter()
            .zip(BundleStage::ALL)
            .map(|(size, stage)| BundleSizeStage::new(stage, size, raw))
            .collect();
        Self { components, stages }
    }

    pub fn stage(&self, stage: BundleStage) -> Option<&BundleSizeStage> {
        self.stages.iter().find(|s| s.stage == stage)
    }

    pub fn size_of(&self, stage: BundleStage) -> Option<u64> {
        self.stage(stage).map(|s| s.bytes)
    }

    /// Orderings the stage sizes are expected to satisfy but do not.
    ///
    /// An empty list means the report is consistent. The checks are not
    /// enforced when a report is built: unusual inputs can legitimately
    /// violate them, and callers decide what to do.
    pub fn validate(&self) -> Vec<String> {
        let mut violations = Vec::new();
        let size = |stage| self.size_of(stage);

        let mut expect_le = |lower: BundleStage, upper: BundleStage| {
            if let (Some(a), Some(b)) = (size(lower), size(upper)) {
                if a > b {
                    violations.push(format!("{lower} ({a} B) exceeds {upper} ({b} B)"));
                }
            }
        };
        expect_le(BundleStage::TreeShaken, BundleStage::RawFolder);
        expect_le(BundleStage::Minified, BundleStage::RawFolder);
        expect_le(BundleStage::MinifiedCompressed, BundleStage::Minified);

        let reduction = |stage| self.stage(stage).map(|s| s.reduction_from_baseline_percent);
        if let (Some(gzip), Some(min)) = (
            reduction(BundleStage::MinifiedCompressed),
            reduction(BundleStage::Minified),
        ) {
            if gzip < min {
                violations.push(format!(
                    "{} reduction ({gzip}%) is below {} reduction ({min}%)",
                    BundleStage::MinifiedCompressed,
                    BundleStage::Minified
                ));
            }
        }

        violations
    }
}

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Human-readable size: bytes as an integer, larger units with two decimals.
pub fn format_bundle_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.2} {}", UNITS[unit])
    }
}

/// Percent saved going from `baseline` to `size`, rounded to two decimals.
///
/// A zero baseline yields zero.
pub fn reduction_percent(baseline: u64, size: u64) -> f64 {
    if baseline == 0 {
        return 0.0;
    }
    let percent = (baseline as f64 - size as f64) / baseline as f64 * 100.0;
    (percent * 100.0).round() / 100.0
}

/// Recursive byte sum of the regular files under `dir`. Symlinks are not followed.
pub fn directory_size(dir: &Path) -> Result<u64> {
    let mut total = 0;
    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry.map_err(|e| {
            std::io::Error::other(format!("walking {}: {e}", dir.display()))
        })?;
        if entry.file_type().is_file() {
            total += entry.metadata().map_err(std::io::Error::other)?.len();
        }
    }
    Ok(total)
}
