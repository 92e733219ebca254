//! Curated expectations about which tracked symbols bundle together.
//!
//! Both tables are read-only reference data. An [`ExpectedBundleGroup`] is
//! the intended target state for one symbol; a [`KnownIssue`] documents a
//! symbol that currently drags in other tracked symbols. Fixing the issue
//! means deleting its entry.
//!
//! The built-in known issues cover only a few axis and stack components.
//! Libraries with more known issues list them under `knownIssues` in
//! `shakeout.toml`, which replaces the built-in table as a whole:
//!
//! ```toml
//! knownIssues = [
//!     { component = "XAxis", expectedInBundle = ["XAxis", "CartesianAxis"] },
//!     { component = "Legend", expectedInBundle = ["Legend", "Surface"] },
//! ]
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A tracked symbol that is known to pull in other tracked symbols.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnownIssue {
    pub component: String,
    /// Every tracked name currently found when `component` is imported alone,
    /// usually including `component` itself.
    pub expected_in_bundle: Vec<String>,
}

/// Everything expected in the bundle when one symbol is imported alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedBundleGroup {
    pub component: String,
    pub expected_in_bundle: Vec<String>,
}

impl KnownIssue {
    pub fn new<I, S>(component: impl Into<String>, expected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            component: component.into(),
            expected_in_bundle: expected.into_iter().map(Into::into).collect(),
        }
    }

    /// The expected set with the component itself always included.
    pub fn expected_set(&self) -> BTreeSet<String> {
        with_self(&self.component, &self.expected_in_bundle)
    }
}

impl ExpectedBundleGroup {
    pub fn new<I, S>(component: impl Into<String>, expected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            component: component.into(),
            expected_in_bundle: expected.into_iter().map(Into::into).collect(),
        }
    }

    /// The expected set with the component itself always included.
    pub fn expected_set(&self) -> BTreeSet<String> {
        with_self(&self.component, &self.expected_in_bundle)
    }
}

fn with_self(component: &str, expected: &[String]) -> BTreeSet<String> {
    let mut set: BTreeSet<String> = expected.iter().cloned().collect();
    set.insert(component.to_string());
    set
}

/// Defaults only; extend through `knownIssues` in `shakeout.toml`.
pub(crate) fn builtin_known_issues() -> Vec<KnownIssue> {
    vec![
        KnownIssue::new("BarStack", ["BarStack", "Bar"]),
        KnownIssue::new("CartesianGrid", ["CartesianGrid", "CartesianAxis"]),
        KnownIssue::new("XAxis", ["XAxis", "CartesianAxis"]),
        KnownIssue::new("YAxis", ["YAxis", "CartesianAxis"]),
    ]
}

const NICE_TICKS: &[&str] = &["getNiceTickValues"];

pub(crate) fn builtin_expected_groups() -> Vec<ExpectedBundleGroup> {
    let mut groups = vec![
        ExpectedBundleGroup::new(
            "BarStack",
            [
                "Bar",
                "BarStack",
                "Cell",
                "Curve",
                "DefaultZIndexes",
                "getNiceTickValues",
                "Global",
                "Label",
                "LabelList",
                "Layer",
                "Rectangle",
                "Sector",
                "Symbols",
                "Text",
                "Trapezoid",
                "usePlotArea",
                "ZIndexLayer",
            ],
        ),
        ExpectedBundleGroup::new(
            "CartesianGrid",
            [
                "CartesianAxis",
                "CartesianGrid",
                "DefaultZIndexes",
                "getNiceTickValues",
                "Global",
                "Label",
                "Layer",
                "Text",
                "useChartHeight",
                "useChartWidth",
                "ZIndexLayer",
            ],
        ),
        ExpectedBundleGroup::new(
            "XAxis",
            [
                "CartesianAxis",
                "DefaultZIndexes",
                "getNiceTickValues",
                "Global",
                "Label",
                "Layer",
                "Text",
                "XAxis",
                "ZIndexLayer",
            ],
        ),
        ExpectedBundleGroup::new(
            "DefaultLegendContent",
            ["DefaultLegendContent", "Surface", "Symbols"],
        ),
        ExpectedBundleGroup::new(
            "Label",
            ["DefaultZIndexes", "Global", "Label", "Text", "ZIndexLayer"],
        ),
        ExpectedBundleGroup::new(
            "LabelList",
            [
                "DefaultZIndexes",
                "Global",
                "Label",
                "LabelList",
                "Layer",
                "Text",
                "ZIndexLayer",
            ],
        ),
        ExpectedBundleGroup::new(
            "Legend",
            [
                "DefaultLegendContent",
                "Legend",
                "Surface",
                "Symbols",
                "useChartHeight",
                "useChartWidth",
                "useMargin",
            ],
        ),
        ExpectedBundleGroup::new("Rectangle", ["Global", "Rectangle"]),
        ExpectedBundleGroup::new("Text", ["Global", "Text"]),
        ExpectedBundleGroup::new("Trapezoid", ["Global", "Trapezoid"]),
        ExpectedBundleGroup::new("ZIndexLayer", ["DefaultZIndexes", "ZIndexLayer"]),
        ExpectedBundleGroup::new(
            "useCartesianScale",
            [
                "getNiceTickValues",
                "useCartesianScale",
                "useXAxisScale",
                "useYAxisScale",
            ],
        ),
    ];

    // Hooks that only reach the shared tick helper.
    for hook in [
        "useXAxisDomain",
        "useXAxisInverseDataSnapScale",
        "useXAxisInverseScale",
        "useXAxisInverseTickSnapScale",
        "useXAxisTicks",
        "useYAxisDomain",
        "useYAxisInverseDataSnapScale",
        "useYAxisInverseScale",
        "useYAxisInverseTickSnapScale",
        "useYAxisTicks",
        "useActiveTooltipCoordinate",
        "useActiveTooltipDataPoints",
        "useActiveTooltipLabel",
        "useIsTooltipActive",
        "useXAxisScale",
        "useYAxisScale",
    ] {
        groups.push(ExpectedBundleGroup::new(hook, NICE_TICKS.iter().copied()));
    }

    groups
}
