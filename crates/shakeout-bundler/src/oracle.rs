//! Verdicts on which tracked symbols a single-symbol bundle should contain.

use std::collections::BTreeSet;

use serde::Serialize;
use shakeout_config::{ExpectedBundleGroup, KnownIssue, ShakeoutConfig};

/// Difference between a detected and an expected set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetDiff {
    /// Detected but not expected
    pub only_detected: BTreeSet<String>,
    /// Expected but not detected
    pub only_expected: BTreeSet<String>,
}

impl SetDiff {
    pub fn between(detected: &BTreeSet<String>, expected: &BTreeSet<String>) -> Self {
        Self {
            only_detected: detected.difference(expected).cloned().collect(),
            only_expected: expected.difference(detected).cloned().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.only_detected.is_empty() && self.only_expected.is_empty()
    }
}

/// Outcome of checking one symbol's bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "kebab-case")]
pub enum Verdict {
    /// The bundle holds exactly what is expected.
    Pass,
    /// The bundle differs from the registered group.
    Mismatch { diff: SetDiff },
    /// A registered known issue reproduces exactly; `diff` is against the ideal.
    ExpectedFailure { diff: SetDiff },
    /// A registered known issue no longer reproduces and should be removed.
    StaleKnownIssue,
    /// The bundle grew or changed in an unregistered way.
    Regression { diff: SetDiff },
}

impl Verdict {
    pub fn is_success(&self) -> bool {
        matches!(self, Verdict::Pass | Verdict::ExpectedFailure { .. })
    }

    pub fn diff(&self) -> Option<&SetDiff> {
        match self {
            Verdict::Mismatch { diff }
            | Verdict::ExpectedFailure { diff }
            | Verdict::Regression { diff } => Some(diff),
            Verdict::Pass | Verdict::StaleKnownIssue => None,
        }
    }
}

/// Judges detected sets against the curated tables.
#[derive(Debug, Clone, Default)]
pub struct Oracle {
    known_issues: Vec<KnownIssue>,
    expected_groups: Vec<ExpectedBundleGroup>,
}

impl Oracle {
    pub fn new(known_issues: Vec<KnownIssue>, expected_groups: Vec<ExpectedBundleGroup>) -> Self {
        Self {
            known_issues,
            expected_groups,
        }
    }

    pub fn from_config(config: &ShakeoutConfig) -> Self {
        Self::new(config.known_issues.clone(), config.expected_groups.clone())
    }

    fn known_issue(&self, symbol: &str) -> Option<&KnownIssue> {
        self.known_issues.iter().find(|i| i.component == symbol)
    }

    fn expected_group(&self, symbol: &str) -> Option<&ExpectedBundleGroup> {
        self.expected_groups.iter().find(|g| g.component == symbol)
    }

    /// The set a bundle of `symbol` alone should hold under group rules.
    pub fn expected_set(&self, symbol: &str) -> BTreeSet<String> {
        match self.expected_group(symbol) {
            Some(group) => group.expected_set(),
            None => BTreeSet::from([symbol.to_string()]),
        }
    }

    /// The set a registered known issue says a bundle of `symbol` holds.
    pub fn known_issue_set(&self, symbol: &str) -> Option<BTreeSet<String>> {
        self.known_issue(symbol).map(KnownIssue::expected_set)
    }

    /// Every name a verdict on `symbol` can depend on: the symbol, its
    /// expected group and its known issue.
    pub fn names_for(&self, symbol: &str) -> BTreeSet<String> {
        let mut names = self.expected_set(symbol);
        if let Some(known) = self.known_issue_set(symbol) {
            names.extend(known);
        }
        names
    }

    /// Compare against the registered group, or `{symbol}` without one.
    pub fn check_group(&self, symbol: &str, detected: &BTreeSet<String>) -> Verdict {
        let expected = self.expected_set(symbol);
        if *detected == expected {
            Verdict::Pass
        } else {
            Verdict::Mismatch {
                diff: SetDiff::between(detected, &expected),
            }
        }
    }

    /// Compare against the ideal `{symbol}`, tolerating registered known issues.
    pub fn check_known_issue(&self, symbol: &str, detected: &BTreeSet<String>) -> Verdict {
        let ideal = BTreeSet::from([symbol.to_string()]);
        let is_ideal = *detected == ideal;

        match self.known_issue(symbol) {
            None if is_ideal => Verdict::Pass,
            None => Verdict::Regression {
                diff: SetDiff::between(detected, &ideal),
            },
            Some(_) if is_ideal => Verdict::StaleKnownIssue,
            Some(issue) => {
                let known = issue.expected_set();
                if *detected == known {
                    Verdict::ExpectedFailure {
                        diff: SetDiff::between(detected, &ideal),
                    }
                } else {
                    Verdict::Regression {
                        diff: SetDiff::between(detected, &known),
                    }
                }
            }
        }
    }

    /// Known-issue rules when an issue is registered, group rules otherwise.
    pub fn check(&self, symbol: &str, detected: &BTreeSet<String>) -> Verdict {
        if self.known_issue(symbol).is_some() {
            self.check_known_issue(symbol, detected)
        } else {
            self.check_group(symbol, detected)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn oracle() -> Oracle {
        Oracle::new(
            vec![KnownIssue::new("XAxis", ["XAxis", "CartesianAxis"])],
            vec![ExpectedBundleGroup::new("Text", ["Global"])],
        )
    }

    #[test]
    fn group_includes_symbol_itself() {
        let oracle = oracle();
        assert_eq!(oracle.check_group("Text", &set(&["Global", "Text"])), Verdict::Pass);
        assert_eq!(oracle.check_group("Line", &set(&["Line"])), Verdict::Pass);
    }

    #[test]
    fn group_mismatch_reports_both_sides() {
        let verdict = oracle().check_group("Text", &set(&["Text", "Layer"]));
        let diff = verdict.diff().unwrap();
        assert_eq!(diff.only_detected, set(&["Layer"]));
        assert_eq!(diff.only_expected, set(&["Global"]));
        assert!(!verdict.is_success());
    }

    #[test]
    fn known_issue_reproducing_is_tolerated() {
        let verdict = oracle().check_known_issue("XAxis", &set(&["XAxis", "CartesianAxis"]));
        assert!(matches!(verdict, Verdict::ExpectedFailure { .. }));
        assert_eq!(verdict.diff().unwrap().only_detected, set(&["CartesianAxis"]));
        assert!(verdict.is_success());
    }

    #[test]
    fn fixed_known_issue_is_stale() {
        let verdict = oracle().check_known_issue("XAxis", &set(&["XAxis"]));
        assert_eq!(verdict, Verdict::StaleKnownIssue);
        assert!(!verdict.is_success());
    }

    #[test]
    fn known_issue_with_new_symbols_regresses() {
        let verdict = oracle().check_known_issue("XAxis", &set(&["XAxis", "CartesianAxis", "Text"]));
        match verdict {
            Verdict::Regression { diff } => {
                assert_eq!(diff.only_detected, set(&["Text"]));
                assert!(diff.only_expected.is_empty());
            }
            other => panic!("unexpected verdict {other:?}"),
        }
    }

    #[test]
    fn unregistered_extra_symbol_regresses() {
        let verdict = oracle().check_known_issue("Line", &set(&["Line", "Curve"]));
        assert!(matches!(verdict, Verdict::Regression { .. }));
        assert_eq!(oracle().check_known_issue("Line", &set(&["Line"])), Verdict::Pass);
    }

    #[test]
    fn check_picks_mode() {
        let oracle = oracle();
        assert!(matches!(
            oracle.check("XAxis", &set(&["XAxis", "CartesianAxis"])),
            Verdict::ExpectedFailure { .. }
        ));
        assert_eq!(oracle.check("Text", &set(&["Text", "Global"])), Verdict::Pass);
    }

    #[test]
    fn builtin_tables_drive_from_config() {
        let oracle = Oracle::from_config(ShakeoutConfig::builtin());
        assert!(matches!(
            oracle.check("YAxis", &set(&["YAxis", "CartesianAxis"])),
            Verdict::ExpectedFailure { .. }
        ));
        assert!(oracle.expected_set("useXAxisTicks").contains("getNiceTickValues"));
    }

    #[test]
    fn names_for_covers_group_and_known_issue() {
        let oracle = oracle();
        assert_eq!(oracle.names_for("Text"), set(&["Global", "Text"]));
        assert_eq!(oracle.names_for("XAxis"), set(&["CartesianAxis", "XAxis"]));
        assert_eq!(oracle.names_for("Line"), set(&["Line"]));
        assert_eq!(oracle.known_issue_set("Line"), None);
    }
}
