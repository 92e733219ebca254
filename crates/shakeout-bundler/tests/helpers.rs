//! Shared fixtures for shakeout-bundler integration tests.
//!
//! The fixture is a tiny compiled component library laid out the way the
//! analyzer expects: `package.json` at the root, ES modules under `es6/`,
//! and `es6/index.js` re-exporting every component.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use shakeout_bundler::config::{ExpectedBundleGroup, ShakeoutConfig};
use tempfile::TempDir;

pub const PACKAGE_NAME: &str = "charts-fixture";

pub fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create fixture dir");
    }
    fs::write(path, content).expect("write fixture file");
}

/// Large, repetitive body so tree-shaking and compression have something to remove.
fn padding(prefix: &str, count: usize) -> String {
    (0..count)
        .map(|i| format!("  '{prefix}-variant-{i}': {{ stroke: '#8884d8', strokeWidth: {i} }},\n"))
        .collect()
}

/// Create the fixture library in a fresh temp dir.
pub fn create_chart_library() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    let root = dir.path();

    write(
        root,
        "package.json",
        &format!(
            r#"{{
  "name": "{PACKAGE_NAME}",
  "version": "1.0.0",
  "dependencies": {{ "clsx": "^2.0.0" }},
  "peerDependencies": {{ "react": "^18.0.0" }}
}}"#
        ),
    );

    write(
        root,
        "es6/index.js",
        r#"export { Line } from './cartesian/Line';
export { Area } from './cartesian/Area';
export { Pie } from './polar/Pie';
export { Text } from './component/Text';
export * from './util';
"#,
    );

    write(
        root,
        "es6/util/index.js",
        "export { Global } from './Global';\n",
    );

    write(
        root,
        "es6/util/Global.js",
        r#"export var Global = {
  isSsr: typeof window === 'undefined',
  devToolsEnabled: false,
};
"#,
    );

    write(
        root,
        "es6/cartesian/Line.js",
        &format!(
            r#"import clsx from 'clsx';
import {{ Global }} from '../util';

var LINE_STYLES = {{
{}}};

function Line(props) {{
  if (Global.isSsr) {{
    return null;
  }}
  var style = LINE_STYLES[props.type] || LINE_STYLES['line-variant-0'];
  return {{ className: clsx('chart-line', props.className), style: style }};
}}

export {{ Line }};
"#,
            padding("line", 40)
        ),
    );

    write(
        root,
        "es6/cartesian/Area.js",
        &format!(
            r#"import {{ Global }} from '../util/Global.js';

var AREA_STYLES = {{
{}}};

function Area(props) {{
  return Global.devToolsEnabled ? null : AREA_STYLES[props.type];
}}

export {{ Area }};
"#,
            padding("area", 40)
        ),
    );

    write(
        root,
        "es6/polar/Pie.js",
        &format!(
            r#"var PIE_STYLES = {{
{}}};

export function Pie(props) {{
  return PIE_STYLES[props.type];
}}
"#,
            padding("pie", 200)
        ),
    );

    write(
        root,
        "es6/component/Text.js",
        &format!(
            r#"var TEXT_STYLES = {{
{}}};

export class Text {{
  render(props) {{
    return TEXT_STYLES[props.type];
  }}
}}
"#,
            padding("text", 200)
        ),
    );

    dir
}

/// Configuration for the fixture: default layout, no curated tables unless given.
pub fn fixture_config(groups: Vec<ExpectedBundleGroup>) -> ShakeoutConfig {
    ShakeoutConfig {
        known_issues: Vec::new(),
        expected_groups: groups,
        ..ShakeoutConfig::default()
    }
}
