//! Formatting of sizes, reductions and durations for terminal output.

use std::time::Duration;

/// Bytes as kilobytes with two decimals, the unit used by trace output.
///
/// ```
/// use shakeout_cli::ui::format_kb;
///
/// assert_eq!(format_kb(0), "0.00 kB");
/// assert_eq!(format_kb(1536), "1.50 kB");
/// ```
pub fn format_kb(bytes: u64) -> String {
    format!("{:.2} kB", bytes as f64 / 1024.0)
}

/// A reduction percentage, blank for the baseline stage.
pub fn format_reduction(reduction: f64, is_baseline: bool) -> String {
    if is_baseline {
        "-".to_string()
    } else {
        format!("{reduction:.2}%")
    }
}

/// Duration in the most readable unit.
///
/// ```
/// use std::time::Duration;
/// use shakeout_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
