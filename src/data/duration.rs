use std::time::Duration;

use anyhow::{bail, Result};

/// Suffix to milliseconds multiplier (order matters: longer suffixes first)
const UNITS: &[(&str, f64)] = &[("ms", 1.0), ("s", 1_000.0), ("m", 60_000.0), ("h", 3_600_000.0)];

/// Parse interval strings like "180s", "3m", "1.5m", "500ms".
///
/// A bare number is taken as seconds.
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();

    for (suffix, multiplier) in UNITS {
        if let Some(val_str) = s.strip_suffix(suffix) {
            let val: f64 = val_str.trim().parse()?;
            if !val.is_finite() || val < 0.0 {
                bail!("Invalid duration: {}", s);
            }
            return Ok(Duration::from_millis((val * multiplier) as u64));
        }
    }

    match s.parse::<f64>() {
        Ok(secs) if secs.is_finite() && secs >= 0.0 => Ok(Duration::from_secs_f64(secs)),
        _ => bail!("Unknown duration format: {}", s),
    }
}

/// Parse an interval that must be a whole number of seconds ("90s", "3m").
pub fn parse_whole_seconds(s: &str) -> Result<u64> {
    let duration = parse_duration(s)?;
    if duration.subsec_nanos() != 0 {
        bail!("Interval must be whole seconds: {}", s.trim());
    }
    Ok(duration.as_secs())
}

/// Format whole seconds as `M:SS`.
pub fn format_countdown(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
