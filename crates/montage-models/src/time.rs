//! Time value parsing and formatting.
//!
//! Analysis backends report scene bounds either as plain seconds or as
//! timestamp strings. Supported string formats:
//! - `SS` or `SS.mmm`
//! - `MM:SS` or `MM:SS.mmm`
//! - `HH:MM:SS` or `HH:MM:SS.mmm`

use thiserror::Error;

/// Time parsing error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimeError {
    #[error("Time value cannot be empty")]
    Empty,

    #[error("Time value cannot be negative")]
    Negative,

    #[error("Invalid {0} value: {1}")]
    InvalidValue(&'static str, String),

    #[error("Invalid time format '{0}'. Use SS, MM:SS or HH:MM:SS with optional .mmm")]
    InvalidFormat(String),
}

/// Parse a time string to total seconds.
///
/// # Examples
/// ```
/// use montage_models::time::parse_time;
/// assert_eq!(parse_time("01:30:00").unwrap(), 5400.0);
/// assert_eq!(parse_time("05:30").unwrap(), 330.0);
/// assert_eq!(parse_time("90").unwrap(), 90.0);
/// ```
pub fn parse_time(value: &str) -> Result<f64, TimeError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(TimeError::Empty);
    }

    let parts: Vec<&str> = value.split(':').collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [s] => ("0", "0", *s),
        [m, s] => ("0", *m, *s),
        [h, m, s] => (*h, *m, *s),
        _ => return Err(TimeError::InvalidFormat(value.to_string())),
    };

    let hours = parse_component("hours", hours)?;
    let minutes = parse_component("minutes", minutes)?;
    let seconds = parse_component("seconds", seconds)?;

    Ok(hours * 3600.0 + minutes * 60.0 + seconds)
}

fn parse_component(name: &'static str, raw: &str) -> Result<f64, TimeError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| TimeError::InvalidValue(name, raw.to_string()))?;
    if !value.is_finite() {
        return Err(TimeError::InvalidValue(name, raw.to_string()));
    }
    if value < 0.0 {
        return Err(TimeError::Negative);
    }
    Ok(value)
}

/// Format seconds as `HH:MM:SS.ss`.
pub fn format_time(total_secs: f64) -> String {
    let centis = (total_secs.max(0.0) * 100.0).round() as u64;
    let hours = centis / 360_000;
    let mins = (centis % 360_000) / 6_000;
    let secs = (centis % 6_000) as f64 / 100.0;
    format!("{:02}:{:02}:{:05.2}", hours, mins, secs)
}

/// Serde adapter for time fields that may be numbers or timestamp strings.
///
/// Use with `#[serde(default, deserialize_with = "montage_models::time::seconds::deserialize")]`.
pub mod seconds {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTime {
        Null,
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawTime::deserialize(deserializer)? {
            RawTime::Null => Ok(0.0),
            RawTime::Number(n) if n.is_finite() && n >= 0.0 => Ok(n),
            RawTime::Number(n) => Err(serde::de::Error::custom(format!(
                "invalid time value: {}",
                n
            ))),
            RawTime::Text(s) => super::parse_time(&s).map_err(serde::de::Error::custom),
        }
    }
}
