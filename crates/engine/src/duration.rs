// ABOUTME: Bidirectional duration normalization between clock text, raw seconds and PT strings.
// ABOUTME: Every record duration passes through to_canonical; filters read it back with to_seconds.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Canonical zero duration.
pub const ZERO_DURATION: &str = "PT0M0S";

static CANONICAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?").unwrap());

/// Raw duration input as found in page data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DurationInput<'a> {
    /// Total seconds.
    Seconds(u64),
    /// Clock text ("4:13", "1:02:03"), a numeric string, or an already canonical string.
    Text(&'a str),
    Missing,
}

impl<'a> From<&'a str> for DurationInput<'a> {
    fn from(s: &'a str) -> Self {
        DurationInput::Text(s)
    }
}

impl<'a> From<Option<&'a str>> for DurationInput<'a> {
    fn from(s: Option<&'a str>) -> Self {
        s.map_or(DurationInput::Missing, DurationInput::Text)
    }
}

impl From<u64> for DurationInput<'_> {
    fn from(secs: u64) -> Self {
        DurationInput::Seconds(secs)
    }
}

impl<'a> From<&'a Value> for DurationInput<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::String(s) => DurationInput::Text(s),
            Value::Number(n) => match n.as_u64() {
                Some(secs) => DurationInput::Seconds(secs),
                None => n
                    .as_f64()
                    .and_then(whole_seconds)
                    .map_or(DurationInput::Missing, DurationInput::Seconds),
            },
            _ => DurationInput::Missing,
        }
    }
}

/// Converts any supported duration input into the canonical `PT…` form.
///
/// Rendering rule: hours appear only when positive, minutes and seconds are
/// always rendered. Strings that already start with `PT` pass through.
/// Missing, empty or unparseable input yields [`ZERO_DURATION`].
pub fn to_canonical<'a>(input: impl Into<DurationInput<'a>>) -> String {
    match input.into() {
        DurationInput::Seconds(secs) => from_seconds(secs),
        DurationInput::Text(text) => canonical_from_text(text),
        DurationInput::Missing => ZERO_DURATION.to_string(),
    }
}

/// Renders a second count in canonical form.
pub fn from_seconds(total: u64) -> String {
    render(total / 3600, (total % 3600) / 60, total % 60)
}

fn canonical_from_text(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        return ZERO_DURATION.to_string();
    }

    if text.starts_with("PT") {
        return text.to_string();
    }

    if text.contains(':') {
        return match parse_clock(text) {
            Some((h, m, s)) => render(h, m, s),
            None => ZERO_DURATION.to_string(),
        };
    }

    if let Ok(secs) = text.parse::<u64>() {
        return from_seconds(secs);
    }

    match text.parse::<f64>().ok().and_then(whole_seconds) {
        Some(secs) => from_seconds(secs),
        None => ZERO_DURATION.to_string(),
    }
}

/// Splits `M:S` or `H:M:S` into components; any other shape is rejected.
fn parse_clock(text: &str) -> Option<(u64, u64, u64)> {
    let parts = text
        .split(':')
        .map(|p| p.trim().parse::<u64>().ok())
        .collect::<Option<Vec<u64>>>()?;

    match parts.as_slice() {
        [m, s] => Some((0, *m, *s)),
        [h, m, s] => Some((*h, *m, *s)),
        _ => None,
    }
}

fn whole_seconds(f: f64) -> Option<u64> {
    if f.is_finite() && f >= 0.0 {
        Some(f.trunc() as u64)
    } else {
        None
    }
}

fn render(hours: u64, minutes: u64, seconds: u64) -> String {
    if hours > 0 {
        format!("PT{}H{}M{}S", hours, minutes, seconds)
    } else {
        format!("PT{}M{}S", minutes, seconds)
    }
}

/// Reads a canonical duration back into seconds.
///
/// Returns `None` when the string carries no `PT` marker at all; a bare `PT`
/// is zero.
pub fn parse_seconds(duration: &str) -> Option<u64> {
    let caps = CANONICAL_RE.captures(duration)?;
    let group = |idx: usize| -> Option<u64> {
        match caps.get(idx) {
            Some(m) => m.as_str().parse::<u64>().ok(),
            None => Some(0),
        }
    };

    let hours = group(1)?;
    let minutes = group(2)?;
    let seconds = group(3)?;
    Some(
        hours
            .saturating_mul(3600)
            .saturating_add(minutes.saturating_mul(60))
            .saturating_add(seconds),
    )
}

/// Like [`parse_seconds`] but treats anything unparseable as zero.
pub fn to_seconds(duration: &str) -> u64 {
    parse_seconds(duration).unwrap_or(0)
}
