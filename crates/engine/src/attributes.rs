// ABOUTME: Scrapes data-video-id, data-title and data-channel attributes from inline markup.
// ABOUTME: The three value lists are harvested separately and zipped by position.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{VideoRecord, UNKNOWN_CHANNEL, UNKNOWN_TITLE};

static VIDEO_ID_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"data-video-id="([a-zA-Z0-9_-]+)""#).unwrap());
static TITLE_ATTR: Lazy<Regex> = Lazy::new(|| Regex::new(r#"data-title="([^"]+)""#).unwrap());
static CHANNEL_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"data-channel="([^"]+)""#).unwrap());

fn attribute_values<'t>(re: &Regex, text: &'t str) -> Vec<&'t str> {
    re.captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Builds one record per `data-video-id` attribute, taking the title and
/// channel at the same index when present.
pub fn extract_by_attributes(text: &str) -> Vec<VideoRecord> {
    let ids = attribute_values(&VIDEO_ID_ATTR, text);
    if ids.is_empty() {
        return Vec::new();
    }
    let titles = attribute_values(&TITLE_ATTR, text);
    let channels = attribute_values(&CHANNEL_ATTR, text);

    ids.iter()
        .enumerate()
        .map(|(idx, id)| {
            VideoRecord::new(
                *id,
                titles.get(idx).copied().unwrap_or(UNKNOWN_TITLE),
                channels.get(idx).copied().unwrap_or(UNKNOWN_CHANNEL),
            )
        })
        .collect()
}
