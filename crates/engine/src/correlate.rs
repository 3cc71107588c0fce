// ABOUTME: Last-resort regex scan that harvests ids, titles and thumbnails independently.
// ABOUTME: Results are paired by position only, so they can misattribute when counts diverge.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{Thumbnails, VideoRecord, THUMBNAIL_HOST, UNKNOWN_CHANNEL};

/// Id patterns, run in order: anchor link, quoted JSON key, query parameter.
static ID_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"watch\?v=([a-zA-Z0-9_-]+)",
        r#""videoId":"([a-zA-Z0-9_-]+)""#,
        r"videoId=([a-zA-Z0-9_-]+)",
    ])
});

static TITLE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r#""title":"([^"]+)""#,
        r#"title="([^"]+)""#,
        r#""text":"([^"]+)""#,
    ])
});

static THUMBNAIL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r#""thumbnailUrl":"([^"]+)""#,
        r#""url":"([^"]*i\.ytimg\.com[^"]*)""#,
        r#"src="([^"]*i\.ytimg\.com[^"]*)""#,
    ])
});

/// Titles must be strictly longer than this many UTF-16 code units...
const MIN_TITLE_UNITS: usize = 5;
/// ...and strictly shorter than this many.
const MAX_TITLE_UNITS: usize = 200;

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| Regex::new(p).unwrap()).collect()
}

/// First capture group of every match of every pattern, pattern by pattern.
fn harvest<'a>(patterns: &'a [Regex], text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    patterns.iter().flat_map(move |re| {
        re.captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
    })
}

/// Unique ids in first-seen order across all id patterns.
pub fn harvest_ids(text: &str) -> Vec<&str> {
    let mut seen = HashSet::new();
    harvest(&ID_PATTERNS, text)
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Candidate titles within the plausible length range. Not deduplicated.
pub fn harvest_titles(text: &str) -> Vec<&str> {
    harvest(&TITLE_PATTERNS, text)
        .filter(|title| {
            let len = title.encode_utf16().count();
            len > MIN_TITLE_UNITS && len < MAX_TITLE_UNITS
        })
        .collect()
}

/// Candidate thumbnail URLs on the image host. Not deduplicated.
pub fn harvest_thumbnails(text: &str) -> Vec<&str> {
    harvest(&THUMBNAIL_PATTERNS, text)
        .filter(|url| url.contains(THUMBNAIL_HOST))
        .collect()
}

/// Pairs the i-th id with the i-th title and the i-th thumbnail.
///
/// Missing titles become `Video <n>` (1-based); missing thumbnails are
/// synthesized. Channel and duration are never recoverable here.
pub fn extract_by_regex(text: &str) -> Vec<VideoRecord> {
    let ids = harvest_ids(text);
    if ids.is_empty() {
        return Vec::new();
    }

    let titles = harvest_titles(text);
    let thumbnails = harvest_thumbnails(text);
    tracing::debug!(
        ids = ids.len(),
        titles = titles.len(),
        thumbnails = thumbnails.len(),
        "regex harvest"
    );

    ids.iter()
        .enumerate()
        .map(|(idx, id)| {
            let title = titles
                .get(idx)
                .map(|t| t.to_string())
                .unwrap_or_else(|| format!("Video {}", idx + 1));
            let medium = thumbnails.get(idx).map(|t| t.to_string());
            VideoRecord::new(*id, title, UNKNOWN_CHANNEL)
                .with_thumbnails(Thumbnails::with_medium(id, medium))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ids_deduplicated_across_patterns() {
        let text = r#"<a href="/watch?v=aaa111">x</a> "videoId":"bbb222" videoId=aaa111 "videoId":"aaa111" /watch?v=ccc333"#;
        // The anchor pattern runs over the whole text before the JSON-key pattern.
        assert_eq!(harvest_ids(text), vec!["aaa111", "ccc333", "bbb222"]);
    }

    #[test]
    fn test_title_length_filter() {
        let text = r#""title":"Short" title="Just right title" "text":"tiny" "text":"Long enough text""#;
        assert_eq!(harvest_titles(text), vec!["Just right title", "Long enough text"]);

        let long = format!(r#""title":"{}""#, "x".repeat(MAX_TITLE_UNITS));
        assert!(harvest_titles(&long).is_empty());
    }

    #[test]
    fn test_title_length_counts_utf16_units() {
        // Three emoji are six UTF-16 units, past the lower bound.
        assert_eq!(harvest_titles(r#""title":"😀😀😀""#), vec!["😀😀😀"]);
        assert!(harvest_titles(r#""title":"😀😀""#).is_empty());

        // 100 emoji are 200 units, which hits the upper bound.
        let wide = format!(r#""title":"{}""#, "😀".repeat(100));
        assert!(harvest_titles(&wide).is_empty());
        let narrow = format!(r#""title":"{}""#, "é".repeat(100));
        assert_eq!(harvest_titles(&narrow).len(), 1);
    }

    #[test]
    fn test_thumbnail_host_filter() {
        let text = r#""thumbnailUrl":"https://cdn.example/x.jpg" "url":"https://i.ytimg.com/vi/a/hq.jpg" src="https://i.ytimg.com/vi/b/mq.jpg""#;
        assert_eq!(
            harvest_thumbnails(text),
            vec!["https://i.ytimg.com/vi/a/hq.jpg", "https://i.ytimg.com/vi/b/mq.jpg"]
        );
    }

    #[test]
    fn test_positional_correlation() {
        let text = r#"
            <a href="/watch?v=id1"></a><a href="/watch?v=id2"></a>
            <img src="https://i.ytimg.com/vi/id1/custom.jpg">
            <span title="First video title"></span>
        "#;
        let videos = extract_by_regex(text);

        assert_eq!(videos.len(), 2);
        assert_eq!(videos[0].title(), "First video title");
        assert_eq!(videos[0].snippet.thumbnails.medium.url, "https://i.ytimg.com/vi/id1/custom.jpg");
        assert_eq!(videos[1].title(), "Video 2");
        assert_eq!(videos[1].snippet.thumbnails.medium.url, "https://i.ytimg.com/vi/id2/mqdefault.jpg");
        assert_eq!(videos[1].channel_title(), UNKNOWN_CHANNEL);
        assert_eq!(videos[1].duration(), "PT0M0S");
    }

    #[test]
    fn test_no_ids() {
        assert!(extract_by_regex(r#"title="Lonely title here""#).is_empty());
    }
}
