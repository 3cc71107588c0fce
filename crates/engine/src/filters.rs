// ABOUTME: Post-extraction filters: official-channel, minimum duration and result cap.
// ABOUTME: PostFilter bundles them in the order the API operations apply them.

use crate::duration::parse_seconds;
use crate::models::VideoRecord;

/// Channel suffix marking auto-generated official artist channels.
pub const OFFICIAL_SUFFIX: &str = " - Topic";

/// Default minimum duration in seconds applied by the API operations.
pub const DEFAULT_MIN_DURATION: u64 = 40;

/// Keeps only videos from official ("- Topic") channels.
pub fn filter_official(videos: Vec<VideoRecord>) -> Vec<VideoRecord> {
    videos
        .into_iter()
        .filter(|v| v.channel_title().ends_with(OFFICIAL_SUFFIX))
        .collect()
}

/// Keeps videos lasting at least `min_seconds`; unparseable durations are dropped.
pub fn filter_by_min_duration(videos: Vec<VideoRecord>, min_seconds: u64) -> Vec<VideoRecord> {
    videos
        .into_iter()
        .filter(|v| parse_seconds(v.duration()).is_some_and(|secs| secs >= min_seconds))
        .collect()
}

/// Truncates to the first `max` videos.
pub fn cap(mut videos: Vec<VideoRecord>, max: usize) -> Vec<VideoRecord> {
    videos.truncate(max);
    videos
}

/// Filter settings applied after extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostFilter {
    pub official_only: bool,
    /// Zero disables the duration filter.
    pub min_duration: u64,
    pub max_results: Option<usize>,
}

impl Default for PostFilter {
    fn default() -> Self {
        Self {
            official_only: false,
            min_duration: DEFAULT_MIN_DURATION,
            max_results: None,
        }
    }
}

impl PostFilter {
    /// A filter that passes everything through.
    pub fn none() -> Self {
        Self {
            official_only: false,
            min_duration: 0,
            max_results: None,
        }
    }

    /// Applies official, duration and cap filters in that order.
    pub fn apply(&self, mut videos: Vec<VideoRecord>) -> Vec<VideoRecord> {
        if self.official_only {
            videos = filter_official(videos);
        }
        if self.min_duration > 0 {
            videos = filter_by_min_duration(videos, self.min_duration);
        }
        if let Some(max) = self.max_results {
            videos = cap(videos, max);
        }
        videos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(id: &str, channel: &str, duration: &str) -> VideoRecord {
        VideoRecord::new(id, "Title", channel).with_duration(duration)
    }

    #[test]
    fn test_filter_official() {
        let kept = filter_official(vec![
            video("a", "Foo - Topic", "PT1M"),
            video("b", "Foo", "PT1M"),
            video("c", "- Topic Foo", "PT1M"),
        ]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].video_id(), "a");
    }

    #[test]
    fn test_min_duration_boundary() {
        let kept = filter_by_min_duration(
            vec![
                video("short", "c", "PT39S"),
                video("exact", "c", "PT40S"),
                video("long", "c", "PT1H0M0S"),
                video("bad", "c", "4:00"),
            ],
            40,
        );
        let ids: Vec<_> = kept.iter().map(|v| v.video_id()).collect();
        assert_eq!(ids, vec!["exact", "long"]);
    }

    #[test]
    fn test_cap_preserves_order() {
        let capped = cap(vec![video("1", "c", "PT1S"), video("2", "c", "PT1S"), video("3", "c", "PT1S")], 2);
        let ids: Vec<_> = capped.iter().map(|v| v.video_id()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(cap(Vec::new(), 5).len(), 0);
    }

    #[test]
    fn test_post_filter_order() {
        let filter = PostFilter {
            official_only: true,
            min_duration: 60,
            max_results: Some(1),
        };
        let out = filter.apply(vec![
            video("a", "X - Topic", "PT30S"),
            video("b", "Y", "PT5M0S"),
            video("c", "Z - Topic", "PT2M0S"),
            video("d", "W - Topic", "PT3M0S"),
        ]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].video_id(), "c");
    }

    #[test]
    fn test_zero_min_duration_keeps_unparseable() {
        let out = PostFilter::none().apply(vec![video("a", "c", "garbage")]);
        assert_eq!(out.len(), 1);
    }
}
