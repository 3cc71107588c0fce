// ABOUTME: Video record models produced by every extraction strategy.
// ABOUTME: The serde layout mirrors the nested id/snippet/contentDetails shape consumers expect.

use serde::{Deserialize, Serialize};

use crate::duration::ZERO_DURATION;

/// Host serving synthesized thumbnail images.
pub const THUMBNAIL_HOST: &str = "i.ytimg.com";

/// Placeholder title used when no title can be recovered.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Placeholder channel used when no channel can be recovered.
pub const UNKNOWN_CHANNEL: &str = "Unknown Channel";

/// Thumbnail quality tiers, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quality {
    Default,
    Medium,
    High,
    Standard,
    Maxres,
}

impl Quality {
    /// All tiers in list-position order.
    pub const ALL: [Quality; 5] = [
        Quality::Default,
        Quality::Medium,
        Quality::High,
        Quality::Standard,
        Quality::Maxres,
    ];

    fn file_name(self) -> &'static str {
        match self {
            Quality::Default => "default.jpg",
            Quality::Medium => "mqdefault.jpg",
            Quality::High => "hqdefault.jpg",
            Quality::Standard => "sddefault.jpg",
            Quality::Maxres => "maxresdefault.jpg",
        }
    }

    /// Builds the deterministic thumbnail URL for a video id at this tier.
    pub fn url_for(self, video_id: &str) -> String {
        format!("https://{}/vi/{}/{}", THUMBNAIL_HOST, video_id, self.file_name())
    }
}

/// A single thumbnail reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

impl Thumbnail {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// The five thumbnail variants carried by every record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnails {
    pub default: Thumbnail,
    pub medium: Thumbnail,
    pub high: Thumbnail,
    pub standard: Thumbnail,
    pub maxres: Thumbnail,
}

impl Thumbnails {
    /// All five tiers synthesized from the video id.
    pub fn synthesized(video_id: &str) -> Self {
        Self::from_tiers(video_id, |_| None)
    }

    /// Builds thumbnails from a positional list (index 0 = lowest quality),
    /// synthesizing any tier the list does not cover or leaves empty.
    pub fn from_list(video_id: &str, urls: &[Option<&str>]) -> Self {
        Self::from_tiers(video_id, |idx| {
            urls.get(idx)
                .copied()
                .flatten()
                .filter(|url| !url.is_empty())
                .map(str::to_string)
        })
    }

    /// Synthesized thumbnails with the medium tier replaced when a URL is given.
    pub fn with_medium(video_id: &str, medium: Option<String>) -> Self {
        let mut thumbs = Self::synthesized(video_id);
        if let Some(url) = medium {
            thumbs.medium = Thumbnail::new(url);
        }
        thumbs
    }

    fn from_tiers(video_id: &str, supplied: impl Fn(usize) -> Option<String>) -> Self {
        let pick = |idx: usize| {
            let tier = Quality::ALL[idx];
            Thumbnail::new(supplied(idx).unwrap_or_else(|| tier.url_for(video_id)))
        };
        Self {
            default: pick(0),
            medium: pick(1),
            high: pick(2),
            standard: pick(3),
            maxres: pick(4),
        }
    }

    /// Returns the URL for a tier.
    pub fn get(&self, quality: Quality) -> &str {
        match quality {
            Quality::Default => &self.default.url,
            Quality::Medium => &self.medium.url,
            Quality::High => &self.high.url,
            Quality::Standard => &self.standard.url,
            Quality::Maxres => &self.maxres.url,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoId {
    pub video_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub title: String,
    pub channel_title: String,
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDetails {
    pub duration: String,
}

/// One extracted video.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    pub id: VideoId,
    pub snippet: Snippet,
    pub content_details: ContentDetails,
}

impl VideoRecord {
    /// Creates a record with synthesized thumbnails and a zero duration.
    pub fn new(
        video_id: impl Into<String>,
        title: impl Into<String>,
        channel_title: impl Into<String>,
    ) -> Self {
        let video_id = video_id.into();
        let thumbnails = Thumbnails::synthesized(&video_id);
        Self {
            id: VideoId { video_id },
            snippet: Snippet {
                title: title.into(),
                channel_title: channel_title.into(),
                thumbnails,
            },
            content_details: ContentDetails {
                duration: ZERO_DURATION.to_string(),
            },
        }
    }

    pub fn with_thumbnails(mut self, thumbnails: Thumbnails) -> Self {
        self.snippet.thumbnails = thumbnails;
        self
    }

    /// Sets the duration; callers pass an already canonical string.
    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.content_details.duration = duration.into();
        self
    }

    pub fn video_id(&self) -> &str {
        &self.id.video_id
    }

    pub fn title(&self) -> &str {
        &self.snippet.title
    }

    pub fn channel_title(&self) -> &str {
        &self.snippet.channel_title
    }

    pub fn duration(&self) -> &str {
        &self.content_details.duration
    }
}
