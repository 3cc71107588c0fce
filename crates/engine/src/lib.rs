// ABOUTME: Extraction engine that recovers video records from raw video-site page text.
// ABOUTME: Provides the strategy orchestrator, its individual strategies, duration normalization and filters.

//! tubeparse-engine turns raw page text into [`VideoRecord`]s.
//!
//! Strategies are tried in a fixed order and the first one that recognizes
//! anything wins:
//!
//! 1. the embedded `ytInitialData` blob, decoded and walked,
//! 2. the same blob behind a looser anchor,
//! 3. regex correlation of ids, titles and thumbnails,
//! 4. `data-*` attribute scraping.
//!
//! ```
//! let html = r#"<script>var ytInitialData = {"videoId":"abc","title":"Hi","lengthSeconds":90};</script>"#;
//! let videos = tubeparse_engine::extract(html);
//! assert_eq!(videos[0].video_id(), "abc");
//! assert_eq!(tubeparse_engine::to_seconds(videos[0].duration()), 90);
//! ```

pub mod attributes;
pub mod correlate;
pub mod duration;
pub mod error;
pub mod extract;
pub mod filters;
pub mod locator;
pub mod models;
pub mod walker;

pub use attributes::extract_by_attributes;
pub use correlate::extract_by_regex;
pub use duration::{parse_seconds, to_canonical, to_seconds, DurationInput, ZERO_DURATION};
pub use error::LocateError;
pub use extract::{extract, extract_detailed, Extraction, Strategy};
pub use filters::{cap, filter_by_min_duration, filter_official, PostFilter};
pub use locator::{locate, locate_with, Anchor};
pub use models::{Quality, Thumbnail, Thumbnails, VideoRecord};
pub use walker::walk;
