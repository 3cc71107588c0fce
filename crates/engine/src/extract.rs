// ABOUTME: Extraction orchestrator that runs each strategy in fixed order until one yields videos.
// ABOUTME: Never fails: strategy errors are absorbed and an empty list means nothing was recognized.

use std::fmt;

use serde::Serialize;

use crate::attributes::extract_by_attributes;
use crate::correlate::extract_by_regex;
use crate::locator::{locate_with, Anchor};
use crate::models::VideoRecord;
use crate::walker::walk;

/// The extraction strategies, in the order they are attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// `var ytInitialData = {…}` decoded and walked.
    InitialData,
    /// Looser `ytInitialData` assignment decoded and walked.
    InitialDataLoose,
    /// Regex id/title/thumbnail correlation.
    Regex,
    /// `data-*` attribute scraping.
    Attributes,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::InitialData,
        Strategy::InitialDataLoose,
        Strategy::Regex,
        Strategy::Attributes,
    ];

    /// Runs this strategy alone.
    pub fn run(self, text: &str) -> Vec<VideoRecord> {
        match self {
            Strategy::InitialData => walk_anchor(text, Anchor::VarAssignment),
            Strategy::InitialDataLoose => walk_anchor(text, Anchor::LooseAssignment),
            Strategy::Regex => extract_by_regex(text),
            Strategy::Attributes => extract_by_attributes(text),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::InitialData => "initial-data",
            Strategy::InitialDataLoose => "initial-data-loose",
            Strategy::Regex => "regex",
            Strategy::Attributes => "attributes",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn walk_anchor(text: &str, anchor: Anchor) -> Vec<VideoRecord> {
    locate_with(text, anchor)
        .map(|tree| walk(&tree))
        .unwrap_or_default()
}

/// Videos together with the strategy that produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Extraction {
    /// `None` when every strategy came back empty.
    pub strategy: Option<Strategy>,
    pub videos: Vec<VideoRecord>,
}

/// Extracts videos from raw page text.
pub fn extract(text: &str) -> Vec<VideoRecord> {
    extract_detailed(text).videos
}

/// Like [`extract`] but also reports which strategy succeeded.
pub fn extract_detailed(text: &str) -> Extraction {
    for strategy in Strategy::ALL {
        let videos = strategy.run(text);
        if videos.is_empty() {
            tracing::debug!(%strategy, "strategy found no videos");
            continue;
        }
        tracing::info!(%strategy, count = videos.len(), "extracted videos");
        return Extraction {
            strategy: Some(strategy),
            videos,
        };
    }

    tracing::info!(bytes = text.len(), "no videos recognized");
    Extraction::default()
}
