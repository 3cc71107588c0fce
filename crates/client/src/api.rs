// ABOUTME: Request parameters and JSON response envelopes for the client operations.
// ABOUTME: Every envelope carries a success flag; failures serialize as {success:false, error}.

use serde::{Deserialize, Serialize};
use tubeparse_engine::filters::DEFAULT_MIN_DURATION;
use tubeparse_engine::{PostFilter, VideoRecord};

use crate::error::ApiError;

/// Default cap on search results.
pub const DEFAULT_MAX_RESULTS: usize = 50;

/// Default region for the trending feed.
pub const DEFAULT_REGION: &str = "RU";

/// Parameters for a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub max_results: usize,
    pub filter_official: bool,
    /// Zero disables the duration filter.
    pub min_duration: u64,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            filter_official: false,
            min_duration: DEFAULT_MIN_DURATION,
        }
    }
}

impl SearchParams {
    pub fn post_filter(&self) -> PostFilter {
        PostFilter {
            official_only: self.filter_official,
            min_duration: self.min_duration,
            max_results: Some(self.max_results),
        }
    }
}

/// Parameters for the trending feed. Trending results are never capped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendingParams {
    pub region: String,
    pub filter_official: bool,
    pub min_duration: u64,
}

impl Default for TrendingParams {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            filter_official: false,
            min_duration: DEFAULT_MIN_DURATION,
        }
    }
}

impl TrendingParams {
    pub fn post_filter(&self) -> PostFilter {
        PostFilter {
            official_only: self.filter_official,
            min_duration: self.min_duration,
            max_results: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    pub results: Vec<VideoRecord>,
    pub total: usize,
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingResponse {
    pub success: bool,
    pub results: Vec<VideoRecord>,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoResponse {
    pub success: bool,
    pub video: VideoRecord,
}

/// Reachability of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Available,
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
    pub status: Availability,
    pub message: String,
}

/// Static description of the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsResponse {
    pub server: String,
    pub version: String,
    pub method: String,
}

impl Default for StatsResponse {
    fn default() -> Self {
        Self {
            server: "tubeparse".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            method: "Direct page requests".to_string(),
        }
    }
}

/// Envelope for a failed operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            success: false,
            error: err.message(),
        }
    }
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        Self::from(&err)
    }
}
