// ABOUTME: Async client that fetches video-site pages and extracts video records from them.
// ABOUTME: Exposes search, trending, video, status and stats operations with JSON envelopes.

pub mod api;
pub mod client;
pub mod error;
pub mod fetch;
pub mod options;

pub use api::{
    Availability, ErrorResponse, SearchParams, SearchResponse, StatsResponse, StatusResponse,
    TrendingParams, TrendingResponse, VideoResponse,
};
pub use client::Client;
pub use error::{ApiError, ErrorCode};
pub use options::{ClientBuilder, Options};
pub use tubeparse_engine::VideoRecord;
