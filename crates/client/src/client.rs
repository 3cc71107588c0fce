// ABOUTME: The main Client struct that fetches site pages and runs the extraction engine on them.
// ABOUTME: Provides async search, trending, video, status and stats operations returning JSON envelopes.

use tracing::{info, warn};
use tubeparse_engine::{extract, VideoRecord};
use url::Url;

use crate::api::{
    Availability, SearchParams, SearchResponse, StatsResponse, StatusResponse, TrendingParams,
    TrendingResponse, VideoResponse,
};
use crate::error::ApiError;
use crate::fetch::fetch;
use crate::options::{ClientBuilder, Options};

/// Client for the site's HTML pages.
#[derive(Debug, Clone)]
pub struct Client {
    opts: Options,
    http_client: reqwest::Client,
}

impl Client {
    /// Create a new ClientBuilder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new Client with the given options.
    pub fn new(opts: Options) -> Self {
        let http_client = opts.http_client.clone().unwrap_or_else(|| {
            reqwest::Client::builder()
                .user_agent(&opts.user_agent)
                .timeout(opts.timeout)
                .cookie_store(true)
                .gzip(true)
                .brotli(true)
                .deflate(true)
                .build()
                .expect("failed to build HTTP client")
        });

        Self { opts, http_client }
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    fn page_url(&self, op: &str, path: &str, params: &[(&str, &str)]) -> Result<Url, ApiError> {
        let raw = format!("{}{}", self.opts.base_url.trim_end_matches('/'), path);
        Url::parse_with_params(&raw, params).map_err(|e| {
            ApiError::invalid_url(raw.as_str(), op, Some(anyhow::anyhow!("invalid URL: {}", e)))
        })
    }

    async fn fetch_for(&self, url: &str, op: &str) -> Result<String, ApiError> {
        match fetch(&self.http_client, url, &self.opts.headers, op).await {
            Ok(result) => {
                let text = result.text_utf8();
                if result.redirected {
                    info!(url, final_url = %result.final_url, "followed redirect");
                }
                info!(url, status = result.status, chars = text.len(), "fetched page");
                Ok(text)
            }
            Err(err) => {
                warn!(url, error = %err, "page fetch failed");
                Err(err)
            }
        }
    }

    /// Fetch a page and decode it to text.
    pub async fn fetch_page(&self, url: &str) -> Result<String, ApiError> {
        self.fetch_for(url, "Fetch").await
    }

    async fn extract_from(&self, url: &Url, op: &str) -> Result<Vec<VideoRecord>, ApiError> {
        let html = self.fetch_for(url.as_str(), op).await?;
        let videos = extract(&html);
        info!(op, count = videos.len(), "parsed page");
        Ok(videos)
    }

    /// Search for videos matching `query`.
    ///
    /// Results pass the official and duration filters, then get capped at
    /// `params.max_results`.
    pub async fn search(
        &self,
        query: &str,
        params: &SearchParams,
    ) -> Result<SearchResponse, ApiError> {
        if query.is_empty() {
            return Err(ApiError::bad_request("Search", "Query parameter is required"));
        }

        let url = self.page_url("Search", "/results", &[("search_query", query)])?;
        let videos = self.extract_from(&url, "Search").await?;
        let results = params.post_filter().apply(videos);

        Ok(SearchResponse {
            success: true,
            total: results.len(),
            results,
            query: query.to_string(),
        })
    }

    /// Popular videos for a region.
    pub async fn trending(&self, params: &TrendingParams) -> Result<TrendingResponse, ApiError> {
        let region = params.region.as_str();
        let url = self.page_url("Trending", "/feed/trending", &[("region", region)])?;
        let videos = self.extract_from(&url, "Trending").await?;
        let results = params.post_filter().apply(videos);

        Ok(TrendingResponse {
            success: true,
            total: results.len(),
            results,
        })
    }

    /// The first video recognized on the watch page for `video_id`.
    pub async fn video(&self, video_id: &str) -> Result<VideoResponse, ApiError> {
        let url = self.page_url("Video", "/watch", &[("v", video_id)])?;
        let video = self
            .extract_from(&url, "Video")
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::not_found(url.as_str(), "Video", "Video not found"))?;

        Ok(VideoResponse {
            success: true,
            video,
        })
    }

    /// Probe the site root. Never fails; unreachability is reported in the envelope.
    pub async fn status(&self) -> StatusResponse {
        let url = self.opts.base_url.clone();
        match self.fetch_for(&url, "Status").await {
            Ok(_) => StatusResponse {
                success: true,
                status: Availability::Available,
                message: "Parser is working".to_string(),
            },
            Err(err) => StatusResponse {
                success: false,
                status: Availability::Unavailable,
                message: err.message(),
            },
        }
    }

    /// Static service description.
    pub fn stats(&self) -> StatsResponse {
        StatsResponse::default()
    }
}
