// ABOUTME: Error types for the API operations including ErrorCode enum and ApiError struct.
// ABOUTME: Codes map onto HTTP-style statuses so callers can tell bad input, not-found and transport failures apart.

use std::fmt;

/// Error codes representing different categories of API failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidUrl,
    Fetch,
    Timeout,
    Status,
    BadRequest,
    NotFound,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidUrl => "invalid URL",
            ErrorCode::Fetch => "fetch error",
            ErrorCode::Timeout => "timeout",
            ErrorCode::Status => "unexpected status",
            ErrorCode::BadRequest => "bad request",
            ErrorCode::NotFound => "not found",
        };
        write!(f, "{}", s)
    }
}

/// The main error type for API operations.
#[derive(Debug, thiserror::Error)]
pub struct ApiError {
    pub code: ErrorCode,
    pub url: String,
    pub op: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tubeparse: {} {}: {}", self.op, self.url, self.code)?;
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

impl ApiError {
    fn with_code(
        code: ErrorCode,
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code,
            url: url.into(),
            op: op.into(),
            source,
        }
    }

    /// Create an InvalidUrl error.
    pub fn invalid_url(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::with_code(ErrorCode::InvalidUrl, url, op, source)
    }

    /// Create a Fetch error.
    pub fn fetch(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::with_code(ErrorCode::Fetch, url, op, source)
    }

    /// Create a Timeout error.
    pub fn timeout(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::with_code(ErrorCode::Timeout, url, op, source)
    }

    /// Create a Status error for a non-success HTTP response.
    pub fn status(url: impl Into<String>, op: impl Into<String>, status: reqwest::StatusCode) -> Self {
        let reason = status.canonical_reason().unwrap_or("Unknown");
        Self::with_code(
            ErrorCode::Status,
            url,
            op,
            Some(anyhow::anyhow!("HTTP {}: {}", status.as_u16(), reason)),
        )
    }

    /// Create a BadRequest error carrying a user-facing message.
    pub fn bad_request(op: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_code(
            ErrorCode::BadRequest,
            String::new(),
            op,
            Some(anyhow::anyhow!(message.into())),
        )
    }

    /// Create a NotFound error carrying a user-facing message.
    pub fn not_found(
        url: impl Into<String>,
        op: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::with_code(
            ErrorCode::NotFound,
            url,
            op,
            Some(anyhow::anyhow!(message.into())),
        )
    }

    /// Short message for response envelopes: the source if present, otherwise the code.
    pub fn message(&self) -> String {
        match &self.source {
            Some(src) => src.to_string(),
            None => self.code.to_string(),
        }
    }

    /// HTTP-equivalent status for this error.
    pub fn status_code(&self) -> u16 {
        match self.code {
            ErrorCode::BadRequest => 400,
            ErrorCode::NotFound => 404,
            ErrorCode::InvalidUrl | ErrorCode::Fetch | ErrorCode::Timeout | ErrorCode::Status => {
                500
            }
        }
    }

    /// Returns true for failures reaching the remote site.
    pub fn is_transport(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::InvalidUrl | ErrorCode::Fetch | ErrorCode::Timeout | ErrorCode::Status
        )
    }

    /// Returns true if this is a Timeout error.
    pub fn is_timeout(&self) -> bool {
        self.code == ErrorCode::Timeout
    }

    /// Returns true if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        self.code == ErrorCode::NotFound
    }

    /// Returns true if this is a BadRequest error.
    pub fn is_bad_request(&self) -> bool {
        self.code == ErrorCode::BadRequest
    }
}
