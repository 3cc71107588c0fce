// ABOUTME: Page fetching over HTTP with content-length limits and charset decoding.
// ABOUTME: Every failure (bad URL, network, timeout, non-success status) becomes an ApiError.

use std::collections::HashMap;

use bytes::Bytes;

use crate::error::ApiError;

/// Maximum allowed content length (10 MB).
pub const MAX_CONTENT_LENGTH: usize = 10 * 1024 * 1024;

/// Result of a successful fetch operation.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub status: u16,
    /// URL after redirects.
    pub final_url: String,
    pub redirected: bool,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl FetchResult {
    /// Decode the body as UTF-8 text, using charset hints from the content-type header.
    pub fn text_utf8(&self) -> String {
        decode_body(&self.body, self.content_type.as_deref())
    }
}

/// Decode body bytes to a String using charset from content-type header or detection.
fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    if let Some(ct) = content_type {
        if let Some(charset) = extract_charset(ct) {
            if let Some(encoding) = encoding_rs::Encoding::for_label(charset.as_bytes()) {
                let (decoded, _, _) = encoding.decode(body);
                return decoded.into_owned();
            }
        }
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(body, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}

/// Extract charset value from Content-Type header.
fn extract_charset(content_type: &str) -> Option<String> {
    let lower = content_type.to_lowercase();
    for part in lower.split(';') {
        if let Some(charset) = part.trim().strip_prefix("charset=") {
            let charset = charset.trim_matches('"').trim_matches('\'');
            return Some(charset.to_string());
        }
    }
    None
}

fn transport_error(url: &str, op: &str, err: reqwest::Error, what: &str) -> ApiError {
    if err.is_timeout() {
        ApiError::timeout(url, op, Some(anyhow::anyhow!("{}: {}", what, err)))
    } else {
        ApiError::fetch(url, op, Some(anyhow::anyhow!("{}: {}", what, err)))
    }
}

/// Fetch a page, failing on anything but a success status.
pub async fn fetch(
    client: &reqwest::Client,
    url: &str,
    headers: &HashMap<String, String>,
    op: &str,
) -> Result<FetchResult, ApiError> {
    if url.is_empty() {
        return Err(ApiError::invalid_url(url, op, None));
    }

    let parsed_url = url::Url::parse(url).map_err(|e| {
        ApiError::invalid_url(url, op, Some(anyhow::anyhow!("invalid URL: {}", e)))
    })?;

    let scheme = parsed_url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ApiError::invalid_url(
            url,
            op,
            Some(anyhow::anyhow!("scheme must be http or https")),
        ));
    }

    let mut request = client.get(parsed_url.clone());
    for (key, value) in headers {
        request = request.header(key, value);
    }

    let response = request
        .send()
        .await
        .map_err(|e| transport_error(url, op, e, "request failed"))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::status(url, op, status));
    }

    if let Some(len) = response.content_length() {
        if len as usize > MAX_CONTENT_LENGTH {
            return Err(ApiError::fetch(
                url,
                op,
                Some(anyhow::anyhow!("content too large")),
            ));
        }
    }

    let redirected = response.url() != &parsed_url;
    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_lowercase());

    let body = response
        .bytes()
        .await
        .map_err(|e| transport_error(url, op, e, "failed to read body"))?;

    if body.len() > MAX_CONTENT_LENGTH {
        return Err(ApiError::fetch(
            url,
            op,
            Some(anyhow::anyhow!("content too large")),
        ));
    }

    Ok(FetchResult {
        status: status.as_u16(),
        final_url,
        redirected,
        content_type,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn create_test_client() -> reqwest::Client {
        reqwest::Client::builder()
            .user_agent("test-agent")
            .build()
            .unwrap()
    }

    #[test]
    fn test_extract_charset() {
        assert_eq!(
            extract_charset("text/html; charset=UTF-8"),
            Some("utf-8".to_string())
        );
        assert_eq!(
            extract_charset("text/html; charset=\"windows-1251\""),
            Some("windows-1251".to_string())
        );
        assert_eq!(extract_charset("text/html"), None);
    }

    #[test]
    fn test_decode_body_with_declared_charset() {
        // "Привет" in windows-1251
        let body = [0xCF, 0xF0, 0xE8, 0xE2, 0xE5, 0xF2];
        assert_eq!(
            decode_body(&body, Some("text/html; charset=windows-1251")),
            "Привет"
        );
    }

    #[tokio::test]
    async fn test_fetch_ok_sends_headers() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/page")
                .header("accept-language", "ru-RU");
            then.status(200)
                .header("content-type", "text/html; charset=utf-8")
                .body("hello");
        });

        let client = create_test_client();
        let headers = HashMap::from([("Accept-Language".to_string(), "ru-RU".to_string())]);
        let result = fetch(&client, &server.url("/page"), &headers, "Fetch")
            .await
            .unwrap();

        mock.assert();
        assert_eq!(result.status, 200);
        assert!(!result.redirected);
        assert_eq!(result.text_utf8(), "hello");
    }

    #[tokio::test]
    async fn test_fetch_follows_redirect() {
        let server = MockServer::start();
        let moved = server.mock(|when, then| {
            when.method(GET).path("/old");
            then.status(302).header("location", server.url("/new"));
        });
        server.mock(|when, then| {
            when.method(GET).path("/new");
            then.status(200).body("moved here");
        });

        let client = create_test_client();
        let result = fetch(&client, &server.url("/old"), &HashMap::new(), "Fetch")
            .await
            .unwrap();

        moved.assert();
        assert!(result.redirected);
        assert_eq!(result.final_url, server.url("/new"));
        assert_eq!(result.text_utf8(), "moved here");
    }

    #[tokio::test]
    async fn test_fetch_site_root_is_not_a_redirect() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(200).body("root");
        });

        let client = create_test_client();
        let result = fetch(&client, &server.base_url(), &HashMap::new(), "Fetch")
            .await
            .unwrap();

        assert!(!result.redirected);
        assert_eq!(result.final_url, format!("{}/", server.base_url()));
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/missing");
            then.status(404);
        });

        let client = create_test_client();
        let err = fetch(&client, &server.url("/missing"), &HashMap::new(), "Fetch")
            .await
            .unwrap_err();

        assert_eq!(err.code, crate::error::ErrorCode::Status);
        assert_eq!(err.message(), "HTTP 404: Not Found");
    }

    #[tokio::test]
    async fn test_fetch_rejects_bad_scheme() {
        let client = create_test_client();
        let err = fetch(&client, "ftp://example.com/x", &HashMap::new(), "Fetch")
            .await
            .unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::InvalidUrl);

        let err = fetch(&client, "", &HashMap::new(), "Fetch")
            .await
            .unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::InvalidUrl);
    }
}
