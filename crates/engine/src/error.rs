// ABOUTME: Error types for locating the embedded page-data blob.
// ABOUTME: These never escape extract(); each strategy absorbs them as "nothing found".

use thiserror::Error;

/// Errors raised while locating and decoding an embedded data blob.
#[derive(Debug, Error)]
pub enum LocateError {
    /// The anchor pattern does not occur in the text.
    #[error("anchor {0} not found")]
    NoAnchor(&'static str),

    /// The anchor was found but the literal after it is not valid JSON.
    #[error("failed to decode page data after anchor {anchor}: {source}")]
    Decode {
        anchor: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl LocateError {
    /// Returns true if this is a Decode error.
    pub fn is_decode(&self) -> bool {
        matches!(self, LocateError::Decode { .. })
    }
}
