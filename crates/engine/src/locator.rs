// ABOUTME: Locates the embedded ytInitialData assignment in raw page text and decodes it.
// ABOUTME: Two anchor patterns tolerate minified and renamed variants of the same convention.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::error::LocateError;

static VAR_ASSIGNMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"var\s+ytInitialData\s*=\s*\{").unwrap());
static LOOSE_ASSIGNMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"ytInitialData["\s]*[:=]\s*\{"#).unwrap());

/// Anchor patterns that precede the page-data object literal, in the order
/// they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// `var ytInitialData = {…}`
    VarAssignment,
    /// `ytInitialData = {…}`, `"ytInitialData": {…}` and similar.
    LooseAssignment,
}

impl Anchor {
    pub const ALL: [Anchor; 2] = [Anchor::VarAssignment, Anchor::LooseAssignment];

    pub fn name(self) -> &'static str {
        match self {
            Anchor::VarAssignment => "var-assignment",
            Anchor::LooseAssignment => "loose-assignment",
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Anchor::VarAssignment => &VAR_ASSIGNMENT_RE,
            Anchor::LooseAssignment => &LOOSE_ASSIGNMENT_RE,
        }
    }
}

/// Finds the first occurrence of `anchor` and decodes the object literal that
/// follows it. Text after the end of the literal is ignored.
pub fn decode_blob(raw: &str, anchor: Anchor) -> Result<Value, LocateError> {
    let found = anchor
        .pattern()
        .find(raw)
        .ok_or(LocateError::NoAnchor(anchor.name()))?;

    // The match ends just past the opening brace.
    let literal = &raw[found.end() - 1..];
    let mut de = serde_json::Deserializer::from_str(literal);
    Value::deserialize(&mut de).map_err(|source| LocateError::Decode {
        anchor: anchor.name(),
        source,
    })
}

/// Decodes the blob for a single anchor, reporting absence instead of errors.
pub fn locate_with(raw: &str, anchor: Anchor) -> Option<Value> {
    match decode_blob(raw, anchor) {
        Ok(value) => Some(value),
        Err(err) => {
            if err.is_decode() {
                tracing::debug!(anchor = anchor.name(), error = %err, "page data decode failed");
            }
            None
        }
    }
}

/// Tries every anchor in order and returns the first decodable blob.
pub fn locate(raw: &str) -> Option<Value> {
    Anchor::ALL
        .iter()
        .find_map(|anchor| locate_with(raw, *anchor))
}
