//! Error types for page fetching and extraction.

use thiserror::Error;

/// Failures while pulling rows out of a race page.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("race block count mismatch: {group} has {actual}, expected {expected}")]
    GroupCountMismatch {
        group: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("unrecognized entry row class: {0:?}")]
    UnrecognizedRowClass(String),

    #[error("race distance text must have 3 segments, got {segments}")]
    MalformedMeta { segments: usize },

    #[error("missing element: {0}")]
    MissingElement(&'static str),

    #[error("invalid {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("invalid odds: {0:?}")]
    InvalidOdds(String),

    #[error("invalid CSS selector {0:?}")]
    Selector(String),
}

/// Failures while getting the page HTML.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("server returned {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch_display() {
        let err = ExtractError::GroupCountMismatch {
            group: "payouts",
            expected: 8,
            actual: 7,
        };
        assert_eq!(
            err.to_string(),
            "race block count mismatch: payouts has 7, expected 8"
        );
    }

    #[test]
    fn test_malformed_meta_display() {
        let err = ExtractError::MalformedMeta { segments: 2 };
        assert!(err.to_string().contains("got 2"));
    }
}
