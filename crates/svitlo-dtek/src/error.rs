use thiserror::Error;

/// How much of a response body is kept in error messages.
const EXCERPT_LEN: usize = 300;

/// Errors surfaced by the outage-fetch pipeline.
///
/// `Http` and `Network` are the transport-level kinds (connection failures
/// and unexpected HTTP statuses), `Protocol` means the provider answered
/// with something other than the expected JSON, and `Data` means the JSON
/// was valid but semantically unusable. The retry policy treats all kinds
/// uniformly; see [`crate::retry::with_retry`].
#[derive(Debug, Error)]
pub enum DtekError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} during {context}: {body_excerpt}")]
    Network {
        status: u16,
        context: String,
        body_excerpt: String,
    },

    #[error("provider returned unusable response ({reason}; content-type \"{content_type}\"): {body_excerpt}")]
    Protocol {
        reason: String,
        content_type: String,
        body_excerpt: String,
    },

    #[error("unusable outage data: {reason}")]
    Data { reason: String },
}

/// Truncates a response body to the first [`EXCERPT_LEN`] characters for
/// inclusion in error messages, respecting char boundaries.
#[must_use]
pub(crate) fn excerpt(body: &str) -> String {
    if body.chars().count() <= EXCERPT_LEN {
        body.to_owned()
    } else {
        let cut: String = body.chars().take(EXCERPT_LEN).collect();
        format!("{cut}…")
    }
}
