//! Classifies the raw AJAX response as usable JSON or a protocol failure.

use crate::error::{excerpt, DtekError};
use crate::types::{OutageQueryResult, RawOutageResponse};

/// Validates and parses the raw AJAX response.
///
/// The check order is fixed: HTTP status first, then the content-type /
/// body-shape gate, then the JSON parse. A `text/html` body with status
/// 200 is DTEK's usual way of serving a bot challenge instead of data, so
/// it surfaces as a distinct [`DtekError::Protocol`] rather than a parse
/// error. A body that merely mislabels its content-type but still starts
/// with `{` is accepted and parsed.
///
/// # Errors
///
/// - [`DtekError::Network`] if the status is not 200.
/// - [`DtekError::Protocol`] if the body is not JSON or does not parse.
pub fn validate(raw: &RawOutageResponse) -> Result<OutageQueryResult, DtekError> {
    if raw.status != 200 {
        return Err(DtekError::Network {
            status: raw.status,
            context: format!("AJAX query (content-type \"{}\")", raw.content_type),
            body_excerpt: excerpt(&raw.body),
        });
    }

    let looks_like_json = raw.content_type.contains("application/json")
        || raw.body.trim_start().starts_with('{');
    if !looks_like_json {
        return Err(DtekError::Protocol {
            reason: "body is not JSON".to_string(),
            content_type: raw.content_type.clone(),
            body_excerpt: excerpt(&raw.body),
        });
    }

    serde_json::from_str::<OutageQueryResult>(&raw.body).map_err(|e| DtekError::Protocol {
        reason: format!("JSON parse error: {e}"),
        content_type: raw.content_type.clone(),
        body_excerpt: excerpt(&raw.body),
    })
}
