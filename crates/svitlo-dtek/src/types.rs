//! Wire types for the AJAX response and the derived outage verdict.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Values pulled out of one shutdowns-page HTML document.
///
/// `csrf_token` is `None` on deployments that omit the meta tag; that is a
/// valid state, not an error. `update_fact` is empty when no pattern
/// matched the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    pub csrf_token: Option<String>,
    pub update_fact: String,
}

/// Transport-level view of the AJAX response, consumed by
/// [`crate::validate::validate`] before any JSON parsing happens.
#[derive(Debug, Clone)]
pub struct RawOutageResponse {
    pub status: u16,
    pub content_type: String,
    pub body: String,
}

/// The provider's parsed AJAX response.
///
/// `data` maps house ids to outage records, but the provider also emits an
/// empty-string key for single-record responses and occasionally `null`,
/// so the map stays untyped here; record selection and typing happen in
/// [`crate::resolve`].
#[derive(Debug, Clone, Deserialize)]
pub struct OutageQueryResult {
    #[serde(default)]
    pub result: bool,
    #[serde(default)]
    pub data: Option<Map<String, Value>>,
    #[serde(rename = "updateTimestamp", default)]
    pub update_timestamp: Option<String>,
    #[serde(rename = "updateFact", default)]
    pub update_fact: Option<String>,
}

/// One outage record as the provider serializes it. Any field may be
/// absent on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutageRecord {
    #[serde(default)]
    pub sub_type: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(rename = "type", default)]
    pub outage_type: Option<String>,
    #[serde(rename = "sub_type_reason", default)]
    pub sub_type_reasons: Vec<String>,
}

/// The final per-address verdict, a pure function of
/// [`OutageQueryResult`] plus the house id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutageStatus {
    pub has_outage: bool,
    pub reason: String,
    pub queue_group: String,
    pub start_date: String,
    pub end_date: String,
    pub updated_at: String,
}
