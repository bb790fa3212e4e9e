//! Interprets a parsed AJAX response into a per-address verdict.

use serde_json::{Map, Value};

use crate::error::{excerpt, DtekError};
use crate::types::{OutageQueryResult, OutageRecord, OutageStatus};

/// Sentinel for fields the provider left absent or empty. This is what the
/// provider's own UI renders for missing values, so reports pass it
/// through verbatim.
pub const UNKNOWN: &str = "—";

/// Resolves the outage verdict for one house id.
///
/// Record selection precedence, first structured match wins:
/// 1. `data[house_id]`,
/// 2. `data[""]` (the provider's empty-key fallback for single-record
///    responses),
/// 3. the first value of `data` in map iteration order (for responses
///    keyed unpredictably).
///
/// The verdict itself is the provider's one business rule: an outage is
/// confirmed only when `type == "2"` and both dates are present. Other
/// `type` values are undocumented and deliberately read as "no confirmed
/// outage".
///
/// # Errors
///
/// - [`DtekError::Data`] with reason `result=false` when the provider
///   flagged the query as failed.
/// - [`DtekError::Data`] when no candidate is a structured record, with a
///   truncated dump of `data` for diagnosis.
pub fn resolve(result: &OutageQueryResult, house_id: &str) -> Result<OutageStatus, DtekError> {
    if !result.result {
        return Err(DtekError::Data {
            reason: "result=false".to_string(),
        });
    }

    let empty = Map::new();
    let data = result.data.as_ref().unwrap_or(&empty);

    let candidate = data
        .get(house_id)
        .filter(|v| v.is_object())
        .or_else(|| data.get("").filter(|v| v.is_object()))
        .or_else(|| data.values().find(|v| v.is_object()));

    let Some(value) = candidate else {
        let dump = serde_json::to_string(data).unwrap_or_else(|_| "<unserializable>".to_string());
        return Err(DtekError::Data {
            reason: format!("no record for house {house_id} in {}", excerpt(&dump)),
        });
    };

    let record: OutageRecord =
        serde_json::from_value(value.clone()).map_err(|e| DtekError::Data {
            reason: format!("malformed record for house {house_id}: {e}"),
        })?;

    Ok(status_from_record(&record, result))
}

fn status_from_record(record: &OutageRecord, result: &OutageQueryResult) -> OutageStatus {
    let reason = or_unknown(record.sub_type.as_deref());
    let start_date = or_unknown(record.start_date.as_deref());
    let end_date = or_unknown(record.end_date.as_deref());
    let queue_group = record
        .sub_type_reasons
        .first()
        .cloned()
        .unwrap_or_else(|| UNKNOWN.to_string());

    let has_outage = record.outage_type.as_deref() == Some("2")
        && start_date != UNKNOWN
        && end_date != UNKNOWN;

    let updated_at = [
        result.update_timestamp.as_deref(),
        result.update_fact.as_deref(),
    ]
    .into_iter()
    .flatten()
    .find(|s| !s.is_empty())
    .unwrap_or(UNKNOWN)
    .to_string();

    OutageStatus {
        has_outage,
        reason,
        queue_group,
        start_date,
        end_date,
        updated_at,
    }
}

fn or_unknown(value: Option<&str>) -> String {
    match value {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => UNKNOWN.to_string(),
    }
}
