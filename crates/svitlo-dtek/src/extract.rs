//! Pure extraction of the CSRF token and update-fact timestamp from the
//! shutdowns page. No network dependency; both functions are total.

use regex::Regex;

use crate::types::PageContext;

/// Update-fact patterns, tried in order; the first capture wins.
///
/// JSON-style keys come before assignment-style ones, and `updateFact`
/// before `updateTimestamp` within each tier. The order is load-bearing:
/// pages that embed both keys must always yield the `updateFact` value.
const UPDATE_FACT_PATTERNS: [&str; 4] = [
    r#""updateFact"\s*:\s*"([^"]+)""#,
    r#""updateTimestamp"\s*:\s*"([^"]+)""#,
    r#"updateFact\s*=\s*"([^"]+)""#,
    r#"updateTimestamp\s*=\s*"([^"]+)""#,
];

/// Extracts the CSRF token from a `<meta name="csrf-token" content="…">`
/// tag. Returns `None` when the page carries no token; some regional DTEK
/// deployments omit it, so absence is an expected state.
#[must_use]
pub fn extract_csrf_token(html: &str) -> Option<String> {
    let pattern = Regex::new(r#"(?i)<meta\s+name=["']csrf-token["']\s+content=["']([^"']+)["']"#)
        .expect("valid csrf regex");
    pattern
        .captures(html)
        .and_then(|cap| cap.get(1).map(|m| m.as_str().to_string()))
}

/// Extracts the update-fact timestamp embedded in the page markup/script,
/// e.g. `updateTimestamp":"22:35 20.02.2026"`. Returns an empty string
/// when no pattern matches; the POST then sends an empty `updateFact`,
/// which the provider accepts.
#[must_use]
pub fn extract_update_fact(html: &str) -> String {
    for pattern in UPDATE_FACT_PATTERNS {
        let re = Regex::new(pattern).expect("valid update-fact regex");
        if let Some(value) = re.captures(html).and_then(|cap| cap.get(1)) {
            return value.as_str().to_string();
        }
    }
    String::new()
}

/// Convenience wrapper running both extractors over one document.
#[must_use]
pub fn extract_page_context(html: &str) -> PageContext {
    PageContext {
        csrf_token: extract_csrf_token(html),
        update_fact: extract_update_fact(html),
    }
}
