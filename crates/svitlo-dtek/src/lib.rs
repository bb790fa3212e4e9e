//! Outage-fetch pipeline for DTEK's shutdowns portal.
//!
//! DTEK publishes per-house outage data behind an AJAX endpoint that is
//! protected by a session-derived CSRF token and a page-embedded freshness
//! marker (the "update fact"). One fetch is therefore a two-step protocol:
//! GET the shutdowns page to obtain cookies, the CSRF token, and the update
//! fact, then POST a form-encoded `getHomeNum` query echoing those values
//! back on the same session.
//!
//! [`DtekClient::fetch_outage`] runs the whole sequence (with bounded
//! retries, re-running the GET so rotated tokens are picked up) and reduces
//! the provider's JSON to an [`OutageStatus`] verdict for one address.

pub mod client;
pub mod error;
pub mod extract;
pub mod resolve;
pub mod retry;
pub mod session;
pub mod types;
pub mod validate;

pub use client::DtekClient;
pub use error::DtekError;
pub use resolve::{resolve, UNKNOWN};
pub use retry::with_retry;
pub use types::{OutageQueryResult, OutageRecord, OutageStatus, PageContext, RawOutageResponse};
pub use validate::validate;
