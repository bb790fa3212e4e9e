//! Pipeline entry point: [`DtekClient::fetch_outage`].

use std::time::Duration;

use svitlo_core::{AddressProfile, AppConfig};

use crate::error::DtekError;
use crate::extract::extract_page_context;
use crate::resolve::resolve;
use crate::retry::with_retry;
use crate::session::Session;
use crate::types::OutageStatus;
use crate::validate::validate;

/// Stateless, re-entrant outage fetcher.
///
/// Holds only immutable settings; every attempt builds its own
/// [`Session`], so concurrent `fetch_outage` calls for different addresses
/// share nothing. The per-attempt timeout bounds each GET/POST pair and
/// the retry policy bounds the whole call at
/// `(max_retries + 1) * timeout + max_retries * delay`.
#[derive(Debug, Clone)]
pub struct DtekClient {
    timeout_secs: u64,
    user_agent: String,
    max_retries: u32,
    retry_delay: Duration,
}

impl DtekClient {
    #[must_use]
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        retry_delay_secs: u64,
    ) -> Self {
        Self {
            timeout_secs,
            user_agent: user_agent.to_owned(),
            max_retries,
            retry_delay: Duration::from_secs(retry_delay_secs),
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.fetch_timeout_secs,
            &config.user_agent,
            config.fetch_max_retries,
            config.fetch_retry_delay_secs,
        )
    }

    /// Fetches the current outage status for one address.
    ///
    /// Runs the full GET+POST sequence under the retry policy; each retry
    /// starts over with a fresh session because the provider may have
    /// rotated cookies or the CSRF token since the failed attempt.
    ///
    /// # Errors
    ///
    /// The last attempt's [`DtekError`] after retries are exhausted:
    /// `Http`/`Network` for transport and status failures, `Protocol` for
    /// non-JSON responses, `Data` for semantically unusable JSON.
    pub async fn fetch_outage(
        &self,
        profile: &AddressProfile,
    ) -> Result<OutageStatus, DtekError> {
        with_retry(self.max_retries, self.retry_delay, || {
            self.attempt(profile)
        })
        .await
    }

    /// One GET+POST attempt with its own session.
    async fn attempt(&self, profile: &AddressProfile) -> Result<OutageStatus, DtekError> {
        let session = Session::new(self.timeout_secs, &self.user_agent)?;

        let html = session.fetch_page(&profile.page_url).await?;
        let page = extract_page_context(&html);
        tracing::debug!(
            address = %profile.key,
            csrf_present = page.csrf_token.is_some(),
            update_fact = %page.update_fact,
            "shutdowns page fetched"
        );

        let raw = session
            .post_query(
                &profile.ajax_url,
                &profile.page_url,
                &profile.city,
                &profile.street,
                &page,
            )
            .await?;

        let result = validate(&raw)?;
        resolve(&result, &profile.house_id)
    }
}
