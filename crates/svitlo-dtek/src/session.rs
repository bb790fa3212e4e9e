//! One HTTP session per fetch attempt: a cookie-jar `reqwest::Client` plus
//! the browser-like header set DTEK expects.
//!
//! A [`Session`] is created fresh for every attempt (including every retry)
//! and dropped afterwards, so cookies and CSRF state are never shared
//! across attempts or across concurrent fetches.

use std::time::Duration;

use reqwest::Client;

use crate::error::{excerpt, DtekError};
use crate::types::{PageContext, RawOutageResponse};

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_AJAX: &str = "application/json, text/javascript, */*; q=0.01";
const ACCEPT_LANGUAGE_UA: &str = "uk-UA,uk;q=0.9,en-US;q=0.8,en;q=0.7";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// A single-use HTTP session for one fetch attempt.
pub struct Session {
    client: Client,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

impl Session {
    /// Builds a fresh session with its own cookie jar.
    ///
    /// # Errors
    ///
    /// Returns [`DtekError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, DtekError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .cookie_store(true)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches the shutdowns page, capturing the provider's cookies into
    /// this session's jar for the follow-up POST.
    ///
    /// # Errors
    ///
    /// - [`DtekError::Http`] on a transport failure.
    /// - [`DtekError::Network`] on any non-2xx status, carrying the status
    ///   and a body excerpt.
    pub async fn fetch_page(&self, page_url: &str) -> Result<String, DtekError> {
        let response = self
            .client
            .get(page_url)
            .header(reqwest::header::ACCEPT, ACCEPT_HTML)
            .header(reqwest::header::ACCEPT_LANGUAGE, ACCEPT_LANGUAGE_UA)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(DtekError::Network {
                status: status.as_u16(),
                context: format!("GET {page_url}"),
                body_excerpt: excerpt(&body),
            });
        }

        Ok(body)
    }

    /// Posts the `getHomeNum` query to the AJAX endpoint, echoing back the
    /// update fact and (when present) the CSRF token extracted from the
    /// page. Cookies captured by [`Session::fetch_page`] ride along
    /// automatically.
    ///
    /// No status validation happens here; the raw response is handed to
    /// [`crate::validate::validate`] untouched.
    ///
    /// # Errors
    ///
    /// Returns [`DtekError::Http`] on a transport failure.
    pub async fn post_query(
        &self,
        ajax_url: &str,
        page_url: &str,
        city: &str,
        street: &str,
        page: &PageContext,
    ) -> Result<RawOutageResponse, DtekError> {
        // Index order 0/1/2 is part of the provider's contract.
        let form = [
            ("method", "getHomeNum"),
            ("data[0][name]", "city"),
            ("data[0][value]", city),
            ("data[1][name]", "street"),
            ("data[1][value]", street),
            ("data[2][name]", "updateFact"),
            ("data[2][value]", page.update_fact.as_str()),
        ];

        let mut builder = self
            .client
            .post(ajax_url)
            .form(&form)
            .header(reqwest::header::ACCEPT, ACCEPT_AJAX)
            .header("X-Requested-With", "XMLHttpRequest")
            .header(reqwest::header::REFERER, page_url)
            .header(reqwest::header::ORIGIN, extract_origin(page_url));

        if let Some(token) = &page.csrf_token {
            builder = builder.header("X-CSRF-Token", token);
        }

        // `form()` sets a plain urlencoded content-type; the provider's
        // endpoint expects the charset-qualified variant, so replace it on
        // the built request.
        let mut request = builder.build()?;
        request.headers_mut().insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static(FORM_CONTENT_TYPE),
        );

        let response = self.client.execute(request).await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let body = response.text().await?;

        Ok(RawOutageResponse {
            status,
            content_type,
            body,
        })
    }
}

/// Extracts the scheme+host origin from the page URL for the `Origin`
/// header. Given `"https://www.dtek-krem.com.ua/ua/shutdowns"`, returns
/// `"https://www.dtek-krem.com.ua"`.
#[must_use]
pub(crate) fn extract_origin(page_url: &str) -> String {
    reqwest::Url::parse(page_url).map_or_else(
        |e| {
            tracing::warn!(
                page_url,
                error = %e,
                "could not parse page_url as URL; falling back to string split for origin extraction"
            );
            page_url
                .trim_end_matches('/')
                .splitn(4, '/')
                .take(3)
                .collect::<Vec<_>>()
                .join("/")
        },
        |u| u.origin().ascii_serialization(),
    )
}
