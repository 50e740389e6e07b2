//! Course catalog API client
//!
//! Thin wrapper over the registrar's public course endpoints. Every request
//! goes through [`CatalogClient::fetch_json`], which owns the retry loop.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, REFERER};
use reqwest::{Client, Url};
use serde_json::Value;

use super::error::FetchError;
use super::retry::RetryPolicy;
use crate::config::ScraperConfig;

pub const DEFAULT_API_BASE: &str = "https://api.ucla.edu/sis/publicapis/course";

/// Every subject area code, e.g. `[{"subj_area_cd":"MATH","display_value":"Mathematics (MATH)"}]`
const EP_ALL_SUBJECTS: &str = "getallcourses";
/// All courses of one subject area, `?subjectarea=MATH`
const EP_BY_SUBJECT: &str = "getcoursedetail";
/// Full-text search over descriptions, `?searchquery=Mathematics+31A`
const EP_SEARCH: &str = "getcoursedetailbysearch";

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const REGISTRAR_REFERER: &str = "https://registrar.ucla.edu/";

pub struct CatalogClient {
    client: Client,
    base: String,
    retry: RetryPolicy,
}

impl CatalogClient {
    pub fn new(base: &str, timeout: Duration, retry: RetryPolicy) -> Result<Self, FetchError> {
        // The API is undocumented and turns away clients that don't look
        // like the registrar's own site.
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(REFERER, HeaderValue::from_static(REGISTRAR_REFERER));

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            base: base.trim_end_matches('/').to_string(),
            retry,
        })
    }

    pub fn from_config(config: &ScraperConfig) -> anyhow::Result<Self> {
        let retry = RetryPolicy::new(config.max_attempts, config.retry_backoff()?);
        Ok(Self::new(&config.api_base, config.request_timeout(), retry)?)
    }

    pub fn all_subjects_url(&self) -> String {
        format!("{}/{}", self.base, EP_ALL_SUBJECTS)
    }

    pub fn subject_url(&self, subject_code: &str) -> String {
        self.endpoint_with_query(EP_BY_SUBJECT, "subjectarea", subject_code)
    }

    pub fn search_url(&self, query: &str) -> String {
        self.endpoint_with_query(EP_SEARCH, "searchquery", query)
    }

    /// Form-encodes the parameter, so spaces go out as `+`.
    fn endpoint_with_query(&self, endpoint: &str, key: &str, value: &str) -> String {
        let base = format!("{}/{}", self.base, endpoint);
        match Url::parse_with_params(&base, &[(key, value)]) {
            Ok(url) => url.to_string(),
            // Unparseable base; let the request itself report it.
            Err(_) => format!("{}?{}={}", base, key, value.replace(' ', "+")),
        }
    }

    /// GET `url` and parse the body as JSON, retrying per the client's policy.
    pub async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        self.retry
            .run(url, |attempt| self.fetch_attempt(url, attempt))
            .await
    }

    /// Single fetch attempt
    async fn fetch_attempt(&self, url: &str, attempt: u32) -> Result<Value, FetchError> {
        tracing::trace!("GET {} (attempt {})", url, attempt);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("[HTTP {}] {}", status.as_u16(), url);
            return Err(FetchError::Status {
                status,
                url: url.to_string(),
            });
        }

        let body = response.bytes().await.map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

        serde_json::from_slice(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
