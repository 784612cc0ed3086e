//! Configuration for the Doofinder client.

use std::fmt;
use std::time::Duration;

use url::Url;

use crate::errors::SearchServiceError;

/// Default search zone.
pub const DEFAULT_ZONE: &str = "eu1";

/// API version segment in every endpoint path.
pub const API_VERSION: &str = "6";

/// Timeout applied to every request without a more specific one.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout applied to each bulk item upload.
pub const DEFAULT_UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for one search engine.
#[derive(Clone)]
pub struct ServiceConfig {
    /// Search engine identifier embedded in every URL.
    pub hashid: String,
    /// API token sent as `Authorization: Token <token>`.
    pub token: String,
    /// Search zone, e.g. `eu1` or `us1`.
    pub zone: String,
    /// Replaces `https://{zone}-search.doofinder.com` when set.
    pub base_url: Option<String>,
    pub request_timeout: Duration,
    pub upload_timeout: Duration,
}

impl ServiceConfig {
    /// Create a config for the default zone.
    pub fn new(hashid: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            hashid: hashid.into(),
            token: token.into(),
            zone: DEFAULT_ZONE.to_string(),
            base_url: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            upload_timeout: DEFAULT_UPLOAD_TIMEOUT,
        }
    }

    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = zone.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_upload_timeout(mut self, timeout: Duration) -> Self {
        self.upload_timeout = timeout;
        self
    }

    /// Check that the credentials and zone are usable.
    pub fn validate(&self) -> Result<(), SearchServiceError> {
        if self.hashid.trim().is_empty() {
            return Err(SearchServiceError::configuration("hashid is required"));
        }
        if self.token.trim().is_empty() {
            return Err(SearchServiceError::configuration("token is required"));
        }
        if self.base_url.is_none() && self.zone.trim().is_empty() {
            return Err(SearchServiceError::configuration("zone is required"));
        }
        if self.request_timeout.is_zero() || self.upload_timeout.is_zero() {
            return Err(SearchServiceError::configuration(
                "timeouts must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Root URL for this engine: `{base}/6/{hashid}`.
    pub fn api_root(&self) -> Result<Url, SearchServiceError> {
        self.validate()?;

        let base = match &self.base_url {
            Some(base) => base.clone(),
            None => format!("https://{}-search.doofinder.com", self.zone),
        };

        let mut url = Url::parse(&base)
            .map_err(|e| SearchServiceError::configuration(format!("Invalid base URL {base}: {e}")))?;

        url.path_segments_mut()
            .map_err(|_| SearchServiceError::configuration(format!("Base URL {base} cannot have a path")))?
            .pop_if_empty()
            .extend([API_VERSION, self.hashid.as_str()]);

        Ok(url)
    }
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("hashid", &self.hashid)
            .field("token", &"<redacted>")
            .field("zone", &self.zone)
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .field("upload_timeout", &self.upload_timeout)
            .finish()
    }
}
