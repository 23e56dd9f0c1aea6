//! Configuration for the airdrop client.

use crate::error::AirdropError;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Base URL of the Unich airdrop user API.
pub const DEFAULT_BASE_URL: &str = "https://api.unich.com/airdrop/user/v1/";
/// Referral code applied to accounts that have not been referred yet.
pub const DEFAULT_REFERRAL_CODE: &str = "YL1FJT";

/// Configuration for the airdrop client.
#[derive(Debug, Clone)]
pub struct AirdropConfig {
    /// Base URL every endpoint path is joined onto. Always ends with `/`.
    pub base_url: Url,
    /// Code submitted to `ref/refer-sign-up`.
    pub referral_code: String,
    /// File with one bearer token per line.
    pub tokens_file: PathBuf,
    /// File with one proxy URI per line.
    pub proxy_file: PathBuf,
    /// Pause between two cycles of the same account.
    pub cycle_interval: Duration,
    /// Pause before each social reward claim.
    pub claim_delay: Duration,
    /// Per-request timeout. `None` leaves requests unbounded.
    pub request_timeout: Option<Duration>,
}

impl AirdropConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AirdropConfigBuilder {
        AirdropConfigBuilder::new()
    }

    /// Resolve an endpoint path such as `mining/start` against the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url, AirdropError> {
        Ok(self.base_url.join(path)?)
    }

    /// Resolve `path` and append `id` as a single percent-encoded segment.
    pub fn endpoint_with_id(&self, path: &str, id: &str) -> Result<Url, AirdropError> {
        let mut endpoint = self.endpoint(path)?;
        endpoint
            .path_segments_mut()
            .map_err(|_| AirdropError::InvalidUrl(url::ParseError::RelativeUrlWithoutBase))?
            .pop_if_empty()
            .push(id);
        Ok(endpoint)
    }
}

impl Default for AirdropConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            referral_code: DEFAULT_REFERRAL_CODE.to_string(),
            tokens_file: PathBuf::from("tokens.txt"),
            proxy_file: PathBuf::from("proxy.txt"),
            cycle_interval: Duration::from_secs(24 * 60 * 60),
            claim_delay: Duration::from_secs(1),
            request_timeout: None,
        }
    }
}

/// Builder for `AirdropConfig`.
pub struct AirdropConfigBuilder {
    base_url: Option<String>,
    referral_code: Option<String>,
    tokens_file: Option<PathBuf>,
    proxy_file: Option<PathBuf>,
    cycle_interval: Option<Duration>,
    claim_delay: Option<Duration>,
    request_timeout: Option<Duration>,
}

impl AirdropConfigBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self {
            base_url: None,
            referral_code: None,
            tokens_file: None,
            proxy_file: None,
            cycle_interval: None,
            claim_delay: None,
            request_timeout: None,
        }
    }

    /// Set the API base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the referral code submitted for unreferred accounts.
    pub fn referral_code(mut self, code: impl Into<String>) -> Self {
        self.referral_code = Some(code.into());
        self
    }

    /// Set the token file path.
    pub fn tokens_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.tokens_file = Some(path.into());
        self
    }

    /// Set the proxy file path.
    pub fn proxy_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.proxy_file = Some(path.into());
        self
    }

    /// Set the pause between cycles of one account.
    pub fn cycle_interval(mut self, interval: Duration) -> Self {
        self.cycle_interval = Some(interval);
        self
    }

    /// Set the pause before each reward claim.
    pub fn claim_delay(mut self, delay: Duration) -> Self {
        self.claim_delay = Some(delay);
        self
    }

    /// Set a per-request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<AirdropConfig, AirdropError> {
        let defaults = AirdropConfig::default();

        let base_url = match self.base_url {
            Some(raw) if raw.ends_with('/') => Url::parse(&raw)?,
            Some(raw) => Url::parse(&format!("{}/", raw))?,
            None => defaults.base_url,
        };

        Ok(AirdropConfig {
            base_url,
            referral_code: self.referral_code.unwrap_or(defaults.referral_code),
            tokens_file: self.tokens_file.unwrap_or(defaults.tokens_file),
            proxy_file: self.proxy_file.unwrap_or(defaults.proxy_file),
            cycle_interval: self.cycle_interval.unwrap_or(defaults.cycle_interval),
            claim_delay: self.claim_delay.unwrap_or(defaults.claim_delay),
            request_timeout: self.request_timeout,
        })
    }
}

impl Default for AirdropConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
