//! Breach lookup against a k-anonymity hash-prefix range API.
//!
//! Only the first [`PREFIX_LEN`] characters of the password's SHA-1 hash
//! leave the process; the returned suffix list is scanned locally.

use sha1::{Digest, Sha1};
use std::time::Duration;
use thiserror::Error;

#[cfg(feature = "async")]
use async_trait::async_trait;

#[cfg(feature = "async")]
use secrecy::{ExposeSecret, SecretString};

/// Hex characters of the hash sent to the range API.
pub const PREFIX_LEN: usize = 5;

/// Error entry added when a password shows up in a breach corpus.
pub const COMPROMISED_MESSAGE: &str = "Password has been compromised in a data breach.";

/// Breach lookup failures.
///
/// None of these say anything about the password itself.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BreachError {
    #[error("Breach lookup request failed: {0}")]
    Request(String),
    #[error("Breach lookup returned unexpected status {0}")]
    UnexpectedStatus(u16),
    #[error("Breach lookup timed out after {0:?}")]
    Timeout(Duration),
}

/// Uppercase hex SHA-1 of `password`.
pub fn sha1_hex(password: &str) -> String {
    format!("{:X}", Sha1::digest(password.as_bytes()))
}

/// Splits the password hash into the prefix sent upstream and the suffix
/// kept local.
pub fn hash_prefix_suffix(password: &str) -> (String, String) {
    let mut hash = sha1_hex(password);
    let suffix = hash.split_off(PREFIX_LEN);
    (hash, suffix)
}

/// Returns `true` if a range response lists `suffix` with a non-zero count.
///
/// Lines are `SUFFIX:COUNT`. Blank and malformed lines are skipped, as are
/// zero-count padding entries.
pub fn range_contains(body: &str, suffix: &str) -> bool {
    body.lines().any(|line| {
        let Some((candidate, count)) = line.trim().split_once(':') else {
            return false;
        };
        if !candidate.eq_ignore_ascii_case(suffix) {
            return false;
        }
        !matches!(count.trim().parse::<u64>(), Ok(0))
    })
}

/// Answers whether a password appears in a breach corpus.
#[cfg(feature = "async")]
#[async_trait]
pub trait BreachChecker: Send + Sync {
    async fn is_compromised(&self, password: &SecretString) -> Result<bool, BreachError>;
}

/// Transport for the range API: fetches the suffix list for one hash prefix.
#[cfg(feature = "async")]
#[async_trait]
pub trait RangeFetcher: Send + Sync {
    async fn fetch_range(&self, prefix: &str) -> Result<String, BreachError>;
}

/// [`BreachChecker`] over any [`RangeFetcher`].
#[cfg(feature = "async")]
#[derive(Debug, Clone)]
pub struct PwnedPasswords<F> {
    fetcher: F,
}

#[cfg(feature = "async")]
impl<F: RangeFetcher> PwnedPasswords<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }
}

#[cfg(feature = "async")]
#[async_trait]
impl<F: RangeFetcher> BreachChecker for PwnedPasswords<F> {
    async fn is_compromised(&self, password: &SecretString) -> Result<bool, BreachError> {
        let (prefix, suffix) = hash_prefix_suffix(password.expose_secret());
        let body = self.fetcher.fetch_range(&prefix).await?;
        Ok(range_contains(&body, &suffix))
    }
}

#[cfg(feature = "hibp")]
pub use http::HttpRangeFetcher;

#[cfg(feature = "hibp")]
mod http {
    use super::{BreachError, RangeFetcher};
    use async_trait::async_trait;
    use reqwest::{Client, StatusCode};

    pub const DEFAULT_BASE_URL: &str = "https://api.pwnedpasswords.com/range/";
    const USER_AGENT: &str = concat!("pwd-blocklist/", env!("CARGO_PKG_VERSION"));

    /// `reqwest` transport for the Pwned Passwords range API.
    #[derive(Debug, Clone)]
    pub struct HttpRangeFetcher {
        client: Client,
        base_url: String,
    }

    impl HttpRangeFetcher {
        pub fn new() -> Result<Self, BreachError> {
            Self::with_base_url(DEFAULT_BASE_URL)
        }

        /// Uses `base_url` followed directly by the prefix.
        pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, BreachError> {
            let client = Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .map_err(|e| BreachError::Request(e.to_string()))?;
            Ok(Self {
                client,
                base_url: base_url.into(),
            })
        }
    }

    #[async_trait]
    impl RangeFetcher for HttpRangeFetcher {
        async fn fetch_range(&self, prefix: &str) -> Result<String, BreachError> {
            let url = format!("{}{}", self.base_url, prefix);
            let response = self
                .client
                .get(&url)
                .header("Add-Padding", "true")
                .send()
                .await
                .map_err(|e| BreachError::Request(e.to_string()))?;

            if response.status() != StatusCode::OK {
                return Err(BreachError::UnexpectedStatus(response.status().as_u16()));
            }

            response
                .text()
                .await
                .map_err(|e| BreachError::Request(e.to_string()))
        }
    }
}
