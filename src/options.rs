//! Validation options and policy configuration.

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::tolerance::{ToleranceConfig, ToleranceFn};

/// Malformed options, reported before any scanning starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Matching sensitivity must be a finite, non-negative number, got {0}")]
    InvalidSensitivity(f64),
    #[error("Error limit must be at least 1")]
    ZeroErrorLimit,
    #[error("Minimum length {min} exceeds maximum length {max}")]
    InvertedLengthBounds { min: usize, max: usize },
    #[error("Allowed character set is empty")]
    EmptyAllowedCharacters,
}

/// Options for [`validate_blocklist`](crate::validate_blocklist).
///
/// # Example
///
/// ```rust
/// use pwd_blocklist::BlocklistOptions;
///
/// let options = BlocklistOptions::default()
///     .with_sensitivity(0.5)
///     .with_error_limit(2)
///     .with_trim_whitespace(false);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct BlocklistOptions {
    pub tolerance: ToleranceConfig,
    /// Trim leading/trailing whitespace from deny-list entries.
    pub trim_whitespace: bool,
    /// Stop after this many errors. `None` means unbounded.
    pub error_limit: Option<usize>,
}

impl Default for BlocklistOptions {
    fn default() -> Self {
        Self {
            tolerance: ToleranceConfig::default(),
            trim_whitespace: true,
            error_limit: None,
        }
    }
}

impl BlocklistOptions {
    pub fn with_sensitivity(mut self, sensitivity: f64) -> Self {
        self.tolerance.sensitivity = sensitivity;
        self
    }

    pub fn with_absolute_cap(mut self, cap: usize) -> Self {
        self.tolerance.absolute_cap = cap;
        self
    }

    /// Replaces the proportional tolerance with `f(term, password)`.
    pub fn with_custom_tolerance<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &str) -> usize + Send + Sync + 'static,
    {
        let f: ToleranceFn = Arc::new(f);
        self.tolerance.custom = Some(f);
        self
    }

    pub fn with_trim_whitespace(mut self, trim: bool) -> Self {
        self.trim_whitespace = trim;
        self
    }

    pub fn with_error_limit(mut self, limit: usize) -> Self {
        self.error_limit = Some(limit);
        self
    }

    /// Checks the options without touching any password.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tolerance.validate()?;
        if self.error_limit == Some(0) {
            return Err(ConfigError::ZeroErrorLimit);
        }
        Ok(())
    }

    /// `true` once `count` errors have been collected.
    pub(crate) fn limit_reached(&self, count: usize) -> bool {
        self.error_limit.is_some_and(|limit| count >= limit)
    }
}

pub const DEFAULT_BREACH_TIMEOUT: Duration = Duration::from_secs(5);

/// Full password policy: length bounds, allowed characters, deny-list and
/// breach lookup timeout.
///
/// # Example
///
/// ```rust
/// use pwd_blocklist::{BlocklistOptions, PasswordPolicy};
///
/// let policy = PasswordPolicy::default()
///     .with_min_length(8)
///     .with_blocklist(["password", "qwerty"])
///     .with_blocklist_options(BlocklistOptions::default().with_error_limit(1));
/// assert!(policy.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    /// Minimum length in code points.
    pub min_length: Option<usize>,
    /// Maximum length in code points.
    pub max_length: Option<usize>,
    /// Every password character must belong to this set when present.
    pub allowed_characters: Option<String>,
    pub blocklist: Vec<String>,
    pub blocklist_options: BlocklistOptions,
    /// Upper bound on a single breach lookup.
    pub breach_timeout: Duration,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: None,
            max_length: None,
            allowed_characters: None,
            blocklist: Vec::new(),
            blocklist_options: BlocklistOptions::default(),
            breach_timeout: DEFAULT_BREACH_TIMEOUT,
        }
    }
}

impl PasswordPolicy {
    pub fn with_min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn with_allowed_characters(mut self, allowed: impl Into<String>) -> Self {
        self.allowed_characters = Some(allowed.into());
        self
    }

    pub fn with_blocklist<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blocklist = terms.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_blocklist_options(mut self, options: BlocklistOptions) -> Self {
        self.blocklist_options = options;
        self
    }

    pub fn with_breach_timeout(mut self, timeout: Duration) -> Self {
        self.breach_timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let (Some(min), Some(max)) = (self.min_length, self.max_length) {
            if min > max {
                return Err(ConfigError::InvertedLengthBounds { min, max });
            }
        }
        if self.allowed_characters.as_deref() == Some("") {
            return Err(ConfigError::EmptyAllowedCharacters);
        }
        self.blocklist_options.validate()
    }
}
