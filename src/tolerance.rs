//! Per-term fuzzy tolerance.
//!
//! Longer terms tolerate proportionally more edits, bounded by an absolute
//! cap, unless the caller supplies its own function.

use std::fmt;
use std::sync::Arc;

use crate::options::ConfigError;

pub const DEFAULT_SENSITIVITY: f64 = 0.25;
pub const DEFAULT_ABSOLUTE_CAP: usize = 5;

/// Caller-supplied tolerance function, called with `(term, password)`.
pub type ToleranceFn = Arc<dyn Fn(&str, &str) -> usize + Send + Sync>;

#[derive(Clone)]
pub struct ToleranceConfig {
    /// Fraction of the term length allowed as edit distance.
    pub sensitivity: f64,
    /// Upper bound on the length-proportional tolerance.
    pub absolute_cap: usize,
    /// Overrides the proportional rule when set.
    pub custom: Option<ToleranceFn>,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            sensitivity: DEFAULT_SENSITIVITY,
            absolute_cap: DEFAULT_ABSOLUTE_CAP,
            custom: None,
        }
    }
}

impl fmt::Debug for ToleranceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToleranceConfig")
            .field("sensitivity", &self.sensitivity)
            .field("absolute_cap", &self.absolute_cap)
            .field("custom", &self.custom.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl ToleranceConfig {
    /// Rejects a negative, NaN or infinite sensitivity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.sensitivity.is_finite() || self.sensitivity < 0.0 {
            return Err(ConfigError::InvalidSensitivity(self.sensitivity));
        }
        Ok(())
    }

    /// Maximum edit distance at which `term` still counts as a match.
    ///
    /// Without a custom function this is
    /// `min(floor(chars(term) * sensitivity), absolute_cap)`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pwd_blocklist::ToleranceConfig;
    ///
    /// let config = ToleranceConfig::default();
    /// assert_eq!(config.tolerance("password", "anything"), 2);
    /// assert_eq!(config.tolerance("a".repeat(40).as_str(), "anything"), 5);
    /// ```
    pub fn tolerance(&self, term: &str, password: &str) -> usize {
        if let Some(custom) = &self.custom {
            return custom(term, password);
        }
        let scaled = (term.chars().count() as f64 * self.sensitivity).floor();
        // `as` saturates, and validate() rules out negatives and NaN.
        (scaled as usize).min(self.absolute_cap)
    }
}
