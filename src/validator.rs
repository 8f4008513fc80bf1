//! Password validation - deny-list core and combined policy validator.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::blocklist::{BlockTerm, BlockTerms};
use crate::breach::BreachError;
use crate::matcher::match_term;
use crate::options::{BlocklistOptions, ConfigError, PasswordPolicy};
use crate::sections::SECTIONS;

#[cfg(feature = "async")]
use crate::breach::{BreachChecker, COMPROMISED_MESSAGE};

/// Result of one validation call. Valid iff there are no errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    errors: Vec<String>,
}

impl ValidationOutcome {
    pub fn valid() -> Self {
        Self::default()
    }

    pub fn from_errors(errors: Vec<String>) -> Self {
        Self { errors }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Violations in the order they were found.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }
}

/// Failures of the combined validator.
#[derive(Error, Debug)]
pub enum ValidatorError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Validation cancelled")]
    Cancelled,
    /// The breach lookup failed. `local` holds the outcome of the local
    /// checks so the caller can decide between failing closed and
    /// degrading to local-only validation.
    #[error("Breach lookup failed: {source}")]
    BreachCheckFailed {
        source: BreachError,
        local: ValidationOutcome,
    },
}

/// Error message for a deny-list hit.
pub fn blocked_term_message(term: &BlockTerm) -> String {
    format!("Password contains a substring too similar to: \"{}\".", term)
}

/// Validates a password against a raw deny-list using fuzzy substring matching.
///
/// Terms are trimmed (unless disabled), lowercased and deduplicated, then
/// checked in first-seen order. Each matching term adds one error until the
/// error limit is reached. An absent or blank deny-list is always valid.
///
/// # Errors
///
/// Returns [`ConfigError`] for malformed options, before any term is scanned.
///
/// # Panics
///
/// A panicking custom tolerance function is not caught.
///
/// # Example
///
/// ```rust
/// use pwd_blocklist::{validate_blocklist, BlocklistOptions};
/// use secrecy::SecretString;
///
/// let password = SecretString::new("myp@ssword123".to_string().into());
/// let options = BlocklistOptions::default();
/// let outcome = validate_blocklist(&password, Some(&["password"][..]), &options)
///     .expect("default options are valid");
///
/// assert!(!outcome.is_valid());
/// assert_eq!(
///     outcome.errors(),
///     ["Password contains a substring too similar to: \"password\"."]
/// );
/// ```
pub fn validate_blocklist<S: AsRef<str>>(
    password: &SecretString,
    blocklist: Option<&[S]>,
    options: &BlocklistOptions,
) -> Result<ValidationOutcome, ConfigError> {
    options.validate()?;

    let terms = BlockTerms::normalize(blocklist, options.trim_whitespace);
    if terms.is_empty() {
        return Ok(ValidationOutcome::valid());
    }

    let pwd = password.expose_secret();
    let mut errors = Vec::new();

    for term in &terms {
        let tolerance = options.tolerance.tolerance(term, pwd);
        let outcome = match_term(pwd, term, tolerance);
        if !outcome.matched {
            continue;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Deny-list term matched: {:?} (tolerance {})",
            outcome.term.as_str(),
            tolerance
        );

        errors.push(blocked_term_message(outcome.term));
        if options.limit_reached(errors.len()) {
            break;
        }
    }

    Ok(ValidationOutcome::from_errors(errors))
}

/// Runs every section of a [`PasswordPolicy`] and, with the `async` feature,
/// the breach lookup.
///
/// # Example
///
/// ```rust
/// use pwd_blocklist::{PasswordPolicy, PasswordValidator};
/// use secrecy::SecretString;
///
/// let policy = PasswordPolicy::default()
///     .with_min_length(8)
///     .with_blocklist(["password", "qwerty"]);
/// let validator = PasswordValidator::new(policy).expect("valid policy");
///
/// let password = SecretString::new("qwerty1".to_string().into());
/// let outcome = validator.validate(&password).expect("local checks succeed");
/// assert_eq!(outcome.errors().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    policy: PasswordPolicy,
}

impl PasswordValidator {
    pub fn new(policy: PasswordPolicy) -> Result<Self, ConfigError> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn policy(&self) -> &PasswordPolicy {
        &self.policy
    }

    /// Runs the local sections (length, charset, blocklist) in order.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub fn validate(&self, password: &SecretString) -> Result<ValidationOutcome, ValidatorError> {
        let mut errors = Vec::new();

        for (section_name, section_fn) in SECTIONS {
            match section_fn(password, &self.policy) {
                Ok(found) => errors.extend(found),
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::error!("Password policy section {} failed: {}", section_name, e);
                    return Err(e.into());
                }
            }
        }

        Ok(ValidationOutcome::from_errors(errors))
    }

    /// Runs the local sections, then the breach lookup under the policy's
    /// timeout.
    ///
    /// A compromised password adds [`COMPROMISED_MESSAGE`] after the local
    /// errors. A failed or timed-out lookup is returned as
    /// [`ValidatorError::BreachCheckFailed`] carrying the local outcome.
    #[cfg(feature = "async")]
    pub async fn validate_with_breach<C>(
        &self,
        password: &SecretString,
        checker: &C,
        token: Option<CancellationToken>,
    ) -> Result<ValidationOutcome, ValidatorError>
    where
        C: BreachChecker + ?Sized,
    {
        let token = token.unwrap_or_else(CancellationToken::new);
        if token.is_cancelled() {
            return Err(ValidatorError::Cancelled);
        }

        let local = self.validate(password)?;
        let timeout = self.policy.breach_timeout;

        let lookup = tokio::select! {
            _ = token.cancelled() => return Err(ValidatorError::Cancelled),
            result = tokio::time::timeout(timeout, checker.is_compromised(password)) => result,
        };

        match lookup {
            Ok(Ok(true)) => {
                let mut errors = local.into_errors();
                errors.push(COMPROMISED_MESSAGE.to_string());
                Ok(ValidationOutcome::from_errors(errors))
            }
            Ok(Ok(false)) => Ok(local),
            Ok(Err(source)) => {
                #[cfg(feature = "tracing")]
                tracing::warn!("Breach lookup failed: {}", source);
                Err(ValidatorError::BreachCheckFailed { source, local })
            }
            Err(_) => {
                #[cfg(feature = "tracing")]
                tracing::warn!("Breach lookup timed out after {:?}", timeout);
                Err(ValidatorError::BreachCheckFailed {
                    source: BreachError::Timeout(timeout),
                    local,
                })
            }
        }
    }

    /// Async version that sends the combined result via channel.
    #[cfg(feature = "async")]
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub async fn validate_tx<C>(
        &self,
        password: &SecretString,
        checker: &C,
        token: CancellationToken,
        tx: mpsc::Sender<Result<ValidationOutcome, ValidatorError>>,
    ) where
        C: BreachChecker + ?Sized,
    {
        #[cfg(feature = "tracing")]
        tracing::info!("password validation is about to start...");

        let result = self.validate_with_breach(password, checker, Some(token)).await;

        if let Err(e) = tx.send(result).await {
            #[cfg(feature = "tracing")]
            tracing::error!("Failed to send password validation result: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STANDARD_BLOCKLIST: [&str; 3] = ["password", "123456", "qwerty"];

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    fn check(password: &str, blocklist: &[&str], options: &BlocklistOptions) -> ValidationOutcome {
        validate_blocklist(&secret(password), Some(blocklist), options).expect("valid options")
    }

    fn message(term: &str) -> String {
        format!("Password contains a substring too similar to: \"{}\".", term)
    }

    #[test]
    fn test_valid_passwords_not_in_blocklist() {
        for pwd in ["secureP@ssphrase123!", "ComplexP@ss2024", "UniqueStr0ng"] {
            let outcome = check(pwd, &STANDARD_BLOCKLIST, &BlocklistOptions::default());
            assert_eq!(outcome, ValidationOutcome::valid(), "{} should pass", pwd);
        }
    }

    #[test]
    fn test_empty_inputs_are_valid() {
        let options = BlocklistOptions::default();
        assert!(check("", &STANDARD_BLOCKLIST, &options).is_valid());
        assert!(check("securepass", &[], &options).is_valid());
        assert!(check("securepass", &[""], &options).is_valid());
        assert!(check("securepass", &["   ", "\t"], &options).is_valid());
        assert!(check("securepass", &["b"], &options).is_valid());

        let outcome = validate_blocklist::<&str>(&secret("securepass"), None, &options);
        assert_eq!(outcome, Ok(ValidationOutcome::valid()));
    }

    #[test]
    fn test_reject_exact_and_near_terms() {
        let cases = [
            ("myp@ssword123", "password"),
            ("secure_pass", "secure_pass"),
            ("mypassword😊", "password😊"),
        ];
        for (pwd, term) in cases {
            let outcome = check(pwd, &[term], &BlocklistOptions::default());
            assert!(!outcome.is_valid());
            assert_eq!(outcome.errors(), [message(term)]);
        }
    }

    #[test]
    fn test_multiple_violations_with_error_limit() {
        let blocklist = ["password", "123", "myp"];

        let full = check("mypassword123", &blocklist, &BlocklistOptions::default());
        assert_eq!(full.errors(), [message("password"), message("123"), message("myp")]);

        let limited = check(
            "mypassword123",
            &blocklist,
            &BlocklistOptions::default().with_error_limit(2),
        );
        assert!(!limited.is_valid());
        assert_eq!(limited.errors(), [message("password"), message("123")]);
    }

    #[test]
    fn test_error_limit_above_match_count() {
        let outcome = check(
            "mypassword123",
            &["password", "zzzzzz"],
            &BlocklistOptions::default().with_error_limit(5),
        );
        assert_eq!(outcome.errors().len(), 1);
    }

    #[test]
    fn test_errors_follow_first_seen_order() {
        let outcome = check(
            "qwertypassword",
            &["QWERTY", "password", "qwerty", " Password "],
            &BlocklistOptions::default(),
        );
        assert_eq!(outcome.errors(), [message("qwerty"), message("password")]);
    }

    #[test]
    fn test_fuzzy_matching_with_higher_sensitivity() {
        let options = BlocklistOptions::default().with_sensitivity(0.5);
        for pwd in ["password123", "mypassword", "p@ssword"] {
            let outcome = check(pwd, &["password"], &options);
            assert!(!outcome.is_valid());
            assert!(outcome.errors()[0].contains("password"));
        }
    }

    #[test]
    fn test_whitespace_handling() {
        let trimmed = check("mypassword", &["   password   "], &BlocklistOptions::default());
        assert!(!trimmed.is_valid());

        let untrimmed = check(
            "mypassword",
            &["   password   "],
            &BlocklistOptions::default().with_trim_whitespace(false),
        );
        assert!(untrimmed.is_valid());
    }

    #[test]
    fn test_short_term_takes_fast_path() {
        let options = BlocklistOptions::default().with_sensitivity(1.0);
        let outcome = check("testab", &["ab"], &options);
        assert_eq!(outcome.errors(), [message("ab")]);

        // tolerance >= term length blocks regardless of password content
        let unrelated = check("zzzz", &["ab"], &options);
        assert!(!unrelated.is_valid());
    }

    #[test]
    fn test_utf8_terms() {
        let cases = [
            ("パスワード123", "パスワード"),
            ("пароль123", "пароль"),
            ("password🔑", "password🔑"),
        ];
        for (pwd, term) in cases {
            let outcome = check(pwd, &[term], &BlocklistOptions::default());
            assert_eq!(outcome.errors().len(), 1, "{} should match {}", pwd, term);
        }
    }

    #[test]
    fn test_long_password_and_term() {
        let pwd = "a".repeat(1000);
        let term = "a".repeat(500);
        let outcome = check(&pwd, &[term.as_str()], &BlocklistOptions::default());
        assert!(!outcome.is_valid());
    }

    #[test]
    fn test_special_characters_in_terms() {
        for term in ["pass!@#$%", "pass^&*()", "pass<>?{}"] {
            let outcome = check(term, &[term], &BlocklistOptions::default());
            assert!(!outcome.is_valid());
            assert!(outcome.errors()[0].contains(term));
        }
    }

    #[test]
    fn test_custom_tolerance_function() {
        let options = BlocklistOptions::default()
            .with_custom_tolerance(|term, _| term.chars().count() / 6);
        assert!(check("ComplexPass", &["Complete"], &options).is_valid());
    }

    #[test]
    fn test_custom_tolerance_sees_password() {
        let options = BlocklistOptions::default().with_custom_tolerance(|_, password| {
            if password.starts_with("strict") { 0 } else { 2 }
        });
        assert!(check("strict-p@ssword", &["password"], &options).is_valid());
        assert!(!check("loose-p@ssword", &["password"], &options).is_valid());
    }

    #[test]
    #[should_panic(expected = "tolerance exploded")]
    fn test_custom_tolerance_panic_propagates() {
        let options = BlocklistOptions::default()
            .with_custom_tolerance(|_, _| panic!("tolerance exploded"));
        check("password", &["password"], &options);
    }

    #[test]
    fn test_bad_options_fail_before_scanning() {
        let options = BlocklistOptions::default()
            .with_sensitivity(-0.5)
            .with_custom_tolerance(|_, _| panic!("must not be called"));
        let result = validate_blocklist(&secret("password"), Some(&["password"][..]), &options);
        assert_eq!(result, Err(ConfigError::InvalidSensitivity(-0.5)));
    }

    #[test]
    fn test_zero_error_limit_is_a_config_error() {
        let options = BlocklistOptions::default().with_error_limit(0);
        let result = validate_blocklist(&secret("password"), Some(&["password"][..]), &options);
        assert_eq!(result, Err(ConfigError::ZeroErrorLimit));
    }

    #[test]
    fn test_outcome_validity_tracks_errors() {
        assert!(ValidationOutcome::valid().is_valid());
        let outcome = ValidationOutcome::from_errors(vec!["x".to_string()]);
        assert!(!outcome.is_valid());
        assert_eq!(outcome.into_errors(), vec!["x".to_string()]);
    }

    #[test]
    fn test_identical_final_sigma_term_is_rejected() {
        let outcome = check("ΟΣ", &["ΟΣ"], &BlocklistOptions::default());
        assert_eq!(outcome.errors(), [message("ος")]);
    }

    #[test]
    fn test_validator_keeps_policy() {
        let policy = PasswordPolicy::default().with_min_length(10).with_blocklist(["admin"]);
        let validator = PasswordValidator::new(policy).expect("valid policy");
        assert_eq!(validator.policy().min_length, Some(10));
        assert_eq!(validator.policy().blocklist, vec!["admin".to_string()]);
    }

    #[test]
    fn test_validator_rejects_bad_policy() {
        let policy = PasswordPolicy::default().with_min_length(10).with_max_length(5);
        assert!(matches!(
            PasswordValidator::new(policy),
            Err(ConfigError::InvertedLengthBounds { min: 10, max: 5 })
        ));
    }

    #[test]
    fn test_validator_runs_sections_in_order() {
        let policy = PasswordPolicy::default()
            .with_min_length(12)
            .with_allowed_characters("abcdefghijklmnopqrstuvwxyz0123456789")
            .with_blocklist(["password"]);
        let validator = PasswordValidator::new(policy).expect("valid policy");

        let outcome = validator.validate(&secret("Passw0rd")).expect("local checks");
        assert_eq!(
            outcome.errors(),
            [
                "Password must be at least 12 characters long.".to_string(),
                "Password contains characters outside the allowed set.".to_string(),
                message("password"),
            ]
        );
    }

    #[test]
    fn test_validator_accepts_good_password() {
        let policy = PasswordPolicy::default()
            .with_min_length(8)
            .with_max_length(64)
            .with_blocklist(STANDARD_BLOCKLIST);
        let validator = PasswordValidator::new(policy).expect("valid policy");
        let outcome = validator
            .validate(&secret("CorrectHorseBatteryStaple"))
            .expect("local checks");
        assert!(outcome.is_valid());
    }
}
