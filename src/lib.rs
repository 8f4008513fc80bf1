//! Fuzzy deny-list password validation library
//!
//! Rejects passwords that contain something too close to a deny-listed term,
//! so trivial mutations such as `password` → `p@ssw0rd1` are still caught.
//! Each term gets its own edit-distance tolerance, proportional to its
//! length and capped, and every password window of the term's length is
//! compared against it.
//!
//! # Features
//!
//! - `async` (default): Enables breach lookup with timeout and cancellation support
//! - `hibp`: Enables the `reqwest` transport for the Pwned Passwords range API
//! - `tracing`: Enables logging via tracing crate
//!
//! # Example
//!
//! ```rust
//! use pwd_blocklist::{validate_blocklist, BlocklistOptions};
//! use secrecy::SecretString;
//!
//! let blocklist = ["password", "123456", "qwerty"];
//! let options = BlocklistOptions::default().with_error_limit(1);
//!
//! let password = SecretString::new("p@ssw0rd1".to_string().into());
//! let outcome = validate_blocklist(&password, Some(&blocklist[..]), &options)
//!     .expect("options are valid");
//!
//! assert!(!outcome.is_valid());
//! println!("Errors: {:?}", outcome.errors());
//! ```

// Internal modules
mod blocklist;
mod breach;
mod distance;
mod matcher;
mod options;
mod sections;
mod tolerance;
mod validator;

// Public API
pub use blocklist::{BlockTerm, BlockTerms};
pub use breach::{
    BreachError, COMPROMISED_MESSAGE, PREFIX_LEN, hash_prefix_suffix, range_contains, sha1_hex,
};
pub use distance::{levenshtein_distance, levenshtein_within};
pub use matcher::{MatchOutcome, is_blocked, match_term};
pub use options::{BlocklistOptions, ConfigError, DEFAULT_BREACH_TIMEOUT, PasswordPolicy};
pub use tolerance::{DEFAULT_ABSOLUTE_CAP, DEFAULT_SENSITIVITY, ToleranceConfig, ToleranceFn};
pub use validator::{
    PasswordValidator, ValidationOutcome, ValidatorError, blocked_term_message, validate_blocklist,
};

#[cfg(feature = "async")]
pub use breach::{BreachChecker, PwnedPasswords, RangeFetcher};

#[cfg(feature = "hibp")]
pub use breach::HttpRangeFetcher;
