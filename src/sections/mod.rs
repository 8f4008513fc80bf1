//! Password policy sections
//!
//! Each section checks one aspect of a [`PasswordPolicy`](crate::PasswordPolicy)
//! and reports the violations it finds.

mod blocklist;
mod charset;
mod length;

pub use blocklist::blocklist_section;
pub use charset::charset_section;
pub use length::length_section;

use crate::options::{ConfigError, PasswordPolicy};
use secrecy::SecretString;

/// Result type for section functions.
/// - `Ok(errors)` - Violations found, empty when the section passed
/// - `Err(_)` - The policy itself is malformed
pub type SectionResult = Result<Vec<String>, ConfigError>;

/// Signature shared by every section.
pub type SectionFn = fn(&SecretString, &PasswordPolicy) -> SectionResult;

/// Sections in the order they run.
pub const SECTIONS: [(&str, SectionFn); 3] = [
    ("length", length_section),
    ("charset", charset_section),
    ("blocklist", blocklist_section),
];
