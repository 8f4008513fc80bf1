//! Character set section - checks that every character is allowed.

use super::SectionResult;
use crate::options::PasswordPolicy;
use secrecy::{ExposeSecret, SecretString};

/// Checks the password against the policy's allowed character set.
///
/// Passes when the policy defines no set.
pub fn charset_section(password: &SecretString, policy: &PasswordPolicy) -> SectionResult {
    let Some(allowed) = policy.allowed_characters.as_deref() else {
        return Ok(Vec::new());
    };

    if password.expose_secret().chars().all(|c| allowed.contains(c)) {
        return Ok(Vec::new());
    }
    Ok(vec!["Password contains characters outside the allowed set.".to_string()])
}
