//! Length section - checks password length bounds.

use super::SectionResult;
use crate::options::PasswordPolicy;
use secrecy::{ExposeSecret, SecretString};

/// Checks the password against the policy's minimum and maximum length.
///
/// Length is counted in code points.
pub fn length_section(password: &SecretString, policy: &PasswordPolicy) -> SectionResult {
    let len = password.expose_secret().chars().count();
    let mut errors = Vec::new();

    if let Some(min) = policy.min_length {
        if len < min {
            errors.push(format!("Password must be at least {} characters long.", min));
        }
    }
    if let Some(max) = policy.max_length {
        if len > max {
            errors.push(format!("Password must be no more than {} characters long.", max));
        }
    }
    Ok(errors)
}
