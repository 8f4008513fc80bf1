//! Blocklist section - fuzzy deny-list check.

use super::SectionResult;
use crate::options::PasswordPolicy;
use crate::validator::validate_blocklist;
use secrecy::SecretString;

/// Checks the password against the policy's deny-list.
///
/// # Returns
/// - `Ok(errors)` with one entry per matching term, up to the error limit
/// - `Err(_)` if the deny-list options are malformed
pub fn blocklist_section(password: &SecretString, policy: &PasswordPolicy) -> SectionResult {
    let outcome = validate_blocklist(
        password,
        Some(policy.blocklist.as_slice()),
        &policy.blocklist_options,
    )?;
    Ok(outcome.into_errors())
}
