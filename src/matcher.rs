//! Fuzzy substring matching of a password against one deny-list term.

use crate::blocklist::BlockTerm;
use crate::distance::within_chars;

/// Result of checking one term against a password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome<'a> {
    pub term: &'a BlockTerm,
    pub matched: bool,
}

/// Returns `true` if `password` contains a window within `tolerance` edits of `term`.
///
/// When `tolerance` reaches the term's own length the term is reported as
/// matched without scanning the password at all. Otherwise every window of
/// `chars(term)` code points is lowercased and compared with the term; a
/// password shorter than the term has no windows and never matches.
///
/// # Example
///
/// ```rust
/// use pwd_blocklist::{BlockTerm, is_blocked};
///
/// let term = BlockTerm::normalize("password", true).unwrap();
/// assert!(is_blocked("myP@ssword123", &term, 2));
/// assert!(!is_blocked("correct horse", &term, 2));
/// ```
pub fn is_blocked(password: &str, term: &BlockTerm, tolerance: usize) -> bool {
    let term_chars: Vec<char> = term.chars().collect();
    if tolerance >= term_chars.len() {
        return true;
    }

    let password_chars: Vec<char> = password.chars().collect();
    if password_chars.len() < term_chars.len() {
        return false;
    }

    // Fold whole windows with the same function as terms so context-dependent
    // mappings (final sigma) agree.
    let mut window = Vec::with_capacity(term_chars.len());
    password_chars.windows(term_chars.len()).any(|chunk| {
        let folded = chunk.iter().collect::<String>().to_lowercase();
        window.clear();
        window.extend(folded.chars());
        within_chars(&window, &term_chars, tolerance)
    })
}

/// Checks `term` against `password`, keeping the term alongside the verdict.
pub fn match_term<'a>(password: &str, term: &'a BlockTerm, tolerance: usize) -> MatchOutcome<'a> {
    MatchOutcome {
        term,
        matched: is_blocked(password, term, tolerance),
    }
}
