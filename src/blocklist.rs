//! Deny-list normalization.
//!
//! Reduces raw deny-list entries to their canonical comparison form and
//! removes duplicates while keeping first-seen order, so that error
//! ordering and error-limit truncation are reproducible.

use std::collections::HashSet;
use std::fmt;
use std::ops::Deref;

/// A normalized deny-list entry: lowercase, non-empty, optionally trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockTerm(String);

impl BlockTerm {
    /// Normalizes a raw entry.
    ///
    /// Returns `None` for empty or whitespace-only entries, regardless of
    /// `trim_whitespace`.
    pub fn normalize(raw: &str, trim_whitespace: bool) -> Option<Self> {
        if raw.trim().is_empty() {
            return None;
        }
        let source = if trim_whitespace { raw.trim() } else { raw };
        Some(Self(source.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in Unicode scalar values.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl Deref for BlockTerm {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered, duplicate-free collection of [`BlockTerm`]s.
///
/// Built once per validation call and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockTerms {
    terms: Vec<BlockTerm>,
}

impl BlockTerms {
    /// Normalizes a raw deny-list.
    ///
    /// An absent list, an empty list and a list of blank entries all give an
    /// empty collection.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pwd_blocklist::BlockTerms;
    ///
    /// let raw = ["Password", "  qwerty ", "PASSWORD", "   "];
    /// let terms = BlockTerms::normalize(Some(&raw[..]), true);
    ///
    /// let collected: Vec<&str> = terms.iter().map(|t| t.as_str()).collect();
    /// assert_eq!(collected, ["password", "qwerty"]);
    /// ```
    pub fn normalize<S: AsRef<str>>(raw: Option<&[S]>, trim_whitespace: bool) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };

        let mut seen = HashSet::with_capacity(raw.len());
        let terms: Vec<BlockTerm> = raw
            .iter()
            .filter_map(|entry| BlockTerm::normalize(entry.as_ref(), trim_whitespace))
            .filter(|term| seen.insert(term.clone()))
            .collect();

        #[cfg(feature = "tracing")]
        tracing::debug!("Deny-list normalized: {} of {} entries kept", terms.len(), raw.len());

        Self { terms }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Iterates terms in first-seen order.
    pub fn iter(&self) -> std::slice::Iter<'_, BlockTerm> {
        self.terms.iter()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.iter().any(|t| t.as_str() == term)
    }
}

impl<'a> IntoIterator for &'a BlockTerms {
    type Item = &'a BlockTerm;
    type IntoIter = std::slice::Iter<'a, BlockTerm>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}
