//! The clause record produced by segmentation.

use serde::{Deserialize, Serialize};

use crate::segmenter::is_heading;
use crate::taxonomy::UNCLASSIFIED;

/// A contiguous, labeled span of contract text.
///
/// Clauses are created once by the [`ClauseSegmenter`](crate::ClauseSegmenter)
/// and consumed read-only by every risk layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Clause {
    /// Sequential 1-based id, unique within one segmentation run.
    pub id: String,
    /// A taxonomy category name, or [`UNCLASSIFIED`].
    pub category: String,
    /// Trimmed clause text with original casing and punctuation.
    pub text: String,
}

impl Clause {
    pub fn new(id: impl Into<String>, category: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            text: text.into(),
        }
    }

    /// An unclassified clause, handy when feeding layers directly.
    pub fn unclassified(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, UNCLASSIFIED, text)
    }

    pub fn is_classified(&self) -> bool {
        self.category != UNCLASSIFIED
    }

    /// Whitespace-separated word count.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// The leading heading line, if the clause opens with one.
    pub fn heading(&self) -> Option<&str> {
        let first = self.text.lines().next()?;
        if is_heading(first.trim()) {
            Some(first)
        } else {
            None
        }
    }

    /// Clause text without its leading heading line.
    ///
    /// A clause consisting of a bare heading has an empty body.
    pub fn body(&self) -> &str {
        match self.heading() {
            Some(heading) => self.text[heading.len()..].trim_start_matches(['\r', '\n']),
            None => &self.text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_strips_heading() {
        let clause = Clause::unclassified("1", "CONFIDENTIALITY\nKeep it secret.");
        assert_eq!(clause.heading(), Some("CONFIDENTIALITY"));
        assert_eq!(clause.body(), "Keep it secret.");
    }

    #[test]
    fn test_body_without_heading_is_whole_text() {
        let clause = Clause::unclassified("1", "Keep it secret.\nForever.");
        assert_eq!(clause.heading(), None);
        assert_eq!(clause.body(), "Keep it secret.\nForever.");
    }

    #[test]
    fn test_bare_heading_has_empty_body() {
        let clause = Clause::unclassified("3", "1. DEFINITIONS");
        assert_eq!(clause.body(), "");
    }

    #[test]
    fn test_word_count() {
        let clause = Clause::unclassified("1", "one two\nthree   four");
        assert_eq!(clause.word_count(), 4);
        assert!(!clause.is_classified());
    }
}
