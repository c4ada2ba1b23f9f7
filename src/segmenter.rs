//! Line-oriented clause segmentation.
//!
//! A single scan fuses three passes:
//!
//! 1. **Heading detection**: all-caps lines of 4..=99 characters, or numbered
//!    headings such as `Section 2.1 PAYMENT` / `3. TERMINATION`.
//! 2. **Keyword anchoring**: a heading is classified immediately against the
//!    taxonomy.
//! 3. **Lazy classification**: body lines of a still-unclassified clause are
//!    scanned one at a time until a category is found.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use crate::clause::Clause;
use crate::taxonomy::{Taxonomy, UNCLASSIFIED};

/// Numbered heading: optional ARTICLE/SECTION/CLAUSE, an `N(.N)*` label with an
/// optional trailing dot, whitespace, then an upper-case title run.
static HEADING_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i:ARTICLE|SECTION|CLAUSE)?\s*[0-9]+(?:\.[0-9]+)*\.?\s+[A-Z\s]+$")
        .expect("Invalid heading regex")
});

const MIN_HEADING_CHARS: usize = 4;
const MAX_HEADING_CHARS: usize = 99;

/// Returns true if a trimmed line looks like a clause heading.
pub fn is_heading(line: &str) -> bool {
    is_caps_heading(line) || HEADING_PATTERN.is_match(line)
}

fn is_caps_heading(line: &str) -> bool {
    let len = line.chars().count();
    if !(MIN_HEADING_CHARS..=MAX_HEADING_CHARS).contains(&len) {
        return false;
    }
    line.chars().any(char::is_uppercase) && !line.chars().any(char::is_lowercase)
}

/// Splits normalized contract text into ordered, categorized clauses.
#[derive(Debug, Clone, Copy)]
pub struct ClauseSegmenter<'t> {
    taxonomy: &'t Taxonomy,
}

impl<'t> ClauseSegmenter<'t> {
    pub fn new(taxonomy: &'t Taxonomy) -> Self {
        Self { taxonomy }
    }

    /// Segment `text` into clauses. Never fails; blank input yields no clauses.
    pub fn segment(&self, text: &str) -> Vec<Clause> {
        let mut builder = ClauseBuilder::default();

        for line in text.split('\n').map(str::trim).filter(|l| !l.is_empty()) {
            if is_heading(line) {
                builder.flush();
                builder.push_line(line);
                builder.category = self.classify(line);
                trace!(heading = line, category = ?builder.category, "heading");
            } else {
                builder.push_line(line);
                if builder.category.is_none() {
                    builder.category = self.classify(line);
                    if builder.category.is_some() {
                        trace!(category = ?builder.category, "late classification");
                    }
                }
            }
        }

        builder.flush();
        debug!(clauses = builder.clauses.len(), "segmented contract text");
        builder.clauses
    }

    fn classify(&self, line: &str) -> Option<String> {
        self.taxonomy
            .classify(&line.to_lowercase())
            .map(str::to_string)
    }
}

/// Accumulation state threaded through one segmentation run.
#[derive(Debug)]
struct ClauseBuilder {
    lines: Vec<String>,
    category: Option<String>,
    next_id: usize,
    clauses: Vec<Clause>,
}

impl Default for ClauseBuilder {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            category: None,
            next_id: 1,
            clauses: Vec::new(),
        }
    }
}

impl ClauseBuilder {
    fn push_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn flush(&mut self) {
        let category = self.category.take();
        if self.lines.is_empty() {
            return;
        }

        let text = self.lines.join("\n").trim().to_string();
        self.lines.clear();

        if !text.is_empty() {
            let category = category.unwrap_or_else(|| UNCLASSIFIED.to_string());
            self.clauses
                .push(Clause::new(self.next_id.to_string(), category, text));
            self.next_id += 1;
        }
    }
}

/// Segment with a taxonomy in one call.
pub fn segment(text: &str, taxonomy: &Taxonomy) -> Vec<Clause> {
    ClauseSegmenter::new(taxonomy).segment(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caps_heading_length_bounds() {
        assert!(!is_heading("ABC"));
        assert!(is_heading("ABCD"));
        assert!(is_heading(&"A".repeat(99)));
        assert!(!is_heading(&"A".repeat(100)));
    }

    #[test]
    fn test_caps_heading_needs_a_letter() {
        assert!(!is_heading("1234"));
        assert!(is_heading("NOTE 1"));
        assert!(!is_heading("Note 1 applies"));
    }

    #[test]
    fn test_numbered_headings() {
        assert!(is_heading("1. TERMINATION"));
        assert!(is_heading("Section 2.1 PAYMENT TERMS"));
        assert!(is_heading("article 4 GOVERNING LAW"));
        assert!(is_heading("12.3.4 FEES"));
        assert!(!is_heading("2.1 Payment terms apply"));
        assert!(!is_heading("Section two PAYMENT"));
    }
}
