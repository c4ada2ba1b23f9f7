//! The advisory seam: plain-language guidance for flagged clauses.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::scored::Scored;

/// Clause excerpts sent to an advisor are cut to this many characters.
pub const MAX_EXCERPT_CHARS: usize = 1500;

/// Text returned by [`StaticAdvisor`] for every request.
pub const STATIC_ADVISORY: &str = "Standard legal risk identified. Review this clause with counsel.";

/// One flag to advise on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisoryRequest {
    pub title: String,
    pub excerpt: String,
}

impl AdvisoryRequest {
    pub fn new(title: impl Into<String>, clause_text: &str) -> Self {
        Self {
            title: title.into(),
            excerpt: clause_text.chars().take(MAX_EXCERPT_CHARS).collect(),
        }
    }
}

/// Advisories keyed by flag title.
pub type Advisories = BTreeMap<String, Scored<String>>;

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("advisor unavailable: {message}")]
    Unavailable { message: String },

    #[error("malformed advisor response: {message}")]
    Malformed { message: String },
}

/// Produces advisories for a batch of flagged clauses.
///
/// Titles missing from the returned map simply receive no advisory.
pub trait Advisor {
    fn advise(&self, requests: &[AdvisoryRequest]) -> Result<Advisories, AdvisorError>;
}

/// Answers every request with [`STATIC_ADVISORY`] at high confidence.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticAdvisor;

impl Advisor for StaticAdvisor {
    fn advise(&self, requests: &[AdvisoryRequest]) -> Result<Advisories, AdvisorError> {
        Ok(requests
            .iter()
            .map(|request| {
                (
                    request.title.clone(),
                    Scored::rule_based(STATIC_ADVISORY.to_string(), 0.9, "static"),
                )
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use layered_risk::ConfidenceLabel;

    use super::*;

    #[test]
    fn excerpts_are_cut_on_char_boundaries() {
        let text = "é".repeat(MAX_EXCERPT_CHARS + 10);
        let request = AdvisoryRequest::new("Unlimited Liability", &text);
        assert_eq!(request.excerpt.chars().count(), MAX_EXCERPT_CHARS);

        let short = AdvisoryRequest::new("Unlimited Liability", "Liability is unlimited.");
        assert_eq!(short.excerpt, "Liability is unlimited.");
    }

    #[test]
    fn static_advisor_answers_every_title() {
        let requests = [
            AdvisoryRequest::new("Unlimited Liability", "Liability is unlimited."),
            AdvisoryRequest::new("Waiver of Rights", "The Employee waives all rights."),
        ];
        let advisories = StaticAdvisor.advise(&requests).unwrap();

        assert_eq!(advisories.len(), 2);
        for advisory in advisories.values() {
            assert_eq!(advisory.value, STATIC_ADVISORY);
            assert_eq!(advisory.label(), ConfidenceLabel::High);
        }
    }
}
