//! Confidence-carrying values produced by advisors.
//!
//! A [`Scored<T>`] pairs a value with a confidence in `0.0..=1.0` and the
//! [`ScoreSource`] that produced it. Confidence maps onto the coarse
//! [`ConfidenceLabel`] written back onto flags.

use std::fmt;

use layered_risk::ConfidenceLabel;

/// A value with an associated confidence score.
///
/// # Example
/// ```
/// use layered_risk::ConfidenceLabel;
/// use layered_risk_knowledge::Scored;
///
/// let advisory = Scored::rule_based("Negotiate a notice period.".to_string(), 0.9, "static");
/// assert_eq!(advisory.label(), ConfidenceLabel::High);
/// ```
#[derive(Clone)]
pub struct Scored<T> {
    pub value: T,
    /// Clamped to `0.0..=1.0`.
    pub confidence: f64,
    pub source: ScoreSource,
}

/// Where a confidence score came from.
#[derive(Clone, Debug, PartialEq)]
pub enum ScoreSource {
    /// Fixed table or keyword rule.
    RuleBased { rule_name: String },
    /// An external advisory service.
    Advisor {
        /// Service or model identifier
        name: String,
    },
}

/// Confidence at or above which an advisory is labelled `High`.
const HIGH_CONFIDENCE: f64 = 0.8;
/// Confidence at or above which an advisory is labelled `Medium`.
const MEDIUM_CONFIDENCE: f64 = 0.5;

impl<T> Scored<T> {
    pub fn new(value: T, confidence: f64, source: ScoreSource) -> Self {
        Self {
            value,
            confidence: confidence.clamp(0.0, 1.0),
            source,
        }
    }

    pub fn rule_based(value: T, confidence: f64, rule_name: &str) -> Self {
        Self::new(
            value,
            confidence,
            ScoreSource::RuleBased {
                rule_name: rule_name.to_string(),
            },
        )
    }

    pub fn from_advisor(value: T, confidence: f64, name: &str) -> Self {
        Self::new(
            value,
            confidence,
            ScoreSource::Advisor {
                name: name.to_string(),
            },
        )
    }

    pub fn label(&self) -> ConfidenceLabel {
        if self.confidence >= HIGH_CONFIDENCE {
            ConfidenceLabel::High
        } else if self.confidence >= MEDIUM_CONFIDENCE {
            ConfidenceLabel::Medium
        } else {
            ConfidenceLabel::Low
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Scored<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Compact format for snapshot tests: Scored(value, conf: 0.85)
        write!(f, "Scored({:?}, conf: {:.2})", self.value, self.confidence)
    }
}

impl<T: PartialEq> PartialEq for Scored<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
            && (self.confidence - other.confidence).abs() < f64::EPSILON
            && self.source == other.source
    }
}
