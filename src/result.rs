//! The composed output of one analysis run.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::flag::{Flag, FlagAnnotation, LayerResult, Severity};

/// Final go/no-go decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "PROCEED")]
    Proceed,
    #[serde(rename = "PROCEED_WITH_CAUTION")]
    ProceedWithCaution,
    #[serde(rename = "DO_NOT_SIGN")]
    DoNotSign,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Proceed => "PROCEED",
            Verdict::ProceedWithCaution => "PROCEED_WITH_CAUTION",
            Verdict::DoNotSign => "DO_NOT_SIGN",
        }
    }

    /// Parse the serialized form, e.g. `"DO_NOT_SIGN"`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PROCEED" => Some(Verdict::Proceed),
            "PROCEED_WITH_CAUTION" => Some(Verdict::ProceedWithCaution),
            "DO_NOT_SIGN" => Some(Verdict::DoNotSign),
            _ => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub verdict: Verdict,
    pub reason: String,
}

/// Governing-law metadata attached by the caller. Never affects scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoverningLaw {
    pub jurisdiction: String,
    pub court: String,
    pub supported: bool,
}

/// Seven layer results plus the aggregate verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleEngineResult {
    /// Deduplicated, in layer order 1..=7.
    pub layer_results: Vec<LayerResult>,
    pub overall_risk: Severity,
    /// 0.0 to 100.0.
    pub score: f64,
    pub recommendation: Recommendation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub governing_law: Option<GoverningLaw>,
}

impl RuleEngineResult {
    pub fn with_governing_law(mut self, governing_law: GoverningLaw) -> Self {
        self.governing_law = Some(governing_law);
        self
    }

    pub fn verdict(&self) -> Verdict {
        self.recommendation.verdict
    }

    /// All flags across layers, in layer order.
    pub fn flags(&self) -> impl Iterator<Item = &Flag> {
        self.layer_results.iter().flat_map(|r| r.flags.iter())
    }

    /// Every flag, writable only in its enrichment fields.
    pub fn annotations(&mut self) -> impl Iterator<Item = FlagAnnotation<'_>> {
        self.layer_results
            .iter_mut()
            .flat_map(|r| r.flags.iter_mut())
            .map(FlagAnnotation::new)
    }

    pub fn positive_findings(&self) -> impl Iterator<Item = &str> {
        self.layer_results
            .iter()
            .flat_map(|r| r.positive_findings.iter().map(String::as_str))
    }
}

impl fmt::Display for RuleEngineResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Verdict: {} ({} risk)", self.verdict(), self.overall_risk)?;
        writeln!(f, "Reason: {}", self.recommendation.reason)?;
        writeln!(f, "Score: {}", self.score)?;
        if let Some(law) = &self.governing_law {
            writeln!(f, "Governing law: {} ({})", law.jurisdiction, law.court)?;
        }
        for flag in self.flags() {
            match &flag.clause_id {
                Some(id) => writeln!(
                    f,
                    "{} [{}] {} (clause {})",
                    flag.layer, flag.severity, flag.title, id
                )?,
                None => writeln!(f, "{} [{}] {} (global)", flag.layer, flag.severity, flag.title)?,
            }
        }
        for finding in self.positive_findings() {
            writeln!(f, "+ {}", finding)?;
        }
        Ok(())
    }
}
