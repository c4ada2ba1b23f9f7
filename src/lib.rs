#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-risk/issues/"
)]

//! Rule-based contract risk classification.
//!
//! Raw contract text flows through three stages:
//!
//! ```text
//! text -> ClauseSegmenter -> [Clause] -> 7 × RiskLayer -> [LayerResult] -> aggregate -> RuleEngineResult
//! ```
//!
//! ## Segmentation
//!
//! - [`Taxonomy`] - Ordered category → keyword table, built in or loaded from RON
//! - [`ClauseSegmenter`] - Splits text on headings and labels each clause
//!
//! ## Risk Layers
//!
//! Each [`RiskLayer`] is a pure detector over the clause list:
//!
//! - [`StructuralLayer`] - Long clauses, absolute language, obligation asymmetry
//! - [`TerminationLayer`] - Termination without notice, one-way exit, short notice
//! - [`LiabilityLayer`] - Unlimited liability, consequential damages, one-sided indemnity
//! - [`EmploymentRestraintLayer`] - Non-competes, exit bonds, post-termination exclusivity
//! - [`IpConfidentialityLayer`] - IP overreach, perpetual confidentiality, missing carve-outs
//! - [`DisputeResolutionLayer`] - Foreign seats, biased arbitrators, cost burdens
//! - [`FairnessLayer`] - Unilateral amendment, waiver of rights, one-sided force majeure
//!
//! ## Scoring
//!
//! [`aggregate`] deduplicates flags across layers and walks a fixed verdict
//! ladder to produce a score and a [`Verdict`]. [`RiskEngine`] runs the layers
//! (sequentially or in parallel) and composes the [`RuleEngineResult`].
//!
//! ## Example
//!
//! ```
//! use layered_risk::{ContractAnalyzer, Severity, Verdict};
//!
//! let analysis = ContractAnalyzer::default()
//!     .analyze("NOTICE\nNotice period shall be 10 days notice.")
//!     .unwrap();
//!
//! assert_eq!(analysis.result.verdict(), Verdict::Proceed);
//! assert_eq!(analysis.result.overall_risk, Severity::Medium);
//! assert_eq!(analysis.result.score, 80.0);
//! ```

mod aggregate;
mod analyzer;
mod clause;
mod engine;
mod error;
mod flag;
mod layers;
mod result;
mod segmenter;
mod taxonomy;
mod utils;

pub use aggregate::{aggregate, assess, dedup_flags, positive_bonus, Assessment, Rung, Tally};
pub use analyzer::{Analysis, ContractAnalyzer};
pub use clause::Clause;
pub use engine::{run, EngineConfig, ExecutionMode, RiskEngine};
pub use error::{RiskError, RiskResult};
pub use flag::{
    ConfidenceLabel, Flag, FlagAnnotation, FlagEnrichment, FlagKey, LayerId, LayerResult, PrecedentCitation,
    RiskKind, Severity,
};
pub use layers::{
    standard_layers, DisputeResolutionLayer, EmploymentRestraintLayer, FairnessLayer,
    IpConfidentialityLayer, LiabilityLayer, RiskLayer, StructuralLayer, TerminationLayer,
};
pub use result::{GoverningLaw, Recommendation, RuleEngineResult, Verdict};
pub use segmenter::{is_heading, segment, ClauseSegmenter};
pub use taxonomy::{ClauseCategory, Taxonomy, UNCLASSIFIED};

#[cfg(test)]
mod tests {
    mod aggregate;
    mod layers;
    mod properties;
    mod report;
    mod scenarios;
    mod segmenter;
}
