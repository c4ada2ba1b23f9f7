//! The seven rule-based risk layers.
//!
//! Each layer is an independent, pure detector over the clause sequence. It
//! lower-cases each clause, applies its keyword rules, and returns a
//! [`LayerResult`]. Layers never share state, so the engine may run them in
//! any order or in parallel.

mod dispute;
mod fairness;
mod ip_confidential;
mod liability;
mod restraint;
mod structural;
mod termination;

pub use dispute::DisputeResolutionLayer;
pub use fairness::FairnessLayer;
pub use ip_confidential::IpConfidentialityLayer;
pub use liability::LiabilityLayer;
pub use restraint::EmploymentRestraintLayer;
pub use structural::StructuralLayer;
pub use termination::TerminationLayer;

use crate::clause::Clause;
use crate::flag::{Flag, LayerId, LayerResult, RiskKind};

/// A single risk detector.
pub trait RiskLayer: Send + Sync {
    fn id(&self) -> LayerId;

    /// Scan `clauses` and report findings. Never fails.
    fn run(&self, clauses: &[Clause]) -> LayerResult;
}

/// The seven standard layers in execution order.
pub fn standard_layers() -> Vec<Box<dyn RiskLayer>> {
    vec![
        Box::new(StructuralLayer::default()),
        Box::new(TerminationLayer::default()),
        Box::new(LiabilityLayer::default()),
        Box::new(EmploymentRestraintLayer::default()),
        Box::new(IpConfidentialityLayer::default()),
        Box::new(DisputeResolutionLayer::default()),
        Box::new(FairnessLayer::default()),
    ]
}

/// Accumulates one layer's flags and positive findings during a scan.
#[derive(Debug)]
pub(crate) struct Findings {
    layer: LayerId,
    flags: Vec<Flag>,
    positives: Vec<String>,
}

impl Findings {
    pub(crate) fn new(layer: LayerId) -> Self {
        Self {
            layer,
            flags: Vec::new(),
            positives: Vec::new(),
        }
    }

    /// Record `kind` against `clause` with its fixed description.
    pub(crate) fn flag(&mut self, kind: RiskKind, clause: &Clause) {
        self.push(kind.flag(Some(clause.id.as_str())));
    }

    /// Record `kind` with a computed description. `None` marks a document-wide finding.
    pub(crate) fn flag_with(
        &mut self,
        kind: RiskKind,
        clause_id: Option<&str>,
        description: impl Into<String>,
    ) {
        self.push(kind.flag_with(clause_id, description));
    }

    /// Record protective language. Repeats of the same text are kept once.
    pub(crate) fn positive(&mut self, finding: impl Into<String>) {
        let finding = finding.into();
        if !self.positives.contains(&finding) {
            self.positives.push(finding);
        }
    }

    pub(crate) fn finish(self) -> LayerResult {
        LayerResult::new(self.layer, self.flags, self.positives)
    }

    fn push(&mut self, flag: Flag) {
        debug_assert_eq!(flag.layer, self.layer, "flag recorded by the wrong layer");
        self.flags.push(flag);
    }
}

/// Unclassified clauses numbered from 1, for layer tests.
#[cfg(test)]
pub(crate) fn numbered_clauses(texts: &[&str]) -> Vec<Clause> {
    texts
        .iter()
        .enumerate()
        .map(|(i, text)| Clause::unclassified((i + 1).to_string(), *text))
        .collect()
}
