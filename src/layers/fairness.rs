//! Layer 7: unilateral control and transparency.

use crate::clause::Clause;
use crate::flag::{LayerId, LayerResult, RiskKind};
use crate::utils::contains_any;

use super::{Findings, RiskLayer};

/// Detects unilateral amendment, waiver of rights and one-sided force majeure.
pub struct FairnessLayer {
    amendment: Vec<&'static str>,
    unilateral: Vec<&'static str>,
    protected_rights: Vec<&'static str>,
}

impl Default for FairnessLayer {
    fn default() -> Self {
        Self {
            amendment: vec!["amend", "modify"],
            unilateral: vec!["sole discretion", "unilaterally"],
            protected_rights: vec!["statutory rights", "legal rights", "claims under law"],
        }
    }
}

impl RiskLayer for FairnessLayer {
    fn id(&self) -> LayerId {
        LayerId::Fairness
    }

    fn run(&self, clauses: &[Clause]) -> LayerResult {
        let mut findings = Findings::new(self.id());

        for clause in clauses {
            let text = clause.text.to_lowercase();

            if contains_any(&text, &self.amendment) && contains_any(&text, &self.unilateral) {
                findings.flag(RiskKind::UnilateralAmendment, clause);
            }

            if text.contains("waive") && contains_any(&text, &self.protected_rights) {
                findings.flag(RiskKind::WaiverOfRights, clause);
            }

            if text.contains("force majeure")
                && text.contains("company shall not be liable")
                && !text.contains("employee")
            {
                findings.flag(RiskKind::OneSidedForceMajeure, clause);
            }
        }

        findings.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flag::Severity;
    use crate::layers::numbered_clauses;

    fn run(texts: &[&str]) -> LayerResult {
        FairnessLayer::default().run(&numbered_clauses(texts))
    }

    #[test]
    fn test_unilateral_amendment() {
        let result = run(&["The Company may amend this policy at its sole discretion."]);
        assert!(result.has_flag("Unilateral Amendment"));
        assert_eq!(result.severity, Severity::High);

        let agreed = run(&["This Agreement may be amended in writing signed by both parties."]);
        assert!(agreed.flags.is_empty());
    }

    #[test]
    fn test_waiver_of_rights() {
        let result = run(&["The Employee hereby waives all statutory rights to overtime."]);
        assert!(result.has_flag("Waiver of Rights"));

        let narrow = run(&["Either party may waive a breach in writing."]);
        assert!(narrow.flags.is_empty());
    }

    #[test]
    fn test_one_sided_force_majeure() {
        let result = run(&["Force Majeure: the Company shall not be liable for delays."]);
        assert!(result.has_flag("One-Sided Force Majeure"));
        assert_eq!(result.severity, Severity::Medium);

        let mutual = run(&[
            "Force Majeure: the Company shall not be liable, nor shall the Employee.",
        ]);
        assert!(mutual.flags.is_empty());
    }
}
