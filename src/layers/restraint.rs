//! Layer 4: restrictive covenants on the individual.

use crate::clause::Clause;
use crate::flag::{LayerId, LayerResult, RiskKind};
use crate::utils::contains_any;

use super::{Findings, RiskLayer};

/// Detects post-employment non-competes, exit bonds and post-termination exclusivity.
pub struct EmploymentRestraintLayer {
    non_compete: Vec<&'static str>,
    /// Qualifiers that push a non-compete past the end of employment.
    post_termination: Vec<&'static str>,
    exclusivity: Vec<&'static str>,
    /// Qualifiers that push exclusivity past the end of employment.
    exclusivity_post_termination: Vec<&'static str>,
}

impl Default for EmploymentRestraintLayer {
    fn default() -> Self {
        Self {
            non_compete: vec!["non-compete", "non compete", "restraint of trade"],
            post_termination: vec!["after termination", "post termination", "post-termination"],
            exclusivity: vec!["exclusive services", "shall not engage"],
            exclusivity_post_termination: vec!["after termination", "post termination"],
        }
    }
}

impl EmploymentRestraintLayer {
    fn is_exit_penalty(text: &str) -> bool {
        text.contains("bond")
            || (text.contains("penalty") && text.contains("exit"))
            || (text.contains("liquidated damages") && text.contains("employment"))
    }
}

impl RiskLayer for EmploymentRestraintLayer {
    fn id(&self) -> LayerId {
        LayerId::EmploymentRestraint
    }

    fn run(&self, clauses: &[Clause]) -> LayerResult {
        let mut findings = Findings::new(self.id());

        for clause in clauses {
            let text = clause.text.to_lowercase();

            if contains_any(&text, &self.non_compete) && contains_any(&text, &self.post_termination)
            {
                findings.flag(RiskKind::PostEmploymentNonCompete, clause);
            }

            if Self::is_exit_penalty(&text) {
                findings.flag(RiskKind::EmploymentBond, clause);
            }

            if contains_any(&text, &self.exclusivity)
                && contains_any(&text, &self.exclusivity_post_termination)
            {
                findings.flag(RiskKind::PostTerminationExclusivity, clause);
            }
        }

        findings.finish()
    }
}
