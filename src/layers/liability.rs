//! Layer 3: exposure shifting through liability and indemnity.

use crate::clause::Clause;
use crate::flag::{LayerId, LayerResult, RiskKind};
use crate::utils::contains_any;

use super::{Findings, RiskLayer};

/// Detects unbounded liability, unexcluded consequential damages and one-way indemnities.
pub struct LiabilityLayer {
    unlimited: Vec<&'static str>,
    consequential: Vec<&'static str>,
    /// Language that excludes consequential damages.
    exclusion: Vec<&'static str>,
    /// An indemnity running from the individual to the company.
    indemnity_obligation: Vec<&'static str>,
    reciprocal_indemnity: Vec<&'static str>,
    mutual_indemnity: Vec<&'static str>,
    cap: Vec<&'static str>,
}

impl Default for LiabilityLayer {
    fn default() -> Self {
        Self {
            unlimited: vec!["unlimited liability", "no cap on liability"],
            consequential: vec![
                "consequential damages",
                "indirect damages",
                "special damages",
            ],
            exclusion: vec![
                "not be liable",
                "neither party shall be liable",
                "excluding",
                "excluded",
                "waiver of",
            ],
            indemnity_obligation: vec![
                "employee shall indemnify",
                "indemnify the company",
                "hold the company harmless",
            ],
            reciprocal_indemnity: vec![
                "company shall indemnify",
                "mutual indemnity",
                "mutually indemnify",
                "indemnify the employee",
            ],
            mutual_indemnity: vec![
                "mutual indemnity",
                "mutually indemnify",
                "each party shall indemnify",
            ],
            cap: vec![
                "capped",
                "shall not exceed",
                "liability shall be limited to",
                "liability is limited to",
            ],
        }
    }
}

impl LiabilityLayer {
    /// Explicit unlimited-liability phrases, or "liability" with "unlimited" and
    /// no "not" anywhere in the clause.
    fn is_unlimited(&self, text: &str) -> bool {
        contains_any(text, &self.unlimited)
            || (text.contains("liability") && text.contains("unlimited") && !text.contains("not"))
    }
}

impl RiskLayer for LiabilityLayer {
    fn id(&self) -> LayerId {
        LayerId::Liability
    }

    fn run(&self, clauses: &[Clause]) -> LayerResult {
        let mut findings = Findings::new(self.id());

        for clause in clauses {
            let text = clause.text.to_lowercase();

            let unlimited = self.is_unlimited(&text);
            if unlimited {
                findings.flag(RiskKind::UnlimitedLiability, clause);
            } else if text.contains("liability") && contains_any(&text, &self.cap) {
                findings.positive("Liability capped");
            }

            if contains_any(&text, &self.consequential) {
                if contains_any(&text, &self.exclusion) {
                    findings.positive("Excludes consequential damages");
                } else {
                    findings.flag(RiskKind::ConsequentialDamages, clause);
                }
            }

            if contains_any(&text, &self.indemnity_obligation)
                && !contains_any(&text, &self.reciprocal_indemnity)
            {
                findings.flag(RiskKind::OneSidedIndemnity, clause);
            }

            if contains_any(&text, &self.mutual_indemnity) {
                findings.positive("Mutual indemnity");
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
        LiabilityLayer::default().run(&numbered_clauses(texts))
    }

    #[test]
    fn test_unlimited_liability_phrases() {
        assert!(run(&["The Employee accepts unlimited liability."]).has_flag("Unlimited Liability"));
        assert!(run(&["There is no cap on liability."]).has_flag("Unlimited Liability"));
        assert!(run(&["Liability of the Employee is unlimited."]).has_flag("Unlimited Liability"));
    }

    #[test]
    fn test_unlimited_negated_by_not() {
        let result = run(&["Liability shall not be unlimited."]);
        assert!(!result.has_flag("Unlimited Liability"));
    }

    #[test]
    fn test_liability_cap_is_positive() {
        let result = run(&["Total liability shall not exceed the fees paid."]);
        assert!(result.flags.is_empty());
        assert_eq!(result.positive_findings, vec!["Liability capped"]);

        for text in [
            "The Employee's liability is limited to direct losses.",
            "Liability shall be limited to twelve months of salary.",
        ] {
            assert_eq!(run(&[text]).positive_findings, vec!["Liability capped"], "{}", text);
        }
    }

    #[test]
    fn test_not_limited_to_is_not_a_cap() {
        let result =
            run(&["The Employee's liability covers losses including but not limited to fines."]);
        assert!(result.flags.is_empty());
        assert!(result.positive_findings.is_empty());
    }

    #[test]
    fn test_consequential_damages_without_exclusion() {
        let result = run(&["The Employee is liable for consequential damages."]);
        assert!(result.has_flag("Consequential Damages"));
        assert_eq!(result.severity, Severity::High);
    }

    #[test]
    fn test_consequential_damages_excluded() {
        let result = run(&["Neither party shall be liable for indirect damages."]);
        assert!(result.flags.is_empty());
        assert_eq!(result.positive_findings, vec!["Excludes consequential damages"]);
    }

    #[test]
    fn test_one_sided_indemnity() {
        let result = run(&["The Employee shall indemnify the Company against all claims."]);
        assert!(result.has_flag("One-Sided Indemnity"));
    }

    #[test]
    fn test_reciprocal_indemnity_is_not_flagged() {
        let result = run(&[
            "The Employee shall indemnify the Company and the Company shall indemnify the Employee.",
        ]);
        assert!(result.flags.is_empty());

        let mutual = run(&["The parties mutually indemnify and hold the Company harmless."]);
        assert!(mutual.flags.is_empty());
        assert_eq!(mutual.positive_findings, vec!["Mutual indemnity"]);
    }
}
