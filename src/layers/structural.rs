//! Layer 1: clause length and power asymmetry.

use crate::clause::Clause;
use crate::flag::{LayerId, LayerResult, RiskKind};
use crate::utils::{contains_any, count_occurrences};

use super::{Findings, RiskLayer};

/// Clauses longer than this many words are flagged.
const MAX_CLAUSE_WORDS: usize = 300;
/// Employee obligations must exceed this count before asymmetry is reported.
const MIN_EMPLOYEE_OBLIGATIONS: usize = 5;
/// Employee-to-company obligation ratio that counts as asymmetric.
const ASYMMETRY_RATIO: f64 = 2.0;

/// Detects overlong clauses, absolute language and one-sided obligations.
pub struct StructuralLayer {
    /// Markers of one-sided, non-negotiable drafting.
    absolute_markers: Vec<&'static str>,
    /// Subjects where absolute language matters.
    critical_context: Vec<&'static str>,
    /// Routine subjects where absolute language is tolerated.
    administrative_context: Vec<&'static str>,
    /// Phrases counted as company obligations.
    company_obligations: Vec<&'static str>,
    /// Phrases counted as employee obligations.
    employee_obligations: Vec<&'static str>,
}

impl Default for StructuralLayer {
    fn default() -> Self {
        Self {
            absolute_markers: vec!["solely", "irrevocably", "sole discretion"],
            critical_context: vec![
                "termination",
                "salary",
                "payment",
                "intellectual property",
                "rights",
            ],
            administrative_context: vec![
                "evaluation",
                "assessment",
                "duties",
                "assignment of tasks",
            ],
            company_obligations: vec!["company shall"],
            employee_obligations: vec!["employee shall", "you shall"],
        }
    }
}

impl StructuralLayer {
    fn count_all(text: &str, phrases: &[&str]) -> usize {
        phrases.iter().map(|p| count_occurrences(text, p)).sum()
    }
}

impl RiskLayer for StructuralLayer {
    fn id(&self) -> LayerId {
        LayerId::Structural
    }

    fn run(&self, clauses: &[Clause]) -> LayerResult {
        let mut findings = Findings::new(self.id());
        let mut company_count = 0;
        let mut employee_count = 0;

        for clause in clauses {
            let text = clause.text.to_lowercase();

            let words = clause.word_count();
            if words > MAX_CLAUSE_WORDS {
                findings.flag_with(
                    RiskKind::ExcessivelyLongClause,
                    Some(clause.id.as_str()),
                    format!(
                        "Clause contains {} words, which reduces readability and hides risks.",
                        words
                    ),
                );
            }

            if contains_any(&text, &self.absolute_markers) {
                let critical = contains_any(&text, &self.critical_context);
                let administrative = contains_any(&text, &self.administrative_context);
                if critical || !administrative {
                    findings.flag(RiskKind::AbsoluteLanguage, clause);
                }
            }

            company_count += Self::count_all(&text, &self.company_obligations);
            employee_count += Self::count_all(&text, &self.employee_obligations);
        }

        if employee_count > 0 {
            let ratio = employee_count as f64 / company_count.max(1) as f64;
            if ratio > ASYMMETRY_RATIO && employee_count > MIN_EMPLOYEE_OBLIGATIONS {
                findings.flag_with(
                    RiskKind::ObligationAsymmetry,
                    None,
                    format!(
                        "Employee has significantly more obligations ({}) than the Company ({}).",
                        employee_count, company_count
                    ),
                );
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
        StructuralLayer::default().run(&numbered_clauses(texts))
    }

    #[test]
    fn test_long_clause_threshold_is_exclusive() {
        let exactly = vec!["word"; 300].join(" ");
        assert!(run(&[exactly.as_str()]).flags.is_empty());

        let over = vec!["word"; 301].join(" ");
        let result = run(&[over.as_str()]);
        assert_eq!(result.flags.len(), 1);
        assert_eq!(result.flags[0].title, "Excessively Long Clause");
        assert!(result.flags[0].description.contains("301 words"));
        assert_eq!(result.severity, Severity::Medium);
    }

    #[test]
    fn test_absolute_language_in_critical_context() {
        let result = run(&["Salary is revised at the Company's sole discretion."]);
        assert!(result.has_flag("Absolute/Unilateral Language"));
    }

    #[test]
    fn test_absolute_language_ignored_in_purely_administrative_context() {
        let result = run(&["Assignment of tasks is decided solely by the manager."]);
        assert!(result.flags.is_empty());
    }

    #[test]
    fn test_absolute_language_critical_beats_administrative() {
        let result = run(&["Evaluation affects rights and is decided solely by the Company."]);
        assert!(result.has_flag("Absolute/Unilateral Language"));
    }

    #[test]
    fn test_obligation_asymmetry_is_global() {
        let text = "The Employee shall attend. ".repeat(6);
        let result = run(&[text.as_str(), "The Company shall pay."]);
        let flag = result
            .flags
            .iter()
            .find(|f| f.title == "Obligation Asymmetry")
            .unwrap();
        assert_eq!(flag.clause_id, None);
        assert_eq!(
            flag.description,
            "Employee has significantly more obligations (6) than the Company (1)."
        );
    }

    #[test]
    fn test_obligation_asymmetry_needs_more_than_five() {
        let text = "You shall comply. ".repeat(5);
        assert!(run(&[text.as_str()]).flags.is_empty());
    }

    #[test]
    fn test_obligation_asymmetry_ratio_must_exceed_two() {
        let employee = "Employee shall act. ".repeat(6);
        let company = "Company shall act. ".repeat(3);
        assert!(run(&[employee.as_str(), company.as_str()]).flags.is_empty());
    }
}
