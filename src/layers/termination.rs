//! Layer 2: instability of exit terms.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::clause::Clause;
use crate::flag::{LayerId, LayerResult, RiskKind};
use crate::utils::{contains_any, contains_word};

use super::{Findings, RiskLayer};

/// A day count directly before the word "notice": "10 days notice", "7 day notice".
static NOTICE_PERIOD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*days?\s*notice").expect("Invalid notice period regex"));

/// Shortest notice period (in days) that is not flagged.
const ADEQUATE_NOTICE_DAYS: u32 = 15;

/// Detects termination without notice, one-way exit rights and short notice.
pub struct TerminationLayer {
    /// A clause must mention one of these to be inspected.
    gate: Vec<&'static str>,
    immediate: Vec<&'static str>,
    company_right: &'static str,
    employee_right: &'static str,
    convenience: Vec<&'static str>,
    /// Whole words naming an intern role.
    intern: Vec<&'static str>,
}

impl Default for TerminationLayer {
    fn default() -> Self {
        Self {
            gate: vec!["terminat", "notice"],
            immediate: vec!["without notice", "immediate termination"],
            company_right: "company may terminate",
            employee_right: "employee may terminate",
            convenience: vec!["termination for convenience", "terminate for convenience"],
            intern: vec!["intern", "interns", "internship"],
        }
    }
}

/// Every well-formed day count adjacent to "notice". Numbers that do not fit
/// a `u32` are skipped.
fn notice_periods(text: &str) -> impl Iterator<Item = u32> + '_ {
    NOTICE_PERIOD
        .captures_iter(text)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
}

impl RiskLayer for TerminationLayer {
    fn id(&self) -> LayerId {
        LayerId::Termination
    }

    fn run(&self, clauses: &[Clause]) -> LayerResult {
        let mut findings = Findings::new(self.id());

        for clause in clauses {
            let text = clause.text.to_lowercase();
            if !contains_any(&text, &self.gate) {
                continue;
            }

            if contains_any(&text, &self.immediate) {
                findings.flag(RiskKind::ImmediateTermination, clause);
            }

            if text.contains(self.company_right) {
                if text.contains(self.employee_right) {
                    findings.positive("Mutual termination rights");
                } else {
                    findings.flag(RiskKind::UnilateralTermination, clause);
                }
            }

            for days in notice_periods(&text) {
                if (1..ADEQUATE_NOTICE_DAYS).contains(&days) {
                    findings.flag_with(
                        RiskKind::ShortNoticePeriod,
                        Some(clause.id.as_str()),
                        format!("Notice period of {} days is dangerously short.", days),
                    );
                } else if days >= ADEQUATE_NOTICE_DAYS
                    && self.intern.iter().any(|word| contains_word(&text, word))
                {
                    findings.positive(format!("Adequate intern notice period ({} days)", days));
                }
            }

            if contains_any(&text, &self.convenience)
                && text.contains("company")
                && !text.contains("employee")
            {
                findings.flag(RiskKind::TerminationForConvenience, clause);
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
        TerminationLayer::default().run(&numbered_clauses(texts))
    }

    fn titles(result: &LayerResult) -> Vec<&str> {
        result.flags.iter().map(|f| f.title.as_str()).collect()
    }

    #[test]
    fn test_without_notice_and_unilateral() {
        let result =
            run(&["TERMINATION\nThe Company may terminate this Agreement without notice at any time."]);
        assert_eq!(
            titles(&result),
            vec!["Immediate Termination", "Unilateral Termination"]
        );
        assert_eq!(result.severity, Severity::High);
        assert!(result.flags.iter().all(|f| f.clause_id.as_deref() == Some("1")));
    }

    #[test]
    fn test_mutual_termination_is_positive() {
        let result = run(&[
            "The Company may terminate and the Employee may terminate on 30 days notice.",
        ]);
        assert!(result.flags.is_empty());
        assert_eq!(result.positive_findings, vec!["Mutual termination rights"]);
    }

    #[test]
    fn test_short_notice_period_bounds() {
        let result = run(&["Notice period shall be 10 days notice."]);
        assert_eq!(titles(&result), vec!["Short Notice Period"]);
        assert_eq!(
            result.flags[0].description,
            "Notice period of 10 days is dangerously short."
        );

        assert!(run(&["Either side may give 14 days notice."]).has_flag("Short Notice Period"));
        assert!(run(&["Either side may give 15 days notice."]).flags.is_empty());
        assert!(run(&["Either side may give 0 days notice."]).flags.is_empty());
        assert!(run(&["Either side may give 1 day notice."]).has_flag("Short Notice Period"));
    }

    #[test]
    fn test_oversized_day_count_is_skipped() {
        let result = run(&["Give 99999999999999999999 days notice."]);
        assert!(result.flags.is_empty());
    }

    #[test]
    fn test_intern_notice_positive() {
        let result = run(&["The intern may leave on 30 days notice."]);
        assert!(result.flags.is_empty());
        assert_eq!(
            result.positive_findings,
            vec!["Adequate intern notice period (30 days)"]
        );
        assert_eq!(
            run(&["The internship ends on 20 days notice."]).positive_findings,
            vec!["Adequate intern notice period (20 days)"]
        );
    }

    #[test]
    fn test_intern_prefix_words_are_not_interns() {
        for text in [
            "Either party may terminate on 30 days notice under international law.",
            "Internal transfers require 30 days notice.",
            "Notices may be sent over the internet with 30 days notice.",
        ] {
            let result = run(&[text]);
            assert!(result.positive_findings.is_empty(), "{}", text);
            assert!(result.flags.is_empty(), "{}", text);
        }
    }

    #[test]
    fn test_termination_for_convenience_company_only() {
        let result = run(&["The Company reserves termination for convenience."]);
        assert_eq!(titles(&result), vec!["Termination for Convenience"]);
        assert_eq!(result.severity, Severity::Medium);

        let both = run(&["The Company or the Employee may invoke termination for convenience."]);
        assert!(both.flags.is_empty());
    }

    #[test]
    fn test_clauses_without_termination_language_are_skipped() {
        // "immediate" alone does not open the gate.
        assert!(run(&["Payment is due immediately upon invoice."]).flags.is_empty());
        assert!(run(&["Fees are payable within 5 days of delivery."]).flags.is_empty());
    }
}
