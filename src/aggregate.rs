//! Cross-layer deduplication, scoring and the verdict ladder.

use std::collections::HashSet;

use tracing::debug;

use crate::flag::{LayerId, LayerResult, Severity};
use crate::result::{Recommendation, Verdict};

/// Points added per recognised positive-finding keyword.
const BONUS_PER_KEYWORD: f64 = 5.0;
/// Upper bound on the total bonus.
const MAX_BONUS: f64 = 20.0;
/// Score ceiling when any High flag is present.
const HIGH_RISK_CEILING: f64 = 60.0;
/// Score ceiling when two or more Medium flags are present.
const MEDIUM_RISK_CEILING: f64 = 75.0;

/// Positive-finding keywords that earn a bonus, matched case-insensitively.
const BONUS_KEYWORDS: [&str; 6] = [
    "mutual",
    "public domain",
    "time-bound",
    "capped",
    "excludes consequential",
    "intern notice",
];

/// Drop repeated `(layer, title, scope)` flags, keeping the first occurrence
/// across all layers. Returns the rewritten results and the number dropped.
pub fn dedup_flags(layer_results: Vec<LayerResult>) -> (Vec<LayerResult>, usize) {
    let mut seen = HashSet::new();
    let mut dropped = 0;

    let deduped = layer_results
        .into_iter()
        .map(|result| {
            let before = result.flags.len();
            let flags: Vec<_> = result
                .flags
                .iter()
                .filter(|flag| seen.insert(flag.key()))
                .cloned()
                .collect();
            dropped += before - flags.len();
            result.with_flags(flags)
        })
        .collect();

    (deduped, dropped)
}

/// Flag counts that drive the verdict ladder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub high: usize,
    pub medium: usize,
    /// A High non-compete or employment-bond flag.
    pub restraint_of_trade: bool,
    /// A Medium flag from the liability or employment-restraint layer.
    pub critical_medium: bool,
}

impl Tally {
    pub fn of(layer_results: &[LayerResult]) -> Self {
        let mut tally = Tally::default();
        for flag in layer_results.iter().flat_map(|r| r.flags.iter()) {
            match flag.severity {
                Severity::High => {
                    tally.high += 1;
                    tally.restraint_of_trade |= flag.is_restraint_of_trade();
                }
                Severity::Medium => {
                    tally.medium += 1;
                    tally.critical_medium |= matches!(
                        flag.layer,
                        LayerId::Liability | LayerId::EmploymentRestraint
                    );
                }
                Severity::Low => {}
            }
        }
        tally
    }
}

/// Sum of bonus points for protective language, capped at 20.
pub fn positive_bonus(layer_results: &[LayerResult]) -> f64 {
    let hits = layer_results
        .iter()
        .flat_map(|r| r.positive_findings.iter())
        .map(|finding| {
            let lowered = finding.to_lowercase();
            BONUS_KEYWORDS
                .iter()
                .filter(|keyword| lowered.contains(**keyword))
                .count()
        })
        .sum::<usize>();
    (hits as f64 * BONUS_PER_KEYWORD).min(MAX_BONUS)
}

/// One rung of the verdict ladder. Rungs are tried top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rung {
    RestraintOfTrade,
    MultipleHigh(usize),
    HighWithMediums,
    SingleHigh,
    ModerateRisks,
    ManageableRisk,
    Clean,
}

impl Rung {
    pub fn select(tally: &Tally) -> Self {
        if tally.restraint_of_trade {
            Rung::RestraintOfTrade
        } else if tally.high >= 2 {
            Rung::MultipleHigh(tally.high)
        } else if tally.high == 1 && tally.medium >= 2 {
            Rung::HighWithMediums
        } else if tally.high == 1 {
            Rung::SingleHigh
        } else if tally.medium >= 2 || tally.critical_medium {
            Rung::ModerateRisks
        } else if tally.medium == 1 {
            Rung::ManageableRisk
        } else {
            Rung::Clean
        }
    }

    pub fn verdict(self) -> Verdict {
        match self {
            Rung::RestraintOfTrade | Rung::MultipleHigh(_) => Verdict::DoNotSign,
            Rung::HighWithMediums | Rung::SingleHigh | Rung::ModerateRisks => {
                Verdict::ProceedWithCaution
            }
            Rung::ManageableRisk | Rung::Clean => Verdict::Proceed,
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            Rung::RestraintOfTrade
            | Rung::MultipleHigh(_)
            | Rung::HighWithMediums
            | Rung::SingleHigh => Severity::High,
            Rung::ModerateRisks | Rung::ManageableRisk => Severity::Medium,
            Rung::Clean => Severity::Low,
        }
    }

    pub fn base_score(self) -> f64 {
        match self {
            Rung::RestraintOfTrade => 40.0,
            Rung::MultipleHigh(high) => (50.0 - 2.0 * high as f64).max(10.0),
            Rung::HighWithMediums | Rung::SingleHigh => 60.0,
            Rung::ModerateRisks => 70.0,
            Rung::ManageableRisk => 80.0,
            Rung::Clean => 90.0,
        }
    }

    pub fn reason(self) -> String {
        match self {
            Rung::RestraintOfTrade => {
                "Void as a restraint of trade (Non-Compete/Bond detected).".to_string()
            }
            Rung::MultipleHigh(high) => {
                format!("Multiple critical risks detected ({}). Do not sign.", high)
            }
            Rung::HighWithMediums => {
                "One critical risk and multiple moderate risks. Review carefully.".to_string()
            }
            Rung::SingleHigh => "One critical risk detected. Review carefully.".to_string(),
            Rung::ModerateRisks => "Multiple or Critical Moderate Risks found.".to_string(),
            Rung::ManageableRisk => "Risks are manageable.".to_string(),
            Rung::Clean => {
                "Contract appears standard with no significant risks detected.".to_string()
            }
        }
    }
}

/// Overall risk, score and recommendation for deduplicated layer results.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub overall_risk: Severity,
    pub score: f64,
    pub recommendation: Recommendation,
}

/// Score the (already deduplicated) results.
pub fn assess(layer_results: &[LayerResult]) -> Assessment {
    let tally = Tally::of(layer_results);
    let bonus = positive_bonus(layer_results);
    let rung = Rung::select(&tally);

    let mut score = (rung.base_score() + bonus).min(100.0);
    if tally.high > 0 {
        score = score.min(HIGH_RISK_CEILING);
    }
    if tally.medium >= 2 {
        score = score.min(MEDIUM_RISK_CEILING);
    }

    debug!(
        high = tally.high,
        medium = tally.medium,
        restraint_of_trade = tally.restraint_of_trade,
        critical_medium = tally.critical_medium,
        bonus,
        ?rung,
        score,
        "assessed contract"
    );

    Assessment {
        overall_risk: rung.severity(),
        score,
        recommendation: Recommendation {
            verdict: rung.verdict(),
            reason: rung.reason(),
        },
    }
}

/// Deduplicate, then assess. Total over any input, including all-empty results.
pub fn aggregate(layer_results: Vec<LayerResult>) -> (Vec<LayerResult>, Assessment) {
    let (layer_results, dropped) = dedup_flags(layer_results);
    if dropped > 0 {
        debug!(dropped, "dropped duplicate flags");
    }
    let assessment = assess(&layer_results);
    (layer_results, assessment)
}
