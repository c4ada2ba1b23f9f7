use std::collections::HashSet;

use crate::{
    aggregate, dedup_flags, Flag, LayerId, LayerResult, RiskKind, Rung, Severity, Tally, Verdict,
};

fn all_layers(mut flags: Vec<Flag>, positives: &[&str]) -> Vec<LayerResult> {
    LayerId::ALL
        .iter()
        .map(|id| {
            let (own, rest): (Vec<_>, Vec<_>) = flags.drain(..).partition(|f| f.layer == *id);
            flags = rest;
            let positives = if *id == LayerId::Liability {
                positives.iter().map(|p| p.to_string()).collect()
            } else {
                Vec::new()
            };
            LayerResult::new(*id, own, positives)
        })
        .collect()
}

#[test]
fn dedup_keeps_one_flag_per_key_across_the_run() {
    let results = all_layers(
        vec![
            RiskKind::ObligationAsymmetry.flag(None),
            RiskKind::ObligationAsymmetry.flag(None),
            RiskKind::ShortNoticePeriod.flag_with(Some("4"), "Notice period of 7 days is dangerously short."),
            RiskKind::ShortNoticePeriod.flag_with(Some("4"), "Notice period of 3 days is dangerously short."),
            RiskKind::ShortNoticePeriod.flag(Some("5")),
        ],
        &[],
    );

    let (deduped, dropped) = dedup_flags(results);
    assert_eq!(dropped, 2);

    let keys: Vec<_> = deduped.iter().flat_map(|r| r.flags.iter()).map(Flag::key).collect();
    let unique: HashSet<_> = keys.iter().cloned().collect();
    assert_eq!(keys.len(), unique.len());

    // First occurrence wins.
    let termination = &deduped[1];
    assert_eq!(
        termination.flags[0].description,
        "Notice period of 7 days is dangerously short."
    );
    assert_eq!(deduped.len(), 7);
}

#[test]
fn restraint_of_trade_outranks_multiple_highs() {
    let results = all_layers(
        vec![
            RiskKind::ImmediateTermination.flag(Some("1")),
            RiskKind::UnilateralTermination.flag(Some("1")),
            RiskKind::EmploymentBond.flag(Some("2")),
        ],
        &[],
    );
    let (_, assessment) = aggregate(results);
    assert_eq!(assessment.recommendation.verdict, Verdict::DoNotSign);
    assert_eq!(assessment.score, 40.0);
    assert_eq!(assessment.overall_risk, Severity::High);
}

#[test]
fn exclusivity_alone_is_not_restraint_of_trade() {
    let results = all_layers(vec![RiskKind::PostTerminationExclusivity.flag(Some("2"))], &[]);
    let tally = Tally::of(&results);
    assert!(!tally.restraint_of_trade);
    assert_eq!(Rung::select(&tally), Rung::SingleHigh);
}

#[test]
fn critical_medium_in_liability_layer() {
    let mut flag = RiskKind::ShortNoticePeriod.flag(Some("1"));
    flag.layer = LayerId::Liability;
    let results = all_layers(vec![flag], &[]);

    let (_, assessment) = aggregate(results);
    assert_eq!(assessment.recommendation.verdict, Verdict::ProceedWithCaution);
    assert_eq!(assessment.overall_risk, Severity::Medium);
    assert_eq!(assessment.score, 70.0);
}

#[test]
fn bonus_lifts_a_clean_contract_to_the_cap() {
    let results = all_layers(Vec::new(), &["Mutual indemnity", "Liability capped"]);
    let (_, assessment) = aggregate(results);
    assert_eq!(assessment.score, 100.0);
    assert_eq!(assessment.recommendation.verdict, Verdict::Proceed);
}

#[test]
fn bonus_is_added_to_a_single_medium() {
    let results = all_layers(
        vec![RiskKind::ForeignArbitrationSeat.flag(Some("3"))],
        &["Liability capped"],
    );
    let (_, assessment) = aggregate(results);
    assert_eq!(assessment.score, 85.0);
    assert_eq!(assessment.recommendation.reason, "Risks are manageable.");
}

#[test]
fn many_highs_floor_at_ten() {
    let flags = (1..=30)
        .map(|i| RiskKind::UnilateralAmendment.flag(Some(i.to_string().as_str())))
        .collect();
    let (_, assessment) = aggregate(all_layers(flags, &[]));
    assert_eq!(assessment.score, 10.0);
    assert_eq!(
        assessment.recommendation.reason,
        "Multiple critical risks detected (30). Do not sign."
    );
}
