use serde_json::json;

use crate::{ContractAnalyzer, GoverningLaw, RuleEngineResult};

fn report_for(text: &str) -> RuleEngineResult {
    ContractAnalyzer::default().analyze(text).unwrap().result
}

const ONE_SIDED: &str = "\
TERMINATION
The Company may terminate this Agreement without notice at any time.
DISPUTES
Any dispute shall be resolved by arbitration in Singapore before a sole arbitrator appointed by the Company.";

#[test]
fn flagged_contract_report() {
    let result = report_for(ONE_SIDED).with_governing_law(GoverningLaw {
        jurisdiction: "India".to_string(),
        court: "Bombay High Court".to_string(),
        supported: true,
    });

    insta::assert_snapshot!(result.to_string().trim_end(), @r###"
    Verdict: DO_NOT_SIGN (High risk)
    Reason: Multiple critical risks detected (3). Do not sign.
    Score: 44
    Governing law: India (Bombay High Court)
    L2 [High] Immediate Termination (clause 1)
    L2 [High] Unilateral Termination (clause 1)
    L6 [Medium] Foreign Arbitration Seat (clause 2)
    L6 [High] Biased Arbitrator Appointment (clause 2)
    "###);
}

#[test]
fn global_flag_report() {
    let result = report_for(&"The Employee shall comply. ".repeat(6));

    insta::assert_snapshot!(result.to_string().trim_end(), @r###"
    Verdict: PROCEED (Medium risk)
    Reason: Risks are manageable.
    Score: 80
    L1 [Medium] Obligation Asymmetry (global)
    "###);
}

#[test]
fn protective_contract_report() {
    let result = report_for(
        "\
1. TERMINATION
The Company may terminate and the Employee may terminate on 30 days notice.
2. LIABILITY
Total liability shall not exceed the fees paid in the prior year.",
    );

    insta::assert_snapshot!(result.to_string().trim_end(), @r###"
    Verdict: PROCEED (Low risk)
    Reason: Contract appears standard with no significant risks detected.
    Score: 100
    + Mutual termination rights
    + Liability capped
    "###);
}

#[test]
fn result_serializes_with_wire_names() {
    let value = serde_json::to_value(report_for(ONE_SIDED)).unwrap();

    assert_eq!(value["overall_risk"], json!("High"));
    assert_eq!(value["score"], json!(44.0));
    assert_eq!(value["recommendation"]["verdict"], json!("DO_NOT_SIGN"));
    assert_eq!(value["layer_results"][1]["layer"], json!(2));
    assert_eq!(
        value["layer_results"][1]["flags"][0],
        json!({
            "layer": 2,
            "clause_id": "1",
            "title": "Immediate Termination",
            "description": "Right to terminate without notice creates instability.",
            "severity": "High",
        })
    );
    assert!(value.get("governing_law").is_none());
}

#[test]
fn result_round_trips_through_json() {
    let result = report_for(ONE_SIDED);
    let json = serde_json::to_string(&result).unwrap();
    let parsed: RuleEngineResult = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, result);
}
