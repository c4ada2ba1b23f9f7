use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use layered_risk::{Analysis, Clause, ContractAnalyzer, PrecedentCitation, RiskError};
use layered_risk_knowledge::{
    redline_or_fallback, suggest_redline as lookup_redline, Enricher, PrecedentSelector,
    PrecedentTopic, StaticAdvisor,
};

// Set up panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

const MAX_INPUT_SIZE: usize = 50_000;

/// Seed for precedent selection during `analyze_contract`.
const ENRICHMENT_SEED: u64 = 0x5eed;

// ============================================================================
// ERRORS
// ============================================================================

/// Error response returned in place of a result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.to_string(),
                message: message.into(),
                details: None,
            },
        }
    }

    fn invalid_input(message: &str) -> Self {
        Self::new("invalid_input", message)
    }

    fn input_too_large(size: usize) -> Self {
        let mut response = Self::new(
            "input_too_large",
            format!("Contract exceeds maximum size of {} characters", MAX_INPUT_SIZE),
        );
        response.error.details = Some(serde_json::json!({
            "size": size,
            "max_size": MAX_INPUT_SIZE
        }));
        response
    }
}

impl From<RiskError> for ErrorResponse {
    fn from(error: RiskError) -> Self {
        match error {
            RiskError::EmptyInput => Self::invalid_input("Contract text is empty"),
            other => Self::new("analysis_failed", other.to_string()),
        }
    }
}

fn validate(text: &str) -> Result<(), ErrorResponse> {
    if text.trim().is_empty() {
        return Err(ErrorResponse::invalid_input("Contract text is empty"));
    }
    if text.len() > MAX_INPUT_SIZE {
        return Err(ErrorResponse::input_too_large(text.len()));
    }
    Ok(())
}

fn to_js<T: Serialize>(result: Result<T, ErrorResponse>) -> JsValue {
    let serialized = match result {
        Ok(value) => serde_wasm_bindgen::to_value(&value),
        Err(error) => serde_wasm_bindgen::to_value(&error),
    };
    serialized.unwrap_or_else(|e| {
        let error = ErrorResponse::new("internal_error", format!("Failed to serialize result: {}", e));
        serde_wasm_bindgen::to_value(&error).unwrap_or(JsValue::NULL)
    })
}

// ============================================================================
// ANALYSIS API
// ============================================================================

/// Analysis plus a plain-text report for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    #[serde(flatten)]
    pub analysis: Analysis,
    pub report: String,
}

/// Segment, score and (optionally) enrich a contract.
///
/// Returns `{ clauses, result, report }` or `{ error: { code, message } }`.
#[wasm_bindgen]
pub fn analyze_contract(text: &str, enrich: bool) -> JsValue {
    init();
    to_js(analyze_contract_internal(text, enrich))
}

fn analyze_contract_internal(text: &str, enrich: bool) -> Result<AnalyzeResponse, ErrorResponse> {
    validate(text)?;
    let mut analysis = ContractAnalyzer::default().analyze(text)?;
    if enrich {
        Enricher::new(StaticAdvisor, ENRICHMENT_SEED).enrich(&mut analysis);
    }
    let report = analysis.result.to_string();
    Ok(AnalyzeResponse { analysis, report })
}

/// Split a contract into labelled clauses without scoring it.
#[wasm_bindgen]
pub fn segment_contract(text: &str) -> JsValue {
    init();
    to_js(segment_contract_internal(text))
}

fn segment_contract_internal(text: &str) -> Result<Vec<Clause>, ErrorResponse> {
    validate(text)?;
    Ok(ContractAnalyzer::default().segment(text))
}

// ============================================================================
// KNOWLEDGE API
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedlineResponse {
    pub title: String,
    pub redline: String,
    /// True when no redline matched and the counsel fallback was used.
    pub fallback: bool,
}

/// Safer replacement wording for a flag title.
#[wasm_bindgen]
pub fn suggest_redline(title: &str) -> JsValue {
    init();
    to_js::<RedlineResponse>(Ok(suggest_redline_internal(title)))
}

fn suggest_redline_internal(title: &str) -> RedlineResponse {
    RedlineResponse {
        title: title.to_string(),
        redline: redline_or_fallback(title).to_string(),
        fallback: lookup_redline(title).is_none(),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrecedentResponse {
    pub topic: String,
    pub precedents: Vec<PrecedentCitation>,
}

/// One to three precedents relevant to a flag title.
#[wasm_bindgen]
pub fn find_precedents(title: &str, seed: u32) -> JsValue {
    init();
    to_js::<PrecedentResponse>(Ok(find_precedents_internal(title, seed)))
}

fn find_precedents_internal(title: &str, seed: u32) -> PrecedentResponse {
    PrecedentResponse {
        topic: format!("{:?}", PrecedentTopic::for_title(title)),
        precedents: PrecedentSelector::seeded(u64::from(seed)).select(title),
    }
}

#[cfg(test)]
mod tests {
    use layered_risk::Verdict;

    use super::*;

    #[test]
    fn test_analyze_returns_report_and_enrichment() {
        let response = analyze_contract_internal(
            "TERMINATION\nThe Company may terminate this Agreement without notice.",
            true,
        )
        .unwrap();

        assert_eq!(response.analysis.result.verdict(), Verdict::DoNotSign);
        assert!(response.report.starts_with("Verdict: DO_NOT_SIGN"));
        assert!(response
            .analysis
            .result
            .flags()
            .all(|f| f.enrichment.is_some() && f.original_text.is_some()));

        let plain = analyze_contract_internal(
            "TERMINATION\nThe Company may terminate this Agreement without notice.",
            false,
        )
        .unwrap();
        assert!(plain.analysis.result.flags().all(|f| f.enrichment.is_none()));
        assert_eq!(plain.analysis.result.score, response.analysis.result.score);
    }

    #[test]
    fn test_response_flattens_analysis() {
        let response = analyze_contract_internal("Salary is paid monthly.", false).unwrap();
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("clauses").is_some());
        assert_eq!(json["result"]["recommendation"]["verdict"], "PROCEED");
        assert!(json["report"].as_str().unwrap().contains("Score: 90"));
    }

    #[test]
    fn test_invalid_input() {
        let error = analyze_contract_internal("   \n ", false).unwrap_err();
        assert_eq!(error.error.code, "invalid_input");

        let error = segment_contract_internal(&"a".repeat(MAX_INPUT_SIZE + 1)).unwrap_err();
        assert_eq!(error.error.code, "input_too_large");
        assert_eq!(
            error.error.details.unwrap()["max_size"],
            serde_json::json!(MAX_INPUT_SIZE)
        );
    }

    #[test]
    fn test_segment_contract() {
        let clauses = segment_contract_internal("1. TERMINATION\nNotice applies.\n2. LIABILITY\nCapped.").unwrap();
        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[1].id, "2");
    }

    #[test]
    fn test_redline_lookup() {
        let hit = suggest_redline_internal("Unilateral Amendment");
        assert!(!hit.fallback);
        assert!(hit.redline.starts_with("This Agreement may be amended"));

        let miss = suggest_redline_internal("Short Notice Period");
        assert!(miss.fallback);
        assert_eq!(miss.redline, "Consult legal counsel.");
    }

    #[test]
    fn test_precedents_by_topic() {
        let response = find_precedents_internal("Post-Employment Non-Compete", 11);
        assert_eq!(response.topic, "NonCompete");
        assert!((1..=3).contains(&response.precedents.len()));
        assert_eq!(
            find_precedents_internal("Post-Employment Non-Compete", 11).precedents,
            response.precedents
        );
    }
}
