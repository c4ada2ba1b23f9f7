//! Human-readable failure and summary output.

use std::fmt::Write;

use layered_risk::Analysis;

use crate::failures::FailureState;
use crate::runner::{AssertionOutcome, FailureReport};

/// Format a failed assertion with the analysis it was checked against.
pub fn format_failure(fixture_name: &str, failure: &FailureReport, analysis: &Analysis) -> String {
    let mut output = String::new();

    let state = match failure.state {
        FailureState::Known => " (known)",
        FailureState::Pending => " (pending)",
        FailureState::Regression => "",
    };
    let _ = writeln!(
        output,
        "\nFAIL{}: {}:{} [{}]",
        state, fixture_name, failure.source_line, failure.reference
    );

    if let AssertionOutcome::Failed { expected, actual } = &failure.outcome {
        let _ = writeln!(output, "  expected: {}", expected);
        let _ = writeln!(output, "  actual:   {}", actual);
    }

    let _ = writeln!(output);
    for line in analysis.result.to_string().lines() {
        let _ = writeln!(output, "  | {}", line);
    }

    if let Some(hint) = generate_hint(failure, analysis) {
        let _ = writeln!(output, "\n  hint: {}", hint);
    }

    output
}

fn generate_hint(failure: &FailureReport, analysis: &Analysis) -> Option<String> {
    if analysis.clauses.is_empty() {
        return Some("the fixture has no contract text".to_string());
    }
    match &failure.outcome {
        AssertionOutcome::Failed { expected, .. }
            if expected.starts_with("Flag(") && expected.contains("clause=") =>
        {
            let ids: Vec<_> = analysis
                .clauses
                .iter()
                .map(|c| format!("{} ({})", c.id, c.category))
                .collect();
            Some(format!("clauses are {}", ids.join(", ")))
        }
        _ => None,
    }
}

/// One status line per fixture.
pub fn format_summary(
    fixture_name: &str,
    passed: usize,
    failed: usize,
    expected_failures: usize,
    regressions: usize,
) -> String {
    let status = if regressions > 0 { "FAIL" } else { "PASS" };
    format!(
        "{}: {}\n  {} passed, {} failed ({} expected, {} regressions)\n",
        status, fixture_name, passed, failed, expected_failures, regressions
    )
}
