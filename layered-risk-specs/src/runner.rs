//! Runs fixtures through the analyzer and checks their assertions.

use std::path::Path;

use layered_risk::{Analysis, ContractAnalyzer, Flag, RiskError};
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::SpecResult;
use crate::failures::{ExpectedFailures, FailureState, HarnessResult};
use crate::fixture::{Assertion, AssertionKind, ContractFixture};
use crate::loader::load_all_fixtures;

/// Outcome of checking one assertion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AssertionOutcome {
    Passed,
    Failed { expected: String, actual: String },
}

impl AssertionOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, AssertionOutcome::Passed)
    }
}

/// An assertion paired with its outcome.
#[derive(Debug, Clone)]
pub struct AssertionResult<'a> {
    pub assertion: &'a Assertion,
    pub outcome: AssertionOutcome,
}

/// Analyze the fixture text. Blank fixtures produce an empty analysis.
pub fn run_fixture(fixture: &ContractFixture, analyzer: &ContractAnalyzer) -> SpecResult<Analysis> {
    match analyzer.analyze(&fixture.text) {
        Ok(analysis) => Ok(analysis),
        Err(RiskError::EmptyInput) => Ok(Analysis {
            clauses: Vec::new(),
            result: layered_risk::run(&[]),
        }),
        Err(error) => Err(error.into()),
    }
}

/// Check every assertion of `fixture` against `analysis`.
pub fn check_fixture_assertions<'a>(
    fixture: &'a ContractFixture,
    analysis: &Analysis,
) -> Vec<AssertionResult<'a>> {
    fixture
        .assertions
        .iter()
        .map(|assertion| AssertionResult {
            assertion,
            outcome: check_assertion(&assertion.kind, analysis),
        })
        .collect()
}

pub fn check_assertion(kind: &AssertionKind, analysis: &Analysis) -> AssertionOutcome {
    let result = &analysis.result;
    let (ok, actual) = match kind {
        AssertionKind::Verdict(verdict) => {
            (result.verdict() == *verdict, result.verdict().to_string())
        }
        AssertionKind::Risk(severity) => {
            (result.overall_risk == *severity, result.overall_risk.to_string())
        }
        AssertionKind::Score { op, value } => (op.holds(result.score, *value), result.score.to_string()),
        AssertionKind::Clauses { op, value } => {
            let count = analysis.clauses.len();
            (op.holds(count, *value), count.to_string())
        }
        AssertionKind::Flag(pattern) => {
            let ok = result.flags().any(|flag| pattern.matches(flag));
            (ok, describe_flags(result.flags()))
        }
        AssertionKind::NoFlag(pattern) => {
            let matching: Vec<_> = result.flags().filter(|flag| pattern.matches(flag)).collect();
            (matching.is_empty(), describe_flags(matching.into_iter()))
        }
        AssertionKind::Positive(text) => {
            let ok = result.positive_findings().any(|finding| finding == text);
            let findings: Vec<_> = result.positive_findings().collect();
            let actual = if findings.is_empty() {
                "no positive findings".to_string()
            } else {
                findings.join("; ")
            };
            (ok, actual)
        }
    };

    if ok {
        AssertionOutcome::Passed
    } else {
        AssertionOutcome::Failed {
            expected: kind.to_string(),
            actual,
        }
    }
}

fn describe_flags<'f>(flags: impl Iterator<Item = &'f Flag>) -> String {
    let described: Vec<_> = flags
        .map(|flag| format!("{} {} ({})", flag.layer, flag.title, flag.scope()))
        .collect();
    if described.is_empty() {
        "no flags".to_string()
    } else {
        described.join("; ")
    }
}

/// A failed assertion as reported by the harness.
#[derive(Debug, Clone, Serialize)]
pub struct FailureReport {
    pub reference: String,
    pub source_line: usize,
    pub outcome: AssertionOutcome,
    pub state: FailureState,
}

/// Per-fixture harness output.
#[derive(Debug, Clone, Serialize)]
pub struct FixtureReport {
    pub name: String,
    pub title: Option<String>,
    pub passed: usize,
    pub failures: Vec<FailureReport>,
}

impl FixtureReport {
    pub fn regressions(&self) -> usize {
        self.failures
            .iter()
            .filter(|f| f.state == FailureState::Regression)
            .count()
    }
}

/// Check one fixture and classify its failures against the ledger.
pub fn report_fixture(
    name: &str,
    fixture: &ContractFixture,
    analysis: &Analysis,
    expected: &ExpectedFailures,
    harness: &mut HarnessResult,
) -> FixtureReport {
    let mut report = FixtureReport {
        name: name.to_string(),
        title: fixture.title.clone(),
        passed: 0,
        failures: Vec::new(),
    };

    for result in check_fixture_assertions(fixture, analysis) {
        if result.outcome.passed() {
            harness.record_pass();
            report.passed += 1;
            continue;
        }
        let reference = result.assertion.reference();
        let state = expected.is_expected(name, &reference);
        harness.record_failure(state);
        report.failures.push(FailureReport {
            reference,
            source_line: result.assertion.source_line,
            outcome: result.outcome,
            state,
        });
    }

    debug!(
        fixture = name,
        passed = report.passed,
        failed = report.failures.len(),
        "checked fixture"
    );
    report
}

/// Load, analyze and check every fixture under `dir`.
pub fn run_harness(
    dir: &Path,
    expected: &ExpectedFailures,
    analyzer: &ContractAnalyzer,
) -> SpecResult<(HarnessResult, Vec<(FixtureReport, ContractFixture, Analysis)>)> {
    let mut harness = HarnessResult::new();
    let mut reports = Vec::new();

    for (name, fixture) in load_all_fixtures(dir)? {
        let analysis = run_fixture(&fixture, analyzer)?;
        let report = report_fixture(&name, &fixture, &analysis, expected, &mut harness);
        reports.push((report, fixture, analysis));
    }

    info!(
        fixtures = reports.len(),
        total = harness.total,
        regressions = harness.regressions,
        "harness finished"
    );
    Ok((harness, reports))
}
