#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-risk/issues/"
)]

//! Specification-driven regression testing for layered-risk.
//!
//! Test cases live in `.contract` fixture files: contract text followed by
//! `> Kind(...)` assertion lines about the verdict, score and flags.
//!
//! ## Modules
//!
//! - [`parser`] - Parses `.contract` fixture files
//! - [`fixture`] - Fixture and assertion types
//! - [`loader`] - Loads fixture directories
//! - [`runner`] - Analyzes fixtures and checks assertions
//! - [`errors`] - Error types for the fixture harness
//! - [`formatter`] - Failure and summary output
//! - [`failures`] - Expected failures tracking via TOML

pub mod errors;
pub mod failures;
pub mod fixture;
pub mod formatter;
pub mod loader;
pub mod parser;
pub mod runner;

pub use errors::{SpecError, SpecResult};
pub use failures::{ExpectedFailures, FailureEntry, FailureState, HarnessResult};
pub use fixture::{Assertion, AssertionKind, CompareOp, ContractFixture, FlagPattern};
pub use formatter::{format_failure, format_summary};
pub use loader::{load_all_fixtures, load_fixture, FIXTURE_EXTENSION};
pub use parser::parse_fixture;
pub use runner::{
    check_assertion, check_fixture_assertions, report_fixture, run_fixture, run_harness,
    AssertionOutcome, AssertionResult, FailureReport, FixtureReport,
};
