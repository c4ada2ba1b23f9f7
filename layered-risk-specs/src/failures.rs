//! Expected failures tracking via TOML file.
//!
//! ```toml
//! [[known]]
//! fixture = "notice-overflow.contract"
//! assertion = "A2"
//! reason = "Notice periods above u32::MAX are skipped"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::SpecError;

/// Loaded expected failures configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpectedFailures {
    /// Known failures (won't fix soon).
    #[serde(default)]
    pub known: Vec<FailureEntry>,
    /// Pending failures (awaiting fix).
    #[serde(default)]
    pub pending: Vec<FailureEntry>,
}

/// A single expected failure entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureEntry {
    /// Fixture file name, relative to the fixture directory.
    pub fixture: String,
    /// Assertion reference (e.g., "A3" for the third assertion).
    pub assertion: String,
    #[serde(default)]
    pub reason: Option<String>,
    /// Date added (YYYY-MM-DD).
    #[serde(default)]
    pub added: Option<String>,
    #[serde(default)]
    pub issue: Option<String>,
}

/// Failure lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureState {
    /// Known limitation, won't fix soon.
    Known,
    /// Awaiting fix, not blocking.
    Pending,
    /// Expected to pass - failure is a regression.
    Regression,
}

impl ExpectedFailures {
    /// Load from a TOML file. A missing file means no expected failures.
    pub fn load(path: &Path) -> Result<Self, SpecError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let load_error = |message: String| SpecError::Load {
            path: path.display().to_string(),
            message,
        };
        let content = fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
        toml::from_str(&content).map_err(|e| load_error(e.to_string()))
    }

    pub fn is_expected(&self, fixture: &str, assertion_ref: &str) -> FailureState {
        if self.find(&self.known, fixture, assertion_ref).is_some() {
            FailureState::Known
        } else if self.find(&self.pending, fixture, assertion_ref).is_some() {
            FailureState::Pending
        } else {
            FailureState::Regression
        }
    }

    fn find<'a>(
        &self,
        entries: &'a [FailureEntry],
        fixture: &str,
        assertion_ref: &str,
    ) -> Option<&'a FailureEntry> {
        entries
            .iter()
            .find(|e| e.fixture == fixture && e.assertion == assertion_ref)
    }

    /// Count total expected failures.
    pub fn count(&self) -> usize {
        self.known.len() + self.pending.len()
    }

    /// Get entry for a specific failure (if expected).
    pub fn get_entry(&self, fixture: &str, assertion_ref: &str) -> Option<&FailureEntry> {
        self.find(&self.known, fixture, assertion_ref)
            .or_else(|| self.find(&self.pending, fixture, assertion_ref))
    }
}

/// Result of running the harness.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HarnessResult {
    pub total: usize,
    pub passed: usize,
    /// Expected failures (known + pending).
    pub expected_failures: usize,
    /// Unexpected failures.
    pub regressions: usize,
}

impl HarnessResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// 0 = pass, 1 = regressions.
    pub fn exit_code(&self) -> i32 {
        if self.regressions > 0 {
            1
        } else {
            0
        }
    }

    pub fn success(&self) -> bool {
        self.regressions == 0
    }

    pub fn record_pass(&mut self) {
        self.total += 1;
        self.passed += 1;
    }

    pub fn record_failure(&mut self, state: FailureState) {
        self.total += 1;
        match state {
            FailureState::Known | FailureState::Pending => self.expected_failures += 1,
            FailureState::Regression => self.regressions += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn entry(fixture: &str, assertion: &str) -> FailureEntry {
        FailureEntry {
            fixture: fixture.to_string(),
            assertion: assertion.to_string(),
            reason: None,
            added: None,
            issue: None,
        }
    }

    #[test]
    fn test_unlisted_failure_is_regression() {
        let failures = ExpectedFailures::default();
        assert_eq!(failures.count(), 0);
        assert_eq!(
            failures.is_expected("a.contract", "A1"),
            FailureState::Regression
        );
    }

    #[test]
    fn test_known_takes_precedence_over_pending() {
        let failures = ExpectedFailures {
            known: vec![entry("a.contract", "A1")],
            pending: vec![entry("a.contract", "A1"), entry("b.contract", "A2")],
        };
        assert_eq!(failures.is_expected("a.contract", "A1"), FailureState::Known);
        assert_eq!(failures.is_expected("b.contract", "A2"), FailureState::Pending);
        assert_eq!(failures.is_expected("b.contract", "A1"), FailureState::Regression);
        assert!(failures.get_entry("b.contract", "A2").is_some());
    }

    #[test]
    fn test_load_from_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[[known]]
fixture = "a.contract"
assertion = "A3"
reason = "Known issue"

[[pending]]
fixture = "b.contract"
assertion = "A1"
added = "2026-01-06"
"#
        )
        .unwrap();

        let failures = ExpectedFailures::load(file.path()).unwrap();
        assert_eq!(failures.count(), 2);
        assert_eq!(failures.known[0].reason.as_deref(), Some("Known issue"));
        assert_eq!(failures.is_expected("b.contract", "A1"), FailureState::Pending);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let failures = ExpectedFailures::load(Path::new("/no/such/expected-failures.toml")).unwrap();
        assert_eq!(failures.count(), 0);
    }

    #[test]
    fn test_load_invalid_toml_is_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[[known]]\nfixture = ").unwrap();
        assert!(matches!(
            ExpectedFailures::load(file.path()),
            Err(SpecError::Load { .. })
        ));
    }

    #[test]
    fn test_harness_result_record() {
        let mut result = HarnessResult::new();
        result.record_pass();
        result.record_failure(FailureState::Known);
        assert!(result.success());

        result.record_failure(FailureState::Regression);
        assert_eq!(result.total, 3);
        assert_eq!(result.passed, 1);
        assert_eq!(result.expected_failures, 1);
        assert_eq!(result.exit_code(), 1);
    }
}
