//! Core types for parsed `.contract` fixture files.

use std::fmt;

use layered_risk::{Flag, LayerId, Severity, Verdict};
use serde::{Deserialize, Serialize};

/// A parsed `.contract` fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractFixture {
    /// Optional title from `# Title` header
    pub title: Option<String>,
    /// Contract text with assertions and comments removed
    pub text: String,
    pub assertions: Vec<Assertion>,
}

impl ContractFixture {
    pub fn empty() -> Self {
        Self {
            title: None,
            text: String::new(),
            assertions: Vec::new(),
        }
    }
}

/// One `> Kind(...)` line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assertion {
    /// 1-based position among the fixture's assertions.
    pub index: usize,
    pub kind: AssertionKind,
    /// Source line number for error reporting
    pub source_line: usize,
}

impl Assertion {
    /// Reference used by the expected-failures ledger, e.g. `A3`.
    pub fn reference(&self) -> String {
        format!("A{}", self.index)
    }
}

/// What an assertion checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AssertionKind {
    Verdict(Verdict),
    Risk(Severity),
    Score { op: CompareOp, value: f64 },
    Clauses { op: CompareOp, value: usize },
    /// At least one flag matches.
    Flag(FlagPattern),
    /// No flag matches.
    NoFlag(FlagPattern),
    /// A positive finding with exactly this text.
    Positive(String),
}

/// Comparison operators for numeric checks.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum CompareOp {
    #[default]
    Equals,
    Gte,
    Lte,
}

impl CompareOp {
    pub fn holds<T: PartialOrd>(self, actual: T, expected: T) -> bool {
        match self {
            CompareOp::Equals => actual == expected,
            CompareOp::Gte => actual >= expected,
            CompareOp::Lte => actual <= expected,
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CompareOp::Equals => "=",
            CompareOp::Gte => ">=",
            CompareOp::Lte => "<=",
        })
    }
}

/// Fields a flag must carry. Unset fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagPattern {
    pub layer: Option<LayerId>,
    pub title: Option<String>,
    /// Clause id, or `global` for document-wide flags.
    pub clause: Option<String>,
    pub severity: Option<Severity>,
}

impl FlagPattern {
    pub fn matches(&self, flag: &Flag) -> bool {
        self.layer.map_or(true, |layer| flag.layer == layer)
            && self.title.as_deref().map_or(true, |title| flag.title == title)
            && self.clause.as_deref().map_or(true, |clause| flag.scope() == clause)
            && self.severity.map_or(true, |severity| flag.severity == severity)
    }
}

impl fmt::Display for FlagPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields = Vec::new();
        if let Some(layer) = self.layer {
            fields.push(format!("layer={}", layer.number()));
        }
        if let Some(title) = &self.title {
            fields.push(format!("title={:?}", title));
        }
        if let Some(clause) = &self.clause {
            fields.push(format!("clause={}", clause));
        }
        if let Some(severity) = self.severity {
            fields.push(format!("severity={}", severity));
        }
        f.write_str(&fields.join(", "))
    }
}

impl fmt::Display for AssertionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssertionKind::Verdict(verdict) => write!(f, "Verdict({})", verdict),
            AssertionKind::Risk(severity) => write!(f, "Risk({})", severity),
            AssertionKind::Score { op, value } => write!(f, "Score({}{})", op, value),
            AssertionKind::Clauses { op, value } => write!(f, "Clauses({}{})", op, value),
            AssertionKind::Flag(pattern) => write!(f, "Flag({})", pattern),
            AssertionKind::NoFlag(pattern) => write!(f, "NoFlag({})", pattern),
            AssertionKind::Positive(text) => write!(f, "Positive({:?})", text),
        }
    }
}
