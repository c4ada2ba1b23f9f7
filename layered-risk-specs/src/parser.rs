//! Parser for `.contract` fixture files.
//!
//! ```text
//! # Title
//! TERMINATION
//! The Company may terminate this Agreement without notice.
//! // comment
//! > Verdict(DO_NOT_SIGN)
//! > Score(<=60)
//! > Flag(layer=2, title="Immediate Termination", clause=1)
//! ```

use layered_risk::{LayerId, Severity, Verdict};

use crate::errors::{SpecError, SpecResult};
use crate::fixture::{Assertion, AssertionKind, CompareOp, ContractFixture, FlagPattern};

/// Parse a full `.contract` fixture file.
pub fn parse_fixture(input: &str) -> SpecResult<ContractFixture> {
    let mut title = None;
    let mut text_lines = Vec::new();
    let mut assertions = Vec::new();

    for (line_num, line) in input.lines().enumerate() {
        let trimmed = line.trim();

        if let Some(rest) = trimmed.strip_prefix("# ").filter(|_| title.is_none()) {
            title = Some(rest.trim().to_string());
        } else if let Some(rest) = trimmed.strip_prefix("> ") {
            let index = assertions.len() + 1;
            assertions.push(parse_assertion(rest, index, line_num + 1)?);
        } else if !trimmed.starts_with("//") {
            text_lines.push(line);
        }
    }

    Ok(ContractFixture {
        title,
        text: text_lines.join("\n").trim().to_string(),
        assertions,
    })
}

/// Parse a single assertion line: `Kind(body)`.
fn parse_assertion(input: &str, index: usize, source_line: usize) -> SpecResult<Assertion> {
    let input = input.trim();
    let error = |message: String| SpecError::Parse {
        line: source_line,
        message,
    };

    let paren_start = input
        .find('(')
        .ok_or_else(|| error(format!("Expected Kind(body) format: {}", input)))?;
    if !input.ends_with(')') {
        return Err(error(format!("Unclosed parenthesis: {}", input)));
    }
    let name = input[..paren_start].trim();
    let body = input[paren_start + 1..input.len() - 1].trim();

    let kind = match name {
        "Verdict" => Verdict::parse(body)
            .map(AssertionKind::Verdict)
            .ok_or_else(|| error(format!("Unknown verdict '{}'", body)))?,
        "Risk" => parse_severity(body)
            .map(AssertionKind::Risk)
            .ok_or_else(|| error(format!("Unknown severity '{}'", body)))?,
        "Score" => {
            let (op, value) = parse_comparison(body);
            let value = value
                .parse()
                .map_err(|_| error(format!("Invalid score '{}': expected number", value)))?;
            AssertionKind::Score { op, value }
        }
        "Clauses" => {
            let (op, value) = parse_comparison(body);
            let value = value
                .parse()
                .map_err(|_| error(format!("Invalid clause count '{}': expected number", value)))?;
            AssertionKind::Clauses { op, value }
        }
        "Flag" => AssertionKind::Flag(parse_flag_pattern(body, source_line)?),
        "NoFlag" => AssertionKind::NoFlag(parse_flag_pattern(body, source_line)?),
        "Positive" => AssertionKind::Positive(unquote(body).to_string()),
        other => return Err(error(format!("Unknown assertion kind '{}'", other))),
    };

    Ok(Assertion {
        index,
        kind,
        source_line,
    })
}

fn parse_severity(input: &str) -> Option<Severity> {
    match input {
        "Low" => Some(Severity::Low),
        "Medium" => Some(Severity::Medium),
        "High" => Some(Severity::High),
        _ => None,
    }
}

/// Split a leading `>=`, `<=` or `=` from the value. A bare value means equality.
fn parse_comparison(input: &str) -> (CompareOp, &str) {
    let input = input.trim();
    if let Some(rest) = input.strip_prefix(">=") {
        (CompareOp::Gte, rest.trim())
    } else if let Some(rest) = input.strip_prefix("<=") {
        (CompareOp::Lte, rest.trim())
    } else if let Some(rest) = input.strip_prefix('=') {
        (CompareOp::Equals, rest.trim())
    } else {
        (CompareOp::Equals, input)
    }
}

/// Parse `layer=2, title="...", clause=1, severity=High`.
fn parse_flag_pattern(input: &str, source_line: usize) -> SpecResult<FlagPattern> {
    let error = |message: String| SpecError::Parse {
        line: source_line,
        message,
    };
    let mut pattern = FlagPattern::default();

    for part in split_fields(input) {
        let (field, value) = part
            .split_once('=')
            .ok_or_else(|| error(format!("Invalid field '{}': expected 'field=value'", part)))?;
        let value = unquote(value.trim());

        match field.trim() {
            "layer" => {
                let layer = value
                    .parse()
                    .ok()
                    .and_then(LayerId::from_number)
                    .ok_or_else(|| error(format!("Invalid layer '{}': expected 1-7", value)))?;
                pattern.layer = Some(layer);
            }
            "title" => pattern.title = Some(value.to_string()),
            "clause" => pattern.clause = Some(value.to_string()),
            "severity" => {
                let severity = parse_severity(value)
                    .ok_or_else(|| error(format!("Unknown severity '{}'", value)))?;
                pattern.severity = Some(severity);
            }
            other => return Err(error(format!("Unknown flag field '{}'", other))),
        }
    }

    Ok(pattern)
}

/// Split on commas outside double quotes, dropping empty parts.
fn split_fields(input: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (pos, ch) in input.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                parts.push(&input[start..pos]);
                start = pos + 1;
            }
            _ => {}
        }
    }
    parts.push(&input[start..]);

    parts
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect()
}

fn unquote(input: &str) -> &str {
    input
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fixture() {
        let fixture = parse_fixture(
            "# Immediate termination\n\
             TERMINATION\n\
             // the only clause\n\
             The Company may terminate without notice.\n\
             \n\
             > Verdict(DO_NOT_SIGN)\n\
             > Score(<=60)\n",
        )
        .unwrap();

        assert_eq!(fixture.title.as_deref(), Some("Immediate termination"));
        assert_eq!(
            fixture.text,
            "TERMINATION\nThe Company may terminate without notice."
        );
        assert_eq!(fixture.assertions.len(), 2);
        assert_eq!(fixture.assertions[0].reference(), "A1");
        assert_eq!(fixture.assertions[1].source_line, 7);
        assert_eq!(
            fixture.assertions[1].kind,
            AssertionKind::Score {
                op: CompareOp::Lte,
                value: 60.0
            }
        );
    }

    #[test]
    fn test_parse_flag_with_quoted_commas() {
        let assertion =
            parse_assertion(r#"NoFlag(title="Employment Bond, Exit", layer=4)"#, 1, 1).unwrap();
        assert_eq!(
            assertion.kind,
            AssertionKind::NoFlag(FlagPattern {
                layer: Some(LayerId::EmploymentRestraint),
                title: Some("Employment Bond, Exit".to_string()),
                clause: None,
                severity: None,
            })
        );
    }

    #[test]
    fn test_parse_scalar_assertions() {
        let kinds: Vec<_> = [
            "Risk(Medium)",
            "Clauses(2)",
            "Clauses(>=1)",
            r#"Positive("Liability capped")"#,
            "Flag(clause=global, severity=Medium)",
        ]
        .iter()
        .map(|line| parse_assertion(line, 1, 1).unwrap().kind)
        .collect();

        assert_eq!(kinds[0], AssertionKind::Risk(Severity::Medium));
        assert_eq!(
            kinds[1],
            AssertionKind::Clauses {
                op: CompareOp::Equals,
                value: 2
            }
        );
        assert_eq!(
            kinds[2],
            AssertionKind::Clauses {
                op: CompareOp::Gte,
                value: 1
            }
        );
        assert_eq!(kinds[3], AssertionKind::Positive("Liability capped".to_string()));
        assert_eq!(
            kinds[4],
            AssertionKind::Flag(FlagPattern {
                clause: Some("global".to_string()),
                severity: Some(Severity::Medium),
                ..FlagPattern::default()
            })
        );
    }

    #[test]
    fn test_parse_errors_carry_line_numbers() {
        let err = parse_fixture("Some text\n> Verdict(MAYBE)").unwrap_err();
        assert_eq!(err.to_string(), "parse error at line 2: Unknown verdict 'MAYBE'");

        let err = parse_fixture("> Flag(layer=9)").unwrap_err();
        assert!(err.to_string().contains("Invalid layer '9'"));

        let err = parse_fixture("> Score(<=60").unwrap_err();
        assert!(err.to_string().contains("Unclosed parenthesis"));

        let err = parse_fixture("> Flags(layer=1)").unwrap_err();
        assert!(err.to_string().contains("Unknown assertion kind 'Flags'"));
    }
}
