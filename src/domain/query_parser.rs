//! Line-oriented query parser.
//!
//! One condition per line, `<field> <op> <number>`, optionally followed by the
//! conjunction keyword `AND`. Parsing never fails: malformed lines become conditions that
//! match nothing, unknown fields become conditions that match everything. Problems are
//! reported separately as [`QueryDiagnostic`]s for callers that want to show them.

use crate::domain::condition::{Condition, Operator};
use crate::domain::field_registry;
use crate::domain::numeric;

pub const CONJUNCTION: &str = "AND";

/// A problem found while parsing a query line. `line` is 1-based in the raw input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QueryDiagnostic {
    #[error("line {line}: no comparison operator (expected one of >, <, =) in '{text}'")]
    MissingOperator { line: usize, text: String },

    #[error("line {line}: '{text}' is not a number")]
    InvalidNumber { line: usize, text: String },

    #[error("line {line}: unknown field '{field}', condition ignored")]
    UnknownField { line: usize, field: String },
}

impl QueryDiagnostic {
    pub fn line(&self) -> usize {
        match self {
            QueryDiagnostic::MissingOperator { line, .. }
            | QueryDiagnostic::InvalidNumber { line, .. }
            | QueryDiagnostic::UnknownField { line, .. } => *line,
        }
    }

    /// Format the diagnostic under the source line it refers to.
    pub fn display_with_context(&self, input: &str) -> String {
        let source = input.split('\n').nth(self.line().saturating_sub(1)).unwrap_or("");
        let gutter = self.line().to_string();
        format!(
            "{gutter} | {source}\n{pad} = {err}",
            gutter = gutter,
            source = source.trim_end(),
            pad = " ".repeat(gutter.len()),
            err = self
        )
    }
}

/// Conditions in source order plus whatever problems were found along the way.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedQuery {
    pub conditions: Vec<Condition>,
    pub diagnostics: Vec<QueryDiagnostic>,
}

impl ParsedQuery {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

pub fn parse_query(text: &str) -> Vec<Condition> {
    parse_query_with_diagnostics(text).conditions
}

pub fn parse_query_with_diagnostics(text: &str) -> ParsedQuery {
    let mut parsed = ParsedQuery::default();

    for (idx, raw) in text.split('\n').enumerate() {
        let line = strip_conjunction(raw).trim();
        if line.is_empty() {
            continue;
        }
        let condition = parse_line(line);
        parsed
            .diagnostics
            .extend(diagnose(idx + 1, line, &condition));
        parsed.conditions.push(condition);
    }

    parsed
}

/// Remove one trailing conjunction keyword. The keyword must be preceded by whitespace
/// (`"X > 1 AND"` strips, `"XAND"` does not) and matches case-insensitively.
pub fn strip_conjunction(line: &str) -> &str {
    let trimmed = line.trim_end();
    let Some(split) = trimmed.len().checked_sub(CONJUNCTION.len()) else {
        return line;
    };
    let (Some(before), Some(keyword)) = (trimmed.get(..split), trimmed.get(split..)) else {
        return line;
    };
    if !keyword.eq_ignore_ascii_case(CONJUNCTION) {
        return line;
    }
    match before.chars().next_back() {
        Some(ch) if ch.is_whitespace() => before.trim_end(),
        _ => line,
    }
}

fn parse_line(line: &str) -> Condition {
    match line.find(Operator::SYMBOLS) {
        Some(at) => {
            let symbol = &line[at..at + 1];
            let value_text = &line[at + 1..];
            Condition {
                field: line[..at].trim().to_string(),
                operator: Operator::from_symbol(symbol),
                value: numeric::parse_lenient(value_text),
            }
        }
        None => Condition {
            field: line.to_string(),
            operator: Operator::Missing,
            value: f64::NAN,
        },
    }
}

fn diagnose(line_no: usize, line: &str, condition: &Condition) -> Vec<QueryDiagnostic> {
    if condition.operator == Operator::Missing {
        return vec![QueryDiagnostic::MissingOperator {
            line: line_no,
            text: line.to_string(),
        }];
    }

    let mut found = Vec::new();
    if field_registry::lookup(&condition.field).is_none() {
        found.push(QueryDiagnostic::UnknownField {
            line: line_no,
            field: condition.field.clone(),
        });
    }
    if condition.value.is_nan() {
        let text = line
            .find(Operator::SYMBOLS)
            .map(|at| line[at + 1..].trim())
            .unwrap_or("");
        found.push(QueryDiagnostic::InvalidNumber {
            line: line_no,
            text: text.to_string(),
        });
    }
    found
}

/// Rewrite query text so every non-blank line except the last one ends in ` AND`.
///
/// Blank lines are kept, so line numbers in diagnostics stay valid. Idempotent, and
/// `parse_query(&normalize_query(q)) == parse_query(q)`.
pub fn normalize_query(text: &str) -> String {
    let raw: Vec<&str> = text.split('\n').collect();
    let stripped: Vec<&str> = raw
        .iter()
        .map(|line| strip_conjunction(line).trim_end())
        .collect();
    let last_content = stripped.iter().rposition(|l| !l.trim().is_empty());

    stripped
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            if line.trim().is_empty() {
                String::new()
            } else if Some(idx) != last_content {
                format!("{} {}", line, CONJUNCTION)
            } else if strip_conjunction(line) != *line {
                // "X AND AND": the parser strips only once, so keep the raw line.
                raw[idx].trim_end().to_string()
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Serialize conditions back into normalized query text.
///
/// Every line but the last ends in ` AND`. A last line whose text itself ends in the
/// keyword gets one more, since the parser strips exactly one.
pub fn render_query(conditions: &[Condition]) -> String {
    let last = conditions.len().saturating_sub(1);
    conditions
        .iter()
        .enumerate()
        .map(|(idx, condition)| {
            let text = condition.to_string();
            if idx != last || strip_conjunction(&text) != text {
                format!("{} {}", text, CONJUNCTION)
            } else {
                text
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
