//! The finding record shared by syntax checks and lint rules.

use crate::code::DiagnosticCode;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single syntax or lint finding.
///
/// Findings are built with the constructor and `with_*` methods, then
/// published to a [`FindingSink`](crate::FindingSink). After publication
/// they are treated as immutable values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// 1-based source line the finding points at, when it has one.
    pub line: Option<u32>,
    /// The severity level of this finding.
    pub severity: Severity,
    /// The numeric code of the rule (e.g. `W101`).
    pub code: DiagnosticCode,
    /// The snake_case rule identifier (e.g. `inferred_latch`).
    pub rule: String,
    /// Human-readable description of the problem.
    pub message: String,
    /// A suggested fix, if the rule has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix: Option<String>,
    /// Explanatory notes, e.g. the limits of a heuristic.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    /// Magnitude and direction of a delimiter imbalance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imbalance: Option<Imbalance>,
}

impl Finding {
    /// Creates a finding with the given severity, code, rule id and message.
    pub fn new(
        severity: Severity,
        code: DiagnosticCode,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            line: None,
            severity,
            code,
            rule: rule.into(),
            message: message.into(),
            fix: None,
            notes: Vec::new(),
            imbalance: None,
        }
    }

    /// Creates an error finding.
    pub fn error(
        code: DiagnosticCode,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Error, code, rule, message)
    }

    /// Creates a warning finding.
    pub fn warning(
        code: DiagnosticCode,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Warning, code, rule, message)
    }

    /// Creates an informational finding.
    pub fn info(code: DiagnosticCode, rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, code, rule, message)
    }

    /// Sets the source line.
    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    /// Sets the suggested fix.
    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fix = Some(fix.into());
        self
    }

    /// Adds an explanatory note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Attaches delimiter imbalance details.
    pub fn with_imbalance(mut self, imbalance: Imbalance) -> Self {
        self.imbalance = Some(imbalance);
        self
    }

    /// Returns a copy of this finding with a different severity.
    pub fn promoted_to(&self, severity: Severity) -> Self {
        Self {
            severity,
            ..self.clone()
        }
    }
}

/// Whether an imbalance is missing closers or has extra closers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImbalanceKind {
    /// More openers than closers: the closers are missing.
    MissingCloser,
    /// More closers than openers: the closers are extra.
    ExtraCloser,
}

/// A delimiter pair tracked by the balance check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delimiter {
    /// `(` and `)`.
    Parenthesis,
    /// `[` and `]`.
    Bracket,
    /// The `begin` and `end` keywords.
    BeginEnd,
}

impl Delimiter {
    /// The opening token.
    pub fn open(self) -> &'static str {
        match self {
            Delimiter::Parenthesis => "(",
            Delimiter::Bracket => "[",
            Delimiter::BeginEnd => "begin",
        }
    }

    /// The closing token.
    pub fn close(self) -> &'static str {
        match self {
            Delimiter::Parenthesis => ")",
            Delimiter::Bracket => "]",
            Delimiter::BeginEnd => "end",
        }
    }
}

/// The size and direction of a delimiter imbalance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Imbalance {
    /// The delimiter pair that does not balance.
    pub delimiter: Delimiter,
    /// How many delimiters are unmatched; always positive.
    pub magnitude: u32,
    /// Whether closers are missing or extra.
    pub kind: ImbalanceKind,
}

impl Imbalance {
    /// Builds an imbalance from the final `opens - closes` count.
    ///
    /// Returns `None` when the count is zero.
    pub fn from_count(delimiter: Delimiter, count: i64) -> Option<Self> {
        let kind = match count.signum() {
            1 => ImbalanceKind::MissingCloser,
            -1 => ImbalanceKind::ExtraCloser,
            _ => return None,
        };
        Some(Self {
            delimiter,
            magnitude: count.unsigned_abs() as u32,
            kind,
        })
    }
}

impl fmt::Display for Imbalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (open, close) = (self.delimiter.open(), self.delimiter.close());
        match self.kind {
            ImbalanceKind::MissingCloser => write!(
                f,
                "{} unclosed '{open}' (missing {} '{close}')",
                self.magnitude, self.magnitude
            ),
            ImbalanceKind::ExtraCloser => write!(f, "{} extra '{close}'", self.magnitude),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::Category;

    const W101: DiagnosticCode = DiagnosticCode::new(Category::Warning, 101);

    #[test]
    fn builder_methods() {
        let f = Finding::warning(W101, "inferred_latch", "latch inferred")
            .with_line(12)
            .with_fix("add an else branch")
            .with_note("lexical check");
        assert_eq!(f.line, Some(12));
        assert_eq!(f.severity, Severity::Warning);
        assert_eq!(f.fix.as_deref(), Some("add an else branch"));
        assert_eq!(f.notes.len(), 1);
        assert!(f.imbalance.is_none());
    }

    #[test]
    fn promotion_copies() {
        let f = Finding::info(W101, "dsp_inference", "mac").with_line(3);
        let p = f.promoted_to(Severity::Error);
        assert_eq!(p.severity, Severity::Error);
        assert_eq!(f.severity, Severity::Info);
        assert_eq!(p.line, Some(3));
    }

    #[test]
    fn imbalance_direction() {
        let missing = Imbalance::from_count(Delimiter::Parenthesis, 2).unwrap();
        assert_eq!(missing.kind, ImbalanceKind::MissingCloser);
        assert_eq!(missing.magnitude, 2);
        let extra = Imbalance::from_count(Delimiter::BeginEnd, -1).unwrap();
        assert_eq!(extra.kind, ImbalanceKind::ExtraCloser);
        assert_eq!(extra.magnitude, 1);
        assert!(Imbalance::from_count(Delimiter::Bracket, 0).is_none());
    }

    #[test]
    fn imbalance_display() {
        let missing = Imbalance::from_count(Delimiter::Parenthesis, 1).unwrap();
        assert_eq!(missing.to_string(), "1 unclosed '(' (missing 1 ')')");
        let extra = Imbalance::from_count(Delimiter::Bracket, -3).unwrap();
        assert_eq!(extra.to_string(), "3 extra ']'");
    }

    #[test]
    fn optional_fields_skipped_in_json() {
        let f = Finding::warning(W101, "inferred_latch", "latch inferred");
        let json = serde_json::to_value(&f).unwrap();
        assert!(json.get("fix").is_none());
        assert!(json.get("imbalance").is_none());
        assert_eq!(json["rule"], "inferred_latch");
        assert_eq!(json["severity"], "warning");
    }
}
