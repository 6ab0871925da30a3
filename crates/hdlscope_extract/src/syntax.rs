//! Syntax findings: delimiter balance and a few structural slips.
//!
//! None of these checks stop extraction; they only report.

use crate::modules::ModuleSpan;
use crate::scan::{ident_at, is_ident_byte, is_ident_start};
use hdlscope_diagnostics::{
    Category, Delimiter, DiagnosticCode, Finding, FindingSink, Imbalance, ImbalanceKind,
};
use hdlscope_source::SourceText;

/// `unbalanced_parentheses`
pub const E101: DiagnosticCode = DiagnosticCode::new(Category::Syntax, 101);
/// `unbalanced_brackets`
pub const E102: DiagnosticCode = DiagnosticCode::new(Category::Syntax, 102);
/// `unbalanced_begin_end`
pub const E103: DiagnosticCode = DiagnosticCode::new(Category::Syntax, 103);
/// `missing_semicolon`
pub const E104: DiagnosticCode = DiagnosticCode::new(Category::Syntax, 104);
/// `unterminated_comment`
pub const E105: DiagnosticCode = DiagnosticCode::new(Category::Syntax, 105);
/// `missing_endmodule`
pub const E106: DiagnosticCode = DiagnosticCode::new(Category::Syntax, 106);
/// `unterminated_string`
pub const E107: DiagnosticCode = DiagnosticCode::new(Category::Syntax, 107);

const SEMICOLON_STARTERS: [&str; 4] = ["assign", "wire", "reg", "localparam"];

const STATEMENT_STARTERS: [&str; 21] = [
    "assign", "wire", "reg", "logic", "integer", "localparam", "parameter", "input", "output",
    "inout", "always", "always_ff", "always_comb", "always_latch", "initial", "module",
    "endmodule", "genvar", "generate", "function", "task",
];

/// Tracks unmatched openers and the first extra closer of one delimiter.
#[derive(Default)]
struct Balance {
    open: Vec<usize>,
    first_extra: Option<usize>,
    opens: i64,
    closes: i64,
}

impl Balance {
    fn open(&mut self, at: usize) {
        self.opens += 1;
        self.open.push(at);
    }

    fn close(&mut self, at: usize) {
        self.closes += 1;
        if self.open.pop().is_none() && self.first_extra.is_none() {
            self.first_extra = Some(at);
        }
    }

    /// The finding for a non-zero `opens - closes`, if any.
    ///
    /// Missing closers point at the last unmatched opener; extra closers
    /// point at the first one.
    fn finding(
        &self,
        source: &SourceText,
        delimiter: Delimiter,
        code: DiagnosticCode,
        rule: &str,
    ) -> Option<Finding> {
        let imbalance = Imbalance::from_count(delimiter, self.opens - self.closes)?;
        let at = match imbalance.kind {
            ImbalanceKind::MissingCloser => self.open.last().copied(),
            ImbalanceKind::ExtraCloser => self.first_extra,
        };
        let (open, close) = (delimiter.open(), delimiter.close());
        let fix = match imbalance.kind {
            ImbalanceKind::MissingCloser => format!("add {} '{close}'", imbalance.magnitude),
            ImbalanceKind::ExtraCloser => format!("remove {} '{close}'", imbalance.magnitude),
        };
        let message = format!("unbalanced '{open}'/'{close}': {imbalance}");
        let mut finding = Finding::error(code, rule, message)
            .with_imbalance(imbalance)
            .with_fix(fix);
        if let Some(at) = at {
            finding = finding.with_line(source.line_of(at));
        }
        Some(finding)
    }
}

/// Counts `(`/`)`, `[`/`]` and `begin`/`end` over the masked text.
pub(crate) fn check_balance(source: &SourceText, sink: &FindingSink) {
    let text = source.masked();
    let bytes = text.as_bytes();
    let mut parens = Balance::default();
    let mut brackets = Balance::default();
    let mut blocks = Balance::default();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'(' => parens.open(i),
            b')' => parens.close(i),
            b'[' => brackets.open(i),
            b']' => brackets.close(i),
            b if is_ident_start(b) && (i == 0 || !is_ident_byte(bytes[i - 1])) => {
                let end = ident_at(text, i, bytes.len()).unwrap_or(i + 1);
                match &text[i..end] {
                    "begin" => blocks.open(i),
                    "end" => blocks.close(i),
                    _ => {}
                }
                i = end;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    let checks = [
        (parens, Delimiter::Parenthesis, E101, "unbalanced_parentheses"),
        (brackets, Delimiter::Bracket, E102, "unbalanced_brackets"),
        (blocks, Delimiter::BeginEnd, E103, "unbalanced_begin_end"),
    ];
    for (balance, delimiter, code, rule) in checks {
        if let Some(finding) = balance.finding(source, delimiter, code, rule) {
            sink.emit(finding);
        }
    }
}

/// Reports a `/*` that never closes.
pub(crate) fn check_unterminated_comment(source: &SourceText, sink: &FindingSink) {
    if let Some(at) = source.unterminated_comment() {
        sink.emit(
            Finding::error(E105, "unterminated_comment", "block comment is never closed")
                .with_line(source.line_of(at))
                .with_fix("add '*/'")
                .with_note("the rest of the file is treated as comment"),
        );
    }
}

/// Reports the first string literal with no closing quote on its line.
pub(crate) fn check_unterminated_string(source: &SourceText, sink: &FindingSink) {
    if let Some(at) = source.unterminated_string() {
        sink.emit(
            Finding::error(E107, "unterminated_string", "string literal is never closed")
                .with_line(source.line_of(at))
                .with_fix("add the closing '\"'")
                .with_note("the literal is taken to end at the end of its line"),
        );
    }
}

/// Reports modules with no matching `endmodule`.
pub(crate) fn check_missing_endmodule(
    source: &SourceText,
    spans: &[ModuleSpan],
    sink: &FindingSink,
) {
    for span in spans.iter().filter(|s| s.endmodule.is_none()) {
        let message = format!("module '{}' has no matching 'endmodule'", span.name);
        sink.emit(
            Finding::error(E106, "missing_endmodule", message)
                .with_line(source.line_of(span.start))
                .with_fix("add 'endmodule'"),
        );
    }
}

fn first_word(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let end = ident_at(trimmed, 0, trimmed.len())?;
    Some(&trimmed[..end])
}

/// Reports a declaration line without `;` followed by a new statement.
pub(crate) fn check_missing_semicolons(source: &SourceText, sink: &FindingSink) {
    let count = source.line_count();
    for line in 1..=count {
        let text = source.masked_line(line);
        let Some(word) = first_word(text) else {
            continue;
        };
        if !SEMICOLON_STARTERS.contains(&word) || text.contains(';') {
            continue;
        }
        let next = (line + 1..=count)
            .map(|n| source.masked_line(n))
            .find(|l| !l.trim().is_empty());
        let starts_statement = next
            .and_then(first_word)
            .is_some_and(|w| STATEMENT_STARTERS.contains(&w));
        if starts_statement {
            let message = format!("'{word}' statement is missing its ';'");
            sink.emit(
                Finding::error(E104, "missing_semicolon", message)
                    .with_line(line)
                    .with_fix("add ';' at the end of the line"),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::find_modules;

    fn run(text: &str) -> Vec<Finding> {
        let source = SourceText::new(text);
        let sink = FindingSink::new();
        check_balance(&source, &sink);
        check_unterminated_comment(&source, &sink);
        check_unterminated_string(&source, &sink);
        check_missing_endmodule(&source, &find_modules(source.masked()), &sink);
        check_missing_semicolons(&source, &sink);
        sink.take_all()
    }

    #[test]
    fn balanced_text_is_clean() {
        let text = "module m(input a, output y);\n  assign y = (a);\n  always @(*) begin\n  end\nendmodule\n";
        assert!(run(text).is_empty());
    }

    #[test]
    fn missing_paren() {
        let findings = run("module m;\n  assign x = (a + b;\nendmodule");
        assert_eq!(findings.len(), 1);
        let f = &findings[0];
        assert_eq!(f.rule, "unbalanced_parentheses");
        assert_eq!(f.code.to_string(), "E101");
        assert_eq!(f.line, Some(2));
        let imbalance = f.imbalance.unwrap();
        assert_eq!(imbalance.kind, ImbalanceKind::MissingCloser);
        assert_eq!(imbalance.magnitude, 1);
    }

    #[test]
    fn extra_bracket_points_at_first_extra() {
        let findings = run("module m;\n  wire [3:0]] a;\n  wire b]];\nendmodule");
        let f = &findings[0];
        assert_eq!(f.rule, "unbalanced_brackets");
        assert_eq!(f.line, Some(2));
        let imbalance = f.imbalance.unwrap();
        assert_eq!(imbalance.kind, ImbalanceKind::ExtraCloser);
        assert_eq!(imbalance.magnitude, 3);
    }

    #[test]
    fn begin_end_words_only() {
        let text = "module m;\n  always @(*) begin\n    case (s) endcase\nendmodule";
        let findings = run(text);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, "unbalanced_begin_end");
        assert_eq!(findings[0].line, Some(2));
    }

    #[test]
    fn delimiters_in_comments_ignored() {
        let text = "module m; // ((( begin\n  /* ] */ wire a;\nendmodule";
        assert!(run(text).is_empty());
    }

    #[test]
    fn unterminated_comment_reported() {
        let findings = run("module m;\n/* open\nwire a;\n");
        let rules: Vec<&str> = findings.iter().map(|f| f.rule.as_str()).collect();
        assert_eq!(rules, vec!["unterminated_comment", "missing_endmodule"]);
        assert_eq!(findings[0].line, Some(2));
        assert_eq!(findings[1].line, Some(1));
    }

    #[test]
    fn unterminated_string_reported() {
        // masking runs to the end of the line, so no delimiter is left open
        let text = "module m;\n  parameter NAME = \"abc;\n  wire a;\nendmodule\n";
        let findings = run(text);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, "unterminated_string");
        assert_eq!(findings[0].code.to_string(), "E107");
        assert_eq!(findings[0].line, Some(2));
    }

    #[test]
    fn closed_and_escaped_strings_are_clean() {
        let text = "module m;\n  initial $display(\"a \\\" b\");\nendmodule\n";
        assert!(run(text).is_empty());
    }

    #[test]
    fn missing_semicolon_before_next_statement() {
        let findings = run("module m;\n  wire a\n\n  assign a = 1;\nendmodule");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, "missing_semicolon");
        assert_eq!(findings[0].line, Some(2));
    }

    #[test]
    fn continued_declaration_is_fine() {
        let text = "module m;\n  wire a,\n       b;\nendmodule";
        assert!(run(text).is_empty());
    }
}
