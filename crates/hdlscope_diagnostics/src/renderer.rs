//! Rendering findings for human consumption.

use crate::finding::Finding;
use crate::severity::Severity;
use hdlscope_source::SourceText;

/// Trait for rendering findings into formatted output strings.
pub trait FindingRenderer {
    /// Renders a single finding; `path` names the file in the location line.
    fn render(&self, finding: &Finding, path: &str, source: &SourceText) -> String;
}

/// Renders findings in a rustc-style terminal format.
///
/// Produces output like:
/// ```text
/// warning[W101]: latch inferred for 'out' in combinational block
///   --> src/top.v:9
///    |
///  9 |     end
///    |
///    = note: ...
///    = help: ...
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, severity: Severity, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        let code = match severity {
            Severity::Error => "31",
            Severity::Warning => "33",
            Severity::Info => "36",
        };
        format!("\x1b[1;{code}m{text}\x1b[0m")
    }
}

impl FindingRenderer for TerminalRenderer {
    fn render(&self, finding: &Finding, path: &str, source: &SourceText) -> String {
        let mut out = String::new();

        let header = format!("{}[{}]", finding.severity, finding.code);
        out.push_str(&format!(
            "{}: {} ({})\n",
            self.paint(finding.severity, &header),
            finding.message,
            finding.rule
        ));

        if let Some(line) = finding.line {
            let line_num = line.to_string();
            let padding = " ".repeat(line_num.len());
            out.push_str(&format!("{padding}--> {path}:{line}\n"));
            out.push_str(&format!("{padding} |\n"));
            out.push_str(&format!("{line_num} | {}\n", source.line(line)));
            out.push_str(&format!("{padding} |\n"));
        } else {
            out.push_str(&format!("  --> {path}\n"));
        }

        if let Some(imbalance) = &finding.imbalance {
            out.push_str(&format!("   = note: {imbalance}\n"));
        }
        for note in &finding.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        if let Some(fix) = &finding.fix {
            out.push_str(&format!("   = help: {fix}\n"));
        }

        out
    }
}
