//! Module range discovery.

use crate::scan::{find_semicolon, skip_keyword_block};
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static MODULE_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:module|macromodule)\s+([A-Za-z_][A-Za-z0-9_$]*)")
        .expect("module pattern is valid")
});

static MODULE_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bendmodule\b").expect("endmodule pattern is valid")
});

static SUBROUTINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(function|task)\b").expect("subroutine pattern is valid")
});

/// The byte range of one `module ... endmodule` unit in the masked text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ModuleSpan {
    /// Module name.
    pub name: String,
    /// Offset of the `module` keyword.
    pub start: usize,
    /// Offset just past the `;` closing the header, or `end` if absent.
    pub header_end: usize,
    /// Offset just past `endmodule`, or where the next module starts, or end of input.
    pub end: usize,
    /// Offset of the closing `endmodule` keyword, if present.
    pub endmodule: Option<usize>,
}

impl ModuleSpan {
    /// Returns `true` if `offset` lies inside this module.
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

/// Index of the span containing `offset`; `spans` are sorted and disjoint.
pub(crate) fn owner(spans: &[ModuleSpan], offset: usize) -> Option<usize> {
    let i = spans.partition_point(|s| s.end <= offset);
    spans.get(i).filter(|s| s.contains(offset)).map(|_| i)
}

/// Pairs every `module` keyword with the next `endmodule`.
///
/// A module followed by another `module` before any `endmodule` is closed at
/// the next module's start; one still open at end of input runs to the end.
/// Ranges are disjoint and in source order. Stray `endmodule`s are ignored.
pub(crate) fn find_modules(masked: &str) -> Vec<ModuleSpan> {
    let mut starts = MODULE_START
        .captures_iter(masked)
        .filter_map(|c| {
            let whole = c.get(0)?;
            let name = c.get(1)?;
            Some((whole.start(), name.as_str().to_string(), name.end()))
        })
        .peekable();
    let ends: Vec<Range<usize>> = MODULE_END.find_iter(masked).map(|m| m.range()).collect();

    let mut spans = Vec::new();
    let mut end_iter = ends.into_iter().peekable();
    while let Some((start, name, name_end)) = starts.next() {
        let next_start = starts.peek().map_or(masked.len(), |s| s.0);
        while end_iter.peek().is_some_and(|e| e.start < start) {
            end_iter.next();
        }
        let endmodule = match end_iter.peek() {
            Some(e) if e.start < next_start => end_iter.next(),
            _ => None,
        };
        let end = endmodule.as_ref().map_or(next_start, |e| e.end);
        let header_end = find_semicolon(masked, name_end, end).map_or(end, |i| i + 1);
        spans.push(ModuleSpan {
            name,
            start,
            header_end,
            end,
            endmodule: endmodule.map(|e| e.start),
        });
    }
    spans
}

/// Ranges of `function ... endfunction` and `task ... endtask` bodies.
///
/// Declarations inside these belong to the subroutine, not the module.
pub(crate) fn subroutine_ranges(masked: &str) -> Vec<Range<usize>> {
    let mut ranges: Vec<Range<usize>> = Vec::new();
    for m in SUBROUTINE.find_iter(masked) {
        if ranges.last().is_some_and(|r| r.contains(&m.start())) {
            continue;
        }
        let close = if m.as_str() == "function" {
            "endfunction"
        } else {
            "endtask"
        };
        let end = skip_keyword_block(masked, m.start(), masked.len(), &[m.as_str()], &[close]);
        ranges.push(m.start()..end);
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_modules() {
        let text = "module a(x); input x; endmodule\nmodule b; endmodule\n";
        let spans = find_modules(text);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].name, "a");
        assert_eq!(&text[spans[0].start..spans[0].end], "module a(x); input x; endmodule");
        assert_eq!(&text[spans[0].start..spans[0].header_end], "module a(x);");
        assert_eq!(spans[1].name, "b");
        assert!(spans[1].endmodule.is_some());
    }

    #[test]
    fn missing_endmodule_closes_at_next_module() {
        let text = "module a; wire w;\nmodule b; endmodule";
        let spans = find_modules(text);
        assert_eq!(spans.len(), 2);
        assert!(spans[0].endmodule.is_none());
        assert_eq!(spans[0].end, text.find("module b").unwrap());
        assert!(spans[1].endmodule.is_some());
    }

    #[test]
    fn owner_lookup() {
        let text = "wire top;\nmodule a; endmodule\n// gap\nmodule b; endmodule\n";
        let spans = find_modules(text);
        assert_eq!(owner(&spans, 0), None);
        assert_eq!(owner(&spans, spans[0].start), Some(0));
        assert_eq!(owner(&spans, spans[0].end - 1), Some(0));
        assert_eq!(owner(&spans, spans[0].end), None);
        assert_eq!(owner(&spans, spans[1].start + 3), Some(1));
        assert_eq!(owner(&spans, text.len()), None);
    }

    #[test]
    fn owner_lookup_many_modules() {
        let text: String = (0..5000).map(|i| format!("module m{i}; endmodule\n")).collect();
        let spans = find_modules(&text);
        assert_eq!(spans.len(), 5000);
        for (i, span) in spans.iter().enumerate().step_by(499) {
            assert_eq!(owner(&spans, span.start), Some(i));
            assert_eq!(owner(&spans, span.end - 1), Some(i));
        }
    }

    #[test]
    fn missing_endmodule_runs_to_eof() {
        let text = "module a; wire w;";
        let spans = find_modules(text);
        assert_eq!(spans[0].end, text.len());
        assert!(spans[0].endmodule.is_none());
    }

    #[test]
    fn subroutines() {
        let text = "function f; input a; f = a; endfunction\ntask t; endtask";
        let ranges = subroutine_ranges(text);
        assert_eq!(ranges.len(), 2);
        assert_eq!(&text[ranges[0].clone()], "function f; input a; f = a; endfunction");
        assert_eq!(&text[ranges[1].clone()], "task t; endtask");
    }
}
