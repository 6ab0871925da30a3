//! Line-start indexing for fast offset-to-line lookup.

/// Precomputed byte offsets of every line start in a text.
///
/// Built once per analysis pass and binary searched, so resolving a match
/// offset to its line costs `O(log n)` instead of rescanning the text from
/// the start. The result is identical to counting the newlines preceding
/// the offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offsets of each line start (the first entry is always 0).
    line_starts: Vec<u32>,
    /// Total length of the indexed text in bytes.
    len: u32,
}

impl LineIndex {
    /// Builds the index for the given text.
    pub fn new(text: &str) -> Self {
        Self {
            line_starts: compute_line_starts(text),
            len: text.len() as u32,
        }
    }

    /// Converts a byte offset into a 1-based line number.
    ///
    /// Offsets past the end of the text resolve to the last line.
    pub fn line_of(&self, byte_offset: usize) -> u32 {
        let offset = (byte_offset as u32).min(self.len);
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        (line_idx as u32) + 1
    }

    /// Returns the byte range `[start, end)` of a 1-based line, excluding its newline.
    pub fn line_range(&self, line: u32) -> Option<(usize, usize)> {
        let idx = line.checked_sub(1)? as usize;
        let start = *self.line_starts.get(idx)? as usize;
        let end = match self.line_starts.get(idx + 1) {
            Some(next) => (*next as usize).saturating_sub(1),
            None => self.len as usize,
        };
        Some((start, end.max(start)))
    }

    /// Returns the number of lines in the text (an empty text has one line).
    pub fn line_count(&self) -> u32 {
        self.line_starts.len() as u32
    }
}

/// Computes the byte offsets of each line start in the given content.
fn compute_line_starts(content: &str) -> Vec<u32> {
    let mut starts = vec![0u32];
    for (i, byte) in content.bytes().enumerate() {
        if byte == b'\n' {
            starts.push((i + 1) as u32);
        }
    }
    starts
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The naive definition: one plus the number of newlines before the offset.
    fn naive_line(text: &str, offset: usize) -> u32 {
        text[..offset].bytes().filter(|b| *b == b'\n').count() as u32 + 1
    }

    #[test]
    fn line_starts_computation() {
        let idx = LineIndex::new("abc\ndef\nghi");
        assert_eq!(idx.line_starts, vec![0, 4, 8]);
    }

    #[test]
    fn matches_naive_newline_count() {
        let text = "module top;\n  wire a;\n\n  assign a = 1'b0;\nendmodule\n";
        let idx = LineIndex::new(text);
        for offset in 0..=text.len() {
            assert_eq!(idx.line_of(offset), naive_line(text, offset), "offset {offset}");
        }
    }

    #[test]
    fn line_ranges_exclude_newline() {
        let text = "ab\ncd\n";
        let idx = LineIndex::new(text);
        assert_eq!(idx.line_range(1), Some((0, 2)));
        assert_eq!(idx.line_range(2), Some((3, 5)));
        assert_eq!(idx.line_range(3), Some((6, 6)));
        assert_eq!(idx.line_range(0), None);
        assert_eq!(idx.line_range(4), None);
    }

    #[test]
    fn empty_text() {
        let idx = LineIndex::new("");
        assert_eq!(idx.line_count(), 1);
        assert_eq!(idx.line_of(0), 1);
    }
}
