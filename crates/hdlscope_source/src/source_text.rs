//! The analyzed source text with its masked copy and line index.

use crate::line_index::LineIndex;
use crate::mask::mask_comments_and_strings;
use hdlscope_common::ContentHash;

/// One HDL source text prepared for analysis.
///
/// Masking and line indexing happen once at construction; every
/// sub-extractor and lint rule then shares the same prepared text.
#[derive(Debug, Clone)]
pub struct SourceText {
    original: String,
    masked: String,
    index: LineIndex,
    unterminated_comment: Option<usize>,
    unterminated_string: Option<usize>,
}

impl SourceText {
    /// Prepares `text` for analysis.
    pub fn new(text: &str) -> Self {
        let mask = mask_comments_and_strings(text);
        Self {
            original: text.to_string(),
            masked: mask.masked,
            index: LineIndex::new(text),
            unterminated_comment: mask.unterminated_comment,
            unterminated_string: mask.unterminated_string,
        }
    }

    /// The text exactly as supplied by the caller.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// The text with comments and string bodies replaced by spaces.
    pub fn masked(&self) -> &str {
        &self.masked
    }

    /// Converts a byte offset into a 1-based line number.
    pub fn line_of(&self, offset: usize) -> u32 {
        self.index.line_of(offset)
    }

    /// Returns the original text of a 1-based line, without its newline.
    pub fn line(&self, line: u32) -> &str {
        self.slice_line(&self.original, line)
    }

    /// Returns the masked text of a 1-based line, without its newline.
    pub fn masked_line(&self, line: u32) -> &str {
        self.slice_line(&self.masked, line)
    }

    /// Returns the number of lines in the text.
    pub fn line_count(&self) -> u32 {
        self.index.line_count()
    }

    /// Byte offset of an unterminated `/*`, if any.
    pub fn unterminated_comment(&self) -> Option<usize> {
        self.unterminated_comment
    }

    /// Byte offset of an unterminated string literal, if any.
    pub fn unterminated_string(&self) -> Option<usize> {
        self.unterminated_string
    }

    /// Hash of the original text.
    pub fn content_hash(&self) -> ContentHash {
        ContentHash::of_text(&self.original)
    }

    fn slice_line<'a>(&self, text: &'a str, line: u32) -> &'a str {
        match self.index.line_range(line) {
            Some((start, end)) => text[start..end].trim_end_matches('\r'),
            None => "",
        }
    }
}
