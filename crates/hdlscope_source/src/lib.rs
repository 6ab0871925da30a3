//! Source text handling shared by the extractor and the lint rules.
//!
//! [`SourceText`] owns the original HDL text, a comment- and string-masked
//! copy with identical byte offsets, and a [`LineIndex`] for converting
//! byte offsets into the 1-based line numbers every finding reports.

#![warn(missing_docs)]

pub mod line_index;
pub mod mask;
pub mod source_text;

pub use line_index::LineIndex;
pub use mask::{mask_comments_and_strings, MaskResult};
pub use source_text::SourceText;
