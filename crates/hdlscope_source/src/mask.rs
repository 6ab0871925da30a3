//! Comment and string-literal masking with offset preservation.
//!
//! Every byte inside a `//` line comment, a `/* */` block comment, or the
//! body of a string literal is replaced by a space. Newlines are kept, so
//! the masked text has exactly the same length and line structure as the
//! original. Pattern matching runs on the masked text while reported
//! positions stay faithful to what the user sees.

/// The masked text plus what the masker noticed along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskResult {
    /// The masked copy of the input, same byte length as the input.
    pub masked: String,
    /// Byte offset of a `/*` that never sees its closing `*/`.
    pub unterminated_comment: Option<usize>,
    /// Byte offset of a `"` whose string runs into a newline or end of input.
    pub unterminated_string: Option<usize>,
}

/// Masks comments and string literal contents in `source`.
pub fn mask_comments_and_strings(source: &str) -> MaskResult {
    let mut masker = Masker {
        bytes: source.as_bytes().to_vec(),
        pos: 0,
        unterminated_comment: None,
        unterminated_string: None,
    };
    masker.run();

    let masked = String::from_utf8(masker.bytes)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned());
    debug_assert_eq!(masked.len(), source.len());

    MaskResult {
        masked,
        unterminated_comment: masker.unterminated_comment,
        unterminated_string: masker.unterminated_string,
    }
}

struct Masker {
    bytes: Vec<u8>,
    pos: usize,
    unterminated_comment: Option<usize>,
    unterminated_string: Option<usize>,
}

impl Masker {
    fn peek_at(&self, offset: usize) -> u8 {
        self.bytes.get(self.pos + offset).copied().unwrap_or(0)
    }

    fn blank(&mut self, idx: usize) {
        if self.bytes[idx] != b'\n' {
            self.bytes[idx] = b' ';
        }
    }

    fn run(&mut self) {
        while self.pos < self.bytes.len() {
            match (self.peek_at(0), self.peek_at(1)) {
                (b'/', b'/') => self.line_comment(),
                (b'/', b'*') => self.block_comment(),
                (b'"', _) => self.string_literal(),
                _ => self.pos += 1,
            }
        }
    }

    fn line_comment(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos] != b'\n' {
            self.blank(self.pos);
            self.pos += 1;
        }
    }

    // Block comments do not nest in Verilog.
    fn block_comment(&mut self) {
        let start = self.pos;
        self.blank(self.pos);
        self.blank(self.pos + 1);
        self.pos += 2;
        loop {
            if self.pos >= self.bytes.len() {
                self.unterminated_comment.get_or_insert(start);
                return;
            }
            if self.bytes[self.pos] == b'*' && self.peek_at(1) == b'/' {
                self.blank(self.pos);
                self.blank(self.pos + 1);
                self.pos += 2;
                return;
            }
            self.blank(self.pos);
            self.pos += 1;
        }
    }

    // Keeps both quotes, blanks the body. Escapes skip the next byte.
    fn string_literal(&mut self) {
        let start = self.pos;
        self.pos += 1;
        loop {
            if self.pos >= self.bytes.len() || self.bytes[self.pos] == b'\n' {
                self.unterminated_string.get_or_insert(start);
                return;
            }
            match self.bytes[self.pos] {
                b'\\' => {
                    self.blank(self.pos);
                    if self.pos + 1 < self.bytes.len() {
                        self.blank(self.pos + 1);
                    }
                    self.pos += 2;
                }
                b'"' => {
                    self.pos += 1;
                    return;
                }
                _ => {
                    self.blank(self.pos);
                    self.pos += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_comment_masked() {
        let r = mask_comments_and_strings("wire a; // always @(*)\nwire b;");
        assert_eq!(r.masked, format!("wire a; {}\nwire b;", " ".repeat(14)));
    }

    #[test]
    fn block_comment_keeps_newlines() {
        let src = "a /* x\n y */ b";
        let r = mask_comments_and_strings(src);
        assert_eq!(r.masked, "a     \n      b");
        assert_eq!(r.masked.len(), src.len());
        assert!(r.unterminated_comment.is_none());
    }

    #[test]
    fn unterminated_block_comment_reported() {
        let r = mask_comments_and_strings("wire a;\n/* never closed\nwire b;");
        assert_eq!(r.unterminated_comment, Some(8));
        assert!(!r.masked.contains("wire b"));
    }

    #[test]
    fn string_body_masked_quotes_kept() {
        let r = mask_comments_and_strings("$display(\"(begin // end\");");
        assert_eq!(r.masked, format!("$display(\"{}\");", " ".repeat(13)));
    }

    #[test]
    fn escaped_quote_inside_string() {
        let r = mask_comments_and_strings(r#"x = "a\"b"; y"#);
        assert_eq!(r.masked, r#"x = "    "; y"#);
    }

    #[test]
    fn multibyte_comment_stays_same_length() {
        let src = "a; // température\nb;";
        let r = mask_comments_and_strings(src);
        assert_eq!(r.masked.len(), src.len());
        assert!(r.masked.ends_with("\nb;"));
    }
}
