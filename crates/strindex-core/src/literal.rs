//! String and text-block literal tokens
//!
//! A [`LiteralToken`] is the raw source spelling of one literal together with
//! where it sits in the document and where its content (the part between the
//! delimiters) begins and ends.

use rowan::{TextRange, TextSize};

/// Which flavour of string literal a token is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    /// `"..."` on a single line
    SimpleString,
    /// `"""` newline ... `"""`
    TextBlock,
}

impl LiteralKind {
    pub const fn delimiter(self) -> &'static str {
        match self {
            LiteralKind::SimpleString => "\"",
            LiteralKind::TextBlock => "\"\"\"",
        }
    }

    pub const fn delimiter_len(self) -> usize {
        self.delimiter().len()
    }
}

/// Raw literal text with its source and content ranges
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralToken {
    kind: LiteralKind,
    text: String,
    range: TextRange,
    content_range: TextRange,
}

impl LiteralToken {
    /// Build from the literal's full source text (delimiters included) and
    /// the document offset it starts at
    ///
    /// An unterminated literal has its content run to the end of the text.
    pub fn new(kind: LiteralKind, text: impl Into<String>, start: TextSize) -> Self {
        let text = text.into();
        let len = TextSize::of(text.as_str());
        let delimiter = TextSize::from(kind.delimiter_len() as u32);
        let range = TextRange::at(start, len);

        let content_start = delimiter.min(len);
        let content_end = if is_terminated(kind, &text) {
            len - delimiter
        } else {
            len
        };
        let content_range = TextRange::new(
            start + content_start,
            start + content_end.max(content_start),
        );

        Self {
            kind,
            text,
            range,
            content_range,
        }
    }

    pub fn kind(&self) -> LiteralKind {
        self.kind
    }

    /// Full source text including delimiters
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Document range of the whole literal
    pub fn range(&self) -> TextRange {
        self.range
    }

    /// Document range of the content between the delimiters
    pub fn content_range(&self) -> TextRange {
        self.content_range
    }

    /// Raw (undecoded) content between the delimiters
    pub fn raw_content(&self) -> &str {
        let relative = self.content_range - self.range.start();
        &self.text[relative]
    }

    /// Whether the literal has its closing delimiter
    pub fn is_terminated(&self) -> bool {
        self.content_range.end() < self.range.end()
    }

    /// Whether a caret at `offset` sits in the content
    ///
    /// Both ends are inclusive: a caret right after the opening delimiter or
    /// right before the closing one is still inside.
    pub fn content_contains(&self, offset: TextSize) -> bool {
        self.content_range.start() <= offset && offset <= self.content_range.end()
    }
}

/// Whether `text` ends with an unescaped closing delimiter
fn is_terminated(kind: LiteralKind, text: &str) -> bool {
    let delimiter = kind.delimiter();
    let bytes = text.as_bytes();
    let open = delimiter.len();
    if bytes.len() < open * 2 || !text.ends_with(delimiter) {
        return false;
    }
    let close = bytes.len() - open;
    let mut i = open;
    while i < close {
        if bytes[i] == b'\\' {
            // Escaped character may not be the first quote of the delimiter
            if i + 1 == close {
                return false;
            }
            i += 2;
        } else {
            i += 1;
        }
    }
    i == close
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_string_ranges() {
        let token = LiteralToken::new(LiteralKind::SimpleString, "\"abc\"", 10.into());
        assert_eq!(token.range(), TextRange::new(10.into(), 15.into()));
        assert_eq!(token.content_range(), TextRange::new(11.into(), 14.into()));
        assert_eq!(token.raw_content(), "abc");
    }

    #[test]
    fn test_content_contains_is_inclusive() {
        let token = LiteralToken::new(LiteralKind::SimpleString, "\"abc\"", 0.into());
        assert!(!token.content_contains(0.into()));
        assert!(token.content_contains(1.into()));
        assert!(token.content_contains(4.into()));
        assert!(!token.content_contains(5.into()));
    }

    #[test]
    fn test_unterminated_string_runs_to_end() {
        let token = LiteralToken::new(LiteralKind::SimpleString, "\"ab\\\"", 0.into());
        assert_eq!(token.raw_content(), "ab\\\"");
        assert!(!token.is_terminated());

        let token = LiteralToken::new(LiteralKind::SimpleString, "\"", 0.into());
        assert_eq!(token.raw_content(), "");
    }

    #[test]
    fn test_text_block_ranges() {
        let text = "\"\"\"\n    hi\n    \"\"\"";
        let token = LiteralToken::new(LiteralKind::TextBlock, text, 0.into());
        assert_eq!(token.raw_content(), "\n    hi\n    ");
    }

    #[test]
    fn test_text_block_escaped_closing_quote() {
        let text = "\"\"\"\n  a\\\"\"\"";
        let token = LiteralToken::new(LiteralKind::TextBlock, text, 0.into());
        assert_eq!(token.raw_content(), "\n  a\\\"\"\"");
    }
}
