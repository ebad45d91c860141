//! Token model tying a `TokenKind` to its source span.
//!
//! A `Token` borrows its text from the scanned input, so scanning allocates
//! only the output vector. Offsets are byte offsets into that input.
//!
//! See sibling modules:
//! - `keyword.rs`    for the `Keyword` enum.
//! - `token_kind.rs` for `TokenKind` classification.
//! - `tokenizer.rs`  for producing `Vec<Token>` from raw SQL input.
use crate::sql::{keyword::Keyword, token_kind::TokenKind};

/// A lexical token with its inclusive start and exclusive end byte offsets.
///
/// Invariants:
/// - `end >= start`
/// - `text == &input[start..end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

impl<'a> Token<'a> {
    /// Construct a token covering `input[start..end]`.
    pub fn new(kind: TokenKind, input: &'a str, start: usize, end: usize) -> Self {
        Self {
            kind,
            text: &input[start..end],
            start,
            end,
        }
    }

    /// Byte length of this token (`end - start`).
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if this token represents a given keyword.
    pub fn is_keyword(&self, kw: Keyword) -> bool {
        self.kind.is_keyword(kw)
    }

    /// Returns true if the cursor (byte offset) lies within this token's span.
    ///
    /// NOTE: End is exclusive, so `cursor == end` returns false.
    pub fn contains(&self, cursor: usize) -> bool {
        cursor >= self.start && cursor < self.end
    }

    pub const fn span(&self) -> (usize, usize) {
        (self.start, self.end)
    }
}

/// The token covering `offset`, or the last token when `offset` is at the end
/// of the input.
pub fn token_at<'t, 'a>(tokens: &'t [Token<'a>], offset: usize) -> Option<&'t Token<'a>> {
    let idx = tokens.partition_point(|t| t.end <= offset);
    tokens
        .get(idx)
        .filter(|t| t.contains(offset))
        .or_else(|| tokens.last().filter(|t| t.end == offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_and_text() {
        let t = Token::new(TokenKind::Delimiter, "a, b", 1, 2);
        assert_eq!(t.len(), 1);
        assert_eq!(t.text, ",");
        assert!(!t.is_empty());
    }

    #[test]
    fn contains_is_end_exclusive() {
        let t = Token::new(TokenKind::Identifier, "Users", 0, 5);
        assert!(t.contains(2));
        assert!(!t.contains(5));
        assert_eq!(t.span(), (0, 5));
    }

    #[test]
    fn keyword_detection() {
        let t = Token::new(TokenKind::Keyword(Keyword::Select), "select", 0, 6);
        assert!(t.is_keyword(Keyword::Select));
        assert!(!t.is_keyword(Keyword::From));
    }

    #[test]
    fn token_at_finds_cursor_token() {
        let sql = "SELECT id";
        let tokens = [
            Token::new(TokenKind::Keyword(Keyword::Select), sql, 0, 6),
            Token::new(TokenKind::Whitespace, sql, 6, 7),
            Token::new(TokenKind::Identifier, sql, 7, 9),
        ];
        assert_eq!(token_at(&tokens, 0).map(|t| t.text), Some("SELECT"));
        assert_eq!(token_at(&tokens, 6).map(|t| t.text), Some(" "));
        assert_eq!(token_at(&tokens, 9).map(|t| t.text), Some("id"));
        assert_eq!(token_at(&tokens, 10), None);
        assert_eq!(token_at(&[], 0), None);
    }
}
