//! Token kind definitions for the highlighting scanner.
//!
//! Each `TokenKind` classifies one contiguous span of the input. Together the
//! kinds cover every character: whitespace has its own kind and anything the
//! scanner does not recognise becomes `Other`, so a token stream always
//! partitions the text it came from.
//!
//! See `keyword.rs` for the `Keyword` enum and `tokenizer.rs` for scanning.

use crate::sql::keyword::Keyword;

/// Classification for a token produced by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum TokenKind {
    /// Recognized SQL keyword (matched case-insensitively).
    #[display("keyword")]
    Keyword(Keyword),
    /// Table / alias / column / generic identifier, bare or quoted.
    #[display("identifier")]
    Identifier,
    /// One or two character operator from the fixed operator set.
    #[display("operator")]
    Operator,
    /// Hexadecimal, `$`-prefixed or decimal numeric literal.
    #[display("number")]
    Number,
    /// Single quoted (or, when enabled, double quoted) string literal.
    #[display("string")]
    String,
    /// `--` line comment or any piece of a `/* */` block comment.
    #[display("comment")]
    Comment,
    /// `;`, `,` or `.`.
    #[display("delimiter")]
    Delimiter,
    /// Parenthesis, brace or a stray closing bracket.
    #[display("bracket")]
    Bracket,
    /// `@`-prefixed variable or system function (`@id`, `@@ROWCOUNT`).
    #[display("tag")]
    Tag,
    /// Run of whitespace, newlines included.
    #[display("whitespace")]
    Whitespace,
    /// A single character no rule accepted.
    #[display("other")]
    Other,
}

impl TokenKind {
    /// True if this token is the given keyword.
    pub fn is_keyword(&self, kw: Keyword) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == kw)
    }

    /// Returns the keyword if this token is a `Keyword`.
    pub fn keyword(&self) -> Option<Keyword> {
        match self {
            TokenKind::Keyword(k) => Some(*k),
            _ => None,
        }
    }

    pub fn is_identifier(&self) -> bool {
        matches!(self, TokenKind::Identifier)
    }

    /// Tokens that carry no meaning for completion context.
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Comment)
    }
}
