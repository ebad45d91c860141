//! Lexical SQL scanning for syntax highlighting.
//!
//! The scanner is a small finite-state machine over raw text. It never builds
//! an AST and never fails: every byte of the input ends up in exactly one
//! token, which is what the highlighter needs on every keystroke.
//!
//! Modules:
//! - `keyword`    : The fixed, case-insensitive keyword set.
//! - `operator`   : The fixed one and two character operator set.
//! - `scan_state` : Scanner states and the `"` resolution option.
//! - `token_kind` : Classification of lexical atoms.
//! - `token`      : Token struct pairing a `TokenKind` with its source span.
//! - `tokenizer`  : The `Scanner` and the `scan` entry points.
//!
//! Example:
//! ```rust
//! use qassist::prelude::*;
//!
//! let tokens = scan("SELECT a FROM my_table");
//! assert!(tokens.iter().any(|t| t.is_keyword(Keyword::Select)));
//! assert!(tokens.iter().any(|t| t.text == "my_table"));
//! ```

pub mod keyword;
pub mod operator;
pub mod scan_state;
pub mod token;
pub mod token_kind;
pub mod tokenizer;

pub use keyword::Keyword;
pub use scan_state::{DoubleQuote, ScanOptions, ScanState};
pub use token::{Token, token_at};
pub use token_kind::TokenKind;
pub use tokenizer::{Scanner, is_ident_char, scan, scan_with};

/// Convenience prelude re‑exporting the most commonly used items.
pub mod prelude {
    pub use super::{Keyword, ScanOptions, Token, TokenKind, scan, scan_with};
}
