use crate::sql::{
    keyword::Keyword,
    operator::{is_operator_char, longest_operator},
    scan_state::{ScanOptions, ScanState},
    token::Token,
    token_kind::TokenKind,
};

/// Scan `sql` into highlighting tokens with the default options.
///
/// Behavior:
/// - The returned tokens partition the input: contiguous, non-overlapping and
///   covering `[0, sql.len())` exactly. Whitespace is a token too.
/// - Never fails. A character no rule accepts becomes a one-character `Other`.
/// - Keywords match case-insensitively on whole identifier runs only.
/// - `"` opens a quoted identifier (see `ScanOptions` to scan it as a string).
///
/// Complexity:
/// - O(n) time, O(t) space where `t` is number of tokens.
pub fn scan(sql: &str) -> Vec<Token<'_>> {
    Scanner::new(sql).collect()
}

/// Scan with explicit options.
pub fn scan_with(sql: &str, options: ScanOptions) -> Vec<Token<'_>> {
    Scanner::new(sql).with_options(options).collect()
}

/// Characters that make up identifier runs and the completion word.
pub fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '$' | '#')
}

/// Finite-state scanner yielding one token per step.
///
/// `Root` either emits a single-step token (delimiter, bracket, tag, word,
/// operator, other) or switches to the state owning the construct that starts
/// at the current position. Every other state consumes its construct, emits
/// exactly one token and returns to `Root`.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
    token_start: usize,
    state: ScanState,
    options: ScanOptions,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            token_start: 0,
            state: ScanState::Root,
            options: ScanOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Close the current token at `self.pos` and return to `Root`.
    fn emit(&mut self, kind: TokenKind) -> Token<'a> {
        self.state = ScanState::Root;
        Token::new(kind, self.input, self.token_start, self.pos)
    }

    fn enter(&mut self, state: ScanState, skip: usize) -> Option<Token<'a>> {
        self.state = state;
        self.pos += skip;
        None
    }

    fn step(&mut self) -> Option<Token<'a>> {
        match self.state {
            ScanState::Root => self.root(),
            ScanState::Whitespace => {
                self.pos += run_len(self.rest(), char::is_whitespace);
                Some(self.emit(TokenKind::Whitespace))
            }
            ScanState::LineComment => {
                self.pos += self.rest().find('\n').unwrap_or(self.rest().len());
                Some(self.emit(TokenKind::Comment))
            }
            ScanState::BlockComment => {
                // Block comments do not nest: the first `*/` closes.
                self.pos += self
                    .rest()
                    .find("*/")
                    .map_or(self.rest().len(), |idx| idx + 2);
                Some(self.emit(TokenKind::Comment))
            }
            ScanState::Number => {
                self.pos += number_len(self.rest());
                Some(self.emit(TokenKind::Number))
            }
            ScanState::SingleQuoteString => Some(self.quoted('\'', TokenKind::String)),
            ScanState::DoubleQuoteString => Some(self.quoted('"', TokenKind::String)),
            ScanState::QuotedIdentifier => Some(self.quoted('"', TokenKind::Identifier)),
            ScanState::BracketedIdentifier => Some(self.quoted(']', TokenKind::Identifier)),
        }
    }

    fn root(&mut self) -> Option<Token<'a>> {
        self.token_start = self.pos;
        let rest = self.rest();
        let mut chars = rest.chars();
        let c = chars.next()?;
        let next = chars.next();

        if rest.starts_with("--") {
            return self.enter(ScanState::LineComment, 2);
        }
        if rest.starts_with("/*") {
            return self.enter(ScanState::BlockComment, 2);
        }
        if c.is_whitespace() {
            return self.enter(ScanState::Whitespace, 0);
        }
        if starts_number(c, next, chars.next()) {
            return self.enter(ScanState::Number, 0);
        }

        let kind = match c {
            '\'' => return self.enter(ScanState::SingleQuoteString, 1),
            '"' => return self.enter(self.options.double_quote_state(), 1),
            '[' => return self.enter(ScanState::BracketedIdentifier, 1),
            ';' | ',' | '.' => {
                self.pos += 1;
                TokenKind::Delimiter
            }
            '(' | ')' | '{' | '}' | ']' => {
                self.pos += 1;
                TokenKind::Bracket
            }
            '@' => {
                let ats = run_len(rest, |c| c == '@');
                self.pos += ats + run_len(&rest[ats..], is_ident_char);
                TokenKind::Tag
            }
            c if is_ident_char(c) => {
                let len = run_len(rest, is_ident_char);
                self.pos += len;
                Keyword::from_word(&rest[..len])
                    .map(TokenKind::Keyword)
                    .unwrap_or(TokenKind::Identifier)
            }
            c if is_operator_char(c) => match longest_operator(rest) {
                Some(len) => {
                    self.pos += len;
                    TokenKind::Operator
                }
                None => {
                    self.pos += c.len_utf8();
                    TokenKind::Other
                }
            },
            c => {
                self.pos += c.len_utf8();
                TokenKind::Other
            }
        };
        Some(self.emit(kind))
    }

    /// Consume up to and including the closing `close`. A doubled `close` is
    /// an escaped literal and stays inside; an unterminated construct runs to
    /// the end of input.
    fn quoted(&mut self, close: char, kind: TokenKind) -> Token<'a> {
        loop {
            let rest = self.rest();
            match rest.find(close) {
                None => {
                    self.pos = self.input.len();
                    break;
                }
                Some(idx) => {
                    let after = idx + close.len_utf8();
                    self.pos += after;
                    if !rest[after..].starts_with(close) {
                        break;
                    }
                    self.pos += close.len_utf8();
                }
            }
        }
        self.emit(kind)
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        // A construct opened on the last character still owes its token.
        while self.pos < self.input.len() || self.state != ScanState::Root {
            if let Some(token) = self.step() {
                return Some(token);
            }
        }
        None
    }
}

fn run_len(s: &str, pred: impl Fn(char) -> bool) -> usize {
    s.find(|c: char| !pred(c)).unwrap_or(s.len())
}

fn digits_len(s: &str) -> usize {
    run_len(s, |c| c.is_ascii_digit())
}

fn starts_number(c: char, next: Option<char>, third: Option<char>) -> bool {
    let digit = |c: Option<char>| c.is_some_and(|c| c.is_ascii_digit());
    match c {
        '0'..='9' => true,
        '.' => digit(next),
        '$' => digit(next) || (matches!(next, Some('+' | '-')) && digit(third)),
        _ => false,
    }
}

/// Byte length of the numeric literal at the start of `s`:
/// `0x` hex, `$`-prefixed decimal, or decimal with optional fraction and exponent.
fn number_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 && bytes[0] == b'0' && matches!(bytes[1], b'x' | b'X') {
        return 2 + run_len(&s[2..], |c| c.is_ascii_hexdigit());
    }

    let mut len = 0;
    if s.starts_with('$') {
        len += 1;
        if matches!(bytes.get(1), Some(b'+' | b'-')) {
            len += 1;
        }
        len += digits_len(&s[len..]);
        if s[len..].starts_with('.') {
            len += 1 + digits_len(&s[len + 1..]);
        }
        return len;
    }

    len += digits_len(s);
    if s[len..].starts_with('.') {
        len += 1 + digits_len(&s[len + 1..]);
    }
    if matches!(bytes.get(len), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(len + 1), Some(b'+' | b'-')));
        let exponent = digits_len(&s[len + 1 + sign..]);
        if exponent > 0 {
            len += 1 + sign + exponent;
        }
    }
    len
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::scan_state::DoubleQuote;

    fn kinds(sql: &str) -> Vec<(TokenKind, &str)> {
        scan(sql).into_iter().map(|t| (t.kind, t.text)).collect()
    }

    #[test]
    fn basic_select_sequence() {
        use TokenKind::*;
        assert_eq!(
            kinds("SELECT a, b FROM t;"),
            vec![
                (Keyword(crate::Keyword::Select), "SELECT"),
                (Whitespace, " "),
                (Identifier, "a"),
                (Delimiter, ","),
                (Whitespace, " "),
                (Identifier, "b"),
                (Whitespace, " "),
                (Keyword(crate::Keyword::From), "FROM"),
                (Whitespace, " "),
                (Identifier, "t"),
                (Delimiter, ";"),
            ]
        );
    }

    #[test]
    fn preserves_case_for_identifiers() {
        let toks = scan("From MyTable");
        assert!(toks[0].is_keyword(Keyword::From));
        assert_eq!(toks[2].kind, TokenKind::Identifier);
        assert_eq!(toks[2].text, "MyTable");
    }

    #[test]
    fn line_comment_stops_at_newline() {
        use TokenKind::*;
        assert_eq!(
            kinds("-- hi\nx"),
            vec![(Comment, "-- hi"), (Whitespace, "\n"), (Identifier, "x")]
        );
    }

    #[test]
    fn unterminated_constructs_run_to_end() {
        assert_eq!(kinds("'abc"), vec![(TokenKind::String, "'abc")]);
        assert_eq!(kinds("/* open"), vec![(TokenKind::Comment, "/* open")]);
        assert_eq!(kinds("[col"), vec![(TokenKind::Identifier, "[col")]);
    }

    #[test]
    fn double_quote_is_an_identifier_unless_configured() {
        assert_eq!(kinds(r#""a""b""#), vec![(TokenKind::Identifier, r#""a""b""#)]);

        let options = ScanOptions::default().double_quote(DoubleQuote::String);
        let toks = scan_with(r#""a""b" x"#, options);
        assert_eq!(toks[0].kind, TokenKind::String);
        assert_eq!(toks[0].text, r#""a""b""#);
        assert_eq!(toks.len(), 3);
    }

    #[test]
    fn tags_and_brackets() {
        use TokenKind::*;
        assert_eq!(
            kinds("@@ROWCOUNT(@id)"),
            vec![
                (Tag, "@@ROWCOUNT"),
                (Bracket, "("),
                (Tag, "@id"),
                (Bracket, ")"),
            ]
        );
    }

    #[test]
    fn operators_use_longest_match() {
        use TokenKind::*;
        assert_eq!(
            kinds("a<=b<>c"),
            vec![
                (Identifier, "a"),
                (Operator, "<="),
                (Identifier, "b"),
                (Operator, "<"),
                (Operator, ">"),
                (Identifier, "c"),
            ]
        );
    }

    #[test]
    fn unknown_characters_fall_back_to_other() {
        use TokenKind::*;
        assert_eq!(
            kinds("a`€\\"),
            vec![(Identifier, "a"), (Other, "`"), (Other, "€"), (Other, "\\")]
        );
    }

    #[test]
    fn scanner_reports_root_between_tokens() {
        let mut scanner = Scanner::new("'x' y");
        assert_eq!(scanner.state(), ScanState::Root);
        scanner.next();
        assert_eq!(scanner.state(), ScanState::Root);
        assert_eq!(scanner.count(), 2);
    }
}
