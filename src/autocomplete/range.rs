use crate::*;

/// Half-open byte span `[start, end)` of document text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, derive_more::Display)]
#[display("{start}..{end}")]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Whole-document range.
    pub fn full(text: &str) -> Self {
        Self::new(0, text.len())
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

/// The word being typed at `offset`: the maximal run of identifier characters
/// ending at the cursor, on the cursor's line.
///
/// Offsets past the end clamp to the end; offsets inside a multi-byte
/// character move back to its start. Replacing this range with a completion
/// never touches text outside the partial word.
pub fn word_range(text: &str, offset: usize) -> TextRange {
    let mut end = offset.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    let start = text[..end]
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_ident_char(*c))
        .last()
        .map_or(end, |(i, _)| i);
    TextRange::new(start, end)
}

/// The statement around `offset`: the text between the `;` terminators on
/// either side, without surrounding whitespace.
///
/// Terminators inside strings, quoted identifiers and comments do not count.
/// A caret right after a `;` sits in the empty statement that follows it.
pub fn statement_range(text: &str, offset: usize) -> TextRange {
    let offset = offset.min(text.len());
    let tokens = scan(text);
    let terminators = || {
        tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Delimiter && t.text == ";")
    };
    let start = terminators()
        .map(|t| t.end)
        .take_while(|&end| end <= offset)
        .last()
        .unwrap_or(0);
    let end = terminators()
        .map(|t| t.start)
        .find(|&start| start >= offset)
        .unwrap_or(text.len());

    let statement = &text[start..end];
    let leading = statement.len() - statement.trim_start().len();
    let trailing = statement.trim_start().len() - statement.trim().len();
    TextRange::new(start + leading, end - trailing)
}
