/// Caret position, with the far end of the selection when one is active.
///
/// Both ends are byte offsets into the document text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    start: usize,
    end: Option<usize>,
}

impl Cursor {
    pub fn new(start: usize, end: Option<usize>) -> Self {
        Self { start, end }
    }

    /// A caret with no selection.
    pub fn at(offset: usize) -> Self {
        Self::new(offset, None)
    }

    /// Caret at the end of `text`.
    pub fn at_end(text: &str) -> Self {
        Self::at(text.len())
    }

    /// Caret at a zero-based line and character column of `text`.
    /// Positions past the end of a line clamp to the line end.
    pub fn at_position(text: &str, line: usize, column: usize) -> Self {
        let line_start = text
            .split_inclusive('\n')
            .take(line)
            .map(str::len)
            .sum::<usize>()
            .min(text.len());
        let line_text = text[line_start..].split('\n').next().unwrap_or("");
        let offset = line_text
            .char_indices()
            .nth(column)
            .map_or(line_text.len(), |(i, _)| i);
        Self::at(line_start + offset)
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> Option<usize> {
        self.end
    }

    pub fn range(&self) -> (usize, Option<usize>) {
        (self.start, self.end)
    }

    pub fn has_selection(&self) -> bool {
        self.end.is_some_and(|end| end != self.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("SELECT cus", 0, 10, 10)]
    #[case("SELECT\nFROM users", 1, 4, 11)]
    #[case("SELECT\nFROM users", 1, 99, 17)]
    #[case("SELECT\nFROM users", 5, 0, 17)]
    #[case("é\nab", 1, 1, 4)]
    fn converts_line_and_column(
        #[case] text: &str,
        #[case] line: usize,
        #[case] column: usize,
        #[case] expected: usize,
    ) {
        assert_eq!(Cursor::at_position(text, line, column).start(), expected);
    }

    #[test]
    fn selection_detection() {
        assert!(!Cursor::at(3).has_selection());
        assert!(!Cursor::new(3, Some(3)).has_selection());
        assert!(Cursor::new(3, Some(7)).has_selection());
    }
}
