/// The scanner's current mode. Exactly one state is active at a time; every
/// non-`Root` state returns to `Root` once its token is emitted, so no state
/// ever nests inside another.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ScanState {
    #[default]
    Root,
    Whitespace,
    LineComment,
    BlockComment,
    Number,
    SingleQuoteString,
    DoubleQuoteString,
    BracketedIdentifier,
    QuotedIdentifier,
}

/// Which rule owns the `"` character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DoubleQuote {
    /// ANSI quoted identifier: `"Order Details"`.
    #[default]
    Identifier,
    /// Double quoted string literal, as some dialects allow.
    String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    pub double_quote: DoubleQuote,
}

impl ScanOptions {
    pub fn double_quote(mut self, double_quote: DoubleQuote) -> Self {
        self.double_quote = double_quote;
        self
    }

    /// State entered on `"`.
    pub(crate) fn double_quote_state(&self) -> ScanState {
        match self.double_quote {
            DoubleQuote::Identifier => ScanState::QuotedIdentifier,
            DoubleQuote::String => ScanState::DoubleQuoteString,
        }
    }
}

impl From<&crate::Config> for ScanOptions {
    fn from(config: &crate::Config) -> Self {
        let double_quote = if config.double_quote_strings {
            DoubleQuote::String
        } else {
            DoubleQuote::Identifier
        };
        ScanOptions { double_quote }
    }
}
