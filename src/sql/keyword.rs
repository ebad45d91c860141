//! SQL keyword model used by the scanner and the keyword completion candidates.
//!
//! The set is fixed: it covers the statements, clauses, joins and aggregate
//! functions the console highlights. Matching is case-insensitive and only
//! ever applies to a whole identifier run, so `Select1` stays an identifier.
//!
//! Design notes:
//! - Variants and their canonical upper-case spelling are declared once in the
//!   `keywords!` table below; `ALL`, `from_word` and `as_str` are generated from it.
//! - `as_str` is the spelling inserted by keyword completions.

macro_rules! keywords {
    ($($variant:ident => $text:literal),+ $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Keyword {
            $($variant),+
        }

        impl Keyword {
            /// Every keyword in declaration order.
            pub const ALL: &'static [Keyword] = &[$(Keyword::$variant),+];

            /// Canonical upper-case string form of the keyword.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Keyword::$variant => $text),+
                }
            }

            fn from_upper(word: &str) -> Option<Self> {
                match word {
                    $($text => Some(Keyword::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

keywords! {
    Select => "SELECT",
    From => "FROM",
    Where => "WHERE",
    Insert => "INSERT",
    Update => "UPDATE",
    Delete => "DELETE",
    Create => "CREATE",
    Alter => "ALTER",
    Drop => "DROP",
    Table => "TABLE",
    View => "VIEW",
    Procedure => "PROCEDURE",
    Function => "FUNCTION",
    Trigger => "TRIGGER",
    Index => "INDEX",
    Constraint => "CONSTRAINT",
    Primary => "PRIMARY",
    Key => "KEY",
    Foreign => "FOREIGN",
    References => "REFERENCES",
    Unique => "UNIQUE",
    Check => "CHECK",
    Default => "DEFAULT",
    Null => "NULL",
    Not => "NOT",
    And => "AND",
    Or => "OR",
    In => "IN",
    Like => "LIKE",
    Between => "BETWEEN",
    Exists => "EXISTS",
    Inner => "INNER",
    Outer => "OUTER",
    Left => "LEFT",
    Right => "RIGHT",
    Join => "JOIN",
    Full => "FULL",
    Group => "GROUP",
    By => "BY",
    Having => "HAVING",
    Order => "ORDER",
    Asc => "ASC",
    Desc => "DESC",
    With => "WITH",
    Union => "UNION",
    All => "ALL",
    Case => "CASE",
    When => "WHEN",
    Then => "THEN",
    Else => "ELSE",
    End => "END",
    As => "AS",
    On => "ON",
    Is => "IS",
    Into => "INTO",
    Values => "VALUES",
    Set => "SET",
    Top => "TOP",
    Distinct => "DISTINCT",
    Count => "COUNT",
    Sum => "SUM",
    Avg => "AVG",
    Min => "MIN",
    Max => "MAX",
}

impl Keyword {
    /// Longest keyword spelling; longer words are rejected without allocating.
    const MAX_LEN: usize = 10;

    /// Classify a whole word, ignoring ASCII case.
    /// Returns `None` if the word is not a recognized keyword.
    pub fn from_word(word: &str) -> Option<Self> {
        if word.len() > Self::MAX_LEN || !word.is_ascii() {
            return None;
        }
        Self::from_upper(&word.to_ascii_uppercase())
    }

    /// Aggregate functions that read as keywords but complete as functions.
    pub const fn is_function(self) -> bool {
        matches!(
            self,
            Keyword::Count | Keyword::Sum | Keyword::Avg | Keyword::Min | Keyword::Max
        )
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("select", Keyword::Select)]
    #[case("SELECT", Keyword::Select)]
    #[case("SeLeCt", Keyword::Select)]
    #[case("references", Keyword::References)]
    #[case("Constraint", Keyword::Constraint)]
    #[case("top", Keyword::Top)]
    #[case("max", Keyword::Max)]
    fn recognizes_known_keywords(#[case] word: &str, #[case] expected: Keyword) {
        assert_eq!(Keyword::from_word(word), Some(expected));
    }

    #[test]
    fn rejects_unknown_words() {
        for w in ["foo", "limit", "select1", "_select", "selects", "référence", ""] {
            assert!(
                Keyword::from_word(w).is_none(),
                "{w} should NOT be recognized"
            );
        }
    }

    #[test]
    fn every_keyword_round_trips_through_its_spelling() {
        assert_eq!(Keyword::ALL.len(), 64);
        for kw in Keyword::ALL {
            assert_eq!(Keyword::from_word(kw.as_str()), Some(*kw));
            assert_eq!(kw.to_string(), kw.as_str());
            assert!(kw.as_str().len() <= Keyword::MAX_LEN);
        }
    }

    #[test]
    fn aggregates_are_functions() {
        assert!(Keyword::Count.is_function());
        assert!(Keyword::Avg.is_function());
        assert!(!Keyword::Select.is_function());
    }
}
