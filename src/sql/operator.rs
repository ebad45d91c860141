//! Operator symbols recognised by the scanner.

/// The fixed set of one and two character operators.
pub const OPERATORS: [&str; 23] = [
    "=", ">", "<", "!", "~", "?", ":", "==", "<=", ">=", "!=", "&&", "||", "++", "--", "+", "-",
    "*", "/", "&", "|", "^", "%",
];

/// Characters that may start or continue an operator run.
pub fn is_operator_char(c: char) -> bool {
    matches!(
        c,
        '=' | '>' | '<' | '!' | '~' | '?' | ':' | '&' | '|' | '+' | '-' | '*' | '/' | '^' | '%'
    )
}

pub fn is_operator(symbol: &str) -> bool {
    OPERATORS.contains(&symbol)
}

/// Byte length of the longest operator at the start of `rest`, trying two
/// characters before one. Returns `None` when no operator matches.
pub fn longest_operator(rest: &str) -> Option<usize> {
    let mut ends = rest.char_indices().skip(1).map(|(i, _)| i).chain([rest.len()]);
    let one = ends.next()?;
    let two = ends.next();
    two.filter(|&end| is_operator(&rest[..end]))
        .or(is_operator(&rest[..one]).then_some(one))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("<=1", Some(2))]
    #[case("<>", Some(1))]
    #[case("!=", Some(2))]
    #[case("*/", Some(1))]
    #[case("%", Some(1))]
    #[case("||x", Some(2))]
    #[case("#", None)]
    #[case("", None)]
    fn picks_longest_operator(#[case] rest: &str, #[case] expected: Option<usize>) {
        assert_eq!(longest_operator(rest), expected);
    }

    #[test]
    fn every_operator_is_made_of_operator_chars() {
        for op in OPERATORS {
            assert!(op.chars().all(is_operator_char), "{op}");
        }
    }
}
