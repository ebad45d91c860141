/// Human readable bucket for a `0..=100` relevance score.
///
/// Each bucket includes its lower bound: 90 is `VeryHigh`, 89 is `High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum RelevanceBucket {
    #[display("Very Low")]
    VeryLow,
    Low,
    Medium,
    High,
    #[display("Very High")]
    VeryHigh,
}

impl RelevanceBucket {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 90.0 => RelevanceBucket::VeryHigh,
            s if s >= 70.0 => RelevanceBucket::High,
            s if s >= 50.0 => RelevanceBucket::Medium,
            s if s >= 30.0 => RelevanceBucket::Low,
            _ => RelevanceBucket::VeryLow,
        }
    }
}

impl From<u8> for RelevanceBucket {
    fn from(score: u8) -> Self {
        RelevanceBucket::from_score(f64::from(score))
    }
}

/// Clamp a service score into `0..=100`, dropping non-finite values.
pub fn normalize_score(score: f64) -> Option<u8> {
    score
        .is_finite()
        .then(|| score.clamp(0.0, 100.0).round() as u8)
}

/// `"87%"`-style label for a score.
pub fn percent_label(score: u8) -> String {
    format!("{score}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, RelevanceBucket::VeryLow)]
    #[case(29, RelevanceBucket::VeryLow)]
    #[case(30, RelevanceBucket::Low)]
    #[case(49, RelevanceBucket::Low)]
    #[case(50, RelevanceBucket::Medium)]
    #[case(69, RelevanceBucket::Medium)]
    #[case(70, RelevanceBucket::High)]
    #[case(89, RelevanceBucket::High)]
    #[case(90, RelevanceBucket::VeryHigh)]
    #[case(100, RelevanceBucket::VeryHigh)]
    fn bucket_boundaries(#[case] score: u8, #[case] expected: RelevanceBucket) {
        assert_eq!(RelevanceBucket::from(score), expected);
    }

    #[test]
    fn fractional_scores_below_a_boundary_stay_in_the_lower_bucket() {
        assert_eq!(RelevanceBucket::from_score(89.99), RelevanceBucket::High);
        assert_eq!(RelevanceBucket::from_score(29.5), RelevanceBucket::VeryLow);
    }

    #[test]
    fn labels() {
        assert_eq!(RelevanceBucket::VeryHigh.to_string(), "Very High");
        assert_eq!(RelevanceBucket::Medium.to_string(), "Medium");
        assert_eq!(RelevanceBucket::VeryLow.to_string(), "Very Low");
        assert_eq!(percent_label(87), "87%");
    }

    #[rstest]
    #[case(87.4, Some(87))]
    #[case(-3.0, Some(0))]
    #[case(140.0, Some(100))]
    #[case(f64::NAN, None)]
    fn normalizes_scores(#[case] score: f64, #[case] expected: Option<u8>) {
        assert_eq!(normalize_score(score), expected);
    }
}
