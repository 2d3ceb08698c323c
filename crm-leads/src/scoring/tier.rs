//! Tier classifier
//!
//! Deterministic thresholds over the composite score. Tier is never stored
//! independently of the score; both are written together by whichever
//! operation recomputed them.

use crate::models::lead::Tier;

impl Tier {
    /// Classify a composite score.
    ///
    /// score >= 80 -> A, 60..=79 -> B, 40..=59 -> C, otherwise D.
    pub fn from_score(score: u8) -> Tier {
        match score {
            80..=u8::MAX => Tier::A,
            60..=79 => Tier::B,
            40..=59 => Tier::C,
            _ => Tier::D,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_boundaries_are_exact() {
        assert_eq!(Tier::from_score(80), Tier::A);
        assert_eq!(Tier::from_score(79), Tier::B);
        assert_eq!(Tier::from_score(60), Tier::B);
        assert_eq!(Tier::from_score(59), Tier::C);
        assert_eq!(Tier::from_score(40), Tier::C);
        assert_eq!(Tier::from_score(39), Tier::D);
        assert_eq!(Tier::from_score(0), Tier::D);
        assert_eq!(Tier::from_score(100), Tier::A);
    }

    #[test]
    fn classification_is_stable() {
        for score in 0..=100u8 {
            let first = Tier::from_score(score);
            assert_eq!(Tier::from_score(score), first);
        }
    }

    #[test]
    fn every_score_maps_to_exactly_one_tier() {
        for score in 0..=100u8 {
            let tier = Tier::from_score(score);
            let expected = if score >= 80 {
                Tier::A
            } else if score >= 60 {
                Tier::B
            } else if score >= 40 {
                Tier::C
            } else {
                Tier::D
            };
            assert_eq!(tier, expected);
        }
    }
}
