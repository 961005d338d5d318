use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// Number of parallel lanes, one key each
pub const LANE_COUNT: usize = 4;

/// Judgment windows in seconds, measured as `|note time - input time|`.
pub const PERFECT_WINDOW: f64 = 0.03;
pub const GREAT_WINDOW: f64 = 0.05;
pub const GOOD_WINDOW: f64 = 0.10;
pub const BAD_WINDOW: f64 = 0.15;

pub const PERFECT_SCORE: u32 = 100;
pub const GREAT_SCORE: u32 = 80;
pub const GOOD_SCORE: u32 = 50;
pub const BAD_SCORE: u32 = 20;
pub const MISS_SCORE: u32 = 0;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
    Display,
)]
pub enum JudgmentTier {
    #[strum(serialize = "PERFECT")]
    Perfect,
    #[strum(serialize = "GREAT")]
    Great,
    #[strum(serialize = "GOOD")]
    Good,
    #[strum(serialize = "BAD")]
    Bad,
    #[strum(serialize = "MISS")]
    Miss,
}

impl JudgmentTier {
    /// All tiers from strictest to Miss
    pub const ALL: [Self; 5] = [Self::Perfect, Self::Great, Self::Good, Self::Bad, Self::Miss];

    /// Classify an absolute timing distance into a tier.
    ///
    /// Returns `None` past the Bad window: the press does not match any note.
    pub fn classify(distance: f64) -> Option<Self> {
        if distance <= PERFECT_WINDOW {
            Some(Self::Perfect)
        } else if distance <= GREAT_WINDOW {
            Some(Self::Great)
        } else if distance <= GOOD_WINDOW {
            Some(Self::Good)
        } else if distance <= BAD_WINDOW {
            Some(Self::Bad)
        } else {
            None
        }
    }

    /// Tolerance radius of this tier (Miss has none)
    pub fn window(&self) -> Option<f64> {
        match self {
            Self::Perfect => Some(PERFECT_WINDOW),
            Self::Great => Some(GREAT_WINDOW),
            Self::Good => Some(GOOD_WINDOW),
            Self::Bad => Some(BAD_WINDOW),
            Self::Miss => None,
        }
    }

    pub fn score(&self) -> u32 {
        match self {
            Self::Perfect => PERFECT_SCORE,
            Self::Great => GREAT_SCORE,
            Self::Good => GOOD_SCORE,
            Self::Bad => BAD_SCORE,
            Self::Miss => MISS_SCORE,
        }
    }

    /// Bad and Miss break the combo, everything else extends it
    pub fn keeps_combo(&self) -> bool {
        matches!(self, Self::Perfect | Self::Great | Self::Good)
    }

    pub fn short_name(&self) -> &'static str {
        self.into()
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Default,
    EnumString,
    IntoStaticStr,
    Display,
)]
pub enum Rank {
    #[default]
    E,
    D,
    C,
    B,
    A,
    S,
}

impl Rank {
    pub fn from_accuracy(accuracy: f64) -> Self {
        if accuracy >= 0.95 {
            Self::S
        } else if accuracy >= 0.90 {
            Self::A
        } else if accuracy >= 0.80 {
            Self::B
        } else if accuracy >= 0.70 {
            Self::C
        } else if accuracy >= 0.60 {
            Self::D
        } else {
            Self::E
        }
    }

    pub fn short_name(&self) -> &'static str {
        self.into()
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, IntoStaticStr, Display,
)]
pub enum SessionPhase {
    #[default]
    Title,
    Playing,
    Result,
    Terminated,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_tiers() {
        assert_eq!(JudgmentTier::classify(0.0), Some(JudgmentTier::Perfect));
        assert_eq!(JudgmentTier::classify(0.02), Some(JudgmentTier::Perfect));
        assert_eq!(JudgmentTier::classify(0.04), Some(JudgmentTier::Great));
        assert_eq!(JudgmentTier::classify(0.07), Some(JudgmentTier::Good));
        assert_eq!(JudgmentTier::classify(0.12), Some(JudgmentTier::Bad));
        assert_eq!(JudgmentTier::classify(0.16), None);
    }

    #[test]
    fn test_windows_are_nested() {
        let windows: Vec<f64> = JudgmentTier::ALL
            .iter()
            .filter_map(|tier| tier.window())
            .collect();
        assert_eq!(windows.len(), 4);
        assert!(windows.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_tier_scores_and_combo() {
        assert_eq!(JudgmentTier::Perfect.score(), 100);
        assert_eq!(JudgmentTier::Great.score(), 80);
        assert_eq!(JudgmentTier::Good.score(), 50);
        assert_eq!(JudgmentTier::Bad.score(), 20);
        assert_eq!(JudgmentTier::Miss.score(), 0);
        assert!(JudgmentTier::Good.keeps_combo());
        assert!(!JudgmentTier::Bad.keeps_combo());
        assert!(!JudgmentTier::Miss.keeps_combo());
    }

    #[test]
    fn test_tier_names() {
        assert_eq!(JudgmentTier::Perfect.short_name(), "PERFECT");
        assert_eq!(JudgmentTier::Miss.to_string(), "MISS");
        assert_eq!("GREAT".parse::<JudgmentTier>().ok(), Some(JudgmentTier::Great));
    }

    #[test]
    fn test_rank_from_accuracy() {
        assert_eq!(Rank::from_accuracy(1.0), Rank::S);
        assert_eq!(Rank::from_accuracy(0.96), Rank::S);
        assert_eq!(Rank::from_accuracy(0.95), Rank::S);
        assert_eq!(Rank::from_accuracy(0.92), Rank::A);
        assert_eq!(Rank::from_accuracy(0.85), Rank::B);
        assert_eq!(Rank::from_accuracy(0.75), Rank::C);
        assert_eq!(Rank::from_accuracy(0.65), Rank::D);
        assert_eq!(Rank::from_accuracy(0.2), Rank::E);
    }

    #[test]
    fn test_rank_ordering() {
        assert!(Rank::S > Rank::A);
        assert!(Rank::D > Rank::E);
    }
}
