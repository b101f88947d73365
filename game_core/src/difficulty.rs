use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// AI skill level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Impossible,
}

/// How the AI paddle tracks the ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Fraction of the remaining distance closed per tick, in (0, 1]
    pub tracking_gain: f32,
    /// Chance in percent (0..=100) of skipping a tick while the ball is far away
    pub error_margin: u8,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Impossible,
    ];

    pub const fn profile(self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                tracking_gain: 0.05,
                error_margin: 40,
            },
            Difficulty::Medium => DifficultyProfile {
                tracking_gain: 0.09,
                error_margin: 25,
            },
            Difficulty::Hard => DifficultyProfile {
                tracking_gain: 0.15,
                error_margin: 10,
            },
            Difficulty::Impossible => DifficultyProfile {
                tracking_gain: 0.25,
                error_margin: 0,
            },
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
            Difficulty::Impossible => "IMPOSSIBLE",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty `{0}`")]
pub struct UnknownDifficulty(pub String);

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownDifficulty(s.to_string()))
    }
}
