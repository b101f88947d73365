use game_core::{Config, Side};

/// Points needed to win and the lead required
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinRule {
    pub points: u8,
    pub margin: u8,
}

impl WinRule {
    pub fn from_config(config: &Config) -> Self {
        Self {
            points: config.win_score,
            margin: config.win_margin,
        }
    }
}

impl Default for WinRule {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Match score tracking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub near: u8,
    pub far: u8,
    last_scorer: Option<Side>,
    streak: u8,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self, side: Side) -> u8 {
        match side {
            Side::Near => self.near,
            Side::Far => self.far,
        }
    }

    pub fn record(&mut self, scorer: Side) {
        match scorer {
            Side::Near => self.near = self.near.saturating_add(1),
            Side::Far => self.far = self.far.saturating_add(1),
        }

        if self.last_scorer == Some(scorer) {
            self.streak = self.streak.saturating_add(1);
        } else {
            self.last_scorer = Some(scorer);
            self.streak = 1;
        }
    }

    /// Consecutive points by the last scorer
    pub fn streak(&self) -> u8 {
        self.streak
    }

    pub fn has_winner(&self, rule: WinRule) -> Option<Side> {
        [Side::Near, Side::Far].into_iter().find(|&side| {
            let own = u16::from(self.points(side));
            let other = u16::from(self.points(side.opponent()));
            own >= u16::from(rule.points) && own >= other + u16::from(rule.margin)
        })
    }

    /// Either side one point short of the target
    pub fn is_match_point(&self, rule: WinRule) -> bool {
        let needed = rule.points.saturating_sub(1);
        self.near == needed || self.far == needed
    }
}
