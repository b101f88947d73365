use crate::{Params, Side};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected configuration values
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("arena must have positive size, got {width}x{height}")]
    Arena { width: f32, height: f32 },

    #[error("paddle {width}x{height} does not fit in the arena")]
    Paddle { width: f32, height: f32 },

    #[error("ball radius must be positive, got {0}")]
    BallRadius(f32),

    #[error("ball speeds must satisfy 0 < initial <= max, got initial {initial}, max {max}")]
    BallSpeed { initial: f32, max: f32 },

    #[error("{name} must be non-negative, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f32 },

    #[error("max bounce angle must be in (0, pi/2), got {0}")]
    BounceAngle(f32),

    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub arena_width: f32,
    pub arena_height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_inset: f32,
    pub paddle_speed: f32,
    pub ball_radius: f32,
    pub ball_speed_initial: f32,
    pub ball_speed_max: f32,
    pub ball_speed_increment: f32,
    pub serve_jitter: f32,
    pub push_out: f32,
    pub max_bounce_angle: f32,
    pub ai_reaction_distance: f32,
    pub win_score: u8,
    pub win_margin: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            arena_width: Params::ARENA_WIDTH,
            arena_height: Params::ARENA_HEIGHT,
            paddle_width: Params::PADDLE_WIDTH,
            paddle_height: Params::PADDLE_HEIGHT,
            paddle_inset: Params::PADDLE_INSET,
            paddle_speed: Params::PADDLE_SPEED,
            ball_radius: Params::BALL_RADIUS,
            ball_speed_initial: Params::BALL_SPEED_INITIAL,
            ball_speed_max: Params::BALL_SPEED_MAX,
            ball_speed_increment: Params::BALL_SPEED_INCREMENT,
            serve_jitter: Params::SERVE_JITTER,
            push_out: Params::PUSH_OUT,
            max_bounce_angle: Params::MAX_BOUNCE_ANGLE,
            ai_reaction_distance: Params::AI_REACTION_DISTANCE,
            win_score: Params::WIN_SCORE,
            win_margin: Params::WIN_MARGIN,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // Overflowing JSON numbers deserialize as infinity
        for (name, value) in self.float_fields() {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }
        if self.arena_width <= 0.0 || self.arena_height <= 0.0 {
            return Err(ConfigError::Arena {
                width: self.arena_width,
                height: self.arena_height,
            });
        }
        if self.paddle_width <= 0.0
            || self.paddle_height <= 0.0
            || self.paddle_height > self.arena_height
            || 2.0 * (self.paddle_inset + self.paddle_width) > self.arena_width
        {
            return Err(ConfigError::Paddle {
                width: self.paddle_width,
                height: self.paddle_height,
            });
        }
        if self.ball_radius <= 0.0 {
            return Err(ConfigError::BallRadius(self.ball_radius));
        }
        if self.ball_speed_initial <= 0.0 || self.ball_speed_initial > self.ball_speed_max {
            return Err(ConfigError::BallSpeed {
                initial: self.ball_speed_initial,
                max: self.ball_speed_max,
            });
        }
        for (name, value) in [
            ("paddle_inset", self.paddle_inset),
            ("paddle_speed", self.paddle_speed),
            ("ball_speed_increment", self.ball_speed_increment),
            ("serve_jitter", self.serve_jitter),
            ("push_out", self.push_out),
            ("ai_reaction_distance", self.ai_reaction_distance),
        ] {
            if value < 0.0 {
                return Err(ConfigError::Negative { name, value });
            }
        }
        if self.max_bounce_angle <= 0.0 || self.max_bounce_angle >= std::f32::consts::FRAC_PI_2 {
            return Err(ConfigError::BounceAngle(self.max_bounce_angle));
        }
        Ok(())
    }

    fn float_fields(&self) -> [(&'static str, f32); 14] {
        [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_inset", self.paddle_inset),
            ("paddle_speed", self.paddle_speed),
            ("ball_radius", self.ball_radius),
            ("ball_speed_initial", self.ball_speed_initial),
            ("ball_speed_max", self.ball_speed_max),
            ("ball_speed_increment", self.ball_speed_increment),
            ("serve_jitter", self.serve_jitter),
            ("push_out", self.push_out),
            ("max_bounce_angle", self.max_bounce_angle),
            ("ai_reaction_distance", self.ai_reaction_distance),
        ]
    }

    /// Left edge X of a paddle
    pub fn paddle_x(&self, side: Side) -> f32 {
        match side {
            Side::Near => self.paddle_inset,
            Side::Far => self.arena_width - self.paddle_inset - self.paddle_width,
        }
    }

    /// Highest legal paddle Y (paddle Y is its top edge)
    pub fn paddle_max_y(&self) -> f32 {
        self.arena_height - self.paddle_height
    }

    /// Clamp paddle Y to arena bounds
    pub fn clamp_paddle_y(&self, y: f32) -> f32 {
        y.clamp(0.0, self.paddle_max_y())
    }

    /// Paddle Y at the start of a match (vertically centered)
    pub fn paddle_rest_y(&self) -> f32 {
        self.arena_height / 2.0 - self.paddle_height / 2.0
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.arena_width / 2.0, self.arena_height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_paddle_x() {
        let config = Config::new();
        assert_eq!(config.paddle_x(Side::Near), 10.0, "Near paddle X position");
        assert_eq!(config.paddle_x(Side::Far), 780.0, "Far paddle X position");
    }

    #[test]
    fn test_config_clamp_paddle_y() {
        let config = Config::new();
        assert_eq!(config.clamp_paddle_y(-50.0), 0.0);
        assert_eq!(config.clamp_paddle_y(1000.0), 420.0);
        assert_eq!(config.clamp_paddle_y(123.0), 123.0);
    }

    #[test]
    fn test_config_rest_y_is_centered() {
        let config = Config::new();
        assert_eq!(config.paddle_rest_y(), 210.0);
        assert_eq!(config.center(), Vec2::new(400.0, 250.0));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::new().validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = Config::from_json(r#"{ "ball_speed_max": 16.0 }"#).unwrap();
        assert_eq!(config.ball_speed_max, 16.0);
        assert_eq!(config.arena_width, Params::ARENA_WIDTH);
    }

    #[test]
    fn test_from_json_rejects_inverted_speeds() {
        let err = Config::from_json(r#"{ "ball_speed_initial": 20.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::BallSpeed { .. }));
    }

    #[test]
    fn test_from_json_rejects_bad_json() {
        let err = Config::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_validate_rejects_oversized_paddle() {
        let config = Config {
            paddle_height: 600.0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Paddle { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_negative_increment() {
        let config = Config {
            ball_speed_increment: -0.5,
            ..Config::default()
        };
        match config.validate() {
            Err(ConfigError::Negative { name, .. }) => assert_eq!(name, "ball_speed_increment"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_from_json_rejects_non_finite() {
        // 1e39 does not fit in an f32 and reads back as infinity
        for field in ["serve_jitter", "ball_speed_max", "arena_width"] {
            let json = format!(r#"{{ "{field}": 1e39 }}"#);
            match Config::from_json(&json) {
                Err(ConfigError::NonFinite { name, value }) => {
                    assert_eq!(name, field);
                    assert!(value.is_infinite());
                }
                other => panic!("{field}: unexpected result {other:?}"),
            }
        }
    }

    #[test]
    fn test_validate_rejects_bad_bounce_angle() {
        for angle in [0.0, -0.3, std::f32::consts::FRAC_PI_2, 3.0] {
            let config = Config {
                max_bounce_angle: angle,
                ..Config::default()
            };
            assert!(
                matches!(config.validate(), Err(ConfigError::BounceAngle(_))),
                "angle {angle}"
            );
        }
    }
}
