use crate::{Ball, Config, DifficultyProfile, GameRng, Paddle};
use rand::Rng;

/// Roll for a hesitation this tick.
///
/// Only rolls while the ball is beyond the reaction distance, so a close ball
/// always gets a response and consumes no randomness.
pub fn hesitates(
    ball: &Ball,
    paddle: &Paddle,
    profile: &DifficultyProfile,
    config: &Config,
    rng: &mut GameRng,
) -> bool {
    let distance = (ball.pos.x - config.paddle_x(paddle.side)).abs();
    distance > config.ai_reaction_distance
        && rng.0.gen_range(0.0..100.0) < f32::from(profile.error_margin)
}

/// Calculate the AI paddle's Y for this tick.
///
/// Strategy:
/// 1. Aim the paddle center at the ball's current Y.
/// 2. Close `tracking_gain` of the remaining distance, no snapping.
/// 3. Occasionally hold still while the ball is far away.
pub fn compute_target(
    ball: &Ball,
    paddle: &Paddle,
    profile: &DifficultyProfile,
    config: &Config,
    rng: &mut GameRng,
) -> f32 {
    let target = ball.pos.y - config.paddle_height / 2.0;
    let mut diff = target - paddle.y;

    if hesitates(ball, paddle, profile, config, rng) {
        diff = 0.0;
    }

    config.clamp_paddle_y(paddle.y + diff * profile.tracking_gain)
}
