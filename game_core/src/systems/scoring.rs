use crate::{Ball, Config, Events, GameRng, Side};
use glam::Vec2;
use rand::Rng;

/// Check if ball left the arena. Returns the side that scored.
pub fn check_scoring(ball: &Ball, config: &Config, events: &mut Events) -> Option<Side> {
    let scorer = if ball.pos.x < 0.0 {
        // Past the near paddle
        Side::Far
    } else if ball.pos.x > config.arena_width {
        Side::Near
    } else {
        return None;
    };

    events.scored = Some(scorer);
    Some(scorer)
}

/// Put the ball back at center and serve it toward `receiver`
pub fn serve_ball(ball: &mut Ball, receiver: Side, config: &Config, rng: &mut GameRng) {
    let jitter = if config.serve_jitter > 0.0 {
        rng.0.gen_range(-config.serve_jitter..config.serve_jitter)
    } else {
        0.0
    };

    ball.pos = config.center();
    ball.vel = Vec2::new(receiver.toward_sign() * config.ball_speed_initial, jitter);
}
