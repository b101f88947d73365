use crate::{serve_ball, Ball, Config, GameRng, Paddle, Side};

/// Repair any state that escaped the physics invariants.
///
/// Runs after every tick so a bad value never reaches the renderer.
pub fn enforce_invariants(
    ball: &mut Ball,
    paddles: [&mut Paddle; 2],
    config: &Config,
    rng: &mut GameRng,
) {
    if !ball.is_finite() {
        log::warn!("non-finite ball state {:?}, re-serving", ball);
        serve_ball(ball, Side::Near, config, rng);
    }

    let speed = ball.speed();
    if speed > config.ball_speed_max {
        log::warn!("ball speed {} above cap, scaling down", speed);
        ball.vel *= config.ball_speed_max / speed;
    }

    for paddle in paddles {
        if !paddle.y.is_finite() {
            log::warn!("non-finite {:?} paddle y, resetting", paddle.side);
            paddle.y = config.paddle_rest_y();
        }
        paddle.y = config.clamp_paddle_y(paddle.y);
    }
}
