use crate::{Ball, Config, InputState, Paddle};

/// Apply keyboard movement to the near paddle
pub fn move_paddle(paddle: &mut Paddle, input: &InputState, config: &Config) {
    // Both keys held cancel out
    paddle.y += f32::from(input.dir()) * config.paddle_speed;

    // Clamp to arena bounds
    paddle.y = config.clamp_paddle_y(paddle.y);
}

/// Move ball based on velocity
pub fn move_ball(ball: &mut Ball) {
    ball.pos += ball.vel;
}
