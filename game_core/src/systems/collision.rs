use crate::{Ball, Config, Events, Paddle, Side};

/// Check all collisions for this tick: walls, then near paddle, then far paddle
pub fn check_collisions(
    ball: &mut Ball,
    near: &Paddle,
    far: &Paddle,
    config: &Config,
    events: &mut Events,
) {
    check_wall_collision(ball, config, events);
    check_paddle_collision(ball, near, config, events);
    check_paddle_collision(ball, far, config, events);
}

/// Reflect the ball off the top/bottom walls
pub fn check_wall_collision(ball: &mut Ball, config: &Config, events: &mut Events) -> bool {
    let r = config.ball_radius;
    if ball.pos.y - r < 0.0 {
        ball.pos.y = r;
    } else if ball.pos.y + r > config.arena_height {
        ball.pos.y = config.arena_height - r;
    } else {
        return false;
    }

    ball.vel.y = -ball.vel.y;
    events.ball_hit_wall = true;
    true
}

/// Bounce angle for a strike at `ball_y`: 0 at paddle center, ±max at the ends.
/// Positive angles send the ball upward.
pub fn bounce_angle(ball_y: f32, paddle: &Paddle, config: &Config) -> f32 {
    let half_height = config.paddle_height / 2.0;
    let offset = (paddle.center_y(config.paddle_height) - ball_y) / half_height;
    offset * config.max_bounce_angle
}

/// Whether the ball overlaps the paddle this tick
pub fn overlaps_paddle(ball: &Ball, paddle: &Paddle, config: &Config) -> bool {
    let paddle_left = config.paddle_x(paddle.side);
    let paddle_right = paddle_left + config.paddle_width;
    let r = config.ball_radius;

    ball.pos.x - r < paddle_right
        && ball.pos.x + r > paddle_left
        && ball.pos.y > paddle.y
        && ball.pos.y < paddle.y + config.paddle_height
}

/// Return the ball off a paddle. Returns true on a hit.
pub fn check_paddle_collision(
    ball: &mut Ball,
    paddle: &Paddle,
    config: &Config,
    events: &mut Events,
) -> bool {
    if !overlaps_paddle(ball, paddle, config) {
        return false;
    }

    let angle = bounce_angle(ball.pos.y, paddle, config);

    // Speed up on every hit, never past the cap and never slower than before
    let speed = (ball.speed() + config.ball_speed_increment).min(config.ball_speed_max);

    let paddle_left = config.paddle_x(paddle.side);
    let r = config.ball_radius;
    let (dir, x) = match paddle.side {
        Side::Near => (1.0, paddle_left + config.paddle_width + r + config.push_out),
        Side::Far => (-1.0, paddle_left - r - config.push_out),
    };

    ball.vel.x = dir * speed * angle.cos();
    ball.vel.y = -speed * angle.sin();
    // Push out past the face so the next tick cannot hit again
    ball.pos.x = x;

    events.ball_hit_paddle = Some(paddle.side);
    true
}
