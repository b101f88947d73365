pub mod components;
pub mod config;
pub mod difficulty;
pub mod match_loop;
pub mod params;
pub mod resources;
pub mod scheduler;
pub mod systems;

pub use components::*;
pub use config::*;
pub use difficulty::*;
pub use match_loop::*;
pub use params::*;
pub use resources::*;
pub use scheduler::*;
pub use systems::*;

/// Advance the ball one tick and resolve collisions.
///
/// Order is fixed: move, walls, near paddle, far paddle, then a single
/// scoring check. Returns the side that scored, if any.
pub fn step(
    ball: &mut Ball,
    near: &Paddle,
    far: &Paddle,
    config: &Config,
    events: &mut Events,
) -> Option<Side> {
    // 1. Move ball
    move_ball(ball);

    // 2. Check collisions (walls, then paddles)
    check_collisions(ball, near, far, config, events);

    // 3. Check scoring (ball exited arena)
    check_scoring(ball, config, events)
}

/// Helper to create a paddle at its rest position
pub fn create_paddle(side: Side, config: &Config) -> Paddle {
    Paddle::new(side, config.paddle_rest_y())
}
