/// Game tuning parameters for Pong
///
/// Units are playfield units, velocities are units per tick.
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Playfield
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 500.0;

    // Paddle
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 80.0;
    pub const PADDLE_INSET: f32 = 10.0; // Gap between playfield edge and paddle
    pub const PADDLE_SPEED: f32 = 6.0; // Keyboard paddle, units per tick

    // Ball
    pub const BALL_RADIUS: f32 = 8.0;
    pub const BALL_SPEED_INITIAL: f32 = 4.0;
    pub const BALL_SPEED_MAX: f32 = 12.0;
    pub const BALL_SPEED_INCREMENT: f32 = 0.5; // Added on every paddle hit
    pub const SERVE_JITTER: f32 = 2.0; // Serve vy drawn from [-2, 2)
    pub const PUSH_OUT: f32 = 1.0; // Clearance past the paddle face after a hit
    pub const MAX_BOUNCE_ANGLE: f32 = std::f32::consts::FRAC_PI_4;

    // AI
    pub const AI_REACTION_DISTANCE: f32 = 200.0; // Beyond this the AI may hesitate

    // Score
    pub const WIN_SCORE: u8 = 11;
    pub const WIN_MARGIN: u8 = 2;

    // Frame cadence of the display the loop is synced to
    pub const FRAME_DT: f64 = 1.0 / 60.0;
}
