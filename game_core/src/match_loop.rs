//! Per-frame match driver
//!
//! Owns the ball and both paddles for the length of a match. Everything
//! else (score, phase, input) is read or reported through the tick call.

use crate::{
    compute_target, create_paddle, enforce_invariants, move_paddle, serve_ball, step, Ball,
    Config, DifficultyProfile, Events, GameRng, InputState, MatchPhase, Paddle, Side,
};
use glam::Vec2;

/// State after a tick, for rendering and scoring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickResult {
    pub ball: Ball,
    pub near: Paddle,
    pub far: Paddle,
    pub scored: Option<Side>,
}

pub struct MatchLoop {
    config: Config,
    profile: DifficultyProfile,
    ball: Ball,
    near: Paddle,
    far: Paddle,
    rng: GameRng,
    events: Events,
    tick: u64,
}

impl MatchLoop {
    /// Create a loop with the ball served toward the far side
    pub fn new(config: Config, profile: DifficultyProfile, rng: GameRng) -> Self {
        let near = create_paddle(Side::Near, &config);
        let far = create_paddle(Side::Far, &config);
        let mut this = Self {
            ball: Ball::new(config.center(), Vec2::ZERO),
            config,
            profile,
            near,
            far,
            rng,
            events: Events::new(),
            tick: 0,
        };
        this.reset_match(Side::Far);
        this
    }

    /// Center the paddles and serve toward `receiver`
    pub fn reset_match(&mut self, receiver: Side) {
        self.near = create_paddle(Side::Near, &self.config);
        self.far = create_paddle(Side::Far, &self.config);
        serve_ball(&mut self.ball, receiver, &self.config, &mut self.rng);
        self.events.clear();
        self.tick = 0;
        log::debug!("match reset, serving toward {:?}", receiver);
    }

    /// Re-serve the ball only, paddles stay where they are
    pub fn serve(&mut self, receiver: Side) {
        serve_ball(&mut self.ball, receiver, &self.config, &mut self.rng);
    }

    pub fn set_profile(&mut self, profile: DifficultyProfile) {
        self.profile = profile;
    }

    /// Run one frame.
    ///
    /// Does nothing unless `phase` is Playing. A point calls `on_score` once
    /// and serves the ball toward the side that conceded.
    pub fn tick<F: FnMut(Side)>(
        &mut self,
        input: &InputState,
        phase: MatchPhase,
        mut on_score: F,
    ) -> TickResult {
        if phase != MatchPhase::Playing {
            return self.result(None);
        }

        // Clear events at start of tick
        self.events.clear();

        // 1. Player paddle from held keys
        move_paddle(&mut self.near, input, &self.config);

        // 2. AI paddle
        self.far.y = compute_target(
            &self.ball,
            &self.far,
            &self.profile,
            &self.config,
            &mut self.rng,
        );

        // 3. Ball, collisions, scoring
        let scored = step(
            &mut self.ball,
            &self.near,
            &self.far,
            &self.config,
            &mut self.events,
        );

        enforce_invariants(
            &mut self.ball,
            [&mut self.near, &mut self.far],
            &self.config,
            &mut self.rng,
        );

        if let Some(scorer) = scored {
            log::debug!("tick {}: {:?} scored", self.tick, scorer);
            on_score(scorer);
            self.serve(scorer.opponent());
        }

        self.tick += 1;
        self.result(scored)
    }

    fn result(&self, scored: Option<Side>) -> TickResult {
        TickResult {
            ball: self.ball,
            near: self.near,
            far: self.far,
            scored,
        }
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn near(&self) -> &Paddle {
        &self.near
    }

    pub fn far(&self) -> &Paddle {
        &self.far
    }

    pub fn events(&self) -> &Events {
        &self.events
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }

    /// Ticks run since the last reset
    pub fn tick_count(&self) -> u64 {
        self.tick
    }
}
