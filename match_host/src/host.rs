//! Match orchestration
//!
//! Owns everything around the simulation: phase, score, win rule, key state
//! and the commentary feed. Runs one `MatchLoop` tick per frame.

use crate::commentary::{side_label, CommentaryDesk, CommentaryRequest, Commentator};
use crate::error::{HostError, Result};
use crate::feed::{CommentaryFeed, MessageKind};
use crate::fsm::{MatchAction, PhaseMachine};
use crate::input::apply_key;
use crate::score::{Score, WinRule};
use game_core::{
    Config, Difficulty, GameRng, InputState, MatchLoop, MatchPhase, Side, TickResult,
};
use proto::{ControlMsg, ViewMsg};
use std::sync::Arc;

pub struct MatchHost {
    game: MatchLoop,
    fsm: PhaseMachine,
    score: Score,
    rule: WinRule,
    difficulty: Difficulty,
    input: InputState,
    feed: CommentaryFeed,
    desk: CommentaryDesk,
    winner: Option<Side>,
    last_sent_id: u64,
    game_over_sent: bool,
}

impl MatchHost {
    pub fn new(config: Config, commentator: Arc<dyn Commentator>, rng: GameRng) -> Self {
        let difficulty = Difficulty::default();
        let rule = WinRule::from_config(&config);
        Self {
            game: MatchLoop::new(config, difficulty.profile(), rng),
            fsm: PhaseMachine::new(),
            score: Score::new(),
            rule,
            difficulty,
            input: InputState::new(),
            feed: CommentaryFeed::new(),
            desk: CommentaryDesk::new(commentator),
            winner: None,
            last_sent_id: 0,
            game_over_sent: false,
        }
    }

    fn apply(&mut self, action: MatchAction) -> Result<()> {
        let result = self.fsm.transition(action);
        if result.success() {
            Ok(())
        } else {
            Err(HostError::InvalidTransition {
                phase: result.from_phase(),
                action,
            })
        }
    }

    /// Start a match from the menu or the game over screen
    pub fn start(&mut self, difficulty: Difficulty) -> Result<()> {
        self.apply(MatchAction::Start)?;

        self.difficulty = difficulty;
        self.game.set_profile(difficulty.profile());
        self.game.reset_match(Side::Far);
        self.score = Score::new();
        self.winner = None;
        self.game_over_sent = false;
        self.desk.new_match();
        self.feed
            .reset(format!("Match started. Difficulty: {}", difficulty));

        log::info!("match started on {}", difficulty);
        Ok(())
    }

    pub fn start_named(&mut self, difficulty: &str) -> Result<()> {
        self.start(difficulty.parse()?)
    }

    /// Pause while playing, resume while paused
    pub fn toggle_pause(&mut self) -> Result<MatchPhase> {
        let action = self
            .fsm
            .toggle_action()
            .ok_or(HostError::InvalidTransition {
                phase: self.fsm.phase(),
                action: MatchAction::Pause,
            })?;
        self.apply(action)?;
        Ok(self.fsm.phase())
    }

    pub fn quit(&mut self) -> Result<()> {
        self.apply(MatchAction::Quit)?;
        log::info!("back to menu");
        Ok(())
    }

    pub fn key_down(&mut self, key: &str) -> bool {
        apply_key(&mut self.input, key, true)
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        apply_key(&mut self.input, key, false)
    }

    /// Run one display frame
    pub fn frame(&mut self) -> TickResult {
        self.poll_commentary();

        let mut scored = None;
        let result = self
            .game
            .tick(&self.input, self.fsm.phase(), |side| scored = Some(side));

        if let Some(scorer) = scored {
            self.on_score(scorer);
        }
        result
    }

    /// Merge finished commentary into the feed
    pub fn poll_commentary(&mut self) {
        for text in self.desk.poll() {
            self.feed.push(text, MessageKind::Commentary);
        }
    }

    fn on_score(&mut self, scorer: Side) {
        // Read the score after recording so win checks see this point
        self.score.record(scorer);
        log::info!(
            "{} scores, {} - {}",
            side_label(scorer),
            self.score.near,
            self.score.far
        );

        if let Some(winner) = self.score.has_winner(self.rule) {
            self.finish(winner);
            return;
        }

        self.desk.dispatch(CommentaryRequest::Point {
            score: self.score,
            scorer,
            streak: self.score.streak(),
            match_point: self.score.is_match_point(self.rule),
        });
    }

    fn finish(&mut self, winner: Side) {
        if let Err(err) = self.apply(MatchAction::Finish) {
            log::warn!("{}", err);
            return;
        }
        self.winner = Some(winner);
        self.feed.push(
            format!("Game Over. {} wins!", side_label(winner)),
            MessageKind::System,
        );
        self.desk.dispatch(CommentaryRequest::Summary {
            score: self.score,
            difficulty: self.difficulty,
        });
        log::info!("{} wins the match", side_label(winner));
    }

    /// Apply an encoded control message
    pub fn handle_control(&mut self, bytes: &[u8]) -> Result<()> {
        match ControlMsg::from_bytes(bytes)? {
            ControlMsg::Key { key, pressed } => {
                apply_key(&mut self.input, &key, pressed);
                Ok(())
            }
            ControlMsg::Start { difficulty } => {
                let difficulty = Difficulty::ALL
                    .get(usize::from(difficulty))
                    .copied()
                    .ok_or(HostError::DifficultyIndex(difficulty))?;
                self.start(difficulty)
            }
            ControlMsg::TogglePause => self.toggle_pause().map(|_| ()),
            ControlMsg::Quit => self.quit(),
        }
    }

    /// Messages for the renderer since the last call: one frame, any new
    /// feed lines, and the result once per match
    pub fn view_messages(&mut self) -> Vec<ViewMsg> {
        let ball = self.game.ball();
        let events = self.game.events();
        let mut msgs = vec![ViewMsg::Frame {
            tick: self.game.tick_count(),
            ball_x: ball.pos.x,
            ball_y: ball.pos.y,
            ball_vx: ball.vel.x,
            ball_vy: ball.vel.y,
            paddle_near_y: self.game.near().y,
            paddle_far_y: self.game.far().y,
            score_near: self.score.near,
            score_far: self.score.far,
            phase: phase_code(self.fsm.phase()),
            hit_wall: events.ball_hit_wall,
            hit_paddle: events.ball_hit_paddle.is_some(),
        }];

        for message in self.feed.since(self.last_sent_id) {
            msgs.push(ViewMsg::Commentary {
                id: message.id,
                text: message.text.clone(),
                system: message.kind == MessageKind::System,
            });
        }
        if let Some(last) = self.feed.last() {
            self.last_sent_id = self.last_sent_id.max(last.id);
        }

        if let (Some(winner), false) = (self.winner, self.game_over_sent) {
            msgs.push(ViewMsg::GameOver {
                winner: side_code(winner),
            });
            self.game_over_sent = true;
        }
        msgs
    }

    /// `view_messages`, encoded
    pub fn encode_view(&mut self) -> Result<Vec<Vec<u8>>> {
        self.view_messages()
            .iter()
            .map(|m| m.to_bytes().map_err(HostError::from))
            .collect()
    }

    pub fn phase(&self) -> MatchPhase {
        self.fsm.phase()
    }

    /// In the menu or on the game over screen
    pub fn is_idle(&self) -> bool {
        self.fsm.is_idle()
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn feed(&self) -> &CommentaryFeed {
        &self.feed
    }

    pub fn game(&self) -> &MatchLoop {
        &self.game
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn is_generating(&self) -> bool {
        self.desk.is_generating()
    }
}

fn phase_code(phase: MatchPhase) -> u8 {
    match phase {
        MatchPhase::Menu => 0,
        MatchPhase::Playing => 1,
        MatchPhase::Paused => 2,
        MatchPhase::GameOver => 3,
    }
}

fn side_code(side: Side) -> u8 {
    match side {
        Side::Near => 0,
        Side::Far => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commentary::OfflineCommentator;

    fn host() -> MatchHost {
        MatchHost::new(
            Config::new(),
            Arc::new(OfflineCommentator),
            GameRng::new(11),
        )
    }

    #[test]
    fn test_start_resets_match() {
        let mut host = host();
        host.start(Difficulty::Hard).unwrap();

        assert_eq!(host.phase(), MatchPhase::Playing);
        assert_eq!(host.difficulty(), Difficulty::Hard);
        assert_eq!(host.game().profile(), &Difficulty::Hard.profile());
        assert_eq!(host.feed().messages().len(), 1);
        assert_eq!(
            host.feed().messages()[0].text,
            "Match started. Difficulty: HARD"
        );
        assert!(host.game().ball().vel.x > 0.0, "Opening serve goes to the AI");
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut host = host();
        host.start(Difficulty::Easy).unwrap();
        host.frame();

        assert_eq!(host.toggle_pause().unwrap(), MatchPhase::Paused);
        let before = *host.game().ball();
        for _ in 0..10 {
            host.frame();
        }
        assert_eq!(*host.game().ball(), before);

        assert_eq!(host.toggle_pause().unwrap(), MatchPhase::Playing);
        host.frame();
        assert_ne!(*host.game().ball(), before);
    }

    #[test]
    fn test_toggle_pause_from_menu_is_rejected() {
        let mut host = host();
        assert!(matches!(
            host.toggle_pause(),
            Err(HostError::InvalidTransition {
                phase: MatchPhase::Menu,
                ..
            })
        ));
    }

    #[test]
    fn test_keys_drive_near_paddle() {
        let mut host = host();
        host.start(Difficulty::Medium).unwrap();
        assert!(host.key_down("ArrowDown"));
        let r = host.frame();
        assert_eq!(r.near.y, 216.0);
        host.key_up("ArrowDown");
        let r = host.frame();
        assert_eq!(r.near.y, 216.0);
    }

    #[test]
    fn test_control_messages() {
        let mut host = host();
        let start = ControlMsg::Start { difficulty: 3 }.to_bytes().unwrap();
        host.handle_control(&start).unwrap();
        assert_eq!(host.difficulty(), Difficulty::Impossible);

        let key = ControlMsg::Key {
            key: "w".into(),
            pressed: true,
        };
        host.handle_control(&key.to_bytes().unwrap()).unwrap();
        assert!(host.input().up);

        let bad = ControlMsg::Start { difficulty: 9 }.to_bytes().unwrap();
        host.quit().unwrap();
        assert!(matches!(
            host.handle_control(&bad),
            Err(HostError::DifficultyIndex(9))
        ));

        assert!(matches!(
            host.handle_control(&[0xff, 0xff]),
            Err(HostError::Codec(_))
        ));
    }

    #[test]
    fn test_view_messages_send_feed_once() {
        let mut host = host();
        let first = host.view_messages();
        assert!(matches!(first[0], ViewMsg::Frame { phase: 0, .. }));
        assert_eq!(first.len(), 2, "Frame plus the welcome line");

        let second = host.view_messages();
        assert_eq!(second.len(), 1, "Only the frame");

        host.start(Difficulty::Easy).unwrap();
        let third = host.view_messages();
        assert!(third.iter().any(|m| matches!(
            m,
            ViewMsg::Commentary { system: true, text, .. } if text.starts_with("Match started")
        )));
    }

    #[test]
    fn test_view_frame_reports_tick_and_hits() {
        let mut host = host();
        host.start(Difficulty::Impossible).unwrap();
        host.view_messages();

        let mut hits = 0;
        for _ in 0..2000 {
            host.frame();
            let events = host.game().events().clone();
            match host.view_messages()[0] {
                ViewMsg::Frame {
                    tick,
                    hit_wall,
                    hit_paddle,
                    ..
                } => {
                    assert_eq!(tick, host.game().tick_count());
                    assert_eq!(hit_wall, events.ball_hit_wall);
                    assert_eq!(hit_paddle, events.ball_hit_paddle.is_some());
                    if hit_wall || hit_paddle {
                        hits += 1;
                    }
                }
                ref other => panic!("expected a frame, got {other:?}"),
            }
            if host.is_idle() {
                break;
            }
        }
        assert!(hits > 0, "No wall or paddle contact in 2000 ticks");
    }

    #[test]
    fn test_start_named() {
        let mut host = host();
        host.start_named("impossible").unwrap();
        assert_eq!(host.difficulty(), Difficulty::Impossible);
        host.quit().unwrap();
        assert!(matches!(
            host.start_named("legendary"),
            Err(HostError::Difficulty(_))
        ));
    }
}
