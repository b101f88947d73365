use game_core::{
    Config, Difficulty, FrameControl, FrameScheduler, GameRng, ManualScheduler, MatchPhase,
};
use match_host::{run_match, MatchHost, MessageKind, OfflineCommentator};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

fn new_host(seed: u64) -> Rc<RefCell<MatchHost>> {
    Rc::new(RefCell::new(MatchHost::new(
        Config::new(),
        Arc::new(OfflineCommentator),
        GameRng::new(seed),
    )))
}

/// Presses keys to keep the near paddle under the ball, like a player would
fn register_autopilot(host: &Rc<RefCell<MatchHost>>, scheduler: &mut ManualScheduler) {
    let host = Rc::clone(host);
    scheduler.register(Box::new(move |_| {
        let mut host = host.borrow_mut();
        if host.phase() != MatchPhase::Playing {
            return FrameControl::Stop;
        }
        let ball_y = host.game().ball().pos.y;
        let center = host.game().near().y + host.game().config().paddle_height / 2.0;
        host.key_up("ArrowUp");
        host.key_up("ArrowDown");
        if ball_y < center - 5.0 {
            host.key_down("ArrowUp");
        } else if ball_y > center + 5.0 {
            host.key_down("ArrowDown");
        }
        FrameControl::Continue
    }));
}

#[test]
fn test_full_match_reaches_game_over() {
    let host = new_host(2024);
    let mut scheduler = ManualScheduler::default();
    host.borrow_mut().start(Difficulty::Easy).unwrap();

    register_autopilot(&host, &mut scheduler);
    let handle = run_match(Rc::clone(&host), &mut scheduler);
    scheduler.pump_frames(5_000_000);

    assert!(handle.is_cancelled(), "Runner should release its handle");
    let host = host.borrow();
    assert_eq!(host.phase(), MatchPhase::GameOver);

    let winner = host.winner().expect("match has a winner");
    let score = host.score();
    let (won, lost) = (score.points(winner), score.points(winner.opponent()));
    assert!(won >= 11, "winner has {won}");
    assert!(won >= lost + 2, "{won} - {lost} is not a two point lead");

    let messages = host.feed().messages();
    assert!(messages[0].text.starts_with("Match started. Difficulty: EASY"));
    assert!(messages
        .iter()
        .any(|m| m.kind == MessageKind::System && m.text.starts_with("Game Over.")));

    let total_points = usize::from(score.near) + usize::from(score.far);
    let point_lines = messages
        .iter()
        .filter(|m| m.text == "Commentary unavailable (Missing API Key).")
        .count();
    assert_eq!(point_lines, total_points - 1, "One line per non-final point");
    assert_eq!(
        messages
            .iter()
            .filter(|m| m.kind == MessageKind::Commentary && m.text == "Match complete.")
            .count(),
        1
    );
    assert!(!host.is_generating());
}

#[test]
fn test_quit_stops_runner() {
    let host = new_host(5);
    let mut scheduler = ManualScheduler::default();
    host.borrow_mut().start(Difficulty::Medium).unwrap();
    let handle = run_match(Rc::clone(&host), &mut scheduler);

    scheduler.pump_frames(10);
    assert!(!handle.is_cancelled());

    host.borrow_mut().quit().unwrap();
    scheduler.pump_frames(10_000);
    assert!(handle.is_cancelled());
    assert_eq!(host.borrow().phase(), MatchPhase::Menu);
}

#[test]
fn test_cancelled_runner_freezes_match() {
    let host = new_host(6);
    let mut scheduler = ManualScheduler::default();
    host.borrow_mut().start(Difficulty::Hard).unwrap();
    let handle = run_match(Rc::clone(&host), &mut scheduler);

    scheduler.pump_frames(5);
    handle.cancel();
    let ticks = host.borrow().game().tick_count();
    scheduler.pump_frames(5);

    assert_eq!(host.borrow().game().tick_count(), ticks);
    assert_eq!(ticks, 5);
}
