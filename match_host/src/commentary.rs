//! Match commentary
//!
//! Text comes from a [`Commentator`], usually a hosted language model. Every
//! request runs on its own worker thread and reports back over a channel, so
//! a slow or failing commentator can never hold up a frame. Failures turn
//! into fixed fallback lines.

use crate::Score;
use crossbeam_channel::{Receiver, Sender};
use game_core::{Difficulty, Side};
use std::sync::Arc;
use std::thread;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommentaryError {
    #[error("commentary credentials are not configured")]
    MissingCredentials,

    #[error("commentary request failed: {0}")]
    Request(String),
}

/// Display name for a side
pub fn side_label(side: Side) -> &'static str {
    match side {
        Side::Near => "Player",
        Side::Far => "Computer",
    }
}

/// What to comment on
#[derive(Debug, Clone, PartialEq)]
pub enum CommentaryRequest {
    /// Reaction to a point mid-match
    Point {
        score: Score,
        scorer: Side,
        streak: u8,
        match_point: bool,
    },
    /// Wrap-up once the match is decided
    Summary { score: Score, difficulty: Difficulty },
}

impl CommentaryRequest {
    /// Prompt text for a language model
    pub fn prompt(&self) -> String {
        match self {
            CommentaryRequest::Point {
                score,
                scorer,
                streak,
                match_point,
            } => format!(
                "You are a loud, quick-witted table tennis commentator.\n\
                 Point scored by: {scorer}\n\
                 Score: Player (human) {near} - {far} Computer (AI)\n\
                 Current streak: {streak}\n\
                 Match point: {mp}\n\
                 Reply with ONE sentence of at most 15 words reacting to the point. \
                 Tease the human if they are far behind, get excited if it is close. \
                 No hashtags.",
                scorer = side_label(*scorer),
                near = score.near,
                far = score.far,
                mp = if *match_point { "YES" } else { "NO" },
            ),
            CommentaryRequest::Summary { score, difficulty } => {
                let winner = if score.near > score.far {
                    Side::Near
                } else {
                    Side::Far
                };
                format!(
                    "The table tennis match has ended.\n\
                     Winner: {winner}\n\
                     Final score: {near} - {far}\n\
                     Difficulty: {difficulty}\n\
                     Summarize the performance in at most 50 words. \
                     A human win on IMPOSSIBLE deserves serious awe.",
                    winner = side_label(winner),
                    near = score.near,
                    far = score.far,
                )
            }
        }
    }

    /// Line to show when the commentator can't produce one
    pub fn fallback(&self, err: &CommentaryError) -> &'static str {
        match (self, err) {
            (CommentaryRequest::Point { .. }, CommentaryError::MissingCredentials) => {
                "Commentary unavailable (Missing API Key)."
            }
            (CommentaryRequest::Point { .. }, CommentaryError::Request(_)) => "What a shot!",
            (CommentaryRequest::Summary { .. }, CommentaryError::MissingCredentials) => {
                "Match complete."
            }
            (CommentaryRequest::Summary { .. }, CommentaryError::Request(_)) => {
                "Match complete. Thanks for playing!"
            }
        }
    }
}

/// Source of commentary text. Called off the frame thread.
pub trait Commentator: Send + Sync {
    fn generate(&self, request: &CommentaryRequest) -> Result<String, CommentaryError>;
}

/// Commentator with no backend configured
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineCommentator;

impl Commentator for OfflineCommentator {
    fn generate(&self, _request: &CommentaryRequest) -> Result<String, CommentaryError> {
        Err(CommentaryError::MissingCredentials)
    }
}

/// Resolve a request to display text, never failing
pub fn resolve(commentator: &dyn Commentator, request: &CommentaryRequest) -> String {
    match commentator.generate(request) {
        Ok(text) => text.trim().to_string(),
        Err(err) => {
            log::warn!("commentary fallback: {}", err);
            request.fallback(&err).to_string()
        }
    }
}

struct Delivery {
    generation: u64,
    text: String,
}

/// Dispatches commentary requests and collects their results
pub struct CommentaryDesk {
    commentator: Arc<dyn Commentator>,
    tx: Sender<Delivery>,
    rx: Receiver<Delivery>,
    pending: usize,
    generation: u64,
}

impl CommentaryDesk {
    pub fn new(commentator: Arc<dyn Commentator>) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self {
            commentator,
            tx,
            rx,
            pending: 0,
            generation: 0,
        }
    }

    /// Fire a request. The result shows up in a later `poll`.
    pub fn dispatch(&mut self, request: CommentaryRequest) {
        let generation = self.generation;
        let tx = self.tx.clone();
        let commentator = Arc::clone(&self.commentator);
        let worker_request = request.clone();

        let spawned = thread::Builder::new()
            .name("commentary".into())
            .spawn(move || {
                let text = resolve(commentator.as_ref(), &worker_request);
                // Receiver gone means the host was dropped
                let _ = tx.send(Delivery { generation, text });
            });

        match spawned {
            Ok(_) => self.pending += 1,
            Err(err) => {
                log::warn!("could not spawn commentary worker: {}", err);
                self.deliver_fallback(&request, &CommentaryError::Request(err.to_string()));
            }
        }
    }

    /// Queue the fallback line for `request` without asking the commentator
    fn deliver_fallback(&mut self, request: &CommentaryRequest, err: &CommentaryError) {
        let delivery = Delivery {
            generation: self.generation,
            text: request.fallback(err).to_string(),
        };
        // We hold the receiver, so this cannot fail
        if self.tx.send(delivery).is_ok() {
            self.pending += 1;
        }
    }

    /// Drain finished requests without blocking. Results from before the
    /// last `new_match` are dropped.
    pub fn poll(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        for delivery in self.rx.try_iter() {
            self.pending = self.pending.saturating_sub(1);
            if delivery.generation == self.generation {
                lines.push(delivery.text);
            } else {
                log::debug!("dropping commentary from an earlier match");
            }
        }
        lines
    }

    /// Start a new match; anything still in flight is discarded on arrival
    pub fn new_match(&mut self) {
        self.generation += 1;
    }

    pub fn is_generating(&self) -> bool {
        self.pending > 0
    }
}
