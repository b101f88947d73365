//! Match host: everything around the simulation core
//!
//! Phase machine, score and win rule, keyboard mapping, commentary feed and
//! the frame driver that feeds `game_core` one tick per display refresh.

pub mod commentary;
pub mod error;
pub mod feed;
pub mod fsm;
pub mod host;
pub mod input;
pub mod runner;
pub mod score;

pub use commentary::{Commentator, CommentaryError, CommentaryRequest, OfflineCommentator};
pub use error::HostError;
pub use feed::{CommentaryFeed, FeedMessage, MessageKind};
pub use fsm::{MatchAction, PhaseMachine, TransitionResult};
pub use host::MatchHost;
pub use runner::run_match;
pub use score::{Score, WinRule};
