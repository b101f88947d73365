//! Match Phase State Machine
//!
//! Gates when the simulation runs. The loop itself only reads the phase.

use game_core::MatchPhase;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Actions that trigger phase transitions
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchAction {
    /// Difficulty picked, from the menu or the game over screen
    Start,
    Pause,
    Resume,
    /// Win condition reached
    Finish,
    Quit,
}

/// Result of a phase transition
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionResult {
    success: bool,
    from_phase: MatchPhase,
    to_phase: MatchPhase,
    action: MatchAction,
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl TransitionResult {
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn success(&self) -> bool {
        self.success
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn from_phase(&self) -> MatchPhase {
        self.from_phase
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn to_phase(&self) -> MatchPhase {
        self.to_phase
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn action(&self) -> MatchAction {
        self.action
    }
}

/// Match phase machine
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
#[derive(Debug, Default)]
pub struct PhaseMachine {
    phase: MatchPhase,
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl PhaseMachine {
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(constructor))]
    pub fn new() -> Self {
        Self {
            phase: MatchPhase::Menu,
        }
    }

    /// Get current phase
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// Attempt a transition
    pub fn transition(&mut self, action: MatchAction) -> TransitionResult {
        let from = self.phase;

        match self.next_phase(action) {
            Some(to) => {
                self.phase = to;
                log::debug!("phase {:?} -> {:?} on {:?}", from, to, action);
                TransitionResult {
                    success: true,
                    from_phase: from,
                    to_phase: to,
                    action,
                }
            }
            None => TransitionResult {
                success: false,
                from_phase: from,
                to_phase: from,
                action,
            },
        }
    }

    /// The pause button's action in the current phase, if it has one
    pub fn toggle_action(&self) -> Option<MatchAction> {
        match self.phase {
            MatchPhase::Playing => Some(MatchAction::Pause),
            MatchPhase::Paused => Some(MatchAction::Resume),
            _ => None,
        }
    }

    /// Menu or game over, where a difficulty can be picked
    pub fn is_idle(&self) -> bool {
        matches!(self.phase, MatchPhase::Menu | MatchPhase::GameOver)
    }
}

impl PhaseMachine {
    /// Get next phase for a given action (if valid)
    fn next_phase(&self, action: MatchAction) -> Option<MatchPhase> {
        match (self.phase, action) {
            // From Menu
            (MatchPhase::Menu, MatchAction::Start) => Some(MatchPhase::Playing),

            // From Playing
            (MatchPhase::Playing, MatchAction::Pause) => Some(MatchPhase::Paused),
            (MatchPhase::Playing, MatchAction::Finish) => Some(MatchPhase::GameOver),
            (MatchPhase::Playing, MatchAction::Quit) => Some(MatchPhase::Menu),

            // From Paused
            (MatchPhase::Paused, MatchAction::Resume) => Some(MatchPhase::Playing),
            (MatchPhase::Paused, MatchAction::Quit) => Some(MatchPhase::Menu),

            // From GameOver
            (MatchPhase::GameOver, MatchAction::Start) => Some(MatchPhase::Playing),
            (MatchPhase::GameOver, MatchAction::Quit) => Some(MatchPhase::Menu),

            // Invalid transition
            _ => None,
        }
    }
}
