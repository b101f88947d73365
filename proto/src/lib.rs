//! View/control protocol between the match host and a renderer
//!
//! Uses postcard for compact binary serialization, so a renderer on the other
//! side of a wasm/JS boundary can read frames without sharing Rust types.

use postcard::{from_bytes, to_allocvec};

// ============================================================================
// Control messages (renderer/input to host)
// ============================================================================

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ControlMsg {
    /// Key press or release, using DOM key names ("ArrowUp", "w", ...)
    Key { key: String, pressed: bool },

    /// Start (or restart) a match: 0 = easy, 1 = medium, 2 = hard, 3 = impossible
    Start { difficulty: u8 },

    /// Pause a running match or resume a paused one
    TogglePause,

    /// Back to the menu
    Quit,
}

// ============================================================================
// View messages (host to renderer)
// ============================================================================

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ViewMsg {
    /// Read-only frame snapshot
    Frame {
        tick: u64,
        ball_x: f32,
        ball_y: f32,
        ball_vx: f32,
        ball_vy: f32,
        paddle_near_y: f32,
        paddle_far_y: f32,
        score_near: u8,
        score_far: u8,
        phase: u8, // 0 = menu, 1 = playing, 2 = paused, 3 = game over
        hit_wall: bool,
        hit_paddle: bool,
    },

    /// New commentary log line
    Commentary { id: u64, text: String, system: bool },

    /// Match finished
    GameOver {
        winner: u8, // 0 = near, 1 = far
    },
}

// ============================================================================
// Serialization Helpers
// ============================================================================

impl ControlMsg {
    /// Serialize control message to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, postcard::Error> {
        to_allocvec(self)
    }

    /// Deserialize control message from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        from_bytes(bytes)
    }
}

impl ViewMsg {
    /// Serialize view message to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, postcard::Error> {
        to_allocvec(self)
    }

    /// Deserialize view message from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        from_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_serialization() {
        let msg = ControlMsg::Key {
            key: "ArrowUp".to_string(),
            pressed: true,
        };
        let bytes = msg.to_bytes().expect("Serialization should succeed");
        let decoded = ControlMsg::from_bytes(&bytes).expect("Deserialization should succeed");
        assert_eq!(decoded, msg);
    }

    #[test]
    fn test_frame_serialization() {
        let msg = ViewMsg::Frame {
            tick: 100,
            ball_x: 400.0,
            ball_y: 250.0,
            ball_vx: 4.0,
            ball_vy: -1.5,
            paddle_near_y: 210.0,
            paddle_far_y: 190.0,
            score_near: 5,
            score_far: 3,
            phase: 1,
            hit_wall: false,
            hit_paddle: true,
        };
        let bytes = msg.to_bytes().expect("Serialization should succeed");
        match ViewMsg::from_bytes(&bytes).expect("Deserialization should succeed") {
            ViewMsg::Frame {
                tick,
                ball_x,
                score_far,
                ..
            } => {
                assert_eq!(tick, 100);
                assert_eq!(ball_x, 400.0);
                assert_eq!(score_far, 3);
            }
            other => panic!("Message type mismatch: {other:?}"),
        }
    }

    #[test]
    fn test_frame_tick_keeps_full_width() {
        let msg = ViewMsg::Frame {
            tick: u64::from(u32::MAX) + 7,
            ball_x: 0.0,
            ball_y: 0.0,
            ball_vx: 0.0,
            ball_vy: 0.0,
            paddle_near_y: 0.0,
            paddle_far_y: 0.0,
            score_near: 0,
            score_far: 0,
            phase: 1,
            hit_wall: true,
            hit_paddle: false,
        };
        let bytes = msg.to_bytes().unwrap();
        assert_eq!(ViewMsg::from_bytes(&bytes).unwrap(), msg);
    }

    #[test]
    fn test_truncated_bytes_rejected() {
        let bytes = ViewMsg::GameOver { winner: 1 }.to_bytes().unwrap();
        assert!(ViewMsg::from_bytes(&bytes[..bytes.len() - 1]).is_err());
    }
}
