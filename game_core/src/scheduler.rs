//! Frame scheduling
//!
//! Callbacks are registered once and then invoked once per display frame
//! until they stop themselves or their handle is cancelled.

use crate::Params;
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Timing passed to each frame callback
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    pub frame: u64,
    pub dt: f64,  // Seconds since previous frame
    pub now: f64, // Seconds since the scheduler started
}

/// What a callback wants after running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Stop,
}

/// Cancels a registered callback. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct FrameHandle(Rc<Cell<bool>>);

impl FrameHandle {
    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

pub type FrameCallback = Box<dyn FnMut(FrameTime) -> FrameControl>;

/// Something that calls back once per display refresh
pub trait FrameScheduler {
    fn register(&mut self, callback: FrameCallback) -> FrameHandle;
}

/// Scheduler driven by explicit `pump` calls with a fixed frame period
pub struct ManualScheduler {
    entries: Vec<(FrameHandle, FrameCallback)>,
    time: FrameTime,
}

impl ManualScheduler {
    pub fn new(dt: f64) -> Self {
        Self {
            entries: Vec::new(),
            time: FrameTime {
                frame: 0,
                dt,
                now: 0.0,
            },
        }
    }

    /// Run one frame. Returns how many callbacks ran.
    pub fn pump(&mut self) -> usize {
        self.entries.retain(|(handle, _)| !handle.is_cancelled());

        let time = self.time;
        let mut ran = 0;
        for (handle, callback) in &mut self.entries {
            if handle.is_cancelled() {
                continue;
            }
            ran += 1;
            if callback(time) == FrameControl::Stop {
                handle.cancel();
            }
        }
        self.entries.retain(|(handle, _)| !handle.is_cancelled());

        self.time.frame += 1;
        self.time.now += self.time.dt;
        ran
    }

    /// Pump up to `frames` frames, stopping early once nothing is registered
    pub fn pump_frames(&mut self, frames: u64) -> u64 {
        let mut pumped = 0;
        while pumped < frames && self.active() > 0 {
            self.pump();
            pumped += 1;
        }
        pumped
    }

    /// Live callbacks
    pub fn active(&self) -> usize {
        self.entries
            .iter()
            .filter(|(handle, _)| !handle.is_cancelled())
            .count()
    }

    pub fn frame(&self) -> u64 {
        self.time.frame
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new(Params::FRAME_DT)
    }
}

impl FrameScheduler for ManualScheduler {
    fn register(&mut self, callback: FrameCallback) -> FrameHandle {
        let handle = FrameHandle::default();
        self.entries.push((handle.clone(), callback));
        handle
    }
}

/// Wall-clock paced scheduler for headless hosts without a display
pub struct PacedScheduler {
    inner: ManualScheduler,
    period: Duration,
}

impl PacedScheduler {
    pub fn new(hz: u32) -> Self {
        let hz = hz.max(1);
        Self {
            inner: ManualScheduler::new(1.0 / f64::from(hz)),
            period: Duration::from_secs(1) / hz,
        }
    }

    /// Block, running frames on cadence until every callback has stopped
    pub fn run(&mut self) {
        let mut next = Instant::now();
        while self.inner.active() > 0 {
            self.inner.pump();
            next += self.period;
            let now = Instant::now();
            if next > now {
                std::thread::sleep(next - now);
            } else {
                // Fell behind, don't try to catch up
                next = now;
            }
        }
    }
}

impl FrameScheduler for PacedScheduler {
    fn register(&mut self, callback: FrameCallback) -> FrameHandle {
        self.inner.register(callback)
    }
}
