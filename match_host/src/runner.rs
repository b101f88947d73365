use crate::MatchHost;
use game_core::{FrameControl, FrameHandle, FrameScheduler};
use std::cell::RefCell;
use std::rc::Rc;

/// Drive `host` from a frame scheduler.
///
/// The callback stops by itself once the match is over (or abandoned) and no
/// commentary is still on its way. Cancel the handle to stop it sooner.
pub fn run_match<S: FrameScheduler>(host: Rc<RefCell<MatchHost>>, scheduler: &mut S) -> FrameHandle {
    scheduler.register(Box::new(move |_time| {
        let mut host = host.borrow_mut();
        host.frame();

        if host.is_idle() && !host.is_generating() {
            FrameControl::Stop
        } else {
            FrameControl::Continue
        }
    }))
}
