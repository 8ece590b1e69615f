use std::fmt;
use std::time::Duration;

use anyhow::Result;

/// Identifies one repeating schedule handed out by a [`Timer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub u64);

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Scheduling capability used for autoplay.
///
/// A schedule fires every `delay` until canceled. Each firing is delivered
/// back to the controller as `CarouselEvent::AutoplayTick(handle)`.
pub trait Timer {
    fn schedule(&mut self, delay: Duration) -> Result<TimerHandle>;
    fn cancel(&mut self, handle: TimerHandle);
}
