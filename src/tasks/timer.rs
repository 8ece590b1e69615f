use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Result, ensure};
use tokio::sync::mpsc::Sender;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::timer::{Timer, TimerHandle};

/// Timer capability backed by tokio tasks.
///
/// Each schedule is a task that sends its handle on `ticks` every `delay`,
/// first after one full delay. Canceling a handle stops its task; the root
/// token stops all of them.
pub struct TokioTimer {
    ticks: Sender<TimerHandle>,
    root: CancellationToken,
    live: HashMap<TimerHandle, CancellationToken>,
    next_id: u64,
}

impl TokioTimer {
    pub fn new(ticks: Sender<TimerHandle>, root: CancellationToken) -> Self {
        Self {
            ticks,
            root,
            live: HashMap::new(),
            next_id: 0,
        }
    }

    /// Number of schedules that have not been canceled.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

impl Timer for TokioTimer {
    fn schedule(&mut self, delay: Duration) -> Result<TimerHandle> {
        ensure!(!delay.is_zero(), "autoplay delay must be greater than zero");
        ensure!(!self.root.is_cancelled(), "timer is shut down");

        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        let cancel = self.root.child_token();
        let ticks = self.ticks.clone();
        self.live.insert(handle, cancel.clone());

        tokio::spawn(async move {
            let mut every = interval_at(Instant::now() + delay, delay);
            every.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = every.tick() => {
                        trace!(%handle, "tick");
                        if ticks.send(handle).await.is_err() {
                            debug!(%handle, "tick receiver closed");
                            break;
                        }
                    }
                }
            }
        });
        Ok(handle)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(token) = self.live.remove(&handle) {
            token.cancel();
        }
    }
}

impl Drop for TokioTimer {
    fn drop(&mut self) {
        for token in self.live.values() {
            token.cancel();
        }
    }
}
