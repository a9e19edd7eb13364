//! Scoped background tickers.
//!
//! DESIGN
//! ======
//! A panel that perturbs its state on a timer owns a `ScopedTask`. The task
//! is aborted when the handle drops, so unmounting a panel (or closing the
//! session that owns it) stops its timer with no separate cleanup call.
//!
//! The schedule is fixed when the ticker is spawned, so the first tick lands
//! one full period after mount no matter when the task is first polled.
//! Missed ticks are skipped rather than bursted.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::debug;

/// Shortest interval a ticker runs at; shorter periods are raised to it.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Join handle that aborts its task on drop.
#[derive(Debug)]
pub struct ScopedTask {
    name: &'static str,
    handle: JoinHandle<()>,
}

impl ScopedTask {
    pub fn spawn<F>(name: &'static str, fut: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        debug!(task = name, "task: spawned");
        Self { name, handle: tokio::spawn(fut) }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ScopedTask {
    fn drop(&mut self) {
        self.handle.abort();
        debug!(task = self.name, "task: aborted");
    }
}

/// Run `tick` every `period` until the returned handle is dropped.
pub fn spawn_ticker<F>(name: &'static str, period: Duration, mut tick: F) -> ScopedTask
where
    F: FnMut() + Send + 'static,
{
    let period = period.max(MIN_PERIOD);
    let start = Instant::now() + period;
    ScopedTask::spawn(name, async move {
        let mut interval = interval_at(start, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            tick();
        }
    })
}

#[cfg(test)]
#[path = "ticker_test.rs"]
mod tests;
