//! CountdownTicker - Background task driving the active cycle's countdown.
//!
//! Once per interval the ticker asks the [`CycleStore`] to recompute the
//! countdown from the clock. The store marks the cycle finished when its
//! duration has elapsed, at which point the ticker exits.
//!
//! Elapsed time is always `now - start_date`, so a delayed or skipped
//! tick never causes drift.
//!
//! ## Shutdown
//!
//! The ticker stops on the first of:
//! - the cycle it was spawned for finishes,
//! - the active cycle changes or disappears,
//! - [`TickerHandle::cancel`] is called or the handle is dropped.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use crate::domain::foundation::CycleId;

use super::{CycleStore, TickOutcome};

/// Why a ticker stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerExit {
    /// The cycle reached its duration.
    Finished(CycleId),
    /// The cycle is no longer the active one.
    Superseded,
    /// Shutdown was requested.
    Cancelled,
}

/// Periodic countdown recomputation for one cycle.
pub struct CountdownTicker {
    store: Arc<CycleStore>,
    cycle_id: CycleId,
    interval: Duration,
}

impl CountdownTicker {
    pub fn new(store: Arc<CycleStore>, cycle_id: CycleId, interval: Duration) -> Self {
        Self {
            store,
            cycle_id,
            interval,
        }
    }

    /// Runs the loop on the current runtime and returns a handle to it.
    pub fn spawn(self) -> TickerHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let cycle_id = self.cycle_id;
        let task = tokio::spawn(async move { self.run(shutdown_rx).await });

        TickerHandle {
            cycle_id,
            shutdown: shutdown_tx,
            task,
        }
    }

    /// Run the ticker loop until the cycle ends or shutdown is signalled.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> TickerExit {
        if *shutdown.borrow() {
            return TickerExit::Cancelled;
        }

        let mut interval = time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        debug!(cycle_id = %self.cycle_id, interval_ms = self.interval.as_millis() as u64, "Ticker started");

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    // A dropped handle counts as cancellation
                    if changed.is_err() || *shutdown.borrow() {
                        debug!(cycle_id = %self.cycle_id, "Ticker cancelled");
                        return TickerExit::Cancelled;
                    }
                }

                _ = interval.tick() => {
                    if let Some(exit) = self.tick_once().await {
                        return exit;
                    }
                }
            }
        }
    }

    /// One recomputation. Returns the exit reason when the loop should stop.
    pub async fn tick_once(&self) -> Option<TickerExit> {
        match self.store.tick().await {
            TickOutcome::Counting { cycle_id, .. } if cycle_id == self.cycle_id => None,
            TickOutcome::Finished(event) if event.cycle_id() == self.cycle_id => {
                info!(cycle_id = %self.cycle_id, "Countdown reached zero");
                Some(TickerExit::Finished(self.cycle_id))
            }
            _ => {
                debug!(cycle_id = %self.cycle_id, "Cycle no longer active, ticker stopping");
                Some(TickerExit::Superseded)
            }
        }
    }
}

/// Handle to a spawned [`CountdownTicker`].
pub struct TickerHandle {
    cycle_id: CycleId,
    shutdown: watch::Sender<bool>,
    task: JoinHandle<TickerExit>,
}

impl TickerHandle {
    pub fn cycle_id(&self) -> CycleId {
        self.cycle_id
    }

    /// Asks the ticker to stop. Safe to call more than once.
    pub fn cancel(&self) {
        self.shutdown.send_replace(true);
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the ticker to stop.
    ///
    /// A panicked or aborted task is reported as cancelled.
    pub async fn join(self) -> TickerExit {
        self.task.await.unwrap_or(TickerExit::Cancelled)
    }
}
