//! FocusTimer - Session facade tying the store, form policy and ticker.
//!
//! Hosts talk to this type instead of wiring a [`CycleStore`] and a
//! [`CountdownTicker`] by hand. It owns at most one running ticker and
//! replaces it whenever the active cycle changes.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::cycle::CycleEvent;
use crate::domain::foundation::CycleId;

use super::{
    CountdownTicker, CycleDurationPolicy, CycleStore, NewCycleForm, StartCycleError, TickerExit,
    TickerHandle,
};

pub struct FocusTimer {
    store: Arc<CycleStore>,
    policy: CycleDurationPolicy,
    tick_interval: Duration,
    ticker: Mutex<Option<TickerHandle>>,
}

impl FocusTimer {
    pub fn new(store: Arc<CycleStore>, policy: CycleDurationPolicy, tick_interval: Duration) -> Self {
        Self {
            store,
            policy,
            tick_interval,
            ticker: Mutex::new(None),
        }
    }

    pub fn store(&self) -> &Arc<CycleStore> {
        &self.store
    }

    pub fn policy(&self) -> &CycleDurationPolicy {
        &self.policy
    }

    /// Starts ticking for a cycle that was active when the store was restored.
    ///
    /// Returns the cycle id when a ticker was started.
    pub async fn resume(&self) -> Option<CycleId> {
        let cycle_id = self.store.active_cycle_id().await?;
        self.spawn_ticker(cycle_id).await;
        Some(cycle_id)
    }

    /// Validates `form`, starts the cycle and begins ticking.
    pub async fn start(&self, form: NewCycleForm) -> Result<CycleId, StartCycleError> {
        let cmd = form.validate(&self.policy)?;
        let cycle_id = self.store.start_new_cycle(cmd).await?;
        self.spawn_ticker(cycle_id).await;
        Ok(cycle_id)
    }

    /// Interrupts the active cycle and stops the ticker.
    pub async fn interrupt(&self) -> Option<CycleEvent> {
        let event = self.store.interrupt_active_cycle().await;
        self.stop_ticker().await;
        event
    }

    pub async fn is_ticking(&self) -> bool {
        self.ticker
            .lock()
            .await
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Waits until the current ticker stops. `None` when nothing is ticking.
    pub async fn wait(&self) -> Option<TickerExit> {
        let handle = self.ticker.lock().await.take()?;
        Some(handle.join().await)
    }

    /// Cancels the ticker, if any. The active cycle keeps running.
    pub async fn stop_ticker(&self) {
        if let Some(handle) = self.ticker.lock().await.take() {
            handle.cancel();
            debug!(cycle_id = %handle.cycle_id(), "Ticker stopped");
        }
    }

    async fn spawn_ticker(&self, cycle_id: CycleId) {
        let handle =
            CountdownTicker::new(self.store.clone(), cycle_id, self.tick_interval).spawn();
        if let Some(previous) = self.ticker.lock().await.replace(handle) {
            previous.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemorySnapshotStore, ManualClock};
    use crate::domain::foundation::{CycleStatus, Timestamp, ValidationError};

    fn timer() -> (FocusTimer, ManualClock) {
        let clock = ManualClock::new(Timestamp::from_unix_secs(1_700_000_000));
        let store = Arc::new(CycleStore::new(
            Arc::new(InMemorySnapshotStore::new()),
            Arc::new(clock.clone()),
        ));
        (
            FocusTimer::new(store, CycleDurationPolicy::default(), Duration::from_secs(1)),
            clock,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn start_validates_form() {
        let (timer, _) = timer();

        let result = timer.start(NewCycleForm::new("", 25)).await;

        assert_eq!(
            result,
            Err(StartCycleError::Validation(ValidationError::empty_field("task")))
        );
        assert!(!timer.is_ticking().await);
    }

    #[tokio::test(start_paused = true)]
    async fn started_cycle_runs_to_completion() {
        let (timer, clock) = timer();
        let id = timer.start(NewCycleForm::new("deep work", 5)).await.unwrap();
        assert!(timer.is_ticking().await);

        clock.advance_secs(5 * 60);

        assert_eq!(timer.wait().await, Some(TickerExit::Finished(id)));
        assert_eq!(timer.store().history().await[0].status, CycleStatus::Completed);
    }

    #[tokio::test(start_paused = true)]
    async fn interrupt_stops_ticking() {
        let (timer, _) = timer();
        timer.start(NewCycleForm::new("deep work", 25)).await.unwrap();

        let event = timer.interrupt().await;

        assert!(matches!(event, Some(CycleEvent::Interrupted { .. })));
        assert!(!timer.is_ticking().await);
        assert_eq!(timer.wait().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn resume_without_active_cycle_does_nothing() {
        let (timer, _) = timer();
        assert_eq!(timer.resume().await, None);
        assert!(!timer.is_ticking().await);
    }
}
