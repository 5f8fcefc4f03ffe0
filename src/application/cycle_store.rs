//! CycleStore - Authoritative owner of the cycle list.
//!
//! Built once per session and handed to every consumer as
//! `Arc<CycleStore>`. All transitions go through a single write lock, so
//! a user command and a tick racing on the same cycle are applied one
//! after the other and the loser becomes a no-op.
//!
//! After every state change the whole state is written through the
//! [`SnapshotStore`] port. Persistence is best effort: failures are
//! logged and never surface to callers.

use std::sync::Arc;

use tokio::sync::{watch, RwLock};
use tracing::{debug, info, warn};

use crate::domain::cycle::{
    Countdown, Cycle, CycleCommand, CycleEvent, CyclesState, HistoryEntry,
};
use crate::domain::foundation::{CycleId, DomainError, ErrorCode, Timestamp, ValidationError};
use crate::ports::{Clock, CyclesSnapshot, SnapshotStore};

use super::StartCycleCommand;

/// Why a new cycle could not be started.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StartCycleError {
    #[error("Invalid cycle input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Cycle {0} is still running; interrupt it first")]
    CycleAlreadyActive(CycleId),
}

impl From<StartCycleError> for DomainError {
    fn from(err: StartCycleError) -> Self {
        let message = err.to_string();
        match err {
            StartCycleError::Validation(e) => e.into(),
            StartCycleError::CycleAlreadyActive(id) => {
                DomainError::new(ErrorCode::CycleAlreadyActive, message)
                    .with_detail("cycle_id", id.to_string())
            }
        }
    }
}

/// Result of one countdown recomputation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing is active; the ticker should stop.
    Idle,
    /// The active cycle still has time left.
    Counting {
        cycle_id: CycleId,
        countdown: Countdown,
    },
    /// The active cycle reached its duration and was marked finished.
    Finished(CycleEvent),
}

#[derive(Debug, Default)]
struct StoreState {
    cycles: CyclesState,
    amount_seconds_passed: u64,
}

/// Shared cycle store.
pub struct CycleStore {
    state: RwLock<StoreState>,
    snapshots: Arc<dyn SnapshotStore>,
    clock: Arc<dyn Clock>,
    countdown_tx: watch::Sender<Option<Countdown>>,
}

impl CycleStore {
    /// Creates an empty store.
    pub fn new(snapshots: Arc<dyn SnapshotStore>, clock: Arc<dyn Clock>) -> Self {
        Self::with_state(CyclesState::new(), snapshots, clock)
    }

    /// Creates a store from the persisted snapshot.
    ///
    /// Missing, unreadable or malformed snapshots start an empty session.
    /// An active cycle whose duration ran out while nothing was ticking is
    /// marked finished right away.
    pub async fn restore(snapshots: Arc<dyn SnapshotStore>, clock: Arc<dyn Clock>) -> Self {
        let cycles = match snapshots.load().await {
            Ok(Some(snapshot)) => match snapshot.restore() {
                Ok(cycles) => cycles,
                Err(e) => {
                    warn!(error = %e, "Discarding invalid cycle snapshot");
                    CyclesState::new()
                }
            },
            Ok(None) => CyclesState::new(),
            Err(e) => {
                warn!(error = %e, "Could not load cycle snapshot, starting empty");
                CyclesState::new()
            }
        };

        info!(
            cycles = cycles.len(),
            active_cycle_id = ?cycles.active_cycle_id(),
            "Cycle store restored"
        );

        let store = Self::with_state(cycles, snapshots, clock);
        {
            let mut state = store.state.write().await;
            let now = store.clock.now();
            store.finish_if_elapsed(&mut state, now).await;
        }
        store
    }

    fn with_state(
        cycles: CyclesState,
        snapshots: Arc<dyn SnapshotStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let now = clock.now();
        let countdown = cycles.active_cycle().map(|cycle| cycle.countdown(now));
        let state = StoreState {
            amount_seconds_passed: countdown.map(|c| c.elapsed_seconds()).unwrap_or(0),
            cycles,
        };
        let (countdown_tx, _) = watch::channel(countdown);

        Self {
            state: RwLock::new(state),
            snapshots,
            clock,
            countdown_tx,
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Commands
    // ───────────────────────────────────────────────────────────────

    /// Appends a new running cycle and makes it active.
    ///
    /// Fails with `CycleAlreadyActive` while another cycle is running.
    pub async fn start_new_cycle(&self, cmd: StartCycleCommand) -> Result<CycleId, StartCycleError> {
        debug_assert!(!cmd.task.is_empty(), "task should be validated by the form");

        let mut state = self.state.write().await;
        let now = self.clock.now();
        self.finish_if_elapsed(&mut state, now).await;
        if let Some(active) = state.cycles.active_cycle_id() {
            return Err(StartCycleError::CycleAlreadyActive(active));
        }

        let cycle_id = CycleId::new();
        let event = state.cycles.apply(
            CycleCommand::Start {
                cycle_id,
                task: cmd.task,
                minutes_amount: cmd.minutes_amount,
            },
            now,
        );
        state.amount_seconds_passed = 0;

        if event.is_some() {
            info!(cycle_id = %cycle_id, minutes = cmd.minutes_amount, "Cycle started");
            self.after_transition(&state).await;
        }

        Ok(cycle_id)
    }

    /// Stops the active cycle early. No-op when nothing is active.
    pub async fn interrupt_active_cycle(&self) -> Option<CycleEvent> {
        self.dispatch(CycleCommand::Interrupt).await
    }

    /// Marks the active cycle as completed. No-op when nothing is active.
    pub async fn mark_active_cycle_finished(&self) -> Option<CycleEvent> {
        self.dispatch(CycleCommand::MarkFinished).await
    }

    /// Recomputes the active countdown and finishes the cycle once its
    /// duration has elapsed.
    pub async fn tick(&self) -> TickOutcome {
        let mut state = self.state.write().await;
        let now = self.clock.now();

        if let Some(event) = self.finish_if_elapsed(&mut state, now).await {
            return TickOutcome::Finished(event);
        }

        let Some((cycle_id, countdown)) = state
            .cycles
            .active_cycle()
            .map(|cycle| (cycle.id(), cycle.countdown(now)))
        else {
            return TickOutcome::Idle;
        };

        state.amount_seconds_passed = countdown.elapsed_seconds();
        self.countdown_tx.send_replace(Some(countdown));
        TickOutcome::Counting {
            cycle_id,
            countdown,
        }
    }

    /// Marks the active cycle finished when its duration has elapsed at `now`.
    async fn finish_if_elapsed(&self, state: &mut StoreState, now: Timestamp) -> Option<CycleEvent> {
        let countdown = state.cycles.active_cycle()?.countdown(now);
        if !countdown.is_complete() {
            return None;
        }

        state.amount_seconds_passed = countdown.total_seconds();
        let event = state.cycles.apply(CycleCommand::MarkFinished, now)?;
        info!(cycle_id = %event.cycle_id(), "Cycle finished");
        self.after_transition(state).await;
        Some(event)
    }

    async fn dispatch(&self, command: CycleCommand) -> Option<CycleEvent> {
        let mut state = self.state.write().await;
        let now = self.clock.now();

        let event = state.cycles.apply(command, now);
        match &event {
            Some(event) => {
                info!(cycle_id = %event.cycle_id(), event = ?event, "Cycle transition applied");
                self.after_transition(&state).await;
            }
            None => debug!("No active cycle, transition ignored"),
        }
        event
    }

    /// Persists the new state and refreshes the countdown channel.
    ///
    /// Runs while the write lock is held so snapshots land in order.
    async fn after_transition(&self, state: &StoreState) {
        let snapshot = CyclesSnapshot::capture(&state.cycles);
        if let Err(e) = self.snapshots.save(&snapshot).await {
            warn!(error = %e, "Failed to persist cycle snapshot");
        }

        let countdown = state
            .cycles
            .active_cycle()
            .map(|cycle| Countdown::from_elapsed(cycle.minutes_amount(), state.amount_seconds_passed));
        self.countdown_tx.send_replace(countdown);
    }

    // ───────────────────────────────────────────────────────────────
    // Queries
    // ───────────────────────────────────────────────────────────────

    pub async fn active_cycle(&self) -> Option<Cycle> {
        self.state.read().await.cycles.active_cycle().cloned()
    }

    pub async fn active_cycle_id(&self) -> Option<CycleId> {
        self.state.read().await.cycles.active_cycle_id()
    }

    /// All cycles in start order, each with its derived status.
    pub async fn history(&self) -> Vec<HistoryEntry> {
        self.state.read().await.cycles.history()
    }

    /// Elapsed seconds of the active cycle as of the last tick.
    pub async fn amount_seconds_passed(&self) -> u64 {
        self.state.read().await.amount_seconds_passed
    }

    /// Countdown of the active cycle at the clock's current time.
    pub async fn countdown(&self) -> Option<Countdown> {
        self.countdown_at(self.clock.now()).await
    }

    pub async fn countdown_at(&self, now: Timestamp) -> Option<Countdown> {
        self.state
            .read()
            .await
            .cycles
            .active_cycle()
            .map(|cycle| cycle.countdown(now))
    }

    /// Copy of the full state.
    pub async fn snapshot(&self) -> CyclesState {
        self.state.read().await.cycles.clone()
    }

    /// Receives the countdown every time it is recomputed.
    pub fn subscribe_countdown(&self) -> watch::Receiver<Option<Countdown>> {
        self.countdown_tx.subscribe()
    }
}
