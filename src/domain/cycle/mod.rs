//! Cycle module - Timer cycles and the state that tracks them.
//!
//! A Cycle is one timer run. `CyclesState` is the append-only list of
//! cycles with a pointer to the active one, changed only through
//! `CycleCommand`s.

mod aggregate;
mod countdown;
mod events;
mod history;
mod state;

pub use aggregate::Cycle;
pub use countdown::Countdown;
pub use events::CycleEvent;
pub use history::HistoryEntry;
pub use state::{CycleCommand, CyclesState};
