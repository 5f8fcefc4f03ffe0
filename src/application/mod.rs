//! Application layer - Cycle store, form boundary and countdown driver.
//!
//! This layer orchestrates domain operations and coordinates between ports.

mod countdown_ticker;
mod cycle_store;
mod focus_timer;
mod new_cycle_form;

pub use countdown_ticker::{CountdownTicker, TickerExit, TickerHandle};
pub use cycle_store::{CycleStore, StartCycleError, TickOutcome};
pub use focus_timer::FocusTimer;
pub use new_cycle_form::{CycleDurationPolicy, NewCycleForm, StartCycleCommand};
