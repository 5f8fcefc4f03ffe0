//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the focus timer domain.

mod cycle_status;
mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use cycle_status::CycleStatus;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::CycleId;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
