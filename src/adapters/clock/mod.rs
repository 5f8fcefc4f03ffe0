//! Clock Adapters
//!
//! - **SystemClock** - Real wall-clock time
//! - **ManualClock** - Time set by hand (testing)

mod manual_clock;
mod system_clock;

pub use manual_clock::ManualClock;
pub use system_clock::SystemClock;
