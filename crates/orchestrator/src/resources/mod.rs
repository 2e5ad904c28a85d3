//! RAII resource guards for batch workers.
//!
//! - [`OutcomeGuard`] - Exactly-once outcome reporting per worker

mod outcome_guard;

pub use outcome_guard::{OutcomeGuard, WORKER_LOST_MESSAGE};
