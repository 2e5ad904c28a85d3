//! Data model of a batch run.
//!
//! - [`Outcome`] / [`BatchItem`] - result of one repository creation
//! - [`ResultRegistry`] - frozen, index-ordered outcomes of a batch
//! - [`AggregateStatus`] - classification derived from a registry

mod outcome;
mod registry;
mod status;

pub use outcome::{BatchItem, Outcome};
pub use registry::ResultRegistry;
pub use status::{AggregateStatus, STATUS_CREATED, STATUS_PARTIAL_CONTENT};
