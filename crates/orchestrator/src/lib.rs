mod aggregator;
pub mod batch;
pub mod core;
pub mod error;
pub mod limiter;
pub mod resources;
pub mod services;
pub mod worker;

pub use batch::{BatchCreator, BatchReport, BulkReport};
pub use self::core::{AggregateStatus, BatchItem, Outcome, ResultRegistry};
pub use error::{OrchestratorError, Result};
pub use limiter::{ConcurrencyLimiter, DEFAULT_MAX_CONCURRENCY};
pub use services::{RepoCreator, RepositoryService};
