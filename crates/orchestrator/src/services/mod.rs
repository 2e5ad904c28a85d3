pub mod repository_service;

pub use repository_service::{RepoCreator, RepositoryService};
