pub mod domain;
pub mod error;

pub use domain::repository::{CreateRepoRequest, CreateRepoResponse};
pub use error::ApiError;
