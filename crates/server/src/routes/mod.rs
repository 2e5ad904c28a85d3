mod health;
mod repositories;

pub use health::*;
pub use repositories::*;
