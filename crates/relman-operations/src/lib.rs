mod error;
mod lookup;
pub mod operations;
pub mod providers;
pub mod traits;

#[cfg(test)]
pub mod mocks;

pub use error::{OperationError, Result};
pub use lookup::{find_merge_request, find_project};
