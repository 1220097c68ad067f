mod client;
mod error;
mod types;

pub use client::GitlabClient;
pub use error::GitlabError;
pub use types::{MergeRequestHandle, MergeRequestSnapshot, MergeRequestState};

pub type Result<T> = std::result::Result<T, GitlabError>;
