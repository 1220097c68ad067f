mod client;
mod error;
mod types;

pub use client::JiraClient;
pub use error::JiraError;
pub use types::{IssueVersions, VersionRef};

pub type Result<T> = std::result::Result<T, JiraError>;
