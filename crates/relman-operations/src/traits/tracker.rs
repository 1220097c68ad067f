use relman_core::Issue;
use relman_jira::{IssueVersions, VersionRef};

use crate::Result;

/// Operations the release workflows need from the issue tracker.
pub trait TrackerProvider: Send + Sync {
    /// Whether enough configuration is present to reach the tracker.
    fn is_configured(&self) -> bool;

    /// Fetches an issue snapshot; `Ok(None)` for unknown keys.
    ///
    /// # Errors
    ///
    /// Returns an error for any failure other than a missing issue.
    fn get_issue(&self, issue_key: &str) -> Result<Option<Issue>>;

    /// The issue's current fix versions and owning project key.
    ///
    /// # Errors
    ///
    /// Returns an error if the issue cannot be fetched.
    fn issue_versions(&self, issue_key: &str) -> Result<IssueVersions>;

    /// # Errors
    ///
    /// Returns an error if the version listing fails.
    fn project_versions(&self, project_key: &str) -> Result<Vec<VersionRef>>;

    /// # Errors
    ///
    /// Returns an error if the version cannot be created.
    fn create_version(&self, name: &str, project_key: &str) -> Result<VersionRef>;

    /// Replaces the issue's fix versions.
    ///
    /// # Errors
    ///
    /// Returns an error if the update is rejected.
    fn set_fix_versions(&self, issue_key: &str, version_ids: &[String]) -> Result<()>;

    /// Resolves a transition name to the id currently available on the
    /// issue, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition listing fails.
    fn find_transition_id(&self, issue_key: &str, name: &str) -> Result<Option<String>>;

    /// # Errors
    ///
    /// Returns an error if the transition is rejected.
    fn apply_transition(&self, issue_key: &str, transition_id: &str) -> Result<()>;
}
