use relman_core::{BranchDifference, Project};
use relman_gitlab::{MergeRequestHandle, MergeRequestSnapshot};

use crate::Result;

/// Operations the release workflows need from the VCS host.
///
/// All calls are single-shot synchronous requests; errors carry the
/// transient-vs-permanent distinction the merge-automation retry loop
/// observes through [`crate::OperationError::is_transient`].
pub trait VcsProvider: Send + Sync {
    /// Compares `source` relative to `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot perform the comparison.
    fn compare_refs(
        &self,
        project: &Project,
        source: &str,
        target: &str,
    ) -> Result<BranchDifference>;

    /// The newest tag names as reported by the host, unfiltered.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag listing fails.
    fn list_tag_names(&self, project: &Project, limit: usize) -> Result<Vec<String>>;

    /// Creates an annotated tag at the given ref.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag cannot be created or already exists.
    fn create_tag(
        &self,
        project: &Project,
        name: &str,
        ref_name: &str,
        message: &str,
    ) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the merge request cannot be opened.
    fn create_merge_request(
        &self,
        project: &Project,
        source_branch: &str,
        target_branch: &str,
        title: &str,
        labels: &[String],
    ) -> Result<MergeRequestHandle>;

    /// # Errors
    ///
    /// Returns an error if the merge request cannot be fetched.
    fn merge_request(&self, project: &Project, iid: u64) -> Result<MergeRequestSnapshot>;

    /// # Errors
    ///
    /// Returns an error if the host rejects the command; rejections for
    /// freshly created requests are typically transient.
    fn set_merge_when_pipeline_succeeds(&self, project: &Project, iid: u64) -> Result<()>;

    /// Merges the request immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the merge fails.
    fn merge(&self, project: &Project, iid: u64) -> Result<()>;
}
