use relman_core::{MergeRequest, Project};

use crate::Result;
use crate::error::OperationError;

/// Resolves a configured project by its GitLab id.
///
/// # Errors
///
/// Returns [`OperationError::UnknownProject`] when no project matches.
pub fn find_project<'a>(projects: &'a [Project], gitlab_id: &str) -> Result<&'a Project> {
    projects
        .iter()
        .find(|project| project.gitlab_id == gitlab_id)
        .ok_or_else(|| OperationError::UnknownProject {
            gitlab_id: gitlab_id.to_string(),
        })
}

/// Resolves the configured merge request matching a branch pair.
///
/// # Errors
///
/// Returns [`OperationError::UnknownMergeRequest`] when the project does
/// not configure that pair; arbitrary branch pairs are not mergeable.
pub fn find_merge_request<'a>(
    project: &'a Project,
    source_branch: &str,
    target_branch: &str,
) -> Result<&'a MergeRequest> {
    project
        .merge_requests
        .iter()
        .find(|mr| mr.source_branch == source_branch && mr.target_branch == target_branch)
        .ok_or_else(|| OperationError::UnknownMergeRequest {
            project: project.name.clone(),
            source_branch: source_branch.to_string(),
            target_branch: target_branch.to_string(),
        })
}
