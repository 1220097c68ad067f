use relman_gitlab::GitlabError;
use relman_jira::JiraError;
use relman_notify::NotifyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Vcs(#[from] GitlabError),

    #[error(transparent)]
    Tracker(#[from] JiraError),

    #[error(transparent)]
    Notify(#[from] NotifyError),

    #[error("project '{project}' configures no production release transitions")]
    NoTransitionsConfigured { project: String },

    #[error("need at least two release tags to compute deployed changes, found {found}")]
    NotEnoughTags { found: usize },

    #[error("no project configured with GitLab id '{gitlab_id}'")]
    UnknownProject { gitlab_id: String },

    #[error("no merge request configured from '{source_branch}' to '{target_branch}' in project '{project}'")]
    UnknownMergeRequest {
        project: String,
        source_branch: String,
        target_branch: String,
    },
}

impl OperationError {
    /// Whether the underlying collaborator failure is worth retrying.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Vcs(source) if source.is_transient())
    }
}

pub type Result<T> = std::result::Result<T, OperationError>;
