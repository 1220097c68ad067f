use relman_core::Project;

use crate::operations::{changes, tagging, tracker_sync};
use crate::traits::{TrackerProvider, VcsProvider};
use crate::{OperationError, Result};

/// Result of running the post-deployment hook for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentOutcome {
    pub succeeded: bool,
    pub narrative: String,
    pub report: tracker_sync::SyncReport,
}

/// Applies the project's configured release transitions to every issue
/// that shipped with the latest production tag.
///
/// The shipped issues are those referenced by the commits between the
/// two newest release tags.
///
/// # Errors
///
/// Returns [`OperationError::NoTransitionsConfigured`] when the project
/// configures no transitions, [`OperationError::NotEnoughTags`] when
/// fewer than two release tags exist, or a VCS error when the change
/// computation fails.
pub fn run_post_deployment<V, T>(
    vcs: &V,
    tracker: &T,
    project: &Project,
) -> Result<DeploymentOutcome>
where
    V: VcsProvider,
    T: TrackerProvider,
{
    if project.production_release_jira_transitions.is_empty() {
        return Err(OperationError::NoTransitionsConfigured {
            project: project.name.clone(),
        });
    }

    let tags = tagging::last_tags(vcs, project, 2)?;
    if tags.len() != 2 {
        return Err(OperationError::NotEnoughTags { found: tags.len() });
    }
    let latest = tags[0];
    let previous = tags[1];

    let shipped = changes::compute_changes(
        vcs,
        tracker,
        project,
        &latest.to_string(),
        &previous.to_string(),
    )?;
    let report = tracker_sync::propagate_transitions(
        tracker,
        &shipped,
        &project.production_release_jira_transitions,
    );

    let succeeded = report.failed.is_empty();
    let narrative = if succeeded {
        let mut narrative = format!("Post deployment hook for {project} succeeded.\n");
        if let Some(message) = report.success_message() {
            narrative.push_str(&message);
        }
        narrative
    } else {
        let mut narrative = format!("Post deployment hook for {project} failed.\n");
        let messages: Vec<String> = report
            .success_message()
            .into_iter()
            .chain(report.failure_message())
            .collect();
        narrative.push_str(&messages.join("\n"));
        narrative
    };

    Ok(DeploymentOutcome {
        succeeded,
        narrative,
        report,
    })
}
