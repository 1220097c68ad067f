use indexmap::IndexMap;
use rayon::prelude::*;
use relman_core::{Change, MergeRequest, MergeType, Project, Tag};
use relman_version::VersioningScheme;

use crate::Result;
use crate::operations::{changes, tagging};
use crate::traits::{TrackerProvider, VcsProvider};

/// One configured merge of a project together with the changes that
/// would flow through it right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRequestOverview {
    pub merge_request: MergeRequest,
    pub changes: Vec<Change>,
}

/// Everything the overview screen shows about one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectOverview {
    pub project: Project,
    pub latest_tag: Option<Tag>,
    /// Highest latest tag across the project's tag group, when the
    /// project belongs to one.
    pub latest_group_tag: Option<Tag>,
    pub tag_suggestions: Vec<Tag>,
    pub merge_requests: Vec<MergeRequestOverview>,
    /// Changes on the production branch that the latest tag does not
    /// cover yet.
    pub tag_changes: Vec<Change>,
    /// Names of the other projects in the same tag group, sorted.
    pub group_siblings: Vec<String>,
}

impl ProjectOverview {
    #[must_use]
    pub fn has_awaiting_merges(&self, merge_type: MergeType) -> bool {
        self.merge_requests.iter().any(|overview| {
            overview.merge_request.merge_type == merge_type && !overview.changes.is_empty()
        })
    }
}

/// Builds the overview for every configured project, fanning the
/// per-project work out across a thread pool while preserving the
/// configured project order.
///
/// # Errors
///
/// Returns the first VCS error encountered.
pub fn build_overview<V, T>(
    vcs: &V,
    tracker: &T,
    projects: &[Project],
) -> Result<Vec<ProjectOverview>>
where
    V: VcsProvider + Sync,
    T: TrackerProvider + Sync,
{
    let latest_tags: Vec<Option<Tag>> = projects
        .par_iter()
        .map(|project| tagging::latest_tag(vcs, project))
        .collect::<Result<Vec<_>>>()?;

    // Highest latest tag per group, over the tagged members only.
    let mut group_tags: IndexMap<&str, Tag> = IndexMap::new();
    for (project, latest) in projects.iter().zip(&latest_tags) {
        if let (Some(group), Some(tag)) = (project.tag_group.as_deref(), *latest) {
            group_tags
                .entry(group)
                .and_modify(|current| *current = (*current).max(tag))
                .or_insert(tag);
        }
    }

    projects
        .par_iter()
        .enumerate()
        .map(|(index, project)| {
            let latest_tag = latest_tags[index];
            let latest_group_tag = project
                .tag_group
                .as_deref()
                .and_then(|group| group_tags.get(group))
                .copied();

            let scheme = VersioningScheme::new(project.versioning_scheme);
            let tag_suggestions = latest_group_tag
                .or(latest_tag)
                .map(|base| scheme.tag_suggestions(&base))
                .unwrap_or_default();

            let merge_requests = project
                .merge_requests
                .iter()
                .map(|merge_request| {
                    let pending = changes::compute_changes(
                        vcs,
                        tracker,
                        project,
                        &merge_request.source_branch,
                        &merge_request.target_branch,
                    )?;
                    Ok(MergeRequestOverview {
                        merge_request: merge_request.clone(),
                        changes: pending,
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            let tag_changes = match latest_tag {
                Some(tag) => changes::compute_changes(
                    vcs,
                    tracker,
                    project,
                    &project.production_environment_branch,
                    &tag.to_string(),
                )?,
                None => Vec::new(),
            };

            let mut group_siblings: Vec<String> = match project.tag_group.as_deref() {
                Some(group) => projects
                    .iter()
                    .filter(|other| {
                        other.gitlab_id != project.gitlab_id
                            && other.tag_group.as_deref() == Some(group)
                    })
                    .map(|other| other.name.clone())
                    .collect(),
                None => Vec::new(),
            };
            group_siblings.sort_unstable();

            Ok(ProjectOverview {
                project: project.clone(),
                latest_tag,
                latest_group_tag,
                tag_suggestions,
                merge_requests,
                tag_changes,
                group_siblings,
            })
        })
        .collect()
}
