use relman_core::{Change, Project};
use tracing::warn;

use crate::Result;
use crate::traits::{TrackerProvider, VcsProvider};

/// Computes the list of changes between two refs of a project.
///
/// Each commit in the difference is enriched with its linked issue when
/// the commit message starts with a `[KEY-123]` reference and the
/// tracker knows the issue. A failing issue lookup degrades the single
/// change to commit-only instead of aborting the whole computation.
///
/// # Errors
///
/// Returns an error when the ref comparison itself fails.
pub fn compute_changes<V, T>(
    vcs: &V,
    tracker: &T,
    project: &Project,
    source: &str,
    target: &str,
) -> Result<Vec<Change>>
where
    V: VcsProvider,
    T: TrackerProvider,
{
    let difference = vcs.compare_refs(project, source, target)?;
    if !difference.has_diff {
        return Ok(Vec::new());
    }

    let mut changes = Vec::with_capacity(difference.commits.len());
    for commit in difference.commits {
        let issue = match commit.jira_reference() {
            Some(key) if tracker.is_configured() => match tracker.get_issue(key) {
                Ok(issue) => issue,
                Err(err) => {
                    warn!(issue = key, error = %err, "issue lookup failed");
                    None
                }
            },
            _ => None,
        };
        changes.push(Change::new(commit, issue, &project.jira_warning_labels));
    }
    Ok(changes)
}

#[cfg(test)]
mod tests {
    use relman_core::{BranchDifference, Issue};

    use super::compute_changes;
    use crate::mocks::{MockTracker, MockVcs, sample_commit, sample_project};

    #[test]
    fn no_diff_yields_no_changes() {
        let project = sample_project("backend", "42");
        let vcs = MockVcs::new().with_difference(
            "master",
            "production",
            BranchDifference {
                commits: vec![sample_commit("a1", "[ABC-1] fix login")],
                has_diff: false,
            },
        );
        let tracker = MockTracker::new();

        let changes =
            compute_changes(&vcs, &tracker, &project, "master", "production").expect("changes");
        assert!(changes.is_empty());
    }

    #[test]
    fn changes_preserve_commit_order_and_link_issues() {
        let project = sample_project("backend", "42");
        let vcs = MockVcs::new().with_difference(
            "master",
            "production",
            BranchDifference {
                commits: vec![
                    sample_commit("a1", "[ABC-1] fix login"),
                    sample_commit("b2", "chore: bump deps"),
                    sample_commit("c3", "[ABC-2] add export"),
                ],
                has_diff: true,
            },
        );
        let tracker = MockTracker::new()
            .with_issue(Issue {
                key: "ABC-1".to_string(),
                summary: "Login broken".to_string(),
                labels: ["requires-migration".to_string(), "backend".to_string()].into(),
            })
            .with_issue(Issue {
                key: "ABC-2".to_string(),
                summary: "CSV export".to_string(),
                labels: Default::default(),
            });

        let changes =
            compute_changes(&vcs, &tracker, &project, "master", "production").expect("changes");
        assert_eq!(changes.len(), 3);
        assert_eq!(changes[0].commit.id, "a1");
        assert_eq!(
            changes[0].issue.as_ref().map(|issue| issue.key.as_str()),
            Some("ABC-1")
        );
        assert_eq!(
            changes[0].warning_labels,
            ["requires-migration".to_string()].into()
        );
        assert!(changes[1].issue.is_none());
        assert!(changes[1].warning_labels.is_empty());
        assert_eq!(changes[2].commit.id, "c3");
        assert!(changes[2].warning_labels.is_empty());
    }

    #[test]
    fn failing_issue_lookup_degrades_to_commit_only() {
        let project = sample_project("backend", "42");
        let vcs = MockVcs::new().with_difference(
            "master",
            "production",
            BranchDifference {
                commits: vec![sample_commit("a1", "[ABC-1] fix login")],
                has_diff: true,
            },
        );
        let tracker = MockTracker::new().with_failing_issue_lookup("ABC-1");

        let changes =
            compute_changes(&vcs, &tracker, &project, "master", "production").expect("changes");
        assert_eq!(changes.len(), 1);
        assert!(changes[0].issue.is_none());
    }

    #[test]
    fn unconfigured_tracker_skips_issue_lookups() {
        let project = sample_project("backend", "42");
        let vcs = MockVcs::new().with_difference(
            "master",
            "production",
            BranchDifference {
                commits: vec![sample_commit("a1", "[ABC-1] fix login")],
                has_diff: true,
            },
        );
        let tracker = MockTracker::new().unconfigured();

        let changes =
            compute_changes(&vcs, &tracker, &project, "master", "production").expect("changes");
        assert!(changes[0].issue.is_none());
    }
}
