use std::collections::BTreeSet;

use relman_core::{Change, Tag};
use tracing::warn;

use crate::Result;
use crate::traits::TrackerProvider;

/// Which tracker update a report describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    FixVersion,
    Transitions,
}

/// Outcome of pushing one tracker update across a batch of issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub action: SyncAction,
    pub succeeded: Vec<String>,
    pub failed: Vec<String>,
}

impl SyncReport {
    #[must_use]
    pub fn success_message(&self) -> Option<String> {
        if self.succeeded.is_empty() {
            return None;
        }
        let issues = self.succeeded.join(", ");
        Some(match self.action {
            SyncAction::FixVersion => {
                format!("Successfully set fixVersion for issues: {issues}.")
            }
            SyncAction::Transitions => format!("Successfully transitioned issues: {issues}."),
        })
    }

    #[must_use]
    pub fn failure_message(&self) -> Option<String> {
        if self.failed.is_empty() {
            return None;
        }
        let issues = self.failed.join(", ");
        Some(match self.action {
            SyncAction::FixVersion => format!(
                "Could not set fixVersion for issues: {issues}. Please handle it manually."
            ),
            SyncAction::Transitions => {
                format!("Could not transition issues: {issues}. Please handle it manually.")
            }
        })
    }
}

/// Adds the release version to one issue's fixVersions, creating the
/// version in the issue's tracker project first when it does not exist
/// yet. Already-present versions are left untouched.
///
/// # Errors
///
/// Returns an error when any tracker call fails.
pub fn set_fix_version<T: TrackerProvider>(
    tracker: &T,
    issue_key: &str,
    version_name: &str,
) -> Result<()> {
    let versions = tracker.issue_versions(issue_key)?;
    if versions
        .fix_versions
        .iter()
        .any(|version| version.name == version_name)
    {
        return Ok(());
    }

    let existing = tracker.project_versions(&versions.project_key)?;
    let version = match existing
        .into_iter()
        .find(|version| version.name == version_name)
    {
        Some(version) => version,
        None => tracker.create_version(version_name, &versions.project_key)?,
    };

    let mut ids: Vec<String> = versions
        .fix_versions
        .into_iter()
        .map(|version| version.id)
        .collect();
    ids.push(version.id);
    tracker.set_fix_versions(issue_key, &ids)
}

/// Sets the released tag as fixVersion on every issue referenced by the
/// given changes. Failures are isolated per issue.
pub fn propagate_fix_version<T: TrackerProvider>(
    tracker: &T,
    changes: &[Change],
    tag: Tag,
) -> SyncReport {
    let keys: BTreeSet<&str> = changes
        .iter()
        .filter_map(|change| change.issue.as_ref())
        .map(|issue| issue.key.as_str())
        .collect();

    let version_name = tag.to_string();
    let mut succeeded = Vec::new();
    let mut failed = Vec::new();
    for key in keys {
        match set_fix_version(tracker, key, &version_name) {
            Ok(()) => succeeded.push(key.to_string()),
            Err(err) => {
                warn!(issue = key, error = %err, "setting fixVersion failed");
                failed.push(key.to_string());
            }
        }
    }
    SyncReport {
        action: SyncAction::FixVersion,
        succeeded,
        failed,
    }
}

/// Applies the named transitions to one issue, in order, skipping
/// transitions the issue does not currently offer. Returns the names
/// that were actually applied.
fn apply_transitions<T: TrackerProvider>(
    tracker: &T,
    issue_key: &str,
    names: &[String],
) -> Vec<String> {
    let mut applied = Vec::new();
    for name in names {
        let id = match tracker.find_transition_id(issue_key, name) {
            Ok(Some(id)) => id,
            Ok(None) => continue,
            Err(err) => {
                warn!(issue = issue_key, transition = %name, error = %err, "transition lookup failed");
                continue;
            }
        };
        match tracker.apply_transition(issue_key, &id) {
            Ok(()) => applied.push(name.clone()),
            Err(err) => {
                warn!(issue = issue_key, transition = %name, error = %err, "transition failed");
            }
        }
    }
    applied
}

/// Applies the configured release transitions to every issue referenced
/// by the given changes. An issue counts as succeeded if at least one
/// transition was applied to it.
pub fn propagate_transitions<T: TrackerProvider>(
    tracker: &T,
    changes: &[Change],
    names: &[String],
) -> SyncReport {
    let keys: BTreeSet<&str> = changes
        .iter()
        .filter_map(|change| change.issue.as_ref())
        .map(|issue| issue.key.as_str())
        .collect();

    let mut succeeded = Vec::new();
    let mut failed = Vec::new();
    for key in keys {
        if apply_transitions(tracker, key, names).is_empty() {
            failed.push(key.to_string());
        } else {
            succeeded.push(key.to_string());
        }
    }
    SyncReport {
        action: SyncAction::Transitions,
        succeeded,
        failed,
    }
}
