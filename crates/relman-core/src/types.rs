use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::UnknownSchemeError;

static JIRA_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(\w+-\d+)\]").expect("valid pattern"));

/// A commit as reported by the VCS host in a branch comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub id: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub parent_ids: BTreeSet<String>,
}

impl Commit {
    /// The issue key referenced by a `[KEY-123]` token at the very start
    /// of the commit message, without the brackets.
    #[must_use]
    pub fn jira_reference(&self) -> Option<&str> {
        JIRA_REFERENCE
            .captures(&self.message)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str())
    }
}

/// An issue-tracker ticket snapshot, fetched on demand and never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub key: String,
    pub summary: String,
    pub labels: BTreeSet<String>,
}

/// A commit enriched with its linked issue and any configured warning
/// labels that issue carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub commit: Commit,
    pub issue: Option<Issue>,
    pub warning_labels: BTreeSet<String>,
}

impl Change {
    /// Builds a change, computing the warning labels as the intersection
    /// of the project's configured set and the issue's labels.
    #[must_use]
    pub fn new(commit: Commit, issue: Option<Issue>, project_warning_labels: &BTreeSet<String>) -> Self {
        let warning_labels = issue
            .as_ref()
            .map(|issue| {
                issue
                    .labels
                    .intersection(project_warning_labels)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Self {
            commit,
            issue,
            warning_labels,
        }
    }
}

/// The outcome of comparing two refs on the VCS host.
///
/// `has_diff` tracks file-level diffs independently of the commit list;
/// the host may report commits with an empty diff (merge commits).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BranchDifference {
    pub commits: Vec<Commit>,
    pub has_diff: bool,
}

/// The role of a configured merge, serialized in UPPERCASE in the
/// `PROJECTS` configuration payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MergeType {
    Dev,
    Maintenance,
    Prod,
}

impl fmt::Display for MergeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Dev => "dev",
            Self::Maintenance => "maintenance",
            Self::Prod => "prod",
        };
        write!(f, "{s}")
    }
}

/// A configured merge between two branches of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRequest {
    pub merge_type: MergeType,
    pub source_branch: String,
    pub target_branch: String,
}

impl fmt::Display for MergeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} -> {})",
            self.merge_type, self.source_branch, self.target_branch
        )
    }
}

/// Identifier of a versioning policy, validated at configuration load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchemeId {
    IncrementingSegments,
    DateBased,
}

impl FromStr for SchemeId {
    type Err = UnknownSchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INCREMENTING_SEGMENTS" => Ok(Self::IncrementingSegments),
            "DATE_BASED" => Ok(Self::DateBased),
            other => Err(UnknownSchemeError {
                id: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for SchemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::IncrementingSegments => "INCREMENTING_SEGMENTS",
            Self::DateBased => "DATE_BASED",
        };
        write!(f, "{s}")
    }
}

/// A managed project, supplied by configuration and immutable afterwards.
///
/// Identity is the GitLab project id alone; two values with the same id
/// are interchangeable.
#[derive(Debug, Clone)]
pub struct Project {
    pub name: String,
    pub gitlab_id: String,
    pub production_environment_branch: String,
    pub merge_requests: Vec<MergeRequest>,
    pub versioning_scheme: SchemeId,
    pub tag_group: Option<String>,
    pub production_release_jira_transitions: Vec<String>,
    pub jira_warning_labels: BTreeSet<String>,
}

impl PartialEq for Project {
    fn eq(&self, other: &Self) -> bool {
        self.gitlab_id == other.gitlab_id
    }
}

impl Eq for Project {}

impl Hash for Project {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.gitlab_id.hash(state);
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
