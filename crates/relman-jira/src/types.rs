use serde::Deserialize;

/// A named version registered in a Jira project.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VersionRef {
    pub id: String,
    pub name: String,
}

/// The fix-version state of an issue together with the key of the Jira
/// project owning it, enough to find or create the matching version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueVersions {
    pub project_key: String,
    pub fix_versions: Vec<VersionRef>,
}
