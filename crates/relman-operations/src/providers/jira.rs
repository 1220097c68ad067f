use relman_core::Issue;
use relman_jira::{IssueVersions, JiraClient, VersionRef};

use crate::Result;
use crate::traits::TrackerProvider;

/// Tracker backed by a configured Jira client; `None` when the process
/// runs without Jira credentials.
pub struct JiraTrackerProvider {
    client: Option<JiraClient>,
}

impl JiraTrackerProvider {
    #[must_use]
    pub fn new(client: Option<JiraClient>) -> Self {
        Self { client }
    }

    fn client(&self) -> Result<&JiraClient> {
        self.client
            .as_ref()
            .ok_or(crate::OperationError::Tracker(
                relman_jira::JiraError::NotConfigured,
            ))
    }
}

impl TrackerProvider for JiraTrackerProvider {
    fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    fn get_issue(&self, issue_key: &str) -> Result<Option<Issue>> {
        Ok(self.client()?.get_issue(issue_key)?)
    }

    fn issue_versions(&self, issue_key: &str) -> Result<IssueVersions> {
        Ok(self.client()?.issue_versions(issue_key)?)
    }

    fn project_versions(&self, project_key: &str) -> Result<Vec<VersionRef>> {
        Ok(self.client()?.project_versions(project_key)?)
    }

    fn create_version(&self, name: &str, project_key: &str) -> Result<VersionRef> {
        Ok(self.client()?.create_version(name, project_key)?)
    }

    fn set_fix_versions(&self, issue_key: &str, version_ids: &[String]) -> Result<()> {
        Ok(self.client()?.set_fix_versions(issue_key, version_ids)?)
    }

    fn find_transition_id(&self, issue_key: &str, name: &str) -> Result<Option<String>> {
        Ok(self.client()?.find_transition_id(issue_key, name)?)
    }

    fn apply_transition(&self, issue_key: &str, transition_id: &str) -> Result<()> {
        Ok(self.client()?.apply_transition(issue_key, transition_id)?)
    }
}
