use std::collections::BTreeSet;

use relman_core::{MergeRequest, Project};
use serde::Deserialize;

use crate::Result;
use crate::error::ConfigError;

/// Process-wide configuration, constructed once at startup and passed by
/// reference into the orchestration and presentation layers.
#[derive(Debug, Clone)]
pub struct Settings {
    pub gitlab_host: String,
    pub gitlab_private_token: String,
    pub jira_host: String,
    pub jira_username: String,
    pub jira_password: String,
    pub jira_projects: Vec<String>,
    pub rocket_hook_url: Option<String>,
    pub projects: Vec<Project>,
}

impl Settings {
    /// Loads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or the
    /// `PROJECTS` payload does not parse.
    pub fn from_env() -> Result<Self> {
        Self::from_source(&|name| std::env::var(name).ok())
    }

    /// Loads settings from an arbitrary key-value source. Tests use a map
    /// instead of mutating the process environment.
    pub fn from_source(source: &dyn Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |name: &'static str| {
            source(name).ok_or(ConfigError::MissingVariable { name })
        };
        let optional = |name: &str| source(name).unwrap_or_default();

        Ok(Self {
            gitlab_host: required("GITLAB_HOST")?,
            gitlab_private_token: required("GITLAB_PRIVATE_TOKEN")?,
            jira_host: optional("JIRA_HOST"),
            jira_username: optional("JIRA_USERNAME"),
            jira_password: optional("JIRA_PASSWORD"),
            jira_projects: parse_list(&optional("JIRA_PROJECTS")),
            rocket_hook_url: source("ROCKET_HOOK_URL").filter(|url| !url.is_empty()),
            projects: parse_projects(&required("PROJECTS")?)?,
        })
    }

    /// Whether enough Jira configuration is present to reach the tracker.
    #[must_use]
    pub fn jira_configured(&self) -> bool {
        !self.jira_host.is_empty()
            && !self.jira_username.is_empty()
            && !self.jira_password.is_empty()
    }

    #[must_use]
    pub fn rocket_configured(&self) -> bool {
        self.rocket_hook_url.is_some()
    }
}

fn parse_list(value: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    value.split(',').map(str::to_string).collect()
}

#[derive(Debug, Deserialize)]
struct ProjectEntry {
    name: String,
    gitlab_id: String,
    production_environment_branch: String,
    merges: Vec<MergeRequest>,
    versioning_scheme: String,
    tag_group: Option<String>,
    #[serde(default)]
    production_release_jira_transitions: Vec<String>,
    #[serde(default)]
    jira_warning_labels: BTreeSet<String>,
}

/// Parses the `PROJECTS` JSON payload into validated project definitions.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or a versioning scheme id is
/// unknown; both are fatal at startup.
pub fn parse_projects(raw: &str) -> Result<Vec<Project>> {
    let entries: Vec<ProjectEntry> = serde_json::from_str(raw)?;
    entries
        .into_iter()
        .map(|entry| {
            Ok(Project {
                name: entry.name,
                gitlab_id: entry.gitlab_id,
                production_environment_branch: entry.production_environment_branch,
                merge_requests: entry.merges,
                versioning_scheme: entry.versioning_scheme.parse()?,
                tag_group: entry.tag_group,
                production_release_jira_transitions: entry.production_release_jira_transitions,
                jira_warning_labels: entry.jira_warning_labels,
            })
        })
        .collect()
}
