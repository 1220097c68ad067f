use relman_config::Settings;
use relman_gitlab::GitlabClient;
use relman_jira::JiraClient;
use relman_notify::RocketClient;
use relman_operations::providers::{GitlabVcsProvider, JiraTrackerProvider, RocketNotifier};

use crate::error::Result;

/// Configuration and clients shared by every command.
pub(crate) struct AppContext {
    pub settings: Settings,
    pub vcs: GitlabVcsProvider,
    pub tracker: JiraTrackerProvider,
    pub notifier: RocketNotifier,
}

impl AppContext {
    pub(crate) fn from_env() -> Result<Self> {
        let settings = Settings::from_env()?;

        let gitlab = GitlabClient::new(&settings.gitlab_host, &settings.gitlab_private_token)?;
        let jira = if settings.jira_configured() {
            Some(JiraClient::new(
                &settings.jira_host,
                &settings.jira_username,
                &settings.jira_password,
            )?)
        } else {
            None
        };
        let rocket = RocketClient::new(settings.rocket_hook_url.clone());

        Ok(Self {
            settings,
            vcs: GitlabVcsProvider::new(gitlab),
            tracker: JiraTrackerProvider::new(jira),
            notifier: RocketNotifier::new(rocket),
        })
    }
}
