mod gitlab;
mod jira;
mod rocket;

pub use gitlab::GitlabVcsProvider;
pub use jira::JiraTrackerProvider;
pub use rocket::RocketNotifier;
