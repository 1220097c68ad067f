mod merge;
mod overview;
mod post_deploy;
mod tag;

use clap::Subcommand;

use crate::context::AppContext;
use crate::error::Result;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Show the release state of every configured project
    Overview,
    /// Open a configured merge request and merge it once its pipeline succeeds
    Merge {
        /// GitLab project id or path, as configured in PROJECTS
        project: String,
        /// Source branch of a configured merge
        source_branch: String,
        /// Target branch of a configured merge
        target_branch: String,
    },
    /// Tag the production branch and propagate the fixVersion to Jira
    Tag {
        /// GitLab project id or path, as configured in PROJECTS
        project: String,
        /// Release tag to create, e.g. v1.24.0 or v24.3.15.2
        tag: String,
    },
    /// Transition the issues shipped with the latest production tag
    PostDeploy {
        /// GitLab project id or path, as configured in PROJECTS
        project: String,
    },
}

impl Commands {
    pub(crate) fn execute(self) -> Result<()> {
        let context = AppContext::from_env()?;
        match self {
            Self::Overview => overview::run(&context),
            Self::Merge {
                project,
                source_branch,
                target_branch,
            } => merge::run(&context, &project, &source_branch, &target_branch),
            Self::Tag { project, tag } => tag::run(&context, &project, &tag),
            Self::PostDeploy { project } => post_deploy::run(&context, &project),
        }
    }
}
