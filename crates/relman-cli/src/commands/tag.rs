use relman_core::Tag;
use relman_notify::Severity;
use relman_operations::find_project;
use relman_operations::operations::{changes, tagging, tracker_sync};
use relman_operations::traits::{Notifier, TrackerProvider};
use url::Url;

use crate::context::AppContext;
use crate::error::{CliError, Result};

pub(crate) fn run(context: &AppContext, project_id: &str, tag_name: &str) -> Result<()> {
    let project = find_project(&context.settings.projects, project_id)?;
    let tag = Tag::parse(tag_name).ok_or_else(|| CliError::InvalidTag {
        name: tag_name.to_string(),
    })?;

    // The commits the new tag ships are those that arrived on the
    // production branch since the previous tag.
    let previous = tagging::latest_tag(&context.vcs, project)?;
    let shipped = match previous {
        Some(previous) => changes::compute_changes(
            &context.vcs,
            &context.tracker,
            project,
            &project.production_environment_branch,
            &previous.to_string(),
        )?,
        None => Vec::new(),
    };

    let description = tagging::create_tag(&context.vcs, project, tag)?;
    println!("Created tag {tag} for {project}: {description}");

    let mut messages = vec![format!("Created tag {tag} for {project}: {description}")];
    let mut severity = Severity::Success;

    if context.tracker.is_configured() && !shipped.is_empty() {
        let report = tracker_sync::propagate_fix_version(&context.tracker, &shipped, tag);
        if let Some(message) = report.success_message() {
            println!("{message}");
            messages.push(message);
        }
        if let Some(message) = report.failure_message() {
            println!("{message}");
            messages.push(message);
            severity = Severity::Failure;
        }
        if let Some(link) = issues_link(context, tag) {
            println!("Issues in this release: {link}");
            messages.push(link.to_string());
        }
    }

    if let Err(err) = context.notifier.notify(&messages.join("\n"), severity) {
        eprintln!("warning: could not send notification: {err}");
    }
    Ok(())
}

/// Jira search link listing every issue whose fixVersion is the new tag.
fn issues_link(context: &AppContext, tag: Tag) -> Option<Url> {
    if context.settings.jira_projects.is_empty() {
        return None;
    }
    let jql = format!(
        "project in ({}) AND fixVersion = {tag}",
        context.settings.jira_projects.join(", ")
    );
    let base = format!("{}/issues/", context.settings.jira_host.trim_end_matches('/'));
    Url::parse_with_params(&base, [("jql", jql.as_str())]).ok()
}
