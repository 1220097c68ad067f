use relman_notify::Severity;
use relman_operations::operations::changes::compute_changes;
use relman_operations::operations::merge::MergeAutomation;
use relman_operations::traits::Notifier;
use relman_operations::{find_merge_request, find_project};

use crate::context::AppContext;
use crate::error::Result;

pub(crate) fn run(
    context: &AppContext,
    project_id: &str,
    source_branch: &str,
    target_branch: &str,
) -> Result<()> {
    let project = find_project(&context.settings.projects, project_id)?;
    let merge_request = find_merge_request(project, source_branch, target_branch)?;

    let pending = compute_changes(
        &context.vcs,
        &context.tracker,
        project,
        source_branch,
        target_branch,
    )?;
    if pending.is_empty() {
        println!("{merge_request} for {project} is already up to date.");
        return Ok(());
    }

    let automation = MergeAutomation::new(&context.vcs);
    let handle = automation.create(project, merge_request)?;

    if let Err(err) = automation.merge_automatically(project, handle.iid) {
        let message = format!(
            "Could not merge {merge_request} for {project}. Please handle it manually."
        );
        println!("{message}");
        if let Err(notify_err) = context.notifier.notify(&message, Severity::Failure) {
            eprintln!("warning: could not send notification: {notify_err}");
        }
        return Err(err.into());
    }

    let message = match &handle.web_url {
        Some(url) => format!("Merging {merge_request} for {project}: {url}"),
        None => format!("Merging {merge_request} for {project} (!{})", handle.iid),
    };
    println!("{message}");
    if let Err(err) = context.notifier.notify(&message, Severity::Success) {
        eprintln!("warning: could not send notification: {err}");
    }
    Ok(())
}
