use relman_notify::Severity;
use relman_operations::find_project;
use relman_operations::operations::deployment::run_post_deployment;
use relman_operations::traits::Notifier;

use crate::context::AppContext;
use crate::error::Result;

pub(crate) fn run(context: &AppContext, project_id: &str) -> Result<()> {
    let project = find_project(&context.settings.projects, project_id)?;

    let outcome = run_post_deployment(&context.vcs, &context.tracker, project)?;
    println!("{}", outcome.narrative);

    let severity = if outcome.succeeded {
        Severity::Success
    } else {
        Severity::Failure
    };
    if let Err(err) = context.notifier.notify(&outcome.narrative, severity) {
        eprintln!("warning: could not send notification: {err}");
    }
    Ok(())
}
