use relman_core::MergeType;
use relman_operations::operations::overview::{ProjectOverview, build_overview};

use crate::context::AppContext;
use crate::error::Result;

pub(crate) fn run(context: &AppContext) -> Result<()> {
    if !context.settings.jira_configured() {
        eprintln!("warning: Jira is not configured, issues will not be linked");
    }
    if !context.settings.rocket_configured() {
        eprintln!("warning: Rocket.Chat is not configured, notifications will be dropped");
    }

    let overviews = build_overview(&context.vcs, &context.tracker, &context.settings.projects)?;

    for overview in &overviews {
        print_project(overview);
    }
    Ok(())
}

fn print_project(overview: &ProjectOverview) {
    println!("{}", overview.project.name);

    match overview.latest_tag {
        Some(tag) => println!("  latest tag: {tag}"),
        None => println!("  latest tag: none"),
    }
    if let Some(group_tag) = overview.latest_group_tag {
        let group = overview.project.tag_group.as_deref().unwrap_or_default();
        println!("  group '{group}' tag: {group_tag}");
        if !overview.group_siblings.is_empty() {
            println!("  group siblings: {}", overview.group_siblings.join(", "));
        }
    }

    if !overview.tag_suggestions.is_empty() {
        let suggestions: Vec<String> = overview
            .tag_suggestions
            .iter()
            .map(ToString::to_string)
            .collect();
        println!("  suggested tags: {}", suggestions.join(", "));
    }

    for merge in &overview.merge_requests {
        let pending = merge.changes.len();
        if pending == 0 {
            println!("  {}: up to date", merge.merge_request);
        } else {
            println!("  {}: {pending} pending change(s)", merge.merge_request);
            for change in &merge.changes {
                print_change_line(change);
            }
        }
    }

    if !overview.tag_changes.is_empty() {
        println!(
            "  untagged changes on {}: {}",
            overview.project.production_environment_branch,
            overview.tag_changes.len()
        );
        for change in &overview.tag_changes {
            print_change_line(change);
        }
    }

    for merge_type in [MergeType::Dev, MergeType::Maintenance, MergeType::Prod] {
        if overview.has_awaiting_merges(merge_type) {
            println!("  awaiting {merge_type} merge");
        }
    }
    println!();
}

fn print_change_line(change: &relman_core::Change) {
    let first_line = change.commit.message.lines().next().unwrap_or_default();
    let summary = change
        .issue
        .as_ref()
        .map_or(first_line, |issue| issue.summary.as_str());
    match change.issue.as_ref() {
        Some(issue) if change.warning_labels.is_empty() => {
            println!("    [{}] {summary}", issue.key);
        }
        Some(issue) => {
            let labels: Vec<&str> = change
                .warning_labels
                .iter()
                .map(String::as_str)
                .collect();
            println!("    [{}] {summary} (warning: {})", issue.key, labels.join(", "));
        }
        None => println!("    {summary}"),
    }
}
