use relman_core::{Project, Tag};
use relman_version::VersioningScheme;

use crate::Result;
use crate::traits::VcsProvider;

/// Creates a release tag on the project's production branch and returns
/// the human-readable description used as the tag message.
///
/// # Errors
///
/// Returns an error when the host rejects the tag creation.
pub fn create_tag<V: VcsProvider>(vcs: &V, project: &Project, tag: Tag) -> Result<String> {
    let scheme = VersioningScheme::new(project.versioning_scheme);
    let description = scheme.tag_description(&tag);
    vcs.create_tag(
        project,
        &tag.to_string(),
        &project.production_environment_branch,
        &description,
    )?;
    Ok(description)
}

/// The newest release tags of a project, newest first, skipping tag
/// names that do not parse as release tags.
///
/// # Errors
///
/// Returns an error when the tag listing fails.
pub fn last_tags<V: VcsProvider>(vcs: &V, project: &Project, count: usize) -> Result<Vec<Tag>> {
    let names = vcs.list_tag_names(project, count)?;
    Ok(names
        .iter()
        .filter_map(|name| Tag::parse(name))
        .collect())
}

/// The newest release tag of a project, if any.
///
/// # Errors
///
/// Returns an error when the tag listing fails.
pub fn latest_tag<V: VcsProvider>(vcs: &V, project: &Project) -> Result<Option<Tag>> {
    Ok(last_tags(vcs, project, 1)?.into_iter().next())
}

#[cfg(test)]
mod tests {
    use relman_core::Tag;

    use super::{create_tag, last_tags, latest_tag};
    use crate::mocks::{MockVcs, sample_project};

    #[test]
    fn create_tag_targets_the_production_branch() {
        let project = sample_project("backend", "42");
        let vcs = MockVcs::new();

        let description =
            create_tag(&vcs, &project, Tag::new(1, 24, 0, None)).expect("tag created");
        assert_eq!(description, "Sprint 24");

        let created = vcs.created_tags.lock().expect("lock");
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].name, "v1.24.0");
        assert_eq!(created[0].ref_name, "production");
        assert_eq!(created[0].message, "Sprint 24");
    }

    #[test]
    fn last_tags_skips_unparseable_names() {
        let project = sample_project("backend", "42");
        let vcs = MockVcs::new().with_tag_names(
            "42",
            &["v1.25.0", "release-candidate", "v1.24.3.1", "v1.24.3"],
        );

        let tags = last_tags(&vcs, &project, 4).expect("tags");
        assert_eq!(
            tags,
            vec![
                Tag::new(1, 25, 0, None),
                Tag::new(1, 24, 3, Some(1)),
                Tag::new(1, 24, 3, None),
            ]
        );
    }

    #[test]
    fn latest_tag_is_none_for_untagged_projects() {
        let project = sample_project("backend", "42");
        let vcs = MockVcs::new();

        assert_eq!(latest_tag(&vcs, &project).expect("tags"), None);
    }

    #[test]
    fn latest_tag_returns_the_first_parsed_tag() {
        let project = sample_project("backend", "42");
        let vcs = MockVcs::new().with_tag_names("42", &["v2.3.1"]);

        assert_eq!(
            latest_tag(&vcs, &project).expect("tags"),
            Some(Tag::new(2, 3, 1, None))
        );
    }
}
