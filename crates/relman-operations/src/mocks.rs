use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use relman_core::{BranchDifference, Issue, Project};
use relman_gitlab::{GitlabError, MergeRequestHandle, MergeRequestSnapshot, MergeRequestState};
use relman_jira::{IssueVersions, JiraError, VersionRef};

use crate::Result;
use crate::traits::{TrackerProvider, VcsProvider};

#[must_use]
pub fn sample_project(name: &str, gitlab_id: &str) -> Project {
    use relman_core::{MergeRequest, MergeType, SchemeId};

    Project {
        name: name.to_string(),
        gitlab_id: gitlab_id.to_string(),
        production_environment_branch: "production".to_string(),
        merge_requests: vec![
            MergeRequest {
                merge_type: MergeType::Dev,
                source_branch: "master".to_string(),
                target_branch: "develop".to_string(),
            },
            MergeRequest {
                merge_type: MergeType::Prod,
                source_branch: "master".to_string(),
                target_branch: "production".to_string(),
            },
        ],
        versioning_scheme: SchemeId::IncrementingSegments,
        tag_group: None,
        production_release_jira_transitions: vec!["Deployed".to_string()],
        jira_warning_labels: ["requires-migration".to_string()].into(),
    }
}

#[must_use]
pub fn sample_commit(id: &str, message: &str) -> relman_core::Commit {
    use chrono::{TimeZone, Utc};

    relman_core::Commit {
        id: id.to_string(),
        message: message.to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).single().expect("valid timestamp"),
        parent_ids: std::collections::BTreeSet::new(),
    }
}

pub fn transient_vcs_error() -> GitlabError {
    GitlabError::Http {
        status: 405,
        endpoint: "/api/v4/projects/42/merge_requests/1/merge".to_string(),
    }
}

pub fn permanent_vcs_error() -> GitlabError {
    GitlabError::Http {
        status: 401,
        endpoint: "/api/v4/projects/42/merge_requests/1/merge".to_string(),
    }
}

fn tracker_error(endpoint: &str) -> JiraError {
    JiraError::Http {
        status: 500,
        endpoint: endpoint.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedMergeRequest {
    pub source_branch: String,
    pub target_branch: String,
    pub title: String,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedTag {
    pub name: String,
    pub ref_name: String,
    pub message: String,
}

pub struct MockVcs {
    differences: HashMap<(String, String), BranchDifference>,
    tag_names: HashMap<String, Vec<String>>,
    snapshot: MergeRequestSnapshot,
    flag_rejections: Mutex<u32>,
    reject_permanently: bool,
    fail_tag_creation: bool,
    pub flag_attempts: Mutex<u32>,
    pub merged: Mutex<Vec<u64>>,
    pub created_tags: Mutex<Vec<CreatedTag>>,
    pub created_merge_requests: Mutex<Vec<CreatedMergeRequest>>,
}

impl MockVcs {
    #[must_use]
    pub fn new() -> Self {
        Self {
            differences: HashMap::new(),
            tag_names: HashMap::new(),
            snapshot: MergeRequestSnapshot {
                state: MergeRequestState::Opened,
                merge_when_pipeline_succeeds: true,
            },
            flag_rejections: Mutex::new(0),
            reject_permanently: false,
            fail_tag_creation: false,
            flag_attempts: Mutex::new(0),
            merged: Mutex::new(Vec::new()),
            created_tags: Mutex::new(Vec::new()),
            created_merge_requests: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_difference(
        mut self,
        source: &str,
        target: &str,
        difference: BranchDifference,
    ) -> Self {
        self.differences
            .insert((source.to_string(), target.to_string()), difference);
        self
    }

    #[must_use]
    pub fn with_tag_names(mut self, gitlab_id: &str, names: &[&str]) -> Self {
        self.tag_names.insert(
            gitlab_id.to_string(),
            names.iter().map(|&s| s.to_string()).collect(),
        );
        self
    }

    #[must_use]
    pub fn with_snapshot(mut self, state: MergeRequestState, flag_set: bool) -> Self {
        self.snapshot = MergeRequestSnapshot {
            state,
            merge_when_pipeline_succeeds: flag_set,
        };
        self
    }

    /// Makes the next `count` merge-on-success commands fail with a
    /// transient error, mimicking the host rejecting fresh requests.
    #[must_use]
    pub fn with_flag_rejections(self, count: u32) -> Self {
        *self.flag_rejections.lock().expect("lock poisoned") = count;
        self
    }

    /// Makes merge-on-success commands fail permanently instead.
    #[must_use]
    pub fn rejecting_permanently(mut self) -> Self {
        self.reject_permanently = true;
        self
    }

    #[must_use]
    pub fn with_failing_tag_creation(mut self) -> Self {
        self.fail_tag_creation = true;
        self
    }
}

impl Default for MockVcs {
    fn default() -> Self {
        Self::new()
    }
}

impl VcsProvider for MockVcs {
    fn compare_refs(
        &self,
        _project: &Project,
        source: &str,
        target: &str,
    ) -> Result<BranchDifference> {
        Ok(self
            .differences
            .get(&(source.to_string(), target.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    fn list_tag_names(&self, project: &Project, limit: usize) -> Result<Vec<String>> {
        let mut names = self
            .tag_names
            .get(&project.gitlab_id)
            .cloned()
            .unwrap_or_default();
        names.truncate(limit);
        Ok(names)
    }

    fn create_tag(
        &self,
        _project: &Project,
        name: &str,
        ref_name: &str,
        message: &str,
    ) -> Result<()> {
        if self.fail_tag_creation {
            return Err(permanent_vcs_error().into());
        }
        self.created_tags.lock().expect("lock poisoned").push(CreatedTag {
            name: name.to_string(),
            ref_name: ref_name.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }

    fn create_merge_request(
        &self,
        _project: &Project,
        source_branch: &str,
        target_branch: &str,
        title: &str,
        labels: &[String],
    ) -> Result<MergeRequestHandle> {
        self.created_merge_requests
            .lock()
            .expect("lock poisoned")
            .push(CreatedMergeRequest {
                source_branch: source_branch.to_string(),
                target_branch: target_branch.to_string(),
                title: title.to_string(),
                labels: labels.to_vec(),
            });
        Ok(MergeRequestHandle {
            iid: 1,
            web_url: None,
        })
    }

    fn merge_request(&self, _project: &Project, _iid: u64) -> Result<MergeRequestSnapshot> {
        Ok(self.snapshot.clone())
    }

    fn set_merge_when_pipeline_succeeds(&self, _project: &Project, _iid: u64) -> Result<()> {
        *self.flag_attempts.lock().expect("lock poisoned") += 1;
        let mut rejections = self.flag_rejections.lock().expect("lock poisoned");
        if *rejections > 0 {
            *rejections -= 1;
            if self.reject_permanently {
                return Err(permanent_vcs_error().into());
            }
            return Err(transient_vcs_error().into());
        }
        Ok(())
    }

    fn merge(&self, _project: &Project, iid: u64) -> Result<()> {
        self.merged.lock().expect("lock poisoned").push(iid);
        Ok(())
    }
}

pub struct MockTracker {
    configured: bool,
    issues: HashMap<String, Issue>,
    failing_issue_lookups: HashSet<String>,
    issue_versions: HashMap<String, IssueVersions>,
    failing_issue_versions: HashSet<String>,
    project_versions: HashMap<String, Vec<VersionRef>>,
    transitions: HashMap<String, Vec<(String, String)>>,
    failing_transition_lookups: HashSet<String>,
    failing_transition_applications: HashSet<String>,
    pub created_versions: Mutex<Vec<(String, String)>>,
    pub fix_version_updates: Mutex<Vec<(String, Vec<String>)>>,
    pub applied_transitions: Mutex<Vec<(String, String)>>,
}

impl MockTracker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            configured: true,
            issues: HashMap::new(),
            failing_issue_lookups: HashSet::new(),
            issue_versions: HashMap::new(),
            failing_issue_versions: HashSet::new(),
            project_versions: HashMap::new(),
            transitions: HashMap::new(),
            failing_transition_lookups: HashSet::new(),
            failing_transition_applications: HashSet::new(),
            created_versions: Mutex::new(Vec::new()),
            fix_version_updates: Mutex::new(Vec::new()),
            applied_transitions: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn unconfigured(mut self) -> Self {
        self.configured = false;
        self
    }

    #[must_use]
    pub fn with_issue(mut self, issue: Issue) -> Self {
        self.issues.insert(issue.key.clone(), issue);
        self
    }

    #[must_use]
    pub fn with_failing_issue_lookup(mut self, issue_key: &str) -> Self {
        self.failing_issue_lookups.insert(issue_key.to_string());
        self
    }

    #[must_use]
    pub fn with_issue_versions(mut self, issue_key: &str, versions: IssueVersions) -> Self {
        self.issue_versions.insert(issue_key.to_string(), versions);
        self
    }

    #[must_use]
    pub fn with_failing_issue_versions(mut self, issue_key: &str) -> Self {
        self.failing_issue_versions.insert(issue_key.to_string());
        self
    }

    #[must_use]
    pub fn with_project_versions(mut self, project_key: &str, versions: Vec<VersionRef>) -> Self {
        self.project_versions
            .insert(project_key.to_string(), versions);
        self
    }

    #[must_use]
    pub fn with_transition(mut self, issue_key: &str, name: &str, id: &str) -> Self {
        self.transitions
            .entry(issue_key.to_string())
            .or_default()
            .push((name.to_string(), id.to_string()));
        self
    }

    #[must_use]
    pub fn with_failing_transition_lookup(mut self, issue_key: &str) -> Self {
        self.failing_transition_lookups.insert(issue_key.to_string());
        self
    }

    #[must_use]
    pub fn with_failing_transition_application(mut self, transition_id: &str) -> Self {
        self.failing_transition_applications
            .insert(transition_id.to_string());
        self
    }
}

impl Default for MockTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackerProvider for MockTracker {
    fn is_configured(&self) -> bool {
        self.configured
    }

    fn get_issue(&self, issue_key: &str) -> Result<Option<Issue>> {
        if self.failing_issue_lookups.contains(issue_key) {
            return Err(tracker_error("/rest/api/2/issue").into());
        }
        Ok(self.issues.get(issue_key).cloned())
    }

    fn issue_versions(&self, issue_key: &str) -> Result<IssueVersions> {
        if self.failing_issue_versions.contains(issue_key) {
            return Err(tracker_error("/rest/api/2/issue").into());
        }
        Ok(self
            .issue_versions
            .get(issue_key)
            .cloned()
            .unwrap_or_else(|| IssueVersions {
                project_key: "ABC".to_string(),
                fix_versions: Vec::new(),
            }))
    }

    fn project_versions(&self, project_key: &str) -> Result<Vec<VersionRef>> {
        Ok(self
            .project_versions
            .get(project_key)
            .cloned()
            .unwrap_or_default())
    }

    fn create_version(&self, name: &str, project_key: &str) -> Result<VersionRef> {
        self.created_versions
            .lock()
            .expect("lock poisoned")
            .push((name.to_string(), project_key.to_string()));
        Ok(VersionRef {
            id: format!("created-{name}"),
            name: name.to_string(),
        })
    }

    fn set_fix_versions(&self, issue_key: &str, version_ids: &[String]) -> Result<()> {
        self.fix_version_updates
            .lock()
            .expect("lock poisoned")
            .push((issue_key.to_string(), version_ids.to_vec()));
        Ok(())
    }

    fn find_transition_id(&self, issue_key: &str, name: &str) -> Result<Option<String>> {
        if self.failing_transition_lookups.contains(issue_key) {
            return Err(tracker_error("/rest/api/2/issue/transitions").into());
        }
        Ok(self.transitions.get(issue_key).and_then(|transitions| {
            transitions
                .iter()
                .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
                .map(|(_, id)| id.clone())
        }))
    }

    fn apply_transition(&self, issue_key: &str, transition_id: &str) -> Result<()> {
        if self.failing_transition_applications.contains(transition_id) {
            return Err(tracker_error("/rest/api/2/issue/transitions").into());
        }
        self.applied_transitions
            .lock()
            .expect("lock poisoned")
            .push((issue_key.to_string(), transition_id.to_string()));
        Ok(())
    }
}

