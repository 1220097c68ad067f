use relman_core::{BranchDifference, Project};
use relman_gitlab::{GitlabClient, MergeRequestHandle, MergeRequestSnapshot};

use crate::Result;
use crate::traits::VcsProvider;

pub struct GitlabVcsProvider {
    client: GitlabClient,
}

impl GitlabVcsProvider {
    #[must_use]
    pub fn new(client: GitlabClient) -> Self {
        Self { client }
    }
}

impl VcsProvider for GitlabVcsProvider {
    fn compare_refs(
        &self,
        project: &Project,
        source: &str,
        target: &str,
    ) -> Result<BranchDifference> {
        Ok(self.client.compare_refs(&project.gitlab_id, source, target)?)
    }

    fn list_tag_names(&self, project: &Project, limit: usize) -> Result<Vec<String>> {
        Ok(self.client.list_tag_names(&project.gitlab_id, limit)?)
    }

    fn create_tag(
        &self,
        project: &Project,
        name: &str,
        ref_name: &str,
        message: &str,
    ) -> Result<()> {
        Ok(self
            .client
            .create_tag(&project.gitlab_id, name, ref_name, message)?)
    }

    fn create_merge_request(
        &self,
        project: &Project,
        source_branch: &str,
        target_branch: &str,
        title: &str,
        labels: &[String],
    ) -> Result<MergeRequestHandle> {
        Ok(self.client.create_merge_request(
            &project.gitlab_id,
            source_branch,
            target_branch,
            title,
            labels,
        )?)
    }

    fn merge_request(&self, project: &Project, iid: u64) -> Result<MergeRequestSnapshot> {
        Ok(self.client.merge_request(&project.gitlab_id, iid)?)
    }

    fn set_merge_when_pipeline_succeeds(&self, project: &Project, iid: u64) -> Result<()> {
        Ok(self
            .client
            .set_merge_when_pipeline_succeeds(&project.gitlab_id, iid)?)
    }

    fn merge(&self, project: &Project, iid: u64) -> Result<()> {
        Ok(self.client.merge(&project.gitlab_id, iid)?)
    }
}
