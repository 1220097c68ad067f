use std::thread;
use std::time::Duration;

use relman_core::{MergeRequest, Project};
use relman_gitlab::MergeRequestHandle;
use tracing::debug;

use crate::Result;
use crate::traits::VcsProvider;

/// Label attached to every merge request the release manager opens.
pub const RELEASE_MANAGER_LABEL: &str = "release-manager";

const MERGE_AUTOMATICALLY_MAX_TRIES: u32 = 3;
const MERGE_RETRY_DELAY: Duration = Duration::from_secs(3);

/// Opens release merge requests and drives them towards being merged.
pub struct MergeAutomation<'a, V> {
    vcs: &'a V,
    retry_delay: Duration,
}

impl<'a, V: VcsProvider> MergeAutomation<'a, V> {
    pub fn new(vcs: &'a V) -> Self {
        Self {
            vcs,
            retry_delay: MERGE_RETRY_DELAY,
        }
    }

    #[must_use]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Opens the merge request for one configured merge, labelled with
    /// the release-manager label and the merge type.
    ///
    /// # Errors
    ///
    /// Returns an error when the host rejects the creation.
    pub fn create(
        &self,
        project: &Project,
        merge_request: &MergeRequest,
    ) -> Result<MergeRequestHandle> {
        let title = format!("[Release Manager] {merge_request}");
        let labels = vec![
            RELEASE_MANAGER_LABEL.to_string(),
            merge_request.merge_type.to_string(),
        ];
        self.vcs.create_merge_request(
            project,
            &merge_request.source_branch,
            &merge_request.target_branch,
            &title,
            &labels,
        )
    }

    /// Asks the host to merge the request once its pipeline succeeds.
    ///
    /// Freshly created merge requests are often not yet mergeable, so
    /// transient rejections are retried a bounded number of times with a
    /// delay in between. If the request is still open without the flag
    /// afterwards (no pipeline ever ran, for instance) it is merged
    /// unconditionally.
    ///
    /// # Errors
    ///
    /// Returns the last error after the retries are exhausted, or
    /// immediately on a non-transient error.
    pub fn merge_automatically(&self, project: &Project, iid: u64) -> Result<()> {
        let mut attempt = 1;
        loop {
            match self.vcs.set_merge_when_pipeline_succeeds(project, iid) {
                Ok(()) => break,
                Err(err) if err.is_transient() && attempt < MERGE_AUTOMATICALLY_MAX_TRIES => {
                    debug!(iid, attempt, error = %err, "merge-on-success rejected, retrying");
                    attempt += 1;
                    thread::sleep(self.retry_delay);
                }
                Err(err) => return Err(err),
            }
        }

        let snapshot = self.vcs.merge_request(project, iid)?;
        if snapshot.is_open() && !snapshot.merge_when_pipeline_succeeds {
            self.vcs.merge(project, iid)?;
        }
        Ok(())
    }
}
