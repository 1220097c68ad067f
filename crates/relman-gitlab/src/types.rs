use serde::Deserialize;

/// Reference to a merge request opened on the host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MergeRequestHandle {
    pub iid: u64,
    #[serde(default)]
    pub web_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeRequestState {
    Opened,
    Closed,
    Locked,
    Merged,
}

/// Host-side state of a merge request at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MergeRequestSnapshot {
    pub state: MergeRequestState,
    #[serde(default)]
    pub merge_when_pipeline_succeeds: bool,
}

impl MergeRequestSnapshot {
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state == MergeRequestState::Opened
    }
}
