use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use relman_core::{BranchDifference, Commit};
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use url::Url;

use crate::Result;
use crate::error::GitlabError;
use crate::types::{MergeRequestHandle, MergeRequestSnapshot};

const PRIVATE_TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// Blocking client for the GitLab v4 REST API.
///
/// Callers identify projects by their GitLab project id; ids that contain
/// a namespace path are percent-encoded transparently.
pub struct GitlabClient {
    http: Client,
    base: Url,
    token: String,
}

impl GitlabClient {
    /// # Errors
    ///
    /// Returns an error if the host is not a valid absolute URL.
    pub fn new(host: &str, private_token: &str) -> Result<Self> {
        let base = Url::parse(host).map_err(|_| GitlabError::InvalidHost {
            host: host.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(GitlabError::InvalidHost {
                host: host.to_string(),
            });
        }
        Ok(Self {
            http: Client::new(),
            base,
            token: private_token.to_string(),
        })
    }

    /// Compares `source` relative to `target`, GitLab's
    /// `repository/compare` with `from=target`, `to=source`.
    pub fn compare_refs(
        &self,
        gitlab_id: &str,
        source: &str,
        target: &str,
    ) -> Result<BranchDifference> {
        let mut url = self.project_url(gitlab_id, &["repository", "compare"]);
        url.query_pairs_mut()
            .append_pair("from", target)
            .append_pair("to", source);
        let payload: ComparePayload = parse_json(self.get(url)?)?;
        Ok(BranchDifference {
            has_diff: !payload.diffs.is_empty(),
            commits: payload.commits.into_iter().map(Commit::from).collect(),
        })
    }

    /// Lists the newest tag names as reported by the host, unparsed.
    pub fn list_tag_names(&self, gitlab_id: &str, limit: usize) -> Result<Vec<String>> {
        let mut url = self.project_url(gitlab_id, &["repository", "tags"]);
        url.query_pairs_mut()
            .append_pair("per_page", &limit.to_string())
            .append_pair("search", "v");
        let payload: Vec<TagPayload> = parse_json(self.get(url)?)?;
        Ok(payload.into_iter().map(|tag| tag.name).collect())
    }

    /// Creates an annotated tag at `ref_name`.
    pub fn create_tag(
        &self,
        gitlab_id: &str,
        name: &str,
        ref_name: &str,
        message: &str,
    ) -> Result<()> {
        let url = self.project_url(gitlab_id, &["repository", "tags"]);
        let body = json!({
            "tag_name": name,
            "ref": ref_name,
            "message": message,
        });
        self.post(url, &body).map(drop)
    }

    pub fn create_merge_request(
        &self,
        gitlab_id: &str,
        source_branch: &str,
        target_branch: &str,
        title: &str,
        labels: &[String],
    ) -> Result<MergeRequestHandle> {
        let url = self.project_url(gitlab_id, &["merge_requests"]);
        let body = json!({
            "source_branch": source_branch,
            "target_branch": target_branch,
            "title": title,
            "labels": labels,
        });
        parse_json(self.post(url, &body)?)
    }

    pub fn merge_request(&self, gitlab_id: &str, iid: u64) -> Result<MergeRequestSnapshot> {
        let url = self.project_url(gitlab_id, &["merge_requests", &iid.to_string()]);
        parse_json(self.get(url)?)
    }

    /// Asks the host to merge the request once its pipeline succeeds.
    pub fn set_merge_when_pipeline_succeeds(&self, gitlab_id: &str, iid: u64) -> Result<()> {
        let url = self.project_url(gitlab_id, &["merge_requests", &iid.to_string(), "merge"]);
        let body = json!({ "merge_when_pipeline_succeeds": true });
        self.put(url, &body).map(drop)
    }

    /// Merges the request immediately.
    pub fn merge(&self, gitlab_id: &str, iid: u64) -> Result<()> {
        let url = self.project_url(gitlab_id, &["merge_requests", &iid.to_string(), "merge"]);
        self.put(url, &json!({})).map(drop)
    }

    fn project_url(&self, gitlab_id: &str, tail: &[&str]) -> Url {
        let mut url = self.base.clone();
        {
            let mut segments = url.path_segments_mut().expect("validated base URL");
            segments.extend(["api", "v4", "projects", gitlab_id]);
            segments.extend(tail);
        }
        url
    }

    fn get(&self, url: Url) -> Result<Response> {
        let response = self
            .http
            .get(url)
            .header(PRIVATE_TOKEN_HEADER, &self.token)
            .send()?;
        ensure_success(response)
    }

    fn post(&self, url: Url, body: &serde_json::Value) -> Result<Response> {
        let response = self
            .http
            .post(url)
            .header(PRIVATE_TOKEN_HEADER, &self.token)
            .json(body)
            .send()?;
        ensure_success(response)
    }

    fn put(&self, url: Url, body: &serde_json::Value) -> Result<Response> {
        let response = self
            .http
            .put(url)
            .header(PRIVATE_TOKEN_HEADER, &self.token)
            .json(body)
            .send()?;
        ensure_success(response)
    }
}

fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(GitlabError::Http {
            status: status.as_u16(),
            endpoint: response.url().path().to_string(),
        })
    }
}

fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let endpoint = response.url().path().to_string();
    response
        .json()
        .map_err(|source| GitlabError::Payload { endpoint, source })
}

#[derive(Debug, Deserialize)]
struct ComparePayload {
    #[serde(default)]
    commits: Vec<CommitPayload>,
    #[serde(default)]
    diffs: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct CommitPayload {
    id: String,
    title: String,
    created_at: DateTime<Utc>,
    #[serde(default)]
    parent_ids: Vec<String>,
}

impl From<CommitPayload> for Commit {
    fn from(payload: CommitPayload) -> Self {
        Self {
            id: payload.id,
            message: payload.title,
            created_at: payload.created_at,
            parent_ids: payload.parent_ids.into_iter().collect::<BTreeSet<_>>(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TagPayload {
    name: String,
}
