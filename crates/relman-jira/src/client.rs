use relman_core::Issue;
use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use url::Url;

use crate::Result;
use crate::error::JiraError;
use crate::types::{IssueVersions, VersionRef};

/// Blocking client for the Jira v2 REST API with basic authentication.
pub struct JiraClient {
    http: Client,
    base: Url,
    username: String,
    password: String,
}

impl JiraClient {
    /// # Errors
    ///
    /// Returns [`JiraError::NotConfigured`] when host or credentials are
    /// empty, and an error for hosts that are not absolute URLs.
    pub fn new(host: &str, username: &str, password: &str) -> Result<Self> {
        if host.is_empty() || username.is_empty() || password.is_empty() {
            return Err(JiraError::NotConfigured);
        }
        let base = Url::parse(host).map_err(|_| JiraError::InvalidHost {
            host: host.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(JiraError::InvalidHost {
                host: host.to_string(),
            });
        }
        Ok(Self {
            http: Client::new(),
            base,
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    /// Fetches an issue snapshot; a 404 is a regular "no such issue"
    /// result, not an error.
    pub fn get_issue(&self, issue_key: &str) -> Result<Option<Issue>> {
        let mut url = self.api_url(&["issue", issue_key]);
        url.query_pairs_mut().append_pair("fields", "summary,labels");
        let response = self.get(url)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let payload: IssuePayload = parse_json(ensure_success(response)?)?;
        Ok(Some(Issue {
            key: payload.key,
            summary: payload.fields.summary,
            labels: payload.fields.labels.into_iter().collect(),
        }))
    }

    /// The issue's current fix versions and owning project key.
    pub fn issue_versions(&self, issue_key: &str) -> Result<IssueVersions> {
        let mut url = self.api_url(&["issue", issue_key]);
        url.query_pairs_mut()
            .append_pair("fields", "fixVersions,project");
        let payload: FixVersionsPayload = parse_json(ensure_success(self.get(url)?)?)?;
        Ok(IssueVersions {
            project_key: payload.fields.project.key,
            fix_versions: payload.fields.fix_versions,
        })
    }

    pub fn project_versions(&self, project_key: &str) -> Result<Vec<VersionRef>> {
        let url = self.api_url(&["project", project_key, "versions"]);
        parse_json(ensure_success(self.get(url)?)?)
    }

    pub fn create_version(&self, name: &str, project_key: &str) -> Result<VersionRef> {
        let url = self.api_url(&["version"]);
        let body = json!({ "name": name, "project": project_key });
        parse_json(ensure_success(self.post(url, &body)?)?)
    }

    /// Replaces the issue's fix versions without notifying watchers.
    pub fn set_fix_versions(&self, issue_key: &str, version_ids: &[String]) -> Result<()> {
        let mut url = self.api_url(&["issue", issue_key]);
        url.query_pairs_mut().append_pair("notifyUsers", "false");
        let versions: Vec<_> = version_ids.iter().map(|id| json!({ "id": id })).collect();
        let body = json!({ "fields": { "fixVersions": versions } });
        let response = self
            .http
            .put(url)
            .basic_auth(&self.username, Some(&self.password))
            .json(&body)
            .send()?;
        ensure_success(response).map(drop)
    }

    /// Looks up the id of a transition currently available on the issue,
    /// matched by name case-insensitively.
    pub fn find_transition_id(&self, issue_key: &str, name: &str) -> Result<Option<String>> {
        let url = self.api_url(&["issue", issue_key, "transitions"]);
        let payload: TransitionsPayload = parse_json(ensure_success(self.get(url)?)?)?;
        Ok(payload
            .transitions
            .into_iter()
            .find(|transition| transition.name.eq_ignore_ascii_case(name))
            .map(|transition| transition.id))
    }

    pub fn apply_transition(&self, issue_key: &str, transition_id: &str) -> Result<()> {
        let url = self.api_url(&["issue", issue_key, "transitions"]);
        let body = json!({ "transition": { "id": transition_id } });
        ensure_success(self.post(url, &body)?).map(drop)
    }

    fn api_url(&self, tail: &[&str]) -> Url {
        let mut url = self.base.clone();
        {
            let mut segments = url.path_segments_mut().expect("validated base URL");
            segments.extend(["rest", "api", "2"]);
            segments.extend(tail);
        }
        url
    }

    fn get(&self, url: Url) -> Result<Response> {
        Ok(self
            .http
            .get(url)
            .basic_auth(&self.username, Some(&self.password))
            .send()?)
    }

    fn post(&self, url: Url, body: &serde_json::Value) -> Result<Response> {
        Ok(self
            .http
            .post(url)
            .basic_auth(&self.username, Some(&self.password))
            .json(body)
            .send()?)
    }
}

fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(JiraError::Http {
            status: status.as_u16(),
            endpoint: response.url().path().to_string(),
        })
    }
}

fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let endpoint = response.url().path().to_string();
    response
        .json()
        .map_err(|source| JiraError::Payload { endpoint, source })
}

#[derive(Debug, Deserialize)]
struct IssuePayload {
    key: String,
    fields: IssueFields,
}

#[derive(Debug, Deserialize)]
struct IssueFields {
    #[serde(default)]
    summary: String,
    #[serde(default)]
    labels: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct FixVersionsPayload {
    fields: FixVersionsFields,
}

#[derive(Debug, Deserialize)]
struct FixVersionsFields {
    #[serde(rename = "fixVersions", default)]
    fix_versions: Vec<VersionRef>,
    project: ProjectRef,
}

#[derive(Debug, Deserialize)]
struct ProjectRef {
    key: String,
}

#[derive(Debug, Deserialize)]
struct TransitionsPayload {
    #[serde(default)]
    transitions: Vec<TransitionPayload>,
}

#[derive(Debug, Deserialize)]
struct TransitionPayload {
    id: String,
    name: String,
}
