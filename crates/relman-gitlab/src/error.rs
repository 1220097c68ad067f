use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitlabError {
    #[error("invalid GitLab host URL '{host}'")]
    InvalidHost { host: String },

    #[error("GitLab request failed")]
    Transport(#[from] reqwest::Error),

    #[error("GitLab responded {status} for {endpoint}")]
    Http { status: u16, endpoint: String },

    #[error("unexpected GitLab payload from {endpoint}")]
    Payload {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}

impl GitlabError {
    /// Whether the error is worth retrying.
    ///
    /// GitLab is known to answer 405 for merge commands issued right
    /// after a merge request was created; 409/429/5xx and transport
    /// timeouts are equally short-lived.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http { status, .. } => matches!(status, 405 | 409 | 429) || *status >= 500,
            Self::Transport(source) => source.is_timeout() || source.is_connect(),
            Self::InvalidHost { .. } | Self::Payload { .. } => false,
        }
    }
}
