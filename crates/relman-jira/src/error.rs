use thiserror::Error;

#[derive(Debug, Error)]
pub enum JiraError {
    #[error("invalid Jira host URL '{host}'")]
    InvalidHost { host: String },

    #[error("insufficient Jira configuration")]
    NotConfigured,

    #[error("Jira request failed")]
    Transport(#[from] reqwest::Error),

    #[error("Jira responded {status} for {endpoint}")]
    Http { status: u16, endpoint: String },

    #[error("unexpected Jira payload from {endpoint}")]
    Payload {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}
