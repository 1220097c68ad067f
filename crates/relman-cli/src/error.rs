use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error")]
    Config(#[from] relman_config::ConfigError),

    #[error("GitLab client error")]
    Gitlab(#[from] relman_gitlab::GitlabError),

    #[error("Jira client error")]
    Jira(#[from] relman_jira::JiraError),

    #[error(transparent)]
    Operation(#[from] relman_operations::OperationError),

    #[error("'{name}' is not a valid release tag")]
    InvalidTag { name: String },
}

pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::CliError;

    #[test]
    fn invalid_tag_error_includes_the_name() {
        let err = CliError::InvalidTag {
            name: "banana".to_string(),
        };

        assert!(err.to_string().contains("banana"));
    }

    #[test]
    fn config_error_converts_via_from() {
        let config_err = relman_config::ConfigError::MissingVariable {
            name: "GITLAB_HOST",
        };

        let cli_err: CliError = config_err.into();

        assert!(matches!(cli_err, CliError::Config(_)));
        assert!(std::error::Error::source(&cli_err).is_some());
    }
}
