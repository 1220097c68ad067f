use relman_core::UnknownSchemeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("the {name} environment variable is not present")]
    MissingVariable { name: &'static str },

    #[error("failed to parse the PROJECTS definition")]
    InvalidProjects(#[from] serde_json::Error),

    #[error(transparent)]
    UnknownScheme(#[from] UnknownSchemeError),
}
