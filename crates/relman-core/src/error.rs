use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown versioning scheme id '{id}'")]
pub struct UnknownSchemeError {
    pub id: String,
}
