mod error;
mod settings;

pub use error::ConfigError;
pub use settings::{Settings, parse_projects};

pub type Result<T> = std::result::Result<T, ConfigError>;
