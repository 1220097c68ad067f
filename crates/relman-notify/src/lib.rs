use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, NotifyError>;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification delivery failed")]
    Transport(#[from] reqwest::Error),

    #[error("notification hook responded {status}")]
    Http { status: u16 },
}

/// How a message should be presented in the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Failure,
}

impl Severity {
    fn color(self) -> &'static str {
        match self {
            Self::Info => "black",
            Self::Success => "green",
            Self::Failure => "red",
        }
    }
}

/// Posts human-readable status messages to a Rocket.Chat incoming
/// webhook. An unconfigured client drops messages silently.
pub struct RocketClient {
    http: reqwest::blocking::Client,
    hook_url: Option<String>,
}

impl RocketClient {
    #[must_use]
    pub fn new(hook_url: Option<String>) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            hook_url,
        }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.hook_url.is_some()
    }

    /// Delivers a message to the channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the webhook rejects the request or cannot be
    /// reached; callers decide whether delivery failures matter.
    pub fn send_message(&self, message: &str, severity: Severity) -> Result<()> {
        let Some(hook_url) = &self.hook_url else {
            return Ok(());
        };
        let body = json!({
            "text": "",
            "attachments": [{
                "author_name": "Release Manager",
                "color": severity.color(),
                "thumb_url": null,
                "text": message,
            }]
        });
        let response = self.http.post(hook_url).json(&body).send()?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(NotifyError::Http {
                status: status.as_u16(),
            })
        }
    }
}
