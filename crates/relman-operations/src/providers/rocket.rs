use relman_notify::{RocketClient, Severity};

use crate::Result;
use crate::traits::Notifier;

pub struct RocketNotifier {
    client: RocketClient,
}

impl RocketNotifier {
    #[must_use]
    pub fn new(client: RocketClient) -> Self {
        Self { client }
    }
}

impl Notifier for RocketNotifier {
    fn is_configured(&self) -> bool {
        self.client.is_configured()
    }

    fn notify(&self, message: &str, severity: Severity) -> Result<()> {
        Ok(self.client.send_message(message, severity)?)
    }
}
