//! SMTP relay configuration

use serde::Deserialize;
use std::time::Duration;

/// Settings for the mail-submission relay
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    /// Relay hostname, e.g. "smtp.gmail.com"
    pub host: String,
    /// Submission port (STARTTLS), conventionally 587
    #[serde(default = "default_port")]
    pub port: u16,
    /// Username for AUTH LOGIN
    pub username: String,
    /// Password or app password for AUTH LOGIN
    pub password: String,
    /// Envelope sender and From address
    pub sender: String,
    /// Display name used in the From header
    #[serde(default = "default_sender_name")]
    pub sender_name: String,
    /// Budget for the whole exchange, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_port() -> u16 {
    587
}

fn default_sender_name() -> String {
    "Campus Lost & Found".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

impl SmtpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
