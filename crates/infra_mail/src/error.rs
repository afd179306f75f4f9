//! Mail transport errors

use thiserror::Error;

/// Errors that can occur during an SMTP exchange
#[derive(Debug, Error)]
pub enum MailError {
    #[error("Could not connect to SMTP relay {host}:{port}: {message}")]
    Connect {
        host: String,
        port: u16,
        message: String,
    },

    #[error("SMTP exchange timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Unexpected reply during {stage}: expected {expected}, got {reply:?}")]
    UnexpectedReply {
        stage: &'static str,
        expected: u16,
        reply: String,
    },

    #[error("Relay closed the connection during {stage}")]
    ConnectionClosed { stage: &'static str },

    #[error("TLS negotiation failed: {0}")]
    Tls(String),

    #[error("I/O error during {stage}: {message}")]
    Io {
        stage: &'static str,
        message: String,
    },
}

impl MailError {
    pub fn io(stage: &'static str, error: std::io::Error) -> Self {
        MailError::Io {
            stage,
            message: error.to_string(),
        }
    }
}
