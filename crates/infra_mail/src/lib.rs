//! Mail Infrastructure
//!
//! Two pieces:
//!
//! - [`SmtpMailer`]: a direct mail-submission client. One invocation is one
//!   protocol exchange (connect, greet, STARTTLS, authenticate, envelope,
//!   body, terminate) against the configured relay, failing fast on any
//!   unexpected reply code. No retries inside the client.
//! - [`OutboxDispatcher`]: drains the notification outbox that the claim
//!   resolution transaction writes, delivering each entry through a
//!   [`Mailer`] and recording every attempt's outcome on the row.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod smtp;

pub use config::SmtpConfig;
pub use dispatcher::{DispatcherConfig, DispatcherHandle, OutboxDispatcher};
pub use error::MailError;
pub use smtp::{Mailer, OutgoingEmail, SmtpMailer};
