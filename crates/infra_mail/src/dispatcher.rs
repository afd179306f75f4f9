//! Notification outbox dispatcher
//!
//! Background loop that drains the outbox written by the claim resolution
//! transaction. Delivery is asynchronous to resolution on purpose: an
//! unreachable relay must never roll back an approval. The loop wakes on a
//! fixed interval and whenever a resolution handler nudges it through a
//! [`DispatcherHandle`].

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tokio::sync::Notify;
use tracing::{debug, error, info, warn};

use infra_db::{OutboxRepository, OutboxRow};

use crate::smtp::{Mailer, OutgoingEmail};

/// Settings for the outbox drain loop
#[derive(Debug, Clone, Deserialize)]
pub struct DispatcherConfig {
    /// Seconds between scheduled drain passes
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Maximum entries delivered per pass
    #[serde(default = "default_batch_size")]
    pub batch_size: i64,
    /// Delivery attempts before an entry is marked failed
    #[serde(default = "default_max_attempts")]
    pub max_attempts: i32,
}

fn default_poll_interval_secs() -> u64 {
    30
}

fn default_batch_size() -> i64 {
    20
}

fn default_max_attempts() -> i32 {
    5
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            batch_size: default_batch_size(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl DispatcherConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

/// Cheap handle for nudging the dispatcher from request handlers
#[derive(Debug, Clone)]
pub struct DispatcherHandle {
    wake: Arc<Notify>,
}

impl DispatcherHandle {
    /// Asks the dispatcher to run a drain pass soon
    pub fn wake(&self) {
        self.wake.notify_one();
    }

    /// Handle with no dispatcher behind it; `wake` becomes a no-op.
    ///
    /// Used when mail delivery is not configured, so resolutions still
    /// succeed and outbox rows simply stay pending.
    pub fn disconnected() -> Self {
        Self {
            wake: Arc::new(Notify::new()),
        }
    }
}

/// Drains pending outbox entries through a [`Mailer`]
pub struct OutboxDispatcher {
    outbox: OutboxRepository,
    mailer: Arc<dyn Mailer>,
    config: DispatcherConfig,
    wake: Arc<Notify>,
}

impl OutboxDispatcher {
    pub fn new(outbox: OutboxRepository, mailer: Arc<dyn Mailer>, config: DispatcherConfig) -> Self {
        Self {
            outbox,
            mailer,
            config,
            wake: Arc::new(Notify::new()),
        }
    }

    pub fn handle(&self) -> DispatcherHandle {
        DispatcherHandle {
            wake: Arc::clone(&self.wake),
        }
    }

    /// Runs the drain loop until the owning task is dropped
    pub async fn run(self) {
        info!(
            poll_interval_secs = self.config.poll_interval_secs,
            batch_size = self.config.batch_size,
            max_attempts = self.config.max_attempts,
            "Outbox dispatcher started"
        );

        let mut interval = tokio::time::interval(self.config.poll_interval());
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {}
                _ = self.wake.notified() => {
                    debug!("Outbox dispatcher woken by resolution");
                }
            }

            if let Err(e) = self.drain_once().await {
                error!(error = %e, "Outbox drain pass failed");
            }
        }
    }

    /// Delivers one batch of due entries, recording each attempt's outcome
    pub async fn drain_once(&self) -> Result<usize, infra_db::DatabaseError> {
        let due = self
            .outbox
            .fetch_due(self.config.batch_size, self.config.max_attempts)
            .await?;

        if due.is_empty() {
            return Ok(0);
        }

        debug!(count = due.len(), "Draining notification outbox");

        let mut delivered = 0;
        for entry in due {
            let mail = outgoing(&entry);
            match self.mailer.send(&mail).await {
                Ok(()) => {
                    self.outbox.mark_sent(entry.id).await?;
                    info!(
                        notification_id = %entry.id,
                        claim_id = %entry.claim_id,
                        recipient = %entry.recipient,
                        "Notification delivered"
                    );
                    delivered += 1;
                }
                Err(e) => {
                    self.outbox
                        .mark_failed(entry.id, &e.to_string(), self.config.max_attempts)
                        .await?;
                    warn!(
                        notification_id = %entry.id,
                        claim_id = %entry.claim_id,
                        recipient = %entry.recipient,
                        attempt = entry.attempts + 1,
                        error = %e,
                        "Notification delivery failed"
                    );
                }
            }
        }

        Ok(delivered)
    }
}

fn outgoing(entry: &OutboxRow) -> OutgoingEmail {
    OutgoingEmail {
        message_id: entry.message_id,
        to: entry.recipient.clone(),
        subject: entry.subject.clone(),
        body: entry.body.clone(),
    }
}
