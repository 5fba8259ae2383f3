//! # Notifications Feature
//!
//! Delivery seam between the core and the chat transport. The scheduler hands
//! a `{destination, message}` pair to a [`Notifier`]; what happens on the wire
//! is the collaborator's business. Failures are non-fatal and the core never
//! retries within a tick.

pub mod webhook;

pub use webhook::WebhookNotifier;

use anyhow::Result;
use async_trait::async_trait;
use log::info;

/// External collaborator that delivers a message to a destination
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Attempt one delivery. Errors are reported, never retried by the core.
    async fn deliver(&self, destination: &str, message: &str) -> Result<()>;
}

/// Fallback sender that only logs deliveries. Used when no webhook endpoint
/// is configured, and handy for dry runs.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn deliver(&self, destination: &str, message: &str) -> Result<()> {
        info!("[delivery] to {destination}: {message}");
        Ok(())
    }
}
