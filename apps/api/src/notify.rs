//! Outbound notifications — pluggable, trait-based mailer behind the store.
//!
//! Default: `TracingMailer`, which writes the message to the log instead of
//! delivering anything. A real SMTP/SES mailer slots in without touching the
//! store or handlers.

use async_trait::async_trait;
use tracing::info;

/// Delivery seam for account emails.
///
/// Carried in the store as `Arc<dyn Mailer>`.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends the address-verification email with its click-through URL.
    async fn send_verification(&self, email: &str, url: &str);

    /// Sends the password-reset email with its click-through URL.
    async fn send_password_reset(&self, email: &str, url: &str);
}

/// Mailer that logs instead of delivering. The log lines carry the full
/// URLs so both flows stay walkable from the console during development.
pub struct TracingMailer;

#[async_trait]
impl Mailer for TracingMailer {
    async fn send_verification(&self, email: &str, url: &str) {
        info!("[Verification Email Sent to {email}]");
        info!("Verification URL: {url}");
    }

    async fn send_password_reset(&self, email: &str, url: &str) {
        info!("[Password Reset Email Sent to {email}]");
        info!("Reset URL: {url}");
    }
}

/// Test mailer that records every (recipient, url) pair it is handed.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: std::sync::Mutex<Vec<(String, String)>>,
}

#[cfg(test)]
#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_verification(&self, email: &str, url: &str) {
        self.sent
            .lock()
            .unwrap()
            .push((email.to_string(), url.to_string()));
    }

    async fn send_password_reset(&self, email: &str, url: &str) {
        self.sent
            .lock()
            .unwrap()
            .push((email.to_string(), url.to_string()));
    }
}
