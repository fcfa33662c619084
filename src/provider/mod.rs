//! Outbound transactional mail providers.

pub mod mailgun;

use async_trait::async_trait;

pub use mailgun::MailgunClient;

/// A single plain-text message addressed to one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
}

/// What the provider reports after accepting a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderReceipt {
    pub id: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("HTTP request to provider failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider rejected message with status {status}: {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Submits one message per call. Dropping the returned future aborts the
/// submission.
#[async_trait]
pub trait MailProvider: Send + Sync {
    async fn send(&self, message: &OutgoingMessage) -> Result<ProviderReceipt, ProviderError>;
}
