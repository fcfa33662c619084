use crate::{
    config::MailgunConfig,
    dto::ProductEmailRequest,
    provider::{MailProvider, OutgoingMessage, ProviderError},
};

use std::{sync::Arc, time::Duration};

pub const SUBJECT: &str = "Product Information";

#[derive(Debug, thiserror::Error)]
pub enum EmailServiceError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Provider did not answer within {0:?}")]
    Timeout(Duration),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendResult {
    pub id: String,
    pub message: String,
}

pub struct EmailService {
    provider: Arc<dyn MailProvider>,
    sender: String,
}

pub fn format_sender(from_name: &str, from_email: &str, domain: &str) -> String {
    format!("{from_name} <{from_email}@{domain}>")
}

pub fn format_product_email(data: &ProductEmailRequest) -> String {
    format!(
        "\nProduct Details:\n---------------\nName: {}\nPrice: ${:.2}\nDescription: {}\n",
        data.product_name, data.price, data.description
    )
}

impl EmailService {
    pub fn new(provider: Arc<dyn MailProvider>, config: &MailgunConfig) -> Self {
        Self {
            provider,
            sender: format_sender(&config.from_name, &config.from_email, &config.domain),
        }
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Sends the product details to the request's recipient.
    ///
    /// The provider call is dropped, and thereby aborted, once `deadline`
    /// elapses. A single attempt is made.
    pub async fn send_product_email(
        &self,
        data: &ProductEmailRequest,
        deadline: Duration,
    ) -> Result<SendResult, EmailServiceError> {
        let message = OutgoingMessage {
            from: self.sender.clone(),
            to: data.recipient_email.clone(),
            subject: SUBJECT.to_string(),
            text: format_product_email(data),
        };

        tracing::info!(
            "Sending product email for '{}' to '{}'",
            data.product_name,
            data.recipient_email
        );

        let receipt = tokio::time::timeout(deadline, self.provider.send(&message))
            .await
            .map_err(|_| EmailServiceError::Timeout(deadline))??;

        tracing::info!("Provider accepted message {}", receipt.id);

        Ok(SendResult {
            id: receipt.id,
            message: receipt.message,
        })
    }
}
