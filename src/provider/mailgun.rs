use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::config::MailgunConfig;

use super::{MailProvider, OutgoingMessage, ProviderError, ProviderReceipt};

/// Client for the Mailgun messages API.
pub struct MailgunClient {
    client: reqwest::Client,
    messages_url: String,
    api_key: SecretString,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    id: String,
    message: String,
}

fn messages_url(api_base: &str, domain: &str) -> String {
    format!("{}/v3/{}/messages", api_base.trim_end_matches('/'), domain)
}

fn form_fields(message: &OutgoingMessage) -> [(&'static str, &str); 4] {
    [
        ("from", message.from.as_str()),
        ("to", message.to.as_str()),
        ("subject", message.subject.as_str()),
        ("text", message.text.as_str()),
    ]
}

impl MailgunClient {
    pub fn new(config: &MailgunConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            messages_url: messages_url(&config.api_base, &config.domain),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl MailProvider for MailgunClient {
    async fn send(&self, message: &OutgoingMessage) -> Result<ProviderReceipt, ProviderError> {
        tracing::debug!("Submitting message to {}", self.messages_url);

        let response = self
            .client
            .post(&self.messages_url)
            .basic_auth("api", Some(self.api_key.expose_secret()))
            .form(&form_fields(message))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Rejected { status, body });
        }

        let body: SendResponse = response.json().await?;
        tracing::debug!("Mailgun accepted message {}", body.id);

        Ok(ProviderReceipt {
            id: body.id,
            message: body.message,
        })
    }
}
