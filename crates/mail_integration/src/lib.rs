use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub const RESEND_API_URL: &str = "https://api.resend.com";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryReceipt {
    pub id: Option<String>,
    pub raw: Value,
}

impl DeliveryReceipt {
    pub fn from_response(raw: Value) -> Self {
        Self {
            id: extract_delivery_id(&raw),
            raw,
        }
    }
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("email provider unreachable: {0}")]
    Transport(String),
    #[error("email provider rejected the message ({status}): {message}")]
    Provider { status: u16, message: String },
    #[error("email provider returned an unreadable response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait EmailDelivery: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<DeliveryReceipt, MailError>;
}

/// Pulls a delivery identifier out of an untyped provider response.
///
/// `id` wins over `messageId`; anything that is not an object carrying a
/// string under one of those keys yields `None`.
pub fn extract_delivery_id(response: &Value) -> Option<String> {
    let object = response.as_object()?;
    ["id", "messageId"]
        .iter()
        .find_map(|key| object.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

/// Resend HTTP API client.
#[derive(Debug, Clone)]
pub struct ResendMailer {
    http: Client,
    api_key: String,
    base_url: String,
}

impl ResendMailer {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, RESEND_API_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn emails_url(&self) -> String {
        format!("{}/emails", self.base_url)
    }
}

#[async_trait]
impl EmailDelivery for ResendMailer {
    async fn send(&self, message: &EmailMessage) -> Result<DeliveryReceipt, MailError> {
        let response = self
            .http
            .post(self.emails_url())
            .bearer_auth(&self.api_key)
            .json(message)
            .send()
            .await
            .map_err(|err| MailError::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| MailError::InvalidResponse(err.to_string()))?;
        let raw = parse_body(&body);

        if !status.is_success() {
            let message = provider_message(&raw, status, &body);
            warn!(status = status.as_u16(), %message, "email provider rejected message");
            return Err(MailError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let receipt = DeliveryReceipt::from_response(raw);
        debug!(id = ?receipt.id, "email provider accepted message");
        Ok(receipt)
    }
}

fn parse_body(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

fn provider_message(raw: &Value, status: StatusCode, body: &str) -> String {
    raw.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .unwrap_or_else(|| status.to_string())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
