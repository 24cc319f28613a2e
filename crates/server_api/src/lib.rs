use std::sync::Arc;

use mail_integration::{EmailDelivery, EmailMessage};
use shared::{
    error::{ApiError, ErrorCode, DELIVERY_FAILURE_MESSAGE},
    protocol::{ContactReply, ContactRequest, ContactStatus},
    validation::{validate_contact, ValidContact},
};
use tracing::{error, info, warn};
use uuid::Uuid;

pub const DEFAULT_SENDER: &str = "no-reply@resend.dev";
pub const CONTACT_SUBJECT: &str = "New message from your portfolio";
pub const GENERIC_SUCCESS_MESSAGE: &str = "Thanks for your message! I'll get back to you soon.";

#[derive(Clone)]
pub struct ContactContext {
    /// `None` when no provider credential is configured.
    pub mailer: Option<Arc<dyn EmailDelivery>>,
    pub recipient: Option<String>,
    pub sender: String,
}

impl ContactContext {
    pub fn new(mailer: Option<Arc<dyn EmailDelivery>>, recipient: Option<String>) -> Self {
        Self {
            mailer,
            recipient,
            sender: DEFAULT_SENDER.to_string(),
        }
    }
}

pub fn contact_route() -> &'static str {
    "/contact"
}

pub fn contact_status_route() -> &'static str {
    "/contact/status"
}

/// Readiness as the contact form sees it before dispatching.
pub fn contact_status(ctx: &ContactContext) -> ContactStatus {
    match delivery_target(ctx) {
        Ok(_) => ContactStatus::ready(),
        Err(error) => ContactStatus::not_configured(error.message),
    }
}

/// Destination address and mailer, or the `NotConfigured` error naming the
/// first missing setting.
fn delivery_target(ctx: &ContactContext) -> Result<(&str, &Arc<dyn EmailDelivery>), ApiError> {
    let Some(recipient) = ctx.recipient.as_deref() else {
        return Err(ApiError::new(
            ErrorCode::NotConfigured,
            "CONTACT_EMAIL is not configured; set it in the server environment.",
        ));
    };
    let Some(mailer) = ctx.mailer.as_ref() else {
        return Err(ApiError::new(
            ErrorCode::NotConfigured,
            "RESEND_API_KEY is not configured; set it in the server environment.",
        ));
    };
    Ok((recipient, mailer))
}

pub async fn submit_contact(
    ctx: &ContactContext,
    request: ContactRequest,
) -> Result<ContactReply, ApiError> {
    let submission_id = Uuid::new_v4();

    let contact = validate_contact(&request).map_err(|field_errors| {
        info!(
            %submission_id,
            fields = ?field_errors.fields().collect::<Vec<_>>(),
            "contact submission failed validation"
        );
        ApiError::validation(field_errors)
    })?;

    let (recipient, mailer) = delivery_target(ctx).map_err(|error| {
        warn!(
            %submission_id,
            message = %error.message,
            "contact submission rejected: not configured"
        );
        error
    })?;

    let message = compose_message(&ctx.sender, recipient, &contact);
    info!(%submission_id, to = %recipient, "sending contact email");

    match mailer.send(&message).await {
        Ok(receipt) => {
            info!(%submission_id, id = ?receipt.id, "contact email delivered");
            let text = match receipt.id.as_deref() {
                Some(id) => format!("Message sent! id: {id}"),
                None => GENERIC_SUCCESS_MESSAGE.to_string(),
            };
            Ok(ContactReply::delivered(text, receipt.id))
        }
        Err(err) => {
            error!(%submission_id, error = %err, "contact email delivery failed");
            Err(ApiError::new(
                ErrorCode::Delivery,
                format!("{DELIVERY_FAILURE_MESSAGE} {err}"),
            ))
        }
    }
}

pub fn compose_message(sender: &str, recipient: &str, contact: &ValidContact) -> EmailMessage {
    EmailMessage {
        from: sender.to_string(),
        to: recipient.to_string(),
        subject: CONTACT_SUBJECT.to_string(),
        text: format!(
            "Name: {}\nEmail: {}\nMessage: {}",
            contact.name, contact.email, contact.message
        ),
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
