use std::sync::Arc;

use mail_integration::{EmailDelivery, ResendMailer};
use server_api::ContactContext;

use crate::config::Settings;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) contact: ContactContext,
}

impl AppState {
    pub(crate) fn from_settings(settings: &Settings) -> Self {
        let mailer = settings.resend_api_key.as_ref().map(|api_key| {
            Arc::new(ResendMailer::with_base_url(
                api_key.clone(),
                settings.resend_base_url.clone(),
            )) as Arc<dyn EmailDelivery>
        });
        let mut contact = ContactContext::new(mailer, settings.contact_email.clone());
        contact.sender = settings.contact_sender.clone();
        Self { contact }
    }
}
