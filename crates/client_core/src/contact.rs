//! Contact form state: local values, client-side validation, the submission
//! round trip and the post-submit display timing.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::FormField,
    error::{ErrorCode, DELIVERY_FAILURE_MESSAGE},
    protocol::{ContactReply, ContactRequest, ContactStatus},
    validation::{validate_contact, FieldErrors},
};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use url::Url;

use crate::{clock::SharedClock, timers::TimerSet};

/// How long a success stays on screen before the form clears itself.
pub const SUCCESS_DISPLAY_DELAY: Duration = Duration::from_millis(3_000);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ContactFormState {
    #[default]
    Idle,
    Submitting,
    Succeeded {
        message: String,
        id: Option<String>,
    },
    Failed {
        message: String,
        field_errors: FieldErrors,
    },
}

impl ContactFormState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    fn server_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Failed { field_errors, .. } => Some(field_errors),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactReceipt {
    pub message: String,
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SubmitFailure {
    pub message: String,
    pub field_errors: FieldErrors,
}

impl SubmitFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field_errors: FieldErrors::new(),
        }
    }

    pub fn delivery(detail: impl std::fmt::Display) -> Self {
        Self::new(format!("{DELIVERY_FAILURE_MESSAGE} {detail}"))
    }
}

#[async_trait]
pub trait ContactSubmitter: Send + Sync {
    /// Refreshes whatever `preflight` consults. Never fails; an unknown
    /// state leaves `preflight` permissive.
    async fn prepare(&self) {}

    /// Checked before the form enters `Submitting`. A failure here is
    /// reported as `Failed` without ever dispatching.
    fn preflight(&self) -> Result<(), SubmitFailure> {
        Ok(())
    }

    async fn submit(&self, request: &ContactRequest) -> Result<ContactReceipt, SubmitFailure>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormTimer {
    ResetAfterSuccess,
}

pub struct ContactForm {
    clock: SharedClock,
    values: ContactRequest,
    client_errors: FieldErrors,
    state: watch::Sender<ContactFormState>,
    focus: Option<FormField>,
    timers: TimerSet<FormTimer>,
    torn_down: bool,
}

impl ContactForm {
    pub fn new(clock: SharedClock) -> Self {
        let (state, _) = watch::channel(ContactFormState::Idle);
        Self {
            clock,
            values: ContactRequest::default(),
            client_errors: FieldErrors::new(),
            state,
            focus: None,
            timers: TimerSet::new(),
            torn_down: false,
        }
    }

    pub fn values(&self) -> &ContactRequest {
        &self.values
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.values.name,
            FormField::Email => &self.values.email,
            FormField::Message => &self.values.message,
        }
    }

    pub fn state(&self) -> ContactFormState {
        self.state.borrow().clone()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<ContactFormState> {
        self.state.subscribe()
    }

    pub fn client_errors(&self) -> &FieldErrors {
        &self.client_errors
    }

    /// Field that should hold keyboard focus, if the form asked for one.
    pub fn focus(&self) -> Option<FormField> {
        self.focus
    }

    /// Server messages win over client ones for the same field.
    pub fn displayed_error(&self, field: FormField) -> Option<String> {
        let state = self.state.borrow();
        let message = state
            .server_errors()
            .and_then(|errors| errors.first_message(field))
            .or_else(|| self.client_errors.first_message(field))
            .map(str::to_string);
        message
    }

    /// Updates one value and drops that field's error only. A failure
    /// returns to `Idle` once its last errored field is edited, or, when it
    /// named no field, once the focused field is.
    pub fn edit(&mut self, field: FormField, value: impl Into<String>) {
        if self.torn_down {
            return;
        }
        let value = value.into();
        let slot = match field {
            FormField::Name => &mut self.values.name,
            FormField::Email => &mut self.values.email,
            FormField::Message => &mut self.values.message,
        };
        if *slot == value {
            return;
        }
        *slot = value;
        self.client_errors.clear(field);
        let focused = self.focus == Some(field);
        self.state.send_if_modified(|state| {
            let ContactFormState::Failed { field_errors, .. } = state else {
                return false;
            };
            let had_errors = !field_errors.is_empty();
            let cleared = field_errors.clear(field);
            if (cleared && field_errors.is_empty()) || (!had_errors && focused) {
                *state = ContactFormState::Idle;
                return true;
            }
            cleared
        });
    }

    /// Validates locally and, when the collaborator is ready, moves to
    /// `Submitting` and returns the request to dispatch.
    pub fn begin_submit(&mut self, submitter: &dyn ContactSubmitter) -> Option<ContactRequest> {
        if self.torn_down {
            return None;
        }
        if matches!(
            *self.state.borrow(),
            ContactFormState::Submitting | ContactFormState::Succeeded { .. }
        ) {
            debug!("contact submission ignored while a previous one is pending");
            return None;
        }

        let contact = match validate_contact(&self.values) {
            Ok(contact) => contact,
            Err(errors) => {
                self.focus = errors.first_invalid();
                debug!(
                    fields = ?errors.fields().collect::<Vec<_>>(),
                    "contact form failed local validation"
                );
                self.client_errors = errors;
                return None;
            }
        };
        self.client_errors = FieldErrors::new();

        if let Err(failure) = submitter.preflight() {
            warn!(message = %failure.message, "contact submission is not configured");
            self.fail(failure);
            return None;
        }

        self.focus = None;
        self.state.send_replace(ContactFormState::Submitting);
        Some(ContactRequest {
            name: contact.name,
            email: contact.email,
            message: contact.message,
        })
    }

    /// Applies the dispatch outcome. Outcomes arriving when nothing is in
    /// flight are dropped.
    pub fn complete_submit(&mut self, outcome: Result<ContactReceipt, SubmitFailure>) {
        if self.torn_down || !self.state.borrow().is_submitting() {
            return;
        }
        match outcome {
            Ok(receipt) => {
                info!(id = ?receipt.id, "contact message accepted");
                let deadline = self.clock.now() + SUCCESS_DISPLAY_DELAY;
                self.timers.schedule(FormTimer::ResetAfterSuccess, deadline);
                self.state.send_replace(ContactFormState::Succeeded {
                    message: receipt.message,
                    id: receipt.id,
                });
            }
            Err(failure) => {
                warn!(message = %failure.message, "contact submission failed");
                self.fail(failure);
            }
        }
    }

    /// Runs the whole round trip for callers that can await in place.
    pub async fn submit(&mut self, submitter: &dyn ContactSubmitter) -> ContactFormState {
        submitter.prepare().await;
        if let Some(request) = self.begin_submit(submitter) {
            let outcome = submitter.submit(&request).await;
            self.complete_submit(outcome);
        }
        self.state()
    }

    /// Returns whether the success display ended and the form was cleared.
    pub fn tick(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        let now = self.clock.now();
        let mut reset = false;
        while let Some((FormTimer::ResetAfterSuccess, _)) = self.timers.pop_due(now) {
            self.values = ContactRequest::default();
            self.client_errors = FieldErrors::new();
            self.focus = None;
            self.state.send_replace(ContactFormState::Idle);
            reset = true;
        }
        reset
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        if self.torn_down {
            return None;
        }
        self.timers.next_deadline()
    }

    pub fn teardown(&mut self) {
        self.timers.clear();
        self.torn_down = true;
    }

    fn fail(&mut self, failure: SubmitFailure) {
        self.focus = Some(
            failure
                .field_errors
                .first_invalid()
                .unwrap_or(FormField::Name),
        );
        self.state.send_replace(ContactFormState::Failed {
            message: failure.message,
            field_errors: failure.field_errors,
        });
    }
}

#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("invalid server url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("server url cannot carry a path: {0}")]
    NotABase(String),
}

/// Posts submissions to the portfolio server's `/contact` route and remembers
/// whether the server said it cannot deliver.
#[derive(Debug, Clone)]
pub struct HttpContactSubmitter {
    http: Client,
    endpoint: Url,
    status_endpoint: Url,
    /// Last reason the server gave for being unable to deliver.
    unconfigured: Arc<watch::Sender<Option<String>>>,
}

impl HttpContactSubmitter {
    pub fn new(server_url: &str) -> Result<Self, EndpointError> {
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_client(http: Client, server_url: &str) -> Result<Self, EndpointError> {
        let base = Url::parse(server_url)?;
        let route = |segments: &[&str]| {
            let mut url = base.clone();
            url.path_segments_mut()
                .map_err(|_| EndpointError::NotABase(server_url.to_string()))?
                .pop_if_empty()
                .extend(segments);
            Ok::<_, EndpointError>(url)
        };
        let (unconfigured, _) = watch::channel(None);
        Ok(Self {
            http,
            endpoint: route(&["contact"])?,
            status_endpoint: route(&["contact", "status"])?,
            unconfigured: Arc::new(unconfigured),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn status_endpoint(&self) -> &Url {
        &self.status_endpoint
    }

    /// Why the server last said it cannot deliver, if it did.
    pub fn unconfigured_reason(&self) -> Option<String> {
        self.unconfigured.borrow().clone()
    }

    async fn fetch_status(&self) -> reqwest::Result<ContactStatus> {
        self.http
            .get(self.status_endpoint.clone())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

#[async_trait]
impl ContactSubmitter for HttpContactSubmitter {
    async fn prepare(&self) {
        match self.fetch_status().await {
            Ok(status) if status.configured => {
                self.unconfigured.send_replace(None);
            }
            Ok(status) => {
                let reason = status
                    .message
                    .unwrap_or_else(|| "Contact delivery is not configured.".to_string());
                debug!(%reason, "server cannot deliver contact messages");
                self.unconfigured.send_replace(Some(reason));
            }
            Err(err) => {
                warn!(error = %err, endpoint = %self.status_endpoint, "contact status unavailable");
            }
        }
    }

    fn preflight(&self) -> Result<(), SubmitFailure> {
        match self.unconfigured_reason() {
            Some(reason) => Err(SubmitFailure::new(reason)),
            None => Ok(()),
        }
    }

    async fn submit(&self, request: &ContactRequest) -> Result<ContactReceipt, SubmitFailure> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(SubmitFailure::delivery)?;
        let status = response.status();
        let reply: ContactReply = response.json().await.map_err(|err| {
            warn!(%status, error = %err, "unreadable contact reply");
            SubmitFailure::delivery(err)
        })?;

        if reply.code == Some(ErrorCode::NotConfigured) {
            self.unconfigured.send_replace(Some(reply.message.clone()));
        }
        if reply.success {
            return Ok(ContactReceipt {
                message: reply.message,
                id: reply.id,
            });
        }
        debug!(%status, code = ?reply.code, "contact submission rejected by server");
        Err(SubmitFailure {
            message: reply.message,
            field_errors: reply.errors.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
#[path = "tests/contact_tests.rs"]
mod tests;
