//! Contact form rules, shared by the browser-side form and the server so the
//! two can never drift apart.

use std::{collections::BTreeMap, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{domain::FormField, protocol::ContactRequest};

pub const NAME_MIN_CHARS: usize = 2;
pub const MESSAGE_MIN_CHARS: usize = 10;

/// Permissive `local@domain.tld` shape.
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email regex"));

/// Field-scoped validation messages, iterated in focus priority order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<FormField, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn get(&self, field: FormField) -> Option<&[String]> {
        self.0
            .get(&field)
            .filter(|messages| !messages.is_empty())
            .map(Vec::as_slice)
    }

    pub fn first_message(&self, field: FormField) -> Option<&str> {
        self.get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.get(field).is_some()
    }

    /// Removes one field's messages; returns whether anything was removed.
    pub fn clear(&mut self, field: FormField) -> bool {
        self.0.remove(&field).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }

    pub fn first_invalid(&self) -> Option<FormField> {
        FormField::ALL
            .into_iter()
            .find(|field| self.contains(*field))
    }

    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.0
            .iter()
            .filter(|(_, messages)| !messages.is_empty())
            .map(|(field, _)| *field)
    }

    /// Per field, `authoritative` replaces whatever `self` holds.
    pub fn override_with(&mut self, authoritative: &FieldErrors) {
        for (field, messages) in &authoritative.0 {
            if !messages.is_empty() {
                self.0.insert(*field, messages.clone());
            }
        }
    }
}

/// Trimmed input that passed every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidContact {
    pub name: String,
    pub email: String,
    pub message: String,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

pub fn validate_contact(request: &ContactRequest) -> Result<ValidContact, FieldErrors> {
    let name = request.name.trim();
    let email = request.email.trim();
    let message = request.message.trim();
    let mut errors = FieldErrors::new();

    if name.is_empty() {
        errors.insert(FormField::Name, "Name is required");
    } else if name.chars().count() < NAME_MIN_CHARS {
        errors.insert(FormField::Name, "Name must be at least 2 characters");
    }

    if email.is_empty() {
        errors.insert(FormField::Email, "Email is required");
    } else if !is_valid_email(email) {
        errors.insert(FormField::Email, "Please enter a valid email");
    }

    if message.is_empty() {
        errors.insert(FormField::Message, "Message is required");
    } else if message.chars().count() < MESSAGE_MIN_CHARS {
        errors.insert(FormField::Message, "Message must be at least 10 characters");
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidContact {
        name: name.to_string(),
        email: email.to_string(),
        message: message.to_string(),
    })
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
