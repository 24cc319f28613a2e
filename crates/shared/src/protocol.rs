use serde::{Deserialize, Serialize};

use crate::{
    error::{ApiError, ErrorCode},
    validation::FieldErrors,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Body returned by `POST /contact`, for both outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactReply {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl ContactReply {
    pub fn delivered(message: impl Into<String>, id: Option<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            id,
            code: None,
            errors: None,
        }
    }
}

impl From<ApiError> for ContactReply {
    fn from(value: ApiError) -> Self {
        Self {
            success: false,
            message: value.message,
            id: None,
            code: Some(value.code),
            errors: value.field_errors,
        }
    }
}

/// Body returned by `GET /contact/status`: whether a submission could be
/// delivered right now, and why not when it could not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactStatus {
    pub configured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ContactStatus {
    pub fn ready() -> Self {
        Self {
            configured: true,
            message: None,
        }
    }

    pub fn not_configured(message: impl Into<String>) -> Self {
        Self {
            configured: false,
            message: Some(message.into()),
        }
    }
}
