use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Field;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    Clipboard,
}

/// Inline validation failure for one form field. `Display` is the message
/// shown under the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationError {
    #[error("Name must be at least 2 characters")]
    NameTooShort,
    #[error("Please enter a valid phone number")]
    PhoneTooShort,
}

impl ValidationError {
    pub fn field(self) -> Field {
        match self {
            Self::NameTooShort => Field::Name,
            Self::PhoneTooShort => Field::Phone,
        }
    }

    pub fn code(self) -> ErrorCode {
        ErrorCode::Validation
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    pub field: Field,
    pub code: ErrorCode,
    pub message: String,
}

impl From<ValidationError> for FieldError {
    fn from(value: ValidationError) -> Self {
        Self {
            field: value.field(),
            code: value.code(),
            message: value.to_string(),
        }
    }
}
