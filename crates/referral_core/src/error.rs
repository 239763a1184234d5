use shared::error::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("no referral link has been generated yet")]
    NoLink,
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
}

impl FormError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NoLink => ErrorCode::Validation,
            Self::Clipboard(_) => ErrorCode::Clipboard,
        }
    }
}
