//! UI actions and error modeling for the referral window.

use referral_core::FormError;
use shared::error::ErrorCode;

/// Something the user did this frame. Collected while rendering and applied
/// afterwards so panels never hold a mutable borrow of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    NameEdited(String),
    PhoneEdited(String),
    ContinueToReview,
    EditDetails,
    GenerateLink,
    CopyLink,
    OpenLink,
    OpenContact,
    CreateNewLink,
    DismissNotice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Validation,
    Clipboard,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    category: UiErrorCategory,
    message: String,
}

impl UiError {
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_ascii_lowercase();
        let category = if lower.contains("clipboard") || lower.contains("copy") {
            UiErrorCategory::Clipboard
        } else if lower.contains("name must")
            || lower.contains("phone number")
            || lower.contains("invalid")
        {
            UiErrorCategory::Validation
        } else {
            UiErrorCategory::Unknown
        };
        Self { category, message }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<FormError> for UiError {
    fn from(value: FormError) -> Self {
        let category = match value.code() {
            ErrorCode::Validation => UiErrorCategory::Validation,
            ErrorCode::Clipboard => UiErrorCategory::Clipboard,
        };
        Self {
            category,
            message: value.to_string(),
        }
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Clipboard => "Clipboard",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_clipboard_failures() {
        let err = UiError::from(FormError::Clipboard("permission denied".into()));
        assert_eq!(err.category(), UiErrorCategory::Clipboard);
        assert!(err.message().contains("permission denied"));

        let err = UiError::from_message("Could not copy the link: clipboard busy");
        assert_eq!(err.category(), UiErrorCategory::Clipboard);
    }

    #[test]
    fn classifies_validation_and_unknown_messages() {
        assert_eq!(
            UiError::from_message("Please enter a valid phone number").category(),
            UiErrorCategory::Validation
        );
        assert_eq!(
            UiError::from(FormError::NoLink).category(),
            UiErrorCategory::Validation
        );
        assert_eq!(
            UiError::from_message("renderer lost").category(),
            UiErrorCategory::Unknown
        );
        assert_eq!(err_label(UiErrorCategory::Unknown), "Unexpected");
    }
}
