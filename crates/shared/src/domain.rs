use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Phone,
}

/// Position in the three-step referral flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    #[default]
    Details,
    Review,
    Share,
}

impl Step {
    pub const ALL: [Step; 3] = [Step::Details, Step::Review, Step::Share];

    pub fn number(self) -> u8 {
        match self {
            Self::Details => 1,
            Self::Review => 2,
            Self::Share => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Details => "Details",
            Self::Review => "Generate",
            Self::Share => "Share",
        }
    }

    /// True once the flow has reached or passed `other`.
    pub fn is_reached(self, other: Step) -> bool {
        self.number() >= other.number()
    }
}

/// The single live form entity. Mutated only by the form controller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferralRequest {
    pub name: String,
    pub phone: String,
    pub step: Step,
    pub generated_link: Option<String>,
    pub name_error: Option<ValidationError>,
    pub phone_error: Option<ValidationError>,
    pub is_generating: bool,
    pub copied: bool,
    pub notice: Option<String>,
}

impl ReferralRequest {
    pub fn error_for(&self, field: Field) -> Option<ValidationError> {
        match field {
            Field::Name => self.name_error,
            Field::Phone => self.phone_error,
        }
    }

    pub fn set_error(&mut self, field: Field, error: Option<ValidationError>) {
        match field {
            Field::Name => self.name_error = error,
            Field::Phone => self.phone_error = error,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.name_error.is_some() || self.phone_error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_are_numbered_and_ordered() {
        assert_eq!(Step::ALL.map(Step::number), [1, 2, 3]);
        assert_eq!(Step::Review.label(), "Generate");
        assert!(Step::Share.is_reached(Step::Review));
        assert!(Step::Review.is_reached(Step::Review));
        assert!(!Step::Details.is_reached(Step::Review));
    }

    #[test]
    fn default_request_is_empty_details() {
        let request = ReferralRequest::default();
        assert_eq!(request.step, Step::Details);
        assert!(request.name.is_empty());
        assert!(request.generated_link.is_none());
        assert!(!request.has_errors());
        assert!(!request.is_generating);
        assert!(!request.copied);
    }

    #[test]
    fn field_accessors_route_to_matching_slot() {
        let mut request = ReferralRequest {
            name: "Ada".into(),
            phone: "0801".into(),
            ..Default::default()
        };
        request.set_error(Field::Phone, Some(ValidationError::PhoneTooShort));
        assert_eq!(request.error_for(Field::Name), None);
        assert_eq!(
            request.error_for(Field::Phone),
            Some(ValidationError::PhoneTooShort)
        );
    }
}
