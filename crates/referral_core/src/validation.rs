use shared::error::ValidationError;

const MIN_NAME_UNITS: usize = 2;
const MIN_PHONE_DIGITS: usize = 10;

/// Digits-only form of a phone number as typed.
pub fn clean_phone(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// Whitespace as stripped by a browser's `String.prototype.trim`: Unicode
/// `White_Space` minus U+0085, plus the U+FEFF byte-order mark.
fn is_trim_whitespace(c: char) -> bool {
    c == '\u{FEFF}' || (c.is_whitespace() && c != '\u{0085}')
}

/// Name with surrounding whitespace removed, the way the form displays it.
pub fn trim_name(name: &str) -> &str {
    name.trim_matches(is_trim_whitespace)
}

/// Length is counted in UTF-16 code units, matching the web form.
pub fn validate_name(name: &str) -> bool {
    trim_name(name).encode_utf16().count() >= MIN_NAME_UNITS
}

pub fn validate_phone(phone: &str) -> bool {
    phone.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
}

pub fn check_name(name: &str) -> Result<(), ValidationError> {
    if validate_name(name) {
        Ok(())
    } else {
        Err(ValidationError::NameTooShort)
    }
}

pub fn check_phone(phone: &str) -> Result<(), ValidationError> {
    if validate_phone(phone) {
        Ok(())
    } else {
        Err(ValidationError::PhoneTooShort)
    }
}
