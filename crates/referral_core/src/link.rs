use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::{
    config::ReferralSettings,
    validation::{clean_phone, trim_name},
};

const WHATSAPP_BASE_URL: &str = "https://wa.me";

/// Bytes left unescaped by a browser's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn referral_message(business_name: &str, name: &str, phone: &str) -> String {
    format!(
        "Hello {business_name}! I was referred by {} ({}). I'm interested in learning more about your services.",
        trim_name(name),
        clean_phone(phone)
    )
}

/// Deep link that opens a chat with the business, pre-filled with the
/// referral message. Deterministic for a given name/phone pair.
pub fn build_referral_link(settings: &ReferralSettings, name: &str, phone: &str) -> String {
    let message = referral_message(&settings.business_name, name, phone);
    format!(
        "{}?text={}",
        contact_link(settings),
        utf8_percent_encode(&message, URI_COMPONENT)
    )
}

pub fn contact_link(settings: &ReferralSettings) -> String {
    format!("{WHATSAPP_BASE_URL}/{}", settings.business_number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use percent_encoding::percent_decode_str;

    fn decoded_text(link: &str) -> String {
        let (_, encoded) = link.split_once("?text=").expect("text query");
        percent_decode_str(encoded)
            .decode_utf8()
            .expect("utf-8")
            .into_owned()
    }

    #[test]
    fn message_uses_trimmed_name_and_digits_only_phone() {
        assert_eq!(
            referral_message("Codivora", "  Jo ", "+234 801-234-5678"),
            "Hello Codivora! I was referred by Jo (2348012345678). I'm interested in learning more about your services."
        );
    }

    #[test]
    fn message_trims_byte_order_marks_around_name() {
        assert_eq!(
            referral_message("Codivora", "\u{FEFF}Jo\u{FEFF}", "08012345678"),
            "Hello Codivora! I was referred by Jo (08012345678). I'm interested in learning more about your services."
        );
    }

    #[test]
    fn link_targets_business_number_and_round_trips_message() {
        let settings = ReferralSettings::default();
        let link = build_referral_link(&settings, "Jo", "08012345678");

        assert!(link.starts_with("https://wa.me/+2349059456585?text="));
        assert_eq!(
            decoded_text(&link),
            "Hello Codivora! I was referred by Jo (08012345678). I'm interested in learning more about your services."
        );
    }

    #[test]
    fn encoding_matches_encode_uri_component() {
        let settings = ReferralSettings::default();
        let link = build_referral_link(&settings, "Jo", "08012345678");
        let (_, encoded) = link.split_once("?text=").expect("text query");

        assert!(encoded.starts_with("Hello%20Codivora!%20I%20was%20referred%20by%20Jo%20(08012345678).%20I'm%20"));
        assert!(!encoded.contains(' '));
        assert!(!encoded.contains('+'));
    }

    #[test]
    fn non_ascii_names_are_utf8_percent_encoded() {
        let settings = ReferralSettings::default();
        let link = build_referral_link(&settings, "Zoë", "08012345678");
        assert!(link.contains("Zo%C3%AB"));
        assert!(decoded_text(&link).contains("referred by Zoë (08012345678)"));
    }

    #[test]
    fn link_is_stable_for_the_same_inputs() {
        let settings = ReferralSettings::default();
        assert_eq!(
            build_referral_link(&settings, "Jo", "0801 234 5678"),
            build_referral_link(&settings, "Jo", "0801 234 5678")
        );
    }

    #[test]
    fn contact_link_has_no_prefilled_text() {
        assert_eq!(
            contact_link(&ReferralSettings::default()),
            "https://wa.me/+2349059456585"
        );
    }
}
