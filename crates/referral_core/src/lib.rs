//! Referral form core: validation rules, deep-link construction, and the
//! three-step form controller driven by tokio timers.

pub mod clipboard;
pub mod config;
pub mod controller;
pub mod deferred;
pub mod error;
pub mod link;
pub mod validation;

pub use clipboard::{ClipboardSink, DeniedClipboard, MemoryClipboard};
pub use config::{load_settings, ReferralSettings};
pub use controller::{FormController, FormEvent, GenerateOutcome};
pub use error::FormError;
pub use link::{build_referral_link, contact_link, referral_message};
pub use validation::{
    check_name, check_phone, clean_phone, trim_name, validate_name, validate_phone,
};
