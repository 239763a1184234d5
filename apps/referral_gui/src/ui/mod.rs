//! UI layer: app shell and step panels.

pub mod app;

pub use app::ReferralApp;
