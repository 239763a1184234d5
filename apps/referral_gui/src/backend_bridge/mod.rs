//! Background tokio runtime that drives the form's timers.

pub mod runtime;
