//! Controller layer: UI actions, error modeling, and dispatch into the form controller.

pub mod events;
pub mod orchestration;
