//! Three-step referral form: Details -> Review -> Share.
//!
//! The controller owns the [`ReferralRequest`] and is the only thing that
//! mutates it. Timers (field debounce, simulated link generation, copy
//! feedback) run as tokio tasks that never touch state; they post a
//! [`FormEvent`] back to the controller, and the owner applies queued events
//! on its own thread through [`FormController::process_events`] or
//! [`FormController::next_event`].

use shared::{
    domain::{Field, ReferralRequest, Step},
    error::ValidationError,
};
use tokio::{runtime::Handle, sync::mpsc};
use tracing::{debug, info, warn};

use crate::{
    clipboard::ClipboardSink,
    config::ReferralSettings,
    deferred::{spawn_after, DeferredTask},
    error::FormError,
    link::{build_referral_link, referral_message},
    validation::{check_name, check_phone, validate_name, validate_phone},
};

/// Result of a deferred task, applied by the controller when drained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// A field's debounce window elapsed without a newer keystroke.
    ValidationSettled {
        field: Field,
        ticket: u64,
        value: String,
    },
    /// The simulated link-creation delay elapsed.
    LinkReady { epoch: u64, link: String },
    /// The "copied" indicator should be cleared.
    CopyFeedbackExpired { ticket: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// Inputs were valid; the link arrives after the generation delay.
    Scheduled,
    /// A generation is already in flight; nothing new was scheduled.
    AlreadyGenerating,
    /// Inputs failed validation; the form is back on Details.
    Rejected,
}

#[derive(Debug, Default)]
struct FieldCheck {
    timer: DeferredTask,
    ticket: u64,
}

pub struct FormController<C: ClipboardSink> {
    state: ReferralRequest,
    settings: ReferralSettings,
    clipboard: C,
    runtime: Handle,
    events_tx: mpsc::UnboundedSender<FormEvent>,
    events_rx: mpsc::UnboundedReceiver<FormEvent>,
    name_check: FieldCheck,
    phone_check: FieldCheck,
    // Bumped on reset so in-flight generations from before it are dropped.
    epoch: u64,
    copy_ticket: u64,
}

impl<C: ClipboardSink> FormController<C> {
    pub fn new(settings: ReferralSettings, clipboard: C, runtime: Handle) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            state: ReferralRequest::default(),
            settings,
            clipboard,
            runtime,
            events_tx,
            events_rx,
            name_check: FieldCheck::default(),
            phone_check: FieldCheck::default(),
            epoch: 0,
            copy_ticket: 0,
        }
    }

    pub fn state(&self) -> &ReferralRequest {
        &self.state
    }

    pub fn settings(&self) -> &ReferralSettings {
        &self.settings
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    /// Message that would be sent for the current inputs.
    pub fn message_preview(&self) -> String {
        referral_message(
            &self.settings.business_name,
            &self.state.name,
            &self.state.phone,
        )
    }

    pub fn phone_looks_valid(&self) -> bool {
        !self.state.phone.is_empty() && validate_phone(&self.state.phone)
    }

    pub fn has_pending_check(&self, field: Field) -> bool {
        match field {
            Field::Name => self.name_check.timer.is_pending(),
            Field::Phone => self.phone_check.timer.is_pending(),
        }
    }

    pub fn on_name_input(&mut self, value: impl Into<String>) {
        self.on_input(Field::Name, value.into());
    }

    pub fn on_phone_input(&mut self, value: impl Into<String>) {
        self.on_input(Field::Phone, value.into());
    }

    fn on_input(&mut self, field: Field, value: String) {
        let valid_now = match field {
            Field::Name => validate_name(&value),
            Field::Phone => validate_phone(&value),
        };
        if valid_now {
            self.state.set_error(field, None);
        }
        match field {
            Field::Name => self.state.name = value.clone(),
            Field::Phone => self.state.phone = value.clone(),
        }

        let runtime = self.runtime.clone();
        let delay = self.settings.debounce();
        let tx = self.events_tx.clone();
        let check = self.check_mut(field);
        check.ticket += 1;
        let ticket = check.ticket;
        check.timer.schedule(&runtime, delay, move || {
            let _ = tx.send(FormEvent::ValidationSettled {
                field,
                ticket,
                value,
            });
        });
        debug!(?field, ticket, "scheduled debounced validation");
    }

    /// Validates both fields now. Returns true and moves to Review when both
    /// pass; otherwise records the errors and stays on Details.
    pub fn advance_from_details(&mut self) -> bool {
        if !self.validate_now() {
            debug!("details incomplete; staying on details");
            return false;
        }
        if self.state.step == Step::Details {
            self.state.step = Step::Review;
            info!("moved to review");
        }
        self.state.step == Step::Review
    }

    pub fn generate_link(&mut self) -> GenerateOutcome {
        if !self.validate_now() {
            self.leave_share();
            self.state.step = Step::Details;
            info!("link generation rejected; back to details");
            return GenerateOutcome::Rejected;
        }
        if self.state.is_generating {
            debug!("link generation already in flight");
            return GenerateOutcome::AlreadyGenerating;
        }

        self.state.is_generating = true;
        let settings = self.settings.clone();
        let name = self.state.name.clone();
        let phone = self.state.phone.clone();
        let epoch = self.epoch;
        let tx = self.events_tx.clone();
        spawn_after(&self.runtime, self.settings.generation_delay(), move || {
            let link = build_referral_link(&settings, &name, &phone);
            let _ = tx.send(FormEvent::LinkReady { epoch, link });
        });
        debug!(epoch, "scheduled link generation");
        GenerateOutcome::Scheduled
    }

    pub fn copy_link(&mut self) -> Result<(), FormError> {
        let link = self
            .state
            .generated_link
            .clone()
            .ok_or(FormError::NoLink)?;

        if let Err(err) = self.clipboard.write_text(&link) {
            warn!(error = %err, "clipboard write failed");
            self.state.copied = false;
            self.state.notice = Some(format!("Could not copy the link: {err}"));
            return Err(FormError::Clipboard(err.to_string()));
        }

        self.state.notice = None;
        self.state.copied = true;
        self.copy_ticket += 1;
        let ticket = self.copy_ticket;
        let tx = self.events_tx.clone();
        spawn_after(&self.runtime, self.settings.copy_feedback(), move || {
            let _ = tx.send(FormEvent::CopyFeedbackExpired { ticket });
        });
        info!("referral link copied to clipboard");
        Ok(())
    }

    pub fn dismiss_notice(&mut self) {
        self.state.notice = None;
    }

    pub fn edit_details(&mut self) {
        self.leave_share();
        self.state.step = Step::Details;
        debug!("editing details");
    }

    pub fn reset_all(&mut self) {
        self.cancel_checks();
        self.epoch += 1;
        self.copy_ticket += 1;
        self.state = ReferralRequest::default();
        info!("form reset");
    }

    /// Cancels both pending field checks. Called on teardown.
    pub fn shutdown(&mut self) {
        self.cancel_checks();
    }

    /// Applies every queued event without waiting and returns the ones that
    /// changed state. Stale events are dropped.
    pub fn process_events(&mut self) -> Vec<FormEvent> {
        let mut applied = Vec::new();
        while let Ok(event) = self.events_rx.try_recv() {
            if self.apply(&event) {
                applied.push(event);
            }
        }
        applied
    }

    /// Waits for the next event that changes state and applies it. Only
    /// returns once some deferred task has fired, so callers should have one
    /// outstanding.
    pub async fn next_event(&mut self) -> Option<FormEvent> {
        while let Some(event) = self.events_rx.recv().await {
            if self.apply(&event) {
                return Some(event);
            }
        }
        None
    }

    fn apply(&mut self, event: &FormEvent) -> bool {
        match event {
            FormEvent::ValidationSettled {
                field,
                ticket,
                value,
            } => {
                if *ticket != self.check_mut(*field).ticket {
                    return false;
                }
                let error = if value.is_empty() {
                    None
                } else {
                    check_field(*field, value).err()
                };
                debug!(?field, ticket, valid = error.is_none(), "validation settled");
                self.state.set_error(*field, error);
                true
            }
            FormEvent::LinkReady { epoch, link } => {
                if *epoch != self.epoch {
                    return false;
                }
                self.state.is_generating = false;
                // Details never jumps straight to Share.
                if self.state.step == Step::Details {
                    debug!("discarding link that finished after leaving review");
                    return true;
                }
                self.state.generated_link = Some(link.clone());
                self.state.step = Step::Share;
                info!(%link, "referral link ready");
                true
            }
            FormEvent::CopyFeedbackExpired { ticket } => {
                if *ticket != self.copy_ticket {
                    return false;
                }
                self.state.copied = false;
                true
            }
        }
    }

    fn validate_now(&mut self) -> bool {
        self.state.name_error = check_name(&self.state.name).err();
        self.state.phone_error = check_phone(&self.state.phone).err();
        !self.state.has_errors()
    }

    // The link only exists on Share.
    fn leave_share(&mut self) {
        self.state.generated_link = None;
        self.state.copied = false;
    }

    fn cancel_checks(&mut self) {
        for check in [&mut self.name_check, &mut self.phone_check] {
            check.timer.cancel();
            check.ticket += 1;
        }
    }

    fn check_mut(&mut self, field: Field) -> &mut FieldCheck {
        match field {
            Field::Name => &mut self.name_check,
            Field::Phone => &mut self.phone_check,
        }
    }
}

impl<C: ClipboardSink> Drop for FormController<C> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn check_field(field: Field, value: &str) -> Result<(), ValidationError> {
    match field {
        Field::Name => check_name(value),
        Field::Phone => check_phone(value),
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
