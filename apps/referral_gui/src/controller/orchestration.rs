//! Applies UI actions to the form controller.

use referral_core::{ClipboardSink, FormController, GenerateOutcome};

use crate::controller::events::{UiAction, UiError};

/// What the shell must do after an action that the form cannot handle itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEffect {
    None,
    OpenUrl(String),
    ShowError(UiError),
}

pub fn dispatch_ui_action<C: ClipboardSink>(
    form: &mut FormController<C>,
    action: UiAction,
) -> ShellEffect {
    let action_name = match &action {
        UiAction::NameEdited(_) => "name_edited",
        UiAction::PhoneEdited(_) => "phone_edited",
        UiAction::ContinueToReview => "continue_to_review",
        UiAction::EditDetails => "edit_details",
        UiAction::GenerateLink => "generate_link",
        UiAction::CopyLink => "copy_link",
        UiAction::OpenLink => "open_link",
        UiAction::OpenContact => "open_contact",
        UiAction::CreateNewLink => "create_new_link",
        UiAction::DismissNotice => "dismiss_notice",
    };
    tracing::trace!(action = action_name, "dispatching ui action");

    match action {
        UiAction::NameEdited(value) => form.on_name_input(value),
        UiAction::PhoneEdited(value) => form.on_phone_input(value),
        UiAction::ContinueToReview => {
            form.advance_from_details();
        }
        UiAction::EditDetails => form.edit_details(),
        UiAction::GenerateLink => {
            if form.generate_link() == GenerateOutcome::AlreadyGenerating {
                tracing::debug!("ignoring generate while a link is being created");
            }
        }
        UiAction::CopyLink => {
            if let Err(err) = form.copy_link() {
                let err = match form.state().notice.clone() {
                    Some(notice) => UiError::from_message(notice),
                    None => UiError::from(err),
                };
                return ShellEffect::ShowError(err);
            }
        }
        UiAction::OpenLink => {
            if let Some(link) = form.state().generated_link.clone() {
                return ShellEffect::OpenUrl(link);
            }
        }
        UiAction::OpenContact => {
            return ShellEffect::OpenUrl(referral_core::contact_link(form.settings()));
        }
        UiAction::CreateNewLink => form.reset_all(),
        UiAction::DismissNotice => form.dismiss_notice(),
    }
    ShellEffect::None
}
