use std::time::Duration;

use eframe::egui;
use referral_core::{clipboard::SystemClipboard, trim_name, FormController};
use shared::domain::{Field, Step};
use tokio::runtime::Runtime;

use crate::controller::{
    events::{err_label, UiAction, UiError},
    orchestration::{dispatch_ui_action, ShellEffect},
};

const ERROR_RED: egui::Color32 = egui::Color32::from_rgb(220, 80, 80);
const OK_GREEN: egui::Color32 = egui::Color32::from_rgb(70, 170, 90);

#[derive(Debug, Clone)]
struct StatusBanner {
    label: &'static str,
    message: String,
}

pub struct ReferralApp {
    // Dropped before the runtime so pending timers are cancelled first.
    form: FormController<SystemClipboard>,
    status_banner: Option<StatusBanner>,
    _runtime: Runtime,
}

impl ReferralApp {
    pub fn new(form: FormController<SystemClipboard>, runtime: Runtime) -> Self {
        Self {
            form,
            status_banner: None,
            _runtime: runtime,
        }
    }

    fn apply_actions(&mut self, ctx: &egui::Context, actions: Vec<UiAction>) {
        for action in actions {
            match dispatch_ui_action(&mut self.form, action) {
                ShellEffect::None => {}
                ShellEffect::OpenUrl(url) => ctx.open_url(egui::OpenUrl::new_tab(url)),
                ShellEffect::ShowError(err) => self.show_error(err),
            }
        }
    }

    fn show_error(&mut self, err: UiError) {
        tracing::warn!(category = err_label(err.category()), "{}", err.message());
        self.status_banner = Some(StatusBanner {
            label: err_label(err.category()),
            message: err.message().to_string(),
        });
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        let Some(banner) = self.status_banner.clone() else {
            return;
        };
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.colored_label(ERROR_RED, egui::RichText::new(banner.label).strong());
                ui.label(&banner.message);
                if ui.button("Dismiss").clicked() {
                    self.status_banner = None;
                    actions.push(UiAction::DismissNotice);
                }
            });
        });
        ui.add_space(8.0);
    }

    fn show_progress(&self, ui: &mut egui::Ui) {
        let current = self.form.state().step;
        ui.horizontal(|ui| {
            for (index, step) in Step::ALL.into_iter().enumerate() {
                if index > 0 {
                    ui.label(egui::RichText::new("──").weak());
                }
                let text = egui::RichText::new(format!("{} {}", step.number(), step.label()));
                if current.is_reached(step) {
                    ui.label(text.strong());
                } else {
                    ui.label(text.weak());
                }
            }
        });
    }

    fn field_error(&self, ui: &mut egui::Ui, field: Field) {
        if let Some(err) = self.form.state().error_for(field) {
            ui.colored_label(ERROR_RED, err.to_string());
        }
    }

    fn show_details(&self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        let state = self.form.state();
        ui.weak("Provide your details to get a referral link");
        ui.add_space(6.0);

        ui.label(egui::RichText::new("Your Name").strong());
        let mut name = state.name.clone();
        let name_resp = ui.add(
            egui::TextEdit::singleline(&mut name)
                .id_salt("referral_name")
                .hint_text("Enter your full name")
                .desired_width(f32::INFINITY),
        );
        if name_resp.changed() {
            actions.push(UiAction::NameEdited(name));
        }
        self.field_error(ui, Field::Name);

        ui.add_space(6.0);
        ui.label(egui::RichText::new("Phone Number").strong());
        let mut phone = state.phone.clone();
        let phone_resp = ui.add(
            egui::TextEdit::singleline(&mut phone)
                .id_salt("referral_phone")
                .hint_text("+234 800 000 0000")
                .desired_width(f32::INFINITY),
        );
        if phone_resp.changed() {
            actions.push(UiAction::PhoneEdited(phone));
        }
        ui.horizontal(|ui| {
            ui.small("Include country code (e.g. +234 for Nigeria) optional");
            if self.form.phone_looks_valid() {
                ui.colored_label(OK_GREEN, "✔");
            }
        });
        self.field_error(ui, Field::Phone);

        ui.add_space(10.0);
        let enter_pressed = ui.input(|i| i.key_pressed(egui::Key::Enter));
        let submit = (name_resp.lost_focus() || phone_resp.lost_focus()) && enter_pressed;
        if ui.button("Continue to Review").clicked() || submit {
            actions.push(UiAction::ContinueToReview);
        }
    }

    fn show_review(&self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        let state = self.form.state();
        ui.weak("Review your information and create your unique link");
        ui.add_space(6.0);

        egui::Grid::new("referral_review")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                ui.label("Name");
                ui.label(egui::RichText::new(trim_name(&state.name)).strong());
                ui.end_row();
                ui.label("Phone");
                ui.label(egui::RichText::new(&state.phone).strong());
                ui.end_row();
            });

        ui.add_space(6.0);
        ui.label(egui::RichText::new("Message").strong());
        let preview = egui::RichText::new(self.form.message_preview()).italics();
        ui.add(egui::Label::new(preview).wrap());

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!state.is_generating, egui::Button::new("Edit Details"))
                .clicked()
            {
                actions.push(UiAction::EditDetails);
            }
            let label = if state.is_generating {
                "Generating..."
            } else {
                "Generate Link"
            };
            if ui
                .add_enabled(!state.is_generating, egui::Button::new(label))
                .clicked()
            {
                actions.push(UiAction::GenerateLink);
            }
            if state.is_generating {
                ui.spinner();
            }
        });
    }

    fn show_share(&self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        let state = self.form.state();
        ui.weak("Share this link to connect referrals directly to our WhatsApp");
        ui.add_space(6.0);

        if let Some(link) = state.generated_link.as_deref() {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.add(egui::Label::new(egui::RichText::new(link).monospace()).wrap());
            });
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            let copy_label = if state.copied { "Copied!" } else { "Copy" };
            if ui.button(copy_label).clicked() {
                actions.push(UiAction::CopyLink);
            }
            if ui.button("Open in WhatsApp").clicked() {
                actions.push(UiAction::OpenLink);
            }
        });

        ui.add_space(8.0);
        if ui.button("Create New Link").clicked() {
            actions.push(UiAction::CreateNewLink);
        }
    }

    fn show_form(&mut self, ctx: &egui::Context) {
        let mut actions = Vec::new();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(format!(
                    "{} Referral Program",
                    self.form.settings().business_name
                ));
                ui.weak("Get your referral links that show us the referral was from you.");
            });
            ui.add_space(12.0);

            self.show_status_banner(ui, &mut actions);

            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_width(ui.available_width());
                self.show_progress(ui);
                ui.separator();
                match self.form.state().step {
                    Step::Details => self.show_details(ui, &mut actions),
                    Step::Review => self.show_review(ui, &mut actions),
                    Step::Share => self.show_share(ui, &mut actions),
                }
            });

            ui.add_space(12.0);
            if ui.link("Chat with us on WhatsApp").clicked() {
                actions.push(UiAction::OpenContact);
            }
        });

        self.apply_actions(ctx, actions);
    }
}

impl eframe::App for ReferralApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.form.process_events();
        if self.form.state().copied {
            self.status_banner = None;
        }

        self.show_form(ctx);

        // Timer results land without input; keep polling for them.
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
