use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use eframe::egui;
use referral_core::{clipboard::SystemClipboard, load_settings, FormController};
use tracing_subscriber::EnvFilter;

use crate::ui::ReferralApp;

#[derive(Parser, Debug)]
#[command(about = "Create a WhatsApp referral link")]
struct Args {
    /// Settings file; defaults to ./referral.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let settings = load_settings(args.config.as_deref()).context("failed to load settings")?;
    let runtime = backend_bridge::runtime::launch()?;
    let form = FormController::new(settings, SystemClipboard::new(), runtime.handle().clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Referral Link Generator")
            .with_inner_size([560.0, 640.0])
            .with_min_inner_size([420.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Referral Link Generator",
        options,
        Box::new(move |_cc| Ok(Box::new(ReferralApp::new(form, runtime)))),
    )
    .map_err(|err| anyhow!("referral window failed: {err}"))
}
