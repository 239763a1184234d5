use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use referral_core::{
    clipboard::SystemClipboard, load_settings, trim_name, ClipboardSink, FormController,
    GenerateOutcome, MemoryClipboard,
};
use serde::Serialize;
use shared::{
    domain::{ReferralRequest, Step},
    error::FieldError,
};
use tokio::runtime::Handle;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Print a WhatsApp referral link for a name and phone number")]
struct Args {
    #[arg(long)]
    name: String,
    #[arg(long)]
    phone: String,
    /// Copy the link to the system clipboard.
    #[arg(long)]
    copy: bool,
    /// Skip the simulated generation delay.
    #[arg(long)]
    no_delay: bool,
    /// Print a JSON summary instead of the bare link.
    #[arg(long)]
    json: bool,
    /// Settings file; defaults to ./referral.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct Summary<'a> {
    name: &'a str,
    phone: &'a str,
    message: String,
    link: Option<&'a str>,
    copied: bool,
    errors: Vec<FieldError>,
}

impl<'a> Summary<'a> {
    fn new<C: ClipboardSink>(form: &'a FormController<C>) -> Self {
        let state: &ReferralRequest = form.state();
        Self {
            name: trim_name(&state.name),
            phone: &state.phone,
            message: form.message_preview(),
            link: state.generated_link.as_deref(),
            copied: state.copied,
            errors: [state.name_error, state.phone_error]
                .into_iter()
                .flatten()
                .map(FieldError::from)
                .collect(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref()).context("failed to load settings")?;
    if args.no_delay {
        settings.generation_delay_ms = 0;
    }

    if args.copy {
        let form = FormController::new(settings, SystemClipboard::new(), Handle::current());
        run(form, &args).await
    } else {
        let form = FormController::new(settings, MemoryClipboard::default(), Handle::current());
        run(form, &args).await
    }
}

async fn run<C: ClipboardSink>(mut form: FormController<C>, args: &Args) -> Result<ExitCode> {
    form.on_name_input(args.name.as_str());
    form.on_phone_input(args.phone.as_str());

    if !form.advance_from_details() || form.generate_link() == GenerateOutcome::Rejected {
        report(&form, args.json)?;
        return Ok(ExitCode::FAILURE);
    }

    while form.state().step != Step::Share {
        if form.next_event().await.is_none() {
            anyhow::bail!("form event channel closed before the link was ready");
        }
    }

    if args.copy {
        if let Err(err) = form.copy_link() {
            tracing::warn!("{err}");
            eprintln!("warning: {err}");
        }
    }

    report(&form, args.json)?;
    form.shutdown();
    Ok(ExitCode::SUCCESS)
}

fn report<C: ClipboardSink>(form: &FormController<C>, json: bool) -> Result<()> {
    let summary = Summary::new(form);
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if summary.errors.is_empty() {
        if let Some(link) = summary.link {
            println!("{link}");
        }
        if summary.copied {
            eprintln!("Copied to clipboard.");
        }
    } else {
        for err in &summary.errors {
            eprintln!("{}", err.message);
        }
    }
    Ok(())
}
