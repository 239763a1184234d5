use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

pub const DEFAULT_SETTINGS_FILE: &str = "referral.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReferralSettings {
    pub business_name: String,
    pub business_number: String,
    pub debounce_ms: u64,
    pub generation_delay_ms: u64,
    pub copy_feedback_ms: u64,
}

impl Default for ReferralSettings {
    fn default() -> Self {
        Self {
            business_name: "Codivora".into(),
            business_number: "+2349059456585".into(),
            debounce_ms: 500,
            generation_delay_ms: 800,
            copy_feedback_ms: 2000,
        }
    }
}

impl ReferralSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn generation_delay(&self) -> Duration {
        Duration::from_millis(self.generation_delay_ms)
    }

    pub fn copy_feedback(&self) -> Duration {
        Duration::from_millis(self.copy_feedback_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.business_name.trim().is_empty() {
            bail!("business_name must not be empty");
        }
        let number = self
            .business_number
            .strip_prefix('+')
            .unwrap_or(&self.business_number);
        if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
            bail!(
                "business_number must be digits with an optional leading '+', got '{}'",
                self.business_number
            );
        }
        Ok(())
    }

    /// Overlays `REFERRAL_*` / `APP__*` variables resolved through `lookup`.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        for key in ["REFERRAL_BUSINESS_NAME", "APP__BUSINESS_NAME"] {
            if let Some(v) = lookup(key) {
                self.business_name = v;
            }
        }
        for key in ["REFERRAL_BUSINESS_NUMBER", "APP__BUSINESS_NUMBER"] {
            if let Some(v) = lookup(key) {
                self.business_number = v;
            }
        }
        let timings: [(&str, &mut u64); 3] = [
            ("APP__DEBOUNCE_MS", &mut self.debounce_ms),
            ("APP__GENERATION_DELAY_MS", &mut self.generation_delay_ms),
            ("APP__COPY_FEEDBACK_MS", &mut self.copy_feedback_ms),
        ];
        for (key, slot) in timings {
            if let Some(v) = lookup(key) {
                match v.parse::<u64>() {
                    Ok(parsed) => *slot = parsed,
                    Err(_) => {
                        tracing::warn!(key, value = %v, "ignoring non-numeric timing override")
                    }
                }
            }
        }
    }
}

pub fn parse_settings(raw: &str) -> Result<ReferralSettings> {
    toml::from_str(raw).context("failed to parse referral settings")
}

/// Loads settings from `path` (required to exist when given) or from
/// `referral.toml` in the working directory when present, then applies
/// environment overrides.
pub fn load_settings(path: Option<&Path>) -> Result<ReferralSettings> {
    let (path, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_SETTINGS_FILE), false),
    };

    let mut settings = match fs::read_to_string(&path) {
        Ok(raw) => parse_settings(&raw)
            .with_context(|| format!("invalid settings file '{}'", path.display()))?,
        Err(err) if !required && err.kind() == std::io::ErrorKind::NotFound => {
            ReferralSettings::default()
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read settings file '{}'", path.display()))
        }
    };

    settings.apply_env_overrides(|key| std::env::var(key).ok());
    settings.validate()?;
    tracing::debug!(?settings, "loaded referral settings");
    Ok(settings)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
