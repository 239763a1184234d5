use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_dir(label: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = env::temp_dir().join(format!("referral_core_{label}_{suffix}"));
    fs::create_dir_all(&dir).expect("temp dir");
    dir
}

#[test]
fn defaults_match_published_contact_and_timings() {
    let settings = ReferralSettings::default();
    assert_eq!(settings.business_name, "Codivora");
    assert_eq!(settings.business_number, "+2349059456585");
    assert_eq!(settings.debounce(), Duration::from_millis(500));
    assert_eq!(settings.generation_delay(), Duration::from_millis(800));
    assert_eq!(settings.copy_feedback(), Duration::from_millis(2000));
    settings.validate().expect("defaults are valid");
}

#[test]
fn partial_file_keeps_remaining_defaults() {
    let settings = parse_settings("business_name = \"Acme\"\ndebounce_ms = 250\n").expect("parse");
    assert_eq!(settings.business_name, "Acme");
    assert_eq!(settings.debounce_ms, 250);
    assert_eq!(settings.business_number, "+2349059456585");
    assert_eq!(settings.generation_delay_ms, 800);
}

#[test]
fn env_overrides_win_and_bad_numbers_are_ignored() {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("REFERRAL_BUSINESS_NAME", "Acme"),
        ("APP__BUSINESS_NUMBER", "+15550001111"),
        ("APP__GENERATION_DELAY_MS", "0"),
        ("APP__DEBOUNCE_MS", "soon"),
    ]);
    let mut settings = ReferralSettings::default();
    settings.apply_env_overrides(|key| vars.get(key).map(|v| v.to_string()));

    assert_eq!(settings.business_name, "Acme");
    assert_eq!(settings.business_number, "+15550001111");
    assert_eq!(settings.generation_delay_ms, 0);
    assert_eq!(settings.debounce_ms, 500);
}

#[test]
fn rejects_malformed_business_number() {
    let settings = ReferralSettings {
        business_number: "+234-905".into(),
        ..Default::default()
    };
    assert!(settings.validate().is_err());

    let settings = ReferralSettings {
        business_number: "+".into(),
        ..Default::default()
    };
    assert!(settings.validate().is_err());
}

#[test]
fn loads_explicit_settings_file() {
    let dir = temp_dir("load");
    let path = dir.join("referral.toml");
    fs::write(&path, "business_number = \"15550001111\"\ncopy_feedback_ms = 1500\n")
        .expect("write settings");

    let settings = load_settings(Some(path.as_path())).expect("load");
    assert_eq!(settings.business_number, "15550001111");
    assert_eq!(settings.copy_feedback_ms, 1500);

    fs::remove_dir_all(dir).expect("cleanup");
}

#[test]
fn missing_explicit_settings_file_is_an_error() {
    let dir = temp_dir("missing");
    let err = load_settings(Some(dir.join("absent.toml").as_path())).expect_err("should fail");
    assert!(err.to_string().contains("failed to read settings file"));
    fs::remove_dir_all(dir).expect("cleanup");
}

#[test]
fn malformed_settings_file_reports_path() {
    let dir = temp_dir("malformed");
    let path = dir.join("referral.toml");
    fs::write(&path, "debounce_ms = \"fast\"").expect("write settings");

    let err = load_settings(Some(path.as_path())).expect_err("should fail");
    assert!(err.to_string().contains("invalid settings file"));

    fs::remove_dir_all(dir).expect("cleanup");
}
