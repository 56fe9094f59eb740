use std::path::PathBuf;

use super::*;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("sv-reward-{}-{name}", std::process::id()))
}

#[test]
fn default_config_validates() {
    RewardConfig::default()
        .validate()
        .expect("defaults should be consistent");
}

#[test]
fn partial_json_falls_back_to_section_defaults() {
    let raw = r#"
    {
      "format": { "allow_trailing_whitespace": false },
      "stuffing": { "separator_threshold": 10 }
    }
    "#;

    let config: RewardConfig = serde_json::from_str(raw).expect("partial config should parse");
    assert!(!config.format.allow_trailing_whitespace);
    assert_eq!(config.format.penalty, -3.0);
    assert_eq!(config.stuffing.separator_threshold, 10);
    assert_eq!(config.stuffing.penalty, -2.0);
    assert_eq!(config.coverage, CoverageConfig::default());
    config.validate().expect("partial config should validate");
}

#[test]
fn validate_rejects_inverted_length_limits() {
    let mut config = RewardConfig::default();
    config.length.hard_slope = 1.0;
    config.length.hard_offset = 0.0;

    let error = config.validate().expect_err("hard_max below soft_max must fail");
    assert!(error.to_string().contains("hard_max > soft_max > min_tokens"));
}

#[test]
fn validate_rejects_non_finite_constants() {
    let mut config = RewardConfig::default();
    config.grounding.per_bad_penalty = f64::NAN;

    let error = config.validate().expect_err("NaN constant must fail");
    assert!(error.to_string().contains("grounding.per_bad_penalty"));
}

#[test]
fn validate_rejects_empty_clip_range_and_unknown_version() {
    let mut config = RewardConfig::default();
    config.incremental.clip_min = 2.0;
    config.incremental.clip_max = 1.0;
    assert!(config.validate().is_err());

    let config = RewardConfig {
        config_version: 99,
        ..RewardConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn load_reads_json_and_reports_invalid_files() {
    let good = temp_path("good.json");
    fs::write(&good, r#"{ "weights": { "format": 2.5 } }"#).expect("write temp config");
    let config = RewardConfig::load(&good).expect("valid file should load");
    assert_eq!(config.weights.format, 2.5);
    assert_eq!(config.weights.for_scorer("length"), 1.0);
    assert_eq!(config.weights.for_scorer("unknown"), 0.0);

    let bad = temp_path("bad.json");
    fs::write(&bad, r#"{ "coverage": { "saturation": 0.0 } }"#).expect("write temp config");
    let error = RewardConfig::load(&bad).expect_err("zero saturation must fail");
    assert!(format!("{error:#}").contains("coverage.saturation"));

    let _ = fs::remove_file(good);
    let _ = fs::remove_file(bad);
}

#[test]
fn load_or_default_without_path_uses_defaults() {
    let config = RewardConfig::load_or_default(None).expect("defaults load");
    assert_eq!(config, RewardConfig::default());
}

#[test]
fn config_round_trips_through_json() {
    let config = RewardConfig::default();
    let raw = serde_json::to_string_pretty(&config).expect("serialize config");
    let parsed: RewardConfig = serde_json::from_str(&raw).expect("parse config");
    assert_eq!(parsed, config);
}
