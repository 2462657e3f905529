use lrt_core::config::*;
use lrt_core::models::NegativeLatencyPolicy;
use std::fs;
use tempfile::NamedTempFile;

#[test]
fn test_default_config() {
    let config = AppConfig::default();
    assert!(config.validate().is_ok());

    // 默认值对应三台基线不同的Server
    assert_eq!(config.workers.len(), 3);
    assert_eq!(config.workers[0].id, "Server1");
    assert_eq!(config.workers[0].baseline_latency, 0.1);
    assert_eq!(config.dispatcher.window_size, 10);
    assert_eq!(config.dispatcher.jitter, 0.05);
    assert_eq!(config.dispatcher.strategy, "least_response_time");
    assert_eq!(config.dispatcher.negative_latency, NegativeLatencyPolicy::Accept);
    assert_eq!(config.simulation.requests, 50);
    assert!(config.simulation.seed.is_none());
}

#[test]
fn test_config_from_toml() {
    let toml_content = r#"
[simulation]
requests = 200
seed = 7
delay_enabled = false
delay_scale = 0.0

[dispatcher]
strategy = "round_robin"
window_size = 5
jitter = 0.0
negative_latency = "clamp_to_zero"

[[workers]]
id = "a"
baseline_latency = 0.3

[[workers]]
id = "b"
baseline_latency = 0.01
"#;

    let config = AppConfig::from_toml(toml_content).unwrap();
    assert_eq!(config.simulation.requests, 200);
    assert_eq!(config.simulation.seed, Some(7));
    assert!(!config.simulation.delay_enabled);
    assert_eq!(config.dispatcher.strategy, "round_robin");
    assert_eq!(config.dispatcher.window_size, 5);
    assert_eq!(
        config.dispatcher.negative_latency,
        NegativeLatencyPolicy::ClampToZero
    );
    assert_eq!(config.workers.len(), 2);
    assert_eq!(config.workers[1].id, "b");
    // 未配置的段落使用默认值
    assert_eq!(config.observability.log_level, "info");
}

#[test]
fn test_partial_toml_uses_defaults() {
    let config = AppConfig::from_toml("[simulation]\nrequests = 3\n").unwrap();
    assert_eq!(config.simulation.requests, 3);
    assert_eq!(config.workers.len(), 3);
    assert_eq!(config.dispatcher.window_size, 10);
}

#[test]
fn test_empty_worker_list_rejected() {
    let result = AppConfig::from_toml("workers = []\n");
    assert!(result.is_err());
}

#[test]
fn test_duplicate_worker_rejected() {
    let toml_content = r#"
[[workers]]
id = "dup"
baseline_latency = 0.1

[[workers]]
id = "dup"
baseline_latency = 0.2
"#;
    let err = AppConfig::from_toml(toml_content).unwrap_err();
    assert!(format!("{err:#}").contains("dup"));
}

#[test]
fn test_invalid_values_rejected() {
    let mut config = AppConfig::default();
    config.dispatcher.window_size = 0;
    assert!(config.validate().is_err());

    let mut config = AppConfig::default();
    config.dispatcher.strategy = "weighted".to_string();
    assert!(config.validate().is_err());

    let mut config = AppConfig::default();
    config.dispatcher.jitter = -0.1;
    assert!(config.validate().is_err());

    let mut config = AppConfig::default();
    config.workers[0].baseline_latency = -1.0;
    assert!(config.validate().is_err());

    let mut config = AppConfig::default();
    config.observability.log_format = "xml".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_serialization_roundtrip() {
    let config = AppConfig::default();
    let toml_str = config.to_toml().unwrap();
    let restored = AppConfig::from_toml(&toml_str).unwrap();
    assert_eq!(restored.workers, config.workers);
    assert_eq!(restored.dispatcher.window_size, config.dispatcher.window_size);
}

#[test]
fn test_load_from_file() {
    let toml_content = r#"
[simulation]
requests = 12

[[workers]]
id = "only"
baseline_latency = 0.5
"#;
    let temp_file = NamedTempFile::with_suffix(".toml").unwrap();
    fs::write(temp_file.path(), toml_content).unwrap();

    let config = AppConfig::load(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.simulation.requests, 12);
    assert_eq!(config.workers.len(), 1);
    assert_eq!(config.workers[0].id, "only");
}

#[test]
fn test_load_missing_file_fails() {
    let result = AppConfig::load(Some("/nonexistent/lrt.toml"));
    assert!(result.is_err());
}
