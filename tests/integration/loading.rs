use std::fs;

use similar_asserts::assert_eq;
use smartagent_receiver::{
    config::{load_from_paths, ConfigPath, Format, LoadError},
    monitors::{ConfigDuration, ConsulConfig, MonitorCatalog, PrometheusExporterConfig},
};

use crate::data_path;

#[test]
fn files_of_different_formats_are_merged() {
    let receivers = load_from_paths(
        &[
            ConfigPath::File(data_path("config.yaml"), None),
            ConfigPath::File(data_path("extra_config.toml"), Some(Format::Toml)),
        ],
        &MonitorCatalog::builtin(),
    )
    .unwrap();

    assert_eq!(
        receivers.names().collect::<Vec<_>>(),
        vec![
            "smartagent/haproxy",
            "smartagent/redis",
            "smartagent/hadoop",
            "smartagent/etcd",
            "smartagent/ntpq",
            "smartagent/consul",
            "smartagent/prometheus",
        ]
    );

    let consul = receivers
        .get("smartagent/consul")
        .and_then(|receiver| receiver.monitor_as::<ConsulConfig>())
        .unwrap();
    assert_eq!((consul.host.as_str(), consul.port), ("consul.local", 8500));
    assert!(consul.telemetry_server);

    let prometheus = receivers
        .get("smartagent/prometheus")
        .and_then(|receiver| receiver.monitor_as::<PrometheusExporterConfig>())
        .unwrap();
    assert_eq!(
        (prometheus.host.as_str(), prometheus.port),
        ("exporter.local", 9100)
    );
    assert_eq!(prometheus.http.http_timeout, ConfigDuration::from_secs(30));
    assert!(prometheus.http.use_https);

    receivers.validate().unwrap();
}

#[test]
fn directories_are_loaded_in_name_order() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("20-redis.yaml"),
        "receivers:\n  smartagent/redis:\n    type: collectd/redis\n    endpoint: cache:6379\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("10-ntpq.json"),
        r#"{"receivers": {"smartagent/ntpq": {"type": "telegraf/ntpq", "dnsLookup": false}}}"#,
    )
    .unwrap();
    fs::write(dir.path().join("README.md"), "not a configuration file").unwrap();

    let receivers = load_from_paths(
        &[ConfigPath::Dir(dir.path().to_path_buf())],
        &MonitorCatalog::builtin(),
    )
    .unwrap();

    assert_eq!(
        receivers.names().collect::<Vec<_>>(),
        vec!["smartagent/ntpq", "smartagent/redis"]
    );
    receivers.validate().unwrap();
}

#[test]
fn duplicate_names_across_files_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let body = "receivers:\n  smartagent/ntpq:\n    type: telegraf/ntpq\n";
    let first = dir.path().join("first.yaml");
    let second = dir.path().join("second.yaml");
    fs::write(&first, body).unwrap();
    fs::write(&second, body).unwrap();

    let error = load_from_paths(
        &[ConfigPath::File(first, None), ConfigPath::File(second, None)],
        &MonitorCatalog::builtin(),
    )
    .unwrap_err();

    assert!(matches!(error, LoadError::DuplicateReceiver { .. }));
    assert_eq!(
        error.to_string(),
        "duplicate receiver name found: smartagent/ntpq"
    );
}

#[test]
fn other_receiver_families_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mixed.yaml");
    fs::write(
        &path,
        "receivers:\n  otlp:\n    protocols: {}\n  smartagent:\n    type: telegraf/ntpq\n",
    )
    .unwrap();

    let receivers =
        load_from_paths(&[ConfigPath::File(path, None)], &MonitorCatalog::builtin()).unwrap();
    assert_eq!(receivers.names().collect::<Vec<_>>(), vec!["smartagent"]);
}

#[test]
fn missing_file_is_a_read_error() {
    let error = load_from_paths(
        &[ConfigPath::File(data_path("does_not_exist.yaml"), None)],
        &MonitorCatalog::builtin(),
    )
    .unwrap_err();
    assert!(matches!(error, LoadError::Read { .. }));
}
