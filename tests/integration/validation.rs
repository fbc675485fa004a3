use std::collections::HashMap;

use rstest::rstest;
use similar_asserts::assert_eq;
use smartagent_receiver::{
    monitors::{ConsulConfig, FilesystemsConfig, MonitorConfig, NagiosConfig, RedisConfig},
    receiver::{ConfigError, ReceiverError},
};

use crate::load;

#[rstest]
#[case::without_type(
    "without_type.yaml",
    "error reading receivers configuration for smartagent/withouttype: you must specify a \"type\" for a smartagent receiver"
)]
#[case::unknown_type(
    "unknown_type.yaml",
    "error reading receivers configuration for smartagent/unknowntype: no known monitor type \"notamonitor\""
)]
#[case::unexpected_tag(
    "unexpected_tag.yaml",
    "error reading receivers configuration for smartagent/unexpectedtag: failed creating Smart Agent Monitor custom config: field notasupportedtag not found in type redis.Config"
)]
#[case::invalid_endpoint(
    "invalid_endpoint.yaml",
    "error reading receivers configuration for smartagent/haproxy: cannot determine port via Endpoint: parsing \"notaport\": invalid digit found in string"
)]
#[case::unsupported_endpoint(
    "unsupported_endpoint.yaml",
    "error reading receivers configuration for smartagent/nagios: unable to set monitor Host field using Endpoint-derived value of localhost: no field Host of type string detected"
)]
#[case::nonarray_dimension_clients(
    "invalid_nonarray_dimension_clients.yaml",
    "error reading receivers configuration for smartagent/haproxy: dimensionClients must be an array of compatible exporter names"
)]
#[case::float_dimension_clients(
    "invalid_float_dimension_clients.yaml",
    "error reading receivers configuration for smartagent/haproxy: dimensionClients must be an array of compatible exporter names"
)]
fn binding_errors(#[case] file: &str, #[case] message: &str) {
    let error = load(file).unwrap_err();
    assert_eq!(error.to_string(), message);
}

#[test]
fn invalid_values_bind_but_fail_validation() {
    let receivers = load("invalid_config.yaml").unwrap();
    assert_eq!(receivers.len(), 2);

    let negative = receivers.get("smartagent/negativeintervalseconds").unwrap();
    let redis = negative.monitor_as::<RedisConfig>().unwrap();
    assert_eq!(redis.common.interval_seconds, Some(-234));
    let error = negative.validate().unwrap_err();
    assert!(matches!(
        error,
        ConfigError::IntervalMustBePositive { value: -234 }
    ));
    assert_eq!(
        error.to_string(),
        "intervalSeconds must be greater than 0s (-234 provided)"
    );

    let missing = receivers.get("smartagent/missingrequired").unwrap();
    assert_eq!(
        missing.monitor_as::<ConsulConfig>().unwrap(),
        &ConsulConfig {
            common: MonitorConfig {
                monitor_type: "collectd/consul".to_owned(),
                ..Default::default()
            },
            port: 5309,
            ..Default::default()
        }
    );
    let consul = missing.monitor_as::<ConsulConfig>().unwrap();
    assert_eq!(consul.telemetry_host, "0.0.0.0");
    assert_eq!(consul.telemetry_port, 8125);
    assert_eq!(
        missing.validate().unwrap_err().to_string(),
        "Validation error in field 'Config.host': host is a required field (got '')"
    );

    // The first failing receiver, in document order, is reported.
    let error = receivers.validate().unwrap_err();
    assert!(matches!(error, ReceiverError::Validate { .. }));
    assert_eq!(error.name(), "smartagent/negativeintervalseconds");
}

#[test]
fn unsupported_endpoint_leaves_required_fields_untouched() {
    let error = load("unsupported_endpoint.yaml").unwrap_err().to_string();
    assert!(error.contains("no field Host of type string"));

    let receivers = smartagent_receiver::config::load_from_str(
        "receivers:\n  smartagent/nagios:\n    type: nagios\n    command: check\n    service: svc\n",
        smartagent_receiver::config::Format::Yaml,
        &smartagent_receiver::monitors::MonitorCatalog::builtin(),
    )
    .unwrap();
    let nagios = receivers.get("smartagent/nagios").unwrap();
    assert_eq!(nagios.monitor_as::<NagiosConfig>().unwrap().timeout, 9);
    nagios.validate().unwrap();
}

#[test]
fn filtering_config_compiles() {
    let receivers = load("filtering_config.yaml").unwrap();
    let receiver = receivers.get("smartagent/filesystems").unwrap();
    receiver.validate().unwrap();

    let filesystems = receiver.monitor_as::<FilesystemsConfig>().unwrap();
    assert_eq!(filesystems.common.datapoints_to_exclude.len(), 1);
    assert_eq!(
        filesystems
            .common
            .extra_groups
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>(),
        vec!["inodes"]
    );
    assert!(filesystems
        .common
        .extra_metrics
        .contains("percent_bytes.reserved"));

    let filter = receiver.datapoint_filter().unwrap();
    let dims = |mountpoint: &str| HashMap::from([("mountpoint".to_owned(), mountpoint.to_owned())]);

    assert!(filter.excludes("df_inodes.free", &dims("/")));
    assert!(filter.excludes("df_inodes.used", &dims("/hostfs/boot")));
    assert!(!filter.excludes("df_inodes.free", &dims("/hostfs/var/lib/cni")));
    assert!(!filter.excludes("df_complex.free", &dims("/")));
    assert!(!filter.excludes("df_inodes.free", &HashMap::new()));
}

#[test]
fn invalid_filter_fails_validation() {
    let receivers = load("invalid_filtering_config.yaml").unwrap();
    let receiver = receivers.get("smartagent/filesystems").unwrap();

    let error = receiver.validate().unwrap_err();
    assert!(matches!(error, ConfigError::FilterSyntax { .. }));
    assert_eq!(error.code(), "filter_syntax");
    assert!(error.to_string().starts_with("datapointsToExclude[0]: "));
    assert!(error.to_string().contains("./[0-"));
}
