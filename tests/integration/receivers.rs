use similar_asserts::assert_eq;
use smartagent_receiver::{
    monitors::{
        ConfigDuration, HadoopConfig, HaproxyConfig, HttpConfig, MonitorConfig, NtpqConfig,
        PrometheusExporterConfig, RedisConfig,
    },
    receiver::ReceiverConfig,
};

use crate::load;

fn receiver(name: &str, monitor: impl smartagent_receiver::monitors::MonitorSettings + 'static) -> ReceiverConfig {
    ReceiverConfig {
        type_val: "smartagent".to_owned(),
        name_val: name.to_owned(),
        endpoint: None,
        dimension_clients: Vec::new(),
        monitor: Box::new(monitor),
    }
}

fn common(monitor_type: &str, interval_seconds: i64) -> MonitorConfig {
    MonitorConfig {
        monitor_type: monitor_type.to_owned(),
        interval_seconds: Some(interval_seconds),
        ..Default::default()
    }
}

#[test]
fn loads_every_receiver() {
    let receivers = load("config.yaml").unwrap();
    assert_eq!(receivers.len(), 5);

    let haproxy = receivers.get("smartagent/haproxy").unwrap();
    assert_eq!(
        haproxy,
        &ReceiverConfig {
            dimension_clients: vec!["nop/one".to_owned(), "nop/two".to_owned()],
            ..receiver(
                "smartagent/haproxy",
                HaproxyConfig {
                    common: common("haproxy", 123),
                    username: "SomeUser".to_owned(),
                    password: "secret".to_owned(),
                    ..Default::default()
                }
            )
        }
    );
    let bound = haproxy.monitor_as::<HaproxyConfig>().unwrap();
    assert_eq!(bound.path, "stats?stats;csv");
    assert!(bound.ssl_verify);
    assert_eq!(bound.timeout, ConfigDuration::from_secs(5));
    haproxy.validate().unwrap();

    let redis = receivers.get("smartagent/redis").unwrap();
    assert_eq!(
        redis,
        &receiver(
            "smartagent/redis",
            RedisConfig {
                common: common("collectd/redis", 234),
                host: "localhost".to_owned(),
                port: 6379,
                ..Default::default()
            }
        )
    );
    redis.validate().unwrap();

    let hadoop = receivers.get("smartagent/hadoop").unwrap();
    assert_eq!(
        hadoop,
        &receiver(
            "smartagent/hadoop",
            HadoopConfig {
                common: common("collectd/hadoop", 345),
                host: "localhost".to_owned(),
                port: 8088,
                ..Default::default()
            }
        )
    );
    hadoop.validate().unwrap();

    let etcd = receivers.get("smartagent/etcd").unwrap();
    assert_eq!(
        etcd,
        &receiver(
            "smartagent/etcd",
            PrometheusExporterConfig {
                common: common("etcd", 456),
                http: HttpConfig {
                    http_timeout: ConfigDuration::from_secs(10),
                    ..Default::default()
                },
                host: "localhost".to_owned(),
                port: 5309,
                metric_path: "/metrics".to_owned(),
                ..Default::default()
            }
        )
    );
    etcd.validate().unwrap();

    let ntpq = receivers.get("smartagent/ntpq").unwrap();
    assert_eq!(
        ntpq,
        &receiver(
            "smartagent/ntpq",
            NtpqConfig {
                common: common("telegraf/ntpq", 567),
                dns_lookup: Some(true),
            }
        )
    );
    ntpq.validate().unwrap();

    receivers.validate().unwrap();
}

#[test]
fn endpoints_fill_unset_host_and_port() {
    let receivers = load("endpoints_config.yaml").unwrap();
    assert_eq!(receivers.len(), 4);

    let haproxy = receivers.get("smartagent/haproxy").unwrap();
    assert_eq!(haproxy.endpoint.as_deref(), Some("haproxyhost:2345"));
    let bound = haproxy.monitor_as::<HaproxyConfig>().unwrap();
    assert_eq!((bound.host.as_str(), bound.port), ("haproxyhost", 2345));
    assert_eq!(bound.username, "SomeUser");

    let redis = receivers
        .get("smartagent/redis")
        .and_then(|receiver| receiver.monitor_as::<RedisConfig>())
        .unwrap();
    assert_eq!((redis.host.as_str(), redis.port), ("redishost", 6379));

    // Explicit values win over the endpoint.
    let hadoop = receivers
        .get("smartagent/hadoop")
        .and_then(|receiver| receiver.monitor_as::<HadoopConfig>())
        .unwrap();
    assert_eq!((hadoop.host.as_str(), hadoop.port), ("localhost", 8088));

    // Only the unset port comes from the endpoint.
    let etcd = receivers
        .get("smartagent/etcd")
        .and_then(|receiver| receiver.monitor_as::<PrometheusExporterConfig>())
        .unwrap();
    assert_eq!((etcd.host.as_str(), etcd.port), ("localhost", 5555));

    receivers.validate().unwrap();
}

#[test]
fn yaml_anchors_are_merged() {
    let receivers = load("anchors_config.yaml").unwrap();
    assert_eq!(
        receivers.names().collect::<Vec<_>>(),
        vec!["smartagent/redis-primary", "smartagent/redis-replica"]
    );

    let primary = receivers
        .get("smartagent/redis-primary")
        .and_then(|receiver| receiver.monitor_as::<RedisConfig>())
        .unwrap();
    assert_eq!(primary.host, "primary.redis");
    assert_eq!(primary.port, 6379);
    assert_eq!(primary.common.interval_seconds, Some(60));

    let replica = receivers
        .get("smartagent/redis-replica")
        .and_then(|receiver| receiver.monitor_as::<RedisConfig>())
        .unwrap();
    assert_eq!(replica.port, 6380);
}
