//! Typed monitor configurations and the catalog that maps monitor types to them.

pub mod catalog;
pub mod schema;

mod common;
mod consul;
mod filesystems;
mod hadoop;
mod haproxy;
mod nagios;
mod ntpq;
mod prometheus_exporter;
mod redis;

use indexmap::{IndexMap, IndexSet};
use monitor_filter::MetricFilterSpec;

pub use self::{
    catalog::{CatalogError, MonitorCatalog},
    common::{HttpConfig, PythonConfig},
    consul::ConsulConfig,
    filesystems::FilesystemsConfig,
    hadoop::HadoopConfig,
    haproxy::HaproxyConfig,
    nagios::NagiosConfig,
    ntpq::NtpqConfig,
    prometheus_exporter::PrometheusExporterConfig,
    redis::{ListLength, RedisConfig},
    schema::{
        BoxedMonitorConfig, ConfigDuration, EndpointTargets, Field, FieldInfo, FieldValue,
        GenericFieldMap, MissingField, MonitorSchema, MonitorSettings, SchemaDescriptor,
    },
};
use self::schema::field;

/// Collection interval used when `intervalSeconds` is not set.
pub const DEFAULT_INTERVAL_SECONDS: i64 = 10;

/// Settings shared by every monitor type.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MonitorConfig {
    /// The monitor type this configuration was bound for.
    pub monitor_type: String,
    pub interval_seconds: Option<i64>,
    pub datapoints_to_exclude: Vec<MetricFilterSpec>,
    pub extra_groups: IndexSet<String>,
    pub extra_metrics: IndexSet<String>,
    pub extra_dimensions: IndexMap<String, String>,
    pub dimension_transformations: IndexMap<String, String>,
    pub disable_host_dimensions: bool,
    pub disable_endpoint_dimensions: bool,
}

impl MonitorConfig {
    pub fn fields() -> Vec<Field<Self>> {
        vec![
            field!("intervalSeconds" => interval_seconds),
            field!("datapointsToExclude" => datapoints_to_exclude),
            field!("extraGroups" => extra_groups),
            field!("extraMetrics" => extra_metrics),
            field!("extraDimensions" => extra_dimensions),
            field!("dimensionTransformations" => dimension_transformations),
            field!("disableHostDimensions" => disable_host_dimensions),
            field!("disableEndpointDimensions" => disable_endpoint_dimensions),
        ]
    }

    /// The collection interval in seconds, falling back to the default when unset.
    pub fn effective_interval_seconds(&self) -> i64 {
        self.interval_seconds.unwrap_or(DEFAULT_INTERVAL_SECONDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_falls_back_to_default() {
        let mut config = MonitorConfig::default();
        assert_eq!(config.effective_interval_seconds(), 10);
        config.interval_seconds = Some(60);
        assert_eq!(config.effective_interval_seconds(), 60);
    }

    #[test]
    fn common_fields_are_never_required() {
        assert!(MonitorConfig::fields().iter().all(|field| !field.is_required()));
    }
}
