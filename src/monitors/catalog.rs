use indexmap::IndexMap;
use snafu::Snafu;

use super::{
    schema::{MonitorSchema, SchemaDescriptor},
    ConsulConfig, FilesystemsConfig, HadoopConfig, HaproxyConfig, NagiosConfig, NtpqConfig,
    PrometheusExporterConfig, RedisConfig,
};
use crate::receiver::ConfigError;

#[derive(Debug, PartialEq, Eq, Snafu)]
pub enum CatalogError {
    #[snafu(display("monitor type {:?} is already registered", monitor_type))]
    DuplicateMonitorType { monitor_type: String },
    #[snafu(display("monitor type must not be empty"))]
    EmptyMonitorType,
}

/// Registry of the monitor types this receiver can configure.
///
/// The catalog is an explicit value rather than process wide state: build one with
/// [`MonitorCatalog::builtin`] (or [`MonitorCatalog::new`] and [`MonitorCatalog::register`])
/// and pass it to the assembler.
#[derive(Clone, Debug, Default)]
pub struct MonitorCatalog {
    schemas: IndexMap<String, SchemaDescriptor>,
}

impl MonitorCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog holding every monitor type shipped with this crate.
    pub fn builtin() -> Self {
        let descriptors = [
            SchemaDescriptor::of::<HaproxyConfig>("haproxy"),
            SchemaDescriptor::of::<RedisConfig>("collectd/redis"),
            SchemaDescriptor::of::<HadoopConfig>("collectd/hadoop"),
            SchemaDescriptor::of::<ConsulConfig>("collectd/consul"),
            SchemaDescriptor::of::<PrometheusExporterConfig>("etcd"),
            SchemaDescriptor::of::<PrometheusExporterConfig>("prometheus-exporter"),
            SchemaDescriptor::of::<NtpqConfig>("telegraf/ntpq"),
            SchemaDescriptor::of::<FilesystemsConfig>("filesystems"),
            SchemaDescriptor::of::<NagiosConfig>("nagios"),
        ];

        Self {
            schemas: descriptors
                .into_iter()
                .map(|descriptor| (descriptor.monitor_type().to_owned(), descriptor))
                .collect(),
        }
    }

    /// Adds `monitor_type`, bound to the schema `T`.
    pub fn register<T: MonitorSchema>(
        &mut self,
        monitor_type: &str,
    ) -> Result<&mut Self, CatalogError> {
        if monitor_type.is_empty() {
            return Err(CatalogError::EmptyMonitorType);
        }
        if self.schemas.contains_key(monitor_type) {
            return Err(CatalogError::DuplicateMonitorType {
                monitor_type: monitor_type.to_owned(),
            });
        }

        trace!(message = "Registering monitor type.", monitor_type, schema = T::SCHEMA_NAME);
        self.schemas.insert(
            monitor_type.to_owned(),
            SchemaDescriptor::of::<T>(monitor_type),
        );
        Ok(self)
    }

    pub fn lookup(&self, monitor_type: &str) -> Option<&SchemaDescriptor> {
        self.schemas.get(monitor_type)
    }

    /// Like [`lookup`](Self::lookup), but an unknown type is an error.
    pub fn schema(&self, monitor_type: &str) -> Result<&SchemaDescriptor, ConfigError> {
        self.lookup(monitor_type)
            .ok_or_else(|| ConfigError::UnknownMonitorType {
                monitor_type: monitor_type.to_owned(),
            })
    }

    /// Registered monitor types, in registration order.
    pub fn monitor_types(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
