//! Assembly and validation of `smartagent` receiver configurations.

pub mod endpoint;
mod error;

use indexmap::IndexMap;
use monitor_filter::DatapointFilter;
use serde_yaml::Value;
use snafu::ResultExt;

pub use self::error::{ConfigError, ReceiverError};
use self::error::{FilterSyntaxSnafu, LoadSnafu, ValidateSnafu};
use crate::{
    internal_event::error_stage,
    internal_events::{ReceiverConfigError, ReceiverConfigLoaded, ReceiverConfigValidated},
    monitors::{BoxedMonitorConfig, GenericFieldMap, MonitorCatalog, MonitorSchema},
};

/// The receiver family every name must start with.
pub const TYPE_STR: &str = "smartagent";

const TYPE_KEY: &str = "type";
const ENDPOINT_KEY: &str = "endpoint";
const DIMENSION_CLIENTS_KEY: &str = "dimensionClients";

/// Splits `smartagent` or `smartagent/<name>` into its family and instance name.
pub fn parse_receiver_name(name: &str) -> Result<(&str, &str), ConfigError> {
    let (family, instance) = name.split_once('/').unwrap_or((name, ""));
    if family != TYPE_STR || (name.contains('/') && instance.is_empty()) {
        return Err(ConfigError::InvalidReceiverName {
            name: name.to_owned(),
        });
    }
    Ok((family, instance))
}

/// Whether `name` belongs to the `smartagent` family.
pub fn is_smartagent_receiver(name: &str) -> bool {
    name.split_once('/').map_or(name, |(family, _)| family) == TYPE_STR
}

/// A bound `smartagent` receiver.
#[derive(Clone, Debug)]
pub struct ReceiverConfig {
    /// Always [`TYPE_STR`].
    pub type_val: String,
    /// The full receiver name, like `smartagent/redis`.
    pub name_val: String,
    pub endpoint: Option<String>,
    /// Exporters that receive the dimension updates this monitor produces.
    pub dimension_clients: Vec<String>,
    pub monitor: BoxedMonitorConfig,
}

impl PartialEq for ReceiverConfig {
    fn eq(&self, other: &Self) -> bool {
        self.type_val == other.type_val
            && self.name_val == other.name_val
            && self.endpoint == other.endpoint
            && self.dimension_clients == other.dimension_clients
            && *self.monitor == *other.monitor
    }
}

impl ReceiverConfig {
    /// Assembles a receiver from its name and generic body.
    ///
    /// The reserved keys (`type`, `endpoint`, `dimensionClients`) are consumed here; every
    /// other key is bound onto the monitor schema selected by `type`. An `endpoint` then fills
    /// the monitor's host and port wherever they are still unset.
    pub fn from_generic(
        name: &str,
        body: Value,
        catalog: &MonitorCatalog,
    ) -> Result<Self, ConfigError> {
        let (type_val, _) = parse_receiver_name(name)?;
        let mut fields = generic_fields(body)?;

        let monitor_type = match fields.shift_remove(TYPE_KEY) {
            None | Some(Value::Null) => return Err(ConfigError::MissingMonitorType),
            Some(Value::String(monitor_type)) if monitor_type.is_empty() => {
                return Err(ConfigError::MissingMonitorType)
            }
            Some(Value::String(monitor_type)) => monitor_type,
            Some(other) => return Err(type_mismatch(TYPE_KEY, "string", &other)),
        };
        let schema = catalog.schema(&monitor_type)?;

        let dimension_clients = fields
            .shift_remove(DIMENSION_CLIENTS_KEY)
            .map(parse_dimension_clients)
            .transpose()?
            .unwrap_or_default();

        let endpoint = match fields.shift_remove(ENDPOINT_KEY) {
            None | Some(Value::Null) => None,
            Some(Value::String(endpoint)) => Some(endpoint),
            Some(other) => return Err(type_mismatch(ENDPOINT_KEY, "string", &other)),
        };

        let mut monitor = schema.bind(fields)?;
        if let Some(endpoint) = endpoint.as_deref().filter(|endpoint| !endpoint.is_empty()) {
            endpoint::apply(endpoint, monitor.as_mut())?;
        }

        Ok(Self {
            type_val: type_val.to_owned(),
            name_val: name.to_owned(),
            endpoint,
            dimension_clients,
            monitor,
        })
    }

    /// Checks the bound configuration.
    ///
    /// Checks run in a fixed order and the first failure is returned: dimension clients,
    /// required fields, the collection interval, then the exclusion filters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self
            .dimension_clients
            .iter()
            .any(|client| client.trim().is_empty())
        {
            return Err(ConfigError::InvalidDimensionClients);
        }

        if let Some(missing) = self.monitor.first_missing_required() {
            return Err(ConfigError::RequiredFieldMissing {
                schema: self.monitor.schema_name(),
                field: missing.field,
                got: missing.got,
            });
        }

        if let Some(value) = self
            .monitor
            .monitor_config()
            .interval_seconds
            .filter(|interval| *interval <= 0)
        {
            return Err(ConfigError::IntervalMustBePositive { value });
        }

        self.datapoint_filter().map(drop)
    }

    /// Compiles the monitor's `datapointsToExclude`.
    pub fn datapoint_filter(&self) -> Result<DatapointFilter, ConfigError> {
        DatapointFilter::compile(&self.monitor.monitor_config().datapoints_to_exclude)
            .context(FilterSyntaxSnafu)
    }

    pub fn monitor_type(&self) -> &str {
        &self.monitor.monitor_config().monitor_type
    }

    /// The typed monitor configuration, when it is a `T`.
    pub fn monitor_as<T: MonitorSchema>(&self) -> Option<&T> {
        self.monitor.as_any().downcast_ref::<T>()
    }
}

fn generic_fields(body: Value) -> Result<GenericFieldMap, ConfigError> {
    match body {
        Value::Null => Ok(GenericFieldMap::new()),
        Value::Mapping(mapping) => mapping
            .into_iter()
            .map(|(key, value)| match key {
                Value::String(key) => Ok((key, value)),
                other => Err(ConfigError::InvalidReceiverBody {
                    found: value_kind(&other),
                }),
            })
            .collect(),
        other => Err(ConfigError::InvalidReceiverBody {
            found: value_kind(&other),
        }),
    }
}

fn parse_dimension_clients(value: Value) -> Result<Vec<String>, ConfigError> {
    match value {
        Value::Sequence(clients) => clients
            .into_iter()
            .map(|client| match client {
                Value::String(client) => Ok(client),
                _ => Err(ConfigError::InvalidDimensionClients),
            })
            .collect(),
        _ => Err(ConfigError::InvalidDimensionClients),
    }
}

fn type_mismatch(field: &str, expected: &'static str, found: &Value) -> ConfigError {
    ConfigError::FieldTypeMismatch {
        field: field.to_owned(),
        expected,
        detail: format!("found {}", value_kind(found)),
    }
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

/// Every `smartagent` receiver of a configuration, keyed by name in declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Receivers {
    receivers: IndexMap<String, ReceiverConfig>,
}

impl Receivers {
    /// Assembles every entry, stopping at the first one that fails.
    pub fn from_generic(
        entries: IndexMap<String, Value>,
        catalog: &MonitorCatalog,
    ) -> Result<Self, ReceiverError> {
        let mut receivers = IndexMap::with_capacity(entries.len());
        for (name, body) in entries {
            match ReceiverConfig::from_generic(&name, body, catalog) {
                Ok(receiver) => {
                    emit!(ReceiverConfigLoaded {
                        name: &name,
                        monitor_type: receiver.monitor_type(),
                    });
                    receivers.insert(name, receiver);
                }
                Err(error) => {
                    emit!(ReceiverConfigError {
                        name: &name,
                        error: &error,
                        stage: error_stage::PROCESSING,
                    });
                    return Err(error).context(LoadSnafu { name });
                }
            }
        }
        Ok(Self { receivers })
    }

    /// Validates every receiver, stopping at the first failure.
    pub fn validate(&self) -> Result<(), ReceiverError> {
        for (name, receiver) in &self.receivers {
            if let Err(error) = receiver.validate() {
                emit!(ReceiverConfigError {
                    name,
                    error: &error,
                    stage: error_stage::VALIDATION,
                });
                return Err(error).context(ValidateSnafu { name });
            }
            emit!(ReceiverConfigValidated {
                name,
                monitor_type: receiver.monitor_type(),
            });
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ReceiverConfig> {
        self.receivers.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReceiverConfig)> {
        self.receivers
            .iter()
            .map(|(name, receiver)| (name.as_str(), receiver))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.receivers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.receivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receivers.is_empty()
    }

    pub fn into_inner(self) -> IndexMap<String, ReceiverConfig> {
        self.receivers
    }
}
