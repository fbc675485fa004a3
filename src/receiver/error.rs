use std::num::ParseIntError;

use monitor_filter::FilterError;
use snafu::Snafu;

/// Everything that can go wrong turning one receiver body into a validated configuration.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ConfigError {
    #[snafu(display(
        "invalid receiver name {:?}: expected \"smartagent\" or \"smartagent/<name>\"",
        name
    ))]
    InvalidReceiverName { name: String },

    #[snafu(display("receiver configuration must be a mapping, found {}", found))]
    InvalidReceiverBody { found: &'static str },

    #[snafu(display("you must specify a \"type\" for a smartagent receiver"))]
    MissingMonitorType,

    #[snafu(display("no known monitor type {:?}", monitor_type))]
    UnknownMonitorType { monitor_type: String },

    #[snafu(display(
        "failed creating Smart Agent Monitor custom config: field {} not found in type {}",
        field,
        schema
    ))]
    UnsupportedField { field: String, schema: &'static str },

    #[snafu(display(
        "failed creating Smart Agent Monitor custom config: field {} expects a {}: {}",
        field,
        expected,
        detail
    ))]
    FieldTypeMismatch {
        field: String,
        expected: &'static str,
        detail: String,
    },

    #[snafu(display(
        "cannot determine host and port via Endpoint: malformed endpoint {:?}",
        endpoint
    ))]
    MalformedEndpoint { endpoint: String },

    #[snafu(display("cannot determine port via Endpoint: parsing {:?}: {}", raw, source))]
    InvalidEndpointPort { raw: String, source: ParseIntError },

    #[snafu(display(
        "unable to set monitor {} field using Endpoint-derived value of {}: no field {} of type {} detected",
        field,
        value,
        field,
        expected
    ))]
    UnsupportedEndpointTarget {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[snafu(display("dimensionClients must be an array of compatible exporter names"))]
    InvalidDimensionClients,

    #[snafu(display(
        "Validation error in field '{}.{}': {} is a required field (got '{}')",
        struct_name(schema),
        field,
        field,
        got
    ))]
    RequiredFieldMissing {
        schema: &'static str,
        field: &'static str,
        got: String,
    },

    #[snafu(display("intervalSeconds must be greater than 0s ({} provided)", value))]
    IntervalMustBePositive { value: i64 },

    #[snafu(display("{}", source))]
    FilterSyntax { source: FilterError },
}

impl ConfigError {
    /// A short stable identifier, used as the `error_code` of emitted events.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidReceiverName { .. } => "invalid_receiver_name",
            Self::InvalidReceiverBody { .. } => "invalid_receiver_body",
            Self::MissingMonitorType => "missing_monitor_type",
            Self::UnknownMonitorType { .. } => "unknown_monitor_type",
            Self::UnsupportedField { .. } => "unsupported_field",
            Self::FieldTypeMismatch { .. } => "field_type_mismatch",
            Self::MalformedEndpoint { .. } => "malformed_endpoint",
            Self::InvalidEndpointPort { .. } => "invalid_endpoint_port",
            Self::UnsupportedEndpointTarget { .. } => "unsupported_endpoint_target",
            Self::InvalidDimensionClients => "invalid_dimension_clients",
            Self::RequiredFieldMissing { .. } => "required_field_missing",
            Self::IntervalMustBePositive { .. } => "interval_must_be_positive",
            Self::FilterSyntax { .. } => "filter_syntax",
        }
    }
}

/// `redis.Config` is reported as `Config`.
fn struct_name(schema: &str) -> &str {
    schema.rsplit('.').next().unwrap_or(schema)
}

/// A [`ConfigError`] attributed to the receiver it came from.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ReceiverError {
    #[snafu(display("error reading receivers configuration for {}: {}", name, source))]
    Load { name: String, source: ConfigError },

    #[snafu(display("receiver {} has an invalid configuration: {}", name, source))]
    Validate { name: String, source: ConfigError },
}

impl ReceiverError {
    pub fn name(&self) -> &str {
        match self {
            Self::Load { name, .. } | Self::Validate { name, .. } => name,
        }
    }

    pub const fn config_error(&self) -> &ConfigError {
        match self {
            Self::Load { source, .. } | Self::Validate { source, .. } => source,
        }
    }
}
