use std::{any::Any, fmt, hash::Hash, time::Duration};

use indexmap::{IndexMap, IndexSet};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_yaml::Value;

use super::MonitorConfig;
use crate::receiver::ConfigError;

/// The loosely typed key/value view of a receiver body.
pub type GenericFieldMap = IndexMap<String, Value>;

/// A value that a schema field can hold.
pub trait FieldValue: de::DeserializeOwned + Default + PartialEq + fmt::Debug {
    /// Name of the expected type, as reported in type mismatch errors.
    const EXPECTED: &'static str;

    /// Renders the value for validation messages.
    fn describe(&self) -> String {
        format!("{self:?}")
    }
}

impl FieldValue for String {
    const EXPECTED: &'static str = "string";

    fn describe(&self) -> String {
        self.clone()
    }
}

macro_rules! impl_field_value_display {
    ($($ty:ty => $expected:literal),+ $(,)?) => {
        $(
            impl FieldValue for $ty {
                const EXPECTED: &'static str = $expected;

                fn describe(&self) -> String {
                    self.to_string()
                }
            }
        )+
    };
}

impl_field_value_display! {
    bool => "bool",
    i64 => "int",
    u16 => "uint16",
    u32 => "uint32",
    u64 => "uint64",
    f64 => "float",
}

impl<T: FieldValue> FieldValue for Option<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    fn describe(&self) -> String {
        self.as_ref().map(FieldValue::describe).unwrap_or_default()
    }
}

impl<T> FieldValue for Vec<T>
where
    T: de::DeserializeOwned + PartialEq + fmt::Debug,
{
    const EXPECTED: &'static str = "sequence";
}

impl<T> FieldValue for IndexSet<T>
where
    T: de::DeserializeOwned + Hash + Eq + fmt::Debug,
{
    const EXPECTED: &'static str = "sequence";
}

impl<K, V> FieldValue for IndexMap<K, V>
where
    K: de::DeserializeOwned + Hash + Eq + fmt::Debug,
    V: de::DeserializeOwned + PartialEq + fmt::Debug,
{
    const EXPECTED: &'static str = "mapping";
}

/// A duration written either as whole seconds or as a human readable string like `5s`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConfigDuration(pub Duration);

impl ConfigDuration {
    pub const fn from_secs(secs: u64) -> Self {
        Self(Duration::from_secs(secs))
    }

    pub const fn as_duration(self) -> Duration {
        self.0
    }
}

impl From<Duration> for ConfigDuration {
    fn from(duration: Duration) -> Self {
        Self(duration)
    }
}

impl fmt::Display for ConfigDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", humantime::format_duration(self.0))
    }
}

impl<'de> Deserialize<'de> for ConfigDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Seconds(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Seconds(secs) => Ok(Self::from_secs(secs)),
            Raw::Text(text) => humantime::parse_duration(&text)
                .map(Self)
                .map_err(|error| de::Error::custom(format!("invalid duration {text:?}: {error}"))),
        }
    }
}

impl Serialize for ConfigDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FieldValue for ConfigDuration {
    const EXPECTED: &'static str = "duration";

    fn describe(&self) -> String {
        self.to_string()
    }
}

/// Raised when a generic value cannot be decoded into a field.
#[derive(Debug)]
pub struct FieldTypeError {
    pub expected: &'static str,
    pub detail: String,
}

/// Decodes `value` into `slot`, replacing its previous contents.
pub fn bind_value<V: FieldValue>(slot: &mut V, value: Value) -> Result<(), FieldTypeError> {
    *slot = serde_yaml::from_value(value).map_err(|error| FieldTypeError {
        expected: V::EXPECTED,
        detail: error.to_string(),
    })?;
    Ok(())
}

pub fn is_zero<V: FieldValue>(value: &V) -> bool {
    *value == V::default()
}

/// One named, typed field of a schema.
///
/// Fields are usually declared with the [`field!`] macro, which wires the accessors to a
/// struct member.
pub struct Field<T> {
    key: &'static str,
    required: bool,
    bind: fn(&mut T, Value) -> Result<(), FieldTypeError>,
    is_zero: fn(&T) -> bool,
    describe: fn(&T) -> String,
}

impl<T> Field<T> {
    pub fn new(
        key: &'static str,
        bind: fn(&mut T, Value) -> Result<(), FieldTypeError>,
        is_zero: fn(&T) -> bool,
        describe: fn(&T) -> String,
    ) -> Self {
        Self {
            key,
            required: false,
            bind,
            is_zero,
            describe,
        }
    }

    /// Marks the field as required: validation fails while it holds its zero value.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn key(&self) -> &'static str {
        self.key
    }

    pub const fn is_required(&self) -> bool {
        self.required
    }

    pub const fn info(&self) -> FieldInfo {
        FieldInfo {
            key: self.key,
            required: self.required,
        }
    }

    fn bind(&self, target: &mut T, value: Value) -> Result<(), ConfigError> {
        (self.bind)(target, value).map_err(|error| ConfigError::FieldTypeMismatch {
            field: self.key.to_owned(),
            expected: error.expected,
            detail: error.detail,
        })
    }

    fn missing(&self, target: &T) -> Option<String> {
        (self.required && (self.is_zero)(target)).then(|| (self.describe)(target))
    }
}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("key", &self.key)
            .field("required", &self.required)
            .finish()
    }
}

/// Declares a [`Field`] bound to a member of `Self`.
///
/// ```ignore
/// field!("host" => host).required()
/// field!("httpTimeout" => http.http_timeout)
/// ```
macro_rules! field {
    ($key:literal => $($member:ident).+) => {
        $crate::monitors::schema::Field::<Self>::new(
            $key,
            |config: &mut Self, value| {
                $crate::monitors::schema::bind_value(&mut config.$($member).+, value)
            },
            |config: &Self| $crate::monitors::schema::is_zero(&config.$($member).+),
            |config: &Self| {
                $crate::monitors::schema::FieldValue::describe(&config.$($member).+)
            },
        )
    };
}

pub(crate) use field;

/// Key and requiredness of a schema field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldInfo {
    pub key: &'static str,
    pub required: bool,
}

/// The monitor's host and port slots that an `endpoint` may fill.
#[derive(Debug, Default)]
pub struct EndpointTargets<'a> {
    pub host: Option<&'a mut String>,
    pub port: Option<&'a mut u16>,
}

/// A typed monitor configuration.
pub trait MonitorSchema: Clone + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// The schema's type name, as reported in binding and validation errors.
    const SCHEMA_NAME: &'static str;

    fn common(&self) -> &MonitorConfig;

    fn common_mut(&mut self) -> &mut MonitorConfig;

    /// Schema specific fields. The common monitor fields are bound separately.
    fn fields() -> Vec<Field<Self>>;

    /// Slots an `endpoint` can be resolved into. Schemas without a host or port leave them unset.
    fn endpoint(&mut self) -> EndpointTargets<'_> {
        EndpointTargets::default()
    }
}

/// A required field left at its zero value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingField {
    pub field: &'static str,
    pub got: String,
}

/// Object safe view over any [`MonitorSchema`].
pub trait MonitorSettings: dyn_clone::DynClone + fmt::Debug + Send + Sync {
    fn monitor_config(&self) -> &MonitorConfig;

    fn monitor_config_mut(&mut self) -> &mut MonitorConfig;

    fn schema_name(&self) -> &'static str;

    fn endpoint_targets(&mut self) -> EndpointTargets<'_>;

    /// The first required field, in declaration order, still holding its zero value.
    fn first_missing_required(&self) -> Option<MissingField>;

    fn as_any(&self) -> &dyn Any;

    fn eq_settings(&self, other: &dyn MonitorSettings) -> bool;
}

impl<T: MonitorSchema> MonitorSettings for T {
    fn monitor_config(&self) -> &MonitorConfig {
        self.common()
    }

    fn monitor_config_mut(&mut self) -> &mut MonitorConfig {
        self.common_mut()
    }

    fn schema_name(&self) -> &'static str {
        T::SCHEMA_NAME
    }

    fn endpoint_targets(&mut self) -> EndpointTargets<'_> {
        self.endpoint()
    }

    fn first_missing_required(&self) -> Option<MissingField> {
        T::fields().iter().find_map(|field| {
            field.missing(self).map(|got| MissingField {
                field: field.key(),
                got,
            })
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_settings(&self, other: &dyn MonitorSettings) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| other == self)
    }
}

dyn_clone::clone_trait_object!(MonitorSettings);

impl PartialEq for dyn MonitorSettings {
    fn eq(&self, other: &Self) -> bool {
        self.eq_settings(other)
    }
}

pub type BoxedMonitorConfig = Box<dyn MonitorSettings>;

/// Everything the catalog knows about one monitor type.
#[derive(Clone)]
pub struct SchemaDescriptor {
    monitor_type: String,
    schema_name: &'static str,
    fields: Vec<FieldInfo>,
    endpoint_host: bool,
    endpoint_port: bool,
    bind: fn(&str, GenericFieldMap) -> Result<BoxedMonitorConfig, ConfigError>,
}

impl SchemaDescriptor {
    pub fn of<T: MonitorSchema>(monitor_type: impl Into<String>) -> Self {
        let mut probe = T::default();
        let targets = probe.endpoint();
        let (endpoint_host, endpoint_port) = (targets.host.is_some(), targets.port.is_some());

        let fields = MonitorConfig::fields()
            .iter()
            .map(Field::info)
            .chain(T::fields().iter().map(Field::info))
            .collect();

        Self {
            monitor_type: monitor_type.into(),
            schema_name: T::SCHEMA_NAME,
            fields,
            endpoint_host,
            endpoint_port,
            bind: bind_schema::<T>,
        }
    }

    pub fn monitor_type(&self) -> &str {
        &self.monitor_type
    }

    pub const fn schema_name(&self) -> &'static str {
        self.schema_name
    }

    /// Every accepted key, common fields first.
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|field| field.key == key)
    }

    pub const fn supports_endpoint_host(&self) -> bool {
        self.endpoint_host
    }

    pub const fn supports_endpoint_port(&self) -> bool {
        self.endpoint_port
    }

    /// Builds a fresh default instance and writes every entry of `fields` into it.
    pub fn bind(&self, fields: GenericFieldMap) -> Result<BoxedMonitorConfig, ConfigError> {
        (self.bind)(&self.monitor_type, fields)
    }
}

impl fmt::Debug for SchemaDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaDescriptor")
            .field("monitor_type", &self.monitor_type)
            .field("schema_name", &self.schema_name)
            .field("fields", &self.fields)
            .field("endpoint_host", &self.endpoint_host)
            .field("endpoint_port", &self.endpoint_port)
            .finish()
    }
}

fn bind_schema<T: MonitorSchema>(
    monitor_type: &str,
    fields: GenericFieldMap,
) -> Result<BoxedMonitorConfig, ConfigError> {
    let common_fields = MonitorConfig::fields();
    let schema_fields = T::fields();

    let mut config = T::default();
    config.common_mut().monitor_type = monitor_type.to_owned();

    for (key, value) in fields {
        if let Some(field) = common_fields.iter().find(|field| field.key() == key) {
            // An empty entry leaves the default in place.
            if !value.is_null() {
                field.bind(config.common_mut(), value)?;
            }
        } else if let Some(field) = schema_fields.iter().find(|field| field.key() == key) {
            if !value.is_null() {
                field.bind(&mut config, value)?;
            }
        } else {
            return Err(ConfigError::UnsupportedField {
                field: key,
                schema: T::SCHEMA_NAME,
            });
        }
    }

    Ok(Box::new(config))
}
