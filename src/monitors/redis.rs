use serde::{Deserialize, Serialize};

use super::{
    schema::{field, EndpointTargets, Field, MonitorSchema},
    MonitorConfig,
};

/// A key pattern whose list lengths are reported as a gauge.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ListLength {
    pub database_index: u16,
    pub key_pattern: String,
}

/// Configuration for the `collectd/redis` monitor.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RedisConfig {
    pub common: MonitorConfig,
    pub host: String,
    pub port: u16,
    /// Instance name reported as `plugin_instance`.
    pub name: String,
    pub auth: String,
    pub send_list_lengths: Vec<ListLength>,
    pub verbose: bool,
}

impl MonitorSchema for RedisConfig {
    const SCHEMA_NAME: &'static str = "redis.Config";

    fn common(&self) -> &MonitorConfig {
        &self.common
    }

    fn common_mut(&mut self) -> &mut MonitorConfig {
        &mut self.common
    }

    fn fields() -> Vec<Field<Self>> {
        vec![
            field!("host" => host).required(),
            field!("port" => port).required(),
            field!("name" => name),
            field!("auth" => auth),
            field!("sendListLengths" => send_list_lengths),
            field!("verbose" => verbose),
        ]
    }

    fn endpoint(&mut self) -> EndpointTargets<'_> {
        EndpointTargets {
            host: Some(&mut self.host),
            port: Some(&mut self.port),
        }
    }
}
