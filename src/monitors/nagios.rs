use super::{
    schema::{field, Field, MonitorSchema},
    MonitorConfig,
};

/// Configuration for the `nagios` monitor. It runs a local command, so it has no host to resolve.
#[derive(Clone, Debug, PartialEq, Derivative)]
#[derivative(Default)]
pub struct NagiosConfig {
    pub common: MonitorConfig,
    pub command: String,
    pub service: String,
    /// Seconds before the command is killed.
    #[derivative(Default(value = "9"))]
    pub timeout: i64,
}

impl MonitorSchema for NagiosConfig {
    const SCHEMA_NAME: &'static str = "nagios.Config";

    fn common(&self) -> &MonitorConfig {
        &self.common
    }

    fn common_mut(&mut self) -> &mut MonitorConfig {
        &mut self.common
    }

    fn fields() -> Vec<Field<Self>> {
        vec![
            field!("command" => command).required(),
            field!("service" => service).required(),
            field!("timeout" => timeout),
        ]
    }
}
