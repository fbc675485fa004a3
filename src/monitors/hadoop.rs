use super::{
    common::PythonConfig,
    schema::{field, EndpointTargets, Field, MonitorSchema},
    MonitorConfig,
};

/// Configuration for the `collectd/hadoop` monitor.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HadoopConfig {
    pub common: MonitorConfig,
    pub python: PythonConfig,
    /// Resource Manager host.
    pub host: String,
    /// Resource Manager port.
    pub port: u16,
    pub verbose: bool,
}

impl MonitorSchema for HadoopConfig {
    const SCHEMA_NAME: &'static str = "hadoop.Config";

    fn common(&self) -> &MonitorConfig {
        &self.common
    }

    fn common_mut(&mut self) -> &mut MonitorConfig {
        &mut self.common
    }

    fn fields() -> Vec<Field<Self>> {
        vec![
            field!("pythonBinary" => python.python_binary),
            field!("pythonPath" => python.python_path),
            field!("host" => host).required(),
            field!("port" => port).required(),
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
