use super::{
    common::PythonConfig,
    schema::{field, EndpointTargets, Field, MonitorSchema},
    MonitorConfig,
};

/// Configuration for the `collectd/consul` monitor.
#[derive(Clone, Debug, PartialEq, Derivative)]
#[derivative(Default)]
pub struct ConsulConfig {
    pub common: MonitorConfig,
    pub python: PythonConfig,
    pub host: String,
    pub port: u16,
    pub acl_token: String,
    pub use_https: bool,
    pub enhanced_metrics: bool,
    pub ca_certificate: String,
    pub client_certificate: String,
    pub client_key: String,
    /// Listen for consul telemetry over statsd.
    pub telemetry_server: bool,
    #[derivative(Default(value = "\"0.0.0.0\".to_owned()"))]
    pub telemetry_host: String,
    #[derivative(Default(value = "8125"))]
    pub telemetry_port: u16,
}

impl MonitorSchema for ConsulConfig {
    const SCHEMA_NAME: &'static str = "consul.Config";

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
            field!("aclToken" => acl_token),
            field!("useHTTPS" => use_https),
            field!("enhancedMetrics" => enhanced_metrics),
            field!("caCertificate" => ca_certificate),
            field!("clientCertificate" => client_certificate),
            field!("clientKey" => client_key),
            field!("telemetryServer" => telemetry_server),
            field!("telemetryHost" => telemetry_host),
            field!("telemetryPort" => telemetry_port),
        ]
    }

    fn endpoint(&mut self) -> EndpointTargets<'_> {
        EndpointTargets {
            host: Some(&mut self.host),
            port: Some(&mut self.port),
        }
    }
}
