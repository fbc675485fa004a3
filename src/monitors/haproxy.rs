use super::{
    schema::{field, ConfigDuration, EndpointTargets, Field, MonitorSchema},
    MonitorConfig,
};

/// Configuration for the `haproxy` monitor.
#[derive(Clone, Debug, PartialEq, Derivative)]
#[derivative(Default)]
pub struct HaproxyConfig {
    pub common: MonitorConfig,
    pub host: String,
    pub port: u16,
    /// Stats endpoint path, query string included.
    #[derivative(Default(value = "\"stats?stats;csv\".to_owned()"))]
    pub path: String,
    pub username: String,
    pub password: String,
    pub use_https: bool,
    #[derivative(Default(value = "true"))]
    pub ssl_verify: bool,
    #[derivative(Default(value = "ConfigDuration::from_secs(5)"))]
    pub timeout: ConfigDuration,
    /// Proxies to report on. Empty means all.
    pub proxies: Vec<String>,
}

impl MonitorSchema for HaproxyConfig {
    const SCHEMA_NAME: &'static str = "haproxy.Config";

    fn common(&self) -> &MonitorConfig {
        &self.common
    }

    fn common_mut(&mut self) -> &mut MonitorConfig {
        &mut self.common
    }

    fn fields() -> Vec<Field<Self>> {
        vec![
            field!("host" => host),
            field!("port" => port),
            field!("path" => path),
            field!("username" => username),
            field!("password" => password),
            field!("useHTTPS" => use_https),
            field!("sslVerify" => ssl_verify),
            field!("timeout" => timeout),
            field!("proxies" => proxies),
        ]
    }

    fn endpoint(&mut self) -> EndpointTargets<'_> {
        EndpointTargets {
            host: Some(&mut self.host),
            port: Some(&mut self.port),
        }
    }
}
