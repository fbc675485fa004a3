use super::{
    common::HttpConfig,
    schema::{field, EndpointTargets, Field, MonitorSchema},
    MonitorConfig,
};

/// Configuration for Prometheus exposition scrapers, shared by `prometheus-exporter` and `etcd`.
#[derive(Clone, Debug, PartialEq, Derivative)]
#[derivative(Default)]
pub struct PrometheusExporterConfig {
    pub common: MonitorConfig,
    pub http: HttpConfig,
    pub host: String,
    pub port: u16,
    pub use_service_account: bool,
    #[derivative(Default(value = "\"/metrics\".to_owned()"))]
    pub metric_path: String,
    pub send_all_metrics: bool,
}

impl MonitorSchema for PrometheusExporterConfig {
    const SCHEMA_NAME: &'static str = "prometheusexporter.Config";

    fn common(&self) -> &MonitorConfig {
        &self.common
    }

    fn common_mut(&mut self) -> &mut MonitorConfig {
        &mut self.common
    }

    fn fields() -> Vec<Field<Self>> {
        vec![
            field!("httpTimeout" => http.http_timeout),
            field!("username" => http.username),
            field!("password" => http.password),
            field!("useHTTPS" => http.use_https),
            field!("httpHeaders" => http.http_headers),
            field!("skipVerify" => http.skip_verify),
            field!("caCertPath" => http.ca_cert_path),
            field!("clientCertPath" => http.client_cert_path),
            field!("clientKeyPath" => http.client_key_path),
            field!("host" => host).required(),
            field!("port" => port).required(),
            field!("useServiceAccount" => use_service_account),
            field!("metricPath" => metric_path),
            field!("sendAllMetrics" => send_all_metrics),
        ]
    }

    fn endpoint(&mut self) -> EndpointTargets<'_> {
        EndpointTargets {
            host: Some(&mut self.host),
            port: Some(&mut self.port),
        }
    }
}
