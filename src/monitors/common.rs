use indexmap::IndexMap;

use super::schema::ConfigDuration;

/// HTTP client settings shared by scraping monitors.
#[derive(Clone, Debug, PartialEq, Derivative)]
#[derivative(Default)]
pub struct HttpConfig {
    #[derivative(Default(value = "ConfigDuration::from_secs(10)"))]
    pub http_timeout: ConfigDuration,
    pub username: String,
    pub password: String,
    pub use_https: bool,
    pub http_headers: IndexMap<String, String>,
    pub skip_verify: bool,
    pub ca_cert_path: String,
    pub client_cert_path: String,
    pub client_key_path: String,
}

/// Settings for monitors backed by a python runtime.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PythonConfig {
    pub python_binary: String,
    pub python_path: Vec<String>,
}
