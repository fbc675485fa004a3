use metrics::counter;

use crate::{
    internal_event::{error_type, InternalEvent},
    receiver::ConfigError,
};

#[derive(Debug)]
pub struct ReceiverConfigLoaded<'a> {
    pub name: &'a str,
    pub monitor_type: &'a str,
}

impl InternalEvent for ReceiverConfigLoaded<'_> {
    fn emit(self) {
        debug!(
            message = "Receiver configuration bound.",
            receiver = %self.name,
            monitor_type = %self.monitor_type,
        );
        counter!(
            "receiver_configs_loaded_total",
            "monitor_type" => self.monitor_type.to_owned(),
        )
        .increment(1);
    }

    fn name(&self) -> Option<&'static str> {
        Some("ReceiverConfigLoaded")
    }
}

#[derive(Debug)]
pub struct ReceiverConfigValidated<'a> {
    pub name: &'a str,
    pub monitor_type: &'a str,
}

impl InternalEvent for ReceiverConfigValidated<'_> {
    fn emit(self) {
        debug!(
            message = "Receiver configuration is valid.",
            receiver = %self.name,
            monitor_type = %self.monitor_type,
        );
    }

    fn name(&self) -> Option<&'static str> {
        Some("ReceiverConfigValidated")
    }
}

#[derive(Debug)]
pub struct ReceiverConfigError<'a> {
    pub name: &'a str,
    pub error: &'a ConfigError,
    pub stage: &'static str,
}

impl InternalEvent for ReceiverConfigError<'_> {
    fn emit(self) {
        error!(
            message = "Invalid receiver configuration.",
            receiver = %self.name,
            error = %self.error,
            error_code = self.error.code(),
            error_type = error_type::CONFIGURATION_FAILED,
            stage = self.stage,
        );
        counter!(
            "component_errors_total",
            "error_code" => self.error.code(),
            "error_type" => error_type::CONFIGURATION_FAILED,
            "stage" => self.stage,
        )
        .increment(1);
    }

    fn name(&self) -> Option<&'static str> {
        Some("ReceiverConfigError")
    }
}
