use super::{
    schema::{field, Field, MonitorSchema},
    MonitorConfig,
};

/// Configuration for the `telegraf/ntpq` monitor.
#[derive(Clone, Debug, PartialEq, Derivative)]
#[derivative(Default)]
pub struct NtpqConfig {
    pub common: MonitorConfig,
    /// Resolve peer addresses to hostnames.
    #[derivative(Default(value = "Some(true)"))]
    pub dns_lookup: Option<bool>,
}

impl MonitorSchema for NtpqConfig {
    const SCHEMA_NAME: &'static str = "ntpq.Config";

    fn common(&self) -> &MonitorConfig {
        &self.common
    }

    fn common_mut(&mut self) -> &mut MonitorConfig {
        &mut self.common
    }

    fn fields() -> Vec<Field<Self>> {
        vec![field!("dnsLookup" => dns_lookup)]
    }
}
