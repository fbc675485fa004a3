use snafu::ResultExt;

use super::error::{ConfigError, InvalidEndpointPortSnafu};
use crate::monitors::{EndpointTargets, MonitorSettings};

/// An `endpoint` split into its host and port.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint<'a> {
    pub host: &'a str,
    pub port: Option<u16>,
}

impl<'a> Endpoint<'a> {
    /// Splits `host[:port]`. The port follows the last `:`, so bare IPv6 addresses must be
    /// bracketed (`[::1]:6379`); the brackets are not part of the host.
    pub fn parse(endpoint: &'a str) -> Result<Self, ConfigError> {
        let (host, port) = split_host_port(endpoint)
            .ok_or_else(|| ConfigError::MalformedEndpoint {
                endpoint: endpoint.to_owned(),
            })?;
        let port = port
            .map(|raw| raw.parse::<u16>().context(InvalidEndpointPortSnafu { raw }))
            .transpose()?;
        Ok(Self { host, port })
    }
}

fn split_host_port(endpoint: &str) -> Option<(&str, Option<&str>)> {
    if let Some(rest) = endpoint.strip_prefix('[') {
        let (host, rest) = rest.split_once(']')?;
        return match rest {
            "" => Some((host, None)),
            _ => rest.strip_prefix(':').map(|port| (host, Some(port))),
        };
    }
    Some(match endpoint.rsplit_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (endpoint, None),
    })
}

/// Fills the monitor's host and port from `endpoint`.
///
/// Values already set on the monitor win: a slot is only written while it holds its zero
/// value, and a port of `0` is never written. A monitor lacking the slot a non-empty part
/// needs is an error.
pub fn apply(endpoint: &str, monitor: &mut dyn MonitorSettings) -> Result<(), ConfigError> {
    let Endpoint { host, port } = Endpoint::parse(endpoint)?;
    let EndpointTargets {
        host: host_slot,
        port: port_slot,
    } = monitor.endpoint_targets();

    if !host.is_empty() {
        let slot = host_slot.ok_or_else(|| ConfigError::UnsupportedEndpointTarget {
            field: "Host",
            value: host.to_owned(),
            expected: "string",
        })?;
        if slot.is_empty() {
            host.clone_into(slot);
        }
    }

    if let Some(port) = port {
        let slot = port_slot.ok_or_else(|| ConfigError::UnsupportedEndpointTarget {
            field: "Port",
            value: port.to_string(),
            expected: "uint16",
        })?;
        if port != 0 && *slot == 0 {
            *slot = port;
        }
    }

    Ok(())
}
