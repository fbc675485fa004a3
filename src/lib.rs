#![deny(unused_extern_crates)]
#![deny(unused_allocation)]
#![deny(unused_assignments)]
#![deny(unused_comparisons)]
#![cfg_attr(docsrs, feature(doc_cfg), deny(rustdoc::broken_intra_doc_links))]
#![deny(clippy::clone_on_ref_ptr)]
#![deny(clippy::trivially_copy_pass_by_ref)]

//! Configuration binding for the `smartagent` receiver.
//!
//! A receiver entry is a loosely typed map: a monitor `type`, an optional `endpoint`, optional
//! `dimensionClients`, and the monitor's own settings. This crate resolves the monitor type
//! through a [`monitors::MonitorCatalog`], binds the settings onto the monitor's typed schema,
//! resolves the endpoint into the monitor's host and port, and validates the result, including
//! the `datapointsToExclude` filters.
//!
//! ```
//! use smartagent_receiver::{monitors::{MonitorCatalog, RedisConfig}, receiver::ReceiverConfig};
//!
//! let body = serde_yaml::from_str("type: collectd/redis\nendpoint: redishost:6379").unwrap();
//! let receiver = ReceiverConfig::from_generic("smartagent/redis", body, &MonitorCatalog::builtin())
//!     .unwrap();
//! receiver.validate().unwrap();
//! assert_eq!(receiver.monitor_as::<RedisConfig>().unwrap().host, "redishost");
//! ```

#[macro_use]
extern crate derivative;
#[macro_use]
extern crate tracing;

#[macro_use]
pub mod internal_event;

pub mod app;
pub mod cli;
pub mod config;
pub mod internal_events;
pub mod monitors;
pub mod receiver;
pub mod trace;

pub use monitor_filter as filter;

pub fn get_version() -> String {
    let pkg_version = env!("CARGO_PKG_VERSION");
    let debug_info = if cfg!(debug_assertions) { " debug" } else { "" };
    format!("{pkg_version}{debug_info}")
}

pub fn get_hostname() -> std::io::Result<String> {
    Ok(if let Ok(hostname) = std::env::var("SMARTAGENT_HOSTNAME") {
        hostname
    } else {
        hostname::get()?.to_string_lossy().into_owned()
    })
}
