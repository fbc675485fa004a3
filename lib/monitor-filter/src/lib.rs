//! Datapoint filtering for monitor configurations.
//!
//! Filters are declared as a list of [`MetricFilterSpec`] rules and compiled into a
//! [`DatapointFilter`], which answers whether a datapoint (metric name plus dimensions)
//! should be excluded.

#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(unused_allocation)]
#![deny(unused_extern_crates)]
#![deny(unused_assignments)]
#![deny(unused_comparisons)]

#[macro_use]
extern crate tracing;

mod filter;
mod pattern;

pub use filter::{DatapointFilter, DimensionPatterns, Dimensions, FilterError, MetricFilterSpec};
pub use pattern::{Pattern, PatternError, PatternSet};
