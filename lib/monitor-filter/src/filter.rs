use std::{
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use snafu::{ResultExt, Snafu};

use crate::pattern::{PatternError, PatternSet};

/// One datapoint exclusion rule, as written under `datapointsToExclude`.
///
/// ```yaml
/// datapointsToExclude:
///   - metricName: df_inodes.*
///     dimensions:
///       mountpoint: ["*", "!/hostfs/var/lib/cni"]
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct MetricFilterSpec {
    /// A single metric name pattern.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub metric_name: String,

    /// Additional metric name patterns.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metric_names: Vec<String>,

    /// Dimension name to the pattern(s) its value must match.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub dimensions: IndexMap<String, DimensionPatterns>,

    /// Invert the rule, excluding everything it would otherwise keep.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub negated: bool,
}

impl MetricFilterSpec {
    pub fn metric_name(name: impl Into<String>) -> Self {
        Self {
            metric_name: name.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_dimension(mut self, key: impl Into<String>, patterns: DimensionPatterns) -> Self {
        self.dimensions.insert(key.into(), patterns);
        self
    }

    fn name_patterns(&self) -> impl Iterator<Item = &str> {
        (!self.metric_name.is_empty())
            .then_some(self.metric_name.as_str())
            .into_iter()
            .chain(self.metric_names.iter().map(String::as_str))
    }
}

/// Dimension patterns may be given as a single string or a list.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum DimensionPatterns {
    One(String),
    Many(Vec<String>),
}

impl DimensionPatterns {
    pub fn as_slice(&self) -> &[String] {
        match self {
            Self::One(pattern) => std::slice::from_ref(pattern),
            Self::Many(patterns) => patterns,
        }
    }
}

impl From<&str> for DimensionPatterns {
    fn from(pattern: &str) -> Self {
        Self::One(pattern.to_owned())
    }
}

impl<S: Into<String>> From<Vec<S>> for DimensionPatterns {
    fn from(patterns: Vec<S>) -> Self {
        Self::Many(patterns.into_iter().map(Into::into).collect())
    }
}

/// Errors raised while compiling `datapointsToExclude`.
#[derive(Debug, Snafu)]
pub enum FilterError {
    #[snafu(display("datapointsToExclude[{}]: {}", index, source))]
    InvalidPattern { index: usize, source: PatternError },
}

impl FilterError {
    /// Position of the offending rule.
    pub const fn index(&self) -> usize {
        match self {
            Self::InvalidPattern { index, .. } => *index,
        }
    }

    pub fn pattern(&self) -> &str {
        match self {
            Self::InvalidPattern { source, .. } => source.pattern(),
        }
    }
}

/// Read access to the dimensions of a datapoint.
pub trait Dimensions {
    fn dimension(&self, key: &str) -> Option<&str>;
}

impl<S: BuildHasher> Dimensions for HashMap<String, String, S> {
    fn dimension(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl<S: BuildHasher> Dimensions for IndexMap<String, String, S> {
    fn dimension(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl Dimensions for BTreeMap<String, String> {
    fn dimension(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

#[derive(Clone, Debug)]
struct CompiledRule {
    names: PatternSet,
    dimensions: Vec<(String, PatternSet)>,
    negated: bool,
}

impl CompiledRule {
    fn compile(spec: &MetricFilterSpec) -> Result<Self, PatternError> {
        let names = PatternSet::new(spec.name_patterns())?;
        let dimensions = spec
            .dimensions
            .iter()
            .map(|(key, patterns)| Ok((key.clone(), PatternSet::new(patterns.as_slice())?)))
            .collect::<Result<Vec<_>, PatternError>>()?;

        Ok(Self {
            names,
            dimensions,
            negated: spec.negated,
        })
    }

    fn excludes<D: Dimensions + ?Sized>(&self, metric_name: &str, dimensions: &D) -> bool {
        // A rule without any name pattern never applies, negated or not.
        if self.names.is_empty() {
            return false;
        }
        let matched = self.names.matches(metric_name)
            && self.dimensions.iter().all(|(key, patterns)| {
                dimensions
                    .dimension(key)
                    .is_some_and(|value| patterns.matches(value))
            });
        matched != self.negated
    }
}

/// Compiled form of a monitor's `datapointsToExclude`.
#[derive(Clone, Debug, Default)]
pub struct DatapointFilter {
    rules: Vec<CompiledRule>,
}

impl DatapointFilter {
    pub fn compile(specs: &[MetricFilterSpec]) -> Result<Self, FilterError> {
        let rules = specs
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                CompiledRule::compile(spec).context(InvalidPatternSnafu { index })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(message = "Compiled datapoint filter.", rules = rules.len());
        Ok(Self { rules })
    }

    /// Whether any rule excludes the datapoint.
    pub fn excludes<D: Dimensions + ?Sized>(&self, metric_name: &str, dimensions: &D) -> bool {
        self.rules
            .iter()
            .any(|rule| rule.excludes(metric_name, dimensions))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
