//! Support for loading configs from multiple formats.

#![deny(missing_docs, missing_debug_implementations)]

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{de, Deserialize, Serialize};

/// A type alias to better capture the semantics.
pub type FormatHint = Option<Format>;

/// The format used to represent the configuration data.
#[derive(
    Debug, Default, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// YAML format is used.
    #[default]
    Yaml,
    /// TOML format is used.
    Toml,
    /// JSON format is used.
    Json,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "toml" => Ok(Format::Toml),
            "yaml" | "yml" => Ok(Format::Yaml),
            "json" => Ok(Format::Json),
            _ => Err(format!("Invalid format: {}", s)),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let format = match self {
            Format::Toml => "toml",
            Format::Json => "json",
            Format::Yaml => "yaml",
        };
        write!(f, "{}", format)
    }
}

impl Format {
    /// Obtain the format from the file path using extension as a hint.
    pub fn from_path<T: AsRef<Path>>(path: T) -> Result<Self, T> {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Format::Toml),
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            Some("json") => Ok(Format::Json),
            _ => Err(path),
        }
    }
}

/// Parse the string represented in the specified format.
///
/// YAML merge keys (`<<: *anchor`) are resolved before deserializing.
pub fn deserialize<T>(content: &str, format: Format) -> Result<T, Vec<String>>
where
    T: de::DeserializeOwned,
{
    match format {
        Format::Toml => toml::from_str(content).map_err(|e| vec![e.to_string()]),
        Format::Yaml => serde_yaml::from_str::<serde_yaml::Value>(content)
            .and_then(|mut v| {
                v.apply_merge()?;
                serde_yaml::from_value(v)
            })
            .map_err(|e| vec![e.to_string()]),
        Format::Json => serde_json::from_str(content).map_err(|e| vec![e.to_string()]),
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;
    use serde_yaml::Value;

    use super::*;

    #[test]
    fn detects_format_from_extension() {
        assert_eq!(Format::from_path("agent.yaml"), Ok(Format::Yaml));
        assert_eq!(Format::from_path("agent.yml"), Ok(Format::Yaml));
        assert_eq!(Format::from_path("agent.toml"), Ok(Format::Toml));
        assert_eq!(Format::from_path("agent.json"), Ok(Format::Json));
        assert_eq!(Format::from_path("agent"), Err("agent"));
    }

    #[test]
    fn parses_format_names() {
        assert_eq!("YAML".parse::<Format>(), Ok(Format::Yaml));
        assert_eq!("json".parse::<Format>(), Ok(Format::Json));
        assert!("ini".parse::<Format>().is_err());
        assert_eq!(Format::Toml.to_string(), "toml");
    }

    #[test]
    fn yaml_merge_keys_are_applied() {
        let parsed: IndexMap<String, Value> = deserialize(
            "base: &base\n  type: haproxy\n  port: 8080\nderived:\n  <<: *base\n  port: 9090\n",
            Format::Yaml,
        )
        .unwrap();

        let derived = &parsed["derived"];
        assert_eq!(derived["type"], Value::from("haproxy"));
        assert_eq!(derived["port"], Value::from(9090));
    }

    #[test]
    fn same_document_in_every_format() {
        let yaml: IndexMap<String, Value> =
            deserialize("a:\n  type: nagios\n", Format::Yaml).unwrap();
        let toml: IndexMap<String, Value> =
            deserialize("[a]\ntype = \"nagios\"\n", Format::Toml).unwrap();
        let json: IndexMap<String, Value> =
            deserialize(r#"{"a": {"type": "nagios"}}"#, Format::Json).unwrap();
        assert_eq!(yaml, toml);
        assert_eq!(yaml, json);
    }

    #[test]
    fn reports_parse_errors() {
        let errors = deserialize::<IndexMap<String, Value>>("a: [", Format::Yaml).unwrap_err();
        assert_eq!(errors.len(), 1);
    }
}
