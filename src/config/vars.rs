use std::{collections::HashMap, sync::LazyLock};

use regex::{Captures, Regex};

// Names follow what a shell accepts (`[:word:]`), plus `.` for variables that originate from
// Java style properties.
//
// Supported forms: `$NAME`, `${NAME}`, `${NAME:-default}`, `${NAME-default}`,
// `${NAME:?error}`, `${NAME?error}`, and `$$` for a literal `$`.
pub static ENVIRONMENT_VARIABLE_INTERPOLATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        \$\$|
        \$([[:word:].]+)|
        \$\{([[:word:].]+)(?:(:?-|:?\?)([^}]*))?\}",
    )
    .unwrap()
});

/// How a missing or empty variable is handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Fallback<'a> {
    /// Plain reference: missing is an error, empty is kept.
    Plain,
    /// `:-`: missing or empty uses the default.
    DefaultIfUnsetOrEmpty(&'a str),
    /// `-`: only missing uses the default.
    DefaultIfUnset(&'a str),
    /// `:?`: missing or empty fails with the message.
    RequireNonEmpty(&'a str),
    /// `?`: missing fails with the message.
    Require(&'a str),
}

impl<'a> Fallback<'a> {
    fn from_captures(caps: &Captures<'a>) -> Self {
        let argument = caps.get(4).map(|m| m.as_str()).unwrap_or_default();
        match caps.get(3).map(|m| m.as_str()) {
            Some(":-") => Self::DefaultIfUnsetOrEmpty(argument),
            Some("-") => Self::DefaultIfUnset(argument),
            Some(":?") => Self::RequireNonEmpty(argument),
            Some("?") => Self::Require(argument),
            _ => Self::Plain,
        }
    }

    fn resolve<'v>(
        self,
        name: &str,
        value: Option<&'v str>,
        errors: &mut Vec<String>,
    ) -> &'v str
    where
        'a: 'v,
    {
        match (self, value) {
            (Self::DefaultIfUnsetOrEmpty(default), None) => default,
            (Self::DefaultIfUnsetOrEmpty(default), Some("")) => default,
            (Self::DefaultIfUnset(default), None) => default,
            (Self::RequireNonEmpty(message), None | Some("")) => {
                errors.push(format!(
                    "Non-empty environment variable required in config. name = {name:?}, error = {message:?}",
                ));
                ""
            }
            (Self::Require(message), None) => {
                errors.push(format!(
                    "Missing environment variable required in config. name = {name:?}, error = {message:?}",
                ));
                ""
            }
            (Self::Plain, None) => {
                errors.push(format!(
                    "Missing environment variable in config. name = {name:?}",
                ));
                ""
            }
            (_, Some(value)) => value,
        }
    }
}

/// Replaces environment variable references in `input`.
///
/// Every unresolved reference is reported; the input is only returned when all resolve.
pub fn interpolate(input: &str, vars: &HashMap<String, String>) -> Result<String, Vec<String>> {
    let mut errors = Vec::new();

    let interpolated = ENVIRONMENT_VARIABLE_INTERPOLATION_REGEX
        .replace_all(input, |caps: &Captures<'_>| {
            match caps.get(1).or_else(|| caps.get(2)) {
                Some(name) => {
                    let name = name.as_str();
                    Fallback::from_captures(caps)
                        .resolve(name, vars.get(name).map(String::as_str), &mut errors)
                        .to_owned()
                }
                // `$$`
                None => "$".to_owned(),
            }
        })
        .into_owned();

    if errors.is_empty() {
        Ok(interpolated)
    } else {
        Err(errors)
    }
}
