#![allow(missing_docs)]

use std::{io::Write, path::PathBuf};

use exitcode::ExitCode;

use crate::{
    cli::{ListTypesOpts, LogFormat, Opts, SubCommand, ValidateOpts},
    config::{self, ConfigPath},
    monitors::MonitorCatalog,
    receiver::Receivers,
    trace,
};

/// Runs the command line tool, returning the process exit code.
pub fn run(opts: Opts) -> ExitCode {
    init_logging(opts.root.color.use_color(), opts.root.log_format, opts.log_level());

    let catalog = MonitorCatalog::builtin();
    match opts.sub_command {
        Some(SubCommand::ListTypes(list_opts)) => list_types(&catalog, &list_opts),
        Some(SubCommand::Validate(validate_opts)) => {
            validate(&opts.root.config_paths_with_formats(), &catalog, &validate_opts)
        }
        None => validate(
            &opts.root.config_paths_with_formats(),
            &catalog,
            &ValidateOpts::default(),
        ),
    }
}

fn validate(config_paths: &[ConfigPath], catalog: &MonitorCatalog, opts: &ValidateOpts) -> ExitCode {
    let receivers = match load_configs(config_paths, catalog) {
        Ok(receivers) => receivers,
        Err(code) => return code,
    };

    if !opts.no_validate {
        if let Err(error) = receivers.validate() {
            error!(message = "Configuration error.", %error);
            return exitcode::CONFIG;
        }
    }

    let mut stdout = std::io::stdout().lock();
    for (name, receiver) in receivers.iter() {
        if writeln!(stdout, "{}", receiver_line(name, receiver.monitor_type(), opts)).is_err() {
            return exitcode::IOERR;
        }
    }
    if opts.no_validate {
        info!(
            message = "Receivers are bound, validation skipped.",
            receivers = receivers.len()
        );
    } else {
        info!(message = "Receivers are valid.", receivers = receivers.len());
    }
    exitcode::OK
}

fn receiver_line(name: &str, monitor_type: &str, opts: &ValidateOpts) -> String {
    if opts.no_validate {
        format!("- {name} ({monitor_type})")
    } else {
        format!("√ {name} ({monitor_type})")
    }
}

pub fn load_configs(
    config_paths: &[ConfigPath],
    catalog: &MonitorCatalog,
) -> Result<Receivers, ExitCode> {
    let config_paths = config::process_paths(config_paths);
    let paths = config_paths
        .iter()
        .map(<&PathBuf>::from)
        .collect::<Vec<_>>();
    info!(message = "Loading configs.", paths = ?paths);

    config::load_from_paths(&config_paths, catalog).map_err(|error| {
        error!(message = "Configuration error.", %error);
        exitcode::CONFIG
    })
}

fn list_types(catalog: &MonitorCatalog, opts: &ListTypesOpts) -> ExitCode {
    let descriptors = catalog
        .monitor_types()
        .filter_map(|monitor_type| catalog.lookup(monitor_type));

    let output = if opts.json {
        let types = descriptors
            .map(|descriptor| {
                serde_json::json!({
                    "type": descriptor.monitor_type(),
                    "schema": descriptor.schema_name(),
                    "endpoint": {
                        "host": descriptor.supports_endpoint_host(),
                        "port": descriptor.supports_endpoint_port(),
                    },
                    "fields": descriptor
                        .fields()
                        .iter()
                        .map(|field| serde_json::json!({ "key": field.key, "required": field.required }))
                        .collect::<Vec<_>>(),
                })
            })
            .collect::<Vec<_>>();
        match serde_json::to_string_pretty(&types) {
            Ok(json) => json,
            Err(error) => {
                error!(message = "Failed to render catalog.", %error);
                return exitcode::SOFTWARE;
            }
        }
    } else {
        descriptors
            .map(|descriptor| {
                let fields = descriptor
                    .fields()
                    .iter()
                    .map(|field| {
                        if field.required {
                            format!("{}*", field.key)
                        } else {
                            field.key.to_owned()
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "{} ({}): {}",
                    descriptor.monitor_type(),
                    descriptor.schema_name(),
                    fields
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    match writeln!(std::io::stdout(), "{output}") {
        Ok(()) => exitcode::OK,
        Err(_) => exitcode::IOERR,
    }
}

fn get_log_levels(default: &str) -> String {
    std::env::var("SMARTAGENT_LOG").unwrap_or_else(|_| default.into())
}

pub fn init_logging(color: bool, format: LogFormat, log_level: &str) {
    let level = get_log_levels(log_level);
    let json = match format {
        LogFormat::Text => false,
        LogFormat::Json => true,
    };

    trace::init(color, json, &level);
    debug!(message = "Log level is enabled.", level = ?level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_mark_only_after_validation() {
        assert_eq!(
            receiver_line("smartagent/redis", "collectd/redis", &ValidateOpts::default()),
            "√ smartagent/redis (collectd/redis)"
        );
        assert_eq!(
            receiver_line(
                "smartagent/redis",
                "collectd/redis",
                &ValidateOpts { no_validate: true }
            ),
            "- smartagent/redis (collectd/redis)"
        );
    }
}
