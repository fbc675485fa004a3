mod loader;

use std::{
    collections::HashMap,
    fs, io,
    io::Read,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use serde::Deserialize;
use serde_yaml::Value;
use snafu::{ResultExt, Snafu};

use self::loader::process::Process;
pub(crate) use self::loader::Loader;
use super::{vars::interpolate, ConfigPath, Format, FormatHint};
use crate::{
    internal_event::error_type,
    internal_events::{ConfigFileError, ConfigFileLoaded, ForeignReceiverSkipped},
    monitors::MonitorCatalog,
    receiver::{is_smartagent_receiver, ReceiverError, Receivers},
};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum LoadError {
    #[snafu(display("could not read {}: {}", path.display(), source))]
    Read { path: PathBuf, source: io::Error },

    #[snafu(display("could not read configuration input: {}", source))]
    ReadInput { source: io::Error },

    #[snafu(display("failed to interpolate environment variables: {}", errors.join("; ")))]
    Interpolate { errors: Vec<String> },

    #[snafu(display("failed to parse configuration: {}", errors.join("; ")))]
    Parse { errors: Vec<String> },

    #[snafu(display("duplicate receiver name found: {}", name))]
    DuplicateReceiver { name: String },

    #[snafu(display("{}", source))]
    Receiver { source: ReceiverError },
}

impl LoadError {
    const fn error_type(&self) -> &'static str {
        match self {
            Self::Read { .. } | Self::ReadInput { .. } => error_type::READER_FAILED,
            Self::Interpolate { .. } | Self::Parse { .. } => error_type::PARSER_FAILED,
            Self::DuplicateReceiver { .. } | Self::Receiver { .. } => {
                error_type::CONFIGURATION_FAILED
            }
        }
    }
}

/// The part of a configuration document this crate reads. Other top level sections are
/// ignored.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ReceiversDocument {
    #[serde(default)]
    receivers: Option<IndexMap<String, Value>>,
}

/// Collects the `smartagent` entries of every `receivers` table it is fed.
#[derive(Debug, Default)]
pub(crate) struct ReceiversLoader {
    receivers: IndexMap<String, Value>,
    vars: HashMap<String, String>,
}

impl ReceiversLoader {
    /// A loader interpolating the process environment.
    pub(crate) fn new() -> Self {
        Self::with_vars(environment())
    }

    pub(crate) fn with_vars(vars: HashMap<String, String>) -> Self {
        Self {
            receivers: IndexMap::new(),
            vars,
        }
    }
}

impl Process for ReceiversLoader {
    fn prepare<R: Read>(&mut self, input: R) -> Result<String, LoadError> {
        prepare_input(input, &self.vars)
    }

    fn merge(&mut self, document: ReceiversDocument) -> Result<usize, LoadError> {
        let mut added = 0;
        for (name, body) in document.receivers.unwrap_or_default() {
            if !is_smartagent_receiver(&name) {
                emit!(ForeignReceiverSkipped { name: &name });
                continue;
            }
            if self.receivers.contains_key(&name) {
                return Err(LoadError::DuplicateReceiver { name });
            }
            self.receivers.insert(name, body);
            added += 1;
        }
        Ok(added)
    }
}

impl Loader<IndexMap<String, Value>> for ReceiversLoader {
    fn take(self) -> IndexMap<String, Value> {
        self.receivers
    }
}

fn environment() -> HashMap<String, String> {
    let mut vars = std::env::vars().collect::<HashMap<_, _>>();
    if !vars.contains_key("HOSTNAME") {
        if let Ok(hostname) = crate::get_hostname() {
            vars.insert("HOSTNAME".into(), hostname);
        }
    }
    vars
}

/// Reads `input` and interpolates `vars` into it.
fn prepare_input<R: Read>(
    mut input: R,
    vars: &HashMap<String, String>,
) -> Result<String, LoadError> {
    let mut source = String::new();
    input.read_to_string(&mut source).context(ReadInputSnafu)?;
    interpolate(&source, vars).map_err(|errors| LoadError::Interpolate { errors })
}

#[cfg(not(windows))]
fn default_path() -> PathBuf {
    "/etc/smartagent/receivers.yaml".into()
}

#[cfg(windows)]
fn default_path() -> PathBuf {
    let program_files = std::env::var("ProgramFiles").unwrap_or_else(|_| "C:\\Program Files".into());
    PathBuf::from(program_files).join("smartagent\\receivers.yaml")
}

/// Merge the paths coming from different cli flags with different formats into
/// a unified list of paths with formats.
pub fn merge_path_lists(
    path_lists: Vec<(&[PathBuf], FormatHint)>,
) -> impl Iterator<Item = (PathBuf, FormatHint)> + '_ {
    path_lists
        .into_iter()
        .flat_map(|(paths, format)| paths.iter().cloned().map(move |path| (path, format)))
}

/// The given paths, or the default configuration file when there are none.
pub fn process_paths(config_paths: &[ConfigPath]) -> Vec<ConfigPath> {
    if config_paths.is_empty() {
        vec![ConfigPath::File(default_path(), Some(Format::Yaml))]
    } else {
        config_paths.to_vec()
    }
}

fn config_files_in(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let mut files = fs::read_dir(dir)
        .context(ReadSnafu { path: dir })?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()
        .context(ReadSnafu { path: dir })?;
    files.retain(|path| path.is_file() && Format::from_path(path).is_ok());
    files.sort();
    Ok(files)
}

fn load_path<T, L: Loader<T>>(
    loader: &mut L,
    path: &Path,
    format_hint: FormatHint,
) -> Result<(), LoadError> {
    let format = format_hint
        .or_else(|| Format::from_path(path).ok())
        .unwrap_or_default();

    match loader.load_from_file(path, format) {
        Ok(receivers) => {
            emit!(ConfigFileLoaded { path, receivers });
            Ok(())
        }
        Err(error) => {
            emit!(ConfigFileError {
                path,
                error: &error,
                error_type: error.error_type(),
            });
            Err(error)
        }
    }
}

fn loader_from_paths<T, L: Loader<T>>(
    mut loader: L,
    config_paths: &[ConfigPath],
) -> Result<T, LoadError> {
    for config_path in config_paths {
        match config_path {
            ConfigPath::File(path, format_hint) => load_path(&mut loader, path, *format_hint)?,
            ConfigPath::Dir(dir) => {
                for path in config_files_in(dir)? {
                    load_path(&mut loader, &path, None)?;
                }
            }
        }
    }
    Ok(loader.take())
}

/// Loads and binds the `smartagent` receivers declared across `config_paths`.
///
/// Receiver names must be unique across all files. The result is not validated yet, see
/// [`Receivers::validate`].
pub fn load_from_paths(
    config_paths: &[ConfigPath],
    catalog: &MonitorCatalog,
) -> Result<Receivers, LoadError> {
    let entries = loader_from_paths(ReceiversLoader::new(), config_paths)?;
    Receivers::from_generic(entries, catalog).context(ReceiverSnafu)
}

/// Loads and binds the `smartagent` receivers of a single document.
pub fn load_from_str(
    input: &str,
    format: Format,
    catalog: &MonitorCatalog,
) -> Result<Receivers, LoadError> {
    let mut loader = ReceiversLoader::new();
    loader.load_from_str(input, format)?;
    Receivers::from_generic(loader.take(), catalog).context(ReceiverSnafu)
}
