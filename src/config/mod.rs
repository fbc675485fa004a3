//! Reading receiver configurations from files.

use std::path::PathBuf;

pub mod format;
mod loading;
pub mod vars;

pub use self::{
    format::{Format, FormatHint},
    loading::{
        load_from_paths, load_from_str, merge_path_lists, process_paths, LoadError,
    },
};

/// A configuration source: a single file (with an optional format override) or a directory
/// whose `.yaml`, `.yml`, `.toml` and `.json` files are all read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigPath {
    File(PathBuf, FormatHint),
    Dir(PathBuf),
}

impl<'a> From<&'a ConfigPath> for &'a PathBuf {
    fn from(config_path: &'a ConfigPath) -> &'a PathBuf {
        match config_path {
            ConfigPath::File(path, _) => path,
            ConfigPath::Dir(path) => path,
        }
    }
}
