use std::path::PathBuf;

use smartagent_receiver::{
    config::{load_from_paths, ConfigPath, LoadError},
    monitors::MonitorCatalog,
    receiver::Receivers,
};

mod loading;
mod receivers;
mod validation;

pub fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

pub fn load(name: &str) -> Result<Receivers, LoadError> {
    load_from_paths(
        &[ConfigPath::File(data_path(name), None)],
        &MonitorCatalog::builtin(),
    )
}
