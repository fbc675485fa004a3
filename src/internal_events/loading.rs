use std::path::Path;

use metrics::counter;

use crate::internal_event::{error_stage, InternalEvent};

#[derive(Debug)]
pub struct ConfigFileLoaded<'a> {
    pub path: &'a Path,
    pub receivers: usize,
}

impl InternalEvent for ConfigFileLoaded<'_> {
    fn emit(self) {
        info!(
            message = "Loaded configuration file.",
            path = ?self.path,
            receivers = self.receivers,
        );
        counter!("config_files_loaded_total").increment(1);
    }
}

#[derive(Debug)]
pub struct ConfigFileError<'a, E> {
    pub path: &'a Path,
    pub error: &'a E,
    pub error_type: &'static str,
}

impl<E: std::fmt::Display> InternalEvent for ConfigFileError<'_, E> {
    fn emit(self) {
        error!(
            message = "Failed loading configuration file.",
            path = ?self.path,
            error = %self.error,
            error_type = self.error_type,
            stage = error_stage::PROCESSING,
        );
        counter!(
            "component_errors_total",
            "error_type" => self.error_type,
            "stage" => error_stage::PROCESSING,
        )
        .increment(1);
    }
}

/// Entries of the `receivers` table that belong to another receiver family.
#[derive(Debug)]
pub struct ForeignReceiverSkipped<'a> {
    pub name: &'a str,
}

impl InternalEvent for ForeignReceiverSkipped<'_> {
    fn emit(self) {
        trace!(message = "Skipping receiver of another family.", receiver = %self.name);
    }
}
