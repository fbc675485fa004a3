//! Structured log and metric events emitted by this crate.

/// An event that reports itself to the logging and metrics pipelines.
pub trait InternalEvent: Sized {
    fn emit(self);

    fn name(&self) -> Option<&'static str> {
        None
    }
}

pub fn emit(event: impl InternalEvent) {
    event.emit();
}

#[macro_export]
macro_rules! emit {
    ($event:expr) => {
        $crate::internal_event::emit($event)
    };
}

pub mod error_type {
    /// The configuration of a component failed to bind or validate.
    pub const CONFIGURATION_FAILED: &str = "configuration_failed";
    /// A configuration file could not be read.
    pub const READER_FAILED: &str = "reader_failed";
    /// A configuration document could not be parsed.
    pub const PARSER_FAILED: &str = "parser_failed";
}

pub mod error_stage {
    pub const PROCESSING: &str = "processing";
    pub const VALIDATION: &str = "validation";
}
