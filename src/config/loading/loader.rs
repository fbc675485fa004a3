use std::{fs::File, path::Path};

use snafu::ResultExt;

use super::{LoadError, ReadSnafu, ReceiversDocument};
use crate::config::{format, Format};

// The loader traits are split in two: an internal `process` mod with the reading and merging
// steps implementors provide, and the `Loader<T>` trait through which callers feed inputs in
// and `take` the merged result out.
pub(super) mod process {
    use std::io::Read;

    use super::*;

    pub trait Process {
        /// Turns raw input into the text to deserialize, typically interpolating environment
        /// variables.
        fn prepare<R: Read>(&mut self, input: R) -> Result<String, LoadError>;

        /// Prepares and deserializes one document.
        fn load<R: Read>(&mut self, input: R, format: Format) -> Result<ReceiversDocument, LoadError> {
            let prepared = self.prepare(input)?;
            format::deserialize(&prepared, format).map_err(|errors| LoadError::Parse { errors })
        }

        fn load_file(&mut self, path: &Path, format: Format) -> Result<ReceiversDocument, LoadError> {
            let file = File::open(path).context(ReadSnafu { path })?;
            self.load(file, format)
        }

        /// Folds one document into the accumulated state, returning how many entries it added.
        fn merge(&mut self, document: ReceiversDocument) -> Result<usize, LoadError>;
    }
}

/// Accumulates documents from any number of inputs, then hands out the merged `T`.
pub trait Loader<T>: process::Process {
    fn take(self) -> T;

    fn load_from_file(&mut self, path: &Path, format: Format) -> Result<usize, LoadError> {
        let document = self.load_file(path, format)?;
        self.merge(document)
    }

    fn load_from_str(&mut self, input: &str, format: Format) -> Result<usize, LoadError> {
        let document = self.load(input.as_bytes(), format)?;
        self.merge(document)
    }
}
