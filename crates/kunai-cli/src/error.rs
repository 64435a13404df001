use std::path::PathBuf;

use thiserror::Error;

/// Command line errors. All of them are input errors.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: {source}")]
    Document {
        path: PathBuf,
        #[source]
        source: kunai_scheduling::error::SchedulingError,
    },
}

pub type CliResult<T> = std::result::Result<T, CliError>;
