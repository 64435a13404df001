use thiserror::Error;

/// Scheduling layer errors
#[derive(Error, Debug)]
pub enum SchedulingError {
    #[error(transparent)]
    RfcError(#[from] kunai_rfc::error::RfcError),

    #[error(transparent)]
    CoreError(#[from] kunai_core::error::CoreError),

    #[error("Invalid scheduling document: {0}")]
    InvalidDocument(String),
}

impl From<kunai_rfc::rfc::ical::ParseError> for SchedulingError {
    fn from(err: kunai_rfc::rfc::ical::ParseError) -> Self {
        Self::RfcError(err.into())
    }
}

pub type SchedulingResult<T> = std::result::Result<T, SchedulingError>;
