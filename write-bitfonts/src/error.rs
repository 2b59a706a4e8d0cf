//! Errors that occur during compilation

use bitfont_types::ScalarError;

use crate::validate::ValidationReport;

/// An error occured while writing a font
#[derive(Debug, Clone)]
pub enum Error {
    ValidationFailed(ValidationReport),
    /// A value could not be encoded into its field.
    EncodingFailed {
        field: &'static str,
        inner: ScalarError,
    },
}

impl From<ValidationReport> for Error {
    fn from(src: ValidationReport) -> Error {
        Error::ValidationFailed(src)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ValidationFailed(report) => report.fmt(f),
            Error::EncodingFailed { field, inner } => {
                write!(f, "failed to encode '{field}': {inner}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ValidationFailed(report) => Some(report),
            Error::EncodingFailed { inner, .. } => Some(inner),
        }
    }
}
