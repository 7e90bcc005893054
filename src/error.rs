//! Error types for toaseries

use thiserror::Error;

/// Errors that can occur while converting TOAs into a time series.
///
/// Every variant is fatal: the conversion is a one-shot batch run with no
/// transient dependency, so nothing is retried. Per-line parse failures in
/// text TOA input are not errors; they are skipped and tallied in the
/// conversion report.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// A source, sink, or descriptor file could not be opened.
    #[error("cannot open '{path}': {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Binary TOA data does not match the layout implied by its length.
    #[error("malformed binary TOA data: {0}")]
    Format(String),

    /// The merged series parameters are missing or invalid.
    #[error("invalid series configuration: {0}")]
    Config(String),

    /// An I/O failure while reading or writing an already-open stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    /// Stable machine-readable code for diagnostics.
    pub fn code(&self) -> &'static str {
        match self {
            ConvertError::File { .. } => "FILE_ERROR",
            ConvertError::Format(_) => "FORMAT_ERROR",
            ConvertError::Config(_) => "CONFIG_ERROR",
            ConvertError::Io(_) => "IO_ERROR",
        }
    }
}
