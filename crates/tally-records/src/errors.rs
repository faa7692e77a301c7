use std::io;
use std::path::Path;
use thiserror::Error;

pub type RecordsResult<T> = Result<T, RecordsError>;

/// Source-level failures. Per-line problems are never reported here; they
/// travel as [`crate::Diagnostic`] values alongside a successful aggregation.
#[derive(Error, Debug)]
pub enum RecordsError {
    #[error("The file \"{0}\" does not exist.")]
    SourceNotFound(String),

    #[error("You do not have permission to access \"{0}\" file.")]
    SourceAccessDenied(String),

    #[error("Expected a file, but found a \"{0}\" directory.")]
    SourceIsNotAFile(String),

    #[error("OS error occurred: {source}")]
    SourceIo {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("The file \"{0}\" is empty.")]
    SourceEmpty(String),

    #[error("The salary total of \"{0}\" exceeds the supported range.")]
    TotalOverflow(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl RecordsError {
    /// Classify an I/O failure raised while opening or reading a source.
    pub fn from_source_io(path: &Path, err: io::Error) -> Self {
        let name = path.display().to_string();
        match err.kind() {
            io::ErrorKind::NotFound => RecordsError::SourceNotFound(name),
            io::ErrorKind::PermissionDenied => RecordsError::SourceAccessDenied(name),
            _ => RecordsError::SourceIo { name, source: err },
        }
    }

    /// True for the failures that abort a run without any result.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, RecordsError::SourceEmpty(_))
    }
}
