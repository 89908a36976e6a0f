//! Error types for singlefile-rs.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using SingleFileError.
pub type SingleFileResult<T> = Result<T, SingleFileError>;

/// Errors that abort a packaging run. None of them are retried.
#[derive(Debug, Error)]
pub enum SingleFileError {
    /// Invalid or contradictory run configuration.
    #[error("{0}")]
    Configuration(String),

    /// Input file is not located under the root directory.
    #[error("Input file '{}' is not located under root '{}'", .path.display(), .root.display())]
    OutsideRoot { path: PathBuf, root: PathBuf },

    /// Input could not be read or output could not be written.
    #[error("Failed to access '{}'", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Host document has no `</head>` marker to inject the import map before.
    #[error("Host document '{}' has no </head> marker", .path.display())]
    MalformedHostDocument { path: PathBuf },
}

impl SingleFileError {
    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SingleFileError::FileAccess {
            path: path.into(),
            source,
        }
    }

    /// True for errors that are detected before any input is read.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SingleFileError::Configuration(_) | SingleFileError::OutsideRoot { .. }
        )
    }
}
