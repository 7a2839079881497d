//! Error types for classcarve

use std::io;
use std::path::PathBuf;

/// Result type for classcarve operations.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Fatal errors that abort an extraction run.
///
/// A fragment that does not start with the marker is not an error; it is
/// reported as a skipped entry in the extraction plan.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// Input file missing or unreadable
    #[error("Failed to read input file {path:?}: {source}")]
    InputRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Archive could not be created or written
    #[error("Failed to write archive {path:?}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Zip layer failure while writing the archive
    #[error("Failed to write archive {path:?}: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// Manifest attribute rejected before writing
    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),
}

impl ExtractError {
    pub(crate) fn input_read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::InputRead {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn output_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::OutputWrite {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn archive(path: impl Into<PathBuf>, source: zip::result::ZipError) -> Self {
        Self::Archive {
            path: path.into(),
            source,
        }
    }

    /// Whether the failure happened while producing the archive.
    pub fn is_output_error(&self) -> bool {
        matches!(self, Self::OutputWrite { .. } | Self::Archive { .. })
    }
}
