//! Error types for the packaging run

use std::path::PathBuf;

use thiserror::Error;

use crate::arch::Arch;

/// Result type alias for packaging operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Every failure is fatal to the run and ends up in `main`.
#[derive(Error, Debug)]
pub enum Error {
    /// The release API was unreachable or returned something unusable.
    #[error("release API error: {message}")]
    Api { message: String },

    /// No release in the scanned window ships server binaries.
    #[error("no recent release of {repo} found with florida-server assets (scanned {scanned})")]
    NotFound { repo: String, scanned: usize },

    /// A server binary could not be downloaded.
    #[error("error downloading {arch}: {cause}")]
    Download {
        arch: Arch,
        #[source]
        cause: DownloadFailure,
    },

    /// A local output file could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a single architecture download failed.
#[derive(Error, Debug)]
pub enum DownloadFailure {
    #[error("HTTP {status} {body}")]
    Status { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(String),
}

impl Error {
    pub(crate) fn api(message: impl Into<String>) -> Self {
        Error::Api {
            message: message.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
