//! Error types shared by expansion, interpretation and the SVG pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Every failure the crate can report.
///
/// Nothing is retried or recovered internally; errors travel to the caller with `?`.
#[derive(Debug, Error)]
pub enum Error {
    /// An argument outside its valid domain, e.g. a negative iteration count.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A configuration value that parsed but makes no sense.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Malformed JSON, or an action object with missing/mistyped fields.
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// A `Pop` without a matching `Push`.
    #[error("pop command '{symbol}' encountered with empty stack")]
    StackUnderflow { symbol: char },

    /// Nothing drawable remains, or the bounds collapse to zero area.
    #[error("{0}")]
    Geometry(String),

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit status for the command-line front end.
    ///
    /// Each error family gets its own non-zero code.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidArgument(_) | Self::InvalidConfiguration(_) | Self::Json(_) => 2,
            Self::StackUnderflow { .. } => 3,
            Self::Geometry(_) => 4,
            Self::Io { .. } => 5,
        }
    }
}
