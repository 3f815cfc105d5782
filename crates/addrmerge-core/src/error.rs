//! Ingest error types.
//!
//! Every variant names the file it concerns. A run either produces the full
//! record list or stops at the first of these.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum IngestError {
    /// An input path does not exist or is not a regular file.
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The file could not be opened or read (including invalid UTF-8).
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The XML input is not well-formed.
    #[error("error parsing XML file {}: {message}", path.display())]
    Markup { path: PathBuf, message: String },

    /// The TSV reader failed part-way through the file.
    #[error("error parsing TSV file {}: {source}", path.display())]
    Tabular {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The TSV file has no content at all, not even a header.
    #[error("empty TSV file {}", path.display())]
    EmptyFile { path: PathBuf },

    /// No parser is registered for the file's extension.
    #[error("unsupported file extension {extension:?} for {} (expected .xml, .tsv or .txt)", path.display())]
    UnsupportedExtension { path: PathBuf, extension: String },

    #[error("cannot serialise records: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The combined output could not be written.
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IngestError {
    /// Creates a markup error for `path`.
    pub fn markup(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Markup {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a read error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The file this error concerns, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::NotFound { path }
            | Self::Io { path, .. }
            | Self::Markup { path, .. }
            | Self::Tabular { path, .. }
            | Self::EmptyFile { path }
            | Self::UnsupportedExtension { path, .. }
            | Self::Write { path, .. } => Some(path),
            Self::Serialize(_) => None,
        }
    }
}
