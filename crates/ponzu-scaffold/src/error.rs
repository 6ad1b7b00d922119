//! Error types for the bootstrap and build pipeline

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by the bootstrap and build operations.
///
/// A declined overwrite prompt is not an error; see
/// [`Bootstrap::Aborted`](crate::pipeline::Bootstrap::Aborted).
#[derive(Debug, Error)]
pub enum Error {
    /// The workspace root was empty or unset
    #[error("workspace root is not configured (set {0} or pass --gopath)")]
    MissingWorkspaceRoot(&'static str),

    /// A project path tried to leave the workspace or named `<root>/src` itself
    #[error("project path '{0}' must name a directory below the workspace src dir, without '..'")]
    InvalidProjectPath(PathBuf),

    /// A repository identity did not form a clone URL
    #[error("invalid remote URL '{url}': {source}")]
    InvalidRemote {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Directory creation, removal, rename or copy failure
    #[error("failed to {op} {}: {source}", path.display())]
    Filesystem {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading the overwrite confirmation failed
    #[error("failed to read confirmation: {0}")]
    Prompt(#[source] io::Error),

    /// Every clone attempt in the fetch plan failed
    #[error("failed to clone files from {}.\n{reason}", attempted.join(" and "))]
    Fetch {
        attempted: Vec<String>,
        reason: String,
    },

    /// User content collides with protected framework files
    #[error("Ponzu has very few internal conflicts, sorry for the inconvenience. Rename: {}", files.join(", "))]
    Conflict { files: Vec<String> },

    /// The toolchain exited non-zero or could not be started
    #[error("Ponzu build step failed. Please try again.\n{0}")]
    Build(String),
}

impl Error {
    /// Wrap an io error with the operation and path that produced it
    pub fn fs(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Filesystem {
            op,
            path: path.into(),
            source,
        }
    }
}
