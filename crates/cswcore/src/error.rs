//! Typed failure kinds for instance and configuration operations.
//!
//! Every filesystem failure is wrapped with the operation and path it
//! concerns, so callers can show a diagnosable message without retrying.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("instance name cannot be empty")]
    EmptyName,

    #[error("instance '{0}' already exists")]
    AlreadyExists(String),

    #[error("instance '{0}' does not exist")]
    NotFound(String),

    #[error("cannot delete active instance '{0}'; switch to another instance first")]
    ActiveInstance(String),

    /// A step of the activation swap failed. The swap is not transactional:
    /// a failure after the displace-to-backup step leaves no live directory,
    /// and retrying the same switch completes it.
    #[error("switch failed while {step}: {source}")]
    SwitchFailed {
        step: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("could not determine the user home directory")]
    HomeResolution,

    #[error("config {op} failed for {path:?}: {source}")]
    ConfigIo {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unknown config key: {0}")]
    UnknownConfigKey(String),

    #[error("failed to {op} {path:?}: {source}")]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            op,
            path: path.into(),
            source,
        }
    }
}
