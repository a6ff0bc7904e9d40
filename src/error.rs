use std::{io, path::PathBuf};
use thiserror::Error;

/// Errors raised while discovering, classifying or reconciling packages.
///
/// Every variant is fatal: the first one to occur aborts the running command.
/// The command layer wraps these in [`anyhow::Error`] to add the phase that
/// failed before they reach `main`.
#[derive(Error, Debug)]
pub enum Error {
    /// A read, write, delete or stat call failed on a concrete path.
    #[error("error {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        source: io::Error,
    },

    /// The source root or one of its packages could not be enumerated.
    #[error("cannot list {}: {source}", .path.display())]
    Discovery { path: PathBuf, source: io::Error },

    /// Unknown subcommand or malformed flags.
    #[error("{0}")]
    Argument(#[from] clap::Error),

    /// The config file exists but is not valid RON.
    #[error("failed to parse config file {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        source: ron::error::SpannedError,
    },

    #[error("unable to determine the home directory")]
    HomeDirectory,

    /// Writing progress or report lines to the output stream failed.
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
}

impl Error {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            action,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn discovery(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Discovery {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
