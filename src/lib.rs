//! Install, remove and inspect dotfile packages.
//!
//! A package is a directory below the source root whose files mirror their
//! location under the target root. Every run fingerprints each package file,
//! classifies the installed copy as absent, present or mismatched, and then
//! conjures (installs), expels (removes) or peers at (reports) the packages.

/// Provides the command-line interface definition.
pub mod args;
/// Provides the entry point that wires configuration, reconciliation and operations.
pub mod commands;
/// Provides the RON config file and resolution of the source and target roots.
pub mod config;
/// Provides the error type shared by every module.
pub mod error;
/// Provides `~` expansion for configured paths.
pub mod fixpath;
/// Provides content fingerprints used to compare source and target files.
pub mod hasher;
/// Provides the `tracing` subscriber setup.
pub mod logging;
/// Provides the conjure, expel and peer operations.
pub mod ops;
/// Provides package discovery below the source root.
pub mod package;
/// Provides assembly of the reconciliation model.
pub mod reconcile;
/// Provides the per-file state classifier.
pub mod state;

pub use config::Options;
pub use error::{Error, Result};
pub use package::{Package, PackageFile};
pub use state::State;
