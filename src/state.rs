use crate::{error::Result, hasher};
use std::{fmt, fs, io, path::Path};
use tracing::{debug, warn};

/// Reconciliation state of a single package file against the target root.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum State {
    /// No file exists at the target location.
    Absent,
    /// The target file has the same content as the source.
    Present,
    /// A target file exists but its content differs from the source.
    Mismatch,
}

impl State {
    /// Whether `conjure` has to copy the source file over the target.
    pub fn needs_install(self) -> bool {
        matches!(self, State::Absent | State::Mismatch)
    }

    /// Whether `expel` may delete the target file.
    pub fn is_removable(self) -> bool {
        self == State::Present
    }

    pub fn as_str(self) -> &'static str {
        match self {
            State::Absent => "ABSENT",
            State::Present => "PRESENT",
            State::Mismatch => "MISMATCH",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Determines the state of `relative_path` under `target_root`.
///
/// The file is [`State::Absent`] when nothing exists at the target location,
/// [`State::Present`] when its fingerprint equals `source_fingerprint` and
/// [`State::Mismatch`] otherwise.
///
/// A failed stat whose cause is anything other than "not found" counts as an
/// existing file. The target is then read, so an unreadable target surfaces
/// as an error instead of being reported absent.
///
/// # Errors
///
/// Returns [`crate::Error::Io`] when an existing target file cannot be read.
pub fn classify(
    relative_path: &Path,
    source_fingerprint: &str,
    target_root: &Path,
) -> Result<State> {
    let target_path = target_root.join(relative_path);

    if !target_exists(&target_path) {
        debug!(path = %target_path.display(), "target absent");
        return Ok(State::Absent);
    }

    let target_fingerprint = hasher::file_fingerprint(&target_path)?;
    let state = if target_fingerprint == source_fingerprint {
        State::Present
    } else {
        State::Mismatch
    };

    debug!(path = %target_path.display(), %state, "classified target");
    Ok(state)
}

fn target_exists(path: &Path) -> bool {
    match fs::metadata(path) {
        Ok(_) => true,
        Err(e) if e.kind() == io::ErrorKind::NotFound => false,
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "cannot stat target, treating it as existing"
            );
            true
        }
    }
}
