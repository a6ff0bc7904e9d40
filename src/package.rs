use crate::{
    error::{Error, Result},
    state::State,
};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tracing::debug;
use walkdir::WalkDir;

/// A file inside a package, together with its reconciliation state.
///
/// `state` is decided once when the file is discovered and stays fixed for the
/// rest of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageFile {
    path: PathBuf,
    fingerprint: String,
    state: State,
}

impl PackageFile {
    pub fn new(path: PathBuf, fingerprint: String, state: State) -> Self {
        Self {
            path,
            fingerprint,
            state,
        }
    }

    /// Path relative to the package directory, and to the target root.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// The relative path with `/` separators on every platform.
    pub fn display_path(&self) -> String {
        self.path
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// A named directory of dotfiles directly below the source root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    name: String,
    files: Vec<PackageFile>,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Files in discovery order.
    pub fn files(&self) -> &[PackageFile] {
        &self.files
    }

    pub fn add_file(&mut self, file: PackageFile) {
        self.files.push(file);
    }

    /// Directory holding this package's files under `source_root`.
    pub fn root(&self, source_root: &Path) -> PathBuf {
        source_root.join(&self.name)
    }
}

/// Returns one empty [`Package`] per directory directly below `source_root`.
///
/// Plain files and symlinks at the top level are ignored. Packages are sorted
/// by name.
///
/// # Errors
///
/// Returns [`Error::Discovery`] when `source_root` or one of its entries
/// cannot be read, or when a package name is not valid UTF-8.
pub fn list_packages<P>(source_root: P) -> Result<Vec<Package>>
where
    P: AsRef<Path>,
{
    let source_root = source_root.as_ref();
    let entries = fs::read_dir(source_root).map_err(|e| Error::discovery(source_root, e))?;

    let mut packages = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::discovery(source_root, e))?;
        let file_type = entry
            .file_type()
            .map_err(|e| Error::discovery(entry.path(), e))?;

        if !file_type.is_dir() {
            debug!(path = %entry.path().display(), "skipping non-directory entry");
            continue;
        }

        let name = entry.file_name().into_string().map_err(|_| {
            Error::discovery(
                entry.path(),
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    "package name is not valid UTF-8",
                ),
            )
        })?;
        packages.push(Package::new(name));
    }

    packages.sort_by(|a, b| a.name.cmp(&b.name));
    debug!(count = packages.len(), root = %source_root.display(), "discovered packages");

    Ok(packages)
}

/// Returns every non-directory entry below `package_root`, relative to it.
///
/// The walk descends into nested directories to any depth and visits the
/// entries of each directory sorted by file name. Symlinks are not followed.
///
/// # Errors
///
/// Returns [`Error::Discovery`] on the first entry that cannot be read.
///
/// # Example
///
/// ```rust,no_run
/// use conjure_dotfiles::package::list_files;
///
/// for path in list_files("dotfiles/zsh")? {
///     println!("{}", path.display());
/// }
/// # Ok::<(), conjure_dotfiles::Error>(())
/// ```
pub fn list_files<P>(package_root: P) -> Result<Vec<PathBuf>>
where
    P: AsRef<Path>,
{
    let package_root = package_root.as_ref();
    let mut files = Vec::new();

    for entry in WalkDir::new(package_root).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(package_root).to_path_buf();
            Error::discovery(path, e.into())
        })?;

        if entry.file_type().is_dir() {
            continue;
        }

        let relative = entry.path().strip_prefix(package_root).map_err(|_| {
            Error::discovery(
                entry.path(),
                io::Error::new(io::ErrorKind::InvalidInput, "entry is outside the package"),
            )
        })?;
        files.push(relative.to_path_buf());
    }

    Ok(files)
}
