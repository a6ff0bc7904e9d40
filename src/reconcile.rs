use crate::{
    hasher,
    package::{self, Package, PackageFile},
    state,
};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

/// Builds the reconciliation model for every package below `source_root`.
///
/// Each source file is fingerprinted and classified against `target_root`
/// in discovery order. The result is the same whichever command runs next.
///
/// # Errors
///
/// Fails on the first package that cannot be listed, source file that cannot
/// be read, or target file whose state cannot be determined. The error
/// context names the phase that failed.
pub fn assemble(source_root: &Path, target_root: &Path) -> Result<Vec<Package>> {
    let mut packages = package::list_packages(source_root)
        .with_context(|| format!("Error reading directory {}", source_root.display()))?;

    for pkg in packages.iter_mut() {
        let package_root = pkg.root(source_root);
        let paths = package::list_files(&package_root)
            .with_context(|| format!("Error listing files of package \"{}\"", pkg.name()))?;

        for path in paths {
            let fingerprint = hasher::file_fingerprint(package_root.join(&path))
                .with_context(|| format!("Error reading source of package \"{}\"", pkg.name()))?;

            let state = state::classify(&path, &fingerprint, target_root).with_context(|| {
                format!(
                    "Error determining current state of file {} in package \"{}\"",
                    path.display(),
                    pkg.name()
                )
            })?;

            pkg.add_file(PackageFile::new(path, fingerprint, state));
        }

        debug!(package = pkg.name(), files = pkg.files().len(), "reconciled package");
    }

    Ok(packages)
}
