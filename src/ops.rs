use crate::{
    config::Options,
    error::{Error, Result},
    package::{Package, PackageFile},
};
use std::{fs, io::Write, path::Path};
use tracing::info;

/// Installs every absent or mismatched file into the target root.
///
/// A heading is written for each package before its files are processed.
/// Files already present are left alone, which makes repeated runs no-ops.
/// The first failing copy aborts the run and files copied before it stay in
/// place.
///
/// # Errors
///
/// Returns [`Error::Io`] naming the path that could not be read, created or
/// written, or [`Error::Output`] if `out` fails.
pub fn conjure<W>(packages: &[Package], options: &Options, out: &mut W) -> Result<()>
where
    W: Write,
{
    for pkg in packages {
        writeln!(out, ".:. Conjuring {}", pkg.name()).map_err(Error::Output)?;

        let package_root = pkg.root(&options.source);
        for file in pkg.files().iter().filter(|f| f.state().needs_install()) {
            copy_file(file, &package_root, &options.target)?;
        }
    }

    Ok(())
}

/// Deletes every target file whose content matches its source exactly.
///
/// Absent and mismatched files are never touched, so local edits to an
/// installed dotfile survive. The first failing delete aborts the run.
///
/// # Errors
///
/// Returns [`Error::Io`] for the file that could not be removed, or
/// [`Error::Output`] if `out` fails.
pub fn expel<W>(packages: &[Package], options: &Options, out: &mut W) -> Result<()>
where
    W: Write,
{
    for pkg in packages {
        writeln!(out, ".:. Expelling {}", pkg.name()).map_err(Error::Output)?;

        for file in pkg.files().iter().filter(|f| f.state().is_removable()) {
            remove_file(file, &options.target)?;
        }
    }

    Ok(())
}

/// Writes the state of every file of every package to `out`.
///
/// ```text
/// .:. Peering Packages
///   test-pkg
///     (ABSENT) .local/share/testfile
///     (PRESENT) .testpkgrc
/// ```
pub fn peer<W>(packages: &[Package], out: &mut W) -> Result<()>
where
    W: Write,
{
    writeln!(out, ".:. Peering Packages").map_err(Error::Output)?;
    for pkg in packages {
        writeln!(out, "  {}", pkg.name()).map_err(Error::Output)?;
        for file in pkg.files() {
            writeln!(out, "    ({}) {}", file.state(), file.display_path())
                .map_err(Error::Output)?;
        }
    }

    Ok(())
}

fn copy_file(file: &PackageFile, package_root: &Path, target_root: &Path) -> Result<()> {
    let source_path = package_root.join(file.path());
    let target_path = target_root.join(file.path());

    let content = fs::read(&source_path).map_err(|e| Error::io("reading", &source_path, e))?;

    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io("creating directory", parent, e))?;
    }
    fs::write(&target_path, content).map_err(|e| Error::io("writing", &target_path, e))?;

    info!(path = %target_path.display(), state = %file.state(), "installed");
    Ok(())
}

fn remove_file(file: &PackageFile, target_root: &Path) -> Result<()> {
    let target_path = target_root.join(file.path());

    fs::remove_file(&target_path).map_err(|e| Error::io("removing", &target_path, e))?;

    info!(path = %target_path.display(), "removed");
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{hasher::fingerprint, state::State};
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct Fixture {
        source: TempDir,
        target: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let fixture = Fixture {
                source: tempfile::tempdir().unwrap(),
                target: tempfile::tempdir().unwrap(),
            };
            fixture.write_source("test-pkg/.testpkgrc", "hello");
            fixture.write_source("test-pkg/.local/share/testfile", "shared");
            fixture
        }

        fn write_source(&self, relative: &str, content: &str) {
            let path = self.source.path().join(relative);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }

        fn options(&self) -> Options {
            Options {
                source: self.source.path().to_path_buf(),
                target: self.target.path().to_path_buf(),
            }
        }

        fn package(&self, states: [State; 2]) -> Vec<Package> {
            let mut pkg = Package::new("test-pkg");
            pkg.add_file(PackageFile::new(
                [".local", "share", "testfile"].iter().collect(),
                fingerprint(b"shared"),
                states[0],
            ));
            pkg.add_file(PackageFile::new(
                PathBuf::from(".testpkgrc"),
                fingerprint(b"hello"),
                states[1],
            ));
            vec![pkg]
        }
    }

    #[test]
    fn test_conjure_copies_absent_files_and_creates_parents() {
        let fixture = Fixture::new();
        let packages = fixture.package([State::Absent, State::Absent]);
        let mut out = Vec::new();

        conjure(&packages, &fixture.options(), &mut out).unwrap();

        let target = fixture.target.path();
        assert_eq!(fs::read_to_string(target.join(".testpkgrc")).unwrap(), "hello");
        assert_eq!(
            fs::read_to_string(target.join(".local/share/testfile")).unwrap(),
            "shared"
        );
        assert_eq!(String::from_utf8(out).unwrap(), ".:. Conjuring test-pkg\n");
    }

    #[test]
    fn test_conjure_overwrites_mismatch_and_skips_present() {
        let fixture = Fixture::new();
        let target = fixture.target.path();
        fs::write(target.join(".testpkgrc"), "local edit").unwrap();
        fs::create_dir_all(target.join(".local/share")).unwrap();
        // marked present, so the stale content must survive untouched
        fs::write(target.join(".local/share/testfile"), "untouched").unwrap();

        let packages = fixture.package([State::Present, State::Mismatch]);
        conjure(&packages, &fixture.options(), &mut Vec::new()).unwrap();

        assert_eq!(fs::read_to_string(target.join(".testpkgrc")).unwrap(), "hello");
        assert_eq!(
            fs::read_to_string(target.join(".local/share/testfile")).unwrap(),
            "untouched"
        );
    }

    #[test]
    fn test_conjure_missing_source_names_path() {
        let fixture = Fixture::new();
        fs::remove_file(fixture.source.path().join("test-pkg/.testpkgrc")).unwrap();
        let packages = fixture.package([State::Present, State::Absent]);

        let err = conjure(&packages, &fixture.options(), &mut Vec::new()).unwrap_err();
        match err {
            Error::Io { action, path, .. } => {
                assert_eq!(action, "reading");
                assert!(path.ends_with(".testpkgrc"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_expel_removes_only_present_files() {
        let fixture = Fixture::new();
        let target = fixture.target.path();
        fs::write(target.join(".testpkgrc"), "local edit").unwrap();
        fs::create_dir_all(target.join(".local/share")).unwrap();
        fs::write(target.join(".local/share/testfile"), "shared").unwrap();

        let packages = fixture.package([State::Present, State::Mismatch]);
        let mut out = Vec::new();
        expel(&packages, &fixture.options(), &mut out).unwrap();

        assert!(!target.join(".local/share/testfile").exists());
        assert_eq!(
            fs::read_to_string(target.join(".testpkgrc")).unwrap(),
            "local edit"
        );
        assert_eq!(String::from_utf8(out).unwrap(), ".:. Expelling test-pkg\n");
    }

    #[test]
    fn test_expel_vanished_file_is_an_error() {
        let fixture = Fixture::new();
        let packages = fixture.package([State::Absent, State::Present]);

        let err = expel(&packages, &fixture.options(), &mut Vec::new()).unwrap_err();
        assert!(matches!(err, Error::Io { action: "removing", .. }));
    }

    #[test]
    fn test_peer_report_format() {
        let fixture = Fixture::new();
        let packages = fixture.package([State::Absent, State::Mismatch]);
        let mut out = Vec::new();

        peer(&packages, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            ".:. Peering Packages\n  test-pkg\n    (ABSENT) .local/share/testfile\n    (MISMATCH) .testpkgrc\n"
        );
    }
}
