use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Expands a leading `~` to the home directory.
///
/// Only `~` and `~/...` are expanded; `~user` forms are left alone.
pub trait FixPath {
    /// Returns the expanded path, or `None` when the path needs no expansion.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HomeDirectory`] when the path starts with `~` and no
    /// home directory is known.
    fn fix_path(&self, home: Option<&Path>) -> Result<Option<PathBuf>>;
}

impl<T> FixPath for T
where
    T: AsRef<Path> + ?Sized,
{
    fn fix_path(&self, home: Option<&Path>) -> Result<Option<PathBuf>> {
        let Ok(rest) = self.as_ref().strip_prefix("~") else {
            return Ok(None);
        };
        let home = home.ok_or(Error::HomeDirectory)?;

        if rest.as_os_str().is_empty() {
            Ok(Some(home.to_path_buf()))
        } else {
            Ok(Some(home.join(rest)))
        }
    }
}

/// Expands `~` in `$path` against `$home`, falling back to `$path` unchanged.
///
/// Evaluates to a `Result<PathBuf>`.
///
/// # Examples
///
/// ```rust
/// use conjure_dotfiles::fix_path;
/// use std::path::{Path, PathBuf};
///
/// let home = Some(Path::new("/home/wizard"));
///
/// let expanded = fix_path!("~/dotfiles", home).unwrap();
/// assert_eq!(expanded, PathBuf::from("/home/wizard/dotfiles"));
///
/// let untouched = fix_path!("/etc/skel", home).unwrap();
/// assert_eq!(untouched, PathBuf::from("/etc/skel"));
/// ```
#[macro_export]
macro_rules! fix_path {
    ($path:expr, $home:expr) => {
        $crate::fixpath::FixPath::fix_path($path, $home)
            .map(|fixed| fixed.unwrap_or_else(|| ::std::path::PathBuf::from($path)))
    };
}
