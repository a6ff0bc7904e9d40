use crate::{
    args::Args,
    error::{Error, Result},
    fix_path,
};
use ron::{extensions::Extensions, Options as RonOptions};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

/// Source directory used when neither a flag nor the config file names one.
pub const DEFAULT_SOURCE_DIRECTORY: &str = "dotfiles";

/// Contents of the optional RON config file.
///
/// ```ron
/// (
///     source: "~/dotfiles",
///     target: "~",
/// )
/// ```
#[derive(Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub source: Option<String>,
    pub target: Option<String>,
}

impl Config {
    /// `<home>/.config/conjure/config.ron`
    pub fn default_path(home: &Path) -> PathBuf {
        home.join(".config").join("conjure").join("config.ron")
    }

    /// Loads the config file named on the command line, or the default one
    /// when it exists.
    ///
    /// An explicitly named file must exist. A missing default file yields an
    /// empty config.
    pub fn load(explicit: Option<&Path>, home: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match home.map(Self::default_path) {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Loads the config file that applies to `args`.
    ///
    /// The default file is skipped when `--source` and `--target` are both
    /// given, since none of its values could take effect. A file named with
    /// `--config` is always read.
    pub fn for_args(args: &Args, home: Option<&Path>) -> Result<Self> {
        if args.config_path.is_none() && args.source.is_some() && args.target.is_some() {
            debug!("both roots given on the command line, skipping default config file");
            return Ok(Self::default());
        }

        Self::load(args.config_path.as_deref(), home)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| Error::io("reading", path, e))?;
        let config = Self::parse(&contents, path)?;

        debug!(path = %path.display(), ?config, "loaded config file");
        Ok(config)
    }

    fn parse(contents: &str, path: &Path) -> Result<Self> {
        RonOptions::default()
            .with_default_extension(Extensions::IMPLICIT_SOME)
            .from_str(contents)
            .map_err(|source| Error::Config {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// The source and target roots a command runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub source: PathBuf,
    pub target: PathBuf,
}

impl Options {
    /// Resolves the effective roots.
    ///
    /// Command-line flags win over config file values, which win over the
    /// built-in defaults: `dotfiles` in the working directory and the home
    /// directory. Config values starting with `~` expand against `home`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HomeDirectory`] when the home directory is needed but
    /// unknown.
    pub fn resolve(args: &Args, config: &Config, home: Option<&Path>) -> Result<Self> {
        let source = match (&args.source, &config.source) {
            (Some(source), _) => source.clone(),
            (None, Some(source)) => fix_path!(source.as_str(), home)?,
            (None, None) => PathBuf::from(DEFAULT_SOURCE_DIRECTORY),
        };

        let target = match (&args.target, &config.target) {
            (Some(target), _) => target.clone(),
            (None, Some(target)) => fix_path!(target.as_str(), home)?,
            (None, None) => home.map(Path::to_path_buf).ok_or(Error::HomeDirectory)?,
        };

        Ok(Self { source, target })
    }
}
