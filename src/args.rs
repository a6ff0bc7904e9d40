use crate::error::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::{ffi::OsString, path::PathBuf};

#[derive(Parser, Debug)]
#[command(name = "conjure")]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding one subdirectory per package (default: ./dotfiles)
    #[arg(long, global = true, value_name = "PATH")]
    pub source: Option<PathBuf>,

    /// Directory packages are installed into (default: home directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub target: Option<PathBuf>,

    /// The path of the config file (default: ~/.config/conjure/config.ron)
    #[arg(long = "config", global = true, value_name = "PATH")]
    pub config_path: Option<PathBuf>,

    /// Increase log verbosity, repeat for more detail
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Install absent and changed package files into the target
    Conjure,

    /// Remove installed package files that still match the source
    Expel,

    /// Report the state of every package file
    Peer,
}

pub fn get_env_args() -> Result<Args> {
    Ok(Args::try_parse()?)
}

pub fn parse_args<I, T>(args: I) -> Result<Args>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Ok(Args::try_parse_from(args)?)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_parse_subcommands() {
        for (arg, expected) in [
            ("conjure", Command::Conjure),
            ("expel", Command::Expel),
            ("peer", Command::Peer),
        ] {
            let args = parse_args(["conjure", arg]).unwrap();
            assert_eq!(args.command, expected);
            assert_eq!(args.source, None);
            assert_eq!(args.target, None);
        }
    }

    #[test]
    fn test_flags_before_and_after_subcommand() {
        let args =
            parse_args(["conjure", "expel", "--source", "pkgs", "--target", "/tmp/home"]).unwrap();
        assert_eq!(args.source, Some(PathBuf::from("pkgs")));
        assert_eq!(args.target, Some(PathBuf::from("/tmp/home")));

        let args = parse_args(["conjure", "--source", "pkgs", "-vv", "peer"]).unwrap();
        assert_eq!(args.command, Command::Peer);
        assert_eq!(args.source, Some(PathBuf::from("pkgs")));
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_unknown_subcommand() {
        let err = parse_args(["conjure", "banish"]).unwrap_err();
        assert!(matches!(err, Error::Argument(ref e) if e.use_stderr()));
    }

    #[test]
    fn test_missing_subcommand_and_bad_flag() {
        assert!(parse_args(["conjure"]).is_err());
        assert!(parse_args(["conjure", "peer", "--source"]).is_err());
        assert!(parse_args(["conjure", "peer", "--destination", "x"]).is_err());
    }
}
