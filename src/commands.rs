use crate::{
    args::{Args, Command},
    config::{Config, Options},
    ops,
    package::Package,
    reconcile,
};
use anyhow::{Context, Result};
use std::io::{self, Write};
use tracing::info;

/// Runs the command selected on the command line against stdout.
///
/// The home directory is looked up once here and handed down explicitly.
pub fn run(args: &Args) -> Result<()> {
    let home = home::home_dir();
    let config =
        Config::for_args(args, home.as_deref()).context("Error loading configuration")?;
    let options =
        Options::resolve(args, &config, home.as_deref()).context("Error resolving options")?;

    info!(
        source = %options.source.display(),
        target = %options.target.display(),
        command = ?args.command,
        "resolved options"
    );

    let packages = reconcile::assemble(&options.source, &options.target)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(args.command, &packages, &options, &mut out)
}

/// Applies `command` to an already reconciled set of packages.
pub fn execute<W>(
    command: Command,
    packages: &[Package],
    options: &Options,
    out: &mut W,
) -> Result<()>
where
    W: Write,
{
    match command {
        Command::Conjure => {
            ops::conjure(packages, options, out).context("Conjure command failed with error")
        }
        Command::Expel => {
            ops::expel(packages, options, out).context("Expel command failed with error")
        }
        Command::Peer => ops::peer(packages, out).context("Peer command failed with error"),
    }
}
