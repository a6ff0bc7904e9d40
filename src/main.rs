use conjure_dotfiles::{args, commands, logging, Error};
use std::process::ExitCode;

const EXIT_ERROR: u8 = 1;

fn main() -> ExitCode {
    let args = match args::get_env_args() {
        Ok(args) => args,
        Err(Error::Argument(err)) => {
            let _ = err.print();
            // --help and --version are reported through the same error path
            return if err.use_stderr() {
                ExitCode::from(EXIT_ERROR)
            } else {
                ExitCode::SUCCESS
            };
        }
        Err(err) => {
            eprintln!("Error parsing options: {err}");
            return ExitCode::from(EXIT_ERROR);
        }
    };

    logging::init(args.verbose);

    match commands::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
