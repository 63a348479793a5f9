//! changelog binary entry point.

use std::process;

fn main() {
    let cli = match gh_changelog::cli::Cli::try_parse_args() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            println!("{}", err);
            process::exit(-1);
        }
    };

    if let Err(err) = gh_changelog::cli::run(cli) {
        eprintln!("error: {:#}", err);
        process::exit(1);
    }
}
