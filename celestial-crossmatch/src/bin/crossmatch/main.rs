//! crossmatch: associate two sky catalogs and test the result against chance

mod cli;
mod run;
mod sample;
mod separation;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Run(args) => run::run(args, &cli),
        Commands::Sample(args) => sample::run(args, &cli),
        Commands::Separation(args) => separation::run(args, &cli),
    }
}

/// `info` by default, `debug` with `--verbose`; `RUST_LOG` wins over both.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}
