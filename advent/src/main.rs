//! advent: command-line driver for the path-finding puzzles.

use advent_lib::{Args, cli};
use clap::Parser;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let code = cli::execute(&args.command, &mut std::io::stdout(), &mut std::io::stderr());
    std::process::exit(code);
}
