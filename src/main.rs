use clap::Parser;
use screener::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
