//! Turbo manifest inspection command
//!

mod core;
mod inspect;
mod pipeline;
mod workspaces;

use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,
}

impl Cli {
    fn run(self) -> miette::Result<()> {
        match self.command {
            Command::Inspect(opts) => opts.run()?,
            Command::Pipeline(opts) => opts.run()?,
            Command::Workspaces(opts) => opts.run()?,
        }
        Ok(())
    }
}

#[derive(clap::Subcommand)]
enum Command {
    /// Summarize a package manifest
    Inspect(inspect::Opts),
    /// List the tasks of the embedded turbo pipeline
    Pipeline(pipeline::Opts),
    /// List the workspace globs of a manifest
    Workspaces(workspaces::Opts),
}

fn main() -> miette::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    core::logging::init(&cli.verbosity);
    cli.run()
}
