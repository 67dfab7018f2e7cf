use clap::Parser;

mod cli;
mod commands;
mod error;
mod media;

use cli::{CliArgs, Commands};
pub use error::{CliError, CliResult};

fn main() -> CliResult<()> {
    env_logger::init();

    let args = CliArgs::parse();
    let options = args.codec_options();

    match args.command {
        Commands::Hide(args) => args.run(options),
        Commands::Unveil(args) => args.run(options),
        Commands::Capacity(args) => args.run(options),
    }
}
