use clap::{Parser, Subcommand};
use steglsb_core::options::DEFAULT_BATCH_SIZE;
use steglsb_core::CodecOptions;

use crate::commands::*;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    /// Number of least significant bits per sample that carry the message
    #[arg(
        short = 'l',
        long = "lsb",
        global = true,
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..=32)
    )]
    pub num_lsb: u32,

    /// Number of video frames unveiled at once
    #[arg(long = "batch-size", global = true, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Fail when no end-of-message marker is found instead of printing whatever was read
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl CliArgs {
    pub fn codec_options(&self) -> CodecOptions {
        CodecOptions::default()
            .with_num_lsb(self.num_lsb)
            .with_batch_size(self.batch_size)
            .with_require_sentinel(self.strict)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Hide(hide::HideArgs),
    Unveil(unveil::UnveilArgs),
    Capacity(capacity::CapacityArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn should_have_a_valid_command_line() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn should_parse_global_codec_options_after_the_subcommand() {
        let args = CliArgs::parse_from([
            "steglsb",
            "unveil",
            "-i",
            "secret.png",
            "--lsb",
            "3",
            "--batch-size",
            "4",
            "--strict",
        ]);

        assert_eq!(
            args.codec_options(),
            CodecOptions::default()
                .with_num_lsb(3)
                .with_batch_size(4)
                .with_require_sentinel(true)
        );
    }

    #[test]
    fn should_bound_the_lsb_width_by_the_widest_sample() {
        for rejected in ["0", "33"] {
            let args = ["steglsb", "capacity", "-i", "a.png", "--lsb", rejected];
            assert!(CliArgs::try_parse_from(args).is_err());
        }

        let args = CliArgs::parse_from(["steglsb", "capacity", "-i", "a.wav", "--lsb", "32"]);
        assert_eq!(args.codec_options().num_lsb, 32);
    }
}
