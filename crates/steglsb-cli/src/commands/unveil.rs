use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use log::error;
use steglsb_core::CodecOptions;

use crate::media::Media;
use crate::{CliError, CliResult};

/// Unveils a text message from PNG images, WAV audio files and folders of PNG frames
#[derive(Args, Debug)]
pub struct UnveilArgs {
    /// Source media that contains the secret message
    #[arg(
        short = 'i',
        long = "in",
        value_name = "media source file",
        required = true
    )]
    pub media: PathBuf,

    /// The message will be stored in that file instead of printed
    #[arg(short = 'o', long = "out", value_name = "output file")]
    pub output_file: Option<PathBuf>,
}

impl UnveilArgs {
    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        let message = unveil(&self.media, &options)?;

        match self.output_file {
            Some(file) => fs::write(&file, message).map_err(|source| {
                error!("Error writing message to {file:?}: {source}");
                CliError::WriteError { source }
            }),
            None => {
                println!("{message}");
                Ok(())
            }
        }
    }
}

pub fn unveil(media: &Path, options: &CodecOptions) -> CliResult<String> {
    Media::from_file(media)?.unveil(options)
}
