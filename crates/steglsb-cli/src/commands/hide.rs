use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use log::{error, info};
use steglsb_core::CodecOptions;

use crate::media::Media;
use crate::{CliError, CliResult};

/// Hides a text message in PNG images, WAV audio files and folders of PNG frames
#[derive(Args, Debug)]
pub struct HideArgs {
    /// Media file such as PNG image, WAV audio file or a folder of PNG frames, used readonly.
    #[arg(short = 'i', long = "in", value_name = "media file", required = true)]
    pub media: PathBuf,

    /// Final media will be stored there, as .png, .wav or a folder of frames
    #[arg(
        short = 'o',
        long = "out",
        value_name = "output media file",
        required = true
    )]
    pub write_to_file: PathBuf,

    /// An ASCII text message that will be hidden
    #[arg(
        short,
        long,
        value_name = "text message",
        required_unless_present = "message_file"
    )]
    pub message: Option<String>,

    /// Text file holding the message that will be hidden
    #[arg(
        short = 'f',
        long = "message-file",
        value_name = "text file",
        conflicts_with = "message"
    )]
    pub message_file: Option<PathBuf>,
}

impl HideArgs {
    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        let message = match (self.message, self.message_file) {
            (Some(message), _) => message,
            (None, Some(file)) => fs::read_to_string(&file).map_err(|source| {
                error!("Error reading message file {file:?}: {source}");
                CliError::ReadError { source }
            })?,
            (None, None) => return Err(CliError::MissingMessage),
        };

        let target = hide(&self.media, &self.write_to_file, &message, &options)?;
        println!("{}", target.display());

        Ok(())
    }
}

pub fn hide(
    media: &Path,
    target: &Path,
    message: &str,
    options: &CodecOptions,
) -> CliResult<PathBuf> {
    let media = Media::from_file(media)?;
    let target = media.hide_and_save(message, options, target)?;
    info!(
        "Message of {} characters hidden in {} {target:?}",
        message.len(),
        media.kind()
    );

    Ok(target)
}
