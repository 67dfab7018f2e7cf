use std::path::PathBuf;

use steglsb_core::StegError;
use thiserror::Error;

pub type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    /// Represents a failure of the codec itself, e.g. a carrier that is too small
    #[error(transparent)]
    Codec(#[from] StegError),

    /// Represents an unsupported carrier media. For example, a MP3 file is not supported
    #[error("Media format is not supported: {}", .0.display())]
    UnsupportedMedia(PathBuf),

    /// Represents an invalid carrier image media. For example, a broken PNG file
    #[error("Image media is invalid")]
    InvalidImageMedia,

    /// Represents an invalid carrier audio media. For example, a broken WAV file
    #[error("Audio media is invalid")]
    InvalidAudioMedia,

    /// Represents an invalid frame folder, for example frames of different sizes
    #[error("Video media is invalid: {0}")]
    InvalidVideoMedia(String),

    /// Represents WAV samples that are not 8, 16 or 32 bit integers
    #[error("Unsupported audio samples: {bits} bit {format}")]
    UnsupportedSampleFormat { bits: u16, format: String },

    /// Represents a failure when encoding an image file.
    #[error("Image encoding error")]
    ImageEncodingError,

    /// Represents a failure when encoding an audio file.
    #[error("Audio encoding error")]
    AudioEncodingError,

    /// Represents a frame folder that would mix new and old frames
    #[error("Target folder {} already contains frames", .0.display())]
    TargetNotEmpty(PathBuf),

    /// Represents a failure to read from input.
    #[error("Read error")]
    ReadError { source: std::io::Error },

    /// Represents a failure to write target file.
    #[error("Write error")]
    WriteError { source: std::io::Error },

    #[error("API Error: Missing message")]
    MissingMessage,
}
