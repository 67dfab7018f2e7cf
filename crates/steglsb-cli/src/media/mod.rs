pub mod audio;
pub mod image;
pub mod video;

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, error, warn};
use steglsb_core::validation::capacity_in_chars;
use steglsb_core::{encode, CodecOptions, LsbCarrier, SampleType};

pub use self::audio::AudioMedia;
pub use self::image::ImageMedia;
pub use self::video::FrameFolder;
use crate::error::{CliError, CliResult};

/// carriers that are read, hidden messages are always written as PNG
pub const IMAGE_EXTENSIONS: [&str; 4] = ["png", "bmp", "jpg", "jpeg"];
pub const AUDIO_EXTENSIONS: [&str; 1] = ["wav"];

/// a media container for steganography
#[derive(Debug)]
pub enum Media {
    Image(ImageMedia),
    Audio(AudioMedia),
    /// a folder of PNG frames
    Video(FrameFolder),
}

impl Media {
    pub fn from_file(f: &Path) -> CliResult<Self> {
        if f.is_dir() {
            return Ok(Self::Video(FrameFolder::open(f)?));
        }

        let ext = f
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Ok(Self::Image(ImageMedia::from_file(f)?))
        } else if AUDIO_EXTENSIONS.contains(&ext.as_str()) {
            Ok(Self::Audio(AudioMedia::from_file(f)?))
        } else {
            error!("No media kind for {f:?}");
            Err(CliError::UnsupportedMedia(f.to_path_buf()))
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Media::Image(_) => "image",
            Media::Audio(_) => "audio",
            Media::Video(_) => "video",
        }
    }

    pub fn sample_type(&self) -> SampleType {
        match self {
            Media::Image(_) | Media::Video(_) => SampleType::UnsignedByte,
            Media::Audio(a) => a.samples.sample_type(),
        }
    }

    pub fn shape(&self) -> Vec<usize> {
        match self {
            Media::Image(i) => i.pixels.shape().to_vec(),
            Media::Audio(a) => a.samples.shape().to_vec(),
            Media::Video(v) => v.shape().to_vec(),
        }
    }

    pub fn slots(&self) -> usize {
        self.shape().iter().product()
    }

    /// ASCII characters that fit with `num_lsb` bits per sample
    pub fn capacity(&self, num_lsb: u32) -> usize {
        capacity_in_chars(self.slots(), num_lsb)
    }

    /// Hides `message` and writes the result next to `target`.
    ///
    /// Images end up as `.png`, audio as `.wav` and videos as a folder of
    /// frames. The written path is returned.
    pub fn hide_and_save(
        &self,
        message: &str,
        opts: &CodecOptions,
        target: &Path,
    ) -> CliResult<PathBuf> {
        let target = target_path(self, target);

        match self {
            Media::Image(i) => {
                let secret = encode(&i.pixels, message, opts.num_lsb)?;
                prepare_target(&target)?;
                i.with_pixels(secret).save_as(&target)?;
            }
            Media::Audio(a) => {
                let secret = a.samples.hide(message, opts)?;
                prepare_target(&target)?;
                a.with_samples(secret).save_as(&target)?;
            }
            Media::Video(v) => {
                if video::has_frames(&target)? {
                    return Err(CliError::TargetNotEmpty(target));
                }
                let secret = encode(&v.read_all()?, message, opts.num_lsb)?;
                v.save_as(&secret, &target)?;
            }
        }
        debug!("Hid {} characters in {target:?}", message.len());

        Ok(target)
    }

    pub fn unveil(&self, opts: &CodecOptions) -> CliResult<String> {
        let message = match self {
            Media::Image(i) => i.pixels.unveil(opts)?,
            Media::Audio(a) => a.samples.unveil(opts)?,
            Media::Video(v) => v
                .unveil(opts.num_lsb, opts.batch_size)?
                .into_message(opts.require_sentinel)?,
        };

        Ok(message)
    }
}

/// the output file gets the extension of the format that is written
pub fn target_path(media: &Media, target: &Path) -> PathBuf {
    match media {
        Media::Image(_) => target.with_extension("png"),
        Media::Audio(_) => target.with_extension("wav"),
        Media::Video(_) => target.to_path_buf(),
    }
}

/// creates missing parent folders, existing files are overwritten
pub fn prepare_target(target: &Path) -> CliResult<()> {
    if target.exists() {
        warn!("Overwriting {target:?}");
    }

    match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|source| {
                error!("Error creating folder {parent:?}: {source}");
                CliError::WriteError { source }
            })
        }
        _ => Ok(()),
    }
}
