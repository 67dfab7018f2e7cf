//! Videos are folders of equally sized PNG frames, ordered by file name.

use std::fs;
use std::path::{Path, PathBuf};

use image::ColorType;
use log::{debug, error};
use steglsb_core::{try_decode_batched, SampleArray, StegError, Unveiled};

use super::image::ImageMedia;
use crate::error::{CliError, CliResult};

pub const FRAME_EXTENSION: &str = "png";

/// A video carrier whose frames are read on demand
#[derive(Debug, Clone, PartialEq)]
pub struct FrameFolder {
    frames: Vec<PathBuf>,
    color: ColorType,
    /// `[height, width, channels]` of every frame
    frame_shape: [usize; 3],
}

impl FrameFolder {
    pub fn open(folder: &Path) -> CliResult<Self> {
        let entries = fs::read_dir(folder).map_err(|source| {
            error!("Error reading frame folder {folder:?}: {source}");
            CliError::ReadError { source }
        })?;

        let mut frames = Vec::new();
        for entry in entries {
            let path = entry.map_err(|source| CliError::ReadError { source })?.path();
            if path.is_file() && is_frame(&path) {
                frames.push(path);
            }
        }
        frames.sort();

        let first = frames
            .first()
            .ok_or_else(|| CliError::InvalidVideoMedia(format!("no PNG frames in {folder:?}")))?;
        let first = ImageMedia::from_file(first)?;
        let shape = first.pixels.shape();
        debug!("Video of {} frames, each {shape:?}", frames.len());

        Ok(Self {
            color: first.color,
            frame_shape: [shape[0], shape[1], shape[2]],
            frames,
        })
    }

    /// `[frames, height, width, channels]`
    pub fn shape(&self) -> [usize; 4] {
        let [h, w, c] = self.frame_shape;
        [self.frames.len(), h, w, c]
    }

    pub fn slots(&self) -> usize {
        self.shape().iter().product()
    }

    fn read_frame(&self, path: &Path) -> CliResult<Vec<u8>> {
        let frame = ImageMedia::from_file(path)?;
        if frame.pixels.shape() != self.frame_shape || frame.color != self.color {
            return Err(CliError::InvalidVideoMedia(format!(
                "frame {path:?} is {:?}, expected {:?}",
                frame.pixels.shape(),
                self.frame_shape
            )));
        }

        Ok(frame.pixels.into_samples())
    }

    /// reads `batch_size` frames at a time, the last batch may be shorter
    pub fn batches(&self, batch_size: usize) -> impl Iterator<Item = CliResult<Vec<u8>>> + '_ {
        self.frames.chunks(batch_size.max(1)).map(move |paths| {
            debug!("Reading a batch of {} frames", paths.len());
            let frame_len: usize = self.frame_shape.iter().product();
            let mut batch = Vec::with_capacity(paths.len() * frame_len);
            for path in paths {
                batch.extend(self.read_frame(path)?);
            }
            Ok(batch)
        })
    }

    /// all frames at once as `[frames, height, width, channels]`
    pub fn read_all(&self) -> CliResult<SampleArray<u8>> {
        let mut samples = Vec::with_capacity(self.slots());
        for path in &self.frames {
            samples.extend(self.read_frame(path)?);
        }

        Ok(SampleArray::new(&self.shape(), samples)?)
    }

    /// unveils batch by batch, frames after the end-of-message marker are never read
    pub fn unveil(&self, num_lsb: u32, batch_size: usize) -> CliResult<Unveiled> {
        if batch_size == 0 {
            return Err(StegError::InvalidBatchSize.into());
        }

        try_decode_batched::<u8, _, _, _>(self.batches(batch_size), num_lsb)
    }

    /// writes `video` as numbered PNG frames into `folder`
    pub fn save_as(&self, video: &SampleArray<u8>, folder: &Path) -> CliResult<()> {
        fs::create_dir_all(folder).map_err(|source| {
            error!("Error creating frame folder {folder:?}: {source}");
            CliError::WriteError { source }
        })?;

        let [_, height, width, channels] = self.shape();
        for (i, frame) in video.samples().chunks(video.frame_len()).enumerate() {
            let pixels = SampleArray::new(&[height, width, channels], frame.to_vec())?;
            let image = ImageMedia {
                color: self.color,
                pixels,
            };
            image.save_as(&frame_path(folder, i))?;
        }
        debug!("Wrote {} frames to {folder:?}", video.frames());

        Ok(())
    }
}

pub fn is_frame(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(FRAME_EXTENSION))
}

pub fn frame_path(folder: &Path, index: usize) -> PathBuf {
    folder.join(format!("frame_{index:06}.{FRAME_EXTENSION}"))
}

/// true if `folder` exists and holds at least one frame
pub fn has_frames(folder: &Path) -> CliResult<bool> {
    if !folder.is_dir() {
        return Ok(false);
    }
    let entries = fs::read_dir(folder).map_err(|source| CliError::ReadError { source })?;
    for entry in entries {
        let entry = entry.map_err(|source| CliError::ReadError { source })?;
        if is_frame(&entry.path()) {
            return Ok(true);
        }
    }

    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbImage};
    use steglsb_core::encode;

    fn write_frames(folder: &Path, count: usize) {
        fs::create_dir_all(folder).unwrap();
        for i in 0..count {
            let img = RgbImage::from_fn(4, 3, |x, y| image::Rgb([x as u8, y as u8, i as u8]));
            let media = ImageMedia::from_image(DynamicImage::ImageRgb8(img)).unwrap();
            media.save_as(&frame_path(folder, i)).unwrap();
        }
    }

    #[test]
    fn should_read_frames_in_file_name_order() {
        let dir = tempfile::tempdir().unwrap();
        write_frames(dir.path(), 12);
        fs::write(dir.path().join("notes.txt"), "not a frame").unwrap();

        let video = FrameFolder::open(dir.path()).unwrap();
        assert_eq!(video.shape(), [12, 3, 4, 3]);

        let all = video.read_all().unwrap();
        for (i, frame) in all.samples().chunks(all.frame_len()).enumerate() {
            assert_eq!(frame[2], i as u8);
        }

        let batch_lens: Vec<usize> = video.batches(5).map(|b| b.unwrap().len()).collect();
        assert_eq!(batch_lens, vec![5 * 36, 5 * 36, 2 * 36]);
    }

    #[test]
    fn should_hide_and_unveil_across_frames() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source");
        let target = dir.path().join("target");
        write_frames(&source, 10);

        let video = FrameFolder::open(&source).unwrap();
        let message = "spread over a few frames";
        let secret = encode(&video.read_all().unwrap(), message, 1).unwrap();
        video.save_as(&secret, &target).unwrap();

        let unveiled = FrameFolder::open(&target).unwrap().unveil(1, 3).unwrap();
        assert_eq!(unveiled.text, message);
        assert!(unveiled.sentinel_found);
    }

    #[test]
    fn should_reject_frames_of_different_size() {
        let dir = tempfile::tempdir().unwrap();
        write_frames(dir.path(), 2);
        let odd = ImageMedia::from_image(DynamicImage::ImageRgb8(RgbImage::new(2, 2))).unwrap();
        odd.save_as(&frame_path(dir.path(), 2)).unwrap();

        let video = FrameFolder::open(dir.path()).unwrap();
        assert!(matches!(video.read_all(), Err(CliError::InvalidVideoMedia(_))));
    }

    #[test]
    fn should_reject_an_empty_folder() {
        let dir = tempfile::tempdir().unwrap();

        assert!(matches!(
            FrameFolder::open(dir.path()),
            Err(CliError::InvalidVideoMedia(_))
        ));
        assert!(!has_frames(dir.path()).unwrap());
    }
}
