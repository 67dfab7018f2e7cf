use std::path::Path;

use image::{ColorType, DynamicImage, ImageFormat};
use log::{debug, error, warn};
use steglsb_core::SampleArray;

use crate::error::{CliError, CliResult};

/// An image carrier, pixels as `[height, width, channels]` bytes
#[derive(Debug, Clone, PartialEq)]
pub struct ImageMedia {
    pub color: ColorType,
    pub pixels: SampleArray<u8>,
}

impl ImageMedia {
    pub fn from_file(f: &Path) -> CliResult<Self> {
        let img = image::open(f).map_err(|e| {
            error!("Error reading image {f:?}: {e}");
            CliError::InvalidImageMedia
        })?;

        Self::from_image(img)
    }

    pub fn from_image(img: DynamicImage) -> CliResult<Self> {
        let (width, height) = (img.width() as usize, img.height() as usize);
        let (color, raw) = match img {
            DynamicImage::ImageLuma8(buf) => (ColorType::L8, buf.into_raw()),
            DynamicImage::ImageLumaA8(buf) => (ColorType::La8, buf.into_raw()),
            DynamicImage::ImageRgb8(buf) => (ColorType::Rgb8, buf.into_raw()),
            DynamicImage::ImageRgba8(buf) => (ColorType::Rgba8, buf.into_raw()),
            other => {
                warn!(
                    "Image has {:?} pixels, only 8 bit channels are used",
                    other.color()
                );
                (ColorType::Rgba8, other.to_rgba8().into_raw())
            }
        };
        let channels = usize::from(color.channel_count());
        debug!("Image of {width}x{height} pixels with {channels} channels");

        Ok(Self {
            color,
            pixels: SampleArray::new(&[height, width, channels], raw)?,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.shape()[1] as u32
    }

    pub fn height(&self) -> u32 {
        self.pixels.shape()[0] as u32
    }

    /// same image with other pixel values
    pub fn with_pixels(&self, pixels: SampleArray<u8>) -> Self {
        Self {
            color: self.color,
            pixels,
        }
    }

    /// always stored as PNG, other formats would lose the hidden bits
    pub fn save_as(&self, file: &Path) -> CliResult<()> {
        image::save_buffer_with_format(
            file,
            self.pixels.samples(),
            self.width(),
            self.height(),
            self.color,
            ImageFormat::Png,
        )
        .map_err(|e| {
            error!("Error saving image {file:?}: {e}");
            CliError::ImageEncodingError
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage, RgbaImage};

    #[test]
    fn should_lay_out_rgb_pixels_row_by_row() {
        let mut img = RgbImage::new(3, 2);
        img.put_pixel(2, 0, Rgb([1, 2, 3]));
        img.put_pixel(0, 1, Rgb([4, 5, 6]));

        let media = ImageMedia::from_image(DynamicImage::ImageRgb8(img)).unwrap();

        assert_eq!(media.pixels.shape(), &[2, 3, 3]);
        assert_eq!(&media.pixels.samples()[6..9], &[1, 2, 3]);
        assert_eq!(&media.pixels.samples()[9..12], &[4, 5, 6]);
    }

    #[test]
    fn should_keep_the_alpha_channel() {
        let media = ImageMedia::from_image(DynamicImage::ImageRgba8(RgbaImage::new(4, 4))).unwrap();

        assert_eq!(media.color, ColorType::Rgba8);
        assert_eq!(media.pixels.shape(), &[4, 4, 4]);
    }

    #[test]
    fn should_reduce_16_bit_images_to_rgba8() {
        let img = DynamicImage::new_rgb16(5, 2);
        let media = ImageMedia::from_image(img).unwrap();

        assert_eq!(media.color, ColorType::Rgba8);
        assert_eq!(media.pixels.shape(), &[2, 5, 4]);
    }

    #[test]
    fn should_save_and_read_back_a_grayscale_png() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("gray.png");
        let img = GrayImage::from_fn(7, 3, |x, y| Luma([(x * 10 + y) as u8]));
        let media = ImageMedia::from_image(DynamicImage::ImageLuma8(img)).unwrap();

        media.save_as(&file).unwrap();

        assert_eq!(ImageMedia::from_file(&file).unwrap(), media);
    }

    #[test]
    fn should_reject_a_broken_png() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("broken.png");
        std::fs::write(&file, b"not a png").unwrap();

        assert!(matches!(
            ImageMedia::from_file(&file),
            Err(CliError::InvalidImageMedia)
        ));
    }
}
