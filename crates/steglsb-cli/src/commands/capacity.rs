use std::path::PathBuf;

use clap::Args;
use steglsb_core::CodecOptions;

use crate::media::Media;
use crate::CliResult;

/// Shows how many characters a media can hold
#[derive(Args, Debug)]
pub struct CapacityArgs {
    /// Media file such as PNG image, WAV audio file or a folder of PNG frames
    #[arg(
        short = 'i',
        long = "in",
        value_name = "media file",
        required = true
    )]
    pub media: PathBuf,

    /// List the capacity for every possible number of least significant bits
    #[arg(short, long)]
    pub all: bool,
}

impl CapacityArgs {
    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        let media = Media::from_file(&self.media)?;
        let bit_depth = media.sample_type().bit_depth();
        println!(
            "{} {:?}, {} samples of {bit_depth} bit",
            media.kind(),
            media.shape(),
            media.slots()
        );

        for (num_lsb, chars) in capacity(&media, &options, self.all) {
            println!("{num_lsb:>2} lsb: {chars} characters");
        }

        Ok(())
    }
}

/// `(num_lsb, characters)` for the configured width, or for every width
pub fn capacity(media: &Media, options: &CodecOptions, all: bool) -> Vec<(u32, usize)> {
    let bit_depth = media.sample_type().bit_depth();
    let widths = if all {
        1..=bit_depth
    } else {
        options.num_lsb..=options.num_lsb.min(bit_depth)
    };

    widths.map(|num_lsb| (num_lsb, media.capacity(num_lsb))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::ImageMedia;
    use image::{DynamicImage, GrayImage};

    fn gray(width: u32, height: u32) -> Media {
        let img = DynamicImage::ImageLuma8(GrayImage::new(width, height));
        Media::Image(ImageMedia::from_image(img).unwrap())
    }

    #[test]
    fn should_list_every_width_of_an_image() {
        let media = gray(10, 10);
        let all = capacity(&media, &CodecOptions::default(), true);

        assert_eq!(all.len(), 8);
        assert_eq!(all[0], (1, 12 - 5));
        assert_eq!(all[7], (8, 100 - 5));
    }

    #[test]
    fn should_show_only_the_configured_width() {
        let media = gray(10, 10);
        let opts = CodecOptions::default().with_num_lsb(4);

        assert_eq!(capacity(&media, &opts, false), vec![(4, 50 - 5)]);
    }

    #[test]
    fn should_show_nothing_for_a_width_beyond_the_bit_depth() {
        let media = gray(10, 10);
        let opts = CodecOptions::default().with_num_lsb(9);

        assert!(capacity(&media, &opts, false).is_empty());
    }
}
