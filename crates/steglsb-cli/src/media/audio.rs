use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::{debug, error};
use steglsb_core::{Carrier, Sample, SampleArray};

use crate::error::{CliError, CliResult};

/// A PCM audio carrier, samples as `[frames, channels]`
#[derive(Debug, Clone, PartialEq)]
pub struct AudioMedia {
    pub spec: WavSpec,
    pub samples: Carrier,
}

/// hound maps unsigned 8 bit samples to `i8`, this restores the stored byte
fn stored_byte(sample: i8) -> u8 {
    (sample as u8) ^ 0x80
}

fn from_stored_byte(byte: u8) -> i8 {
    (byte ^ 0x80) as i8
}

impl AudioMedia {
    pub fn from_file(f: &Path) -> CliResult<Self> {
        let mut reader = WavReader::open(f).map_err(|e| {
            error!("Error reading audio {f:?}: {e}");
            CliError::InvalidAudioMedia
        })?;
        let spec = reader.spec();
        debug!("Audio {f:?} with {spec:?}");

        if spec.sample_format != SampleFormat::Int {
            return Err(unsupported(&spec));
        }
        let channels = usize::from(spec.channels);

        let samples: Carrier = match spec.bits_per_sample {
            8 => {
                let samples = read_samples::<i8>(&mut reader)?
                    .into_iter()
                    .map(stored_byte)
                    .collect();
                interleaved(samples, channels)?.into()
            }
            16 => interleaved(read_samples::<i16>(&mut reader)?, channels)?.into(),
            32 => interleaved(read_samples::<i32>(&mut reader)?, channels)?.into(),
            _ => return Err(unsupported(&spec)),
        };

        Ok(Self { spec, samples })
    }

    /// same audio with other sample values
    pub fn with_samples(&self, samples: Carrier) -> Self {
        Self {
            spec: self.spec,
            samples,
        }
    }

    pub fn save_as(&self, file: &Path) -> CliResult<()> {
        let mut writer = WavWriter::create(file, self.spec).map_err(|e| {
            error!("Error creating audio {file:?}: {e}");
            CliError::AudioEncodingError
        })?;

        let written = match &self.samples {
            Carrier::U8(a) => a
                .samples()
                .iter()
                .try_for_each(|s| writer.write_sample(from_stored_byte(*s))),
            Carrier::I16(a) => a.samples().iter().try_for_each(|s| writer.write_sample(*s)),
            Carrier::I32(a) => a.samples().iter().try_for_each(|s| writer.write_sample(*s)),
        };

        written.and_then(|_| writer.finalize()).map_err(|e| {
            error!("Error writing audio {file:?}: {e}");
            CliError::AudioEncodingError
        })
    }
}

type FileReader = WavReader<BufReader<File>>;

fn read_samples<S: hound::Sample>(reader: &mut FileReader) -> CliResult<Vec<S>> {
    reader
        .samples::<S>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            error!("Error reading audio samples: {e}");
            CliError::InvalidAudioMedia
        })
}

fn interleaved<T: Sample>(samples: Vec<T>, channels: usize) -> CliResult<SampleArray<T>> {
    let frames = samples.len() / channels.max(1);
    Ok(SampleArray::new(&[frames, channels], samples)?)
}

fn unsupported(spec: &WavSpec) -> CliError {
    let format = match spec.sample_format {
        SampleFormat::Int => "integer",
        SampleFormat::Float => "float",
    };

    CliError::UnsupportedSampleFormat {
        bits: spec.bits_per_sample,
        format: format.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use steglsb_core::LsbCarrier;

    fn spec(bits_per_sample: u16, sample_format: SampleFormat) -> WavSpec {
        WavSpec {
            channels: 2,
            sample_rate: 8000,
            bits_per_sample,
            sample_format,
        }
    }

    #[test]
    fn should_keep_the_stored_byte_of_8_bit_audio() {
        for byte in [0_u8, 1, 0x7f, 0x80, 0xff] {
            assert_eq!(stored_byte(from_stored_byte(byte)), byte);
        }
        // silence is stored as 0x80
        assert_eq!(stored_byte(0), 0x80);
    }

    #[test]
    fn should_round_trip_every_integer_sample_width() {
        let dir = tempfile::tempdir().unwrap();
        let bytes: Vec<u8> = (0..100).map(|i| i as u8).collect();
        let shorts: Vec<i16> = (0..100).map(|i| i * -300).collect();
        let ints: Vec<i32> = (0..100).map(|i| i << 20).collect();
        let carriers: Vec<(u16, Carrier)> = vec![
            (8, SampleArray::new(&[50, 2], bytes).unwrap().into()),
            (16, SampleArray::new(&[50, 2], shorts).unwrap().into()),
            (32, SampleArray::new(&[50, 2], ints).unwrap().into()),
        ];

        for (bits, samples) in carriers {
            let file = dir.path().join(format!("audio-{bits}.wav"));
            let audio = AudioMedia {
                spec: spec(bits, SampleFormat::Int),
                samples,
            };
            audio.save_as(&file).unwrap();

            let read = AudioMedia::from_file(&file).unwrap();
            assert_eq!(read, audio);
            assert_eq!(read.samples.shape(), &[50, 2]);
        }
    }

    #[test]
    fn should_reject_float_audio() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("float.wav");
        let mut writer = WavWriter::create(&file, spec(32, SampleFormat::Float)).unwrap();
        writer.write_sample(0.5_f32).unwrap();
        writer.write_sample(-0.5_f32).unwrap();
        writer.finalize().unwrap();

        assert!(matches!(
            AudioMedia::from_file(&file),
            Err(CliError::UnsupportedSampleFormat { bits: 32, .. })
        ));
    }

    #[test]
    fn should_reject_24_bit_audio() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("24bit.wav");
        let mut writer = WavWriter::create(&file, spec(24, SampleFormat::Int)).unwrap();
        writer.write_sample(1_i32).unwrap();
        writer.write_sample(-1_i32).unwrap();
        writer.finalize().unwrap();

        assert!(matches!(
            AudioMedia::from_file(&file),
            Err(CliError::UnsupportedSampleFormat { bits: 24, .. })
        ));
    }
}
