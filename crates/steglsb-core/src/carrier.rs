use enum_dispatch::enum_dispatch;

use crate::decoder::decode_frame;
use crate::encoder::encode;
use crate::error::{Result, StegError};
use crate::options::CodecOptions;
use crate::sample::{Sample, SampleType};
use crate::sample_array::SampleArray;
use crate::streaming::try_decode_batched;
use crate::validation::capacity_in_chars;

/// What every carrier can do, regardless of its sample type.
#[enum_dispatch]
pub trait LsbCarrier {
    fn sample_type(&self) -> SampleType;

    fn shape(&self) -> &[usize];

    /// number of sample slots
    fn slots(&self) -> usize;

    /// how many ASCII characters can be hidden with `num_lsb` bits per sample
    fn capacity(&self, num_lsb: u32) -> usize {
        capacity_in_chars(self.slots(), num_lsb)
    }

    /// hides `message` and returns the carrier holding it
    fn hide(&self, message: &str, opts: &CodecOptions) -> Result<Carrier>;

    /// unveils the whole carrier in one pass
    fn unveil(&self, opts: &CodecOptions) -> Result<String>;

    /// unveils `opts.batch_size` frames at a time
    fn unveil_batched(&self, opts: &CodecOptions) -> Result<String>;
}

/// A carrier of any supported sample type
#[enum_dispatch(LsbCarrier)]
#[derive(Debug, Clone, PartialEq)]
pub enum Carrier {
    /// images, video frames and 8 bit PCM audio
    U8(SampleArray<u8>),
    /// 16 bit PCM audio
    I16(SampleArray<i16>),
    /// 32 bit PCM audio
    I32(SampleArray<i32>),
}

impl<T> LsbCarrier for SampleArray<T>
where
    T: Sample,
    SampleArray<T>: Into<Carrier>,
{
    fn sample_type(&self) -> SampleType {
        T::SAMPLE_TYPE
    }

    fn shape(&self) -> &[usize] {
        SampleArray::shape(self)
    }

    fn slots(&self) -> usize {
        self.len()
    }

    fn hide(&self, message: &str, opts: &CodecOptions) -> Result<Carrier> {
        Ok(encode(self, message, opts.num_lsb)?.into())
    }

    fn unveil(&self, opts: &CodecOptions) -> Result<String> {
        decode_frame(self.samples(), opts.num_lsb, false)?
            .into_message(opts.require_sentinel)
    }

    fn unveil_batched(&self, opts: &CodecOptions) -> Result<String> {
        let batches = self.frame_batches(opts.batch_size)?.map(Ok::<_, StegError>);
        try_decode_batched(batches, opts.num_lsb)?.into_message(opts.require_sentinel)
    }
}
