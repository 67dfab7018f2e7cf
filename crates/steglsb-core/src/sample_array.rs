use std::slice::Chunks;

use crate::error::{Result, StegError};
use crate::sample::Sample;

/// A dense, row major, channel last array of carrier samples.
///
/// The shape is either `[.., channels]` (image `[H, W, C]`, audio `[N, C]`)
/// or `[frames, H, W, C]` for video. The flattened order of `samples` is the
/// order in which payload symbols are hidden and unveiled.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleArray<T> {
    shape: Vec<usize>,
    samples: Vec<T>,
}

impl<T: Sample> SampleArray<T> {
    pub fn new(shape: &[usize], samples: Vec<T>) -> Result<Self> {
        let shape = shape.to_vec();
        let channels = shape.last().copied().unwrap_or(0);
        if channels == 0 || shape.iter().product::<usize>() != samples.len() {
            return Err(StegError::InvalidShape {
                shape,
                len: samples.len(),
            });
        }

        Ok(Self { shape, samples })
    }

    /// single channel array, the shape of mono audio
    pub fn from_samples(samples: Vec<T>) -> Result<Self> {
        Self::new(&[samples.len(), 1], samples)
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn channels(&self) -> usize {
        self.shape[self.shape.len() - 1]
    }

    pub fn bit_depth(&self) -> u32 {
        T::bit_depth()
    }

    /// number of sample slots, the product of all dimensions
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[T] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<T> {
        self.samples
    }

    /// size of the leading axis, the frame count for video
    pub fn frames(&self) -> usize {
        self.shape[0]
    }

    /// samples per entry of the leading axis
    pub fn frame_len(&self) -> usize {
        self.shape[1..].iter().product()
    }

    /// Splits the leading axis into batches of `batch_size` frames, the last
    /// batch may be shorter.
    pub fn frame_batches(&self, batch_size: usize) -> Result<FrameBatches<'_, T>> {
        if batch_size == 0 {
            return Err(StegError::InvalidBatchSize);
        }
        // an empty frame would make `chunks` panic, and carries nothing anyway
        let chunk_len = (self.frame_len() * batch_size).max(1);

        Ok(FrameBatches {
            chunks: self.samples.chunks(chunk_len),
        })
    }

    /// same shape, other samples; the caller guarantees equal length
    pub(crate) fn with_samples(&self, samples: Vec<T>) -> Self {
        debug_assert_eq!(samples.len(), self.samples.len());
        Self {
            shape: self.shape.clone(),
            samples,
        }
    }
}

impl<T> AsRef<[T]> for SampleArray<T> {
    fn as_ref(&self) -> &[T] {
        &self.samples
    }
}

/// Iterator over consecutive frame batches of a `SampleArray`
pub struct FrameBatches<'a, T> {
    chunks: Chunks<'a, T>,
}

impl<'a, T> Iterator for FrameBatches<'a, T> {
    type Item = &'a [T];

    fn next(&mut self) -> Option<Self::Item> {
        self.chunks.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}
