//! Unveiling of carriers that are too large to hold in memory at once.
//!
//! A video is handed in as consecutive batches of frames. Each batch is
//! unveiled on its own, only the text found so far, the bits that did not
//! complete a byte and a short run of `=` that may open an end-of-message
//! marker are carried from one batch to the next. The result is identical to
//! unveiling the concatenated batches in one go.

use std::marker::PhantomData;
use std::mem;

use crate::decoder::{scan_until_sentinel, LsbReader, PendingBits, Unveiled};
use crate::error::{Result, StegError};
use crate::sample::Sample;
use crate::sample_array::SampleArray;
use crate::validation::validate_num_lsb;
use crate::SENTINEL;

/// the marker is a run of this single character
const MARKER_CHAR: char = '=';

/// Stateful decoder that is fed one batch of samples at a time
pub struct BatchedDecoder<T> {
    num_lsb: u32,
    /// confirmed text, never ends with `MARKER_CHAR`
    accumulated: String,
    /// trailing marker characters of the last batch, not yet confirmed as text
    held_back: usize,
    pending: PendingBits,
    message: Option<String>,
    _samples: PhantomData<T>,
}

impl<T: Sample> BatchedDecoder<T> {
    pub fn new(num_lsb: u32) -> Result<Self> {
        validate_num_lsb(T::bit_depth(), num_lsb)?;

        Ok(Self {
            num_lsb,
            accumulated: String::new(),
            held_back: 0,
            pending: PendingBits::new(),
            message: None,
            _samples: PhantomData,
        })
    }

    /// true once the end-of-message marker was seen
    pub fn is_done(&self) -> bool {
        self.message.is_some()
    }

    /// Unveils the next batch.
    ///
    /// Returns the message as soon as the end-of-message marker is complete,
    /// possibly spread over this and the previous batch. Batches pushed after
    /// that are ignored.
    pub fn push_batch(&mut self, batch: &[T]) -> Option<&str> {
        if self.message.is_none() {
            self.unveil_batch(batch);
        }

        self.message.as_deref()
    }

    fn unveil_batch(&mut self, batch: &[T]) {
        let pending = mem::replace(&mut self.pending, PendingBits::new());
        let mut reader = LsbReader::resume(batch, self.num_lsb, pending);
        let unveiled = scan_until_sentinel(&mut reader, true);
        self.pending = reader.into_pending();

        let mut candidate = String::with_capacity(self.held_back + unveiled.text.len());
        candidate.extend(std::iter::repeat(MARKER_CHAR).take(self.held_back));
        candidate.push_str(&unveiled.text);

        if let Some(stop) = candidate.find(SENTINEL) {
            let mut message = mem::take(&mut self.accumulated);
            message.push_str(&candidate[..stop]);
            self.held_back = 0;
            self.message = Some(message);
            return;
        }

        // no marker inside, so at most SENTINEL.len() - 1 of them trail
        let text_len = candidate.trim_end_matches(MARKER_CHAR).len();
        self.held_back = candidate.len() - text_len;
        self.accumulated.push_str(&candidate[..text_len]);
    }

    /// Ends the stream. Held back `=` turned out to be text if no marker
    /// was found.
    pub fn finish(self) -> Unveiled {
        match self.message {
            Some(text) => Unveiled {
                text,
                sentinel_found: true,
            },
            None => {
                let mut text = self.accumulated;
                text.extend(std::iter::repeat(MARKER_CHAR).take(self.held_back));
                Unveiled {
                    text,
                    sentinel_found: false,
                }
            }
        }
    }
}

/// Unveils the message from a sequence of sample batches.
///
/// Equivalent to [`decode`](crate::decode) on the concatenation of all
/// batches, but only one batch has to be in memory at a time. Batches after
/// the one completing the marker are not pulled from `batches`.
pub fn decode_batched<T, I, B>(batches: I, num_lsb: u32) -> Result<String>
where
    T: Sample,
    I: IntoIterator<Item = B>,
    B: AsRef<[T]>,
{
    let unveiled = try_decode_batched(batches.into_iter().map(Ok::<B, StegError>), num_lsb)?;

    Ok(unveiled.text)
}

/// Like [`decode_batched`] for batch sources that can fail, e.g. when every
/// batch is read from disk. The first failing batch aborts unveiling.
pub fn try_decode_batched<T, I, B, E>(batches: I, num_lsb: u32) -> std::result::Result<Unveiled, E>
where
    T: Sample,
    I: IntoIterator<Item = std::result::Result<B, E>>,
    B: AsRef<[T]>,
    E: From<StegError>,
{
    let mut decoder = BatchedDecoder::<T>::new(num_lsb)?;
    for batch in batches {
        if decoder.push_batch(batch?.as_ref()).is_some() {
            break;
        }
    }

    Ok(decoder.finish())
}

/// Unveils `carrier` `batch_size` frames at a time along its leading axis.
pub fn decode_frames<T: Sample>(
    carrier: &SampleArray<T>,
    num_lsb: u32,
    batch_size: usize,
) -> Result<String> {
    decode_batched(carrier.frame_batches(batch_size)?, num_lsb)
}
