use std::io::{self, Read};
use std::slice::Iter;

use bitstream_io::{BigEndian, BitQueue};

use crate::error::{Result, StegError};
use crate::sample::{reveal, Sample};
use crate::sample_array::SampleArray;
use crate::validation::validate_num_lsb;
use crate::SENTINEL;

/// Bits unveiled from earlier samples that did not yet complete a byte.
/// At most 7 bits wait here between two samples.
pub(crate) type PendingBits = BitQueue<BigEndian, u64>;

/// Reads the hidden bytes of a sample slice.
///
/// Every sample contributes its `num_lsb` low bits, most significant first,
/// and every 8 collected bits form one byte. Samples are only touched when
/// the next byte is requested, a trailing group of less than 8 bits is never
/// returned.
pub struct LsbReader<'a, T> {
    samples: Iter<'a, T>,
    num_lsb: u32,
    pending: PendingBits,
}

impl<'a, T: Sample> LsbReader<'a, T> {
    pub fn new(samples: &'a [T], num_lsb: u32) -> Result<Self> {
        validate_num_lsb(T::bit_depth(), num_lsb)?;

        Ok(Self::resume(samples, num_lsb, PendingBits::new()))
    }

    /// continues with bits left over from a previous slice
    pub(crate) fn resume(samples: &'a [T], num_lsb: u32, pending: PendingBits) -> Self {
        Self {
            samples: samples.iter(),
            num_lsb,
            pending,
        }
    }

    pub(crate) fn into_pending(self) -> PendingBits {
        self.pending
    }

    fn next_byte(&mut self) -> Option<u8> {
        while self.pending.len() < 8 {
            let sample = self.samples.next()?;
            self.pending
                .push(self.num_lsb, u64::from(reveal(*sample, self.num_lsb)));
        }

        Some(self.pending.pop(8) as u8)
    }
}

impl<T: Sample> Read for LsbReader<'_, T> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut bytes_read = 0;
        for slot in buf.iter_mut() {
            match self.next_byte() {
                Some(byte) => *slot = byte,
                None => break,
            }
            bytes_read += 1;
        }

        Ok(bytes_read)
    }
}

/// Text unveiled from a carrier or a part of it
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Unveiled {
    pub text: String,
    /// true if scanning stopped at the end-of-message marker
    pub sentinel_found: bool,
}

impl Unveiled {
    /// The message, or `SentinelNotFound` when `require_sentinel` is set and
    /// no marker was seen.
    pub fn into_message(self, require_sentinel: bool) -> Result<String> {
        if require_sentinel && !self.sentinel_found {
            return Err(StegError::SentinelNotFound);
        }

        Ok(self.text)
    }
}

/// Turns bytes into characters until the end-of-message marker shows up.
///
/// Each byte becomes the character of the same code point. With
/// `keep_sentinel` the marker stays at the end of the text.
pub(crate) fn scan_until_sentinel<R: Read>(reader: R, keep_sentinel: bool) -> Unveiled {
    let mut text = String::new();
    for byte in reader.bytes().map_while(|byte| byte.ok()) {
        text.push(char::from(byte));
        if text.ends_with(SENTINEL) {
            if !keep_sentinel {
                text.truncate(text.len() - SENTINEL.len());
            }
            return Unveiled {
                text,
                sentinel_found: true,
            };
        }
    }

    Unveiled {
        text,
        sentinel_found: false,
    }
}

/// Unveils the text of one frame or batch of frames.
pub fn decode_frame<T: Sample>(
    samples: &[T],
    num_lsb: u32,
    keep_sentinel: bool,
) -> Result<Unveiled> {
    let reader = LsbReader::new(samples, num_lsb)?;

    Ok(scan_until_sentinel(reader, keep_sentinel))
}

/// Unveils the message hidden in the `num_lsb` low bits of `carrier`.
///
/// Scanning stops at the end-of-message marker, which is stripped. A carrier
/// without marker yields everything it holds, uninterpreted.
pub fn decode<T: Sample>(carrier: &SampleArray<T>, num_lsb: u32) -> Result<String> {
    decode_frame(carrier.samples(), num_lsb, false).map(|unveiled| unveiled.text)
}

/// Like [`decode`] but a carrier without marker fails with `SentinelNotFound`.
pub fn decode_strict<T: Sample>(carrier: &SampleArray<T>, num_lsb: u32) -> Result<String> {
    decode_frame(carrier.samples(), num_lsb, false)?.into_message(true)
}
