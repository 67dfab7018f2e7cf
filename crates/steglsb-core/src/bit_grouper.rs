use std::io::Cursor;

use bitstream_io::{BigEndian, BitRead, BitReader};

use crate::error::Result;
use crate::validation::{required_slots, validate_ascii, validate_num_lsb};
use crate::SENTINEL;

/// Widest symbol a sample can take, the bit depth of `i32` samples.
pub const MAX_SYMBOL_WIDTH: u32 = u32::BITS;

/// Turns an ASCII `message` into payload symbols of `num_lsb` bits each.
///
/// The end-of-message marker is appended before grouping. The bitstream is
/// read most significant bit first and the last symbol is padded with zero
/// bits on the right.
pub fn group(message: &str, num_lsb: u32) -> Result<Vec<u32>> {
    validate_ascii(message)?;
    validate_num_lsb(MAX_SYMBOL_WIDTH, num_lsb)?;

    let mut payload = Vec::with_capacity(message.len() + SENTINEL.len());
    payload.extend_from_slice(message.as_bytes());
    payload.extend_from_slice(SENTINEL.as_bytes());

    Ok(PayloadSymbols::new(&payload, num_lsb)?.collect())
}

/// Iterator over the `num_lsb` wide groups of a byte buffer
pub struct PayloadSymbols<'a> {
    reader: BitReader<Cursor<&'a [u8]>, BigEndian>,
    remaining_bits: usize,
    num_lsb: u32,
}

impl<'a> PayloadSymbols<'a> {
    /// Fails with `InvalidLsbWidth` unless `num_lsb` is within `1..=32`.
    pub fn new(bytes: &'a [u8], num_lsb: u32) -> Result<Self> {
        validate_num_lsb(MAX_SYMBOL_WIDTH, num_lsb)?;

        Ok(Self {
            reader: BitReader::endian(Cursor::new(bytes), BigEndian),
            remaining_bits: bytes.len() * 8,
            num_lsb,
        })
    }
}

impl Iterator for PayloadSymbols<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining_bits == 0 {
            return None;
        }
        let take = self.remaining_bits.min(self.num_lsb as usize) as u32;
        let bits: u32 = self.reader.read(take).ok()?;
        self.remaining_bits -= take as usize;

        // zero padding of the last, short group
        Some(bits << (self.num_lsb - take))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = required_slots(self.remaining_bits, self.num_lsb);
        (n, Some(n))
    }
}

impl ExactSizeIterator for PayloadSymbols<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StegError;

    #[test]
    fn should_group_single_bits_msb_first() {
        // 'H' = 0b0100_1000
        let symbols: Vec<u32> = PayloadSymbols::new(b"H", 1).unwrap().collect();
        assert_eq!(symbols, vec![0, 1, 0, 0, 1, 0, 0, 0]);
    }

    #[test]
    fn should_zero_pad_the_last_group() {
        // 0b0100_1000 -> 010 010 00(0)
        let symbols: Vec<u32> = PayloadSymbols::new(b"H", 3).unwrap().collect();
        assert_eq!(symbols, vec![0b010, 0b010, 0b000]);

        // 0b0100_0001 -> 0100000 1(000000)
        let symbols: Vec<u32> = PayloadSymbols::new(b"A", 7).unwrap().collect();
        assert_eq!(symbols, vec![0b010_0000, 0b100_0000]);
    }

    #[test]
    fn should_span_bytes_for_wide_groups() {
        let symbols: Vec<u32> = PayloadSymbols::new(&[0x12, 0x34, 0x56], 16)
            .unwrap()
            .collect();
        assert_eq!(symbols, vec![0x1234, 0x5600]);

        let bytes = [0xde, 0xad, 0xbe, 0xef, 0x01];
        let symbols: Vec<u32> = PayloadSymbols::new(&bytes, 32).unwrap().collect();
        assert_eq!(symbols, vec![0xdead_beef, 0x0100_0000]);
    }

    #[test]
    fn should_report_the_exact_symbol_count() {
        let symbols = PayloadSymbols::new(b"Hello", 3).unwrap();
        assert_eq!(symbols.len(), 14);
        assert_eq!(symbols.count(), 14);
    }

    #[test]
    fn group_should_append_the_sentinel() {
        let symbols = group("Hello, World!", 1).unwrap();
        assert_eq!(symbols.len(), 144);
        // last byte is '=' = 0b0011_1101
        assert_eq!(&symbols[136..], &[0, 0, 1, 1, 1, 1, 0, 1]);
    }

    #[test]
    fn should_refuse_widths_outside_a_sample() {
        for num_lsb in [0, 33] {
            assert_eq!(
                PayloadSymbols::new(b"x", num_lsb).err(),
                Some(StegError::InvalidLsbWidth {
                    num_lsb,
                    bit_depth: MAX_SYMBOL_WIDTH
                })
            );
        }
        assert_eq!(PayloadSymbols::new(b"x", 32).unwrap().count(), 1);
    }

    #[test]
    fn group_should_reject_non_ascii_before_grouping() {
        assert_eq!(
            group("café", 1),
            Err(StegError::NonAsciiMessage {
                position: 3,
                character: 'é'
            })
        );
    }

    #[test]
    fn group_should_reject_zero_and_oversized_widths() {
        assert!(group("x", 0).is_err());
        assert!(group("x", 33).is_err());
        assert_eq!(group("", 32).unwrap().len(), 2);
    }
}
