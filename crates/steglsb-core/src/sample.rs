use std::fmt::Debug;

/// the element types a carrier can be made of
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SampleType {
    /// image pixels and 8 bit PCM audio
    UnsignedByte,
    /// 16 bit PCM audio
    SignedTwoByte,
    /// 32 bit PCM audio
    SignedFourByte,
}

impl SampleType {
    pub fn bit_depth(self) -> u32 {
        match self {
            SampleType::UnsignedByte => u8::BITS,
            SampleType::SignedTwoByte => i16::BITS,
            SampleType::SignedFourByte => i32::BITS,
        }
    }
}

/// A fixed width integer that carries hidden bits in its low end.
///
/// All bit manipulation happens on the raw two's complement pattern of the
/// sample, widened to `u32`, so signed samples behave exactly like unsigned
/// ones of the same width.
pub trait Sample: Copy + Debug + PartialEq + Send + Sync + 'static {
    const SAMPLE_TYPE: SampleType;

    /// raw bit pattern, zero extended
    fn to_bits(self) -> u32;

    /// inverse of `to_bits`, higher bits beyond the sample width are dropped
    fn from_bits(bits: u32) -> Self;

    fn bit_depth() -> u32 {
        Self::SAMPLE_TYPE.bit_depth()
    }
}

impl Sample for u8 {
    const SAMPLE_TYPE: SampleType = SampleType::UnsignedByte;

    #[inline]
    fn to_bits(self) -> u32 {
        self as u32
    }

    #[inline]
    fn from_bits(bits: u32) -> Self {
        bits as u8
    }
}

impl Sample for i16 {
    const SAMPLE_TYPE: SampleType = SampleType::SignedTwoByte;

    #[inline]
    fn to_bits(self) -> u32 {
        self as u16 as u32
    }

    #[inline]
    fn from_bits(bits: u32) -> Self {
        bits as u16 as i16
    }
}

impl Sample for i32 {
    const SAMPLE_TYPE: SampleType = SampleType::SignedFourByte;

    #[inline]
    fn to_bits(self) -> u32 {
        self as u32
    }

    #[inline]
    fn from_bits(bits: u32) -> Self {
        bits as i32
    }
}

/// mask selecting the `num_lsb` lowest bits, `num_lsb` must be in `1..=32`
#[inline]
pub(crate) fn low_mask(num_lsb: u32) -> u32 {
    u32::MAX >> (u32::BITS - num_lsb)
}

/// replaces the `num_lsb` low bits of `sample` by `symbol`
#[inline]
pub(crate) fn conceal<T: Sample>(sample: T, symbol: u32, num_lsb: u32) -> T {
    let mask = low_mask(num_lsb);
    T::from_bits((sample.to_bits() & !mask) | (symbol & mask))
}

/// reads the `num_lsb` low bits of `sample`
#[inline]
pub(crate) fn reveal<T: Sample>(sample: T, num_lsb: u32) -> u32 {
    sample.to_bits() & low_mask(num_lsb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_mask_should_cover_exactly_num_lsb_bits() {
        assert_eq!(low_mask(1), 0b1);
        assert_eq!(low_mask(3), 0b111);
        assert_eq!(low_mask(8), 0xff);
        assert_eq!(low_mask(16), 0xffff);
        assert_eq!(low_mask(32), u32::MAX);
    }

    #[test]
    fn signed_samples_should_keep_their_sign_bit() {
        let s: i16 = -2;
        let hidden = conceal(s, 0b1, 1);
        assert_eq!(hidden, -1);
        assert_eq!(reveal(hidden, 1), 1);

        let s: i32 = i32::MIN;
        let hidden = conceal(s, 0b101, 3);
        assert_eq!(hidden, i32::MIN + 5);
        assert_eq!(reveal(hidden, 3), 0b101);
    }

    #[test]
    fn full_width_conceal_should_replace_the_whole_sample() {
        assert_eq!(conceal(0xaa_u8, 0x55, 8), 0x55);
        assert_eq!(conceal(-1_i16, 0x1234, 16), 0x1234);
        assert_eq!(conceal(7_i32, 0xffff_ffff, 32), -1);
    }

    #[test]
    fn bit_depth_should_follow_the_sample_width() {
        assert_eq!(u8::bit_depth(), 8);
        assert_eq!(i16::bit_depth(), 16);
        assert_eq!(i32::bit_depth(), 32);
    }
}
