use crate::bit_grouper::group;
use crate::error::Result;
use crate::sample::{conceal, Sample};
use crate::sample_array::SampleArray;
use crate::validation::{ensure_capacity, validate_ascii, validate_num_lsb};

/// Hides `message` in the `num_lsb` low bits of `carrier`.
///
/// Returns a new array of the same shape, the carrier is only read. One
/// payload symbol goes into each sample in flattened order, all samples past
/// the payload are copied unchanged. Nothing is written unless every check
/// passed.
pub fn encode<T: Sample>(
    carrier: &SampleArray<T>,
    message: &str,
    num_lsb: u32,
) -> Result<SampleArray<T>> {
    validate_num_lsb(carrier.bit_depth(), num_lsb)?;
    validate_ascii(message)?;

    let symbols = group(message, num_lsb)?;
    ensure_capacity(symbols.len(), carrier.len())?;

    let mut samples = carrier.samples().to_vec();
    hide_symbols(&mut samples, &symbols, num_lsb);

    Ok(carrier.with_samples(samples))
}

/// writes the symbols into the leading samples, `samples` must be long enough
pub(crate) fn hide_symbols<T: Sample>(samples: &mut [T], symbols: &[u32], num_lsb: u32) {
    samples
        .iter_mut()
        .zip(symbols)
        .for_each(|(sample, &symbol)| *sample = conceal(*sample, symbol, num_lsb));
}
