//! Preflight checks shared by hiding and unveiling.
//!
//! Every public codec operation runs these before touching any sample, so a
//! failed check never leaves a half written carrier behind.

use crate::error::{Result, StegError};
use crate::SENTINEL;

/// Checks `1 <= num_lsb <= bit_depth`.
pub fn validate_num_lsb(bit_depth: u32, num_lsb: u32) -> Result<()> {
    if num_lsb == 0 || num_lsb > bit_depth {
        return Err(StegError::InvalidLsbWidth { num_lsb, bit_depth });
    }

    Ok(())
}

/// Checks that every character of `message` fits into one ASCII byte.
pub fn validate_ascii(message: &str) -> Result<()> {
    match message.chars().enumerate().find(|(_, c)| !c.is_ascii()) {
        Some((position, character)) => Err(StegError::NonAsciiMessage {
            position,
            character,
        }),
        None => Ok(()),
    }
}

/// Number of samples needed to carry `message_len_bits` bits at `num_lsb`
/// bits per sample, the last sample may be partially used.
pub fn required_slots(message_len_bits: usize, num_lsb: u32) -> usize {
    message_len_bits.div_ceil(num_lsb as usize)
}

/// Fails with `InsufficientCapacity` if `required` exceeds `available`.
pub fn ensure_capacity(required: usize, available: usize) -> Result<()> {
    if required > available {
        return Err(StegError::InsufficientCapacity {
            required,
            available,
        });
    }

    Ok(())
}

/// How many ASCII characters fit into `slots` samples after reserving room
/// for the end-of-message marker.
pub fn capacity_in_chars(slots: usize, num_lsb: u32) -> usize {
    let bytes = slots.saturating_mul(num_lsb as usize) / 8;
    bytes.saturating_sub(SENTINEL.len())
}
