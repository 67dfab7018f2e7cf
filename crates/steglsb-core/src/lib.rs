//! # steglsb core
//!
//! Hides ASCII messages in the least significant bits of raw carrier
//! samples and unveils them again. A carrier is a [`SampleArray`] of `u8`,
//! `i16` or `i32` samples: image pixels `[H, W, C]`, PCM audio `[N, C]` or
//! video frames `[F, H, W, C]`. Reading and writing media files is left to
//! the caller.
//!
//! Every message is terminated by the end-of-message marker [`SENTINEL`].
//! The number of low bits used per sample (`num_lsb`) is not stored in the
//! carrier, it has to be known when unveiling.
//!
//! # Usage Examples
//!
//! ## Hide and unveil a message
//!
//! ```rust
//! use steglsb_core::{decode, encode, SampleArray};
//!
//! let carrier = SampleArray::from_samples(vec![0x80_u8; 200])?;
//! let secret = encode(&carrier, "Hello, World!", 1)?;
//!
//! assert_eq!(decode(&secret, 1)?, "Hello, World!");
//! # Ok::<(), steglsb_core::StegError>(())
//! ```
//!
//! ## Unveil video frames batch by batch
//!
//! ```rust
//! use steglsb_core::{decode_frames, encode, SampleArray};
//!
//! let video = SampleArray::new(&[30, 4, 4, 3], vec![0_u8; 30 * 4 * 4 * 3])?;
//! let secret = encode(&video, "frame by frame", 2)?;
//!
//! assert_eq!(decode_frames(&secret, 2, 10)?, "frame by frame");
//! # Ok::<(), steglsb_core::StegError>(())
//! ```
//!
//! ## Work with any sample type
//!
//! ```rust
//! use steglsb_core::{Carrier, CodecOptions, LsbCarrier, SampleArray};
//!
//! let audio: Carrier = SampleArray::new(&[512, 2], vec![-1_i16; 1024])?.into();
//! let opts = CodecOptions::default().with_num_lsb(4);
//!
//! let secret = audio.hide("stereo", &opts)?;
//! assert_eq!(secret.unveil(&opts)?, "stereo");
//! # Ok::<(), steglsb_core::StegError>(())
//! ```

#![warn(clippy::redundant_else)]

pub mod bit_grouper;
pub mod carrier;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod options;
pub mod sample;
pub mod sample_array;
pub mod streaming;
pub mod validation;

pub use crate::bit_grouper::group;
pub use crate::carrier::{Carrier, LsbCarrier};
pub use crate::decoder::{decode, decode_frame, decode_strict, LsbReader, Unveiled};
pub use crate::encoder::encode;
pub use crate::error::{Result, StegError};
pub use crate::options::CodecOptions;
pub use crate::sample::{Sample, SampleType};
pub use crate::sample_array::SampleArray;
pub use crate::streaming::{decode_batched, decode_frames, try_decode_batched, BatchedDecoder};

/// End-of-message marker appended to every hidden message
pub const SENTINEL: &str = "=====";
