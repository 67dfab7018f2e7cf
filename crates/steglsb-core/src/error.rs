use thiserror::Error;

pub type Result<T> = std::result::Result<T, StegError>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StegError {
    /// Represents a number of low bits that does not fit the sample width, e.g. 9 on `u8`
    #[error("num_lsb must be between 1 and {bit_depth}, got {num_lsb}")]
    InvalidLsbWidth { num_lsb: u32, bit_depth: u32 },

    /// Represents a message character that does not fit into one ASCII byte
    #[error("Secret message must be ASCII, found {character:?} at position {position}")]
    NonAsciiMessage { position: usize, character: char },

    /// Represents a carrier that has fewer sample slots than the message requires
    #[error(
        "Capacity Error: the carrier provides {available} sample slots \
         but {required} are required. Use a larger carrier, more LSBs or less data."
    )]
    InsufficientCapacity { required: usize, available: usize },

    /// Represents a shape that does not describe the sample buffer it is attached to
    #[error("Invalid sample array shape {shape:?} for {len} samples")]
    InvalidShape { shape: Vec<usize>, len: usize },

    /// Represents a frame batch size of zero
    #[error("Batch size must be at least 1 frame")]
    InvalidBatchSize,

    /// Represents an unveil of a carrier that holds no end-of-message marker
    #[error("No end-of-message marker found, the carrier holds no message for this num_lsb")]
    SentinelNotFound,
}
