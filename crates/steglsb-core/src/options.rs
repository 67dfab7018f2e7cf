/// Default number of video frames decoded at once by the streaming decoder
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Codec configuration for hiding and unveiling
///
/// `num_lsb` is not stored inside the carrier, the same value has to be used
/// for hiding and for unveiling.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct CodecOptions {
    /// Number of low bits per sample that carry the message.
    /// Valid range is `1..=bit_depth` of the carrier samples.
    pub num_lsb: u32,

    /// Number of frames (entries of the leading axis) decoded per batch when
    /// unveiling in batches.
    pub batch_size: usize,

    /// If true a carrier without end-of-message marker is an error,
    /// otherwise the whole unveiled text is handed back.
    pub require_sentinel: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            num_lsb: 1,
            batch_size: DEFAULT_BATCH_SIZE,
            require_sentinel: false,
        }
    }
}

impl CodecOptions {
    pub fn with_num_lsb(mut self, num_lsb: u32) -> Self {
        self.num_lsb = num_lsb;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_require_sentinel(mut self, require_sentinel: bool) -> Self {
        self.require_sentinel = require_sentinel;
        self
    }
}
