/// Unified error type for all primitives operations.
///
/// Covers byte stream underruns, hash/hex parsing and address codec failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrimitivesError {
    /// A read asked for more bytes than the stream still holds.
    #[error("stream underrun: requested {requested} bytes, {remaining} remaining")]
    StreamUnderrun { requested: usize, remaining: usize },

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid hash: {0}")]
    InvalidHash(String),

    #[error("invalid base58: {0}")]
    InvalidBase58(String),

    #[error("checksum mismatch")]
    ChecksumMismatch,

    /// An address codec rejected its payload, version or prefix.
    #[error("encode error: {0}")]
    Encode(String),
}

impl From<hex::FromHexError> for PrimitivesError {
    fn from(e: hex::FromHexError) -> Self {
        PrimitivesError::InvalidHex(e.to_string())
    }
}
