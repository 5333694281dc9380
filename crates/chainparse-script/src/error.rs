use chainparse_primitives::PrimitivesError;

/// Error types for script operations.
///
/// Covers tokenizing failures, push encoding limits, hex input and output
/// scripts that cannot be turned into an address.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    /// A push declared more operand bytes than the script has left.
    #[error("malformed script: push at offset {offset} declares {declared} bytes, {available} available")]
    MalformedScript {
        /// Offset of the push's lead byte.
        offset: usize,
        /// Bytes the push needs after its lead byte, length field included.
        declared: u64,
        /// Bytes actually left after the lead byte.
        available: usize,
    },

    /// The output script matches none of the addressable templates.
    #[error("Unable to decode output address")]
    UnrecognizedScript,

    /// A push operand length cannot be expressed by its push encoding.
    #[error("push of {len} bytes does not fit {encoding}")]
    PushLength { len: usize, encoding: &'static str },

    /// An instruction uses a byte that introduces a data push.
    #[error("opcode 0x{0:02x} is a push lead byte, not an instruction")]
    PushOpcode(u8),

    /// Invalid hex string.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Error from the primitives crate (address codecs).
    #[error(transparent)]
    Primitives(#[from] PrimitivesError),
}

impl From<hex::FromHexError> for ScriptError {
    fn from(e: hex::FromHexError) -> Self {
        ScriptError::InvalidHex(e.to_string())
    }
}
