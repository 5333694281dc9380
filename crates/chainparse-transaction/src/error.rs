use chainparse_primitives::PrimitivesError;

/// Error types for transaction input decoding and encoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransactionError {
    /// The byte stream ran out while reading a field of an input.
    #[error("reading {field}: {source}")]
    Read {
        /// The input field being read.
        field: &'static str,
        #[source]
        source: PrimitivesError,
    },

    /// Bytes were left over after a complete input.
    #[error("{0} trailing bytes after input")]
    TrailingData(usize),

    /// Invalid hex string.
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

impl From<hex::FromHexError> for TransactionError {
    fn from(e: hex::FromHexError) -> Self {
        TransactionError::InvalidHex(e.to_string())
    }
}
