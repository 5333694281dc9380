//! Transaction input referencing a previous output.
//!
//! Contains the previous transaction hash, output index, signature script
//! and sequence number, plus the witness stack when one has been attached.
//! Provides binary serialization/deserialization following the Bitcoin wire
//! format.

use chainparse_primitives::chainhash::{Hash, HASH_SIZE};
use chainparse_primitives::util::{ByteReader, ByteWriter};
use chainparse_primitives::PrimitivesError;
use chainparse_script::ScriptSig;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::TransactionError;

/// Default sequence number indicating a finalized input (no relative lock-time).
pub const DEFAULT_SEQUENCE_NUMBER: u32 = 0xFFFF_FFFF;

/// A single input of a transaction.
///
/// # Wire format
///
/// | Field             | Size              |
/// |-------------------|-------------------|
/// | prev_tx_hash      | 32 bytes (LE)     |
/// | prev_tx_out_index | 4 bytes (LE)      |
/// | script length     | VarInt            |
/// | script_sig        | variable          |
/// | sequence_no       | 4 bytes (LE)      |
///
/// Witnesses are not part of this layout. They live in a separate section
/// of a segwit transaction and are attached after parsing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    /// Hash of the transaction holding the spent output. Displays as
    /// byte-reversed hex.
    pub prev_tx_hash: Hash,

    /// Index of the spent output within that transaction.
    pub prev_tx_out_index: u32,

    /// The unlocking script. Not tokenized until first inspected.
    pub script_sig: ScriptSig,

    /// Sequence number. Defaults to `0xFFFFFFFF` (finalized).
    pub sequence_no: u32,

    #[serde(default, with = "witness_hex", skip_serializing_if = "Vec::is_empty")]
    witnesses: Vec<Vec<u8>>,
}

impl Input {
    /// Create an input spending `prev_tx_hash:prev_tx_out_index`.
    ///
    /// The sequence number is finalized and no witnesses are attached.
    pub fn new(prev_tx_hash: Hash, prev_tx_out_index: u32, script_sig: ScriptSig) -> Self {
        Input {
            prev_tx_hash,
            prev_tx_out_index,
            script_sig,
            sequence_no: DEFAULT_SEQUENCE_NUMBER,
            witnesses: Vec::new(),
        }
    }

    /// Deserialize an `Input` from a `ByteReader`.
    ///
    /// # Arguments
    /// * `reader` - The reader positioned at the start of an encoded input.
    ///
    /// # Returns
    /// `Ok(Input)` on success, or `TransactionError::Read` naming the field
    /// that ran past the end of the data.
    pub fn read_from(reader: &mut ByteReader) -> Result<Self, TransactionError> {
        let prev_tx_hash = Hash::new(
            reader.read_array::<HASH_SIZE>().map_err(read_error("prev_tx_hash"))?,
        );
        let prev_tx_out_index = reader.read_u32_le().map_err(read_error("prev_tx_out_index"))?;
        let script_sig =
            ScriptSig::from_bytes(reader.read_string().map_err(read_error("script_sig"))?);
        let sequence_no = reader.read_u32_le().map_err(read_error("sequence_no"))?;

        trace!(
            prev_tx = %prev_tx_hash,
            prev_tx_out_index,
            script_len = script_sig.len(),
            sequence_no,
            "decoded input"
        );

        Ok(Input {
            prev_tx_hash,
            prev_tx_out_index,
            script_sig,
            sequence_no,
            witnesses: Vec::new(),
        })
    }

    /// Serialize this `Input` into a `ByteWriter`.
    ///
    /// Witnesses are never written.
    pub fn write_to(&self, writer: &mut ByteWriter) {
        writer.write_bytes(self.prev_tx_hash.as_bytes());
        writer.write_u32_le(self.prev_tx_out_index);
        writer.write_string(self.script_sig.to_bytes());
        writer.write_u32_le(self.sequence_no);
    }

    /// Decode exactly one input from `bytes`.
    ///
    /// # Returns
    /// The input, a `Read` error if the data is truncated, or
    /// `TrailingData` if bytes remain after the input.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        let mut reader = ByteReader::new(bytes);
        let input = Input::read_from(&mut reader)?;
        match reader.remaining() {
            0 => Ok(input),
            n => Err(TransactionError::TrailingData(n)),
        }
    }

    /// Decode exactly one input from a hex string.
    pub fn from_hex(hex_str: &str) -> Result<Self, TransactionError> {
        Input::from_bytes(&hex::decode(hex_str)?)
    }

    /// Serialize this input to a byte vector.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = ByteWriter::with_capacity(HASH_SIZE + 9 + self.script_sig.len() + 4);
        self.write_to(&mut writer);
        writer.into_bytes()
    }

    /// Serialize this input to a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// The previous transaction hash as 64 characters of display hex.
    pub fn prev_tx_hash_hex(&self) -> String {
        self.prev_tx_hash.to_string()
    }

    /// Check whether this is the input of a coinbase transaction.
    ///
    /// Only the previous transaction hash is inspected: it must be all
    /// zeros. The output index is not checked.
    pub fn is_coinbase(&self) -> bool {
        self.prev_tx_hash == Hash::ZERO
    }

    /// The attached witness stack, empty until one is set.
    pub fn witnesses(&self) -> &[Vec<u8>] {
        &self.witnesses
    }

    /// Attach a witness stack parsed from the transaction's witness section.
    pub fn set_witnesses(&mut self, witnesses: Vec<Vec<u8>>) {
        self.witnesses = witnesses;
    }

    pub fn has_witnesses(&self) -> bool {
        !self.witnesses.is_empty()
    }
}

fn read_error(field: &'static str) -> impl FnOnce(PrimitivesError) -> TransactionError {
    move |source| TransactionError::Read { field, source }
}

/// Witness items as a list of hex strings.
mod witness_hex {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(stack: &[Vec<u8>], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(stack.iter().map(hex::encode))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Vec<u8>>, D::Error> {
        Vec::<String>::deserialize(deserializer)?
            .iter()
            .map(|item| hex::decode(item).map_err(serde::de::Error::custom))
            .collect()
    }
}
