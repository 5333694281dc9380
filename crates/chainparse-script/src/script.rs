/// Bitcoin Script type - raw script bytes with a cached tokenization.
///
/// Scripts are used in transaction inputs (unlocking) and outputs (locking).
/// The bytes are the source of truth; the operation sequence is derived from
/// them on first use and kept for the life of the value.

use std::fmt;

use once_cell::sync::OnceCell;

use crate::opcodes::string_to_opcode;
use crate::operation::{encode_operations, tokenize, Operation};
use crate::ScriptError;

/// A Bitcoin script.
///
/// Equality, display and serialization only look at the bytes. The
/// tokenization cache is write-once, so a shared `&Script` can be tokenized
/// from several threads.
#[derive(Clone, Default)]
pub struct Script {
    bytes: Vec<u8>,
    operations: OnceCell<Result<Vec<Operation>, ScriptError>>,
}

impl Script {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Create a new empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a script from a hex-encoded string.
    ///
    /// # Arguments
    /// * `hex_str` - A hex string (e.g. "76a914...88ac").
    ///
    /// # Returns
    /// A `Script` wrapping the decoded bytes, or an error if the hex is invalid.
    pub fn from_hex(hex_str: &str) -> Result<Self, ScriptError> {
        Ok(Script::from(hex::decode(hex_str)?))
    }

    /// Create a script from raw bytes.
    ///
    /// Nothing is tokenized here; malformed bytes are accepted and reported
    /// by `operations()`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Script::from(bytes.to_vec())
    }

    /// Build a script by encoding a sequence of operations.
    ///
    /// # Returns
    /// The script, or `PushLength` if a push operand does not fit its
    /// encoding.
    pub fn from_operations(ops: &[Operation]) -> Result<Self, ScriptError> {
        Ok(Script::from(encode_operations(ops)?))
    }

    /// Create a script from a space-separated ASM string.
    ///
    /// Known opcode names become instructions; any other token is decoded
    /// as hex and pushed with the minimal encoding.
    ///
    /// # Arguments
    /// * `asm` - A space-separated ASM string.
    ///
    /// # Returns
    /// A `Script`, or an error if a token is neither an opcode nor hex.
    pub fn from_asm(asm: &str) -> Result<Self, ScriptError> {
        let ops = asm
            .split_whitespace()
            .map(|token| match string_to_opcode(token) {
                Some(op) => Ok(Operation::Instruction(op)),
                None => Operation::push(&hex::decode(token)?),
            })
            .collect::<Result<Vec<_>, ScriptError>>()?;
        Script::from_operations(&ops)
    }

    // -----------------------------------------------------------------------
    // Tokenization
    // -----------------------------------------------------------------------

    /// The script's operations, tokenized on first call and cached.
    ///
    /// # Returns
    /// The operations in order, or `MalformedScript` if a push runs past the
    /// end of the bytes. The same result is returned on every call.
    pub fn operations(&self) -> Result<&[Operation], ScriptError> {
        match self.operations.get_or_init(|| tokenize(&self.bytes)) {
            Ok(ops) => Ok(ops.as_slice()),
            Err(e) => Err(e.clone()),
        }
    }

    /// Check whether the tokenization has already been computed.
    pub fn is_tokenized(&self) -> bool {
        self.operations.get().is_some()
    }

    // -----------------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------------

    /// Encode the script as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    /// Convert the script to its ASM representation.
    ///
    /// Instructions appear by name and pushes as hex, separated by spaces.
    ///
    /// # Returns
    /// The ASM string, or an empty string if the script is malformed.
    pub fn to_asm(&self) -> String {
        match self.operations() {
            Ok(ops) => ops
                .iter()
                .map(Operation::to_asm_string)
                .collect::<Vec<_>>()
                .join(" "),
            Err(_) => String::new(),
        }
    }

    /// Return a reference to the underlying bytes.
    pub fn to_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the script and return its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Return the length of the script in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the script is empty (zero bytes).
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<Vec<u8>> for Script {
    fn from(bytes: Vec<u8>) -> Self {
        Script { bytes, operations: OnceCell::new() }
    }
}

impl PartialEq for Script {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for Script {}

impl fmt::Display for Script {
    /// Display the script as a lowercase hex string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script({})", self.to_hex())
    }
}

impl serde::Serialize for Script {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Script {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Script::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
