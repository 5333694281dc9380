//! Script operation tokenizing and encoding.
//!
//! An operation is either a bare instruction (one opcode byte) or a data
//! push carrying its operand and the push encoding that introduced it.
//! Keeping the encoding makes tokenizing lossless: `encode_operations`
//! reproduces the original bytes even for non-minimal pushes.

use tracing::trace;

use crate::opcodes::*;
use crate::ScriptError;

/// How a data push announces its operand length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PushEncoding {
    /// Lead byte 0x01..=0x4b is itself the length.
    Direct,
    /// OP_PUSHDATA1 followed by a 1-byte length.
    PushData1,
    /// OP_PUSHDATA2 followed by a 2-byte little-endian length.
    PushData2,
    /// OP_PUSHDATA4 followed by a 4-byte little-endian length.
    PushData4,
}

impl PushEncoding {
    /// Pick the shortest encoding able to carry `len` operand bytes.
    ///
    /// Zero-length pushes have no direct form (0x00 is OP_0), so they use
    /// OP_PUSHDATA1.
    pub fn minimal(len: usize) -> Result<Self, ScriptError> {
        match len {
            1..=75 => Ok(PushEncoding::Direct),
            0 | 76..=0xff => Ok(PushEncoding::PushData1),
            0x100..=0xffff => Ok(PushEncoding::PushData2),
            _ if u32::try_from(len).is_ok() => Ok(PushEncoding::PushData4),
            _ => Err(ScriptError::PushLength { len, encoding: "OP_PUSHDATA4" }),
        }
    }

    /// Width of the length field that follows the lead byte.
    pub fn length_width(&self) -> usize {
        match self {
            PushEncoding::Direct => 0,
            PushEncoding::PushData1 => 1,
            PushEncoding::PushData2 => 2,
            PushEncoding::PushData4 => 4,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            PushEncoding::Direct => "a direct push",
            PushEncoding::PushData1 => "OP_PUSHDATA1",
            PushEncoding::PushData2 => "OP_PUSHDATA2",
            PushEncoding::PushData4 => "OP_PUSHDATA4",
        }
    }

    fn fits(&self, len: usize) -> bool {
        match self {
            PushEncoding::Direct => (1..=75).contains(&len),
            PushEncoding::PushData1 => len <= 0xff,
            PushEncoding::PushData2 => len <= 0xffff,
            PushEncoding::PushData4 => u32::try_from(len).is_ok(),
        }
    }
}

/// A single parsed element of a script.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// A non-push opcode, including OP_0 and OP_1 .. OP_16.
    Instruction(u8),
    /// Literal operand bytes. The lead byte is not an opcode.
    Push {
        encoding: PushEncoding,
        data: Vec<u8>,
    },
}

impl Operation {
    /// Build a push of `data` using the minimal encoding.
    ///
    /// An empty operand becomes the OP_0 instruction, which is how scripts
    /// push the empty byte string.
    pub fn push(data: &[u8]) -> Result<Self, ScriptError> {
        if data.is_empty() {
            return Ok(Operation::Instruction(OP_0));
        }
        Ok(Operation::Push {
            encoding: PushEncoding::minimal(data.len())?,
            data: data.to_vec(),
        })
    }

    /// The opcode of an instruction; `None` for pushes.
    pub fn opcode(&self) -> Option<u8> {
        match self {
            Operation::Instruction(op) => Some(*op),
            Operation::Push { .. } => None,
        }
    }

    /// Check whether this is the instruction `op`.
    pub fn is_opcode(&self, op: u8) -> bool {
        self.opcode() == Some(op)
    }

    /// The operand of a push; `None` for instructions.
    pub fn data(&self) -> Option<&[u8]> {
        match self {
            Operation::Push { data, .. } => Some(data),
            Operation::Instruction(_) => None,
        }
    }

    /// Operand length of a push; `None` for instructions.
    pub fn push_len(&self) -> Option<usize> {
        self.data().map(<[u8]>::len)
    }

    /// Operand length, 0 for instructions.
    pub fn size(&self) -> usize {
        self.push_len().unwrap_or(0)
    }

    /// The operand byte of a one-byte push.
    ///
    /// OP_0 reads as the empty operand of value zero, which is how segwit
    /// outputs state their witness version.
    pub fn single_byte_operand(&self) -> Option<u8> {
        match self {
            Operation::Instruction(OP_0) => Some(0),
            Operation::Push { data, .. } if data.len() == 1 => Some(data[0]),
            _ => None,
        }
    }

    /// A key count in a multisig template.
    ///
    /// Either the operand of a one-byte push or the value of OP_1 .. OP_16.
    pub fn count_value(&self) -> Option<u8> {
        match self {
            Operation::Instruction(op) => small_int_value(*op),
            push => push.single_byte_operand(),
        }
    }

    /// Number of bytes this operation occupies in a script.
    pub fn encoded_len(&self) -> usize {
        match self {
            Operation::Instruction(_) => 1,
            Operation::Push { encoding, data } => 1 + encoding.length_width() + data.len(),
        }
    }

    /// Append the wire encoding of this operation to `out`.
    ///
    /// # Returns
    /// `Ok(())`, `PushOpcode` if an instruction uses a push lead byte, or
    /// `PushLength` if the operand cannot be carried by the push's encoding.
    pub fn write_to(&self, out: &mut Vec<u8>) -> Result<(), ScriptError> {
        match self {
            Operation::Instruction(op @ OP_DATA_1..=OP_PUSHDATA4) => {
                return Err(ScriptError::PushOpcode(*op));
            }
            Operation::Instruction(op) => out.push(*op),
            Operation::Push { encoding, data } => {
                if !encoding.fits(data.len()) {
                    return Err(ScriptError::PushLength {
                        len: data.len(),
                        encoding: encoding.name(),
                    });
                }
                write_push_prefix(*encoding, data.len(), out);
                out.extend_from_slice(data);
            }
        }
        Ok(())
    }

    /// Render as an ASM token: opcode name, or hex for pushes.
    pub fn to_asm_string(&self) -> String {
        match self {
            Operation::Instruction(op) => opcode_to_string(*op).to_string(),
            Operation::Push { data, .. } => hex::encode(data),
        }
    }
}

/// Tokenize raw script bytes into operations, left to right.
///
/// | Lead byte      | Token                                      |
/// |----------------|--------------------------------------------|
/// | 0x01..=0x4b    | push of the next `lead` bytes              |
/// | OP_PUSHDATA1/2/4 | 1/2/4-byte LE length, then that many bytes |
/// | anything else  | instruction                                |
///
/// # Arguments
/// * `bytes` - The raw script bytes.
///
/// # Returns
/// The operations in order, or `MalformedScript` if a push (or its length
/// field) runs past the end of the script.
pub fn tokenize(bytes: &[u8]) -> Result<Vec<Operation>, ScriptError> {
    let mut ops = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let lead = bytes[pos];
        let encoding = match lead {
            OP_DATA_1..=OP_DATA_75 => PushEncoding::Direct,
            OP_PUSHDATA1 => PushEncoding::PushData1,
            OP_PUSHDATA2 => PushEncoding::PushData2,
            OP_PUSHDATA4 => PushEncoding::PushData4,
            _ => {
                ops.push(Operation::Instruction(lead));
                pos += 1;
                continue;
            }
        };

        let rest = &bytes[pos + 1..];
        let width = encoding.length_width();
        let malformed = |declared: u64| ScriptError::MalformedScript {
            offset: pos,
            declared,
            available: rest.len(),
        };

        if rest.len() < width {
            return Err(malformed(width as u64));
        }
        let len = if width == 0 {
            u64::from(lead)
        } else {
            let mut le = [0u8; 8];
            le[..width].copy_from_slice(&rest[..width]);
            u64::from_le_bytes(le)
        };
        let declared = width as u64 + len;
        if (rest.len() as u64) < declared {
            return Err(malformed(declared));
        }

        let end = width + len as usize;
        ops.push(Operation::Push { encoding, data: rest[width..end].to_vec() });
        pos += 1 + end;
    }

    trace!(bytes = bytes.len(), operations = ops.len(), "tokenized script");
    Ok(ops)
}

/// Encode operations back into script bytes.
///
/// Inverse of [`tokenize`]: each push is written with its own encoding, so
/// `encode_operations(&tokenize(s)?)? == s` for every script that tokenizes.
pub fn encode_operations(ops: &[Operation]) -> Result<Vec<u8>, ScriptError> {
    let mut out = Vec::with_capacity(ops.iter().map(Operation::encoded_len).sum());
    for op in ops {
        op.write_to(&mut out)?;
    }
    Ok(out)
}

/// Compute the minimal push prefix for an operand of `data_len` bytes.
///
/// Agrees with [`Operation::push`]: an empty operand is the single byte
/// OP_0.
pub fn push_data_prefix(data_len: usize) -> Result<Vec<u8>, ScriptError> {
    if data_len == 0 {
        return Ok(vec![OP_0]);
    }
    let mut prefix = Vec::with_capacity(5);
    write_push_prefix(PushEncoding::minimal(data_len)?, data_len, &mut prefix);
    Ok(prefix)
}

// Callers have already checked that `len` fits `encoding`.
fn write_push_prefix(encoding: PushEncoding, len: usize, out: &mut Vec<u8>) {
    match encoding {
        PushEncoding::Direct => out.push(len as u8),
        PushEncoding::PushData1 => out.extend_from_slice(&[OP_PUSHDATA1, len as u8]),
        PushEncoding::PushData2 => {
            out.push(OP_PUSHDATA2);
            out.extend_from_slice(&(len as u16).to_le_bytes());
        }
        PushEncoding::PushData4 => {
            out.push(OP_PUSHDATA4);
            out.extend_from_slice(&(len as u32).to_le_bytes());
        }
    }
}
