//! Locking scripts and standard template classification.
//!
//! Each predicate inspects the script's cached operations. A script that
//! fails to tokenize matches no template.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::address;
use crate::opcodes::*;
use crate::{NetworkParams, Operation, Script, ScriptError};

/// Size of a compressed public key.
const COMPRESSED_PUBKEY_SIZE: usize = 33;
/// Size of an uncompressed public key.
const UNCOMPRESSED_PUBKEY_SIZE: usize = 65;
/// Size of a HASH160 digest and of a v0 key-hash witness program.
const HASH160_SIZE: usize = 20;
/// Size of a v0 script-hash witness program.
const WITNESS_SCRIPT_HASH_SIZE: usize = 32;

/// A script used as an output's locking script.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScriptPubKey(Script);

/// The standard template an output script matches.
///
/// Serializes as the stable name returned by [`ScriptType::as_str`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScriptType {
    #[serde(rename = "pubkey")]
    PayToPubKey,
    #[serde(rename = "pubkeyhash")]
    PayToPubKeyHash,
    #[serde(rename = "scripthash")]
    PayToScriptHash,
    #[serde(rename = "witness_v0_keyhash")]
    PayToWitnessPubKeyHash,
    #[serde(rename = "witness_v0_scripthash")]
    PayToWitnessScriptHash,
    #[serde(rename = "multisig")]
    Multisig,
    #[serde(rename = "nulldata")]
    Return,
    #[serde(rename = "nonstandard")]
    NonStandard,
}

impl ScriptType {
    /// Stable lowercase name, as used by block explorers.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptType::PayToPubKey => "pubkey",
            ScriptType::PayToPubKeyHash => "pubkeyhash",
            ScriptType::PayToScriptHash => "scripthash",
            ScriptType::PayToWitnessPubKeyHash => "witness_v0_keyhash",
            ScriptType::PayToWitnessScriptHash => "witness_v0_scripthash",
            ScriptType::Multisig => "multisig",
            ScriptType::Return => "nulldata",
            ScriptType::NonStandard => "nonstandard",
        }
    }

    /// Check whether outputs of this type have an address.
    pub fn is_addressable(&self) -> bool {
        matches!(
            self,
            ScriptType::PayToPubKey
                | ScriptType::PayToPubKeyHash
                | ScriptType::PayToScriptHash
                | ScriptType::PayToWitnessPubKeyHash
                | ScriptType::PayToWitnessScriptHash
        )
    }
}

impl fmt::Display for ScriptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ScriptPubKey {
    /// Wrap raw locking-script bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        ScriptPubKey(Script::from_bytes(bytes))
    }

    /// Create a locking script from a hex string.
    pub fn from_hex(hex_str: &str) -> Result<Self, ScriptError> {
        Script::from_hex(hex_str).map(ScriptPubKey)
    }

    /// Unwrap into the underlying `Script`.
    pub fn into_script(self) -> Script {
        self.0
    }

    fn ops(&self) -> Option<&[Operation]> {
        self.0.operations().ok()
    }

    // -----------------------------------------------------------------------
    // Template predicates
    // -----------------------------------------------------------------------

    /// OP_RETURN <anything>
    ///
    /// Only the first operation matters; whatever follows is still
    /// tokenized normally.
    pub fn is_return(&self) -> bool {
        matches!(self.ops(), Some([first, ..]) if first.is_opcode(OP_RETURN))
    }

    /// <33 or 65 byte pubkey> OP_CHECKSIG
    pub fn is_pay_to_pub_key(&self) -> bool {
        match self.ops() {
            Some([key, checksig]) => {
                matches!(key.push_len(), Some(COMPRESSED_PUBKEY_SIZE | UNCOMPRESSED_PUBKEY_SIZE))
                    && checksig.is_opcode(OP_CHECKSIG)
            }
            _ => false,
        }
    }

    /// OP_DUP OP_HASH160 <20 bytes> OP_EQUALVERIFY OP_CHECKSIG
    pub fn is_pay_to_pub_key_hash(&self) -> bool {
        match self.ops() {
            Some([dup, hash160, pkh, equalverify, checksig]) => {
                dup.is_opcode(OP_DUP)
                    && hash160.is_opcode(OP_HASH160)
                    && pkh.push_len() == Some(HASH160_SIZE)
                    && equalverify.is_opcode(OP_EQUALVERIFY)
                    && checksig.is_opcode(OP_CHECKSIG)
            }
            _ => false,
        }
    }

    /// OP_HASH160 <20 bytes> OP_EQUAL
    pub fn is_pay_to_script_hash(&self) -> bool {
        match self.ops() {
            Some([hash160, script_hash, equal]) => {
                hash160.is_opcode(OP_HASH160)
                    && script_hash.push_len() == Some(HASH160_SIZE)
                    && equal.is_opcode(OP_EQUAL)
            }
            _ => false,
        }
    }

    /// <m> <pubkey>... <n> OP_CHECKMULTISIG
    ///
    /// `m` and `n` are read with [`Operation::count_value`] and must be at
    /// least 1. The keys in between are not inspected.
    pub fn is_multisig(&self) -> bool {
        match self.ops() {
            Some([first, _, .., n, last]) => {
                first.count_value().map_or(false, |m| m >= 1)
                    && n.count_value().map_or(false, |n| n >= 1)
                    && last.is_opcode(OP_CHECKMULTISIG)
            }
            _ => false,
        }
    }

    /// OP_0 <20 bytes>
    pub fn is_pay_to_witness_pub_key_hash(&self) -> bool {
        self.is_witness_v0_program(HASH160_SIZE)
    }

    /// OP_0 <32 bytes>
    pub fn is_pay_to_witness_script_hash(&self) -> bool {
        self.is_witness_v0_program(WITNESS_SCRIPT_HASH_SIZE)
    }

    fn is_witness_v0_program(&self, program_len: usize) -> bool {
        match self.ops() {
            Some([version, program]) => {
                version.single_byte_operand() == Some(0) && program.push_len() == Some(program_len)
            }
            _ => false,
        }
    }

    // -----------------------------------------------------------------------
    // Classification
    // -----------------------------------------------------------------------

    /// Return the first template this script matches.
    ///
    /// Addressable templates are tried in address-derivation order, then
    /// multisig and OP_RETURN.
    pub fn script_type(&self) -> ScriptType {
        if self.is_pay_to_pub_key() {
            ScriptType::PayToPubKey
        } else if self.is_pay_to_pub_key_hash() {
            ScriptType::PayToPubKeyHash
        } else if self.is_pay_to_script_hash() {
            ScriptType::PayToScriptHash
        } else if self.is_pay_to_witness_pub_key_hash() {
            ScriptType::PayToWitnessPubKeyHash
        } else if self.is_pay_to_witness_script_hash() {
            ScriptType::PayToWitnessScriptHash
        } else if self.is_multisig() {
            ScriptType::Multisig
        } else if self.is_return() {
            ScriptType::Return
        } else {
            ScriptType::NonStandard
        }
    }

    /// Derive the address this script pays to.
    ///
    /// # Arguments
    /// * `params` - Address encoding parameters of the target chain.
    ///
    /// # Returns
    /// The address string, `MalformedScript` if the script does not tokenize,
    /// or `UnrecognizedScript` if it matches no addressable template.
    pub fn output_address(&self, params: &NetworkParams) -> Result<String, ScriptError> {
        address::output_address(self, params)
    }
}

impl Deref for ScriptPubKey {
    type Target = Script;

    fn deref(&self) -> &Script {
        &self.0
    }
}

impl From<Script> for ScriptPubKey {
    fn from(script: Script) -> Self {
        ScriptPubKey(script)
    }
}

impl From<Vec<u8>> for ScriptPubKey {
    fn from(bytes: Vec<u8>) -> Self {
        ScriptPubKey(Script::from(bytes))
    }
}

impl fmt::Display for ScriptPubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for ScriptPubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScriptPubKey({})", self.0.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPRESSED_KEY: &str = "026cf33373a9f3f6c676b75b543180703df225f7f8edbffedc417718a8ad4e89ce";
    const GENESIS_KEY: &str = "04678afdb0fe5548271967f1a67130b7105cd6a828e03909a67962e0ea1f61deb649f6bc3f4cef38c4f35504e51ec112de5c384df7ba0b8d578a4c702b6bf11d5f";

    fn spk(hex_str: &str) -> ScriptPubKey {
        ScriptPubKey::from_hex(hex_str).expect("valid hex")
    }

    fn p2pk() -> ScriptPubKey {
        spk(&format!("21{}ac", COMPRESSED_KEY))
    }
    fn p2pk_uncompressed() -> ScriptPubKey {
        spk(&format!("41{}ac", GENESIS_KEY))
    }
    fn p2pkh() -> ScriptPubKey {
        spk("76a914e2a623699e81b291c0327f408fea765d534baa2a88ac")
    }
    fn p2sh() -> ScriptPubKey {
        spk("a914162c5ea71c0b23f5b9022ef047c4a86470a5b07087")
    }
    fn p2wpkh() -> ScriptPubKey {
        spk("0014751e76e8199196d454941c45d1b3a323f1433bd6")
    }
    fn p2wsh() -> ScriptPubKey {
        spk("00201863143c14c5166804bd19203356da136c985678cd4d27a1b8c6329604903262")
    }
    fn multisig() -> ScriptPubKey {
        // OP_2 <key> <key> OP_2 OP_CHECKMULTISIG
        spk(&format!("5221{k}21{k}52ae", k = COMPRESSED_KEY))
    }
    fn op_return() -> ScriptPubKey {
        spk("6a0568656c6c6f")
    }

    fn predicates(s: &ScriptPubKey) -> [bool; 7] {
        [
            s.is_return(),
            s.is_pay_to_pub_key(),
            s.is_pay_to_pub_key_hash(),
            s.is_pay_to_script_hash(),
            s.is_multisig(),
            s.is_pay_to_witness_pub_key_hash(),
            s.is_pay_to_witness_script_hash(),
        ]
    }

    // -----------------------------------------------------------------------
    // Template predicates
    // -----------------------------------------------------------------------

    #[test]
    fn test_canonical_templates_are_disjoint() {
        let cases = [
            (op_return(), 0),
            (p2pk(), 1),
            (p2pkh(), 2),
            (p2sh(), 3),
            (multisig(), 4),
            (p2wpkh(), 5),
            (p2wsh(), 6),
        ];
        for (script, index) in cases {
            let matched = predicates(&script);
            let mut expected = [false; 7];
            expected[index] = true;
            assert_eq!(matched, expected, "script {}", script);
        }
    }

    #[test]
    fn test_p2pk_uncompressed_key() {
        assert!(p2pk_uncompressed().is_pay_to_pub_key());
    }

    #[test]
    fn test_p2pk_rejects_other_key_sizes() {
        // 32-byte push followed by OP_CHECKSIG.
        let s = spk(&format!("20{}ac", "11".repeat(32)));
        assert!(!s.is_pay_to_pub_key());
    }

    #[test]
    fn test_p2pkh_requires_exact_shape() {
        // Trailing OP_NOP makes six operations.
        assert!(!spk("76a914e2a623699e81b291c0327f408fea765d534baa2a88ac61").is_pay_to_pub_key_hash());
        // 19-byte hash.
        assert!(!spk("76a913e2a623699e81b291c0327f408fea765d534baa88ac").is_pay_to_pub_key_hash());
    }

    #[test]
    fn test_p2pkh_with_non_minimal_push() {
        // The 20-byte hash pushed with OP_PUSHDATA1 still has operand size 20.
        let s = spk("76a94c14e2a623699e81b291c0327f408fea765d534baa2a88ac");
        assert!(s.is_pay_to_pub_key_hash());
    }

    #[test]
    fn test_return_with_trailing_data() {
        assert!(spk("6a").is_return());
        assert!(op_return().is_return());
        assert!(!spk("006a").is_return());
        assert!(!spk("").is_return());
    }

    #[test]
    fn test_multisig_literal_count_pushes() {
        // <0x01> <key> <key> <0x02> OP_CHECKMULTISIG
        let s = spk(&format!("010121{k}21{k}0102ae", k = COMPRESSED_KEY));
        assert!(s.is_multisig());
    }

    #[test]
    fn test_multisig_rejects_zero_counts() {
        let zero_m = spk(&format!("0021{k}21{k}52ae", k = COMPRESSED_KEY));
        assert!(!zero_m.is_multisig());
        let zero_n = spk(&format!("5221{k}21{k}0100ae", k = COMPRESSED_KEY));
        assert!(!zero_n.is_multisig());
    }

    #[test]
    fn test_multisig_needs_four_operations() {
        assert!(!spk("5151ae").is_multisig());
        assert!(spk(&format!("5121{}51ae", COMPRESSED_KEY)).is_multisig());
    }

    #[test]
    fn test_witness_version_must_be_zero() {
        // OP_1 <20 bytes>
        let v1 = spk("5114751e76e8199196d454941c45d1b3a323f1433bd6");
        assert!(!v1.is_pay_to_witness_pub_key_hash());
        // A literal one-byte push of 0x00 also reads as version 0.
        let literal = spk("010014751e76e8199196d454941c45d1b3a323f1433bd6");
        assert!(literal.is_pay_to_witness_pub_key_hash());
    }

    #[test]
    fn test_malformed_script_matches_nothing() {
        // OP_DUP OP_HASH160 then a push claiming 20 bytes with only 2 left.
        let s = spk("76a9140102");
        assert_eq!(predicates(&s), [false; 7]);
        assert_eq!(s.script_type(), ScriptType::NonStandard);
    }

    // -----------------------------------------------------------------------
    // Classification
    // -----------------------------------------------------------------------

    #[test]
    fn test_script_type() {
        assert_eq!(p2pk().script_type(), ScriptType::PayToPubKey);
        assert_eq!(p2pkh().script_type(), ScriptType::PayToPubKeyHash);
        assert_eq!(p2sh().script_type(), ScriptType::PayToScriptHash);
        assert_eq!(p2wpkh().script_type(), ScriptType::PayToWitnessPubKeyHash);
        assert_eq!(p2wsh().script_type(), ScriptType::PayToWitnessScriptHash);
        assert_eq!(multisig().script_type(), ScriptType::Multisig);
        assert_eq!(op_return().script_type(), ScriptType::Return);
        assert_eq!(spk("51").script_type(), ScriptType::NonStandard);
    }

    #[test]
    fn test_script_type_names() {
        assert_eq!(ScriptType::PayToWitnessPubKeyHash.to_string(), "witness_v0_keyhash");
        assert_eq!(ScriptType::Return.as_str(), "nulldata");
        assert!(ScriptType::PayToPubKey.is_addressable());
        assert!(!ScriptType::Multisig.is_addressable());
    }

    #[test]
    fn test_script_type_serde_uses_stable_names() {
        let all = [
            ScriptType::PayToPubKey,
            ScriptType::PayToPubKeyHash,
            ScriptType::PayToScriptHash,
            ScriptType::PayToWitnessPubKeyHash,
            ScriptType::PayToWitnessScriptHash,
            ScriptType::Multisig,
            ScriptType::Return,
            ScriptType::NonStandard,
        ];
        for ty in all {
            let json = serde_json::to_string(&ty).unwrap();
            assert_eq!(json, format!("\"{}\"", ty.as_str()));
            assert_eq!(serde_json::from_str::<ScriptType>(&json).unwrap(), ty);
        }
    }

    #[test]
    fn test_serde_and_debug() {
        let s = p2sh();
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, r#""a914162c5ea71c0b23f5b9022ef047c4a86470a5b07087""#);
        let back: ScriptPubKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
        assert!(format!("{:?}", back).starts_with("ScriptPubKey(a914"));
    }
}
