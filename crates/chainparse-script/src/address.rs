/// Address derivation from output scripts.
///
/// Legacy templates (P2PK, P2PKH, P2SH) become Base58Check addresses using
/// the network's version bytes; v0 witness programs become Bech32 addresses
/// using the network's human-readable part.

use chainparse_primitives::base58::encode_address;
use chainparse_primitives::bech32::encode_segwit;
use chainparse_primitives::hash::hash160;
use tracing::debug;

use crate::{NetworkParams, Operation, ScriptError, ScriptPubKey, ScriptType};

/// Derive the address an output script pays to.
///
/// Templates are tried in a fixed order: P2PK (hashed to a P2PKH address),
/// P2PKH, P2SH, P2WPKH, P2WSH.
///
/// # Arguments
/// * `script` - The locking script.
/// * `params` - Address encoding parameters of the target chain.
///
/// # Returns
/// The address string, `MalformedScript` if the script does not tokenize,
/// or `UnrecognizedScript` if no addressable template matches.
pub fn output_address(script: &ScriptPubKey, params: &NetworkParams) -> Result<String, ScriptError> {
    let ops = script.operations()?;

    let address = match script.script_type() {
        ScriptType::PayToPubKey => {
            encode_address(params.p2pkh_prefix, &hash160(operand(ops, 0)?))?
        }
        ScriptType::PayToPubKeyHash => encode_address(params.p2pkh_prefix, operand(ops, 2)?)?,
        ScriptType::PayToScriptHash => encode_address(params.p2sh_prefix, operand(ops, 1)?)?,
        ScriptType::PayToWitnessPubKeyHash | ScriptType::PayToWitnessScriptHash => {
            let version = ops
                .first()
                .and_then(Operation::single_byte_operand)
                .ok_or(ScriptError::UnrecognizedScript)?;
            encode_segwit(&params.bech32_hrp, version, operand(ops, 1)?)?
        }
        script_type => {
            debug!(%script, %script_type, "output script has no address");
            return Err(ScriptError::UnrecognizedScript);
        }
    };

    Ok(address)
}

/// Derive the P2PKH address of a public key.
///
/// # Arguments
/// * `pubkey` - Serialized public key, compressed or uncompressed.
/// * `params` - Address encoding parameters of the target chain.
pub fn pub_key_to_address(pubkey: &[u8], params: &NetworkParams) -> Result<String, ScriptError> {
    Ok(encode_address(params.p2pkh_prefix, &hash160(pubkey))?)
}

fn operand(ops: &[Operation], index: usize) -> Result<&[u8], ScriptError> {
    ops.get(index)
        .and_then(Operation::data)
        .ok_or(ScriptError::UnrecognizedScript)
}
