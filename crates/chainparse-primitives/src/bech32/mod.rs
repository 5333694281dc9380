//! Bech32 segwit address encoding.
//!
//! Thin wrapper over the `bech32` crate that speaks plain `&str` / `u8`
//! so callers never touch field elements. Version 0 programs use Bech32,
//! versions 1 through 16 use Bech32m (BIP-350).

use ::bech32::{segwit, Fe32, Hrp};

use crate::PrimitivesError;

/// Encode a witness program as a segwit address.
///
/// # Arguments
/// * `hrp` - Human-readable part for the network (e.g. "bc", "tb").
/// * `version` - Witness version, 0 through 16.
/// * `program` - The witness program (20 or 32 bytes for version 0).
///
/// # Returns
/// The lowercase address, or `PrimitivesError::Encode` for an invalid
/// hrp, version or program length.
pub fn encode_segwit(hrp: &str, version: u8, program: &[u8]) -> Result<String, PrimitivesError> {
    let hrp = Hrp::parse(hrp)
        .map_err(|e| PrimitivesError::Encode(format!("invalid hrp '{}': {}", hrp, e)))?;
    let version = Fe32::try_from(version)
        .map_err(|e| PrimitivesError::Encode(format!("invalid witness version {}: {}", version, e)))?;
    segwit::encode(hrp, version, program).map_err(|e| PrimitivesError::Encode(e.to_string()))
}

/// Decode a segwit address into `(hrp, version, program)`.
pub fn decode_segwit(address: &str) -> Result<(String, u8, Vec<u8>), PrimitivesError> {
    let (hrp, version, program) =
        segwit::decode(address).map_err(|e| PrimitivesError::Encode(e.to_string()))?;
    Ok((hrp.to_lowercase(), version.to_u8(), program))
}
