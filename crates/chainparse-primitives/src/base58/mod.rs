//! Base58 and Base58Check encoding.
//!
//! Raw Base58 over the Bitcoin alphabet, Base58Check (payload followed by
//! the first four bytes of its double SHA-256), and the version-prefixed
//! address form used by P2PKH and P2SH outputs.

use crate::hash::sha256d;
use crate::PrimitivesError;

/// Length of the hash carried by a legacy address.
pub const ADDRESS_PAYLOAD_SIZE: usize = 20;

/// Encode a byte slice to a Base58 string.
///
/// Leading zero bytes are encoded as leading '1' characters.
pub fn encode(data: &[u8]) -> String {
    bs58::encode(data).with_alphabet(bs58::Alphabet::BITCOIN).into_string()
}

/// Decode a Base58 string to a byte vector.
pub fn decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    bs58::decode(s)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_vec()
        .map_err(|e| PrimitivesError::InvalidBase58(e.to_string()))
}

/// Encode `data || sha256d(data)[..4]` as Base58 (Base58Check).
pub fn check_encode(data: &[u8]) -> String {
    let checksum = sha256d(data);
    let mut payload = Vec::with_capacity(data.len() + 4);
    payload.extend_from_slice(data);
    payload.extend_from_slice(&checksum[..4]);
    encode(&payload)
}

/// Decode a Base58Check string, verifying and stripping the checksum.
///
/// # Returns
/// The payload without its checksum, or an error for invalid characters,
/// a too-short string or a checksum mismatch.
pub fn check_decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    let decoded = decode(s)?;
    if decoded.len() < 4 {
        return Err(PrimitivesError::InvalidBase58(
            "data too short for checksum".to_string(),
        ));
    }
    let (payload, checksum) = decoded.split_at(decoded.len() - 4);
    if checksum != &sha256d(payload)[..4] {
        return Err(PrimitivesError::ChecksumMismatch);
    }
    Ok(payload.to_vec())
}

/// Encode a legacy address: Base58Check of `version || payload`.
///
/// # Arguments
/// * `version` - The network's address version byte (e.g. 0x00 for mainnet P2PKH).
/// * `payload` - The 20-byte public key hash or script hash.
///
/// # Returns
/// The address string, or `PrimitivesError::Encode` if the payload is not
/// exactly 20 bytes.
pub fn encode_address(version: u8, payload: &[u8]) -> Result<String, PrimitivesError> {
    if payload.len() != ADDRESS_PAYLOAD_SIZE {
        return Err(PrimitivesError::Encode(format!(
            "address payload must be {} bytes, got {}",
            ADDRESS_PAYLOAD_SIZE,
            payload.len()
        )));
    }
    let mut data = Vec::with_capacity(1 + ADDRESS_PAYLOAD_SIZE);
    data.push(version);
    data.extend_from_slice(payload);
    Ok(check_encode(&data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_leading_zeros() {
        let input = hex::decode("000000287FB4CD").unwrap();
        assert_eq!(encode(&input), "111233QC4");
        assert_eq!(decode("111233QC4").unwrap(), input);
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode(&[]), "");
        assert!(decode("").unwrap().is_empty());
    }

    #[test]
    fn test_decode_invalid_character() {
        // '0', 'O', 'I' and 'l' are not in the alphabet.
        assert!(matches!(decode("10OIl"), Err(PrimitivesError::InvalidBase58(_))));
    }

    #[test]
    fn test_check_roundtrip() {
        let payload = hex::decode("00f54a5851e9372b87810a8e60cdd2e7cfd80b6e31").unwrap();
        let encoded = check_encode(&payload);
        assert_eq!(check_decode(&encoded).unwrap(), payload);
    }

    #[test]
    fn test_check_decode_bad_checksum() {
        let mut encoded = check_encode(&[0x80, 0x01, 0x02, 0x03]);
        let last = encoded.pop().unwrap();
        encoded.push(if last == '1' { '2' } else { '1' });
        assert_eq!(check_decode(&encoded), Err(PrimitivesError::ChecksumMismatch));
    }

    #[test]
    fn test_check_decode_too_short() {
        assert!(matches!(check_decode("1"), Err(PrimitivesError::InvalidBase58(_))));
    }

    #[test]
    fn test_encode_address_zero_hash() {
        // Well-known unspendable mainnet address.
        assert_eq!(
            encode_address(0x00, &[0u8; 20]).unwrap(),
            "1111111111111111111114oLvT2"
        );
    }

    #[test]
    fn test_encode_address_versions() {
        let hash = hex::decode("162c5ea71c0b23f5b9022ef047c4a86470a5b070").unwrap();
        assert_eq!(encode_address(0x00, &hash).unwrap(), "132F25rTsvBdp9JzLLBHP5mvGY66i1xdiM");
        assert_eq!(encode_address(0x05, &hash).unwrap(), "33iFwdLuRpW1uK1RTRqsoi8rR4NpDzk66k");
        assert_eq!(encode_address(0xc4, &hash).unwrap(), "2MuGU1NGw3H1N76dy8ZTkRf87dQaz5oKCau");
    }

    #[test]
    fn test_encode_address_rejects_bad_length() {
        assert!(matches!(encode_address(0x00, &[0u8; 19]), Err(PrimitivesError::Encode(_))));
        assert!(matches!(encode_address(0x00, &[0u8; 32]), Err(PrimitivesError::Encode(_))));
    }

    #[test]
    fn test_encode_address_decodes_back() {
        let hash = [0x11u8; 20];
        let address = encode_address(0x6f, &hash).unwrap();
        let payload = check_decode(&address).unwrap();
        assert_eq!(payload[0], 0x6f);
        assert_eq!(&payload[1..], &hash);
    }
}
