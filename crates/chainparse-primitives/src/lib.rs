/// chainparse - Hashing, chain hashes, byte streams and address codecs.
///
/// This crate provides the foundational building blocks shared by the
/// script and transaction crates:
/// - Hash functions (SHA-256, SHA-256d, RIPEMD-160, Hash160)
/// - Chain hash type for transaction and block identification
/// - Little-endian byte stream reader/writer and variable-length integers
/// - Base58Check encoding for legacy addresses
/// - Bech32 segwit encoding for witness-program addresses

pub mod hash;
pub mod chainhash;
pub mod util;
pub mod base58;
pub mod bech32;

mod error;
pub use error::PrimitivesError;
