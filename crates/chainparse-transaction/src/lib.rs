/// chainparse - Transaction input decoding and encoding.
///
/// Provides the `Input` wire codec (previous outpoint, signature script and
/// sequence number), coinbase detection and the attachment of externally
/// parsed witness stacks.

pub mod input;
pub mod witness;

mod error;
pub use error::TransactionError;
pub use input::{Input, DEFAULT_SEQUENCE_NUMBER};
pub use witness::{attach_witnesses, WitnessProvider};
