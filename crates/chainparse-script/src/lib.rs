/// chainparse - Script tokenizing, classification and address derivation.
///
/// Provides the opcode table, the operation tokenizer with its exact
/// round-trip encoder, the `Script` type with cached tokenization, the
/// `ScriptSig` / `ScriptPubKey` roles, standard template classification and
/// address derivation from network parameters.

pub mod opcodes;
pub mod operation;
pub mod script;
pub mod script_sig;
pub mod script_pubkey;
pub mod network;
pub mod address;

mod error;
pub use error::ScriptError;
pub use network::{Network, NetworkParams, UnknownNetwork};
pub use operation::{Operation, PushEncoding};
pub use script::Script;
pub use script_pubkey::{ScriptPubKey, ScriptType};
pub use script_sig::ScriptSig;
