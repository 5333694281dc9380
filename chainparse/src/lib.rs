#![deny(missing_docs)]

//! chainparse - Bitcoin input and output script inspection.
//!
//! Re-exports all chainparse components for convenient single-crate usage:
//! byte-level primitives and address codecs, script tokenizing and
//! classification, and the transaction input codec.

pub use chainparse_primitives as primitives;
pub use chainparse_script as script;
pub use chainparse_transaction as transaction;
