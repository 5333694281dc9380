//! Unlocking script carried by a transaction input.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::Script;

/// A script used as an input's signature script.
///
/// Never classified; it only exposes the generic `Script` behaviour.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScriptSig(Script);

impl ScriptSig {
    /// Wrap raw signature-script bytes without tokenizing them.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        ScriptSig(Script::from_bytes(bytes))
    }

    /// Unwrap into the underlying `Script`.
    pub fn into_script(self) -> Script {
        self.0
    }
}

impl Deref for ScriptSig {
    type Target = Script;

    fn deref(&self) -> &Script {
        &self.0
    }
}

impl From<Script> for ScriptSig {
    fn from(script: Script) -> Self {
        ScriptSig(script)
    }
}

impl From<Vec<u8>> for ScriptSig {
    fn from(bytes: Vec<u8>) -> Self {
        ScriptSig(Script::from(bytes))
    }
}

impl fmt::Display for ScriptSig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for ScriptSig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScriptSig({})", self.0.to_hex())
    }
}
