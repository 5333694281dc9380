//! Network parameters for address derivation.
//!
//! Each chain is described by its legacy address version bytes and its
//! segwit human-readable part. Named constants cover the Bitcoin networks;
//! custom chains can be deserialized from JSON.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Address encoding parameters of one chain.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetworkParams {
    /// Version byte of P2PKH (and P2PK) addresses.
    pub p2pkh_prefix: u8,
    /// Version byte of P2SH addresses.
    pub p2sh_prefix: u8,
    /// Human-readable part of segwit addresses.
    pub bech32_hrp: Cow<'static, str>,
}

impl NetworkParams {
    /// Bitcoin mainnet: addresses start with '1', '3' or "bc1".
    pub const MAINNET: NetworkParams = NetworkParams {
        p2pkh_prefix: 0x00,
        p2sh_prefix: 0x05,
        bech32_hrp: Cow::Borrowed("bc"),
    };

    /// Bitcoin testnet: addresses start with 'm'/'n', '2' or "tb1".
    pub const TESTNET: NetworkParams = NetworkParams {
        p2pkh_prefix: 0x6f,
        p2sh_prefix: 0xc4,
        bech32_hrp: Cow::Borrowed("tb"),
    };

    /// Signet shares testnet's address encoding.
    pub const SIGNET: NetworkParams = NetworkParams {
        p2pkh_prefix: 0x6f,
        p2sh_prefix: 0xc4,
        bech32_hrp: Cow::Borrowed("tb"),
    };

    /// Local regression-test chain: testnet prefixes, "bcrt1" segwit.
    pub const REGTEST: NetworkParams = NetworkParams {
        p2pkh_prefix: 0x6f,
        p2sh_prefix: 0xc4,
        bech32_hrp: Cow::Borrowed("bcrt"),
    };
}

impl Default for NetworkParams {
    fn default() -> Self {
        NetworkParams::MAINNET
    }
}

/// A named Bitcoin network.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
    Signet,
    Regtest,
}

impl Network {
    /// Return the address parameters of this network.
    pub fn params(&self) -> NetworkParams {
        match self {
            Network::Mainnet => NetworkParams::MAINNET,
            Network::Testnet => NetworkParams::TESTNET,
            Network::Signet => NetworkParams::SIGNET,
            Network::Regtest => NetworkParams::REGTEST,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Signet => "signet",
            Network::Regtest => "regtest",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown network name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown network '{0}', expected mainnet, testnet, signet or regtest")]
pub struct UnknownNetwork(pub String);

impl FromStr for Network {
    type Err = UnknownNetwork;

    /// Parse a network name, case-insensitively. "main", "test" and
    /// "testnet3" are accepted as aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" | "main" | "bitcoin" => Ok(Network::Mainnet),
            "testnet" | "test" | "testnet3" => Ok(Network::Testnet),
            "signet" => Ok(Network::Signet),
            "regtest" => Ok(Network::Regtest),
            _ => Err(UnknownNetwork(s.to_string())),
        }
    }
}
