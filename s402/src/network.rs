//! Supported ledger networks.
//!
//! The protocol runs against exactly two Solana clusters: devnet for testing
//! and mainnet-beta for production. RPC endpoints are resolved in the chain
//! crate; this type only identifies which cluster a request or verification
//! refers to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// A supported ledger network.
///
/// # Serialization
///
/// Serializes to/from the cluster's wire name: `"devnet"` or `"mainnet-beta"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Network {
    /// The test cluster. Default, matching the protocol's deploy-first-on-devnet posture.
    #[default]
    Devnet,
    /// The production cluster.
    Mainnet,
}

impl Network {
    /// Returns the network's wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Devnet => "devnet",
            Self::Mainnet => "mainnet-beta",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown network name.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Unknown network: {0}")]
pub struct UnknownNetworkError(String);

impl FromStr for Network {
    type Err = UnknownNetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "devnet" => Ok(Self::Devnet),
            "mainnet-beta" => Ok(Self::Mainnet),
            other => Err(UnknownNetworkError(other.into())),
        }
    }
}

impl Serialize for Network {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Network {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
