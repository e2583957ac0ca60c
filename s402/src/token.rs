//! The closed set of payment tokens accepted for data access.
//!
//! Tokens are a closed enum rather than an open registry so that every
//! consumer (pricing, request building, verification) is forced by the
//! compiler to handle a newly added token. Decimals and symbol are fixed per
//! variant and never inferred from a transaction; mint addresses are
//! chain-specific and live in the chain crate's deployment table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// A payment token accepted by the s402 protocol.
///
/// `Sol` is the ledger's native currency (9 decimals, no mint). `Usdc` is a
/// fungible SPL token (6 decimals) whose mint address is configured per
/// network in the chain crate.
///
/// # Serialization
///
/// Serializes to/from the token symbol string: `"SOL"`, `"USDC"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentToken {
    /// Native SOL, denominated in lamports.
    Sol,
    /// USDC, denominated in token base units.
    Usdc,
}

/// The transfer method a client must use to satisfy a payment request.
///
/// Derived from the token variant, never supplied independently, so a
/// payment request cannot advertise a method that disagrees with its token.
///
/// # Serialization
///
/// Serializes to its wire name: `"native-transfer"` or `"token-transfer"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AcceptMethod {
    /// A plain native-currency transfer.
    NativeTransfer,
    /// A fungible-token transfer against a configured mint.
    TokenTransfer,
}

impl PaymentToken {
    /// Returns the token's display symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Sol => "SOL",
            Self::Usdc => "USDC",
        }
    }

    /// Returns the token's fixed decimal precision.
    #[must_use]
    pub const fn decimals(self) -> u8 {
        match self {
            Self::Sol => 9,
            Self::Usdc => 6,
        }
    }

    /// Returns `true` for the ledger's native currency.
    #[must_use]
    pub const fn is_native(self) -> bool {
        matches!(self, Self::Sol)
    }

    /// Returns the transfer method clients must use for this token.
    #[must_use]
    pub const fn accept_method(self) -> AcceptMethod {
        match self {
            Self::Sol => AcceptMethod::NativeTransfer,
            Self::Usdc => AcceptMethod::TokenTransfer,
        }
    }

    /// Converts a base-unit amount into whole display units for this token.
    #[must_use]
    pub fn display_amount(self, base_units: u64) -> f64 {
        base_units as f64 / 10f64.powi(i32::from(self.decimals()))
    }
}

impl fmt::Display for PaymentToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Error returned when parsing an unknown token symbol.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Unknown payment token: {0}")]
pub struct UnknownTokenError(String);

impl FromStr for PaymentToken {
    type Err = UnknownTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SOL" => Ok(Self::Sol),
            "USDC" => Ok(Self::Usdc),
            other => Err(UnknownTokenError(other.into())),
        }
    }
}

impl Serialize for PaymentToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}

impl<'de> Deserialize<'de> for PaymentToken {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
