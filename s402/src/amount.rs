//! Base-unit amount handling and display conversion.
//!
//! All prices and payments in this subsystem are integers in the smallest
//! denomination of their token (lamports for SOL, 10^-6 units for USDC).
//! This module provides the lamport constant, conversions into display
//! currency, and the stringified-integer wrapper amounts use on the wire.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Lamports per whole SOL.
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Converts a lamport amount into display currency given the current SOL unit price.
///
/// Pure arithmetic; the unit price itself comes from whatever oracle or feed
/// the caller consults.
#[must_use]
pub fn lamports_to_display(lamports: u64, sol_unit_price: f64) -> f64 {
    (lamports as f64 / LAMPORTS_PER_SOL as f64) * sol_unit_price
}

/// A `u64` value that serializes as a decimal string.
///
/// Some JSON consumers (particularly in `JavaScript`) cannot accurately
/// represent large integers. Base-unit amounts therefore cross the wire as
/// strings to preserve precision.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub struct U64String(u64);

impl U64String {
    /// Returns the inner `u64` value.
    #[must_use]
    pub const fn inner(&self) -> u64 {
        self.0
    }
}

impl FromStr for U64String {
    type Err = <u64 as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

impl From<u64> for U64String {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<U64String> for u64 {
    fn from(value: U64String) -> Self {
        value.0
    }
}

impl fmt::Display for U64String {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for U64String {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for U64String {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<u64>().map(Self).map_err(serde::de::Error::custom)
    }
}
