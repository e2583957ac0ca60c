//! Reputation-tiered pricing and the node/protocol revenue split.
//!
//! Both functions are pure policy arithmetic. The split is advisory: it
//! states the intended division of a received payment but moves no funds;
//! enforcement of the actual transfer is a ledger-side concern.

/// Base price for one sensor reading: 0.001 SOL, in lamports.
pub const BASE_PRICE_LAMPORTS: u64 = 1_000_000;

/// Protocol's share of every payment, in percent.
pub const PROTOCOL_FEE_PERCENT: u64 = 10;

/// Reputation tier thresholds and their price multipliers, highest first.
///
/// First match from the top wins; scores below every threshold pay the base
/// price. These are policy constants: changing them changes what nodes earn.
pub const REPUTATION_TIERS: &[(f64, f64)] = &[(75.0, 1.5), (50.0, 1.2), (25.0, 1.1)];

/// Computes the price in lamports for a reading from a node with the given
/// reputation score.
///
/// Scores are conventionally in `[0, 100]` but are not range-checked:
/// out-of-domain values simply land in the nearest tier (anything above 75
/// pays the top multiplier, anything below 25 the base price). Higher
/// reputation means a higher price (a quality premium), so the result is
/// monotonically non-decreasing in the score.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn calculate_price(reputation_score: f64) -> u64 {
    let multiplier = REPUTATION_TIERS
        .iter()
        .find(|(threshold, _)| reputation_score >= *threshold)
        .map_or(1.0, |(_, multiplier)| *multiplier);

    (BASE_PRICE_LAMPORTS as f64 * multiplier).floor() as u64
}

/// The division of a received payment between the node operator and the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentSplit {
    /// The node operator's share in base units.
    pub node_share: u64,
    /// The protocol's fee in base units.
    pub protocol_fee: u64,
}

/// Splits a payment into the node's share and the protocol fee.
///
/// The fee is `floor(amount × 10%)`; the node share absorbs the rounding
/// remainder, so the two parts always sum exactly to `amount`. A zero amount
/// produces a zero/zero split.
#[must_use]
pub const fn split_payment(amount: u64) -> PaymentSplit {
    #[allow(clippy::cast_possible_truncation, clippy::cast_lossless)]
    let protocol_fee = (amount as u128 * PROTOCOL_FEE_PERCENT as u128 / 100) as u64;
    PaymentSplit {
        node_share: amount - protocol_fee,
        protocol_fee,
    }
}
