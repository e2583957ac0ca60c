//! The payment request attached to a 402 Payment Required response.
//!
//! When a client asks for data it has not paid for, the serving layer answers
//! with a [`PaymentRequest`] telling it how much to pay, to whom, in which
//! token, and on which network. The request is built fresh per pricing
//! decision, serialized into the response, and discarded; it carries no
//! state and is never persisted.

use serde::{Deserialize, Serialize};

use crate::amount::U64String;
use crate::network::Network;
use crate::token::{AcceptMethod, PaymentToken};

/// A machine-readable request for payment.
///
/// Immutable once constructed. `accept_method` is derived from `token` at
/// construction, never supplied by the caller, so the two cannot disagree.
///
/// # Serialization
///
/// Wire field names are kebab-case, with the price as a decimal string:
///
/// ```json
/// {
///   "price": "1000000",
///   "accept-method": "native-transfer",
///   "payment-address": "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM",
///   "token": "SOL",
///   "network": "devnet"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PaymentRequest {
    /// Price in base units of `token`.
    pub price: U64String,
    /// Transfer method derived from the token variant.
    pub accept_method: AcceptMethod,
    /// Ledger account of the payee.
    ///
    /// Not validated here: a malformed address surfaces when a transaction
    /// against it is later submitted or verified.
    pub payment_address: String,
    /// The token the payment must be made in.
    pub token: PaymentToken,
    /// Which ledger network the payment must settle on.
    pub network: Network,
}

impl PaymentRequest {
    /// Builds a payment request for `price_in_base_units` of `token`, payable
    /// to `payment_address` on `network`.
    #[must_use]
    pub fn new(
        payment_address: impl Into<String>,
        price_in_base_units: u64,
        token: PaymentToken,
        network: Network,
    ) -> Self {
        Self {
            price: price_in_base_units.into(),
            accept_method: token.accept_method(),
            payment_address: payment_address.into(),
            token,
            network,
        }
    }
}
