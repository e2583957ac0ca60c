//! Verification verdict and failure taxonomy.
//!
//! The verifier (in the chain crate) always returns a structured
//! [`PaymentVerification`]; it never raises past its boundary for type-valid
//! inputs. Callers gate data release on `valid` alone and use `error` only
//! for diagnostics; [`VerifyFailure::kind`] additionally classifies a failure
//! so operational alarms can separate server-side misconfiguration from a
//! client that simply did not pay enough.

use serde::{Serialize, Serializer};

use crate::timestamp::UnixTimestamp;
use crate::token::PaymentToken;

/// Why a payment failed verification.
///
/// A closed taxonomy: messages rendered by `Display` are the stable,
/// log-facing form, while matching on the variant (or [`kind`](Self::kind))
/// gives machine-checkable structure.
///
/// # Serialization
///
/// Serializes as its `Display` message string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyFailure {
    /// The claimed transaction does not exist at the queried commitment
    /// level, yet or ever. Callers may retry the whole verification later.
    #[error("Transaction not found")]
    NotFound,

    /// The requested fungible token has no mint configured on this network.
    /// A server-side setup defect, not a client-side payment defect.
    #[error("Token mint not configured")]
    MintNotConfigured,

    /// The expected recipient does not appear in the transaction.
    #[error("Invalid recipient")]
    InvalidRecipient,

    /// The transfer reached the recipient but fell short of the expected
    /// amount even after tolerance.
    #[error("Amount too low: {actual} < {expected}")]
    AmountTooLow {
        /// Base units actually observed on the ledger.
        actual: u64,
        /// Base units the verifier was told to expect.
        expected: u64,
    },

    /// A transport or parse fault during fetch, folded into the verdict
    /// instead of propagating.
    #[error("{0}")]
    Fault(String),
}

/// Coarse classification of a [`VerifyFailure`] for alerting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The client's payment is missing, short, or misdirected.
    Payment,
    /// Our own setup is broken; no client payment could succeed.
    Configuration,
    /// The ledger could not be consulted; the payment itself is undetermined.
    Transport,
}

impl VerifyFailure {
    /// Classifies this failure for alerting purposes.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::NotFound | Self::InvalidRecipient | Self::AmountTooLow { .. } => {
                FailureKind::Payment
            }
            Self::MintNotConfigured => FailureKind::Configuration,
            Self::Fault(_) => FailureKind::Transport,
        }
    }
}

impl Serialize for VerifyFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// The outcome of verifying one claimed payment transaction.
///
/// This is the sole contract surfaced to callers: it echoes the inputs,
/// reports the observed amount, and never exposes raw transaction internals.
/// `error` is `Some` exactly when `valid` is `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentVerification {
    /// Whether the payment satisfies the expected amount and recipient.
    pub valid: bool,
    /// Base units actually observed for the recipient, zero when the
    /// transaction was missing or unreadable.
    pub amount: u64,
    /// The expected recipient, echoed from the request.
    pub recipient: String,
    /// The claimed transaction signature, echoed from the request.
    pub signature: String,
    /// The token the payment was expected in.
    pub token: PaymentToken,
    /// Wall-clock time at which this verdict was produced.
    pub timestamp: UnixTimestamp,
    /// Why verification failed, when it did.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<VerifyFailure>,
}

impl PaymentVerification {
    /// Builds a passing verdict for an observed payment of `amount` base units.
    #[must_use]
    pub fn verified(
        signature: impl Into<String>,
        recipient: impl Into<String>,
        token: PaymentToken,
        amount: u64,
    ) -> Self {
        Self {
            valid: true,
            amount,
            recipient: recipient.into(),
            signature: signature.into(),
            token,
            timestamp: UnixTimestamp::now(),
            error: None,
        }
    }

    /// Builds a failing verdict. `amount` carries the observed figure where
    /// one exists (an amount-too-low verdict still reports what arrived).
    #[must_use]
    pub fn rejected(
        signature: impl Into<String>,
        recipient: impl Into<String>,
        token: PaymentToken,
        amount: u64,
        failure: VerifyFailure,
    ) -> Self {
        Self {
            valid: false,
            amount,
            recipient: recipient.into(),
            signature: signature.into(),
            token,
            timestamp: UnixTimestamp::now(),
            error: Some(failure),
        }
    }

    /// Returns `true` when the failure, if any, indicates a server-side
    /// defect rather than a client-side payment problem.
    #[must_use]
    pub fn is_server_fault(&self) -> bool {
        self.error
            .as_ref()
            .is_some_and(|e| matches!(e.kind(), FailureKind::Configuration))
    }
}
