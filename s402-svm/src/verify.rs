//! Payment verification against the settlement ledger.
//!
//! Given a transaction signature a client claims as payment, the verifier
//! fetches the confirmed transaction and checks that it delivered at least
//! the expected amount to the expected recipient in the expected token. Every
//! outcome, transport faults included, is folded into a structured
//! [`PaymentVerification`]; the verifier never raises past its boundary for
//! type-valid inputs.
//!
//! The verifier holds no state across calls: no verdict cache and no
//! deduplication of signatures. Replay protection (refusing to release data
//! twice for one payment) is the serving layer's responsibility; the verdict
//! echoes the signature so a consumed-signature set can key on it.

use solana_pubkey::Pubkey;
use solana_signature::Signature;

use s402::network::Network;
use s402::token::PaymentToken;
use s402::verify::{PaymentVerification, VerifyFailure};

use crate::client::{LedgerClient, RpcLedgerClient};
use crate::networks::TokenRegistry;
use crate::record::TransactionRecord;

/// Downward tolerance applied to the expected amount.
///
/// Absorbs ledger fee deduction variance without requiring exact equality: a
/// payment passes if it reaches 99% of the expected figure. Policy constant;
/// changing it changes financial behavior.
pub const AMOUNT_TOLERANCE: f64 = 0.01;

/// Verifies claimed payment transactions for one network's token registry.
///
/// Generic over [`LedgerClient`] so tests can drive it with an in-memory
/// ledger. Calls are independent: concurrent verifications need no
/// coordination, and verifying the same signature twice performs two fetches.
#[derive(Debug)]
pub struct PaymentVerifier<C> {
    client: C,
    tokens: TokenRegistry,
}

impl PaymentVerifier<RpcLedgerClient> {
    /// Creates a verifier for a supported network with its built-in token
    /// registry, fetching at `confirmed` commitment.
    #[must_use]
    pub fn for_network(network: Network) -> Self {
        Self::new(
            RpcLedgerClient::for_network(network),
            TokenRegistry::for_network(network),
        )
    }
}

impl<C: LedgerClient> PaymentVerifier<C> {
    /// Creates a verifier from a ledger client and token registry.
    #[must_use]
    pub const fn new(client: C, tokens: TokenRegistry) -> Self {
        Self { client, tokens }
    }

    /// Verifies that the transaction with `signature` pays at least
    /// `expected_amount` base units of `token` to `expected_recipient`.
    ///
    /// Suspends exactly once, at the ledger fetch. A zero `expected_amount`
    /// trivially passes the amount check (free tiers are representable), so
    /// callers must not pass zero unintentionally.
    pub async fn verify_payment(
        &self,
        signature: &str,
        expected_amount: u64,
        expected_recipient: &str,
        token: PaymentToken,
    ) -> PaymentVerification {
        let parsed_signature = match signature.parse::<Signature>() {
            Ok(sig) => sig,
            Err(e) => {
                return reject(
                    signature,
                    expected_recipient,
                    token,
                    0,
                    VerifyFailure::Fault(format!("Invalid transaction signature: {e}")),
                );
            }
        };
        let recipient = match expected_recipient.parse::<Pubkey>() {
            Ok(key) => key,
            Err(e) => {
                return reject(
                    signature,
                    expected_recipient,
                    token,
                    0,
                    VerifyFailure::Fault(format!("Invalid recipient address: {e}")),
                );
            }
        };

        let record = match self.client.fetch_transaction(&parsed_signature).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                return reject(signature, expected_recipient, token, 0, VerifyFailure::NotFound);
            }
            Err(e) => {
                return reject(
                    signature,
                    expected_recipient,
                    token,
                    0,
                    VerifyFailure::Fault(e.to_string()),
                );
            }
        };

        let (actual_amount, valid_transfer) = if token.is_native() {
            native_transfer(&record, &recipient)
        } else {
            match self.tokens.mint_for(token) {
                Some(mint) => token_transfer(&record, &recipient, mint),
                None => {
                    return reject(
                        signature,
                        expected_recipient,
                        token,
                        0,
                        VerifyFailure::MintNotConfigured,
                    );
                }
            }
        };

        let min_amount = expected_amount as f64 * (1.0 - AMOUNT_TOLERANCE);
        let amount_valid = actual_amount as f64 >= min_amount;

        if valid_transfer && amount_valid {
            #[cfg(feature = "telemetry")]
            tracing::debug!(
                signature,
                token = %token,
                amount = actual_amount,
                "Payment verified"
            );
            PaymentVerification::verified(signature, expected_recipient, token, actual_amount)
        } else if valid_transfer {
            reject(
                signature,
                expected_recipient,
                token,
                actual_amount,
                VerifyFailure::AmountTooLow {
                    actual: actual_amount,
                    expected: expected_amount,
                },
            )
        } else {
            // Recipient failure takes priority over a short amount.
            reject(
                signature,
                expected_recipient,
                token,
                actual_amount,
                VerifyFailure::InvalidRecipient,
            )
        }
    }
}

fn reject(
    signature: &str,
    recipient: &str,
    token: PaymentToken,
    amount: u64,
    failure: VerifyFailure,
) -> PaymentVerification {
    #[cfg(feature = "telemetry")]
    tracing::debug!(
        signature,
        token = %token,
        amount,
        reason = %failure,
        "Payment rejected"
    );
    PaymentVerification::rejected(signature, recipient, token, amount, failure)
}

/// Native transfer: the amount is the recipient's own balance delta, looked
/// up by matching the recipient key to its account slot.
fn native_transfer(record: &TransactionRecord, recipient: &Pubkey) -> (u64, bool) {
    match record.account_index(recipient) {
        Some(index) => (record.balance_delta(index), true),
        None => (0, false),
    }
}

/// Fungible transfer: the first post-execution token balance owned by the
/// recipient for the configured mint wins; amounts are not aggregated across
/// multiple entries within one transaction.
fn token_transfer(record: &TransactionRecord, recipient: &Pubkey, mint: &Pubkey) -> (u64, bool) {
    match record.token_balance_for(recipient, mint) {
        Some(balance) => (balance.amount, true),
        None => (0, false),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;

    use s402::verify::FailureKind;

    use super::*;
    use crate::client::LedgerClientError;
    use crate::record::TokenBalance;

    struct MockLedger {
        records: HashMap<Signature, TransactionRecord>,
        fault: Option<String>,
    }

    impl MockLedger {
        fn empty() -> Self {
            Self {
                records: HashMap::new(),
                fault: None,
            }
        }

        fn with_record(signature: Signature, record: TransactionRecord) -> Self {
            let mut ledger = Self::empty();
            ledger.records.insert(signature, record);
            ledger
        }

        fn failing(message: &str) -> Self {
            Self {
                records: HashMap::new(),
                fault: Some(message.to_owned()),
            }
        }
    }

    #[async_trait]
    impl LedgerClient for MockLedger {
        async fn fetch_transaction(
            &self,
            signature: &Signature,
        ) -> Result<Option<TransactionRecord>, LedgerClientError> {
            if let Some(message) = &self.fault {
                return Err(LedgerClientError::MalformedTransaction(message.clone()));
            }
            Ok(self.records.get(signature).cloned())
        }
    }

    fn key(byte: u8) -> Pubkey {
        Pubkey::new_from_array([byte; 32])
    }

    fn signature(byte: u8) -> Signature {
        Signature::from([byte; 64])
    }

    const PAYER: u8 = 1;
    const RECIPIENT: u8 = 2;

    /// A two-party native transfer of `amount` lamports to the recipient.
    fn native_record(amount: u64) -> TransactionRecord {
        TransactionRecord {
            pre_balances: vec![10_000_000, 1_000_000],
            post_balances: vec![10_000_000 - amount - 5_000, 1_000_000 + amount],
            account_keys: vec![key(PAYER), key(RECIPIENT)],
            token_balances: Vec::new(),
        }
    }

    fn usdc_record(mint: Pubkey, amount: u64) -> TransactionRecord {
        TransactionRecord {
            pre_balances: vec![10_000_000, 2_039_280],
            post_balances: vec![9_995_000, 2_039_280],
            account_keys: vec![key(PAYER), key(9)],
            token_balances: vec![TokenBalance {
                owner: Some(key(RECIPIENT)),
                mint,
                amount,
            }],
        }
    }

    fn verifier_with(
        ledger: MockLedger,
        tokens: TokenRegistry,
    ) -> PaymentVerifier<MockLedger> {
        PaymentVerifier::new(ledger, tokens)
    }

    #[tokio::test]
    async fn test_unknown_signature_is_not_found() {
        let verifier = verifier_with(MockLedger::empty(), TokenRegistry::empty());
        let verdict = verifier
            .verify_payment(
                &signature(7).to_string(),
                1_000_000,
                &key(RECIPIENT).to_string(),
                PaymentToken::Sol,
            )
            .await;
        assert!(!verdict.valid);
        assert_eq!(verdict.amount, 0);
        assert_eq!(verdict.error, Some(VerifyFailure::NotFound));
    }

    #[tokio::test]
    async fn test_native_transfer_verifies() {
        let sig = signature(1);
        let verifier = verifier_with(
            MockLedger::with_record(sig, native_record(1_000_000)),
            TokenRegistry::empty(),
        );
        let verdict = verifier
            .verify_payment(
                &sig.to_string(),
                1_000_000,
                &key(RECIPIENT).to_string(),
                PaymentToken::Sol,
            )
            .await;
        assert!(verdict.valid, "unexpected failure: {:?}", verdict.error);
        assert_eq!(verdict.amount, 1_000_000);
        assert!(verdict.error.is_none());
        assert_eq!(verdict.signature, sig.to_string());
        assert_eq!(verdict.recipient, key(RECIPIENT).to_string());
    }

    #[tokio::test]
    async fn test_native_transfer_within_tolerance() {
        // 1% under the expectation still passes.
        let sig = signature(1);
        let verifier = verifier_with(
            MockLedger::with_record(sig, native_record(990_000)),
            TokenRegistry::empty(),
        );
        let verdict = verifier
            .verify_payment(
                &sig.to_string(),
                1_000_000,
                &key(RECIPIENT).to_string(),
                PaymentToken::Sol,
            )
            .await;
        assert!(verdict.valid);
        assert_eq!(verdict.amount, 990_000);
    }

    #[tokio::test]
    async fn test_amount_too_low_reports_both_figures() {
        // More than 1% above the actual amount: expected = actual / 0.98.
        let actual = 980_000_u64;
        let expected = 1_000_000_u64;
        let sig = signature(1);
        let verifier = verifier_with(
            MockLedger::with_record(sig, native_record(actual)),
            TokenRegistry::empty(),
        );
        let verdict = verifier
            .verify_payment(
                &sig.to_string(),
                expected,
                &key(RECIPIENT).to_string(),
                PaymentToken::Sol,
            )
            .await;
        assert!(!verdict.valid);
        assert_eq!(verdict.amount, actual);
        assert_eq!(
            verdict.error,
            Some(VerifyFailure::AmountTooLow { actual, expected })
        );
        let message = verdict.error.unwrap().to_string();
        assert!(message.contains("980000"));
        assert!(message.contains("1000000"));
    }

    #[tokio::test]
    async fn test_recipient_absent_takes_priority_over_amount() {
        let sig = signature(1);
        let verifier = verifier_with(
            MockLedger::with_record(sig, native_record(1_000_000)),
            TokenRegistry::empty(),
        );
        // A recipient not involved in the transaction at all.
        let verdict = verifier
            .verify_payment(
                &sig.to_string(),
                1_000_000,
                &key(42).to_string(),
                PaymentToken::Sol,
            )
            .await;
        assert!(!verdict.valid);
        assert_eq!(verdict.amount, 0);
        assert_eq!(verdict.error, Some(VerifyFailure::InvalidRecipient));
    }

    #[tokio::test]
    async fn test_usdc_transfer_verifies() {
        let mint = key(10);
        let sig = signature(3);
        let verifier = verifier_with(
            MockLedger::with_record(sig, usdc_record(mint, 5_000_000)),
            TokenRegistry::empty().with_mint(PaymentToken::Usdc, mint),
        );
        let verdict = verifier
            .verify_payment(
                &sig.to_string(),
                5_000_000,
                &key(RECIPIENT).to_string(),
                PaymentToken::Usdc,
            )
            .await;
        assert!(verdict.valid, "unexpected failure: {:?}", verdict.error);
        assert_eq!(verdict.amount, 5_000_000);
    }

    #[tokio::test]
    async fn test_usdc_wrong_mint_is_invalid_recipient() {
        let sig = signature(3);
        let verifier = verifier_with(
            MockLedger::with_record(sig, usdc_record(key(10), 5_000_000)),
            TokenRegistry::empty().with_mint(PaymentToken::Usdc, key(11)),
        );
        let verdict = verifier
            .verify_payment(
                &sig.to_string(),
                5_000_000,
                &key(RECIPIENT).to_string(),
                PaymentToken::Usdc,
            )
            .await;
        assert!(!verdict.valid);
        assert_eq!(verdict.error, Some(VerifyFailure::InvalidRecipient));
    }

    #[tokio::test]
    async fn test_unconfigured_mint_is_a_configuration_failure() {
        let sig = signature(3);
        let verifier = verifier_with(
            MockLedger::with_record(sig, usdc_record(key(10), 5_000_000)),
            TokenRegistry::empty(),
        );
        let verdict = verifier
            .verify_payment(
                &sig.to_string(),
                5_000_000,
                &key(RECIPIENT).to_string(),
                PaymentToken::Usdc,
            )
            .await;
        assert!(!verdict.valid);
        assert_eq!(verdict.amount, 0);
        assert_eq!(verdict.error, Some(VerifyFailure::MintNotConfigured));
        assert!(verdict.is_server_fault());
    }

    #[tokio::test]
    async fn test_first_matching_token_balance_wins() {
        let mint = key(10);
        let mut record = usdc_record(mint, 3_000_000);
        record.token_balances.push(TokenBalance {
            owner: Some(key(RECIPIENT)),
            mint,
            amount: 9_000_000,
        });
        let sig = signature(3);
        let verifier = verifier_with(
            MockLedger::with_record(sig, record),
            TokenRegistry::empty().with_mint(PaymentToken::Usdc, mint),
        );
        let verdict = verifier
            .verify_payment(
                &sig.to_string(),
                3_000_000,
                &key(RECIPIENT).to_string(),
                PaymentToken::Usdc,
            )
            .await;
        assert!(verdict.valid);
        assert_eq!(verdict.amount, 3_000_000);
    }

    #[tokio::test]
    async fn test_transport_fault_folds_into_verdict() {
        let verifier = verifier_with(MockLedger::failing("connection reset"), TokenRegistry::empty());
        let verdict = verifier
            .verify_payment(
                &signature(1).to_string(),
                1_000_000,
                &key(RECIPIENT).to_string(),
                PaymentToken::Sol,
            )
            .await;
        assert!(!verdict.valid);
        assert_eq!(verdict.amount, 0);
        let failure = verdict.error.unwrap();
        assert_eq!(failure.kind(), FailureKind::Transport);
        assert!(failure.to_string().contains("connection reset"));
    }

    #[tokio::test]
    async fn test_malformed_inputs_fold_into_verdict() {
        let verifier = verifier_with(MockLedger::empty(), TokenRegistry::empty());

        let verdict = verifier
            .verify_payment("not-a-signature", 1, &key(RECIPIENT).to_string(), PaymentToken::Sol)
            .await;
        assert!(!verdict.valid);
        assert_eq!(verdict.error.unwrap().kind(), FailureKind::Transport);

        let verdict = verifier
            .verify_payment(&signature(1).to_string(), 1, "not-an-address", PaymentToken::Sol)
            .await;
        assert!(!verdict.valid);
        assert_eq!(verdict.error.unwrap().kind(), FailureKind::Transport);
    }

    #[tokio::test]
    async fn test_zero_expected_amount_passes() {
        let sig = signature(1);
        let verifier = verifier_with(
            MockLedger::with_record(sig, native_record(0)),
            TokenRegistry::empty(),
        );
        let verdict = verifier
            .verify_payment(&sig.to_string(), 0, &key(RECIPIENT).to_string(), PaymentToken::Sol)
            .await;
        assert!(verdict.valid);
        assert_eq!(verdict.amount, 0);
    }

    #[tokio::test]
    async fn test_idempotent_against_unchanged_ledger() {
        let sig = signature(1);
        let verifier = verifier_with(
            MockLedger::with_record(sig, native_record(1_000_000)),
            TokenRegistry::empty(),
        );
        let first = verifier
            .verify_payment(
                &sig.to_string(),
                1_000_000,
                &key(RECIPIENT).to_string(),
                PaymentToken::Sol,
            )
            .await;
        let second = verifier
            .verify_payment(
                &sig.to_string(),
                1_000_000,
                &key(RECIPIENT).to_string(),
                PaymentToken::Sol,
            )
            .await;
        assert_eq!(first.valid, second.valid);
        assert_eq!(first.amount, second.amount);
        assert_eq!(first.recipient, second.recipient);
        assert_eq!(first.signature, second.signature);
        assert_eq!(first.error, second.error);
    }
}
