//! Read-only snapshot of a confirmed ledger transaction.
//!
//! The RPC wire shape (`EncodedConfirmedTransactionWithStatusMeta`) mixes
//! encoded payloads, optional metadata, and stringly-typed balances. The
//! adapter converts it once into a [`TransactionRecord`] holding exactly what
//! verification reads: index-aligned lamport balances, the static account-key
//! list, and parsed post-execution token balances.

use solana_pubkey::Pubkey;
use solana_transaction::versioned::VersionedTransaction;
use solana_transaction_status_client_types::{
    EncodedConfirmedTransactionWithStatusMeta, UiTransactionTokenBalance,
};

use crate::client::LedgerClientError;

/// A post-execution token-balance entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenBalance {
    /// The account that owns the token account, when the ledger reports it.
    pub owner: Option<Pubkey>,
    /// The token's mint address.
    pub mint: Pubkey,
    /// Raw amount in token base units.
    pub amount: u64,
}

/// A confirmed transaction as the verifier sees it.
///
/// `pre_balances` and `post_balances` are index-aligned with `account_keys`;
/// the balance delta for an account is read through
/// [`balance_delta`](Self::balance_delta) rather than by positional
/// convention.
#[derive(Debug, Clone, Default)]
pub struct TransactionRecord {
    /// Lamport balances per account before execution.
    pub pre_balances: Vec<u64>,
    /// Lamport balances per account after execution.
    pub post_balances: Vec<u64>,
    /// Static account keys, in transaction order.
    pub account_keys: Vec<Pubkey>,
    /// Post-execution token balances.
    pub token_balances: Vec<TokenBalance>,
}

impl TransactionRecord {
    /// Converts the RPC wire shape into a record.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerClientError::MalformedTransaction`] if the payload
    /// cannot be decoded, the metadata is missing, or a token-balance entry
    /// carries an unparsable key or amount.
    pub fn from_encoded(
        encoded: EncodedConfirmedTransactionWithStatusMeta,
    ) -> Result<Self, LedgerClientError> {
        let transaction = encoded.transaction;
        let decoded: VersionedTransaction = transaction.transaction.decode().ok_or_else(|| {
            LedgerClientError::MalformedTransaction("undecodable transaction payload".into())
        })?;
        let meta = transaction.meta.ok_or_else(|| {
            LedgerClientError::MalformedTransaction("missing transaction metadata".into())
        })?;

        let token_balances = Option::<Vec<UiTransactionTokenBalance>>::from(
            meta.post_token_balances,
        )
        .unwrap_or_default()
        .into_iter()
        .map(parse_token_balance)
        .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            pre_balances: meta.pre_balances,
            post_balances: meta.post_balances,
            account_keys: decoded.message.static_account_keys().to_vec(),
            token_balances,
        })
    }

    /// Returns the position of `account` in the static account-key list.
    #[must_use]
    pub fn account_index(&self, account: &Pubkey) -> Option<usize> {
        self.account_keys.iter().position(|key| key == account)
    }

    /// Returns the lamport balance increase of the account at `index`,
    /// clamped at zero (a decrease is no payment).
    #[must_use]
    pub fn balance_delta(&self, index: usize) -> u64 {
        let pre = self.pre_balances.get(index).copied().unwrap_or(0);
        let post = self.post_balances.get(index).copied().unwrap_or(0);
        post.saturating_sub(pre)
    }

    /// Returns the first post-execution token balance owned by `owner` for
    /// `mint`, in entry order.
    #[must_use]
    pub fn token_balance_for(&self, owner: &Pubkey, mint: &Pubkey) -> Option<&TokenBalance> {
        self.token_balances
            .iter()
            .find(|balance| balance.owner.as_ref() == Some(owner) && balance.mint == *mint)
    }
}

fn parse_token_balance(
    balance: UiTransactionTokenBalance,
) -> Result<TokenBalance, LedgerClientError> {
    let mint = balance.mint.parse::<Pubkey>().map_err(|e| {
        LedgerClientError::MalformedTransaction(format!("bad token-balance mint: {e}"))
    })?;
    let owner = Option::<String>::from(balance.owner)
        .map(|owner| owner.parse::<Pubkey>())
        .transpose()
        .map_err(|e| {
            LedgerClientError::MalformedTransaction(format!("bad token-balance owner: {e}"))
        })?;
    let amount = balance.ui_token_amount.amount.parse::<u64>().map_err(|e| {
        LedgerClientError::MalformedTransaction(format!("bad token-balance amount: {e}"))
    })?;
    Ok(TokenBalance {
        owner,
        mint,
        amount,
    })
}
