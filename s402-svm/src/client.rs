//! The ledger-client seam.
//!
//! Verification consumes exactly one ledger capability: fetch a finalized
//! transaction record by signature at a commitment level. [`LedgerClient`]
//! expresses that seam as an async trait so the verifier can be driven by the
//! RPC-backed [`RpcLedgerClient`] in production and by an in-memory ledger in
//! tests.

use async_trait::async_trait;
use solana_client::client_error::ClientError;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::RpcTransactionConfig;
use solana_client::rpc_request::RpcRequest;
use solana_commitment_config::CommitmentConfig;
use solana_signature::Signature;
use solana_transaction_status_client_types::{
    EncodedConfirmedTransactionWithStatusMeta, UiTransactionEncoding,
};

use s402::network::Network;

use crate::record::TransactionRecord;

/// Environment variable overriding the devnet RPC endpoint.
pub const DEVNET_RPC_URL_ENV: &str = "S402_DEVNET_RPC_URL";

const DEVNET_RPC_URL: &str = "https://api.devnet.solana.com";
const MAINNET_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

/// Newest transaction message version the adapter accepts when fetching.
const MAX_SUPPORTED_TRANSACTION_VERSION: u8 = 0;

/// Resolves the RPC endpoint for a network.
///
/// The devnet endpoint can be overridden through [`DEVNET_RPC_URL_ENV`]; the
/// mainnet endpoint is fixed.
#[must_use]
pub fn rpc_url(network: Network) -> String {
    match network {
        Network::Devnet => {
            std::env::var(DEVNET_RPC_URL_ENV).unwrap_or_else(|_| DEVNET_RPC_URL.to_owned())
        }
        Network::Mainnet => MAINNET_RPC_URL.to_owned(),
    }
}

/// Errors from the ledger client.
#[derive(Debug, thiserror::Error)]
pub enum LedgerClientError {
    /// The RPC transport failed.
    #[error("RPC transport failure: {0}")]
    Rpc(#[from] ClientError),
    /// The ledger answered, but the record could not be read.
    #[error("Malformed transaction record: {0}")]
    MalformedTransaction(String),
}

/// Fetches confirmed transactions from the settlement ledger.
///
/// One capability, one fetch attempt per call: retry policy belongs to the
/// caller, and timeouts to the underlying transport.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Fetches the transaction with `signature`, or `None` if the ledger does
    /// not know it at the configured commitment level.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerClientError`] on transport failure or an unreadable
    /// record.
    async fn fetch_transaction(
        &self,
        signature: &Signature,
    ) -> Result<Option<TransactionRecord>, LedgerClientError>;
}

/// [`LedgerClient`] backed by a Solana JSON-RPC endpoint.
pub struct RpcLedgerClient {
    rpc: RpcClient,
    commitment: CommitmentConfig,
}

impl std::fmt::Debug for RpcLedgerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcLedgerClient")
            .field("commitment", &self.commitment)
            .finish_non_exhaustive()
    }
}

impl RpcLedgerClient {
    /// Creates a client against an explicit endpoint and commitment level.
    #[must_use]
    pub fn new(url: impl Into<String>, commitment: CommitmentConfig) -> Self {
        Self {
            rpc: RpcClient::new_with_commitment(url.into(), commitment),
            commitment,
        }
    }

    /// Creates a client for a supported network at `confirmed` commitment.
    #[must_use]
    pub fn for_network(network: Network) -> Self {
        Self::new(rpc_url(network), CommitmentConfig::confirmed())
    }

    /// Returns the commitment level fetches are issued at.
    #[must_use]
    pub const fn commitment(&self) -> CommitmentConfig {
        self.commitment
    }
}

#[async_trait]
impl LedgerClient for RpcLedgerClient {
    async fn fetch_transaction(
        &self,
        signature: &Signature,
    ) -> Result<Option<TransactionRecord>, LedgerClientError> {
        let config = RpcTransactionConfig {
            encoding: Some(UiTransactionEncoding::Base64),
            commitment: Some(self.commitment),
            max_supported_transaction_version: Some(MAX_SUPPORTED_TRANSACTION_VERSION),
        };
        // getTransaction answers JSON null for signatures the ledger does not
        // know at this commitment; deserializing into Option maps that to None.
        let response: Option<EncodedConfirmedTransactionWithStatusMeta> = self
            .rpc
            .send(
                RpcRequest::GetTransaction,
                serde_json::json!([signature.to_string(), config]),
            )
            .await?;

        #[cfg(feature = "telemetry")]
        tracing::debug!(
            signature = %signature,
            found = response.is_some(),
            "Fetched transaction"
        );

        response.map(TransactionRecord::from_encoded).transpose()
    }
}
