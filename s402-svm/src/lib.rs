#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Solana ledger adapter and payment verification for the s402 protocol.
//!
//! This crate is the chain-facing half of the s402 payment subsystem. Given a
//! transaction signature a client claims as payment, the
//! [`PaymentVerifier`](verify::PaymentVerifier) fetches the confirmed
//! transaction through a [`LedgerClient`](client::LedgerClient) and decides
//! whether it delivers the expected amount to the expected recipient,
//! returning the structured verdict defined in the core `s402` crate.
//!
//! # Architecture
//!
//! - [`client`] - The ledger-client seam: an async trait with exactly one
//!   capability (fetch a transaction by signature) and its RPC-backed
//!   implementation
//! - [`networks`] - RPC endpoints per network and the static USDC mint table
//! - [`record`] - The verifier's read-only snapshot of a confirmed transaction
//! - [`verify`] - The payment verifier itself
//!
//! # Feature Flags
//!
//! - `telemetry` - `tracing` events at verification decision points
//!
//! # Example
//!
//! ```ignore
//! use s402::{Network, PaymentToken};
//! use s402_svm::PaymentVerifier;
//!
//! let verifier = PaymentVerifier::for_network(Network::Devnet);
//! let verdict = verifier
//!     .verify_payment(&signature, 1_000_000, &node_address, PaymentToken::Sol)
//!     .await;
//! if verdict.valid {
//!     // release the data
//! }
//! ```

pub mod client;
pub mod networks;
pub mod record;
pub mod verify;

pub use client::{LedgerClient, LedgerClientError, RpcLedgerClient};
pub use networks::TokenRegistry;
pub use record::{TokenBalance, TransactionRecord};
pub use verify::{AMOUNT_TOLERANCE, PaymentVerifier};
