#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for 402 Payment Required sensor data access.
//!
//! This crate provides the chain-agnostic half of the s402 payment subsystem:
//! a serving node answers an unpaid request with a machine-readable
//! [`PaymentRequest`](request::PaymentRequest), the client settles the payment
//! on the ledger, and the node verifies the claimed transaction before
//! releasing data. Verification itself talks to a ledger and lives in a
//! chain-specific crate (`s402-svm` for Solana); the verdict and failure
//! types it produces are defined here.
//!
//! # Modules
//!
//! - [`amount`] - Base-unit constants, display conversions, and the
//!   stringified-integer wire wrapper
//! - [`network`] - Supported ledger networks
//! - [`pricing`] - Reputation-tiered pricing and the node/protocol fee split
//! - [`request`] - The payment request attached to a 402 response
//! - [`timestamp`] - Unix timestamps for verification verdicts
//! - [`token`] - The closed set of accepted payment tokens
//! - [`verify`] - Verification verdict and failure taxonomy

pub mod amount;
pub mod network;
pub mod pricing;
pub mod request;
pub mod timestamp;
pub mod token;
pub mod verify;

pub use network::Network;
pub use request::PaymentRequest;
pub use token::{AcceptMethod, PaymentToken};
pub use verify::{FailureKind, PaymentVerification, VerifyFailure};
