//! Network endpoints and token deployment data for Solana.
//!
//! The token registry is a closed, statically configured mapping: adding a
//! token means extending [`PaymentToken`] and the deployment table here, not
//! registering anything at runtime.

use std::collections::HashMap;

use s402::network::Network;
use s402::token::PaymentToken;
use solana_pubkey::{Pubkey, pubkey};

/// A USDC deployment on a Solana cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsdcDeployment {
    /// The cluster the mint lives on.
    pub network: Network,
    /// The SPL token mint address.
    pub mint: Pubkey,
    /// Token decimal precision.
    pub decimals: u8,
}

/// Known USDC deployments on supported Solana clusters.
pub static USDC_DEPLOYMENTS: &[UsdcDeployment] = &[
    // Mainnet — native Circle USDC
    // Verify: https://solscan.io/token/EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v
    UsdcDeployment {
        network: Network::Mainnet,
        mint: pubkey!("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v"),
        decimals: 6,
    },
    // Devnet — Circle USDC testnet mint
    // Verify: https://explorer.solana.com/address/4zMMC9srt5Ri5X14GAgXhaHii3GnPAEERYPJgZJDncDU?cluster=devnet
    UsdcDeployment {
        network: Network::Devnet,
        mint: pubkey!("4zMMC9srt5Ri5X14GAgXhaHii3GnPAEERYPJgZJDncDU"),
        decimals: 6,
    },
];

/// Returns the USDC deployment for a cluster, if known.
#[must_use]
pub fn usdc_deployment(network: Network) -> Option<&'static UsdcDeployment> {
    USDC_DEPLOYMENTS.iter().find(|d| d.network == network)
}

/// The mint addresses the verifier accepts for fungible tokens.
///
/// [`TokenRegistry::for_network`] seeds the registry from the built-in
/// deployment table; [`TokenRegistry::empty`] plus
/// [`with_mint`](TokenRegistry::with_mint) support tests and bespoke
/// deployments. Native SOL has no mint and never appears in the registry.
#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
    mints: HashMap<PaymentToken, Pubkey>,
}

impl TokenRegistry {
    /// Creates a registry with no mints configured.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a registry from the built-in deployments for `network`.
    #[must_use]
    pub fn for_network(network: Network) -> Self {
        let mut registry = Self::empty();
        if let Some(deployment) = usdc_deployment(network) {
            registry
                .mints
                .insert(PaymentToken::Usdc, deployment.mint);
        }
        registry
    }

    /// Builder-style method: configures a mint for a fungible token.
    #[must_use]
    pub fn with_mint(mut self, token: PaymentToken, mint: Pubkey) -> Self {
        self.mints.insert(token, mint);
        self
    }

    /// Looks up the configured mint for a token.
    ///
    /// Returns `None` for native SOL and for fungible tokens with no mint
    /// configured; the latter is the misconfiguration the verifier reports
    /// as `Token mint not configured`.
    #[must_use]
    pub fn mint_for(&self, token: PaymentToken) -> Option<&Pubkey> {
        self.mints.get(&token)
    }
}
