//! Supported chain identifiers.

/// Chains the gateway advertises on `/chains`.
pub const SUPPORTED_CHAINS: &[&str] = &[
    "ethereum",
    "bsc",
    "polygon",
    "avalanche",
    "fantom",
    "arbitrum",
    "celo",
    "harmony",
    "cronos",
    "optimism",
    "moonriver",
    "moonbeam",
    "metis",
    "aurora",
    "kava",
    "base",
    "linea",
    "mantle",
    "zksync",
    "scroll",
    "bnbchain",
    "solana",
    "polygon_zkevm",
    "arbitrum_nova",
];
