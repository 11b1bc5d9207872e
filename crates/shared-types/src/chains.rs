// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Blockchain chain identifiers
//!
//! Chainbase addresses chains by their numeric EVM chain id. The crawler accepts
//! any id the provider understands, so [`ChainId`] is a thin wrapper around the
//! number rather than a closed set. Well-known ids carry a display name for logs.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Numeric chain identifier passed through to the upstream provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(u64);

impl ChainId {
    /// Ethereum Mainnet - Chain ID: 1
    pub const ETHEREUM: Self = Self(1);
    /// BNB Smart Chain - Chain ID: 56
    pub const BSC: Self = Self(56);
    /// Polygon - Chain ID: 137
    pub const POLYGON: Self = Self(137);
    /// Base - Chain ID: 8453
    pub const BASE: Self = Self(8453);
    /// Arbitrum One - Chain ID: 42161
    pub const ARBITRUM: Self = Self(42161);
    /// Avalanche C-Chain - Chain ID: 43114
    pub const AVALANCHE: Self = Self(43114);

    /// Wrap a raw chain id
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the numeric chain ID
    pub const fn chain_id(self) -> u64 {
        self.0
    }

    /// Returns the human-readable name of the chain, if it is a well-known one
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            1 => Some("Ethereum"),
            56 => Some("BSC"),
            137 => Some("Polygon"),
            8453 => Some("Base"),
            42161 => Some("Arbitrum"),
            43114 => Some("Avalanche"),
            _ => None,
        }
    }
}

impl Default for ChainId {
    fn default() -> Self {
        Self::ETHEREUM
    }
}

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChainId {
    type Err = ChainIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(id) = s.parse::<u64>() {
            return Ok(Self(id));
        }

        match s.to_uppercase().as_str() {
            "ETHEREUM" | "ETH" => Ok(Self::ETHEREUM),
            "BSC" | "BNB" => Ok(Self::BSC),
            "POLYGON" | "MATIC" => Ok(Self::POLYGON),
            "BASE" => Ok(Self::BASE),
            "ARBITRUM" | "ARB" => Ok(Self::ARBITRUM),
            "AVALANCHE" | "AVAX" => Ok(Self::AVALANCHE),
            _ => Err(ChainIdParseError::InvalidName(s.to_string())),
        }
    }
}

/// Error type for chain ID parsing
#[derive(Debug, thiserror::Error)]
pub enum ChainIdParseError {
    /// Neither a number nor a known chain name
    #[error("unsupported chain: {0}. Expected a numeric chain ID or one of Ethereum, BSC, Polygon, Base, Arbitrum, Avalanche")]
    InvalidName(String),
}
