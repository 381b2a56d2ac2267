//! Chain registry: the root chain and the supported spoke chains.

use std::{fmt, str::FromStr};

use alloy_primitives::{address, Address, B256};
use serde::{Deserialize, Serialize};

/// Chain id of the root chain (Ethereum mainnet), where the authoritative
/// name registry lives. Resolver migration is only valid here.
pub const ROOT_CHAIN_ID: u64 = 1;

/// The name registry on the root chain.
pub const REGISTRY_ADDRESS: Address = address!("00000000000C2E074eC69A0dFb2997BA6C7d2e1e");

/// Wrapper contract. A name whose registry owner is this contract has
/// delegated resolver-setting rights to it.
pub const WRAPPER_ADDRESS: Address = address!("D4416b13d2b3a9aBae7AcD5D6C2BbDBE25686401");

/// The canonical resolver every managed name must point at before record
/// operations are allowed.
pub const TARGET_RESOLVER: Address = address!("4025fE371f146F8315e76B944c36E9f03B64002C");

/// Resolver/multicall contract deployed at the same address on every
/// supported spoke chain.
pub const SPOKE_RESOLVER_ADDRESS: Address = address!("77526a5Ca82028cA9Bb2f2380Da59B386A4EE03f");

/// Explorer link for a root-chain transaction.
pub fn root_explorer_tx_url(txid: B256) -> String {
    format!("https://etherscan.io/tx/{txid}")
}

/// A secondary chain that accepts record writes.
///
/// Exactly two are supported; extending the set means adding a variant here
/// and covering the match arms below.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpokeChain {
    Optimism,
    Base,
}

impl SpokeChain {
    pub const ALL: [SpokeChain; 2] = [SpokeChain::Optimism, SpokeChain::Base];

    pub fn chain_id(&self) -> u64 {
        match self {
            SpokeChain::Optimism => 10,
            SpokeChain::Base => 8453,
        }
    }

    pub fn from_chain_id(chain_id: u64) -> Option<Self> {
        SpokeChain::ALL
            .iter()
            .copied()
            .find(|chain| chain.chain_id() == chain_id)
    }

    /// The multicall target for record writes on this chain.
    pub fn resolver_address(&self) -> Address {
        SPOKE_RESOLVER_ADDRESS
    }

    /// User-facing explorer link for a transaction on this chain.
    pub fn explorer_tx_url(&self, txid: B256) -> String {
        match self {
            SpokeChain::Optimism => format!("https://optimistic.etherscan.io/tx/{txid}"),
            SpokeChain::Base => format!("https://basescan.org/tx/{txid}"),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpokeChain::Optimism => "optimism",
            SpokeChain::Base => "base",
        }
    }
}

impl fmt::Display for SpokeChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpokeChain {
    type Err = UnknownChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SpokeChain::ALL
            .iter()
            .copied()
            .find(|chain| chain.as_str() == s)
            .ok_or_else(|| UnknownChainError(s.to_owned()))
    }
}

/// Chain name outside the supported spoke set.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unsupported spoke chain: {0}")]
pub struct UnknownChainError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spoke_chain_ids_are_distinct() {
        assert_ne!(
            SpokeChain::Optimism.chain_id(),
            SpokeChain::Base.chain_id()
        );
        for chain in SpokeChain::ALL {
            assert_eq!(SpokeChain::from_chain_id(chain.chain_id()), Some(chain));
            assert_ne!(chain.chain_id(), ROOT_CHAIN_ID);
        }
        assert_eq!(SpokeChain::from_chain_id(42161), None);
    }

    #[test]
    fn explorer_urls_embed_txid() {
        let txid = B256::repeat_byte(0xab);
        let url = SpokeChain::Base.explorer_tx_url(txid);
        assert!(url.starts_with("https://basescan.org/tx/0x"));
        assert!(url.contains("abab"));

        assert!(root_explorer_tx_url(txid).starts_with("https://etherscan.io/tx/0x"));
    }

    #[test]
    fn chain_name_round_trips() {
        for chain in SpokeChain::ALL {
            assert_eq!(chain.as_str().parse::<SpokeChain>().unwrap(), chain);
        }
        assert!("arbitrum".parse::<SpokeChain>().is_err());
    }
}
