//! Runtime configuration.

use std::{fs, path::Path, time::Duration};

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use superrecords_primitives::chain::{
    REGISTRY_ADDRESS, ROOT_CHAIN_ID, TARGET_RESOLVER, WRAPPER_ADDRESS,
};
use thiserror::Error;

/// Default root-chain JSON-RPC endpoint.
const DEFAULT_ROOT_RPC_URL: &str = "https://cloudflare-eth.com";

/// Default record service base URL.
const DEFAULT_RECORD_SERVICE_URL: &str = "https://api.superrecords.xyz";

/// Default seconds to wait after a publish before re-fetching the baseline.
const DEFAULT_REFRESH_DELAY_SECS: u64 = 2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root-chain JSON-RPC endpoint used for resolver reads.
    #[serde(default = "default_root_rpc_url")]
    pub root_rpc_url: String,

    /// Record service base URL.
    #[serde(default = "default_record_service_url")]
    pub record_service_url: String,

    /// Chain id resolver migrations must run on.
    #[serde(default = "default_root_chain_id")]
    pub root_chain_id: u64,

    /// Name registry contract on the root chain.
    #[serde(default = "default_registry")]
    pub registry: Address,

    /// Wrapper contract on the root chain.
    #[serde(default = "default_wrapper")]
    pub wrapper: Address,

    /// The resolver every managed name must point at.
    #[serde(default = "default_target_resolver")]
    pub target_resolver: Address,

    /// Seconds to wait after a publish before the baseline re-fetch, to let
    /// the L2 write become visible through the read path.
    #[serde(default = "default_refresh_delay_secs")]
    pub refresh_delay_secs: u64,
}

fn default_root_rpc_url() -> String {
    DEFAULT_ROOT_RPC_URL.to_owned()
}

fn default_record_service_url() -> String {
    DEFAULT_RECORD_SERVICE_URL.to_owned()
}

fn default_root_chain_id() -> u64 {
    ROOT_CHAIN_ID
}

fn default_registry() -> Address {
    REGISTRY_ADDRESS
}

fn default_wrapper() -> Address {
    WRAPPER_ADDRESS
}

fn default_target_resolver() -> Address {
    TARGET_RESOLVER
}

fn default_refresh_delay_secs() -> u64 {
    DEFAULT_REFRESH_DELAY_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_rpc_url: default_root_rpc_url(),
            record_service_url: default_record_service_url(),
            root_chain_id: default_root_chain_id(),
            registry: default_registry(),
            wrapper: default_wrapper(),
            target_resolver: default_target_resolver(),
            refresh_delay_secs: default_refresh_delay_secs(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn refresh_delay(&self) -> Duration {
        Duration::from_secs(self.refresh_delay_secs)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}
