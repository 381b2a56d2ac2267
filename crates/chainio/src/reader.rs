//! Read-only root-chain access.

use alloy_primitives::{Address, B256};
use async_trait::async_trait;
use jsonrpsee::{
    core::client::ClientT,
    http_client::{HttpClient, HttpClientBuilder},
    rpc_params,
};
use thiserror::Error;
use tracing::trace;

use crate::contracts;

/// Read-only view of the root-chain registry.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait RootChainReader: Send + Sync {
    /// Resolver currently registered for `node`. Zero address when unset.
    async fn resolver_of(&self, node: B256) -> Result<Address, RootReadError>;

    /// Registry owner of `node`.
    async fn owner_of(&self, node: B256) -> Result<Address, RootReadError>;
}

/// Registry reader doing `eth_call` over JSON-RPC.
#[derive(Debug, Clone)]
pub struct RpcRootChainReader {
    client: HttpClient,
    registry: Address,
}

impl RpcRootChainReader {
    pub fn new(rpc_url: &str, registry: Address) -> Result<Self, RootReadError> {
        let client = HttpClientBuilder::default()
            .build(rpc_url)
            .map_err(|e| RootReadError::transport(e.to_string()))?;
        Ok(Self { client, registry })
    }

    async fn eth_call(&self, calldata: Vec<u8>) -> Result<Vec<u8>, RootReadError> {
        let call = serde_json::json!({
            "to": self.registry,
            "data": format!("0x{}", hex::encode(&calldata)),
        });

        let ret: String = self
            .client
            .request("eth_call", rpc_params![call, "latest"])
            .await
            .map_err(|e| RootReadError::rpc(e.to_string()))?;
        trace!(registry = %self.registry, ret = %ret, "eth_call");

        hex::decode(ret.trim_start_matches("0x"))
            .map_err(|e| RootReadError::malformed(e.to_string()))
    }
}

#[async_trait]
impl RootChainReader for RpcRootChainReader {
    async fn resolver_of(&self, node: B256) -> Result<Address, RootReadError> {
        let raw = self.eth_call(contracts::encode_resolver_query(node)).await?;
        contracts::decode_address_return(&raw).map_err(|e| RootReadError::malformed(e.to_string()))
    }

    async fn owner_of(&self, node: B256) -> Result<Address, RootReadError> {
        let raw = self.eth_call(contracts::encode_owner_query(node)).await?;
        contracts::decode_address_return(&raw).map_err(|e| RootReadError::malformed(e.to_string()))
    }
}

/// Errors reading the root chain.
///
/// Callers must not interpret any of these as "resolver mismatched"; a failed
/// read means the answer is unknown.
#[derive(Debug, Error)]
pub enum RootReadError {
    /// Client could not be built or reach the endpoint.
    #[error("transport error: {0}")]
    Transport(String),

    /// The node answered with an error.
    #[error("rpc error: {0}")]
    Rpc(String),

    /// The node answered with something that does not decode.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl RootReadError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn rpc(msg: impl Into<String>) -> Self {
        Self::Rpc(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}
