//! The user-mediated wallet seam.

use alloy_primitives::{Address, B256};
use async_trait::async_trait;
use thiserror::Error;

/// Outcome of a confirmed transaction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TxReceipt {
    pub txid: B256,
    /// Receipt status. `false` means the transaction was included but
    /// reverted.
    pub success: bool,
}

/// Wallet surface the flows drive.
///
/// Every method is user-mediated: switching networks, signing and waiting
/// for inclusion all suspend until the user or their wallet responds, and
/// none of them time out here. Callers layer their own cancel UX on top.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait WalletClient: Send + Sync {
    /// Chain the wallet is currently connected to.
    async fn active_chain(&self) -> Result<u64, WalletError>;

    /// Asks the wallet to switch to `chain_id`.
    async fn switch_chain(&self, chain_id: u64) -> Result<(), WalletError>;

    /// Signs and submits a call on `chain_id`; resolves once the wallet
    /// returns a transaction hash.
    async fn submit_call(
        &self,
        chain_id: u64,
        to: Address,
        calldata: Vec<u8>,
    ) -> Result<B256, WalletError>;

    /// Waits until `txid` is included and returns its receipt.
    async fn await_receipt(&self, chain_id: u64, txid: B256) -> Result<TxReceipt, WalletError>;
}

/// Errors surfaced by a wallet.
#[derive(Debug, Error)]
pub enum WalletError {
    /// The user declined the prompt.
    #[error("user rejected the wallet request")]
    Rejected,

    /// The wallet refused or failed to switch networks.
    #[error("network switch failed: {0}")]
    SwitchFailed(String),

    /// Connection-level failure between us and the wallet or its node.
    #[error("wallet transport error: {0}")]
    Transport(String),
}

impl WalletError {
    pub fn switch_failed(msg: impl Into<String>) -> Self {
        Self::SwitchFailed(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}
